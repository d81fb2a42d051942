pub mod now_playing;
pub mod progress_bar;
