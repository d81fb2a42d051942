//! Player-agnostic domain logic for the now-playing widget.
//!
//! Holds everything that runs without a terminal: the snapshot parser, the
//! view-state reducer, the `PlayerChannel` seam, and configuration.  The
//! `nowbar-tui` crate supplies the event loop, the real `osascript`
//! channel, and the renderer.

pub mod config;
pub mod platform;
pub mod player;
pub mod state;
pub mod track;
