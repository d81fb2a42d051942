//! Color palette and style constants for the widget.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_DIM: Color = Color::Rgb(60, 60, 72);

/// Styles for one render pass.  Picked once per frame from the playback
/// state: when paused, everything drops to the muted tones.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub title: Style,
    pub meta: Style,
    pub album: Style,
    pub bar: Style,
    pub hint: Style,
}

pub fn palette(playing: bool) -> Palette {
    if playing {
        Palette {
            title: Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            meta: Style::default().fg(C_SECONDARY),
            album: Style::default()
                .fg(C_SECONDARY)
                .add_modifier(Modifier::ITALIC),
            bar: Style::default().fg(C_PLAYING),
            hint: Style::default().fg(C_MUTED),
        }
    } else {
        Palette {
            title: Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
            meta: Style::default().fg(C_DIM),
            album: Style::default().fg(C_DIM).add_modifier(Modifier::ITALIC),
            bar: Style::default().fg(C_MUTED),
            hint: Style::default().fg(C_DIM),
        }
    }
}
