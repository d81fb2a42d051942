//! The now-playing panel, the widget's entire visual surface.
//!
//! Pure function of the ViewState: loading or player-unavailable states
//! draw nothing (the empty placeholder), a paused track renders in the
//! dimmed palette, a playing track in the full palette.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use nowbar_core::state::ViewState;

use crate::theme;
use crate::widgets::progress_bar::draw_progress;

const WIDGET_WIDTH: u16 = 48;
const WIDGET_HEIGHT: u16 = 6;

pub fn draw(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.hidden() {
        return;
    }

    let pal = theme::palette(state.playing);
    let boxed = centered(area, WIDGET_WIDTH, WIDGET_HEIGHT);
    let width = boxed.width as usize;
    let rows = Layout::vertical([Constraint::Length(1); 6]).split(boxed);

    // Title line with a playback glyph.
    let glyph = if state.playing { "▶ " } else { "⏸ " };
    let title = Line::from(vec![
        Span::styled(glyph, pal.bar),
        Span::styled(truncate(&state.title, width.saturating_sub(2)), pal.title),
    ]);
    frame.render_widget(Paragraph::new(title), rows[0]);

    draw_progress(frame, rows[1], state.position_ratio, pal.bar);

    // Artist – album, en-dash only when both are present.
    let mut meta = vec![Span::styled(state.artist.clone(), pal.meta)];
    if !state.artist.is_empty() && !state.album.is_empty() {
        meta.push(Span::styled(" – ", pal.meta));
    }
    meta.push(Span::styled(state.album.clone(), pal.album));
    frame.render_widget(Paragraph::new(Line::from(meta)), rows[2]);

    // Cover art has no terminal rendition; show its source dimmed.
    frame.render_widget(
        Paragraph::new(Line::styled(
            truncate(&state.artwork_url, width),
            pal.hint,
        )),
        rows[3],
    );

    let hints = " Space play/pause  n next  p prev  r refresh  q quit";
    frame.render_widget(
        Paragraph::new(Line::styled(truncate(hints, width), pal.hint)),
        rows[5],
    );
}

/// Center a `width` x `height` box inside `area`, shrinking to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
