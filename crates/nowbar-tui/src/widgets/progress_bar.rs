//! Smooth Unicode progress bar widget.

use ratatui::{layout::Rect, style::Style, text::Line, widgets::Paragraph, Frame};

/// Render a smooth progress bar in `area`.  `progress` is 0.0..=1.0.
pub fn draw_progress(frame: &mut Frame, area: Rect, progress: f64, style: Style) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let line = Line::styled(bar_string(progress, area.width as usize), style);
    frame.render_widget(Paragraph::new(line), area);
}

/// Build the bar text: 8 eighths per cell for a smooth fill.
fn bar_string(progress: f64, width: usize) -> String {
    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let eighths = (progress.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill_ratio() {
        let bar = bar_string(0.5, 10);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 5);
    }

    #[test]
    fn test_bar_extremes() {
        assert!(bar_string(0.0, 8).chars().all(|c| c == ' '));
        assert!(bar_string(1.0, 8).chars().all(|c| c == '█'));
        // Out-of-range input clamps rather than panicking.
        assert!(bar_string(2.5, 8).chars().all(|c| c == '█'));
    }
}
