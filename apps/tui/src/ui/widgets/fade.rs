//! Cross-fade by colour interpolation over an already rendered buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use skimap::domain::Rgb;

/// How far to fade a section drawn at `opacity`. The dominant section never
/// drops below one half, so that maps to a full fade at the crossover.
pub fn fade_amount(opacity: f64) -> f64 {
    ((1.0 - opacity) * 2.0).clamp(0.0, 1.0)
}

pub fn fade_color(color: Color, toward: Rgb, amount: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let mixed = Rgb(r, g, b).mix(toward, amount);
            Color::Rgb(mixed.0, mixed.1, mixed.2)
        }
        other => other,
    }
}

pub fn fade_area(buf: &mut Buffer, area: Rect, toward: Rgb, amount: f64) {
    if amount <= 0.0 {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.fg = fade_color(cell.fg, toward, amount);
                cell.bg = fade_color(cell.bg, toward, amount);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_amount_is_zero_when_fully_opaque() {
        assert!(fade_amount(1.0).abs() < f64::EPSILON);
        assert!((fade_amount(0.75) - 0.5).abs() < f64::EPSILON);
        assert!((fade_amount(0.5) - 1.0).abs() < f64::EPSILON);
        assert!((fade_amount(0.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fades_rgb_cells_and_leaves_named_colours() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        buf[(0, 0)].set_fg(Color::Rgb(200, 100, 0)).set_bg(Color::Rgb(0, 0, 0));
        buf[(1, 0)].set_fg(Color::Yellow);

        fade_area(&mut buf, area, Rgb(0, 100, 200), 0.5);

        assert_eq!(buf[(0, 0)].fg, Color::Rgb(100, 100, 100));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 50, 100));
        assert_eq!(buf[(1, 0)].fg, Color::Yellow);
    }
}
