//! Layered mountain silhouettes for the home view.

use crate::ui::theme::{color, SNOW};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use skimap::domain::Rgb;

/// One tent-shaped ridge, in percent of the render area.
#[derive(Debug, Clone, Copy)]
pub struct Ridge {
    pub left: f64,
    pub width: f64,
    /// Peak height above `base`, fraction of the area height.
    pub peak: f64,
    /// Lift of the ridge foot above the bottom edge, fraction of the height.
    pub base: f64,
    pub color: Rgb,
}

impl Ridge {
    /// Height above `base` at `x` percent across, as a fraction of the area.
    pub fn height_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        let t = (x - self.left) / self.width;
        if !(0.0..=1.0).contains(&t) {
            return 0.0;
        }
        self.peak * 2.0f64.mul_add(-t, 1.0).abs().mul_add(-1.0, 1.0)
    }
}

/// Back to front.
pub const RIDGES: [Ridge; 4] = [
    Ridge {
        left: -0.39,
        width: 100.51,
        peak: 0.45,
        base: 0.0,
        color: Rgb(0x0B, 0x17, 0x48),
    },
    Ridge {
        left: 13.91,
        width: 78.4,
        peak: 0.38,
        base: 0.0,
        color: Rgb(0x45, 0x79, 0xCC),
    },
    Ridge {
        left: 13.79,
        width: 39.73,
        peak: 0.3,
        base: 0.0,
        color: Rgb(0x29, 0x3F, 0x88),
    },
    Ridge {
        left: 39.06,
        width: 45.12,
        peak: 0.12,
        base: 0.122,
        color: SNOW,
    },
];

pub struct Mountains;

impl Widget for Mountains {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let width = f64::from(area.width);
        let height = f64::from(area.height);

        for column in 0..area.width {
            let x = (f64::from(column) + 0.5) / width * 100.0;
            for ridge in &RIDGES {
                let rise = ridge.height_at(x);
                if rise <= 0.0 {
                    continue;
                }
                let top = (height * (1.0 - ridge.base - rise)).round().max(0.0) as u16;
                let bottom = (height * (1.0 - ridge.base)).round().min(height) as u16;
                for row in top..bottom {
                    if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                        cell.set_symbol(" ").set_bg(color(ridge.color));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn ridge_peaks_in_the_middle() {
        let ridge = Ridge {
            left: 20.0,
            width: 40.0,
            peak: 0.5,
            base: 0.0,
            color: SNOW,
        };
        assert!((ridge.height_at(40.0) - 0.5).abs() < 1e-12);
        assert!((ridge.height_at(30.0) - 0.25).abs() < 1e-12);
        assert!(ridge.height_at(10.0).abs() < 1e-12);
        assert!(ridge.height_at(61.0).abs() < 1e-12);
    }

    #[test]
    fn bottom_row_is_painted_and_top_row_is_sky() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        Mountains.render(area, &mut buf);

        assert_ne!(buf[(20, 19)].bg, Color::Reset);
        assert_eq!(buf[(20, 0)].bg, Color::Reset);
    }
}
