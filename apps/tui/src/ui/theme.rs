//! Palette shared by all views. Everything is 24-bit so cross-fades can
//! interpolate it.

use ratatui::style::Color;
use skimap::domain::Rgb;

pub const SKY_TOP: Rgb = Rgb(0xE3, 0xF0, 0xFF);
pub const SKY_BOTTOM: Rgb = Rgb(0xEE, 0xED, 0xFB);
pub const NIGHT: Rgb = Rgb(0x0B, 0x17, 0x48);
pub const NIGHT_EDGE: Rgb = Rgb(0x1A, 0x32, 0x7A);
pub const INK: Rgb = Rgb(0x29, 0x3F, 0x88);
pub const ACCENT: Rgb = Rgb(0x45, 0x79, 0xCC);
pub const SNOW: Rgb = Rgb(0xFE, 0xFF, 0xFF);
pub const CARD: Rgb = Rgb(0xCB, 0xE0, 0xFD);
pub const MUTED: Rgb = Rgb(0x9A, 0xA8, 0xC8);
pub const BLACK: Rgb = Rgb(0x10, 0x10, 0x10);

/// Sections fade toward this colour while they hand over.
pub const FADE_TARGET: Rgb = NIGHT;

pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
