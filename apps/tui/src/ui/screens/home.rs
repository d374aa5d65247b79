use crate::app::App;
use crate::ui::theme::{color, ACCENT, INK, SKY_BOTTOM, SKY_TOP, SNOW};
use crate::ui::widgets::mountains::Mountains;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Flakes at least this large get the six-armed glyph.
const LARGE_FLAKE: f64 = 8.0;

pub fn render_home(app: &App, f: &mut Frame<'_>, area: Rect) {
    paint_sky(f.buffer_mut(), area);
    f.render_widget(Mountains, area);
    paint_snow(app, f.buffer_mut(), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Length(3), // Title
            Constraint::Min(0),
            Constraint::Length(2), // Scroll indicator
        ])
        .split(area);

    render_title(f, chunks[1]);
    render_scroll_indicator(app, f, chunks[3]);
}

fn paint_sky(buf: &mut Buffer, area: Rect) {
    let rows = area.height.max(1);
    for row in 0..area.height {
        let shade = SKY_TOP.mix(SKY_BOTTOM, f64::from(row) / f64::from(rows));
        for column in 0..area.width {
            if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                cell.reset();
                cell.set_bg(color(shade));
            }
        }
    }
}

fn paint_snow(app: &App, buf: &mut Buffer, area: Rect) {
    if area.is_empty() {
        return;
    }
    let max_x = f64::from(area.width - 1);
    let max_y = f64::from(area.height - 1);
    for (x, y, size) in app.snow.visible() {
        let column = area.x + (x * max_x).round() as u16;
        let row = area.y + (y * max_y).round() as u16;
        let glyph = if size >= LARGE_FLAKE { "❄" } else { "·" };
        if let Some(cell) = buf.cell_mut((column, row)) {
            let tint = if is_light(cell.bg) { ACCENT } else { SNOW };
            cell.set_symbol(glyph).set_fg(color(tint));
        }
    }
}

/// White flakes vanish against the sky and the snow cap.
fn is_light(bg: Color) -> bool {
    match bg {
        Color::Rgb(r, g, b) => u16::from(r) + u16::from(g) + u16::from(b) > 3 * 0xC0,
        _ => false,
    }
}

fn render_title(f: &mut Frame<'_>, area: Rect) {
    let title = Text::from(vec![
        TextLine::from(Span::styled(
            "A map GUIDE for your winter skiing vacation",
            Style::default().fg(color(INK)),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "France",
            Style::default().fg(color(ACCENT)).add_modifier(Modifier::BOLD),
        )),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

/// Bobs one row every half second.
fn render_scroll_indicator(app: &App, f: &mut Frame<'_>, area: Rect) {
    let bob = (app.now().as_millis() / 500) % 2 == 1;
    let lines = if bob {
        vec![TextLine::from(""), indicator_line()]
    } else {
        vec![indicator_line(), TextLine::from("")]
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn indicator_line() -> TextLine<'static> {
    TextLine::from(Span::styled(
        "▼ scroll ▼",
        Style::default().fg(color(INK)).add_modifier(Modifier::BOLD),
    ))
}
