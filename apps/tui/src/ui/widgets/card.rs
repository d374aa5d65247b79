use crate::ui::theme::{color, BLACK, CARD, INK};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use skimap::resorts::Resort;

const CARD_HEIGHT: u16 = 4;
const MIN_CARD_WIDTH: u16 = 24;

/// Card placed just above `anchor`, flipped below it when there is no room,
/// and clamped inside `bounds`.
pub fn card_rect(anchor: (u16, u16), width: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = CARD_HEIGHT.min(bounds.height);
    let (ax, ay) = anchor;

    let left = ax.saturating_sub(width / 2).max(bounds.left());
    let x = left.min(bounds.right().saturating_sub(width));

    let y = if ay >= bounds.top() + height {
        ay - height
    } else {
        (ay + 1).min(bounds.bottom().saturating_sub(height))
    };

    Rect {
        x,
        y,
        width,
        height,
    }
}

pub fn render_resort_card(f: &mut Frame<'_>, resort: &Resort, anchor: (u16, u16), bounds: Rect) {
    let header = format!("{}  {} km", resort.name, resort.length_km);
    let content_width = header.chars().count().max(resort.suitable_for.chars().count());
    let width = (content_width as u16 + 4).max(MIN_CARD_WIDTH);
    let area = card_rect(anchor, width, bounds);

    let lines = vec![
        TextLine::from(vec![
            Span::styled(
                resort.name,
                Style::default()
                    .fg(color(BLACK))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} km", resort.length_km),
                Style::default().fg(color(INK)),
            ),
        ]),
        TextLine::from(Span::styled(
            resort.suitable_for,
            Style::default().fg(color(INK)),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color(resort.color)))
            .style(Style::default().bg(color(CARD))),
    );

    f.render_widget(Clear, area);
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_sits_above_anchor() {
        let bounds = Rect::new(0, 0, 80, 24);
        let rect = card_rect((40, 10), 20, bounds);
        assert_eq!(rect, Rect::new(30, 6, 20, 4));
    }

    #[test]
    fn card_flips_below_near_top_and_clamps_right() {
        let bounds = Rect::new(0, 2, 80, 22);
        let rect = card_rect((78, 3), 20, bounds);
        assert_eq!(rect.y, 4);
        assert_eq!(rect.right(), 80);
    }
}
