use crate::app::App;
use crate::ui::theme::{color, ACCENT, CARD, INK, MUTED, NIGHT, SNOW};
use crate::ui::widgets::popup::{centered_fixed, centered_rect};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const BINDINGS: [(&str, &str); 11] = [
    ("↑/↓ PgUp/PgDn", "Previous / next section"),
    ("Mouse wheel", "Scroll; keep scrolling on the last section"),
    ("Tab / Shift-Tab", "Next / previous resort on the map"),
    ("/", "Search resorts"),
    ("Backspace", "Clear the selected resort"),
    ("←/→", "Previous / next month"),
    ("Tab", "Next week (chart)"),
    ("1-4", "Pick a week"),
    ("Space", "Pause or resume the snowfall"),
    ("F1", "Toggle this help"),
    ("q / Esc / Ctrl-C", "Quit"),
];

pub fn render_help_popup(app: &App, f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(60, 70, area);

    let key_style = Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Keyboard",
            Style::default().fg(color(ACCENT)).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];
    lines.extend(BINDINGS.iter().map(|(keys, action)| {
        TextLine::from(vec![
            Span::styled(format!("{keys:<18}"), key_style),
            Span::styled(*action, Style::default().fg(color(MUTED))),
        ])
    }));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        format!(
            "Layout: {}   Snow: {:?}",
            app.config.layout.as_str(),
            app.snow.mode()
        ),
        Style::default().fg(color(MUTED)),
    )));

    let help = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Help (F1 to close) ")
                .title_style(Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color(ACCENT)))
                .style(Style::default().bg(color(NIGHT))),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

pub fn render_search_popup(app: &App, query: &str, f: &mut Frame<'_>, area: Rect) {
    let popup = centered_fixed(50, 5, area);

    let best = match app.registry.search(query) {
        Some(resort) => Span::styled(
            format!("Enter: {}", resort.name),
            Style::default().fg(color(INK)).add_modifier(Modifier::BOLD),
        ),
        None if query.trim().is_empty() => {
            Span::styled("Type a resort name", Style::default().fg(color(INK)))
        }
        None => Span::styled("No match", Style::default().fg(color(INK))),
    };

    let search = Paragraph::new(vec![
        TextLine::from(vec![
            Span::styled("/ ", Style::default().fg(color(ACCENT))),
            Span::styled(format!("{query}█"), Style::default().fg(color(INK))),
        ]),
        TextLine::from(best),
    ])
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color(ACCENT)))
            .style(Style::default().bg(color(CARD))),
    );

    f.render_widget(Clear, popup);
    f.render_widget(search, popup);
}
