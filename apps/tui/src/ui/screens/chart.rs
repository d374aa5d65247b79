use crate::app::App;
use crate::ui::theme::{color, MUTED, NIGHT, SNOW};
use crate::ui::widgets::charts::{
    render_bluebird_bars, render_chart_hint, render_month_tabs, render_trend, render_week_tabs,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

pub fn render_chart_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(color(NIGHT))), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(vec![
        TextLine::from(Span::styled(
            " Bluebird Days",
            Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            " Sunny days after fresh snowfall, per resort and week. Scroll on for the season.",
            Style::default().fg(color(MUTED)),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    render_chart_panel(app, f, chunks[1], app.trend_visible());
}

/// Month and week selectors above the bars, with the trend alongside when asked.
pub fn render_chart_panel(app: &App, f: &mut Frame<'_>, area: Rect, with_trend: bool) {
    f.render_widget(Block::default().style(Style::default().bg(color(NIGHT))), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Months
            Constraint::Length(1), // Weeks
            Constraint::Min(3),    // Chart
            Constraint::Length(1), // Hint
        ])
        .split(area);

    render_month_tabs(app, f, rows[0]);
    render_week_tabs(app, f, rows[1]);

    if with_trend {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[2]);
        render_bluebird_bars(app, f, columns[0]);
        render_trend(app, f, columns[1]);
    } else {
        render_bluebird_bars(app, f, rows[2]);
    }

    render_chart_hint(f, rows[3]);
}
