use crate::app::state::ChartOrder;
use crate::app::App;
use crate::ui::theme::{color, ACCENT, MUTED, NIGHT, SNOW};
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType,
    Paragraph, Tabs,
};
use ratatui::Frame;
use skimap::{Month, Week};

/// Most bluebird days a week can hold; bars are drawn as a share of it.
pub const MAX_WEEK_DAYS: f64 = 7.0;

/// Bar length in tenths of a day, clamped to the track.
pub fn bar_tenths(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    (value.clamp(0.0, MAX_WEEK_DAYS) * 10.0).round() as u64
}

fn chart_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color(ACCENT)))
        .style(Style::default().bg(color(NIGHT)))
}

pub fn render_month_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Month::ALL
        .iter()
        .map(|month| TextLine::from(month.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.selection.month.index())
        .style(Style::default().fg(color(MUTED)))
        .highlight_style(
            Style::default()
                .fg(color(ACCENT))
                .bg(color(SNOW))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_week_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Week::ALL
        .iter()
        .map(|week| TextLine::from(week.as_str()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.selection.week.index())
        .style(Style::default().fg(color(MUTED)))
        .highlight_style(
            Style::default()
                .fg(color(ACCENT))
                .bg(color(SNOW))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_bluebird_bars(app: &App, f: &mut Frame<'_>, area: Rect) {
    let order = match app.chart_order() {
        ChartOrder::Descending => "most first",
        ChartOrder::NorthToSouth => "north to south",
    };
    let title = format!(
        " Bluebird days · {} {} · {order} ",
        app.selection.month, app.selection.week
    );

    let rows = app.chart_rows();
    if rows.is_empty() {
        let paragraph = Paragraph::new("Waiting for bluebird data...")
            .block(chart_block(title))
            .style(Style::default().fg(color(MUTED)))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let highlighted = app.highlighted_resort().map(|resort| resort.id);
    let bars: Vec<Bar<'_>> = rows
        .iter()
        .map(|(resort, value)| {
            let mut label_style = Style::default().fg(color(SNOW));
            if highlighted == Some(resort.id) {
                label_style = label_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Bar::default()
                .value(bar_tenths(*value))
                .text_value(format!("{value:.1}"))
                .label(TextLine::from(Span::styled(resort.name, label_style)))
                .style(Style::default().fg(color(resort.color)))
                .value_style(Style::default().fg(color(NIGHT)).bg(color(resort.color)))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(bar_tenths(MAX_WEEK_DAYS))
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

pub fn render_trend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (Some(resort), Some(dataset)) = (app.trend_resort(), app.dataset()) else {
        return;
    };
    let points = dataset.season_series(resort.name);
    let last_x = points.len().saturating_sub(1) as f64;

    let datasets = vec![Dataset::default()
        .name(resort.name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color(resort.color)))
        .data(&points)];

    let x_labels = Month::ALL
        .iter()
        .map(|month| Span::raw(month.label()))
        .collect::<Vec<_>>();
    let y_labels = vec![Span::raw("0"), Span::raw("3.5"), Span::raw("7")];

    let chart = Chart::new(datasets)
        .block(chart_block(format!(" Season trend · {} ", resort.name)))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(color(MUTED)))
                .bounds([0.0, last_x.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("days")
                .style(Style::default().fg(color(MUTED)))
                .bounds([0.0, MAX_WEEK_DAYS])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

pub fn render_chart_hint(f: &mut Frame<'_>, area: Rect) {
    let hint = Paragraph::new(TextLine::from(vec![
        Span::styled("←/→", Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD)),
        Span::styled(" month  ", Style::default().fg(color(MUTED))),
        Span::styled("Tab/1-4", Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD)),
        Span::styled(" week", Style::default().fg(color(MUTED))),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(hint, area);
}
