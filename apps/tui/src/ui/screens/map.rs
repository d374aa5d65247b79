use crate::app::App;
use crate::ui::screens::chart::render_chart_panel;
use crate::ui::split_status;
use crate::ui::theme::{color, ACCENT, MUTED, NIGHT, NIGHT_EDGE, SNOW};
use crate::ui::widgets::card::render_resort_card;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use skimap::domain::MapPosition;
use skimap::resorts::{Resort, ResortRegistry};

/// Title and subtitle rows above the map.
pub const HEADER_ROWS: u16 = 2;

const ICON: &str = "▲";

/// Airports shown for orientation, positioned like resorts.
const AIRPORTS: [(&str, MapPosition); 3] = [
    ("✈ Geneva", MapPosition::new(75.0, 15.0)),
    ("✈ Lyon", MapPosition::new(15.0, 45.0)),
    ("✈ Turin", MapPosition::new(80.0, 65.0)),
];

/// Part of the section the percentage coordinates map onto.
pub fn map_canvas(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(HEADER_ROWS),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(HEADER_ROWS),
    }
}

pub fn icon_cell(canvas: Rect, position: MapPosition) -> Option<(u16, u16)> {
    if canvas.is_empty() {
        return None;
    }
    let span = |length: u16, percent: f64| {
        (f64::from(length - 1) * percent.clamp(0.0, 100.0) / 100.0).round() as u16
    };
    Some((
        canvas.x + span(canvas.width, position.x),
        canvas.y + span(canvas.height, position.y),
    ))
}

/// Resort whose icon is at (or one column beside) the given terminal cell.
/// `area` is the whole terminal, status bar included.
pub fn resort_at(registry: &ResortRegistry, area: Rect, column: u16, row: u16) -> Option<&Resort> {
    let (content, _) = split_status(area);
    let canvas = map_canvas(content);
    registry
        .all()
        .iter()
        .filter_map(|resort| {
            let (x, y) = icon_cell(canvas, resort.position)?;
            let distance = x.abs_diff(column);
            (y == row && distance <= 1).then_some((resort, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(resort, _)| resort)
}

pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(color(NIGHT))), area);
    render_header(f, area);

    let canvas = map_canvas(area);
    render_airports(f, canvas);
    render_icons(app, f, canvas);

    if app.overlay_visible() {
        render_chart_overlay(app, f, canvas);
    } else if let Some(resort) = app.highlighted_resort() {
        if let Some(anchor) = icon_cell(canvas, resort.position) {
            render_resort_card(f, resort, anchor, canvas);
        }
    }
}

fn render_header(f: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(vec![
        TextLine::from(Span::styled(
            " Ski Resorts",
            Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            " Hover or Tab through the Alps, / to search, scroll for bluebird days",
            Style::default().fg(color(MUTED)),
        )),
    ]);
    let header_area = Rect {
        height: HEADER_ROWS.min(area.height),
        ..area
    };
    f.render_widget(header, header_area);
}

fn render_airports(f: &mut Frame<'_>, canvas: Rect) {
    let buf = f.buffer_mut();
    for (label, position) in AIRPORTS {
        let Some((x, y)) = icon_cell(canvas, position) else {
            continue;
        };
        let room = canvas.right().saturating_sub(x);
        buf.set_stringn(
            x,
            y,
            label,
            usize::from(room),
            Style::default().fg(color(NIGHT_EDGE)).bg(color(NIGHT)),
        );
    }
}

fn render_icons(app: &App, f: &mut Frame<'_>, canvas: Rect) {
    let highlighted = app.highlighted_resort().map(|resort| resort.id);
    let interactive = app.map_interactive();
    let buf = f.buffer_mut();

    for resort in app.registry.all() {
        let Some((x, y)) = icon_cell(canvas, resort.position) else {
            continue;
        };
        let mut style = Style::default().fg(color(resort.color));
        if !interactive {
            style = style.add_modifier(Modifier::DIM);
        }
        if highlighted == Some(resort.id) {
            style = style.fg(color(SNOW)).bg(color(ACCENT)).add_modifier(Modifier::BOLD);
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(ICON).set_style(style);
        }
    }
}

fn render_chart_overlay(app: &App, f: &mut Frame<'_>, canvas: Rect) {
    let popup = centered_rect(80, 90, canvas);
    f.render_widget(Clear, popup);
    render_chart_panel(app, f, popup, false);
}
