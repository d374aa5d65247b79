// Rendering for the skimap TUI.
// One section is drawn per frame; the hand-over is a fade toward the night sky.

pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use skimap::Section;
use theme::{color, ACCENT, FADE_TARGET, MUTED, NIGHT, SNOW};
use throbber_widgets_tui::Throbber;
use widgets::fade::{fade_amount, fade_area};

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    if area.is_empty() {
        return;
    }
    let (content, status) = split_status(area);

    let (section, opacity) = app.dominant_section();
    match section {
        Section::Home => screens::home::render_home(app, f, content),
        Section::Map => screens::map::render_map(app, f, content),
        Section::Chart => screens::chart::render_chart_section(app, f, content),
    }
    fade_area(f.buffer_mut(), content, FADE_TARGET, fade_amount(opacity));

    render_status_bar(app, f, status);

    if let Some(query) = &app.search {
        screens::help::render_search_popup(app, query, f, content);
    }
    if app.show_help {
        screens::help::render_help_popup(app, f, content);
    }
}

/// Content area and the one-row status bar under it.
pub fn split_status(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn render_status_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let background = Style::default().bg(color(NIGHT)).fg(color(MUTED));
    f.render_widget(Paragraph::new("").style(background), area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(36)])
        .split(area);

    if app.is_loading() {
        let throbber = Throbber::default()
            .label("Loading bluebird data...")
            .style(background)
            .throbber_style(Style::default().fg(color(ACCENT)).add_modifier(Modifier::BOLD));
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, chunks[0], &mut state);
    } else {
        f.render_widget(
            Paragraph::new(format!(" {}", app.status_message)).style(background),
            chunks[0],
        );
    }

    f.render_widget(
        Paragraph::new(section_dots(app))
            .style(background)
            .alignment(ratatui::layout::Alignment::Right),
        chunks[1],
    );
}

fn section_dots(app: &App) -> TextLine<'static> {
    let active = app.controller.snapshot().section_index;
    let count = app.controller.config().section_count;

    let mut spans = Vec::with_capacity(count + 3);
    for index in 0..count {
        let (symbol, style) = if index == active {
            ("● ", Style::default().fg(color(SNOW)))
        } else {
            ("○ ", Style::default().fg(color(MUTED)))
        };
        spans.push(Span::styled(symbol, style));
    }
    spans.push(Span::styled(
        app.active_section().label(),
        Style::default().fg(color(SNOW)).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("  F1 help ", Style::default().fg(color(MUTED))));
    TextLine::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use skimap::config::AppConfig;
    use skimap::data::{DatasetOrigin, DatasetSource, EmbeddedSource, LoadedDataset};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn status_bar_takes_last_row() {
        let (content, status) = split_status(Rect::new(0, 0, 80, 24));
        assert_eq!(content, Rect::new(0, 0, 80, 23));
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn home_renders_title_and_loading_status() {
        let mut app = App::new(AppConfig::default());
        app.resize(100, 30);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test backend");
        terminal.draw(|f| ui(&app, f)).expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("France"));
        assert!(text.contains("Loading bluebird data"));
        assert!(text.contains("Home"));
    }

    #[test]
    fn map_renders_resorts_and_airports() {
        let mut app = App::new(AppConfig::default());
        app.resize(120, 40);
        app.finish_loading(LoadedDataset {
            dataset: EmbeddedSource.load().expect("embedded table"),
            origin: DatasetOrigin::Embedded,
            error: None,
        });
        let now = app.now();
        app.controller.scroll_to_section(1, now);
        app.controller.tick(now + std::time::Duration::from_secs(2));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test backend");
        terminal.draw(|f| ui(&app, f)).expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("Ski Resorts"));
        assert!(text.contains("Geneva"));
        assert!(text.contains('▲'));
        assert!(text.contains("Bluebird data: built-in table"));
    }

    #[test]
    fn help_popup_draws_over_the_section() {
        let mut app = App::new(AppConfig::default());
        app.resize(100, 30);
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test backend");
        terminal.draw(|f| ui(&app, f)).expect("draw");

        assert!(buffer_text(&terminal).contains("Keyboard"));
    }
}
