use crate::app::state::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use skimap::scroll::NavKey;

mod chart;
mod map;
mod search;

pub fn dispatch_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // The help popup is modal: F1 or Esc closes it, everything else is eaten.
    if app.show_help {
        if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    if app.search.is_some() {
        search::handle_search_input(app, key.code);
        return;
    }

    match key.code {
        KeyCode::F(1) => {
            app.show_help = true;
            return;
        }
        KeyCode::Char(' ') => {
            app.toggle_snow();
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return;
        }
        KeyCode::Up | KeyCode::PageUp => {
            app.navigate(NavKey::Up);
            return;
        }
        KeyCode::Down | KeyCode::PageDown => {
            app.navigate(NavKey::Down);
            return;
        }
        _ => {}
    }

    if app.chart_visible() && chart::handle_chart_input(app, key.code) {
        return;
    }

    if app.map_interactive() {
        map::handle_map_input(app, key.code);
    }
}

#[cfg(test)]
mod tests {
    use super::dispatch_input;
    use crate::app::state::App;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use skimap::config::AppConfig;
    use skimap::snow::SnowMode;

    fn press(app: &mut App, code: KeyCode) {
        dispatch_input(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let mut app = App::new(AppConfig::default());
        dispatch_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);

        let mut app = App::new(AppConfig::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = App::new(AppConfig::default());
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn space_pauses_snow_outside_search() {
        let mut app = App::new(AppConfig::default());
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.snow.mode(), SnowMode::Paused);

        app.start_search();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.snow.mode(), SnowMode::Paused);
        assert_eq!(app.search.as_deref(), Some(" "));

        app.cancel_search();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.snow.mode(), SnowMode::Running);
    }

    #[test]
    fn f1_opens_help_over_search_and_closes_it_again() {
        let mut app = App::new(AppConfig::default());
        app.start_search();
        press(&mut app, KeyCode::F(1));
        assert!(!app.show_help);
        assert_eq!(app.search.as_deref(), Some(""));

        app.cancel_search();
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        press(&mut app, KeyCode::F(1));
        assert!(!app.show_help);
    }

    #[test]
    fn typing_q_in_search_does_not_quit() {
        let mut app = App::new(AppConfig::default());
        app.start_search();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.search.as_deref(), Some("q"));
    }
}
