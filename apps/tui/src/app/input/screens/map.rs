use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab => app.cycle_resort(true),
        KeyCode::BackTab => app.cycle_resort(false),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Backspace => {
            app.selected_resort = None;
            app.hovered_resort = None;
        }
        _ => {}
    }
}
