use crate::app::state::App;
use crossterm::event::KeyCode;

/// Month and week selectors. Returns false for keys the chart ignores so
/// the map underneath can handle them.
pub fn handle_chart_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Left => app.prev_month(),
        KeyCode::Right => app.next_month(),
        KeyCode::Tab if app.chart_section_active() || !app.map_interactive() => app.next_week(),
        KeyCode::Char(ch @ '1'..='4') => {
            if let Some(number) = ch.to_digit(10) {
                app.set_week(number as usize);
            }
        }
        _ => return false,
    }
    true
}
