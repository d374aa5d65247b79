pub(crate) mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    screens::dispatch_input(app, key);
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.wheel(1.0),
        MouseEventKind::ScrollUp => app.wheel(-1.0),
        MouseEventKind::Moved => app.hover_at(mouse.column, mouse.row),
        _ => {}
    }
}
