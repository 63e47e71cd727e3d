use crate::app::App;
use crate::error::Result;
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_global_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            Ok(true)
        }
        KeyCode::Char('?') => {
            app.toggle_help();
            Ok(true)
        }
        KeyCode::Char('p') => {
            app.toggle_pause();
            Ok(true)
        }
        KeyCode::Char('r') => {
            app.force_refresh();
            Ok(true)
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            Ok(true)
        }
        _ => Ok(false),
    }
}
