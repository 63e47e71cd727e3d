use crate::error::Result;
use crate::state::AppState;

pub struct App {
    pub state: AppState,
    pub show_help: bool,
    pub paused: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            show_help: false,
            paused: false,
            should_quit: false,
        }
    }

    pub fn refresh(&mut self) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        self.state.refresh_data()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "Toggled sampling");
    }

    pub fn force_refresh(&mut self) {
        self.state.force_refresh();
    }
}
