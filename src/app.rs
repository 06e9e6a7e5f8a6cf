use crate::config::ShellProps;
use crate::request::{self, ExecutionRequest};
use crate::shell::LoadTicket;
use crate::state::AppState;
use crate::swagger;
use crate::ui::{self, Command};
use color_eyre::Result;
use crossterm::{execute, terminal::SetTitle};
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::debug;

/// Window title before a document is loaded
const DEFAULT_TITLE: &str = "swagger-shell";

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    /// Last title written to the terminal
    applied_title: Option<String>,
}

impl App {
    pub fn new(props: ShellProps, initial_location: &str) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::new(props, initial_location))),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            applied_title: None,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let ticket = {
            let mut s = self.state.write().unwrap();
            let ticket = s.shell.mount();
            s.sync_ui();
            ticket
        };
        if let Some(ticket) = ticket {
            self.load(ticket);
        }

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % ui::SPINNER.len();
                self.last_tick = Instant::now();
            }

            self.sync_title()?;

            {
                let state = self.state.read().unwrap();
                terminal.draw(|frame| ui::render(frame, &state, self.spinner_index))?;
            }

            let state = Arc::clone(&self.state);
            match self.event_handler.handle_events(state)? {
                Some(Command::Load(ticket)) => self.load(ticket),
                Some(Command::Execute(request)) => self.execute(request),
                None => {}
            }
        }

        Ok(())
    }

    /// Mirror the document title into the terminal window title
    fn sync_title(&mut self) -> Result<()> {
        let title = self.state.read().unwrap().shell.view().title.clone();
        if title == self.applied_title {
            return Ok(());
        }

        execute!(stdout(), SetTitle(title.as_deref().unwrap_or(DEFAULT_TITLE)))?;
        debug!(title = ?title, "window title updated");
        self.applied_title = title;
        Ok(())
    }

    fn load(&self, ticket: LoadTicket) {
        swagger::load_spec_background(Arc::clone(&self.state), ticket);
    }

    fn execute(&self, request: ExecutionRequest) {
        request::execute_request_background(Arc::clone(&self.state), request);
    }
}
