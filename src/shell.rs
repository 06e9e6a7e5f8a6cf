//! The shell: owns the loaded specification, the view state and the history
//!
//! Every mutation of the view state goes through a `Shell` method. Loading
//! is split in two halves so the network part can run on a background task:
//! `begin_load` hands out a `LoadTicket`, and `finish_load` applies the
//! outcome only if that ticket is still current.

use crate::config::{origin_of, ShellProps};
use crate::error::LoadError;
use crate::history::History;
use crate::location::context_search;
use crate::router::{self, Resolution, RouteContext, Screen};
use crate::types::SpecDocument;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Redirect chains longer than this are treated as a loop
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone)]
pub struct ViewState {
    pub loading: bool,
    pub url: Option<String>,
    pub theme: Option<String>,
    /// Origin of `url`, used to resolve relative API servers
    pub origin: Option<String>,
    /// `?url=..[&theme=..]` for the loaded document, `?` before the first load
    pub context_search: String,
    /// Display-only message of the last failed load
    pub error: Option<String>,
    pub data: Option<Arc<SpecDocument>>,
    /// Window title, set from `info.title`
    pub title: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            url: None,
            theme: None,
            origin: None,
            context_search: "?".to_string(),
            error: None,
            data: None,
            title: None,
        }
    }
}

/// Identifies one load; stale tickets are ignored by `finish_load`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub url: String,
    pub theme: Option<String>,
}

#[derive(Debug)]
pub struct Shell {
    props: ShellProps,
    view: ViewState,
    history: History,
    generation: u64,
}

impl Shell {
    pub fn new(props: ShellProps, initial_location: &str) -> Self {
        let history = History::new(props.route_prefix.as_deref(), initial_location);
        Self {
            props,
            view: ViewState::default(),
            history,
            generation: 0,
        }
    }

    pub fn props(&self) -> &ShellProps {
        &self.props
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Unload is only offered when the URL is not fixed by configuration
    pub fn can_unload(&self) -> bool {
        self.props.url.is_none()
    }

    /// Decide between auto-loading and the chooser.
    /// Returns the load to start, if any.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        let query = self.history.location().query();
        let url = self
            .props
            .url
            .clone()
            .or_else(|| query.get_non_empty("url").map(str::to_string));
        let theme = self
            .props
            .theme
            .clone()
            .or_else(|| query.get_non_empty("theme").map(str::to_string));

        match url {
            Some(url) => Some(self.begin_load(url, theme)),
            None => {
                self.unload();
                self.view.theme = theme;
                None
            }
        }
    }

    /// Reset the view for a new document and show the loading indicator
    pub fn begin_load(&mut self, url: String, theme: Option<String>) -> LoadTicket {
        self.generation += 1;
        info!(url = %url, theme = ?theme, generation = self.generation, "loading specification");

        self.view.data = None;
        self.view.error = None;
        self.view.loading = true;
        self.view.origin = origin_of(&url);
        self.view.theme = theme.clone();
        self.view.url = Some(url.clone());

        LoadTicket {
            generation: self.generation,
            url,
            theme,
        }
    }

    /// Apply the outcome of a load. Returns false if the ticket was stale.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<SpecDocument, LoadError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                url = %ticket.url,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale load"
            );
            return false;
        }

        match result {
            Ok(document) => {
                info!(title = %document.title(), paths = document.paths.len(), "specification loaded");
                self.view.title = Some(document.title().to_string());
                self.view.data = Some(Arc::new(document));
                self.view.loading = false;
                self.settle();

                if self.props.url.is_none() {
                    self.view.context_search =
                        context_search(&ticket.url, ticket.theme.as_deref());

                    let current_url = self.history.location().query().get("url").map(str::to_string);
                    let reflects_load = current_url.is_some_and(|current| current.contains(&ticket.url));
                    if !reflects_load {
                        let search = self.view.context_search.clone();
                        self.history.replace(&search);
                        self.settle();
                    }
                }
            }
            Err(e) => {
                warn!(url = %ticket.url, error = %e, "failed to load specification");
                self.view.error = Some(e.to_string());
                self.view.loading = false;
                self.settle();
            }
        }

        true
    }

    /// Drop the document and return to the chooser; cancels any load in flight
    pub fn unload(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, "unloading specification");
        self.view.data = None;
        self.view.error = None;
        self.view.loading = false;
        self.settle();
    }

    /// Push `to` onto the history and follow redirects
    pub fn navigate(&mut self, to: &str) -> Screen {
        self.history.push(to);
        self.settle()
    }

    /// Go back one entry, if possible
    pub fn back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.settle();
        }
        moved
    }

    /// Screen for the current location, without following redirects
    pub fn resolve(&self) -> Resolution {
        router::resolve(self.history.location(), &self.route_context())
    }

    /// Follow redirects (replacing history entries) until a screen renders
    pub fn settle(&mut self) -> Screen {
        for _ in 0..MAX_REDIRECTS {
            match self.resolve() {
                Resolution::Render(screen) => return screen,
                Resolution::Redirect(target) => {
                    debug!(from = %self.history.location().path_and_search(), to = %target, "redirect");
                    self.history.replace(&target);
                }
            }
        }

        warn!(location = %self.history.href(), "redirect loop");
        Screen::Blank
    }

    /// Current screen; redirects left unresolved render as blank
    pub fn screen(&self) -> Screen {
        match self.resolve() {
            Resolution::Render(screen) => screen,
            Resolution::Redirect(_) => Screen::Blank,
        }
    }

    fn route_context(&self) -> RouteContext<'_> {
        RouteContext {
            loading: self.view.loading,
            has_data: self.view.data.is_some(),
            fixed_url: self.props.url.is_some(),
            context_search: &self.view.context_search,
        }
    }
}
