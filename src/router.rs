//! Route table
//!
//! Maps the current location plus a few facts about the shell state to
//! either a screen to render or a redirect target. Resolution is pure; the
//! shell applies redirects to its history.

use crate::location::Location;

/// What the shell shows for a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    /// `/` with a fixed URL but nothing loaded
    Blank,
    Endpoints,
    Chooser,
    Endpoint {
        path: Option<String>,
    },
    Execute {
        method_name: Option<String>,
        path: Option<String>,
        sub_path: Option<String>,
    },
}

impl Screen {
    /// Detail screens start scrolled to the top whenever their location changes
    pub fn scrolls_to_top(&self) -> bool {
        matches!(self, Screen::Endpoint { .. } | Screen::Execute { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Screen),
    /// Replace the current entry with this target and resolve again
    Redirect(String),
}

/// Shell facts the route table depends on
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub loading: bool,
    pub has_data: bool,
    pub fixed_url: bool,
    pub context_search: &'a str,
}

pub fn resolve(location: &Location, ctx: &RouteContext) -> Resolution {
    if ctx.loading {
        return Resolution::Render(Screen::Loading);
    }

    let pathname = location.pathname.as_str();

    if pathname == "/" {
        if !ctx.has_data && !ctx.fixed_url {
            return Resolution::Redirect("/choose".to_string());
        }
        if ctx.has_data {
            return Resolution::Render(Screen::Endpoints);
        }
        return Resolution::Render(Screen::Blank);
    }

    if matches_prefix(pathname, "/choose") {
        if ctx.has_data {
            return Resolution::Redirect("/".to_string());
        }
        return Resolution::Render(Screen::Chooser);
    }

    if matches_prefix(pathname, "/endpoint") {
        if !ctx.has_data {
            return Resolution::Redirect(format!("/{}", ctx.context_search));
        }
        let query = location.query();
        return Resolution::Render(Screen::Endpoint {
            path: query.get("path").map(str::to_string),
        });
    }

    if matches_prefix(pathname, "/execute") {
        if !ctx.has_data {
            return Resolution::Redirect(format!("/{}", ctx.context_search));
        }
        let query = location.query();
        return Resolution::Render(Screen::Execute {
            method_name: query.get("methodName").map(str::to_string),
            path: query.get("path").map(str::to_string),
            sub_path: query.get("subPath").map(str::to_string),
        });
    }

    Resolution::Redirect("/".to_string())
}

/// `/choose` matches `/choose`, `/choose/` and `/choose/x`, but not `/chooser`
fn matches_prefix(pathname: &str, route: &str) -> bool {
    match pathname.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
