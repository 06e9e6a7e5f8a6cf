//! In-memory navigation history
//!
//! Behaves like a browser history scoped under a basename (route prefix):
//! `push` adds an entry and drops any forward entries, `replace` swaps the
//! current entry in place, `back` moves one entry back.

use crate::location::Location;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct History {
    basename: String,
    entries: Vec<Location>,
    index: usize,
}

impl History {
    /// Create a history whose first entry is `initial`.
    /// A leading `basename` on `initial` is stripped.
    pub fn new(basename: Option<&str>, initial: &str) -> Self {
        let basename = normalize_basename(basename.unwrap_or_default());
        let stripped = strip_basename(&basename, initial);
        Self {
            entries: vec![Location::parse(stripped)],
            basename,
            index: 0,
        }
    }

    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Full address of the current entry, including the basename
    pub fn href(&self) -> String {
        format!("{}{}", self.basename, self.location().path_and_search())
    }

    pub fn push(&mut self, to: &str) {
        let location = self.resolve(to);
        debug!(to = %location.path_and_search(), "history push");
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index += 1;
        debug!(depth = self.depth(), "history depth");
    }

    pub fn replace(&mut self, to: &str) {
        let location = self.resolve(to);
        debug!(to = %location.path_and_search(), "history replace");
        self.entries[self.index] = location;
    }

    /// Returns false when already at the first entry
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        debug!(to = %self.location().path_and_search(), "history back");
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// A target that is only a search string keeps the current pathname
    fn resolve(&self, to: &str) -> Location {
        if to.starts_with('?') {
            Location::parse(&format!("{}{}", self.location().pathname, to))
        } else {
            Location::parse(to)
        }
    }
}

fn normalize_basename(basename: &str) -> String {
    let trimmed = basename.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn strip_basename<'a>(basename: &str, address: &'a str) -> &'a str {
    if basename.is_empty() {
        return address;
    }
    match address.strip_prefix(basename) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => rest,
        _ => address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_location_without_basename() {
        let history = History::new(None, "/endpoint?path=%2Fpets");
        assert_eq!(history.location().pathname, "/endpoint");
        assert_eq!(history.href(), "/endpoint?path=%2Fpets");
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn test_basename_is_stripped_and_shown_in_href() {
        let history = History::new(Some("docs/"), "/docs/choose");
        assert_eq!(history.location().pathname, "/choose");
        assert_eq!(history.href(), "/docs/choose");
    }

    #[test]
    fn test_basename_only_matches_whole_segment() {
        let history = History::new(Some("/docs"), "/docsearch");
        assert_eq!(history.location().pathname, "/docsearch");
    }

    #[test]
    fn test_basename_with_search_only() {
        let history = History::new(Some("/docs"), "/docs?url=x");
        assert_eq!(history.location().pathname, "/");
        assert_eq!(history.location().query().get("url"), Some("x"));
    }

    #[test]
    fn test_push_and_back() {
        let mut history = History::new(None, "/");
        history.push("/endpoint?path=%2Fa");
        history.push("/execute?path=%2Fa");
        assert_eq!(history.depth(), 3);
        assert!(history.back());
        assert_eq!(history.location().pathname, "/endpoint");
        assert!(history.back());
        assert!(!history.back());
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let mut history = History::new(None, "/");
        history.push("/a");
        history.push("/b");
        history.back();
        history.push("/c");
        assert_eq!(history.depth(), 3);
        assert_eq!(history.location().pathname, "/c");
    }

    #[test]
    fn test_replace_does_not_grow() {
        let mut history = History::new(None, "/choose");
        history.replace("/");
        assert_eq!(history.depth(), 1);
        assert_eq!(history.location().pathname, "/");
    }

    #[test]
    fn test_replace_search_only_keeps_pathname() {
        let mut history = History::new(None, "/endpoint?path=%2Fpets");
        history.replace("?url=http%3A%2F%2Fh%2Fs.yaml");
        assert_eq!(history.location().pathname, "/endpoint");
        assert_eq!(history.location().query().get("url"), Some("http://h/s.yaml"));
        assert_eq!(history.location().query().get("path"), None);
    }
}
