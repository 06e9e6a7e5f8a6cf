//! Locations and query strings
//!
//! A `Location` is the shell's equivalent of a browser address: a pathname
//! plus a search string (`?key=value&...`). Query strings are encoded as
//! `application/x-www-form-urlencoded`.

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Either empty or starting with `?`
    pub search: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
        }
    }
}

impl Location {
    /// Parse an address such as `/endpoint?path=%2Fpets`. Fragments are dropped.
    pub fn parse(address: &str) -> Self {
        let address = address.split('#').next().unwrap_or_default();
        let (path, search) = match address.find('?') {
            Some(idx) => address.split_at(idx),
            None => (address, ""),
        };

        let pathname = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let search = if search == "?" {
            String::new()
        } else {
            search.to_string()
        };

        Self { pathname, search }
    }

    /// Pathname followed by search, without any basename
    pub fn path_and_search(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    pub fn query(&self) -> Query {
        Query::parse(&self.search)
    }
}

/// Decoded query string, keeping key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes()).into_owned().collect(),
        }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value for `key`
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Set `key` to `value`, replacing any existing values
    pub fn set(&mut self, key: &str, value: &str) {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode back into a search string (`""` when there are no pairs)
    pub fn to_search(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        format!("?{}", serializer.finish())
    }
}

/// Build the shareable search string for a loaded specification
///
/// Example: `("http://x/api.yaml", Some("hpe"))` -> `?url=http%3A%2F%2Fx%2Fapi.yaml&theme=hpe`
pub fn context_search(url: &str, theme: Option<&str>) -> String {
    let mut query = Query::default();
    query.set("url", url);
    if let Some(theme) = theme.filter(|t| !t.is_empty()) {
        query.set("theme", theme);
    }
    query.to_search()
}

/// Build a link to `pathname` that carries the context search plus `extra` pairs
pub fn link(pathname: &str, context_search: &str, extra: &[(&str, &str)]) -> String {
    let mut query = Query::parse(context_search);
    for (key, value) in extra {
        query.set(key, value);
    }
    format!("{pathname}{}", query.to_search())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_with_search() {
        let location = Location::parse("/endpoint?path=%2Fpets");
        assert_eq!(location.pathname, "/endpoint");
        assert_eq!(location.search, "?path=%2Fpets");
        assert_eq!(location.query().get("path"), Some("/pets"));
    }

    #[test]
    fn test_parse_location_defaults_to_root() {
        assert_eq!(Location::parse(""), Location::default());
        assert_eq!(Location::parse("?url=x").pathname, "/");
        assert_eq!(Location::parse("choose").pathname, "/choose");
    }

    #[test]
    fn test_parse_location_bare_question_mark() {
        let location = Location::parse("/?");
        assert_eq!(location.search, "");
        assert_eq!(location.path_and_search(), "/");
    }

    #[test]
    fn test_parse_location_drops_fragment() {
        let location = Location::parse("/execute?methodName=get#top");
        assert_eq!(location.search, "?methodName=get");
    }

    #[test]
    fn test_context_search_round_trips_url_and_theme() {
        let url = "https://petstore.example.com/v2/swagger.yaml?version=2&x=a b";
        let search = context_search(url, Some("hpe"));
        let query = Query::parse(&search);
        assert_eq!(query.get("url"), Some(url));
        assert_eq!(query.get("theme"), Some("hpe"));
    }

    #[test]
    fn test_context_search_without_theme() {
        let search = context_search("http://localhost/api.json", None);
        assert_eq!(search, "?url=http%3A%2F%2Flocalhost%2Fapi.json");
        assert_eq!(Query::parse(&search).get("theme"), None);
    }

    #[test]
    fn test_context_search_ignores_empty_theme() {
        let search = context_search("http://localhost/api.json", Some(""));
        assert!(!search.contains("theme"));
    }

    #[test]
    fn test_link_with_bare_context_search() {
        assert_eq!(link("/endpoint", "?", &[("path", "/pets")]), "/endpoint?path=%2Fpets");
    }

    #[test]
    fn test_link_carries_context() {
        let context = context_search("http://h/s.yaml", None);
        let href = link("/execute", &context, &[("methodName", "get"), ("path", "/pets")]);
        let query = Location::parse(&href).query();
        assert_eq!(query.get("url"), Some("http://h/s.yaml"));
        assert_eq!(query.get("methodName"), Some("get"));
        assert_eq!(query.get("path"), Some("/pets"));
    }

    #[test]
    fn test_query_set_replaces() {
        let mut query = Query::parse("?a=1&b=2&a=3");
        query.set("a", "9");
        assert_eq!(query.to_search(), "?b=2&a=9");
    }

    #[test]
    fn test_get_non_empty() {
        let query = Query::parse("?url=&theme=hpe");
        assert_eq!(query.get("url"), Some(""));
        assert_eq!(query.get_non_empty("url"), None);
        assert_eq!(query.get_non_empty("theme"), Some("hpe"));
    }
}
