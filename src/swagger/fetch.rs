use crate::error::LoadError;
use crate::shell::LoadTicket;
use crate::state::AppState;
use crate::types::SpecDocument;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Fetch a specification document and parse it as YAML (or JSON)
///
/// The HTTP status is not checked: whatever body comes back goes to the
/// parser, and an error page fails there.
pub async fn fetch_spec(url: &str) -> Result<SpecDocument, LoadError> {
    let response = reqwest::get(url).await?;
    debug!(url, status = %response.status(), "specification response");

    let text = response.text().await?;
    parse_spec(&text)
}

pub fn parse_spec(text: &str) -> Result<SpecDocument, LoadError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Spawns a background task that loads the document for `ticket`
///
/// The outcome is handed to the shell, which drops it if the ticket went
/// stale in the meantime.
pub fn load_spec_background(state: Arc<RwLock<AppState>>, ticket: LoadTicket) {
    tokio::spawn(async move {
        let result = fetch_spec(&ticket.url).await;

        if let Ok(mut s) = state.write() {
            if s.shell.finish_load(&ticket, result) {
                s.sync_ui();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellProps;

    #[test]
    fn test_parse_spec_accepts_json() {
        let doc = parse_spec(r#"{"info": {"title": "Json API"}, "paths": {"/a": {"get": {}}}}"#)
            .unwrap();
        assert_eq!(doc.title(), "Json API");
        assert_eq!(doc.paths.len(), 1);
    }

    #[test]
    fn test_parse_spec_requires_title() {
        let err = parse_spec("info:\n  version: '1.0'\npaths: {}\n").unwrap_err();
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_parse_spec_rejects_html() {
        assert!(parse_spec("<html><body>Not Found</body></html>").is_err());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        let err = fetch_spec("http://127.0.0.1:1/swagger.yaml").await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
        assert!(err.to_string().starts_with("Network error"));
    }

    #[tokio::test]
    async fn test_background_load_failure_reaches_state() {
        let state = Arc::new(RwLock::new(AppState::new(ShellProps::default(), "/")));
        let ticket = {
            let mut s = state.write().unwrap();
            s.shell.begin_load("http://127.0.0.1:1/swagger.yaml".to_string(), None)
        };

        load_spec_background(Arc::clone(&state), ticket);

        for _ in 0..100 {
            if !state.read().unwrap().shell.view().loading {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }

        let s = state.read().unwrap();
        assert!(!s.shell.view().loading);
        assert!(s.shell.view().data.is_none());
        assert!(s.shell.view().error.as_deref().is_some_and(|e| !e.is_empty()));
    }
}
