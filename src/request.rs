use url::Url;

use crate::state::AppState;
use crate::types::{ApiEndpoint, ApiResponse, RequestConfig};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Everything needed to send one "try it out" request
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Form the request was built from; the response is dropped if it changed
    pub form_key: String,
    pub endpoint: ApiEndpoint,
    pub config: RequestConfig,
    pub base_url: String,
}

/// Executes the request on a background task and stores the response
pub fn execute_request_background(
    state: Arc<RwLock<AppState>>,
    request: ExecutionRequest,
) -> JoinHandle<()> {
    if let Ok(mut s) = state.write() {
        s.request.executing = true;
        s.request.response = None;
    }

    tokio::spawn(async move {
        let response = match build_url_with_params(
            &request.base_url,
            &request.endpoint.path,
            &request.config.path_params_map(),
            &request.config.query_params_map(),
        ) {
            Ok(url) => execute_request(&url, &request.endpoint, &request.config).await,
            Err(e) => ApiResponse::error(format!("Failed to build URL: {e}")),
        };

        if let Ok(mut s) = state.write() {
            if s.request.form_key.as_deref() != Some(request.form_key.as_str()) {
                debug!(form = %request.form_key, "dropping response for a closed form");
                return;
            }
            s.request.executing = false;
            s.request.response = Some(response);
            s.ui.scroll = 0;
        }
    })
}

async fn execute_request(url: &str, endpoint: &ApiEndpoint, config: &RequestConfig) -> ApiResponse {
    let method = reqwest::Method::from_bytes(endpoint.display_method().as_bytes())
        .unwrap_or(reqwest::Method::GET);
    info!(%method, %url, "executing request");

    let client = reqwest::Client::new();
    let mut request_builder = client.request(method, url);

    for (name, value) in config.headers() {
        request_builder = request_builder.header(name, value);
    }

    if endpoint.supports_body() && !config.body.trim().is_empty() {
        request_builder = request_builder
            .header("Content-Type", "application/json")
            .body(config.body.clone());
    }

    let start = Instant::now();

    match request_builder.send().await {
        Ok(response) => {
            let duration = start.elapsed();

            let status = response.status().as_u16();
            let status_text = response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();

            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str().to_lowercase(),
                        value.to_str().unwrap_or("").to_string(),
                    )
                })
                .collect();

            match response.text().await {
                Ok(body) => {
                    debug!(status, elapsed_ms = duration.as_millis() as u64, "response received");
                    ApiResponse {
                        status,
                        status_text,
                        headers,
                        body,
                        duration,
                        is_error: false,
                        error_message: None,
                    }
                }
                Err(e) => ApiResponse {
                    duration,
                    ..ApiResponse::error(format!("Failed to read response body: {e}"))
                },
            }
        }
        Err(e) => ApiResponse {
            duration: start.elapsed(),
            ..ApiResponse::error(format!("Request failed: {e}"))
        },
    }
}

/// Build a full URL with path and query parameters
pub(crate) fn build_url_with_params(
    base_url: &str,
    path_template: &str,
    path_params: &HashMap<String, String>,
    query_params: &HashMap<String, String>,
) -> Result<String, String> {
    let mut path = path_template.to_string();

    for (key, value) in path_params {
        let placeholder = format!("{{{key}}}");
        if path.contains(&placeholder) {
            path = path.replace(&placeholder, value);
        }
    }

    let full_path = format!("{}{}", base_url.trim_end_matches('/'), path);

    let mut url = Url::parse(&full_path).map_err(|e| format!("Invalid URL: {e}"))?;

    // Only non-empty query values are sent, in name order
    let mut query: Vec<(&String, &String)> =
        query_params.iter().filter(|(_, v)| !v.is_empty()).collect();
    query.sort();
    for (key, value) in query {
        url.query_pairs_mut().append_pair(key, value);
    }

    Ok(url.to_string())
}
