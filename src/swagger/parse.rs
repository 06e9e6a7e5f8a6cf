use crate::types::{scalar_to_string, ApiEndpoint, ApiParameter, Operation, SpecDocument};
use std::collections::BTreeMap;

/// Endpoints listed together under their leading path segment
#[derive(Debug, Clone)]
pub struct PathGroup {
    /// e.g. `/pets` for `/pets` and `/pets/{petId}`
    pub name: String,
    pub endpoints: Vec<ApiEndpoint>,
}

impl PathGroup {
    /// Distinct methods in this group, uppercase, in first-seen order
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = Vec::new();
        for endpoint in &self.endpoints {
            let method = endpoint.display_method();
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        methods
    }

    /// Case-insensitive match on path, summary or tag
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if query.is_empty() || self.name.to_lowercase().contains(&query) {
            return true;
        }
        self.endpoints.iter().any(|e| {
            e.path.to_lowercase().contains(&query)
                || e.summary
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&query))
                || e.tags.iter().any(|t| t.to_lowercase().contains(&query))
        })
    }
}

/// Flatten every operation of the document, in path then method order
pub fn parse_endpoints(spec: &SpecDocument) -> Vec<ApiEndpoint> {
    let mut endpoints: Vec<ApiEndpoint> = Vec::new();

    for (path, path_item) in &spec.paths {
        for (method, op) in path_item.operations() {
            endpoints.push(build_endpoint(method, path, op, &path_item.parameters));
        }
    }

    endpoints
}

fn build_endpoint(
    method: &str,
    path: &str,
    op: &Operation,
    shared: &[ApiParameter],
) -> ApiEndpoint {
    // Operation parameters override path-level ones with the same name and location
    let mut parameters: Vec<ApiParameter> = shared
        .iter()
        .filter(|p| {
            !op.parameters
                .iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .cloned()
        .collect();
    parameters.extend(op.parameters.iter().cloned());
    parameters.retain(|p| !p.name.is_empty());

    let response_codes = op
        .responses
        .as_ref()
        .map(|responses| {
            responses
                .iter()
                .filter_map(|(code, _)| scalar_to_string(code))
                .collect()
        })
        .unwrap_or_default();

    ApiEndpoint {
        method: method.to_string(),
        path: path.to_string(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        operation_id: op.operation_id.clone(),
        tags: op.tags.clone(),
        parameters,
        response_codes,
        has_request_body: op.request_body.is_some(),
    }
}

/// Leading path segment: `/pets/{petId}/photos` -> `/pets`
pub fn group_name(path: &str) -> String {
    match path.trim_start_matches('/').split('/').next() {
        Some(first) if !first.is_empty() => format!("/{first}"),
        _ => "/".to_string(),
    }
}

/// Group endpoints by leading path segment, sorted by group name
pub fn path_groups(spec: &SpecDocument) -> Vec<PathGroup> {
    let mut grouped: BTreeMap<String, Vec<ApiEndpoint>> = BTreeMap::new();
    for endpoint in parse_endpoints(spec) {
        grouped
            .entry(group_name(&endpoint.path))
            .or_default()
            .push(endpoint);
    }

    grouped
        .into_iter()
        .map(|(name, endpoints)| PathGroup { name, endpoints })
        .collect()
}

/// Every endpoint at `path` or below it
pub fn endpoints_under(spec: &SpecDocument, path: &str) -> Vec<ApiEndpoint> {
    let prefix = format!("{}/", path.trim_end_matches('/'));
    parse_endpoints(spec)
        .into_iter()
        .filter(|e| e.path == path || (path != "/" && e.path.starts_with(&prefix)))
        .collect()
}

/// Look up a single operation by method name (any case) and exact spec path
pub fn find_endpoint(spec: &SpecDocument, method: &str, path: &str) -> Option<ApiEndpoint> {
    let method = method.to_lowercase();
    let path_item = spec.paths.get(path)?;
    path_item
        .operations()
        .into_iter()
        .find(|(m, _)| *m == method)
        .map(|(m, op)| build_endpoint(m, path, op, &path_item.parameters))
}

/// Base URL requests are sent to
///
/// OpenAPI 3 uses the first server; Swagger 2 uses `scheme://host + basePath`.
/// Relative values are resolved against `origin`, the origin the document
/// itself was loaded from.
pub fn api_base_url(spec: &SpecDocument, origin: Option<&str>) -> Option<String> {
    if let Some(server) = spec.servers.first() {
        return resolve_against_origin(&server.url, origin);
    }

    let base_path = spec.base_path.as_deref().unwrap_or("");
    match &spec.host {
        Some(host) => {
            let scheme = spec
                .schemes
                .first()
                .cloned()
                .or_else(|| origin.and_then(|o| o.split("://").next().map(str::to_string)))
                .unwrap_or_else(|| "https".to_string());
            Some(format!("{scheme}://{host}{base_path}"))
        }
        None => origin.map(|o| format!("{}{base_path}", o.trim_end_matches('/'))),
    }
}

fn resolve_against_origin(server_url: &str, origin: Option<&str>) -> Option<String> {
    if url::Url::parse(server_url).is_ok() {
        return Some(server_url.to_string());
    }
    let origin = origin?;
    let path = server_url.trim_start_matches('/');
    Some(format!("{}/{}", origin.trim_end_matches('/'), path))
}
