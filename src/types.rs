use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Parsed Swagger 2 / OpenAPI 3 document.
///
/// Only the parts the views show are modelled; everything else is ignored
/// during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecDocument {
    pub info: Info,

    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    // Swagger 2
    pub host: Option<String>,
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,

    // OpenAPI 3
    #[serde(default)]
    pub servers: Vec<Server>,
}

impl SpecDocument {
    pub fn title(&self) -> &str {
        &self.info.title
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    pub title: String,

    /// Kept raw: YAML authors often write `version: 1.0`
    pub version: Option<serde_yaml::Value>,

    pub description: Option<String>,
}

impl Info {
    pub fn version(&self) -> Option<String> {
        self.version.as_ref().and_then(scalar_to_string)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,

    /// Parameters shared by every operation on this path
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
}

impl PathItem {
    /// Operations in document order, keyed by lowercase method name
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<serde_yaml::Value>,
    /// Status codes may be written as integers, so keys stay raw
    pub responses: Option<serde_yaml::Mapping>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiParameter {
    /// Empty for unresolved `$ref` entries
    #[serde(default)]
    pub name: String,

    #[serde(rename = "in", default)]
    pub location: String, // "query", "path", "header", "body", "formData"

    pub required: Option<bool>,

    pub schema: Option<ParameterSchema>,

    /// Swagger 2 puts the type directly on the parameter
    #[serde(rename = "type")]
    pub param_type: Option<String>,

    pub description: Option<String>,
}

impl ApiParameter {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(self.location == "path")
    }

    pub fn type_label(&self) -> Option<&str> {
        self.param_type
            .as_deref()
            .or_else(|| self.schema.as_ref().and_then(|s| s.param_type.as_deref()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub param_type: Option<String>, // "string", "integer", "boolean"

    pub format: Option<String>, // "int32", "int64", "date-time", etc.

    pub default: Option<serde_json::Value>,
}

/// One operation flattened out of the document, ready for display
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    /// Lowercase, as used in the `methodName` query parameter
    pub method: String,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub tags: Vec<String>,
    /// Path-level parameters merged with the operation's own
    pub parameters: Vec<ApiParameter>,
    pub response_codes: Vec<String>,
    pub has_request_body: bool,
}

impl ApiEndpoint {
    pub fn display_method(&self) -> String {
        self.method.to_uppercase()
    }

    /// Parameters the execute form can fill in (path, query, header)
    pub fn form_params(&self) -> Vec<&ApiParameter> {
        self.parameters
            .iter()
            .filter(|p| ParameterType::from_location(&p.location).is_some())
            .collect()
    }

    pub fn path_params(&self) -> Vec<&ApiParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == "path")
            .collect()
    }

    /// Check if this endpoint takes a request body
    pub fn supports_body(&self) -> bool {
        self.has_request_body
            || self.parameters.iter().any(|p| p.location == "body")
            || matches!(self.method.as_str(), "post" | "put" | "patch")
    }

    /// Get list of missing path parameter names
    pub fn missing_path_params(&self, config: &RequestConfig) -> Vec<String> {
        self.path_params()
            .iter()
            .filter(|param| {
                config
                    .get_param_value(&param.name)
                    .map(|v| v.is_empty())
                    .unwrap_or(true)
            })
            .map(|param| param.name.clone())
            .collect()
    }
}

/// Where a form value goes in the outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Path,
    Query,
    Header,
}

impl ParameterType {
    pub fn from_location(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
        }
    }
}

/// Represents a parameter value configured by the user
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub param_type: ParameterType,
    pub required: bool,
}

/// Values typed into the execute form
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub parameters: Vec<Parameter>,
    pub body: String,
}

impl RequestConfig {
    /// Build an empty form for `endpoint`, seeded with schema defaults
    pub fn for_endpoint(endpoint: &ApiEndpoint) -> Self {
        let parameters = endpoint
            .form_params()
            .into_iter()
            .filter_map(|p| {
                let param_type = ParameterType::from_location(&p.location)?;
                let value = p
                    .schema
                    .as_ref()
                    .and_then(|s| s.default.as_ref())
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_default();
                Some(Parameter {
                    name: p.name.clone(),
                    value,
                    param_type,
                    required: p.is_required(),
                })
            })
            .collect();

        Self {
            parameters,
            body: String::new(),
        }
    }

    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn set_param_value(&mut self, index: usize, value: String) {
        if let Some(param) = self.parameters.get_mut(index) {
            param.value = value;
        }
    }

    fn map_of(&self, param_type: ParameterType) -> HashMap<String, String> {
        self.parameters
            .iter()
            .filter(|p| p.param_type == param_type)
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }

    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.map_of(ParameterType::Path)
    }

    pub fn query_params_map(&self) -> HashMap<String, String> {
        self.map_of(ParameterType::Query)
    }

    /// Header values, skipping empty ones
    pub fn headers(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .filter(|p| p.param_type == ParameterType::Header && !p.value.is_empty())
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }
}

/// Represents an HTTP response from an API endpoint
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code (200, 404, etc.)
    pub status: u16,

    /// Human-readable status text ("OK", "Not Found", etc.)
    pub status_text: String,

    /// Response headers (keys normalized to lowercase)
    pub headers: HashMap<String, String>,

    pub body: String,

    pub duration: Duration,

    /// True for network-level failures where no HTTP response arrived
    pub is_error: bool,

    pub error_message: Option<String>,
}

impl ApiResponse {
    /// Creates an error response with the given error message
    pub fn error(error_message: String) -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: HashMap::new(),
            body: String::new(),
            duration: Duration::from_secs(0),
            is_error: true,
            error_message: Some(error_message),
        }
    }
}

/// Render a YAML scalar (string, number, bool) as text
pub fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
