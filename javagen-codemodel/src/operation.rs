//! Operations, parameters and responses.

use std::fmt;

use serde::Deserialize;

use crate::TypeExpr;

/// A named group of operations. An empty name marks the ungrouped operations
/// that live directly on the service client.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl OperationGroup {
    pub fn is_ungrouped(&self) -> bool {
        self.name.is_empty()
    }

    /// The `Operations` group listing the service's REST operations. It may
    /// repeat an operation; management generation drops the repeats.
    pub fn is_operations_listing(&self) -> bool {
        self.name.eq_ignore_ascii_case("Operations")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub request: HttpRequest,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub exceptions: Vec<Response>,
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub long_running: Option<LongRunning>,
    #[serde(default)]
    pub api_versions: Vec<String>,
    #[serde(default = "default_true")]
    pub convenience_api: bool,
    #[serde(default)]
    pub internal_api: bool,
    #[serde(default)]
    pub deprecated: bool,
}

fn default_true() -> bool {
    true
}

impl Operation {
    /// Responses with a 2xx status code.
    pub fn success_responses(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter().filter(|r| r.is_success())
    }

    /// The first success response carrying a body.
    pub fn success_schema(&self) -> Option<&TypeExpr> {
        self.success_responses().find_map(|r| r.schema.as_ref())
    }

    pub fn body_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
    }

    /// Whether the request body is sent as `media_type`. Parameters such as
    /// `charset` are ignored.
    pub fn sends_media_type(&self, media_type: &str) -> bool {
        let matches = |candidate: &str| {
            candidate
                .split(';')
                .next()
                .is_some_and(|m| m.trim().eq_ignore_ascii_case(media_type))
        };
        self.request.media_types.iter().any(|m| matches(m))
            || self
                .body_parameter()
                .and_then(|p| p.content_type.as_deref())
                .is_some_and(matches)
    }

    /// Every type expression referenced by the operation.
    pub fn type_references(&self) -> Vec<&TypeExpr> {
        let mut refs: Vec<&TypeExpr> = self.parameters.iter().map(|p| &p.schema).collect();
        for response in self.responses.iter().chain(&self.exceptions) {
            refs.extend(response.schema.iter());
            refs.extend(response.headers.iter().map(|h| &h.schema));
        }
        if let Some(lro) = &self.long_running {
            refs.extend(lro.poll_result_type.iter());
            refs.extend(lro.final_result_type.iter());
        }
        refs
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub media_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case method name (`GET`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    Host,
    Uri,
}

/// Where a parameter's value comes from in the generated client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    /// Passed to each client method.
    #[default]
    Method,
    /// Held by the service client.
    Client,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub serialized_name: Option<String>,
    pub location: ParameterLocation,
    pub schema: TypeExpr,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client_default_value: Option<String>,
    #[serde(default)]
    pub implementation: Implementation,
    #[serde(default)]
    pub explode: bool,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Parameter {
    pub fn serialized_name(&self) -> &str {
        self.serialized_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_api_version(&self) -> bool {
        self.serialized_name() == "api-version"
    }
}

/// HTTP status code of a response, or the catch-all `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "RawStatusCode")]
pub enum StatusCode {
    Code(u16),
    Default,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatusCode {
    Int(u16),
    Text(String),
}

impl TryFrom<RawStatusCode> for StatusCode {
    type Error = String;

    fn try_from(raw: RawStatusCode) -> Result<Self, Self::Error> {
        match raw {
            RawStatusCode::Int(code) => Ok(StatusCode::Code(code)),
            RawStatusCode::Text(text) if text == "default" => Ok(StatusCode::Default),
            RawStatusCode::Text(text) => text
                .parse::<u16>()
                .map(StatusCode::Code)
                .map_err(|_| format!("invalid status code '{text}'")),
        }
    }
}

impl StatusCode {
    pub fn code(&self) -> Option<u16> {
        match self {
            StatusCode::Code(code) => Some(*code),
            StatusCode::Default => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Response {
    pub status_codes: Vec<StatusCode>,
    #[serde(default)]
    pub schema: Option<TypeExpr>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub binary: bool,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status_codes
            .iter()
            .any(|s| matches!(s.code(), Some(200..=299)))
    }

    pub fn is_default(&self) -> bool {
        self.status_codes.contains(&StatusCode::Default)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    pub name: String,
    pub schema: TypeExpr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Paging {
    #[serde(default = "default_item_name")]
    pub item_name: String,
    #[serde(default)]
    pub next_link_name: Option<String>,
    /// Name of the operation fetching the next page, if it differs from `{name}Next`.
    #[serde(default)]
    pub next_operation: Option<String>,
    #[serde(default)]
    pub continuation_token: Option<ContinuationToken>,
    #[serde(default)]
    pub max_page_size: Option<String>,
}

fn default_item_name() -> String {
    "value".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContinuationToken {
    pub parameter: String,
    #[serde(default)]
    pub response_header: Option<String>,
    #[serde(default)]
    pub response_property: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LongRunning {
    #[serde(default)]
    pub poll_result_type: Option<TypeExpr>,
    #[serde(default)]
    pub final_result_type: Option<TypeExpr>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u32,
}

fn default_poll_interval() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_from_int_and_text() {
        let codes: Vec<StatusCode> = serde_json::from_str(r#"[200, "204", "default"]"#).unwrap();
        assert_eq!(
            codes,
            vec![
                StatusCode::Code(200),
                StatusCode::Code(204),
                StatusCode::Default
            ]
        );
        assert!(serde_json::from_str::<StatusCode>(r#""two hundred""#).is_err());
    }

    #[test]
    fn test_response_success() {
        let response: Response = serde_json::from_str(r#"{"status-codes": [201]}"#).unwrap();
        assert!(response.is_success());
        assert!(!response.is_default());
    }

    #[test]
    fn test_operation_defaults() {
        let op: Operation = serde_json::from_str(
            r#"{"name": "get", "request": {"method": "get", "path": "/pets/{id}"}}"#,
        )
        .unwrap();
        assert!(op.convenience_api);
        assert!(!op.internal_api);
        assert_eq!(op.request.method.as_str(), "GET");
    }

    #[test]
    fn test_sends_media_type() {
        let op: Operation = serde_json::from_str(
            r#"{
                "name": "upload",
                "request": {"method": "post", "path": "/files", "media-types": ["multipart/form-data; boundary=x"]},
                "parameters": [{"name": "body", "location": "body", "schema": "File"}]
            }"#,
        )
        .unwrap();
        assert!(op.sends_media_type("multipart/form-data"));
        assert!(!op.sends_media_type("application/json"));

        let op: Operation = serde_json::from_str(
            r#"{
                "name": "patch",
                "request": {"method": "patch", "path": "/pets"},
                "parameters": [{"name": "body", "location": "body", "schema": "Pet", "content-type": "application/merge-patch+json"}]
            }"#,
        )
        .unwrap();
        assert!(op.sends_media_type("Application/Merge-Patch+JSON"));
    }

    #[test]
    fn test_paging_defaults_item_name() {
        let paging: Paging = serde_json::from_str("{}").unwrap();
        assert_eq!(paging.item_name, "value");
        assert!(paging.next_link_name.is_none());
    }
}
