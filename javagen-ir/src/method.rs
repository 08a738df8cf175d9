//! Proxy methods and client methods.

use serde::Serialize;

use crate::{ClassType, IType};

/// Where a proxy parameter goes in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestParameterLocation {
    Host,
    Path,
    Query,
    Header,
    Body,
}

impl RequestParameterLocation {
    /// Annotation name on proxy method parameters, e.g. `PathParam`.
    pub fn annotation(&self) -> &'static str {
        match self {
            RequestParameterLocation::Host => "HostParam",
            RequestParameterLocation::Path => "PathParam",
            RequestParameterLocation::Query => "QueryParam",
            RequestParameterLocation::Header => "HeaderParam",
            RequestParameterLocation::Body => "BodyParam",
        }
    }
}

/// A parameter of a proxy interface method.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyMethodParameter {
    pub name: String,
    pub serialized_name: String,
    pub location: RequestParameterLocation,
    pub client_type: IType,
    pub wire_type: IType,
    pub required: bool,
    /// Fixed value, assigned to a local in the client method.
    pub constant_value: Option<String>,
    /// Read from the service client instead of the method arguments.
    pub from_client: bool,
    /// Expression producing the value when `from_client` is set.
    pub client_accessor: Option<String>,
    pub content_type: Option<String>,
    /// Parts of a `multipart/form-data` body serialized from the model argument.
    pub multipart: Option<Vec<MultipartPart>>,
    pub explode: bool,
    /// Skip URL encoding, used for next links.
    pub encoded: bool,
    pub description: String,
}

/// How a model property is written as a `multipart/form-data` part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MultipartPartKind {
    /// `text/plain`, the value's string form.
    Text,
    /// `application/json`.
    Json,
    /// Raw bytes, `application/octet-stream`.
    File,
}

/// One part of a `multipart/form-data` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipartPart {
    pub serialized_name: String,
    /// Getter on the body model reading the part's value.
    pub getter: String,
    pub client_type: IType,
    pub kind: MultipartPartKind,
}

/// An exception thrown for specific status codes.
#[derive(Debug, Clone, Serialize)]
pub struct UnexpectedException {
    pub exception: ClassType,
    pub status_codes: Vec<u16>,
    /// Class the error body is read into.
    pub body: Option<ClassType>,
}

/// A method of the proxy interface describing one HTTP request.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyMethod {
    pub name: String,
    pub operation_name: String,
    pub http_method: String,
    pub path: String,
    pub expected_status_codes: Vec<u16>,
    pub parameters: Vec<ProxyMethodParameter>,
    /// Type of the response body; `void` when there is none.
    pub response_body_type: IType,
    /// The declared return type, e.g. `Response<Pet>`.
    pub return_type: IType,
    pub unexpected_exceptions: Vec<UnexpectedException>,
    pub default_exception: Option<ClassType>,
    /// Class of the error body, when the service declares one.
    pub exception_body: Option<ClassType>,
    pub request_content_type: Option<String>,
    pub is_paging_next: bool,
    pub description: String,
}

impl ProxyMethod {
    pub fn body_parameter(&self) -> Option<&ProxyMethodParameter> {
        self.parameters
            .iter()
            .find(|p| p.location == RequestParameterLocation::Body)
    }

    /// Parameters the client method must pass itself.
    pub fn method_parameters(&self) -> impl Iterator<Item = &ProxyMethodParameter> {
        self.parameters
            .iter()
            .filter(|p| !p.from_client && p.constant_value.is_none())
    }
}

/// Shape of a generated client method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientMethodType {
    /// Convenience method returning the body.
    SimpleSync,
    /// Method returning `Response<T>`.
    SimpleSyncRestResponse,
    /// Method returning `PagedIterable<T>`.
    PagingSync,
    /// Method returning a single `PagedResponse<T>`.
    PagingSyncSinglePage,
    /// Method returning a `SyncPoller`.
    LongRunningBeginSync,
    /// Raw request sender on the service client.
    SendRequest,
}

impl ClientMethodType {
    pub fn is_paging(&self) -> bool {
        matches!(
            self,
            ClientMethodType::PagingSync | ClientMethodType::PagingSyncSinglePage
        )
    }

    /// Value of `ReturnType` in `@ServiceMethod`.
    pub fn return_type_annotation(&self) -> &'static str {
        match self {
            ClientMethodType::PagingSync => "COLLECTION",
            ClientMethodType::LongRunningBeginSync => "LONG_RUNNING_OPERATION",
            _ => "SINGLE",
        }
    }
}

/// A parameter of a client method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMethodParameter {
    pub name: String,
    pub client_type: IType,
    pub required: bool,
    pub description: String,
    /// Set on a request body sent as `application/merge-patch+json`.
    pub merge_patch: Option<MergePatchAccessor>,
}

/// The `JsonMergePatchHelper` accessor switching a model into merge-patch
/// serialization, e.g. `getPetPatchAccessor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergePatchAccessor {
    pub helper: ClassType,
    pub getter: String,
}

/// How a paging method walks the pages.
#[derive(Debug, Clone, Serialize)]
pub struct PagingDetails {
    /// Getter of the page items on the page model.
    pub item_getter: String,
    /// Getter of the next link, when the service returns one.
    pub next_link_getter: Option<String>,
    pub item_type: IType,
    pub page_model: ClassType,
    /// Client method fetching one page from a next link or continuation.
    pub next_method_name: Option<String>,
    pub continuation_token: Option<ContinuationTokenDetails>,
    pub max_page_size: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContinuationTokenDetails {
    /// Request parameter carrying the token.
    pub parameter: String,
    pub response_header: Option<String>,
    pub response_getter: Option<String>,
}

/// Polling details of a long-running operation.
#[derive(Debug, Clone, Serialize)]
pub struct PollingDetails {
    pub poll_result_type: IType,
    pub final_result_type: IType,
    pub poll_interval_seconds: u32,
}

/// A method of a generated client class.
#[derive(Debug, Clone, Serialize)]
pub struct ClientMethod {
    pub name: String,
    pub kind: ClientMethodType,
    pub proxy_method_name: String,
    pub parameters: Vec<ClientMethodParameter>,
    pub return_type: IType,
    pub description: String,
    pub paging: Option<PagingDetails>,
    pub polling: Option<PollingDetails>,
    /// Required parameters that may still be `null`.
    pub required_nullable_params: Vec<String>,
    /// Java statements validating the arguments.
    pub validations: Vec<String>,
    pub api_versions: Vec<String>,
    pub deprecated: bool,
    /// Not part of the public client surface.
    pub internal: bool,
}

impl ClientMethod {
    pub fn is_convenience(&self) -> bool {
        self.kind == ClientMethodType::SimpleSync || self.kind == ClientMethodType::PagingSync
    }
}
