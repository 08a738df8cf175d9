//! Classes of the client runtime the generated code calls into.
//!
//! Generated libraries target either azure-core or clientcore. Both expose
//! the same concepts under different packages (and sometimes different
//! names); [`Runtime`] resolves a [`RuntimeClass`] to the concrete Java
//! class for the configured flavor.

use javagen_codemodel::Flavor;
use javagen_ir::{ClassType, IType};

/// A runtime concept the generator emits references to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeClass {
    // Data types
    BinaryData,
    Base64Url,
    DateTimeRfc1123,
    ExpandableStringEnum,
    ExpandableEnum,
    ServiceVersion,
    TypeReference,
    CoreUtils,
    // HTTP
    Response,
    HttpResponseException,
    RequestOptions,
    RequestContext,
    Context,
    HttpMethod,
    HttpHeaderName,
    HttpRequest,
    PagedIterable,
    PagedResponse,
    PagedResponseBase,
    RestProxy,
    HttpPipeline,
    HttpPipelineBuilder,
    HttpPipelinePolicy,
    HttpClient,
    RetryPolicy,
    RedirectPolicy,
    UserAgentPolicy,
    Configuration,
    ClientLogger,
    // Credentials
    KeyCredential,
    KeyCredentialPolicy,
    TokenCredential,
    BearerTokenPolicy,
    // Long-running operations
    SyncPoller,
    PollingStrategyOptions,
    SyncDefaultPollingStrategy,
    // JSON
    JsonSerializable,
    JsonReader,
    JsonWriter,
    JsonToken,
    // Builder traits
    HttpTrait,
    ConfigurationTrait,
    EndpointTrait,
    KeyCredentialTrait,
    TokenCredentialTrait,
    // Annotations
    Generated,
    Fluent,
    Immutable,
    Metadata,
    MetadataProperties,
    ServiceInterface,
    ServiceMethod,
    ReturnType,
    ServiceClient,
    ServiceClientBuilder,
    Host,
    HostParam,
    PathParam,
    QueryParam,
    HeaderParam,
    BodyParam,
    ExpectedResponses,
    UnexpectedResponseExceptionType,
    UnexpectedResponseExceptionDetail,
    HttpRequestInformation,
    Get,
    Put,
    Post,
    Patch,
    Delete,
    Head,
    Options,
    // Azure exceptions
    ClientAuthenticationException,
    ResourceNotFoundException,
    ResourceModifiedException,
    // Resource management
    ManagementException,
    ManagementError,
    Resource,
    ProxyResource,
    AzureProfile,
}

const AZ_ANNOTATION: &str = "com.azure.core.annotation";
const AZ_UTIL: &str = "com.azure.core.util";
const AZ_REST: &str = "com.azure.core.http.rest";
const AZ_HTTP: &str = "com.azure.core.http";
const AZ_POLICY: &str = "com.azure.core.http.policy";
const AZ_EXCEPTION: &str = "com.azure.core.exception";
const AZ_CREDENTIAL: &str = "com.azure.core.credential";
const AZ_POLLING: &str = "com.azure.core.util.polling";
const AZ_TRAITS: &str = "com.azure.core.client.traits";
const AZ_JSON: &str = "com.azure.json";
const AZ_MANAGEMENT: &str = "com.azure.core.management";

const CC_ANNOTATIONS: &str = "io.clientcore.core.annotations";
const CC_HTTP_ANNOTATIONS: &str = "io.clientcore.core.http.annotations";
const CC_MODELS: &str = "io.clientcore.core.http.models";
const CC_PAGING: &str = "io.clientcore.core.http.paging";
const CC_PIPELINE: &str = "io.clientcore.core.http.pipeline";
const CC_UTILS: &str = "io.clientcore.core.utils";
const CC_JSON: &str = "io.clientcore.core.serialization.json";
const CC_TRAITS: &str = "io.clientcore.core.traits";

fn azure(class: RuntimeClass) -> (&'static str, &'static str) {
    use RuntimeClass::*;

    match class {
        BinaryData => (AZ_UTIL, "BinaryData"),
        Base64Url => (AZ_UTIL, "Base64Url"),
        DateTimeRfc1123 => (AZ_UTIL, "DateTimeRfc1123"),
        ExpandableStringEnum => (AZ_UTIL, "ExpandableStringEnum"),
        ExpandableEnum => (AZ_UTIL, "ExpandableEnum"),
        ServiceVersion => (AZ_UTIL, "ServiceVersion"),
        TypeReference => ("com.azure.core.util.serializer", "TypeReference"),
        CoreUtils => (AZ_UTIL, "CoreUtils"),
        Response => (AZ_REST, "Response"),
        HttpResponseException => (AZ_EXCEPTION, "HttpResponseException"),
        RequestOptions => (AZ_REST, "RequestOptions"),
        RequestContext | Context => (AZ_UTIL, "Context"),
        HttpMethod => (AZ_HTTP, "HttpMethod"),
        HttpHeaderName => (AZ_HTTP, "HttpHeaderName"),
        HttpRequest => (AZ_HTTP, "HttpRequest"),
        PagedIterable => (AZ_REST, "PagedIterable"),
        PagedResponse => (AZ_REST, "PagedResponse"),
        PagedResponseBase => (AZ_REST, "PagedResponseBase"),
        RestProxy => (AZ_REST, "RestProxy"),
        HttpPipeline => (AZ_HTTP, "HttpPipeline"),
        HttpPipelineBuilder => (AZ_HTTP, "HttpPipelineBuilder"),
        HttpPipelinePolicy => (AZ_POLICY, "HttpPipelinePolicy"),
        HttpClient => (AZ_HTTP, "HttpClient"),
        RetryPolicy => (AZ_POLICY, "RetryPolicy"),
        RedirectPolicy => (AZ_POLICY, "RedirectPolicy"),
        UserAgentPolicy => (AZ_POLICY, "UserAgentPolicy"),
        Configuration => (AZ_UTIL, "Configuration"),
        ClientLogger => ("com.azure.core.util.logging", "ClientLogger"),
        KeyCredential => (AZ_CREDENTIAL, "KeyCredential"),
        KeyCredentialPolicy => (AZ_POLICY, "KeyCredentialPolicy"),
        TokenCredential => (AZ_CREDENTIAL, "TokenCredential"),
        BearerTokenPolicy => (AZ_POLICY, "BearerTokenAuthenticationPolicy"),
        SyncPoller => (AZ_POLLING, "SyncPoller"),
        PollingStrategyOptions => (AZ_POLLING, "PollingStrategyOptions"),
        SyncDefaultPollingStrategy => (AZ_POLLING, "SyncDefaultPollingStrategy"),
        JsonSerializable => (AZ_JSON, "JsonSerializable"),
        JsonReader => (AZ_JSON, "JsonReader"),
        JsonWriter => (AZ_JSON, "JsonWriter"),
        JsonToken => (AZ_JSON, "JsonToken"),
        HttpTrait => (AZ_TRAITS, "HttpTrait"),
        ConfigurationTrait => (AZ_TRAITS, "ConfigurationTrait"),
        EndpointTrait => (AZ_TRAITS, "EndpointTrait"),
        KeyCredentialTrait => (AZ_TRAITS, "KeyCredentialTrait"),
        TokenCredentialTrait => (AZ_TRAITS, "TokenCredentialTrait"),
        Generated => (AZ_ANNOTATION, "Generated"),
        Fluent => (AZ_ANNOTATION, "Fluent"),
        Immutable => (AZ_ANNOTATION, "Immutable"),
        Metadata => (AZ_ANNOTATION, "Metadata"),
        MetadataProperties => (AZ_ANNOTATION, "MetadataProperties"),
        ServiceInterface => (AZ_ANNOTATION, "ServiceInterface"),
        ServiceMethod => (AZ_ANNOTATION, "ServiceMethod"),
        ReturnType => (AZ_ANNOTATION, "ReturnType"),
        ServiceClient => (AZ_ANNOTATION, "ServiceClient"),
        ServiceClientBuilder => (AZ_ANNOTATION, "ServiceClientBuilder"),
        Host => (AZ_ANNOTATION, "Host"),
        HostParam => (AZ_ANNOTATION, "HostParam"),
        PathParam => (AZ_ANNOTATION, "PathParam"),
        QueryParam => (AZ_ANNOTATION, "QueryParam"),
        HeaderParam => (AZ_ANNOTATION, "HeaderParam"),
        BodyParam => (AZ_ANNOTATION, "BodyParam"),
        ExpectedResponses => (AZ_ANNOTATION, "ExpectedResponses"),
        UnexpectedResponseExceptionType => (AZ_ANNOTATION, "UnexpectedResponseExceptionType"),
        UnexpectedResponseExceptionDetail => (AZ_ANNOTATION, "UnexpectedResponseExceptionType"),
        HttpRequestInformation => (AZ_ANNOTATION, "HttpRequestInformation"),
        Get => (AZ_ANNOTATION, "Get"),
        Put => (AZ_ANNOTATION, "Put"),
        Post => (AZ_ANNOTATION, "Post"),
        Patch => (AZ_ANNOTATION, "Patch"),
        Delete => (AZ_ANNOTATION, "Delete"),
        Head => (AZ_ANNOTATION, "Head"),
        Options => (AZ_ANNOTATION, "Options"),
        ClientAuthenticationException => (AZ_EXCEPTION, "ClientAuthenticationException"),
        ResourceNotFoundException => (AZ_EXCEPTION, "ResourceNotFoundException"),
        ResourceModifiedException => (AZ_EXCEPTION, "ResourceModifiedException"),
        ManagementException => ("com.azure.core.management.exception", "ManagementException"),
        ManagementError => ("com.azure.core.management.exception", "ManagementError"),
        Resource => (AZ_MANAGEMENT, "Resource"),
        ProxyResource => (AZ_MANAGEMENT, "ProxyResource"),
        AzureProfile => ("com.azure.core.management.profile", "AzureProfile"),
    }
}

/// clientcore location of `class`, `None` when clientcore has no counterpart.
fn clientcore(class: RuntimeClass) -> Option<(&'static str, &'static str)> {
    use RuntimeClass::*;

    Some(match class {
        BinaryData => ("io.clientcore.core.models.binarydata", "BinaryData"),
        Base64Url => (CC_UTILS, "Base64Uri"),
        DateTimeRfc1123 => (CC_UTILS, "DateTimeRfc1123"),
        ExpandableStringEnum | ExpandableEnum => (CC_UTILS, "ExpandableEnum"),
        ServiceVersion => (CC_UTILS, "ServiceVersion"),
        CoreUtils => (CC_UTILS, "CoreUtils"),
        Response => (CC_MODELS, "Response"),
        HttpResponseException => (CC_MODELS, "HttpResponseException"),
        RequestOptions | RequestContext | Context => (CC_MODELS, "RequestContext"),
        HttpMethod => (CC_MODELS, "HttpMethod"),
        HttpHeaderName => (CC_MODELS, "HttpHeaderName"),
        HttpRequest => (CC_MODELS, "HttpRequest"),
        PagedIterable => (CC_PAGING, "PagedIterable"),
        PagedResponse | PagedResponseBase => (CC_PAGING, "PagedResponse"),
        RestProxy => ("io.clientcore.core.http", "RestProxy"),
        HttpPipeline => (CC_PIPELINE, "HttpPipeline"),
        HttpPipelineBuilder => (CC_PIPELINE, "HttpPipelineBuilder"),
        HttpPipelinePolicy => (CC_PIPELINE, "HttpPipelinePolicy"),
        HttpClient => ("io.clientcore.core.http.client", "HttpClient"),
        RetryPolicy => (CC_PIPELINE, "HttpRetryPolicy"),
        RedirectPolicy => (CC_PIPELINE, "HttpRedirectPolicy"),
        UserAgentPolicy => (CC_PIPELINE, "HttpInstrumentationPolicy"),
        Configuration => ("io.clientcore.core.utils.configuration", "Configuration"),
        ClientLogger => ("io.clientcore.core.instrumentation.logging", "ClientLogger"),
        KeyCredential => ("io.clientcore.core.credentials", "KeyCredential"),
        KeyCredentialPolicy => (CC_PIPELINE, "KeyCredentialPolicy"),
        JsonSerializable => (CC_JSON, "JsonSerializable"),
        JsonReader => (CC_JSON, "JsonReader"),
        JsonWriter => (CC_JSON, "JsonWriter"),
        JsonToken => (CC_JSON, "JsonToken"),
        HttpTrait => (CC_TRAITS, "HttpTrait"),
        ConfigurationTrait => (CC_TRAITS, "ConfigurationTrait"),
        EndpointTrait => (CC_TRAITS, "EndpointTrait"),
        KeyCredentialTrait => (CC_TRAITS, "KeyCredentialTrait"),
        Generated | Fluent | Immutable | Metadata => (CC_ANNOTATIONS, "Metadata"),
        MetadataProperties => (CC_ANNOTATIONS, "MetadataProperties"),
        ServiceInterface => (CC_HTTP_ANNOTATIONS, "ServiceInterface"),
        ServiceMethod => (CC_ANNOTATIONS, "ServiceMethod"),
        ReturnType => (CC_ANNOTATIONS, "ReturnType"),
        ServiceClient => (CC_ANNOTATIONS, "ServiceClient"),
        ServiceClientBuilder => (CC_ANNOTATIONS, "ServiceClientBuilder"),
        HostParam => (CC_HTTP_ANNOTATIONS, "HostParam"),
        PathParam => (CC_HTTP_ANNOTATIONS, "PathParam"),
        QueryParam => (CC_HTTP_ANNOTATIONS, "QueryParam"),
        HeaderParam => (CC_HTTP_ANNOTATIONS, "HeaderParam"),
        BodyParam => (CC_HTTP_ANNOTATIONS, "BodyParam"),
        UnexpectedResponseExceptionType | UnexpectedResponseExceptionDetail => {
            (CC_HTTP_ANNOTATIONS, "UnexpectedResponseExceptionDetail")
        }
        HttpRequestInformation | Get | Put | Post | Patch | Delete | Head | Options
        | ExpectedResponses => (CC_HTTP_ANNOTATIONS, "HttpRequestInformation"),
        _ => return None,
    })
}

/// A Maven dependency of a generated library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenDependency {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub version: &'static str,
    pub scope: Option<&'static str>,
}

impl MavenDependency {
    const fn new(group_id: &'static str, artifact_id: &'static str, version: &'static str) -> Self {
        Self {
            group_id,
            artifact_id,
            version,
            scope: None,
        }
    }

    const fn test(group_id: &'static str, artifact_id: &'static str, version: &'static str) -> Self {
        Self {
            group_id,
            artifact_id,
            version,
            scope: Some("test"),
        }
    }
}

/// Resolves runtime concepts to Java classes for one flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runtime {
    flavor: Flavor,
}

impl Runtime {
    pub fn new(flavor: Flavor) -> Self {
        Self { flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn is_azure(&self) -> bool {
        self.flavor == Flavor::Azure
    }

    /// Whether the flavor ships `class` natively.
    pub fn supports(&self, class: RuntimeClass) -> bool {
        match self.flavor {
            Flavor::Azure => true,
            Flavor::Unbranded => clientcore(class).is_some(),
        }
    }

    /// The Java class for `class`.
    ///
    /// Concepts without a clientcore counterpart resolve to their azure-core
    /// class in both flavors.
    pub fn class(&self, class: RuntimeClass) -> ClassType {
        let (package, name) = match self.flavor {
            Flavor::Azure => azure(class),
            Flavor::Unbranded => clientcore(class).unwrap_or_else(|| azure(class)),
        };
        ClassType::new(package, name)
    }

    /// The Java class for `class` as a type.
    pub fn ty(&self, class: RuntimeClass) -> IType {
        IType::Class(self.class(class))
    }

    /// `Response<T>`.
    pub fn response_of(&self, body: &IType) -> IType {
        IType::Class(self.class(RuntimeClass::Response).with_args(vec![body.as_nullable()]))
    }

    /// The per-call options type appended to protocol methods.
    pub fn request_options(&self) -> ClassType {
        self.class(RuntimeClass::RequestOptions)
    }

    /// Name of the per-call options parameter.
    pub fn request_options_name(&self) -> &'static str {
        match self.flavor {
            Flavor::Azure => "requestOptions",
            Flavor::Unbranded => "requestContext",
        }
    }

    /// Expression for empty per-call options, passed by convenience methods.
    pub fn empty_options_expr(&self) -> &'static str {
        match self.flavor {
            Flavor::Azure => "new RequestOptions()",
            Flavor::Unbranded => "RequestContext.none()",
        }
    }

    /// Expression for "no context", passed to azure proxy methods.
    pub fn none_context_expr(&self) -> &'static str {
        match self.flavor {
            Flavor::Azure => "Context.NONE",
            Flavor::Unbranded => "RequestContext.none()",
        }
    }

    /// JPMS module name of the runtime.
    pub fn core_module(&self) -> &'static str {
        match self.flavor {
            Flavor::Azure => "com.azure.core",
            Flavor::Unbranded => "io.clientcore.core",
        }
    }

    /// Module the models packages are opened to for reflection.
    pub fn reflection_module(&self) -> &'static str {
        self.core_module()
    }

    /// Annotation marking generated members, with its arguments.
    pub fn generated_annotation(&self) -> &'static str {
        match self.flavor {
            Flavor::Azure => "@Generated",
            Flavor::Unbranded => "@Metadata(properties = { MetadataProperties.GENERATED })",
        }
    }

    /// Dependencies written to `pom.xml`.
    pub fn maven_dependencies(&self, management: bool) -> Vec<MavenDependency> {
        match self.flavor {
            Flavor::Azure => {
                let mut deps = vec![
                    MavenDependency::new("com.azure", "azure-json", "1.2.0"),
                    MavenDependency::new("com.azure", "azure-core", "1.51.0"),
                    MavenDependency::new("com.azure", "azure-core-http-netty", "1.15.3"),
                ];
                if management {
                    deps.push(MavenDependency::new("com.azure", "azure-core-management", "1.15.2"));
                }
                deps.push(MavenDependency::test("com.azure", "azure-core-test", "1.26.2"));
                deps.push(MavenDependency::test("com.azure", "azure-identity", "1.13.2"));
                deps
            }
            Flavor::Unbranded => vec![
                MavenDependency::new("io.clientcore", "core", "1.0.0-beta.1"),
                MavenDependency::new("io.clientcore", "core-json", "1.0.0-beta.1"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_azure_classes() {
        let runtime = Runtime::new(Flavor::Azure);
        assert_eq!(
            runtime.class(RuntimeClass::BinaryData).full_name(),
            "com.azure.core.util.BinaryData"
        );
        assert_eq!(
            runtime.class(RuntimeClass::BearerTokenPolicy).full_name(),
            "com.azure.core.http.policy.BearerTokenAuthenticationPolicy"
        );
        assert_eq!(runtime.none_context_expr(), "Context.NONE");
    }

    #[test]
    fn test_unbranded_classes() {
        let runtime = Runtime::new(Flavor::Unbranded);
        assert_eq!(
            runtime.class(RuntimeClass::Base64Url).full_name(),
            "io.clientcore.core.utils.Base64Uri"
        );
        assert_eq!(
            runtime.class(RuntimeClass::RequestOptions).full_name(),
            "io.clientcore.core.http.models.RequestContext"
        );
        assert_eq!(
            runtime.class(RuntimeClass::UserAgentPolicy).name,
            "HttpInstrumentationPolicy"
        );
    }

    #[test]
    fn test_unbranded_falls_back_to_azure() {
        let runtime = Runtime::new(Flavor::Unbranded);
        assert!(!runtime.supports(RuntimeClass::SyncPoller));
        assert_eq!(
            runtime.class(RuntimeClass::SyncPoller).full_name(),
            "com.azure.core.util.polling.SyncPoller"
        );
    }

    #[test]
    fn test_response_of_boxes_body() {
        let runtime = Runtime::new(Flavor::Azure);
        assert_eq!(runtime.response_of(&IType::INT).simple_name(), "Response<Integer>");
        assert_eq!(runtime.response_of(&IType::VOID).simple_name(), "Response<Void>");
    }

    #[test]
    fn test_management_dependencies() {
        let runtime = Runtime::new(Flavor::Azure);
        let deps = runtime.maven_dependencies(true);
        assert!(deps.iter().any(|d| d.artifact_id == "azure-core-management"));
        assert!(deps.iter().filter(|d| d.scope == Some("test")).count() == 2);
    }
}
