//! Operations to proxy interface methods.

use std::collections::HashSet;

use eyre::Result;
use javagen_codemodel::{
    Client, Operation, Parameter, ParameterLocation, PrimitiveKind, Response, SchemaRef, TypeExpr,
};
use javagen_core::{naming, to_pascal_case};
use javagen_ir::{
    ClassType, IType, MultipartPart, MultipartPartKind, ProxyMethod, ProxyMethodParameter,
    RequestParameterLocation, UnexpectedException, quote,
};

use super::{MapperContext, property::getter_name, types::map_type};
use crate::runtime::RuntimeClass;

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Serialized names treated as the service endpoint.
const ENDPOINT_NAMES: [&str; 2] = ["endpoint", "$host"];

/// Well-known exceptions thrown by azure-core for specific status codes.
const STATUS_EXCEPTIONS: [(u16, RuntimeClass); 3] = [
    (401, RuntimeClass::ClientAuthenticationException),
    (404, RuntimeClass::ResourceNotFoundException),
    (409, RuntimeClass::ResourceModifiedException),
];

/// Where client-held values are read from, `this` or `this.client`.
#[derive(Debug, Clone, Copy)]
pub struct ProxyScope<'a> {
    pub client: &'a Client,
    pub receiver: &'static str,
}

impl ProxyScope<'_> {
    fn accessor(&self, property: &str) -> String {
        format!("{}.get{}()", self.receiver, to_pascal_case(property))
    }

    fn api_version_accessor(&self) -> String {
        if self.client.api_versions.is_empty() {
            self.accessor("apiVersion")
        } else {
            format!("{}.getServiceVersion().getVersion()", self.receiver)
        }
    }
}

pub fn is_endpoint(parameter: &Parameter) -> bool {
    matches!(parameter.location, ParameterLocation::Host | ParameterLocation::Uri)
        && ENDPOINT_NAMES.contains(&parameter.serialized_name())
}

fn location_of(location: ParameterLocation) -> RequestParameterLocation {
    match location {
        ParameterLocation::Path => RequestParameterLocation::Path,
        ParameterLocation::Query => RequestParameterLocation::Query,
        ParameterLocation::Header => RequestParameterLocation::Header,
        ParameterLocation::Body => RequestParameterLocation::Body,
        ParameterLocation::Host | ParameterLocation::Uri => RequestParameterLocation::Host,
    }
}

fn endpoint_parameter(scope: &ProxyScope<'_>) -> ProxyMethodParameter {
    ProxyMethodParameter {
        name: "endpoint".to_string(),
        serialized_name: "endpoint".to_string(),
        location: RequestParameterLocation::Host,
        client_type: IType::string(),
        wire_type: IType::string(),
        required: true,
        constant_value: None,
        from_client: true,
        client_accessor: Some(scope.accessor("endpoint")),
        content_type: None,
        multipart: None,
        explode: false,
        encoded: false,
        description: "Service host".to_string(),
    }
}

fn header_constant(name: &str, serialized: &str, value: &str) -> ProxyMethodParameter {
    ProxyMethodParameter {
        name: name.to_string(),
        serialized_name: serialized.to_string(),
        location: RequestParameterLocation::Header,
        client_type: IType::string(),
        wire_type: IType::string(),
        required: true,
        constant_value: Some(quote(value)),
        from_client: false,
        client_accessor: None,
        content_type: None,
        multipart: None,
        explode: false,
        encoded: false,
        description: format!("The {name} header."),
    }
}

fn map_parameter(
    ctx: &MapperContext<'_>,
    scope: &ProxyScope<'_>,
    parameter: &Parameter,
    from_client: bool,
) -> Result<ProxyMethodParameter> {
    let name = naming::get_escaped_reserved_client_method_parameter_name(
        &naming::get_parameter_name(&parameter.name),
    );

    let constant = parameter
        .schema
        .as_named()
        .and_then(|named| ctx.code_model.schema(named))
        .and_then(|schema| match schema {
            SchemaRef::Constant(constant) => Some(constant.value.as_str()),
            _ => None,
        });

    let mut mapped = map_type(ctx, &parameter.schema)?;
    if !parameter.required && constant.is_none() {
        mapped = mapped.nullable();
    }

    let client_accessor = from_client.then(|| {
        if parameter.is_api_version() {
            scope.api_version_accessor()
        } else {
            scope.accessor(&name)
        }
    });

    Ok(ProxyMethodParameter {
        serialized_name: parameter.serialized_name().to_string(),
        location: location_of(parameter.location),
        required: parameter.required || constant.is_some(),
        constant_value: constant.map(|value| mapped.client.default_value_expr(value)),
        from_client,
        client_accessor,
        content_type: parameter.content_type.clone(),
        multipart: None,
        explode: parameter.explode,
        encoded: false,
        description: parameter
            .description
            .clone()
            .unwrap_or_else(|| format!("The {name} parameter.")),
        client_type: mapped.client,
        wire_type: mapped.wire,
        name,
    })
}

/// Whether the operation parameter is read from the service client.
pub fn is_client_parameter(parameter: &Parameter) -> bool {
    parameter.implementation == javagen_codemodel::Implementation::Client || parameter.is_api_version()
}

fn is_binary(response: &Response) -> bool {
    response.binary
        || response
            .schema
            .as_ref()
            .is_some_and(|s| s.as_primitive() == Some(PrimitiveKind::Binary))
}

/// Response body type of `op`, `None` when no success response has a body.
fn body_type(ctx: &MapperContext<'_>, op: &Operation) -> Result<Option<IType>> {
    if op.success_responses().any(is_binary) {
        return Ok(Some(ctx.runtime.ty(RuntimeClass::BinaryData)));
    }
    op.success_schema()
        .map(|schema| Ok(map_type(ctx, schema)?.client.as_nullable()))
        .transpose()
}

fn object_class(ctx: &MapperContext<'_>, schema: Option<&TypeExpr>) -> Option<ClassType> {
    let object = ctx.code_model.object(schema?.as_named()?)?;
    Some(ctx.model_class(object))
}

fn exceptions_of(
    ctx: &MapperContext<'_>,
    op: &Operation,
    expected: &[u16],
) -> (Vec<UnexpectedException>, ClassType, Option<ClassType>) {
    let runtime = &ctx.runtime;
    let default_class = if ctx.is_management() {
        runtime.class(RuntimeClass::ManagementException)
    } else {
        runtime.class(RuntimeClass::HttpResponseException)
    };

    let mut unexpected: Vec<UnexpectedException> = op
        .exceptions
        .iter()
        .filter(|response| !response.is_default())
        .filter_map(|response| {
            let status_codes: Vec<u16> = response
                .status_codes
                .iter()
                .filter_map(|s| s.code())
                .collect();
            let body = object_class(ctx, response.schema.as_ref());
            body.is_some().then(|| UnexpectedException {
                exception: default_class.clone(),
                status_codes,
                body,
            })
        })
        .collect();

    if runtime.is_azure() {
        for (code, class) in STATUS_EXCEPTIONS {
            let covered = expected.contains(&code)
                || unexpected.iter().any(|u| u.status_codes.contains(&code));
            if !covered {
                unexpected.push(UnexpectedException {
                    exception: runtime.class(class),
                    status_codes: vec![code],
                    body: None,
                });
            }
        }
    }

    let default_body = op
        .exceptions
        .iter()
        .find(|response| response.is_default())
        .and_then(|response| object_class(ctx, response.schema.as_ref()));

    (unexpected, default_class, default_body)
}

fn multipart_kind(ty: &IType) -> MultipartPartKind {
    match ty {
        IType::ByteArray => MultipartPartKind::File,
        _ if ty.is_binary_data() => MultipartPartKind::File,
        IType::Model(_) | IType::List(_) | IType::Map(_) => MultipartPartKind::Json,
        _ => MultipartPartKind::Text,
    }
}

/// Parts of a `multipart/form-data` body: the writable properties of the body
/// model, inherited ones root first. `None` when the body is not a model.
fn multipart_parts(ctx: &MapperContext<'_>, op: &Operation) -> Result<Option<Vec<MultipartPart>>> {
    let Some(object) = op
        .body_parameter()
        .and_then(|p| p.schema.as_named())
        .and_then(|name| ctx.code_model.object(name))
    else {
        return Ok(None);
    };

    let mut seen = HashSet::new();
    let mut parts = Vec::new();
    let ancestors = ctx.code_model.ancestors_of(&object.name);
    for owner in ancestors.into_iter().rev().chain([object]) {
        for property in owner.properties.iter().filter(|p| !p.read_only) {
            if !seen.insert(property.serialized_name()) {
                continue;
            }
            let mut mapped = map_type(ctx, &property.schema)?;
            if !property.required || property.nullable {
                mapped = mapped.nullable();
            }
            let name = naming::get_property_name(&property.name);
            parts.push(MultipartPart {
                serialized_name: property.serialized_name().to_string(),
                getter: getter_name(ctx, &name, &mapped.client),
                kind: multipart_kind(&mapped.client),
                client_type: mapped.client,
            });
        }
    }
    Ok(Some(parts))
}

/// The proxy methods of `op`: the request itself, plus the next-page request
/// of next-link paging.
pub fn map_proxy_methods(
    ctx: &MapperContext<'_>,
    scope: &ProxyScope<'_>,
    op: &Operation,
) -> Result<Vec<ProxyMethod>> {
    let name = naming::get_method_name(&op.name);

    let mut parameters = vec![endpoint_parameter(scope)];
    for global in &scope.client.global_parameters {
        if !is_endpoint(global) {
            parameters.push(map_parameter(ctx, scope, global, true)?);
        }
    }
    for parameter in &op.parameters {
        if is_endpoint(parameter) {
            continue;
        }
        let from_client = is_client_parameter(parameter);
        if from_client && parameters.iter().any(|p| p.serialized_name == parameter.serialized_name()) {
            continue;
        }
        parameters.push(map_parameter(ctx, scope, parameter, from_client)?);
    }

    let has_header = |parameters: &[ProxyMethodParameter], serialized: &str| {
        parameters.iter().any(|p| {
            p.location == RequestParameterLocation::Header
                && p.serialized_name.eq_ignore_ascii_case(serialized)
        })
    };

    let request_content_type = op.body_parameter().map(|body| {
        body.content_type
            .clone()
            .or_else(|| op.request.media_types.first().cloned())
            .unwrap_or_else(|| "application/json".to_string())
    });
    if let Some(content_type) = &request_content_type
        && !has_header(&parameters, "Content-Type")
    {
        parameters.push(header_constant("contentType", "Content-Type", content_type));
    }
    for body in parameters
        .iter_mut()
        .filter(|p| p.location == RequestParameterLocation::Body && p.content_type.is_none())
    {
        body.content_type = request_content_type.clone();
    }

    // azure-core has no multipart support; the client method writes the body itself.
    if ctx.runtime.is_azure()
        && op.sends_media_type(MULTIPART_FORM_DATA)
        && let Some(parts) = multipart_parts(ctx, op)?
        && let Some(body) = parameters
            .iter_mut()
            .find(|p| p.location == RequestParameterLocation::Body)
    {
        body.wire_type = ctx.runtime.ty(RuntimeClass::BinaryData);
        body.multipart = Some(parts);
    }

    let body = body_type(ctx, op)?;
    let accept = body.as_ref().map(|body| {
        if body.is_binary_data() && op.success_responses().any(is_binary) {
            "application/octet-stream"
        } else {
            "application/json"
        }
    });
    if let Some(accept) = accept
        && !has_header(&parameters, "Accept")
    {
        parameters.push(header_constant("accept", "Accept", accept));
    }

    let mut expected_status_codes: Vec<u16> = op
        .responses
        .iter()
        .flat_map(|r| r.status_codes.iter().filter_map(|s| s.code()))
        .collect();
    expected_status_codes.sort_unstable();
    expected_status_codes.dedup();

    let (unexpected_exceptions, default_exception, exception_body) =
        exceptions_of(ctx, op, &expected_status_codes);

    let response_body_type = body.clone().unwrap_or(IType::VOID);
    let return_type = ctx
        .runtime
        .response_of(&body.unwrap_or_else(IType::boxed_void));

    let main = ProxyMethod {
        name: name.clone(),
        operation_name: op.name.clone(),
        http_method: op.request.method.as_str().to_string(),
        path: op.request.path.clone(),
        expected_status_codes,
        parameters,
        response_body_type,
        return_type,
        unexpected_exceptions,
        default_exception: Some(default_exception),
        exception_body,
        request_content_type,
        is_paging_next: false,
        description: op
            .description
            .clone()
            .or_else(|| op.summary.clone())
            .unwrap_or_else(|| format!("The {name} operation.")),
    };

    let next = op
        .paging
        .as_ref()
        .filter(|paging| paging.next_link_name.is_some() && paging.next_operation.is_none())
        .map(|_| next_page_method(scope, &main, accept));

    Ok(std::iter::once(main).chain(next).collect())
}

fn next_page_method(
    scope: &ProxyScope<'_>,
    main: &ProxyMethod,
    accept: Option<&str>,
) -> ProxyMethod {
    let next_link = ProxyMethodParameter {
        name: "nextLink".to_string(),
        serialized_name: "nextLink".to_string(),
        location: RequestParameterLocation::Path,
        client_type: IType::string(),
        wire_type: IType::string(),
        required: true,
        constant_value: None,
        from_client: false,
        client_accessor: None,
        content_type: None,
        multipart: None,
        explode: false,
        encoded: true,
        description: "The URL to get the next list of items.".to_string(),
    };

    let mut parameters = vec![next_link, endpoint_parameter(scope)];
    if let Some(accept) = accept {
        parameters.push(header_constant("accept", "Accept", accept));
    }

    ProxyMethod {
        name: format!("{}Next", main.name),
        http_method: "GET".to_string(),
        path: "{nextLink}".to_string(),
        parameters,
        request_content_type: None,
        is_paging_next: true,
        description: "Get the next page of items.".to_string(),
        ..main.clone()
    }
}
