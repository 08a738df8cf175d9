//! Proxy interfaces describing the HTTP requests of a client.

use javagen_codegen::RuntimeClass;
use javagen_ir::{Proxy, ProxyMethod, ProxyMethodParameter, RequestParameterLocation};

use crate::ast::{JavaAnnotation, JavaClass, JavaContext, JavaJavadoc, JavaMethod, JavaModifiers};

/// Renders a proxy as an interface nested in the class that calls it.
///
/// The interface is consumed by `RestProxy`, which reads the annotations to
/// build requests.
pub struct ProxyTemplate<'a> {
    proxy: &'a Proxy,
}

fn http_method_class(method: &str) -> RuntimeClass {
    match method {
        "PUT" => RuntimeClass::Put,
        "POST" => RuntimeClass::Post,
        "PATCH" => RuntimeClass::Patch,
        "DELETE" => RuntimeClass::Delete,
        "HEAD" => RuntimeClass::Head,
        "OPTIONS" => RuntimeClass::Options,
        _ => RuntimeClass::Get,
    }
}

fn is_multipart(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().starts_with("multipart/form-data")
}

fn status_codes(codes: &[u16]) -> String {
    let codes: Vec<String> = codes.iter().map(u16::to_string).collect();
    format!("{{ {} }}", codes.join(", "))
}

impl<'a> ProxyTemplate<'a> {
    pub fn new(proxy: &'a Proxy) -> Self {
        Self { proxy }
    }

    pub fn render(&self, ctx: &mut JavaContext) -> JavaClass {
        let proxy = self.proxy;
        let service_interface = ctx.runtime_class(RuntimeClass::ServiceInterface);

        let mut interface = JavaClass::interface(JavaModifiers::PUBLIC, &proxy.name).javadoc(
            JavaJavadoc::new(format!(
                "The interface defining all the services for {} to be used by the proxy service to perform REST calls.",
                proxy.service_interface_name
            )),
        );
        interface = if ctx.is_azure() {
            let host = ctx.runtime_class(RuntimeClass::Host);
            interface
                .annotate(JavaAnnotation::with_args(&host, [format!("\"{}\"", proxy.base_url)]))
                .annotate(JavaAnnotation::with_args(
                    &service_interface,
                    [format!("name = \"{}\"", proxy.service_interface_name)],
                ))
        } else {
            interface.annotate(JavaAnnotation::with_args(
                &service_interface,
                [
                    format!("name = \"{}\"", proxy.service_interface_name),
                    format!("host = \"{}\"", proxy.base_url),
                ],
            ))
        };

        for method in &proxy.methods {
            interface.add_method(self.method(ctx, method));
        }
        interface
    }

    fn method(&self, ctx: &mut JavaContext, method: &ProxyMethod) -> JavaMethod {
        let return_type = ctx.use_type(&method.return_type);
        let mut declaration = JavaMethod::new(JavaModifiers::NONE, return_type, &method.name);
        if method.request_content_type.as_deref().is_some_and(is_multipart) {
            declaration = declaration.line_comment("@Multipart not supported by RestProxy");
        }
        declaration = declaration
            .annotate_all(self.request_annotations(ctx, method))
            .annotate_all(self.exception_annotations(ctx, method));

        for parameter in &method.parameters {
            declaration = declaration.param(self.parameter(ctx, parameter));
        }

        let runtime = ctx.runtime();
        let options_type = ctx.use_class(&runtime.request_options());
        let options = runtime.request_options_name();
        declaration = declaration.param(format!("{options_type} {options}"));
        if ctx.is_azure() {
            let context = ctx.runtime_class(RuntimeClass::Context);
            declaration = declaration.param(format!("{context} context"));
        }
        declaration
    }

    fn request_annotations(&self, ctx: &mut JavaContext, method: &ProxyMethod) -> Vec<JavaAnnotation> {
        if ctx.is_azure() {
            let verb = ctx.runtime_class(http_method_class(&method.http_method));
            let expected = ctx.runtime_class(RuntimeClass::ExpectedResponses);
            vec![
                JavaAnnotation::with_args(verb, [format!("\"{}\"", method.path)]),
                JavaAnnotation::with_args(expected, [status_codes(&method.expected_status_codes)]),
            ]
        } else {
            let info = ctx.runtime_class(RuntimeClass::HttpRequestInformation);
            let http_method = ctx.runtime_class(RuntimeClass::HttpMethod);
            let mut args = vec![
                format!("method = {http_method}.{}", method.http_method),
                format!("path = \"{}\"", method.path),
                format!("expectedStatusCodes = {}", status_codes(&method.expected_status_codes)),
            ];
            if !method.response_body_type.is_void() {
                let body = ctx.use_type(&method.response_body_type.as_nullable());
                if !body.contains('<') {
                    args.push(format!("returnValueWireType = {body}.class"));
                }
            }
            vec![JavaAnnotation::with_args(info, args)]
        }
    }

    fn exception_annotations(&self, ctx: &mut JavaContext, method: &ProxyMethod) -> Vec<JavaAnnotation> {
        let mut annotations = Vec::new();
        if ctx.is_azure() {
            let annotation = ctx.runtime_class(RuntimeClass::UnexpectedResponseExceptionType);
            for unexpected in &method.unexpected_exceptions {
                let exception = ctx.use_class(&unexpected.exception);
                annotations.push(JavaAnnotation::with_args(
                    &annotation,
                    [
                        format!("value = {exception}.class"),
                        format!("code = {}", status_codes(&unexpected.status_codes)),
                    ],
                ));
            }
            if let Some(default) = &method.default_exception {
                let exception = ctx.use_class(default);
                annotations.push(JavaAnnotation::with_args(&annotation, [format!("{exception}.class")]));
            }
        } else {
            let annotation = ctx.runtime_class(RuntimeClass::UnexpectedResponseExceptionDetail);
            for unexpected in &method.unexpected_exceptions {
                let mut args = vec![format!("statusCode = {}", status_codes(&unexpected.status_codes))];
                if let Some(body) = &unexpected.body {
                    args.push(format!("exceptionBodyClass = {}.class", ctx.use_class(body)));
                }
                annotations.push(JavaAnnotation::with_args(&annotation, args));
            }
            let mut args = Vec::new();
            if let Some(body) = &method.exception_body {
                args.push(format!("exceptionBodyClass = {}.class", ctx.use_class(body)));
            }
            annotations.push(JavaAnnotation::with_args(&annotation, args));
        }
        annotations
    }

    fn parameter(&self, ctx: &mut JavaContext, parameter: &ProxyMethodParameter) -> String {
        let annotation = ctx.runtime_class(match parameter.location {
            RequestParameterLocation::Host => RuntimeClass::HostParam,
            RequestParameterLocation::Path => RuntimeClass::PathParam,
            RequestParameterLocation::Query => RuntimeClass::QueryParam,
            RequestParameterLocation::Header => RuntimeClass::HeaderParam,
            RequestParameterLocation::Body => RuntimeClass::BodyParam,
        });
        let ty = ctx.use_type(&parameter.wire_type);

        let value = match parameter.location {
            RequestParameterLocation::Body => format!(
                "\"{}\"",
                parameter.content_type.as_deref().unwrap_or("application/json")
            ),
            _ => format!("\"{}\"", parameter.serialized_name),
        };
        let args = if parameter.encoded {
            format!("value = {value}, encoded = true")
        } else if parameter.explode && parameter.location == RequestParameterLocation::Query {
            format!("value = {value}, multipleQueryParams = true")
        } else {
            value
        };
        format!("@{annotation}({args}) {ty} {}", parameter.name)
    }
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::{Flavor, Settings};
    use javagen_ir::{ClassType, IType, UnexpectedException};

    use super::*;

    fn parameter(name: &str, location: RequestParameterLocation) -> ProxyMethodParameter {
        ProxyMethodParameter {
            name: name.into(),
            serialized_name: name.into(),
            location,
            client_type: IType::string(),
            wire_type: IType::string(),
            required: true,
            constant_value: None,
            from_client: false,
            client_accessor: None,
            content_type: None,
            multipart: None,
            explode: false,
            encoded: false,
            description: String::new(),
        }
    }

    fn pets_service(settings: &Settings) -> Proxy {
        let runtime = javagen_codegen::Runtime::new(settings.flavor());
        let pet = IType::Model(ClassType::new("com.petstore.models", "Pet"));
        Proxy {
            name: "PetsService".into(),
            service_interface_name: "PetStoreClientPets".into(),
            base_url: "{endpoint}".into(),
            methods: vec![ProxyMethod {
                name: "get".into(),
                operation_name: "get".into(),
                http_method: "GET".into(),
                path: "/pets/{petId}".into(),
                expected_status_codes: vec![200],
                parameters: vec![
                    parameter("endpoint", RequestParameterLocation::Host),
                    parameter("petId", RequestParameterLocation::Path),
                ],
                response_body_type: pet.clone(),
                return_type: runtime.response_of(&pet),
                unexpected_exceptions: vec![UnexpectedException {
                    exception: runtime.class(RuntimeClass::HttpResponseException),
                    status_codes: vec![400],
                    body: Some(ClassType::new("com.petstore.models", "Error")),
                }],
                default_exception: Some(runtime.class(RuntimeClass::HttpResponseException)),
                exception_body: None,
                request_content_type: None,
                is_paging_next: false,
                description: String::new(),
            }],
        }
    }

    fn render(settings: &Settings) -> String {
        render_proxy(settings, &pets_service(settings))
    }

    fn render_proxy(settings: &Settings, proxy: &Proxy) -> String {
        let mut ctx = JavaContext::new(settings, "com.petstore.implementation");
        let interface = ProxyTemplate::new(proxy).render(&mut ctx);
        ctx.into_file("PetsImpl").add(interface).render()
    }

    #[test]
    fn test_azure_proxy() {
        let settings = Settings::for_namespace("com.petstore");
        let java = render(&settings);
        assert!(java.contains("@Host(\"{endpoint}\")\n@ServiceInterface(name = \"PetStoreClientPets\")\npublic interface PetsService {"));
        assert!(java.contains("    @Get(\"/pets/{petId}\")\n    @ExpectedResponses({ 200 })\n"));
        assert!(java.contains("@UnexpectedResponseExceptionType(value = HttpResponseException.class, code = { 400 })"));
        assert!(java.contains("    @UnexpectedResponseExceptionType(HttpResponseException.class)\n"));
        assert!(java.contains("Response<Pet> get(@HostParam(\"endpoint\") String endpoint, @PathParam(\"petId\") String petId, RequestOptions requestOptions, Context context);"));
    }

    #[test]
    fn test_unbranded_proxy() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.flavor = Flavor::Unbranded;
        let java = render(&settings);
        assert!(java.contains("@ServiceInterface(name = \"PetStoreClientPets\", host = \"{endpoint}\")"));
        assert!(java.contains("@HttpRequestInformation(method = HttpMethod.GET, path = \"/pets/{petId}\", expectedStatusCodes = { 200 }, returnValueWireType = Pet.class)"));
        assert!(java.contains("@UnexpectedResponseExceptionDetail(statusCode = { 400 }, exceptionBodyClass = Error.class)"));
        assert!(java.contains("    @UnexpectedResponseExceptionDetail\n"));
        assert!(java.contains("RequestContext requestContext);"));
        assert!(!java.contains("Context context"));
    }

    #[test]
    fn test_multipart_upload_comment() {
        let settings = Settings::for_namespace("com.petstore");
        let mut proxy = pets_service(&settings);
        let method = &mut proxy.methods[0];
        method.name = "upload".into();
        method.http_method = "POST".into();
        method.path = "/pets/upload".into();
        method.request_content_type = Some("multipart/form-data".into());
        let mut body = parameter("body", RequestParameterLocation::Body);
        body.wire_type = IType::Model(ClassType::new("com.azure.core.util", "BinaryData"));
        body.content_type = Some("multipart/form-data".into());
        method.parameters.push(body);

        let java = render_proxy(&settings, &proxy);
        assert!(java.contains("    // @Multipart not supported by RestProxy\n    @Post(\"/pets/upload\")\n"));
        assert!(java.contains("@BodyParam(\"multipart/form-data\") BinaryData body"));
        assert_eq!(java.matches("@Multipart").count(), 1);
    }
}
