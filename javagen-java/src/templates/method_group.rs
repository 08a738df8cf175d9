//! Implementation classes of operation groups.

use eyre::{Result, WrapErr};
use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{ClassType, MethodGroupClient, ServiceClient};

use super::{ClientMethodTemplate, ProxyTemplate};
use crate::ast::{
    JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc, JavaMethod, JavaModifiers,
};

/// Renders `{Group}Impl`: the proxy service, a back reference to the service
/// client, and every client method of the group.
pub struct MethodGroupTemplate<'a> {
    settings: &'a Settings,
    client: &'a ServiceClient,
    group: &'a MethodGroupClient,
}

impl<'a> MethodGroupTemplate<'a> {
    pub fn new(settings: &'a Settings, client: &'a ServiceClient, group: &'a MethodGroupClient) -> Self {
        Self {
            settings,
            client,
            group,
        }
    }

    pub fn render(&self) -> Result<JavaFile> {
        let group = self.group;
        let client_impl = &self.client.impl_name;
        let mut ctx = JavaContext::new(self.settings, &group.package);
        let rest_proxy = ctx.runtime_class(RuntimeClass::RestProxy);

        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, &group.class_name)
            .javadoc(JavaJavadoc::new(&group.description));
        if let Some(interface) = &group.interface_name {
            let interface = ctx.use_class(&ClassType::new(self.settings.fluent_package(), interface));
            class = class.implements(interface);
        }

        class = class
            .field(
                JavaField::new(
                    JavaModifiers::PRIVATE | JavaModifiers::FINAL,
                    &group.proxy.name,
                    "service",
                )
                .javadoc(JavaJavadoc::new("The proxy service used to perform REST calls.")),
            )
            .field(
                JavaField::new(JavaModifiers::PRIVATE | JavaModifiers::FINAL, client_impl, "client")
                    .javadoc(JavaJavadoc::new(
                        "The service client containing this operation class.",
                    )),
            )
            .method(
                JavaMethod::constructor(JavaModifiers::NONE, &group.class_name)
                    .javadoc(
                        JavaJavadoc::new(format!("Initializes an instance of {}.", group.class_name))
                            .param(
                                "client",
                                "the instance of the service client containing this operation class.",
                            ),
                    )
                    .param(format!("{client_impl} client"))
                    .body(
                        JavaBlock::new()
                            .line(format!(
                                "this.service = {rest_proxy}.create({}.class, client.getHttpPipeline());",
                                group.proxy.name
                            ))
                            .line("this.client = client;"),
                    ),
            )
            .nested(ProxyTemplate::new(&group.proxy).render(&mut ctx));

        for method in &group.client_methods {
            let rendered = ClientMethodTemplate::new(method, &group.proxy, "this.client")
                .render(&mut ctx)
                .wrap_err_with(|| format!("failed to render {}.{}", group.class_name, method.name))?;
            class.add_method(rendered);
        }

        Ok(ctx.into_file(&group.class_name).add(class))
    }
}

#[cfg(test)]
mod tests {
    use javagen_codegen::Runtime;
    use javagen_ir::{
        ClientMethod, ClientMethodType, IType, Proxy, ProxyMethod, ProxyMethodParameter,
        RequestParameterLocation,
    };

    use super::*;

    fn pets(settings: &Settings) -> (ServiceClient, MethodGroupClient) {
        let runtime = Runtime::new(settings.flavor());
        let endpoint = ProxyMethodParameter {
            name: "endpoint".into(),
            serialized_name: "endpoint".into(),
            location: RequestParameterLocation::Host,
            client_type: IType::string(),
            wire_type: IType::string(),
            required: true,
            constant_value: None,
            from_client: true,
            client_accessor: Some("this.client.getEndpoint()".into()),
            content_type: None,
            multipart: None,
            explode: false,
            encoded: false,
            description: String::new(),
        };
        let ping = ProxyMethod {
            name: "ping".into(),
            operation_name: "ping".into(),
            http_method: "GET".into(),
            path: "/ping".into(),
            expected_status_codes: vec![204],
            parameters: vec![endpoint],
            response_body_type: IType::VOID,
            return_type: runtime.response_of(&IType::VOID),
            unexpected_exceptions: vec![],
            default_exception: Some(runtime.class(RuntimeClass::HttpResponseException)),
            exception_body: None,
            request_content_type: None,
            is_paging_next: false,
            description: "Ping the store.".into(),
        };
        let with_response = ClientMethod {
            name: "pingWithResponse".into(),
            kind: ClientMethodType::SimpleSyncRestResponse,
            proxy_method_name: "ping".into(),
            parameters: vec![javagen_ir::ClientMethodParameter {
                name: runtime.request_options_name().into(),
                client_type: IType::Class(runtime.request_options()),
                required: false,
                description: "The options.".into(),
                merge_patch: None,
            }],
            return_type: runtime.response_of(&IType::VOID),
            description: "Ping the store.".into(),
            paging: None,
            polling: None,
            required_nullable_params: vec![],
            validations: vec![],
            api_versions: vec![],
            deprecated: false,
            internal: false,
        };
        let group = MethodGroupClient {
            name: "Pets".into(),
            class_name: "PetsImpl".into(),
            interface_name: None,
            variable_name: "pets".into(),
            getter_name: "getPets".into(),
            package: "com.petstore.implementation".into(),
            description: "An instance of this class provides access to all the operations defined in Pets.".into(),
            proxy: Proxy {
                name: "PetsService".into(),
                service_interface_name: "PetStoreClientPets".into(),
                base_url: "{endpoint}".into(),
                methods: vec![ping],
            },
            client_methods: vec![with_response],
        };
        let client = ServiceClient {
            name: "PetStoreClient".into(),
            service_name: "PetStore".into(),
            builder_name: "PetStoreClientBuilder".into(),
            impl_name: "PetStoreClientImpl".into(),
            interface_name: None,
            package: "com.petstore.implementation".into(),
            client_package: "com.petstore".into(),
            description: String::new(),
            service_version: None,
            properties: vec![],
            method_groups: vec![group.clone()],
            proxy: None,
            client_methods: vec![],
            security: None,
            clients: vec![],
        };
        (client, group)
    }

    #[test]
    fn test_method_group_impl() {
        let settings = Settings::for_namespace("com.petstore");
        let (client, group) = pets(&settings);
        let file = MethodGroupTemplate::new(&settings, &client, &group).render().unwrap();

        assert_eq!(file.path(), "src/main/java/com/petstore/implementation/PetsImpl.java");
        let java = file.render();
        assert!(java.contains("public final class PetsImpl {"));
        assert!(java.contains("    private final PetsService service;"));
        assert!(java.contains("    PetsImpl(PetStoreClientImpl client) {\n        this.service = RestProxy.create(PetsService.class, client.getHttpPipeline());\n        this.client = client;\n    }"));
        assert!(java.contains("    public interface PetsService {"));
        assert!(java.contains("    public Response<Void> pingWithResponse(RequestOptions requestOptions) {"));
        assert!(java.contains("import com.azure.core.http.rest.RestProxy;"));
    }

    #[test]
    fn test_management_group_implements_interface() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.mode = javagen_codemodel::Mode::Management;
        let (client, mut group) = pets(&settings);
        group.class_name = "PetsClientImpl".into();
        group.interface_name = Some("PetsClient".into());
        let java = MethodGroupTemplate::new(&settings, &client, &group)
            .render()
            .unwrap()
            .render();

        assert!(java.contains("public final class PetsClientImpl implements PetsClient {"));
        assert!(java.contains("import com.petstore.fluent.PetsClient;"));
    }
}
