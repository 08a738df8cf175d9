//! Public client facades.

use eyre::{Result, eyre};
use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{ClassType, ClientMethod, Proxy, PublicClient, ServiceClient};

use super::ClientMethodTemplate;
use crate::ast::{
    JavaAnnotation, JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc,
    JavaMethod, JavaModifiers,
};

/// Renders a `@ServiceClient` class exposing the public methods of one
/// implementation class.
pub struct ClientTemplate<'a> {
    settings: &'a Settings,
    client: &'a ServiceClient,
    facade: &'a PublicClient,
}

impl<'a> ClientTemplate<'a> {
    pub fn new(settings: &'a Settings, client: &'a ServiceClient, facade: &'a PublicClient) -> Self {
        Self {
            settings,
            client,
            facade,
        }
    }

    /// The wrapped implementation class, its proxy and its methods.
    fn target(&self) -> Result<(ClassType, Option<&'a Proxy>, &'a [ClientMethod])> {
        let client = self.client;
        match &self.facade.method_group {
            None => Ok((
                client.impl_type(),
                client.proxy.as_ref(),
                &client.client_methods,
            )),
            Some(variable) => {
                let group = client.method_group(variable).ok_or_else(|| {
                    eyre!(
                        "client '{}' wraps unknown method group '{variable}'",
                        self.facade.class_name
                    )
                })?;
                Ok((
                    ClassType::new(&group.package, &group.class_name),
                    Some(&group.proxy),
                    &group.client_methods,
                ))
            }
        }
    }

    pub fn render(&self) -> Result<JavaFile> {
        let facade = self.facade;
        let (target, proxy, methods) = self.target()?;
        let mut ctx = JavaContext::new(self.settings, &self.client.client_package);
        let target_name = ctx.use_class(&target);
        let service_client = ctx.runtime_class(RuntimeClass::ServiceClient);
        let generated = ctx.generated();

        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, &facade.class_name)
            .javadoc(JavaJavadoc::new(&facade.description))
            .annotate(JavaAnnotation::with_args(
                service_client,
                [format!("builder = {}.class", self.client.builder_name)],
            ))
            .field(
                JavaField::new(JavaModifiers::PRIVATE | JavaModifiers::FINAL, &target_name, "serviceClient")
                    .annotate(generated.clone()),
            )
            .method(
                JavaMethod::constructor(JavaModifiers::NONE, &facade.class_name)
                    .javadoc(
                        JavaJavadoc::new(format!(
                            "Initializes an instance of {} class.",
                            facade.class_name
                        ))
                        .param("serviceClient", "the service client implementation."),
                    )
                    .annotate(generated)
                    .param(format!("{target_name} serviceClient"))
                    .body(JavaBlock::new().line("this.serviceClient = serviceClient;")),
            );

        let Some(proxy) = proxy else {
            return Ok(ctx.into_file(&facade.class_name).add(class));
        };
        for method in methods.iter().filter(|m| !m.internal) {
            let template = ClientMethodTemplate::new(method, proxy, "this.serviceClient");
            let call = format!(
                "this.serviceClient.{}({})",
                method.name,
                template.forwarded_arguments()
            );
            let body = if method.return_type.is_void() {
                JavaBlock::new().line(format!("{call};"))
            } else {
                JavaBlock::new().line(format!("return {call};"))
            };
            class.add_method(template.declaration(&mut ctx, JavaModifiers::PUBLIC).body(body));
        }
        Ok(ctx.into_file(&facade.class_name).add(class))
    }
}

#[cfg(test)]
mod tests {
    use javagen_codegen::Runtime;
    use javagen_ir::{
        ClientMethodParameter, ClientMethodType, IType, MethodGroupClient, ProxyMethod,
    };

    use super::*;

    fn store(settings: &Settings) -> ServiceClient {
        let runtime = Runtime::new(settings.flavor());
        let proxy_method = ProxyMethod {
            name: "delete".into(),
            operation_name: "delete".into(),
            http_method: "DELETE".into(),
            path: "/pets/{petId}".into(),
            expected_status_codes: vec![204],
            parameters: vec![],
            response_body_type: IType::VOID,
            return_type: runtime.response_of(&IType::VOID),
            unexpected_exceptions: vec![],
            default_exception: None,
            exception_body: None,
            request_content_type: None,
            is_paging_next: false,
            description: "Delete a pet.".into(),
        };
        let pet_id = ClientMethodParameter {
            name: "petId".into(),
            client_type: IType::string(),
            required: true,
            description: "The pet id.".into(),
            merge_patch: None,
        };
        let method = |name: &str, kind, internal| ClientMethod {
            name: name.into(),
            kind,
            proxy_method_name: "delete".into(),
            parameters: vec![pet_id.clone()],
            return_type: IType::VOID,
            description: "Delete a pet.".into(),
            paging: None,
            polling: None,
            required_nullable_params: vec![],
            validations: vec![],
            api_versions: vec![],
            deprecated: false,
            internal,
        };
        let group = MethodGroupClient {
            name: "Pets".into(),
            class_name: "PetsImpl".into(),
            interface_name: None,
            variable_name: "pets".into(),
            getter_name: "getPets".into(),
            package: "com.petstore.implementation".into(),
            description: String::new(),
            proxy: Proxy {
                name: "PetsService".into(),
                service_interface_name: "PetStoreClientPets".into(),
                base_url: "{endpoint}".into(),
                methods: vec![proxy_method],
            },
            client_methods: vec![
                method("delete", ClientMethodType::SimpleSync, false),
                method("deleteInternal", ClientMethodType::SimpleSync, true),
            ],
        };
        ServiceClient {
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
            method_groups: vec![group],
            proxy: None,
            client_methods: vec![],
            security: None,
            clients: vec![
                PublicClient {
                    class_name: "PetsClient".into(),
                    method_group: Some("pets".into()),
                    description: "Initializes a new instance of the synchronous PetsClient type.".into(),
                },
                PublicClient {
                    class_name: "ToysClient".into(),
                    method_group: Some("toys".into()),
                    description: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_facade_delegates_public_methods() {
        let settings = Settings::for_namespace("com.petstore");
        let client = store(&settings);
        let file = ClientTemplate::new(&settings, &client, &client.clients[0])
            .render()
            .unwrap();

        assert_eq!(file.path(), "src/main/java/com/petstore/PetsClient.java");
        let java = file.render();
        assert!(java.contains("@ServiceClient(builder = PetStoreClientBuilder.class)\npublic final class PetsClient {"));
        assert!(java.contains("    PetsClient(PetsImpl serviceClient) {"));
        assert!(java.contains("    public void delete(String petId) {\n        this.serviceClient.delete(petId);\n    }"));
        assert!(!java.contains("deleteInternal"));
        assert!(java.contains("import com.petstore.implementation.PetsImpl;"));
    }

    #[test]
    fn test_unknown_method_group() {
        let settings = Settings::for_namespace("com.petstore");
        let client = store(&settings);
        let err = ClientTemplate::new(&settings, &client, &client.clients[1])
            .render()
            .unwrap_err();
        assert!(err.to_string().contains("unknown method group 'toys'"));
    }
}
