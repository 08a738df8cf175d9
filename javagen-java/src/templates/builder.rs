//! Client builders.

use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{CredentialKind, ServiceClient, ServiceClientProperty};

use super::service_client::build_method_name;
use crate::ast::{
    JavaAnnotation, JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc,
    JavaMethod, JavaModifiers,
};

const MANAGEMENT_ENDPOINT: &str = "\"https://management.azure.com\"";

/// Renders `{Client}Builder`, which assembles the HTTP pipeline and creates
/// the public clients.
///
/// In management mode the builder lives next to the implementation and
/// exposes a single `buildClient()` returning it.
pub struct ClientBuilderTemplate<'a> {
    settings: &'a Settings,
    client: &'a ServiceClient,
}

/// The field and fluent setter backing one builder option.
fn option(
    ctx: &mut JavaContext,
    builder: &str,
    ty: &str,
    name: &str,
    description: &str,
    overrides: bool,
) -> (JavaField, JavaMethod) {
    named_option(ctx, builder, ty, name, name, description, overrides)
}

/// Like [`option`], with a setter named differently from its field.
fn named_option(
    ctx: &mut JavaContext,
    builder: &str,
    ty: &str,
    name: &str,
    setter_name: &str,
    description: &str,
    overrides: bool,
) -> (JavaField, JavaMethod) {
    let generated = ctx.generated();
    let field = JavaField::new(JavaModifiers::PRIVATE, ty, name)
        .comment(description)
        .annotate(generated.clone());
    let javadoc = if overrides {
        JavaJavadoc::new("{@inheritDoc}.")
    } else {
        JavaJavadoc::new(format!("Sets {description}."))
            .param(name, format!("the {name} value."))
            .returns(format!("the {builder}."))
    };
    let mut setter = JavaMethod::new(JavaModifiers::PUBLIC, builder, setter_name)
        .javadoc(javadoc)
        .annotate(generated);
    if overrides {
        setter = setter.annotate(JavaAnnotation::overrides());
    }
    let setter = setter.param(format!("{ty} {name}")).body(
        JavaBlock::new()
            .line(format!("this.{name} = {name};"))
            .line("return this;"),
    );
    (field, setter)
}

impl<'a> ClientBuilderTemplate<'a> {
    pub fn new(settings: &'a Settings, client: &'a ServiceClient) -> Self {
        Self { settings, client }
    }

    /// Package of the builder class.
    pub fn package(&self) -> &'a str {
        if self.settings.is_management() {
            &self.client.package
        } else {
            &self.client.client_package
        }
    }

    fn credential(&self) -> Option<CredentialKind> {
        self.client.security.as_ref().map(|s| s.kind)
    }

    pub fn render(&self) -> JavaFile {
        let client = self.client;
        let builder = client.builder_name.as_str();
        let mut ctx = JavaContext::new(self.settings, self.package());
        let azure = ctx.is_azure();
        let generated = ctx.generated();

        let service_client_builder = ctx.runtime_class(RuntimeClass::ServiceClientBuilder);
        let built: Vec<String> = if self.settings.is_management() {
            vec![format!("{}.class", client.impl_name)]
        } else {
            client.clients.iter().map(|c| format!("{}.class", c.class_name)).collect()
        };
        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, builder)
            .javadoc(JavaJavadoc::new(format!(
                "A builder for creating a new instance of the {} type.",
                client.name
            )))
            .annotate(JavaAnnotation::with_args(
                service_client_builder,
                [format!("serviceClients = {{ {} }}", built.join(", "))],
            ));
        if azure {
            for trait_class in self.traits() {
                let name = ctx.runtime_class(trait_class);
                class = class.implements(format!("{name}<{builder}>"));
            }
        }

        if let Some(security) = &client.security
            && security.kind == CredentialKind::TokenCredential
        {
            let scopes: Vec<String> = security.scopes.iter().map(|s| format!("\"{s}\"")).collect();
            class.add_field(
                JavaField::new(
                    JavaModifiers::PRIVATE | JavaModifiers::STATIC | JavaModifiers::FINAL,
                    "String[]",
                    "DEFAULT_SCOPES",
                )
                .annotate(generated.clone())
                .init(format!("new String[] {{ {} }}", scopes.join(", "))),
            );
        }

        let policy = ctx.runtime_class(RuntimeClass::HttpPipelinePolicy);
        ctx.import("java.util.List");
        ctx.import("java.util.ArrayList");
        ctx.import("java.util.Objects");
        class.add_field(
            JavaField::new(
                JavaModifiers::PRIVATE | JavaModifiers::FINAL,
                format!("List<{policy}>"),
                "pipelinePolicies",
            )
            .annotate(generated.clone()),
        );
        class.add_method(
            JavaMethod::constructor(JavaModifiers::PUBLIC, builder)
                .javadoc(JavaJavadoc::new(format!("Create an instance of the {builder}.")))
                .annotate(generated.clone())
                .body(JavaBlock::new().line("this.pipelinePolicies = new ArrayList<>();")),
        );

        for (field, setter) in self.options(&mut ctx) {
            class.add_field(field);
            class.add_method(setter);
        }
        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC, builder, "addPolicy")
                .javadoc(
                    JavaJavadoc::new("Adds a custom policy to the pipeline.")
                        .param("customPolicy", "the policy to add.")
                        .returns(format!("the {builder}.")),
                )
                .annotate(generated.clone())
                .annotate_all(azure.then(JavaAnnotation::overrides))
                .param(format!("{policy} customPolicy"))
                .body(
                    JavaBlock::new()
                        .line("Objects.requireNonNull(customPolicy, \"'customPolicy' cannot be null.\");")
                        .line("pipelinePolicies.add(customPolicy);")
                        .line("return this;"),
                ),
        );

        class.add_method(self.build_inner_client(&mut ctx));
        class.add_method(self.validate_client());
        class.add_method(self.create_http_pipeline(&mut ctx));

        for facade in &client.clients {
            let construct = match &facade.method_group {
                None => format!("new {}(buildInnerClient())", facade.class_name),
                Some(variable) => {
                    let getter = client
                        .method_group(variable)
                        .map(|g| g.getter_name.clone())
                        .unwrap_or_else(|| format!("get{}", super::capitalize(variable)));
                    format!("new {}(buildInnerClient().{getter}())", facade.class_name)
                }
            };
            class.add_method(
                JavaMethod::new(
                    JavaModifiers::PUBLIC,
                    &facade.class_name,
                    build_method_name(&facade.class_name),
                )
                .javadoc(
                    JavaJavadoc::new(format!("Builds an instance of {} class.", facade.class_name))
                        .returns(format!("an instance of {}.", facade.class_name)),
                )
                .annotate(generated.clone())
                .body(JavaBlock::new().line(format!("return {construct};"))),
            );
        }

        ctx.into_file(builder).add(class)
    }

    fn traits(&self) -> Vec<RuntimeClass> {
        let mut traits = vec![
            RuntimeClass::HttpTrait,
            RuntimeClass::ConfigurationTrait,
        ];
        match self.credential() {
            Some(CredentialKind::Key) => traits.push(RuntimeClass::KeyCredentialTrait),
            Some(CredentialKind::TokenCredential) => traits.push(RuntimeClass::TokenCredentialTrait),
            None => {}
        }
        traits.push(RuntimeClass::EndpointTrait);
        traits
    }

    /// Builder options in declaration order: transport, credential, then the
    /// client properties.
    fn options(&self, ctx: &mut JavaContext) -> Vec<(JavaField, JavaMethod)> {
        let builder = self.client.builder_name.as_str();
        let azure = ctx.is_azure();
        let mut options = Vec::new();

        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);
        options.push(option(ctx, builder, &pipeline, "pipeline", "The HTTP pipeline to send requests through", azure));
        let http_client = ctx.runtime_class(RuntimeClass::HttpClient);
        options.push(option(ctx, builder, &http_client, "httpClient", "The HTTP client used to send the request", azure));
        let configuration = ctx.runtime_class(RuntimeClass::Configuration);
        options.push(option(
            ctx,
            builder,
            &configuration,
            "configuration",
            "The configuration store that is used during construction of the service client",
            azure,
        ));

        match self.credential() {
            Some(CredentialKind::Key) => {
                let key = ctx.runtime_class(RuntimeClass::KeyCredential);
                options.push(named_option(
                    ctx,
                    builder,
                    &key,
                    "keyCredential",
                    "credential",
                    "The KeyCredential used for authentication",
                    azure,
                ));
            }
            Some(CredentialKind::TokenCredential) => {
                let token = ctx.runtime_class(RuntimeClass::TokenCredential);
                options.push(named_option(
                    ctx,
                    builder,
                    &token,
                    "tokenCredential",
                    "credential",
                    "The TokenCredential used for authentication",
                    azure,
                ));
            }
            None => {}
        }

        for property in &self.client.properties {
            let ty = ctx.use_type(&property.client_type.as_nullable());
            let overrides = azure && property.name == "endpoint";
            options.push(option(ctx, builder, &ty, &property.name, &property.description, overrides));
        }

        let retry = ctx.runtime_class(RuntimeClass::RetryPolicy);
        options.push(option(
            ctx,
            builder,
            &retry,
            "retryPolicy",
            "The retry policy that will attempt to retry failed requests, if applicable",
            false,
        ));
        options
    }

    /// Expression passed to the implementation constructor for `property`,
    /// with the local declaration it needs, if any.
    fn property_argument(&self, property: &ServiceClientProperty, ctx: &mut JavaContext) -> (String, Option<String>) {
        let fallback = match (&self.client.service_version, property.name.as_str()) {
            (Some(version), "serviceVersion") => {
                Some(format!("{}.getLatest()", ctx.use_class(&version.class_type())))
            }
            (_, "endpoint") if self.settings.is_management() => Some(MANAGEMENT_ENDPOINT.to_string()),
            _ => property.default_value.clone(),
        };
        match fallback {
            None => (format!("this.{}", property.name), None),
            Some(fallback) => {
                let ty = ctx.use_type(&property.client_type.as_nullable());
                let local = format!("local{}", super::capitalize(&property.name));
                let declaration = format!(
                    "{ty} {local} = ({0} != null) ? {0} : {fallback};",
                    property.name
                );
                (local, Some(declaration))
            }
        }
    }

    fn build_inner_client(&self, ctx: &mut JavaContext) -> JavaMethod {
        let client = self.client;
        let impl_name = ctx.use_class(&client.impl_type());
        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);

        let mut body = JavaBlock::new()
            .line("this.validateClient();")
            .line(format!("{pipeline} localPipeline = (pipeline != null) ? pipeline : createHttpPipeline();"));
        let mut arguments = vec!["localPipeline".to_string()];
        for property in &client.properties {
            let (argument, local) = self.property_argument(property, ctx);
            if let Some(local) = local {
                body.push_line(local);
            }
            arguments.push(argument);
        }
        body.push_line(format!(
            "{impl_name} client = new {impl_name}({});",
            arguments.join(", ")
        ));
        body.push_line("return client;");

        let generated = ctx.generated();
        if self.settings.is_management() {
            JavaMethod::new(JavaModifiers::PUBLIC, &impl_name, "buildClient")
                .javadoc(
                    JavaJavadoc::new(format!("Builds an instance of {impl_name} with the provided parameters."))
                        .returns(format!("an instance of {impl_name}.")),
                )
                .annotate(generated)
                .body(body)
        } else {
            JavaMethod::new(JavaModifiers::PRIVATE, &impl_name, "buildInnerClient")
                .javadoc(
                    JavaJavadoc::new(format!("Builds an instance of {impl_name} with the provided parameters."))
                        .returns(format!("an instance of {impl_name}.")),
                )
                .annotate(generated)
                .body(body)
        }
    }

    fn validate_client(&self) -> JavaMethod {
        let mut body = JavaBlock::new();
        if !self.settings.is_management() {
            body.push_line("Objects.requireNonNull(endpoint, \"'endpoint' cannot be null.\");");
        }
        for property in &self.client.properties {
            if property.name != "endpoint"
                && property.default_value.is_none()
                && property.name != "serviceVersion"
                && !property.client_type.is_nullable()
            {
                body.push_line(format!(
                    "Objects.requireNonNull({0}, \"'{0}' cannot be null.\");",
                    property.name
                ));
            }
        }
        JavaMethod::new(JavaModifiers::PRIVATE, "void", "validateClient").body(body)
    }

    fn create_http_pipeline(&self, ctx: &mut JavaContext) -> JavaMethod {
        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);
        let pipeline_builder = ctx.runtime_class(RuntimeClass::HttpPipelineBuilder);
        let policy = ctx.runtime_class(RuntimeClass::HttpPipelinePolicy);
        let configuration = ctx.runtime_class(RuntimeClass::Configuration);
        let retry = ctx.runtime_class(RuntimeClass::RetryPolicy);
        let user_agent = ctx.runtime_class(RuntimeClass::UserAgentPolicy);

        let mut body = JavaBlock::new()
            .line(format!(
                "{configuration} buildConfiguration = (configuration == null) ? {configuration}.getGlobalConfiguration() : configuration;"
            ))
            .line(format!("List<{policy}> policies = new ArrayList<>();"));
        if ctx.is_azure() {
            body.push_line(format!(
                "policies.add(new {user_agent}(null, \"{}\", null, buildConfiguration));",
                self.settings.namespace()
            ));
        } else {
            body.push_line(format!("policies.add(new {user_agent}(null));"));
        }
        body.push_line(format!("policies.add((retryPolicy == null) ? new {retry}() : retryPolicy);"));

        if let Some(security) = &self.client.security {
            match security.kind {
                CredentialKind::Key => {
                    let key_policy = ctx.runtime_class(RuntimeClass::KeyCredentialPolicy);
                    let header = security.header_name.as_deref().unwrap_or("Authorization");
                    body.push_block(
                        "if (keyCredential != null)",
                        JavaBlock::new().line(format!(
                            "policies.add(new {key_policy}(\"{header}\", keyCredential));"
                        )),
                    );
                }
                CredentialKind::TokenCredential => {
                    let bearer = ctx.runtime_class(RuntimeClass::BearerTokenPolicy);
                    body.push_block(
                        "if (tokenCredential != null)",
                        JavaBlock::new().line(format!(
                            "policies.add(new {bearer}(tokenCredential, DEFAULT_SCOPES));"
                        )),
                    );
                }
            }
        }
        body.push_line("this.pipelinePolicies.forEach(policies::add);");

        if ctx.is_azure() {
            body.push_line(format!(
                "{pipeline} httpPipeline = new {pipeline_builder}().policies(policies.toArray(new {policy}[0])).httpClient(httpClient).configuration(buildConfiguration).build();"
            ));
        } else {
            body.push_line(format!("{pipeline_builder} httpPipelineBuilder = new {pipeline_builder}();"));
            body.push_line("policies.forEach(httpPipelineBuilder::addPolicy);");
            body.push_line(format!("{pipeline} httpPipeline = httpPipelineBuilder.httpClient(httpClient).build();"));
        }
        body.push_line("return httpPipeline;");

        JavaMethod::new(JavaModifiers::PRIVATE, &pipeline, "createHttpPipeline")
            .annotate(ctx.generated())
            .body(body)
    }
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::{Flavor, Mode};
    use javagen_ir::{IType, PublicClient, SecurityInfo, ServiceVersion, ServiceVersionEntry};

    use super::*;

    fn store() -> ServiceClient {
        let version = ServiceVersion {
            class_name: "PetStoreServiceVersion".into(),
            package: "com.petstore".into(),
            service_name: "PetStore".into(),
            versions: vec![ServiceVersionEntry {
                constant: "V2024_01_01".into(),
                value: "2024-01-01".into(),
            }],
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
            properties: vec![
                ServiceClientProperty {
                    name: "endpoint".into(),
                    client_type: IType::string(),
                    description: "Service host".into(),
                    read_only: true,
                    default_value: None,
                },
                ServiceClientProperty {
                    name: "serviceVersion".into(),
                    client_type: IType::Class(version.class_type()),
                    description: "Service version".into(),
                    read_only: true,
                    default_value: None,
                },
            ],
            service_version: Some(version),
            method_groups: vec![],
            proxy: None,
            client_methods: vec![],
            security: Some(SecurityInfo {
                kind: CredentialKind::Key,
                header_name: Some("api-key".into()),
                scopes: vec![],
            }),
            clients: vec![PublicClient {
                class_name: "PetStoreClient".into(),
                method_group: None,
                description: String::new(),
            }],
        }
    }

    #[test]
    fn test_azure_builder() {
        let settings = Settings::for_namespace("com.petstore");
        let client = store();
        let file = ClientBuilderTemplate::new(&settings, &client).render();
        assert_eq!(file.path(), "src/main/java/com/petstore/PetStoreClientBuilder.java");

        let java = file.render();
        assert!(java.contains("@ServiceClientBuilder(serviceClients = { PetStoreClient.class })"));
        assert!(java.contains("implements HttpTrait<PetStoreClientBuilder>, ConfigurationTrait<PetStoreClientBuilder>, KeyCredentialTrait<PetStoreClientBuilder>, EndpointTrait<PetStoreClientBuilder>"));
        assert!(java.contains("    public PetStoreClientBuilder credential(KeyCredential keyCredential) {"));
        assert!(java.contains("PetStoreServiceVersion localServiceVersion = (serviceVersion != null) ? serviceVersion : PetStoreServiceVersion.getLatest();"));
        assert!(java.contains("PetStoreClientImpl client = new PetStoreClientImpl(localPipeline, this.endpoint, localServiceVersion);"));
        assert!(java.contains("policies.add(new KeyCredentialPolicy(\"api-key\", keyCredential));"));
        assert!(java.contains("    public PetStoreClient buildPetStoreClient() {\n        return new PetStoreClient(buildInnerClient());\n    }"));
    }

    #[test]
    fn test_unbranded_builder_has_no_traits() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.flavor = Flavor::Unbranded;
        let mut client = store();
        client.security = None;
        let java = ClientBuilderTemplate::new(&settings, &client).render().render();

        assert!(java.contains("public final class PetStoreClientBuilder {"));
        assert!(!java.contains("@Override"));
        assert!(java.contains("policies.forEach(httpPipelineBuilder::addPolicy);"));
        assert!(!java.contains("credential("));
    }

    #[test]
    fn test_management_builder_builds_impl() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.mode = Mode::Management;
        let mut client = store();
        client.service_version = None;
        client.properties.truncate(1);
        client.clients.clear();
        let builder = ClientBuilderTemplate::new(&settings, &client);
        assert_eq!(builder.package(), "com.petstore.implementation");

        let java = builder.render().render();
        assert!(java.contains("@ServiceClientBuilder(serviceClients = { PetStoreClientImpl.class })"));
        assert!(java.contains("    public PetStoreClientImpl buildClient() {"));
        assert!(java.contains("String localEndpoint = (endpoint != null) ? endpoint : \"https://management.azure.com\";"));
    }
}
