//! Management libraries: fluent interfaces and the `{Service}Manager` entry
//! point.

use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{ClientMethod, FluentManager, Proxy, ServiceClient};

use super::ClientMethodTemplate;
use crate::ast::{
    JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc, JavaMethod, JavaModifiers,
};

/// Renders the interfaces of the fluent package: one per method group and
/// one for the service client.
pub struct FluentInterfacesTemplate<'a> {
    settings: &'a Settings,
    client: &'a ServiceClient,
}

fn declare_methods(
    ctx: &mut JavaContext,
    interface: &mut JavaClass,
    proxy: &Proxy,
    methods: &[ClientMethod],
) {
    for method in methods.iter().filter(|m| !m.internal) {
        interface.add_method(
            ClientMethodTemplate::new(method, proxy, "this").declaration(ctx, JavaModifiers::NONE),
        );
    }
}

impl<'a> FluentInterfacesTemplate<'a> {
    pub fn new(settings: &'a Settings, client: &'a ServiceClient) -> Self {
        Self { settings, client }
    }

    pub fn render(&self) -> Vec<JavaFile> {
        let mut files = Vec::new();
        for group in &self.client.method_groups {
            let Some(name) = &group.interface_name else {
                continue;
            };
            let mut ctx = JavaContext::new(self.settings, self.settings.fluent_package());
            let mut interface = JavaClass::interface(JavaModifiers::PUBLIC, name)
                .javadoc(JavaJavadoc::new(format!("An instance of this class provides access to all the operations defined in {name}.")));
            declare_methods(&mut ctx, &mut interface, &group.proxy, &group.client_methods);
            files.push(ctx.into_file(name).add(interface));
        }
        files.push(self.client_interface());
        files
    }

    fn client_interface(&self) -> JavaFile {
        let client = self.client;
        let name = client.interface_name.as_deref().unwrap_or(&client.name);
        let mut ctx = JavaContext::new(self.settings, &client.client_package);
        let mut interface = JavaClass::interface(JavaModifiers::PUBLIC, name)
            .javadoc(JavaJavadoc::new(format!("The interface for {name} class.")));

        for property in &client.properties {
            let ty = ctx.use_type(&property.client_type);
            interface.add_method(
                JavaMethod::new(JavaModifiers::NONE, ty, property.getter_name()).javadoc(
                    JavaJavadoc::new(format!("Gets {}.", property.description))
                        .returns(format!("the {} value.", property.name)),
                ),
            );
        }
        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);
        interface.add_method(
            JavaMethod::new(JavaModifiers::NONE, pipeline, "getHttpPipeline").javadoc(
                JavaJavadoc::new("Gets The HTTP pipeline to send requests through.")
                    .returns("the httpPipeline value."),
            ),
        );
        for group in &client.method_groups {
            let ty = group.interface_name.as_deref().unwrap_or(&group.class_name);
            interface.add_method(
                JavaMethod::new(JavaModifiers::NONE, ty, &group.getter_name).javadoc(
                    JavaJavadoc::new(format!("Gets the {ty} object to access its operations."))
                        .returns(format!("the {ty} object.")),
                ),
            );
        }
        if let Some(proxy) = &client.proxy {
            declare_methods(&mut ctx, &mut interface, proxy, &client.client_methods);
        }
        ctx.into_file(name).add(interface)
    }
}

/// Renders `{Service}Manager`, which authenticates a pipeline and creates
/// the service client through its builder.
pub struct FluentManagerTemplate<'a> {
    settings: &'a Settings,
    manager: &'a FluentManager,
    client: &'a ServiceClient,
}

impl<'a> FluentManagerTemplate<'a> {
    pub fn new(settings: &'a Settings, manager: &'a FluentManager, client: &'a ServiceClient) -> Self {
        Self {
            settings,
            manager,
            client,
        }
    }

    pub fn render(&self) -> JavaFile {
        let manager = self.manager;
        let name = manager.name.as_str();
        let mut ctx = JavaContext::new(self.settings, &manager.package);
        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);
        let profile = ctx.runtime_class(RuntimeClass::AzureProfile);
        let credential = ctx.runtime_class(RuntimeClass::TokenCredential);
        let interface = ctx.use_class(&manager.client_interface);
        let builder = ctx.use_class(&manager.client_builder);
        ctx.import("java.util.Objects");

        let mut build = format!("new {builder}().pipeline(httpPipeline)");
        build.push_str(".endpoint(profile.getEnvironment().getResourceManagerEndpoint())");
        if self.client.property("subscriptionId").is_some() {
            build.push_str(".subscriptionId(profile.getSubscriptionId())");
        }
        build.push_str(".buildClient();");

        let class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, name)
            .javadoc(JavaJavadoc::new(&manager.description))
            .field(JavaField::new(
                JavaModifiers::PRIVATE | JavaModifiers::FINAL,
                &interface,
                "clientObject",
            ))
            .method(
                JavaMethod::constructor(JavaModifiers::PRIVATE, name)
                    .param(format!("{pipeline} httpPipeline"))
                    .param(format!("{profile} profile"))
                    .body(
                        JavaBlock::new()
                            .line("Objects.requireNonNull(httpPipeline, \"'httpPipeline' cannot be null.\");")
                            .line("Objects.requireNonNull(profile, \"'profile' cannot be null.\");")
                            .line(format!("this.clientObject = {build}")),
                    ),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, "authenticate")
                    .javadoc(
                        JavaJavadoc::new(format!("Creates an instance of {} service API entry point.", manager.service_name))
                            .param("credential", "the credential to use.")
                            .param("profile", "the Azure profile for client.")
                            .returns(format!("the {} service API instance.", manager.service_name)),
                    )
                    .param(format!("{credential} credential"))
                    .param(format!("{profile} profile"))
                    .body(
                        JavaBlock::new()
                            .line("Objects.requireNonNull(credential, \"'credential' cannot be null.\");")
                            .line("Objects.requireNonNull(profile, \"'profile' cannot be null.\");")
                            .line("return configure().authenticate(credential, profile);"),
                    ),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, "authenticate")
                    .javadoc(
                        JavaJavadoc::new(format!("Creates an instance of {} service API entry point.", manager.service_name))
                            .param("httpPipeline", "the {@link HttpPipeline} configured with Azure authentication credential.")
                            .param("profile", "the Azure profile for client.")
                            .returns(format!("the {} service API instance.", manager.service_name)),
                    )
                    .param(format!("{pipeline} httpPipeline"))
                    .param(format!("{profile} profile"))
                    .body(
                        JavaBlock::new()
                            .line("Objects.requireNonNull(httpPipeline, \"'httpPipeline' cannot be null.\");")
                            .line("Objects.requireNonNull(profile, \"'profile' cannot be null.\");")
                            .line(format!("return new {name}(httpPipeline, profile);")),
                    ),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, "Configurable", "configure")
                    .javadoc(
                        JavaJavadoc::new(format!("Gets a Configurable instance that can be used to create {name} with optional configuration."))
                            .returns("the Configurable instance allowing configurations."),
                    )
                    .body(JavaBlock::new().line(format!("return new {name}.Configurable();"))),
            )
            .nested(self.configurable(&mut ctx))
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, &interface, "serviceClient")
                    .javadoc(
                        JavaJavadoc::new(format!("Gets wrapped service client {interface} providing direct access to the underlying auto-generated API implementation, based on Azure REST API."))
                            .returns(format!("Wrapped service client {interface}.")),
                    )
                    .body(JavaBlock::new().line("return this.clientObject;")),
            );

        ctx.into_file(name).add(class)
    }

    /// The nested `Configurable` collecting transport options before
    /// authentication.
    fn configurable(&self, ctx: &mut JavaContext) -> JavaClass {
        let name = self.manager.name.as_str();
        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);
        let pipeline_builder = ctx.runtime_class(RuntimeClass::HttpPipelineBuilder);
        let policy = ctx.runtime_class(RuntimeClass::HttpPipelinePolicy);
        let http_client = ctx.runtime_class(RuntimeClass::HttpClient);
        let retry = ctx.runtime_class(RuntimeClass::RetryPolicy);
        let user_agent = ctx.runtime_class(RuntimeClass::UserAgentPolicy);
        let bearer = ctx.runtime_class(RuntimeClass::BearerTokenPolicy);
        let configuration = ctx.runtime_class(RuntimeClass::Configuration);
        let profile = ctx.runtime_class(RuntimeClass::AzureProfile);
        let credential = ctx.runtime_class(RuntimeClass::TokenCredential);
        ctx.import("java.util.List");
        ctx.import("java.util.ArrayList");

        let setter = |method: &str, ty: &str, field: &str, statement: String, doc: &str| {
            JavaMethod::new(JavaModifiers::PUBLIC, "Configurable", method)
                .javadoc(
                    JavaJavadoc::new(doc)
                        .param(field, format!("the {field}."))
                        .returns("the configurable object itself."),
                )
                .param(format!("{ty} {field}"))
                .body(JavaBlock::new().line(statement).line("return this;"))
        };

        JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::STATIC | JavaModifiers::FINAL, "Configurable")
            .javadoc(JavaJavadoc::new("The Configurable allowing configurations to be set."))
            .field(JavaField::new(JavaModifiers::PRIVATE, &http_client, "httpClient"))
            .field(
                JavaField::new(JavaModifiers::PRIVATE | JavaModifiers::FINAL, format!("List<{policy}>"), "policies")
                    .init("new ArrayList<>()"),
            )
            .field(JavaField::new(JavaModifiers::PRIVATE, &retry, "retryPolicy"))
            .method(JavaMethod::constructor(JavaModifiers::PRIVATE, "Configurable").body(JavaBlock::new()))
            .method(setter(
                "withHttpClient",
                &http_client,
                "httpClient",
                "this.httpClient = Objects.requireNonNull(httpClient, \"'httpClient' cannot be null.\");".to_string(),
                "Sets the http client.",
            ))
            .method(setter(
                "withPolicy",
                &policy,
                "policy",
                "this.policies.add(Objects.requireNonNull(policy, \"'policy' cannot be null.\"));".to_string(),
                "Adds the pipeline policy to the HTTP pipeline.",
            ))
            .method(setter(
                "withRetryPolicy",
                &retry,
                "retryPolicy",
                "this.retryPolicy = Objects.requireNonNull(retryPolicy, \"'retryPolicy' cannot be null.\");".to_string(),
                "Sets the retry policy to the HTTP pipeline.",
            ))
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, name, "authenticate")
                    .javadoc(
                        JavaJavadoc::new(format!("Creates an instance of {} service API entry point.", self.manager.service_name))
                            .param("credential", "the credential to use.")
                            .param("profile", "the Azure profile for client.")
                            .returns(format!("the {} service API instance.", self.manager.service_name)),
                    )
                    .param(format!("{credential} credential"))
                    .param(format!("{profile} profile"))
                    .body(
                        JavaBlock::new()
                            .line("Objects.requireNonNull(credential, \"'credential' cannot be null.\");")
                            .line("Objects.requireNonNull(profile, \"'profile' cannot be null.\");")
                            .line(format!("List<{policy}> policies = new ArrayList<>();"))
                            .line(format!(
                                "policies.add(new {user_agent}(null, \"{}\", null, {configuration}.getGlobalConfiguration()));",
                                self.settings.namespace()
                            ))
                            .line(format!("policies.add((retryPolicy == null) ? new {retry}() : retryPolicy);"))
                            .line(format!(
                                "policies.add(new {bearer}(credential, profile.getEnvironment().getManagementEndpoint() + \"/.default\"));"
                            ))
                            .line("policies.addAll(this.policies);")
                            .line(format!(
                                "{pipeline} httpPipeline = new {pipeline_builder}().httpClient(httpClient).policies(policies.toArray(new {policy}[0])).build();"
                            ))
                            .line(format!("return new {name}(httpPipeline, profile);")),
                    ),
            )
    }
}
