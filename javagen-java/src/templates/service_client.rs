//! The service client implementation class.

use eyre::{Result, WrapErr};
use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{ClassType, ServiceClient};

use super::{ClientMethodTemplate, ProxyTemplate, capitalize};
use crate::ast::{
    JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc, JavaMethod, JavaModifiers,
};

/// Renders `{Client}Impl`, which owns the pipeline, the client-level
/// properties and the method group instances.
pub struct ServiceClientTemplate<'a> {
    settings: &'a Settings,
    client: &'a ServiceClient,
}

fn getter(ty: &str, name: &str, getter_name: &str, description: &str) -> JavaMethod {
    JavaMethod::new(JavaModifiers::PUBLIC, ty, getter_name)
        .javadoc(
            JavaJavadoc::new(format!("Gets {description}."))
                .returns(format!("the {name} value.")),
        )
        .body(JavaBlock::new().line(format!("return this.{name};")))
}

impl<'a> ServiceClientTemplate<'a> {
    pub fn new(settings: &'a Settings, client: &'a ServiceClient) -> Self {
        Self { settings, client }
    }

    pub fn render(&self) -> Result<JavaFile> {
        let client = self.client;
        let mut ctx = JavaContext::new(self.settings, &client.package);
        let pipeline = ctx.runtime_class(RuntimeClass::HttpPipeline);
        let private_final = JavaModifiers::PRIVATE | JavaModifiers::FINAL;

        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, &client.impl_name)
            .javadoc(JavaJavadoc::new(if client.description.is_empty() {
                format!("Initializes a new instance of the {} type.", client.name)
            } else {
                client.description.clone()
            }));
        if let Some(interface) = &client.interface_name {
            let interface = ctx.use_class(&ClassType::new(&client.client_package, interface));
            class = class.implements(interface);
        }

        if let Some(proxy) = &client.proxy {
            class.add_field(
                JavaField::new(private_final, &proxy.name, "service")
                    .javadoc(JavaJavadoc::new("The proxy service used to perform REST calls.")),
            );
        }

        let mut ctor_doc = JavaJavadoc::new(format!(
            "Initializes an instance of {} client.",
            client.name
        ))
        .param("httpPipeline", "The HTTP pipeline to send requests through.");
        let mut ctor_params = vec![format!("{pipeline} httpPipeline")];
        let mut ctor_body = JavaBlock::new().line("this.httpPipeline = httpPipeline;");

        for property in &client.properties {
            let ty = ctx.use_type(&property.client_type);
            class.add_field(
                JavaField::new(private_final, &ty, &property.name)
                    .javadoc(JavaJavadoc::new(&property.description)),
            );
            class.add_method(getter(
                &ty,
                &property.name,
                &property.getter_name(),
                &property.description,
            ));
            ctor_doc = ctor_doc.param(&property.name, &property.description);
            ctor_params.push(format!("{ty} {}", property.name));
            ctor_body.push_line(format!("this.{0} = {0};", property.name));
        }

        class.add_field(
            JavaField::new(private_final, &pipeline, "httpPipeline")
                .javadoc(JavaJavadoc::new("The HTTP pipeline to send requests through.")),
        );
        class.add_method(getter(
            &pipeline,
            "httpPipeline",
            "getHttpPipeline",
            "The HTTP pipeline to send requests through",
        ));

        for group in &client.method_groups {
            let ty = match &group.interface_name {
                Some(interface) => {
                    ctx.use_class(&ClassType::new(self.settings.fluent_package(), interface))
                }
                None => group.class_name.clone(),
            };
            class.add_field(
                JavaField::new(private_final, &group.class_name, &group.variable_name).javadoc(
                    JavaJavadoc::new(format!(
                        "The {} object to access its operations.",
                        group.class_name
                    )),
                ),
            );
            class.add_method(
                JavaMethod::new(JavaModifiers::PUBLIC, &ty, &group.getter_name)
                    .javadoc(
                        JavaJavadoc::new(format!("Gets the {} object to access its operations.", ty))
                            .returns(format!("the {ty} object.")),
                    )
                    .body(JavaBlock::new().line(format!("return this.{};", group.variable_name))),
            );
            ctor_body.push_line(format!("this.{} = new {}(this);", group.variable_name, group.class_name));
        }

        if let Some(proxy) = &client.proxy {
            let rest_proxy = ctx.runtime_class(RuntimeClass::RestProxy);
            ctor_body.push_line(format!(
                "this.service = {rest_proxy}.create({}.class, this.httpPipeline);",
                proxy.name
            ));
        }

        class.add_method(
            JavaMethod::constructor(JavaModifiers::PUBLIC, &client.impl_name)
                .javadoc(ctor_doc)
                .params(ctor_params)
                .body(ctor_body),
        );

        if let Some(proxy) = &client.proxy {
            class.add_nested(ProxyTemplate::new(proxy).render(&mut ctx));
            for method in &client.client_methods {
                let rendered = ClientMethodTemplate::new(method, proxy, "this")
                    .render(&mut ctx)
                    .wrap_err_with(|| format!("failed to render {}.{}", client.impl_name, method.name))?;
                class.add_method(rendered);
            }
        }

        Ok(ctx.into_file(&client.impl_name).add(class))
    }
}

/// Name of the builder method creating the facade `class_name`, e.g.
/// `buildPetsClient`.
pub(crate) fn build_method_name(class_name: &str) -> String {
    format!("build{}", capitalize(class_name))
}
