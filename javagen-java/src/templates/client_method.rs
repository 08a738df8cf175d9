//! Client methods: protocol, convenience, paging and long-running methods.

use eyre::{Result, eyre};
use javagen_codegen::RuntimeClass;
use javagen_ir::{
    ClientMethod, ClientMethodType, IType, MULTIPART_FORM_DATA_HELPER, MultipartPart,
    MultipartPartKind, PagingDetails, PollingDetails, Proxy, ProxyMethod,
};

use crate::ast::{JavaAnnotation, JavaBlock, JavaContext, JavaJavadoc, JavaMethod, JavaModifiers};

/// Renders one client method of an implementation class.
///
/// `receiver` is the expression reaching the service client, `this` inside the
/// service client itself and `this.client` inside a method group.
pub struct ClientMethodTemplate<'a> {
    method: &'a ClientMethod,
    proxy: &'a Proxy,
    receiver: &'a str,
}

/// `TypeReference` creating an instance for `ty`.
fn type_reference(ctx: &mut JavaContext, ty: &IType) -> String {
    let reference = ctx.runtime_class(RuntimeClass::TypeReference);
    let name = ctx.use_type(&ty.as_nullable());
    if name.contains('<') {
        format!("new {reference}<{name}>() {{ }}")
    } else {
        format!("{reference}.createInstance({name}.class)")
    }
}

/// Builds the `multipart/form-data` body of `model` part by part.
fn multipart_body(ctx: &mut JavaContext, model: &str, local: &str, parts: &[MultipartPart]) -> Vec<String> {
    let binary = ctx.runtime_class(RuntimeClass::BinaryData);
    let options = ctx.runtime().request_options_name();
    let mut lines = vec![format!(
        "{binary} {local} = new {MULTIPART_FORM_DATA_HELPER}({options})"
    )];
    for part in parts {
        let name = &part.serialized_name;
        let value = format!("{model}.{}()", part.getter);
        let call = match part.kind {
            MultipartPartKind::Text => {
                let text = match &part.client_type {
                    ty if ty.is_string() => value,
                    IType::Primitive(_) => format!("String.valueOf({value})"),
                    _ => {
                        ctx.import("java.util.Objects");
                        format!("Objects.toString({value}, null)")
                    }
                };
                format!("serializeTextField(\"{name}\", {text})")
            }
            MultipartPartKind::Json => format!("serializeJsonField(\"{name}\", {value})"),
            MultipartPartKind::File => {
                let file = if part.client_type == IType::ByteArray {
                    format!("{value} == null ? null : {binary}.fromBytes({value})")
                } else {
                    value
                };
                format!("serializeFileField(\"{name}\", {file}, null, \"{name}\")")
            }
        };
        lines.push(format!("    .{call}"));
    }
    lines.push("    .end()".to_string());
    lines.push("    .getRequestBody();".to_string());
    lines
}

fn return_description(method: &ClientMethod) -> Option<String> {
    let description = match method.kind {
        ClientMethodType::SimpleSync if method.return_type.is_void() => return None,
        ClientMethodType::SimpleSync => "the response.".to_string(),
        ClientMethodType::SimpleSyncRestResponse if method.return_type.simple_name().ends_with("<Void>") => {
            "the {@link Response}.".to_string()
        }
        ClientMethodType::SimpleSyncRestResponse | ClientMethodType::SendRequest => {
            "the response body along with {@link Response}.".to_string()
        }
        ClientMethodType::PagingSyncSinglePage => "the paginated response with {@link PagedResponse}.".to_string(),
        ClientMethodType::PagingSync => "the paginated response with {@link PagedIterable}.".to_string(),
        ClientMethodType::LongRunningBeginSync => {
            "the {@link SyncPoller} for polling of long-running operation.".to_string()
        }
    };
    Some(description)
}

impl<'a> ClientMethodTemplate<'a> {
    pub fn new(method: &'a ClientMethod, proxy: &'a Proxy, receiver: &'a str) -> Self {
        Self {
            method,
            proxy,
            receiver,
        }
    }

    fn proxy_method(&self) -> Result<&'a ProxyMethod> {
        self.proxy.method(&self.method.proxy_method_name).ok_or_else(|| {
            eyre!(
                "client method '{}' refers to unknown proxy method '{}'",
                self.method.name,
                self.method.proxy_method_name
            )
        })
    }

    /// The method with javadoc and annotations but no body.
    pub fn declaration(&self, ctx: &mut JavaContext, modifiers: JavaModifiers) -> JavaMethod {
        let method = self.method;
        let return_type = ctx.use_type(&method.return_type);

        let mut javadoc = JavaJavadoc::new(&method.description);
        for parameter in &method.parameters {
            javadoc = javadoc.param(&parameter.name, &parameter.description);
        }
        if !method.validations.is_empty() {
            javadoc = javadoc.throws(
                "IllegalArgumentException",
                "thrown if parameters fail the validation.",
            );
        }
        if let Ok(proxy_method) = self.proxy_method()
            && let Some(exception) = &proxy_method.default_exception
        {
            javadoc = javadoc.throws(
                ctx.use_class(exception),
                "thrown if the request is rejected by server.",
            );
        }
        if let Some(returns) = return_description(method) {
            javadoc = javadoc.returns(returns);
        }
        if let Some(since) = method.api_versions.first() {
            javadoc = javadoc.tag(format!("@since {since}"));
        }

        let service_method = ctx.runtime_class(RuntimeClass::ServiceMethod);
        let return_type_class = ctx.runtime_class(RuntimeClass::ReturnType);
        let mut declaration = JavaMethod::new(modifiers, return_type, &method.name)
            .javadoc(javadoc)
            .annotate(ctx.generated())
            .annotate(JavaAnnotation::with_args(
                service_method,
                [format!(
                    "returns = {return_type_class}.{}",
                    method.kind.return_type_annotation()
                )],
            ));
        if method.deprecated {
            declaration = declaration.annotate(JavaAnnotation::new("Deprecated"));
        }
        for parameter in &method.parameters {
            let ty = ctx.use_type(&parameter.client_type);
            declaration = declaration.param(format!("{ty} {}", parameter.name));
        }
        declaration
    }

    /// Argument list forwarding the parameters unchanged, e.g. to the facade.
    pub fn forwarded_arguments(&self) -> String {
        let names: Vec<&str> = self.method.parameters.iter().map(|p| p.name.as_str()).collect();
        names.join(", ")
    }

    pub fn render(&self, ctx: &mut JavaContext) -> Result<JavaMethod> {
        let method = self.method;
        let modifiers = if method.internal && method.kind == ClientMethodType::PagingSyncSinglePage {
            JavaModifiers::PRIVATE
        } else {
            JavaModifiers::PUBLIC
        };
        let declaration = self.declaration(ctx, modifiers);

        let mut body = JavaBlock::new();
        if !method.validations.is_empty() {
            ctx.import("java.util.Objects");
            body = body.lines(method.validations.iter().cloned());
        }

        let body = match method.kind {
            ClientMethodType::SimpleSyncRestResponse => {
                let (prelude, call) = self.service_call(ctx)?;
                body.append(prelude).line(format!("return {call};"))
            }
            ClientMethodType::SimpleSync => body.append(self.convenience(ctx)),
            ClientMethodType::PagingSyncSinglePage => {
                let paging = self.paging()?;
                body.append(self.single_page(ctx, paging)?)
            }
            ClientMethodType::PagingSync => {
                let paging = self.paging()?;
                body.append(self.all_pages(ctx, paging))
            }
            ClientMethodType::LongRunningBeginSync => {
                let polling = method.polling.as_ref().ok_or_else(|| {
                    eyre!("long-running method '{}' has no polling details", method.name)
                })?;
                body.append(self.begin(ctx, polling))
            }
            ClientMethodType::SendRequest => body.append(self.send_request(ctx)),
        };
        Ok(declaration.body(body))
    }

    fn paging(&self) -> Result<&'a PagingDetails> {
        self.method
            .paging
            .as_ref()
            .ok_or_else(|| eyre!("paging method '{}' has no paging details", self.method.name))
    }

    /// Locals for constants and converted arguments, and the proxy call.
    fn service_call(&self, ctx: &mut JavaContext) -> Result<(JavaBlock, String)> {
        let proxy_method = self.proxy_method()?;
        let mut prelude = JavaBlock::new();
        let mut args = Vec::new();

        for parameter in &proxy_method.parameters {
            if parameter.from_client {
                let accessor = parameter
                    .client_accessor
                    .clone()
                    .unwrap_or_else(|| format!("{}.get{}()", self.receiver, super::capitalize(&parameter.name)));
                args.push(accessor);
            } else if let Some(constant) = &parameter.constant_value {
                let ty = ctx.use_type(&parameter.wire_type);
                prelude.push_line(format!("final {ty} {} = {constant};", parameter.name));
                args.push(parameter.name.clone());
            } else if let Some(parts) = &parameter.multipart {
                let local = format!("{}Converted", parameter.name);
                prelude = prelude.lines(multipart_body(ctx, &parameter.name, &local, parts));
                args.push(local);
            } else {
                let converted = parameter
                    .wire_type
                    .client_to_wire_expr(&parameter.client_type, &parameter.name);
                if converted == parameter.name {
                    args.push(converted);
                } else {
                    ctx.import_all(
                        parameter
                            .wire_type
                            .conversion_imports(&parameter.client_type)
                            .into_iter()
                            .map(String::from),
                    );
                    let ty = ctx.use_type(&parameter.wire_type);
                    let local = format!("{}Converted", parameter.name);
                    prelude.push_line(format!("{ty} {local} = {converted};"));
                    args.push(local);
                }
            }
        }

        let options = ctx.runtime().request_options_name();
        args.push(options.to_string());
        if ctx.is_azure() {
            ctx.runtime_class(RuntimeClass::Context);
            args.push(ctx.runtime().none_context_expr().to_string());
        }

        let call = format!("this.service.{}({})", proxy_method.name, args.join(", "));
        Ok((prelude, call))
    }

    /// Arguments of a call to a sibling method, with the options appended.
    fn sibling_arguments(&self, options: &str) -> String {
        let mut args: Vec<String> = self
            .method
            .parameters
            .iter()
            .map(|p| p.name.clone())
            .collect();
        args.push(options.to_string());
        args.join(", ")
    }

    fn convenience(&self, ctx: &mut JavaContext) -> JavaBlock {
        let method = self.method;
        let runtime = ctx.runtime();
        let options_type = ctx.use_class(&runtime.request_options());
        let options = runtime.request_options_name();
        let call = format!(
            "{}WithResponse({})",
            method.name,
            self.sibling_arguments(options)
        );

        let statement = if method.return_type.is_void() {
            format!("{call};")
        } else {
            format!("return {call}.getValue();")
        };

        let mut prepare = Vec::new();
        let mut reset = Vec::new();
        for parameter in &method.parameters {
            let Some(accessor) = &parameter.merge_patch else {
                continue;
            };
            let helper = ctx.use_class(&accessor.helper);
            let prepare_call = format!(
                "{helper}.{}().prepareModelForJsonMergePatch({}",
                accessor.getter, parameter.name
            );
            prepare.push(format!("{prepare_call}, true);"));
            reset.push(format!("{prepare_call}, false);"));
        }

        let block = JavaBlock::new()
            .line(format!("// Generated convenience method for {}WithResponse", method.name))
            .line(format!("{options_type} {options} = {};", runtime.empty_options_expr()));
        if prepare.is_empty() {
            return block.line(statement);
        }
        // The merge-patch flag must be cleared even when the call throws.
        block.lines(prepare).branches(vec![
            ("try {", JavaBlock::new().line(statement)),
            ("finally {", JavaBlock::new().lines(reset)),
        ])
    }

    fn single_page(&self, ctx: &mut JavaContext, paging: &PagingDetails) -> Result<JavaBlock> {
        let proxy_method = self.proxy_method()?;
        let (prelude, call) = self.service_call(ctx)?;
        let response = ctx.use_type(&proxy_method.return_type);

        let items = format!("res.getValue().{}()", paging.item_getter);
        let next_link = paging
            .next_link_getter
            .as_ref()
            .map(|getter| format!("res.getValue().{getter}()"));
        let token = paging.continuation_token.as_ref().and_then(|token| {
            if let Some(getter) = &token.response_getter {
                Some(format!("res.getValue().{getter}()"))
            } else {
                token.response_header.as_ref().map(|header| {
                    let name = ctx.runtime_class(RuntimeClass::HttpHeaderName);
                    format!("res.getHeaders().getValue({name}.fromString(\"{header}\"))")
                })
            }
        });

        let page = if ctx.is_azure() {
            let base = ctx.runtime_class(RuntimeClass::PagedResponseBase);
            let continuation = token.or(next_link).unwrap_or_else(|| "null".to_string());
            format!(
                "return new {base}<>(res.getRequest(), res.getStatusCode(), res.getHeaders(), {items}, {continuation}, null);"
            )
        } else {
            let paged = ctx.runtime_class(RuntimeClass::PagedResponse);
            format!(
                "return new {paged}<>(res.getRequest(), res.getStatusCode(), res.getHeaders(), {items}, {}, {}, null, null, null);",
                token.unwrap_or_else(|| "null".to_string()),
                next_link.unwrap_or_else(|| "null".to_string())
            )
        };

        Ok(prelude
            .line(format!("{response} res = {call};"))
            .line(page))
    }

    fn all_pages(&self, ctx: &mut JavaContext, paging: &PagingDetails) -> JavaBlock {
        let method = self.method;
        let runtime = ctx.runtime();
        let iterable = ctx.runtime_class(RuntimeClass::PagedIterable);
        let options_type = ctx.use_class(&runtime.request_options());
        let options = runtime.request_options_name();
        let first_page = format!(
            "{}SinglePage({})",
            method.name,
            self.sibling_arguments(options)
        );

        let next_page = match (&paging.continuation_token, &paging.next_method_name) {
            (Some(token), _) => {
                let args: Vec<String> = method
                    .parameters
                    .iter()
                    .map(|p| {
                        if p.name == token.parameter {
                            "token".to_string()
                        } else {
                            p.name.clone()
                        }
                    })
                    .chain(std::iter::once(options.to_string()))
                    .collect();
                Some(("token", format!("{}SinglePage({})", method.name, args.join(", "))))
            }
            (None, Some(next)) => Some(("nextLink", format!("{next}(nextLink, {options})"))),
            (None, None) => None,
        };

        let block = JavaBlock::new()
            .line(format!("{options_type} {options} = {};", runtime.empty_options_expr()));
        let construct = if ctx.is_azure() {
            match next_page {
                Some((arg, next)) => format!(
                    "return new {iterable}<>(() -> {first_page}, {arg} -> {next});"
                ),
                None => format!("return new {iterable}<>(() -> {first_page});"),
            }
        } else {
            match next_page {
                Some((arg, next)) => format!(
                    "return new {iterable}<>(pagingOptions -> {first_page}, (pagingOptions, {arg}) -> {next});"
                ),
                None => format!("return new {iterable}<>(pagingOptions -> {first_page});"),
            }
        };
        block.line(construct)
    }

    fn begin(&self, ctx: &mut JavaContext, polling: &PollingDetails) -> JavaBlock {
        let method = self.method;
        let receiver = self.receiver;
        let poller = ctx.runtime_class(RuntimeClass::SyncPoller);
        let strategy = ctx.runtime_class(RuntimeClass::SyncDefaultPollingStrategy);
        let options = ctx.runtime_class(RuntimeClass::PollingStrategyOptions);
        let context = ctx.runtime_class(RuntimeClass::Context);
        ctx.import("java.time.Duration");
        let request_options = ctx.runtime().request_options_name();

        let poll_type = type_reference(ctx, &polling.poll_result_type);
        let final_type = type_reference(ctx, &polling.final_result_type);
        let activation = format!(
            "{}WithResponse({})",
            method.proxy_method_name,
            self.forwarded_arguments()
        );

        JavaBlock::new()
            .line(format!("return {poller}.createPoller(Duration.ofSeconds({}),", polling.poll_interval_seconds))
            .line(format!("    () -> this.{activation},"))
            .line(format!("    new {strategy}<>(new {options}({receiver}.getHttpPipeline())"))
            .line(format!("        .setEndpoint(\"{{endpoint}}\".replace(\"{{endpoint}}\", {receiver}.getEndpoint()))"))
            .line(format!(
                "        .setContext({request_options} != null && {request_options}.getContext() != null ? {request_options}.getContext() : {context}.NONE)),"
            ))
            .line(format!("    {poll_type}, {final_type});"))
    }

    fn send_request(&self, ctx: &mut JavaContext) -> JavaBlock {
        let receiver = self.receiver;
        if ctx.is_azure() {
            let context = ctx.runtime_class(RuntimeClass::Context);
            JavaBlock::new().line(format!(
                "return {receiver}.getHttpPipeline().sendSync(httpRequest, {context}.NONE);"
            ))
        } else {
            JavaBlock::new().line(format!("return {receiver}.getHttpPipeline().send(httpRequest);"))
        }
    }
}
