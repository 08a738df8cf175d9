//! Proxy methods to client methods.

use eyre::Result;
use javagen_codemodel::Operation;
use javagen_core::to_pascal_case;
use javagen_ir::{
    ClassType, ClientMethod, ClientMethodParameter, ClientMethodType, IType,
    JSON_MERGE_PATCH_HELPER, MergePatchAccessor, PagingDetails, PollingDetails, ProxyMethod,
    RequestParameterLocation,
};

use super::{MapperContext, merge_patch, paging::map_paging, polling::map_polling};
use crate::runtime::RuntimeClass;

/// Accessor of the hierarchy root of a merge-patch request body.
fn merge_patch_accessor(ctx: &MapperContext<'_>, op: &Operation) -> Option<MergePatchAccessor> {
    if !merge_patch::is_merge_patch_request(op) {
        return None;
    }
    let body = op.body_parameter()?.schema.as_named()?;
    if !ctx.is_merge_patch(body) {
        return None;
    }
    let root = ctx
        .code_model
        .ancestors_of(body)
        .last()
        .map_or(body, |o| o.name.as_str());
    let root_class = ctx.model_class_by_name(root).ok()?;
    Some(MergePatchAccessor {
        helper: ClassType::new(ctx.settings.implementation_package(), JSON_MERGE_PATCH_HELPER),
        getter: format!("get{}Accessor", root_class.name),
    })
}

/// Method parameters of `proxy`, required ones first.
fn parameters_of(ctx: &MapperContext<'_>, op: &Operation, proxy: &ProxyMethod) -> Vec<ClientMethodParameter> {
    let accessor = merge_patch_accessor(ctx, op);
    let (required, optional): (Vec<_>, Vec<_>) = proxy
        .method_parameters()
        .map(|p| ClientMethodParameter {
            name: p.name.clone(),
            client_type: p.client_type.clone(),
            required: p.required,
            description: p.description.clone(),
            merge_patch: accessor
                .clone()
                .filter(|_| p.location == RequestParameterLocation::Body),
        })
        .partition(|p| p.required);
    required.into_iter().chain(optional).collect()
}

fn options_parameter(ctx: &MapperContext<'_>) -> ClientMethodParameter {
    let description = if ctx.runtime.is_azure() {
        "The options to configure the HTTP request before HTTP client sends it."
    } else {
        "The context to configure the HTTP request before HTTP client sends it."
    };
    ClientMethodParameter {
        name: ctx.runtime.request_options_name().to_string(),
        client_type: IType::Class(ctx.runtime.request_options()),
        required: false,
        description: description.to_string(),
        merge_patch: None,
    }
}

fn with_options(ctx: &MapperContext<'_>, parameters: &[ClientMethodParameter]) -> Vec<ClientMethodParameter> {
    let mut parameters = parameters.to_vec();
    parameters.push(options_parameter(ctx));
    parameters
}

/// Required parameters that accept `null`.
fn required_nullable(parameters: &[ClientMethodParameter]) -> Vec<String> {
    parameters
        .iter()
        .filter(|p| p.required && p.client_type.is_nullable())
        .map(|p| p.name.clone())
        .collect()
}

fn validations(ctx: &MapperContext<'_>, required_nullable: &[String]) -> Vec<String> {
    if !ctx.settings.generator.client_side_validations {
        return Vec::new();
    }
    required_nullable
        .iter()
        .map(|name| format!("Objects.requireNonNull({name}, \"'{name}' cannot be null.\");"))
        .collect()
}

/// Builds the methods of one operation with shared defaults.
struct MethodFactory<'a, 'b> {
    ctx: &'a MapperContext<'b>,
    op: &'a Operation,
    parameters: Vec<ClientMethodParameter>,
    required_nullable: Vec<String>,
    description: String,
}

impl MethodFactory<'_, '_> {
    fn method(
        &self,
        name: String,
        kind: ClientMethodType,
        proxy: &ProxyMethod,
        parameters: Vec<ClientMethodParameter>,
        return_type: IType,
    ) -> ClientMethod {
        ClientMethod {
            name,
            kind,
            proxy_method_name: proxy.name.clone(),
            parameters,
            return_type,
            description: self.description.clone(),
            paging: None,
            polling: None,
            validations: validations(self.ctx, &self.required_nullable),
            required_nullable_params: self.required_nullable.clone(),
            api_versions: self.op.api_versions.clone(),
            deprecated: self.op.deprecated,
            internal: self.op.internal_api,
        }
    }

    fn simple(&self, proxy: &ProxyMethod, internal_rest: bool) -> Vec<ClientMethod> {
        let mut rest = self.method(
            format!("{}WithResponse", proxy.name),
            ClientMethodType::SimpleSyncRestResponse,
            proxy,
            with_options(self.ctx, &self.parameters),
            proxy.return_type.clone(),
        );
        rest.internal |= internal_rest;

        let mut methods = vec![rest];
        if self.op.convenience_api && !internal_rest {
            methods.push(self.method(
                proxy.name.clone(),
                ClientMethodType::SimpleSync,
                proxy,
                self.parameters.clone(),
                proxy.response_body_type.clone(),
            ));
        }
        methods
    }

    fn paging(&self, proxy: &ProxyMethod, next: Option<&ProxyMethod>, details: PagingDetails) -> Vec<ClientMethod> {
        let runtime = &self.ctx.runtime;
        let item = details.item_type.as_nullable();
        let page = IType::Class(runtime.class(RuntimeClass::PagedResponse).with_args(vec![item.clone()]));
        let iterable = IType::Class(runtime.class(RuntimeClass::PagedIterable).with_args(vec![item]));

        let mut single_page = self.method(
            format!("{}SinglePage", proxy.name),
            ClientMethodType::PagingSyncSinglePage,
            proxy,
            with_options(self.ctx, &self.parameters),
            page.clone(),
        );
        single_page.internal = true;
        single_page.paging = Some(details.clone());

        let mut all_pages = self.method(
            proxy.name.clone(),
            ClientMethodType::PagingSync,
            proxy,
            self.parameters.clone(),
            iterable,
        );
        all_pages.paging = Some(details.clone());

        let mut methods = vec![single_page, all_pages];
        if let Some(next) = next {
            let next_link = ClientMethodParameter {
                name: "nextLink".to_string(),
                client_type: IType::string(),
                required: true,
                description: "The URL to get the next list of items.".to_string(),
                merge_patch: None,
            };
            let mut next_page = self.method(
                format!("{}SinglePage", next.name),
                ClientMethodType::PagingSyncSinglePage,
                next,
                with_options(self.ctx, &[next_link]),
                page,
            );
            next_page.internal = true;
            next_page.description = "Get the next page of items.".to_string();
            next_page.required_nullable_params = vec!["nextLink".to_string()];
            next_page.validations = validations(self.ctx, &next_page.required_nullable_params);
            next_page.paging = Some(details);
            methods.push(next_page);
        }
        methods
    }

    fn long_running(&self, proxy: &ProxyMethod, polling: PollingDetails) -> Vec<ClientMethod> {
        let poller = IType::Class(self.ctx.runtime.class(RuntimeClass::SyncPoller).with_args(vec![
            polling.poll_result_type.clone(),
            polling.final_result_type.clone(),
        ]));

        let mut begin = self.method(
            format!("begin{}", to_pascal_case(&proxy.name)),
            ClientMethodType::LongRunningBeginSync,
            proxy,
            with_options(self.ctx, &self.parameters),
            poller,
        );
        begin.polling = Some(polling);

        let mut methods = self.simple(proxy, true);
        methods.push(begin);
        methods
    }
}

/// Client methods of `op`, given its proxy methods.
///
/// Long-running operations become simple methods in the unbranded flavor.
pub fn map_client_methods(
    ctx: &MapperContext<'_>,
    op: &Operation,
    proxies: &[ProxyMethod],
) -> Result<Vec<ClientMethod>> {
    let Some(proxy) = proxies.first() else {
        return Ok(Vec::new());
    };
    let next = proxies.get(1);

    let parameters = parameters_of(ctx, op, proxy);
    let factory = MethodFactory {
        ctx,
        op,
        required_nullable: required_nullable(&parameters),
        parameters,
        description: proxy.description.clone(),
    };

    if let Some(paging) = &op.paging {
        let details = map_paging(ctx, op, paging)?;
        return Ok(factory.paging(proxy, next, details));
    }
    if let Some(lro) = &op.long_running
        && ctx.runtime.is_azure()
    {
        let polling = map_polling(ctx, op, lro)?;
        return Ok(factory.long_running(proxy, polling));
    }
    Ok(factory.simple(proxy, false))
}
