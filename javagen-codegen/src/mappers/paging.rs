use eyre::{Result, bail, eyre};
use javagen_codemodel::{ObjectSchema, Operation, Paging, Property};
use javagen_core::naming;
use javagen_ir::{ContinuationTokenDetails, PagingDetails};

use super::{
    MapperContext,
    property::getter_name,
    types::map_type,
};

/// Find a property by serialized name on `object` or its ancestors.
fn find_property<'a>(
    ctx: &MapperContext<'a>,
    object: &'a ObjectSchema,
    serialized: &str,
) -> Option<&'a Property> {
    object.property(serialized).or_else(|| {
        ctx.code_model
            .ancestors_of(&object.name)
            .into_iter()
            .find_map(|ancestor| ancestor.property(serialized))
    })
}

fn getter_of(ctx: &MapperContext<'_>, property: &Property) -> Result<String> {
    let client = map_type(ctx, &property.schema)?.client;
    Ok(getter_name(ctx, &naming::get_property_name(&property.name), &client))
}

/// Paging details of `op`, whose success response is a page model.
pub fn map_paging(ctx: &MapperContext<'_>, op: &Operation, paging: &Paging) -> Result<PagingDetails> {
    let page_name = op
        .success_schema()
        .and_then(|schema| schema.as_named())
        .ok_or_else(|| eyre!("paging operation '{}' does not return an object", op.name))?;
    let page = ctx
        .code_model
        .object(page_name)
        .ok_or_else(|| eyre!("paging operation '{}' does not return an object", op.name))?;

    let item = find_property(ctx, page, &paging.item_name).ok_or_else(|| {
        eyre!(
            "item property '{}' not found on '{}'",
            paging.item_name,
            page.name
        )
    })?;
    let item_list = map_type(ctx, &item.schema)?.client;
    let Some(item_type) = item_list.element() else {
        bail!(
            "item property '{}' of '{}' is not an array",
            paging.item_name,
            page.name
        );
    };

    let next_link_getter = paging
        .next_link_name
        .as_deref()
        .and_then(|name| find_property(ctx, page, name))
        .map(|property| getter_of(ctx, property))
        .transpose()?;

    let method_name = naming::get_method_name(&op.name);
    let next_method_name = match (&paging.next_operation, &next_link_getter) {
        (Some(next), _) => Some(format!("{}SinglePage", naming::get_method_name(next))),
        (None, Some(_)) => Some(format!("{method_name}NextSinglePage")),
        (None, None) => None,
    };

    let continuation_token = paging
        .continuation_token
        .as_ref()
        .map(|token| -> Result<ContinuationTokenDetails> {
            let response_getter = token
                .response_property
                .as_deref()
                .and_then(|name| find_property(ctx, page, name))
                .map(|property| getter_of(ctx, property))
                .transpose()?;
            Ok(ContinuationTokenDetails {
                parameter: naming::get_parameter_name(&token.parameter),
                response_header: token.response_header.clone(),
                response_getter,
            })
        })
        .transpose()?;

    Ok(PagingDetails {
        item_getter: getter_of(ctx, item)?,
        item_type: item_type.clone(),
        page_model: ctx.model_class(page),
        next_link_getter,
        next_method_name,
        continuation_token,
        max_page_size: paging.max_page_size.clone(),
    })
}
