//! Polymorphic hierarchies.
//!
//! A hierarchy is rooted at the object declaring the discriminator. A child
//! may declare its own (nested) discriminator, which then applies to its
//! subtree.

use eyre::Result;
use javagen_codemodel::{ObjectSchema, Property};
use javagen_core::naming;
use javagen_ir::{ClientModelProperty, IType, PolymorphicDiscriminator};

use super::{MapperContext, property::map_property, types::map_type};

/// `object` followed by its ancestors, nearest first.
fn chain<'a>(ctx: &MapperContext<'a>, object: &'a ObjectSchema) -> Vec<&'a ObjectSchema> {
    std::iter::once(object)
        .chain(ctx.code_model.ancestors_of(&object.name))
        .collect()
}

/// Declaring objects along the chain, nearest first.
fn declarers<'a>(ctx: &MapperContext<'a>, object: &'a ObjectSchema) -> Vec<&'a ObjectSchema> {
    chain(ctx, object)
        .into_iter()
        .filter(|o| o.discriminator.is_some())
        .collect()
}

fn declared_property<'a>(declarer: &'a ObjectSchema) -> Option<&'a Property> {
    declarer
        .discriminator
        .as_deref()
        .and_then(|serialized| declarer.property(serialized))
}

pub fn is_polymorphic(ctx: &MapperContext<'_>, object: &ObjectSchema) -> bool {
    chain(ctx, object).iter().any(|o| o.discriminator.is_some())
}

/// The discriminator value of `object`, defaulting to its name.
pub fn value_of(object: &ObjectSchema) -> String {
    object
        .discriminator_value
        .clone()
        .unwrap_or_else(|| object.name.clone())
}

/// The discriminator governing `object`: the one declared nearest to it.
pub fn discriminator_of(
    ctx: &MapperContext<'_>,
    object: &ObjectSchema,
) -> Result<Option<PolymorphicDiscriminator>> {
    let Some(declarer) = declarers(ctx, object).into_iter().next() else {
        return Ok(None);
    };
    let serialized = declarer.discriminator.clone().unwrap_or_default();

    let (property_name, client_type) = match declared_property(declarer) {
        Some(property) => (
            naming::get_property_name(&property.name),
            map_type(ctx, &property.schema)?.client,
        ),
        None => (naming::get_property_name(&serialized), IType::string()),
    };

    Ok(Some(PolymorphicDiscriminator {
        serialized_name: serialized,
        property_name,
        client_type,
        declared_by: naming::get_type_name(&declarer.name),
    }))
}

/// Serialized names of every discriminator on the chain of `object`.
pub fn discriminator_names<'a>(ctx: &MapperContext<'a>, object: &'a ObjectSchema) -> Vec<&'a str> {
    declarers(ctx, object)
        .into_iter()
        .filter_map(|o| o.discriminator.as_deref())
        .collect()
}

/// Discriminator properties carried by `object`, outermost first.
///
/// Each holds the value identifying `object` for that discriminator: the
/// innermost one holds the object's own value, an outer one the value of the
/// topmost nested declarer below it.
pub fn discriminator_properties(
    ctx: &MapperContext<'_>,
    object: &ObjectSchema,
) -> Result<Vec<ClientModelProperty>> {
    let chain = chain(ctx, object);
    let mut properties = Vec::new();

    for (index, declarer) in chain.iter().enumerate().rev() {
        let Some(serialized) = declarer.discriminator.as_deref() else {
            continue;
        };
        let nested = chain[..index]
            .iter()
            .rev()
            .find(|o| o.discriminator.is_some())
            .copied()
            .unwrap_or(object);
        let value = value_of(nested);

        let mut property = match declared_property(declarer) {
            Some(declared) => map_property(ctx, &declarer.name, declared)?,
            None => map_property(ctx, &declarer.name, &synthetic(serialized))?,
        };
        property.client_type = property.client_type.as_primitive();
        property.wire_type = property.wire_type.as_primitive();
        property.default_value = Some(property.client_type.default_value_expr(&value));
        property.is_discriminator = true;
        property.in_constructor = false;
        property.required = true;
        properties.push(property);
    }

    Ok(properties)
}

fn synthetic(serialized: &str) -> Property {
    Property {
        name: serialized.to_string(),
        serialized_name: None,
        schema: javagen_codemodel::TypeExpr::Primitive(javagen_codemodel::PrimitiveKind::String),
        required: true,
        read_only: false,
        nullable: false,
        description: Some(format!("The {serialized} property.")),
        client_default_value: None,
        api_versions: Vec::new(),
        deprecated: false,
    }
}
