use std::collections::HashMap;

use eyre::Result;
use javagen_codemodel::{ChoiceSchema, Flavor};
use javagen_core::{naming, to_pascal_case};
use javagen_ir::{ClassType, ClientEnumValue, EnumType, EnumTypeRef, IType};

use super::{MapperContext, types::map_type};

/// Map every choice and sealed choice, expandable ones first.
pub fn map_enums(ctx: &MapperContext<'_>) -> Result<Vec<EnumType>> {
    let schemas = &ctx.code_model.schemas;
    let expandable = schemas.choices.iter().map(|c| (c, true));
    let sealed = schemas.sealed_choices.iter().map(|c| (c, false));

    expandable
        .chain(sealed)
        .map(|(choice, expandable)| map_enum(ctx, choice, expandable))
        .collect()
}

fn map_enum(ctx: &MapperContext<'_>, choice: &ChoiceSchema, expandable: bool) -> Result<EnumType> {
    let name = naming::get_type_name(&choice.name);
    let element_type = element_type(ctx, choice, expandable)?;
    let (from_method, to_method) = conversion_methods(ctx.runtime.flavor(), &element_type, expandable);

    Ok(EnumType {
        description: choice
            .description
            .clone()
            .unwrap_or_else(|| format!("Defines values for {name}.")),
        package: ctx.package_for(&choice.name, None, &choice.usage),
        values: member_values(choice),
        usage: ctx.usage_of(&choice.name, &choice.usage),
        name,
        element_type,
        expandable,
        from_method,
        to_method,
    })
}

/// Reference to the enum generated for `choice`.
pub fn enum_ref(ctx: &MapperContext<'_>, choice: &ChoiceSchema, expandable: bool) -> Result<IType> {
    let element_type = element_type(ctx, choice, expandable)?;
    let (from_method, to_method) = conversion_methods(ctx.runtime.flavor(), &element_type, expandable);

    Ok(IType::Enum(EnumTypeRef {
        class: ClassType::new(
            ctx.package_for(&choice.name, None, &choice.usage),
            naming::get_type_name(&choice.name),
        ),
        value_type: Box::new(element_type),
        expandable,
        from_method,
        to_method,
    }))
}

/// Expandable enums hold boxed values, sealed ones primitives.
fn element_type(ctx: &MapperContext<'_>, choice: &ChoiceSchema, expandable: bool) -> Result<IType> {
    let client = map_type(ctx, &choice.choice_type)?.client;
    Ok(if expandable {
        client.as_nullable()
    } else {
        client
    })
}

fn conversion_methods(flavor: Flavor, element_type: &IType, expandable: bool) -> (String, String) {
    if expandable && (flavor == Flavor::Unbranded || !element_type.is_string()) {
        return ("fromValue".to_string(), "getValue".to_string());
    }
    let stem = to_pascal_case(&element_type.as_primitive().simple_name());
    (format!("from{stem}"), format!("to{stem}"))
}

/// Member constants, with numeric suffixes on names that collide.
fn member_values(choice: &ChoiceSchema) -> Vec<ClientEnumValue> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    choice
        .choices
        .iter()
        .map(|value| {
            let base = naming::get_enum_member_name(&value.name);
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}{count}")
            };
            *count += 1;

            ClientEnumValue {
                name,
                value: value.value.clone(),
                description: value.description.clone(),
            }
        })
        .collect()
}
