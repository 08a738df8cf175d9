use eyre::Result;
use javagen_codemodel::{ObjectSchema, Property, SchemaRef, TypeExpr};
use javagen_core::{naming, to_pascal_case};
use javagen_ir::{ClientModelProperty, IType};

use super::{MapperContext, types::map_type};

/// Getter name for a field of the given client type.
///
/// Management models use fluent accessors named after the field.
pub fn getter_name(ctx: &MapperContext<'_>, field: &str, client_type: &IType) -> String {
    if ctx.is_management() {
        field.to_string()
    } else if client_type.as_primitive() == IType::BOOLEAN {
        format!("is{}", to_pascal_case(field))
    } else {
        format!("get{}", to_pascal_case(field))
    }
}

pub fn setter_name(ctx: &MapperContext<'_>, field: &str) -> String {
    if ctx.is_management() {
        format!("with{}", to_pascal_case(field))
    } else {
        format!("set{}", to_pascal_case(field))
    }
}

/// The fixed value of a property typed by a constant schema.
fn constant_of<'a>(ctx: &MapperContext<'a>, expr: &TypeExpr) -> Option<&'a str> {
    match ctx.code_model.schema(expr.as_named()?)? {
        SchemaRef::Constant(constant) => Some(&constant.value),
        _ => None,
    }
}

/// Map a property declared by `owner`.
pub fn map_property(
    ctx: &MapperContext<'_>,
    owner: &str,
    property: &Property,
) -> Result<ClientModelProperty> {
    let name = naming::get_property_name(&property.name);
    let constant = constant_of(ctx, &property.schema);

    let mut mapped = map_type(ctx, &property.schema)?;
    if (!property.required || property.nullable) && constant.is_none() {
        mapped = mapped.nullable();
    }

    let merge_patch = ctx.is_merge_patch(owner);
    let in_constructor = ctx.settings.generator.required_fields_as_ctor_args
        && property.required
        && !property.read_only
        && constant.is_none()
        && !merge_patch;

    Ok(ClientModelProperty {
        getter_name: getter_name(ctx, &name, &mapped.client),
        setter_name: setter_name(ctx, &name),
        serialized_name: property.serialized_name().to_string(),
        description: property
            .description
            .clone()
            .unwrap_or_else(|| format!("The {name} property.")),
        constant_value: constant.map(|value| mapped.client.default_value_expr(value)),
        default_value: property
            .client_default_value
            .as_deref()
            .map(|value| mapped.client.default_value_expr(value)),
        required: property.required,
        read_only: property.read_only,
        nullable: property.nullable,
        is_discriminator: false,
        in_constructor,
        api_versions: property.api_versions.clone(),
        deprecated: property.deprecated,
        wire_type: mapped.wire,
        client_type: mapped.client,
        name,
    })
}

const ADDITIONAL_PROPERTIES: &str = "additionalProperties";

/// Map the additional properties of `object` to a `Map<String, T>` property.
pub fn map_additional_properties(
    ctx: &MapperContext<'_>,
    object: &ObjectSchema,
) -> Result<Option<ClientModelProperty>> {
    let Some(value) = &object.additional_properties else {
        return Ok(None);
    };
    let mapped = map_type(ctx, &TypeExpr::Dict(Box::new(value.clone())))?.nullable();
    let name = ADDITIONAL_PROPERTIES.to_string();

    Ok(Some(ClientModelProperty {
        getter_name: getter_name(ctx, &name, &mapped.client),
        setter_name: setter_name(ctx, &name),
        serialized_name: name.clone(),
        description: "Additional properties".to_string(),
        constant_value: None,
        default_value: None,
        required: false,
        read_only: false,
        nullable: false,
        is_discriminator: false,
        in_constructor: false,
        api_versions: Vec::new(),
        deprecated: false,
        wire_type: mapped.wire,
        client_type: mapped.client,
        name,
    }))
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::{Mode, Settings};

    use super::*;
    use crate::mappers::tests::code_model;

    const PET: &str = r#"
schemas:
  objects:
    - name: Pet
      properties:
        - name: name
          schema: string
          required: true
        - name: age
          schema: int32
        - name: vaccinated
          schema: boolean
          required: true
        - name: born
          serialized-name: bornAt
          schema: unix-time
        - name: kind
          schema: Kind
          required: true
        - name: class
          schema: string
          client-default-value: cat
    - name: Patch
      usage: [json-merge-patch]
      properties:
        - name: name
          schema: string
          required: true
    - name: Bag
      additional-properties: any
  constants:
    - name: Kind
      value-type: string
      value: pet
"#;

    fn property<'a>(model: &'a javagen_codemodel::CodeModel, owner: &str, name: &str) -> &'a Property {
        model
            .object(owner)
            .unwrap()
            .properties
            .iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn test_required_and_optional_properties() {
        let model = code_model(PET);
        let settings = Settings::for_namespace("com.petstore");
        let ctx = MapperContext::new(&model, &settings);

        let name = map_property(&ctx, "Pet", property(&model, "Pet", "name")).unwrap();
        assert!(name.in_constructor);
        assert_eq!(name.getter_name, "getName");
        assert!(!name.has_setter());

        let age = map_property(&ctx, "Pet", property(&model, "Pet", "age")).unwrap();
        assert_eq!(age.client_type.simple_name(), "Integer");
        assert_eq!(age.setter_name, "setAge");
        assert!(age.has_setter());

        let vaccinated = map_property(&ctx, "Pet", property(&model, "Pet", "vaccinated")).unwrap();
        assert_eq!(vaccinated.client_type, IType::BOOLEAN);
        assert_eq!(vaccinated.getter_name, "isVaccinated");
    }

    #[test]
    fn test_encoded_constant_and_reserved_properties() {
        let model = code_model(PET);
        let settings = Settings::for_namespace("com.petstore");
        let ctx = MapperContext::new(&model, &settings);

        let born = map_property(&ctx, "Pet", property(&model, "Pet", "born")).unwrap();
        assert_eq!(born.serialized_name, "bornAt");
        assert!(born.has_conversion());
        assert_eq!(born.wire_type.simple_name(), "Long");

        let kind = map_property(&ctx, "Pet", property(&model, "Pet", "kind")).unwrap();
        assert_eq!(kind.constant_value.as_deref(), Some("\"pet\""));
        assert!(!kind.in_constructor);

        let class = map_property(&ctx, "Pet", property(&model, "Pet", "class")).unwrap();
        assert_eq!(class.name, "classProperty");
        assert_eq!(class.default_value.as_deref(), Some("\"cat\""));
    }

    #[test]
    fn test_merge_patch_properties_skip_constructor() {
        let model = code_model(PET);
        let settings = Settings::for_namespace("com.petstore");
        let ctx = MapperContext::new(&model, &settings);

        let name = map_property(&ctx, "Patch", property(&model, "Patch", "name")).unwrap();
        assert!(!name.in_constructor);
    }

    #[test]
    fn test_management_accessor_names() {
        let model = code_model(PET);
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.mode = Mode::Management;
        let ctx = MapperContext::new(&model, &settings);

        let age = map_property(&ctx, "Pet", property(&model, "Pet", "age")).unwrap();
        assert_eq!(age.getter_name, "age");
        assert_eq!(age.setter_name, "withAge");
    }

    #[test]
    fn test_additional_properties_map() {
        let model = code_model(PET);
        let settings = Settings::for_namespace("com.petstore");
        let ctx = MapperContext::new(&model, &settings);

        let bag = map_additional_properties(&ctx, model.object("Bag").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(bag.name, "additionalProperties");
        assert_eq!(bag.getter_name, "getAdditionalProperties");
        assert_eq!(bag.client_type.simple_name(), "Map<String, BinaryData>");
        assert!(!bag.has_conversion());
        assert!(bag.has_setter());

        let pet = map_additional_properties(&ctx, model.object("Pet").unwrap()).unwrap();
        assert!(pet.is_none());
    }
}
