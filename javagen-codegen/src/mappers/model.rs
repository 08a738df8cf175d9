use eyre::{Result, WrapErr};
use javagen_codemodel::ObjectSchema;
use javagen_ir::ClientModel;

use super::{
    MapperContext, discriminator,
    property::{map_additional_properties, map_property},
};

/// Map an object schema to a model class.
pub fn map_model(ctx: &MapperContext<'_>, object: &ObjectSchema) -> Result<ClientModel> {
    let class = ctx.model_class(object);
    let usage = ctx.usage_of(&object.name, &object.usage);

    let parent = object
        .parent
        .as_deref()
        .map(|parent| ctx.model_class_by_name(parent))
        .transpose()
        .wrap_err_with(|| format!("failed to resolve the parent of '{}'", object.name))?;

    let discriminators = discriminator::discriminator_names(ctx, object);
    let mut properties = discriminator::discriminator_properties(ctx, object)?;
    for property in &object.properties {
        if discriminators.contains(&property.serialized_name()) {
            continue;
        }
        properties.push(map_property(ctx, &object.name, property)?);
    }

    let additional_properties = map_additional_properties(ctx, object)?;

    let is_polymorphic = discriminator::is_polymorphic(ctx, object);
    let derived_models: Vec<_> = ctx
        .code_model
        .descendants_of(&object.name)
        .into_iter()
        .map(|child| ctx.model_class(child))
        .collect();

    Ok(ClientModel {
        description: object
            .description
            .clone()
            .or_else(|| object.summary.clone())
            .unwrap_or_else(|| format!("The {} model.", class.name)),
        discriminator: discriminator::discriminator_of(ctx, object)?,
        discriminator_value: is_polymorphic.then(|| discriminator::value_of(object)),
        is_polymorphic_parent: is_polymorphic && !derived_models.is_empty(),
        immutable: !usage.input && !usage.merge_patch && (usage.output || usage.exception),
        external: ctx.is_external(object),
        deprecated: object.deprecated,
        api_versions: object.api_versions.clone(),
        name: class.name,
        package: class.package,
        parent,
        properties,
        additional_properties,
        derived_models,
        is_polymorphic,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::Settings;

    use super::*;
    use crate::mappers::tests::code_model;

    const MODELS: &str = r#"
schemas:
  objects:
    - name: Fish
      description: A fish.
      discriminator: kind
      usage: [input, output]
      properties:
        - name: kind
          schema: string
          required: true
        - name: age
          schema: int32
          required: true
    - name: Shark
      parent: Fish
      discriminator-value: shark
      usage: [input, output]
      properties:
        - name: birthday
          schema: date-time
          required: true
    - name: Report
      summary: A report.
      usage: [output]
      properties:
        - name: total
          schema: int64
    - name: Owner
"#;

    #[test]
    fn test_polymorphic_root() {
        let model = code_model(MODELS);
        let settings = Settings::for_namespace("com.fish");
        let ctx = MapperContext::new(&model, &settings);
        let fish = map_model(&ctx, model.object("Fish").unwrap()).unwrap();

        assert!(fish.is_polymorphic);
        assert!(fish.is_polymorphic_parent);
        assert_eq!(fish.discriminator_value.as_deref(), Some("Fish"));
        assert_eq!(fish.derived_models[0].full_name(), "com.fish.models.Shark");
        let names: Vec<_> = fish.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["kind", "age"]);
        assert!(!fish.immutable);
    }

    #[test]
    fn test_child_redeclares_discriminator() {
        let model = code_model(MODELS);
        let settings = Settings::for_namespace("com.fish");
        let ctx = MapperContext::new(&model, &settings);
        let shark = map_model(&ctx, model.object("Shark").unwrap()).unwrap();

        assert_eq!(shark.parent.as_ref().unwrap().name, "Fish");
        assert!(!shark.is_polymorphic_parent);
        assert_eq!(shark.discriminator_value.as_deref(), Some("shark"));
        let kind = shark.discriminator_property().unwrap();
        assert_eq!(kind.default_value.as_deref(), Some("\"shark\""));
        assert_eq!(shark.description, "The Shark model.");
    }

    #[test]
    fn test_output_only_is_immutable() {
        let model = code_model(MODELS);
        let settings = Settings::for_namespace("com.fish");
        let ctx = MapperContext::new(&model, &settings);

        let report = map_model(&ctx, model.object("Report").unwrap()).unwrap();
        assert!(report.immutable);
        assert_eq!(report.description, "A report.");
        assert!(report.discriminator_value.is_none());

        let owner = map_model(&ctx, model.object("Owner").unwrap()).unwrap();
        assert!(!owner.immutable);
    }
}
