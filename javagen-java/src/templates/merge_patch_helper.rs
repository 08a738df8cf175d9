//! The helper giving merge-patch models access to each other's state.

use javagen_codemodel::Settings;
use javagen_ir::{ClientModel, ClientModels};

use super::model::{MERGE_PATCH_HELPER, accessor_setters, has_merge_patch_accessor};
use crate::ast::{
    JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc, JavaMethod, JavaModifiers,
};

/// Renders `JsonMergePatchHelper` in the implementation package.
///
/// Each merge-patch root or polymorphic parent registers an accessor from a
/// static initializer; serializers of other models reach its package-private
/// state through it.
pub struct JsonMergePatchHelperTemplate<'a> {
    settings: &'a Settings,
    models: &'a ClientModels,
}

fn accessor_field(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}Accessor", first.to_ascii_lowercase(), chars.as_str()),
        None => "accessor".to_string(),
    }
}

impl<'a> JsonMergePatchHelperTemplate<'a> {
    pub fn new(settings: &'a Settings, models: &'a ClientModels) -> Self {
        Self { settings, models }
    }

    /// Models registering an accessor; empty when no helper is needed.
    pub fn accessor_models(&self) -> Vec<&'a ClientModel> {
        self.models
            .generated_models()
            .filter(|m| has_merge_patch_accessor(m))
            .collect()
    }

    pub fn render(&self) -> JavaFile {
        let mut ctx = JavaContext::new(self.settings, self.settings.implementation_package());
        let mut class = JavaClass::class(JavaModifiers::PUBLIC, MERGE_PATCH_HELPER)
            .javadoc(JavaJavadoc::new("This is the Helper class to enable json merge patch serialization for a model."));

        for model in self.accessor_models() {
            let name = &model.name;
            let accessor = format!("{name}Accessor");
            let field = accessor_field(name);
            let model_type = ctx.use_class(&model.class_type());

            class.add_field(JavaField::new(
                JavaModifiers::PRIVATE | JavaModifiers::STATIC,
                &accessor,
                &field,
            ));

            let mut interface = JavaClass::interface(JavaModifiers::PUBLIC, &accessor);
            if model.parent.is_none() {
                interface.add_method(
                    JavaMethod::new(JavaModifiers::NONE, &model_type, "prepareModelForJsonMergePatch")
                        .param(format!("{model_type} model"))
                        .param("boolean jsonMergePatchEnabled"),
                );
                interface.add_method(
                    JavaMethod::new(JavaModifiers::NONE, "boolean", "isJsonMergePatch")
                        .param(format!("{model_type} model")),
                );
            }
            for property in accessor_setters(model) {
                let ty = ctx.use_type(&property.client_type);
                interface.add_method(
                    JavaMethod::new(JavaModifiers::NONE, "void", &property.setter_name)
                        .param(format!("{model_type} model"))
                        .param(format!("{ty} {}", property.name)),
                );
            }
            class.add_nested(interface);

            class.add_method(
                JavaMethod::new(
                    JavaModifiers::PUBLIC | JavaModifiers::STATIC,
                    "void",
                    format!("set{accessor}"),
                )
                .param(format!("{accessor} accessor"))
                .body(JavaBlock::new().line(format!("{field} = accessor;"))),
            );
            class.add_method(
                JavaMethod::new(
                    JavaModifiers::PUBLIC | JavaModifiers::STATIC,
                    &accessor,
                    format!("get{accessor}"),
                )
                .body(JavaBlock::new().line(format!("return {field};"))),
            );
        }

        ctx.into_file(MERGE_PATCH_HELPER).add(class)
    }
}

#[cfg(test)]
mod tests {
    use javagen_ir::{ClassType, ClientModelProperty, IType, ModelUsage};

    use super::*;

    fn model(name: &str, parent: Option<&str>, derived: &[&str]) -> ClientModel {
        ClientModel {
            name: name.into(),
            package: "com.petstore.models".into(),
            description: String::new(),
            parent: parent.map(|p| ClassType::new("com.petstore.models", p)),
            properties: vec![ClientModelProperty {
                name: "name".into(),
                serialized_name: "name".into(),
                wire_type: IType::string(),
                client_type: IType::string(),
                required: false,
                read_only: false,
                nullable: true,
                constant_value: None,
                default_value: None,
                is_discriminator: false,
                in_constructor: false,
                description: String::new(),
                getter_name: "getName".into(),
                setter_name: "setName".into(),
                api_versions: vec![],
                deprecated: false,
            }],
            additional_properties: None,
            discriminator: None,
            discriminator_value: None,
            derived_models: derived
                .iter()
                .map(|d| ClassType::new("com.petstore.models", *d))
                .collect(),
            is_polymorphic: !derived.is_empty() || parent.is_some(),
            is_polymorphic_parent: !derived.is_empty(),
            usage: ModelUsage {
                input: true,
                merge_patch: true,
                public: true,
                ..ModelUsage::default()
            },
            immutable: false,
            deprecated: false,
            external: false,
            api_versions: vec![],
        }
    }

    #[test]
    fn test_helper_accessors() {
        let settings = Settings::for_namespace("com.petstore");
        let models = ClientModels {
            namespace: "com.petstore".into(),
            models: vec![
                model("Animal", None, &["Dog"]),
                model("Dog", Some("Animal"), &[]),
            ],
            ..ClientModels::default()
        };
        let template = JsonMergePatchHelperTemplate::new(&settings, &models);
        let names: Vec<&str> = template.accessor_models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Animal"]);

        let file = template.render();
        assert_eq!(
            file.path(),
            "src/main/java/com/petstore/implementation/JsonMergePatchHelper.java"
        );
        let java = file.render();
        assert!(java.contains("    private static AnimalAccessor animalAccessor;"));
        assert!(java.contains("        Animal prepareModelForJsonMergePatch(Animal model, boolean jsonMergePatchEnabled);"));
        assert!(java.contains("        void setName(Animal model, String name);"));
        assert!(java.contains("    public static void setAnimalAccessor(AnimalAccessor accessor) {\n        animalAccessor = accessor;\n    }"));
        assert!(java.contains("import com.petstore.models.Animal;"));
    }
}
