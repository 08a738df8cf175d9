//! Mappers from the code model to the client model.
//!
//! The mappers resolve every schema to a Java class, every operation to a
//! proxy method plus its client methods, and every client to a service
//! client with its method groups. They read the code model and never
//! mutate it.

mod client_method;
mod discriminator;
mod enums;
mod merge_patch;
mod model;
mod paging;
mod polling;
mod property;
mod proxy;
mod service_client;
mod types;
mod version;

use std::collections::BTreeSet;

use eyre::{Result, eyre};
use javagen_codemodel::{CodeModel, ObjectSchema, Settings, Usage};
use javagen_core::naming::get_type_name;
use javagen_ir::{ClassType, ClientModels, ModelUsage, PackageInfo};

pub use types::MappedType;

use crate::{fluent, pipeline::Diagnostic, runtime::Runtime};

/// Namespaces whose classes ship with a client runtime and are never generated.
const RUNTIME_NAMESPACES: [&str; 2] = ["com.azure.", "io.clientcore."];

/// Shared state of one mapping run.
pub struct MapperContext<'a> {
    pub code_model: &'a CodeModel,
    pub settings: &'a Settings,
    pub runtime: Runtime,
    merge_patch: BTreeSet<String>,
    /// Models renamed with the `Inner` suffix (management only).
    inner_models: BTreeSet<String>,
    /// Page models moved to the implementation package (management only).
    page_models: BTreeSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> MapperContext<'a> {
    pub fn new(code_model: &'a CodeModel, settings: &'a Settings) -> Self {
        let (inner_models, page_models) = if settings.is_management() {
            (
                fluent::inner_models(code_model),
                fluent::page_models(code_model),
            )
        } else {
            Default::default()
        };

        Self {
            code_model,
            settings,
            runtime: Runtime::new(settings.flavor()),
            merge_patch: merge_patch::collect(code_model),
            inner_models,
            page_models,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_management(&self) -> bool {
        self.settings.is_management()
    }

    pub fn is_merge_patch(&self, name: &str) -> bool {
        self.merge_patch.contains(name)
    }

    /// Java class names of the merge-patch models, `Inner` suffix included.
    pub fn merge_patch_classes(&self) -> Vec<String> {
        self.merge_patch
            .iter()
            .filter_map(|name| self.code_model.object(name))
            .map(|object| self.model_class(object).name)
            .collect()
    }

    /// Whether the object is a runtime class that is referenced, not generated.
    pub fn is_external(&self, object: &ObjectSchema) -> bool {
        object
            .namespace
            .as_deref()
            .is_some_and(|ns| RUNTIME_NAMESPACES.iter().any(|prefix| ns.starts_with(prefix)))
    }

    /// Package of a model or enum with the given name and usage.
    fn package_for(&self, name: &str, namespace: Option<&str>, usage: &[Usage]) -> String {
        if let Some(namespace) = namespace {
            namespace.to_string()
        } else if self.inner_models.contains(name) {
            self.settings.fluent_models_package()
        } else if usage.contains(&Usage::Internal) || self.page_models.contains(name) {
            self.settings.implementation_models_package()
        } else {
            self.settings.models_package()
        }
    }

    /// Java class of an object schema.
    pub fn model_class(&self, object: &ObjectSchema) -> ClassType {
        if self.is_external(object) {
            return ClassType::new(object.namespace.as_deref().unwrap_or_default(), &object.name);
        }
        let mut name = get_type_name(&object.name);
        if self.inner_models.contains(&object.name) {
            name = fluent::inner_name(&name);
        }
        ClassType::new(
            self.package_for(&object.name, object.namespace.as_deref(), &object.usage),
            name,
        )
    }

    /// Java class of the object schema with the given name.
    pub fn model_class_by_name(&self, name: &str) -> Result<ClassType> {
        self.code_model
            .object(name)
            .map(|object| self.model_class(object))
            .ok_or_else(|| eyre!("unknown object schema '{name}'"))
    }

    pub fn usage_of(&self, name: &str, usage: &[Usage]) -> ModelUsage {
        ModelUsage {
            input: usage.contains(&Usage::Input),
            output: usage.contains(&Usage::Output),
            exception: usage.contains(&Usage::Exception),
            merge_patch: self.is_merge_patch(name),
            public: !usage.contains(&Usage::Internal),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning("map", message).at(location));
    }
}

/// Map a code model to the client model.
///
/// Returns the client model and the diagnostics raised while mapping.
///
/// # Errors
///
/// Fails on references the code model cannot resolve.
pub fn map_client_models(
    code_model: &CodeModel,
    settings: &Settings,
) -> Result<(ClientModels, Vec<Diagnostic>)> {
    let mut ctx = MapperContext::new(code_model, settings);

    let enums = enums::map_enums(&ctx)?;
    let models = code_model
        .schemas
        .objects
        .iter()
        .map(|object| model::map_model(&ctx, object))
        .collect::<Result<Vec<_>>>()?;
    let union_types = code_model
        .schemas
        .unions
        .iter()
        .map(|u| u.name.clone())
        .collect();

    let mut service_clients = Vec::new();
    for client in service_client::clients_of(code_model, settings) {
        service_clients.push(service_client::map_service_client(&mut ctx, &client)?);
    }

    let manager = if settings.is_management() {
        service_clients
            .first()
            .map(|client| fluent::map_manager(settings, client))
    } else {
        None
    };

    let mut client_models = ClientModels {
        namespace: settings.namespace().to_string(),
        models,
        enums,
        union_types,
        service_clients,
        merge_patch_models: ctx.merge_patch_classes(),
        packages: Vec::new(),
        manager,
    };
    client_models.packages = packages_of(&client_models, settings);

    tracing::debug!(
        models = client_models.models.len(),
        enums = client_models.enums.len(),
        clients = client_models.service_clients.len(),
        "mapped client model"
    );
    Ok((client_models, ctx.diagnostics))
}

/// Every package holding at least one generated class, with its description.
fn packages_of(client_models: &ClientModels, settings: &Settings) -> Vec<PackageInfo> {
    let title = settings
        .generator
        .service_name
        .clone()
        .or_else(|| {
            client_models
                .service_clients
                .first()
                .map(|c| c.service_name.clone())
        })
        .unwrap_or_else(|| settings.namespace().to_string());

    let mut packages: BTreeSet<String> = BTreeSet::new();
    packages.extend(client_models.generated_models().map(|m| m.package.clone()));
    packages.extend(client_models.enums.iter().map(|e| e.package.clone()));
    for client in &client_models.service_clients {
        packages.insert(client.package.clone());
        packages.insert(client.client_package.clone());
        packages.extend(client.method_groups.iter().map(|g| g.package.clone()));
        if let Some(version) = &client.service_version {
            packages.insert(version.package.clone());
        }
    }
    if let Some(manager) = &client_models.manager {
        packages.insert(manager.package.clone());
        packages.insert(manager.client_interface.package.clone());
    }
    if !client_models.merge_patch_models.is_empty() {
        packages.insert(settings.implementation_package());
    }

    packages
        .into_iter()
        .map(|name| {
            let description = if name == settings.models_package()
                || name == settings.fluent_models_package()
            {
                format!("Package containing the data models for {title}.")
            } else if name.starts_with(&settings.implementation_package()) {
                format!("Package containing the implementations for {title}.")
            } else if name == settings.fluent_package() {
                format!("Package containing the service clients for {title}.")
            } else {
                format!("Package containing the classes for {title}.")
            };
            PackageInfo { name, description }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    pub(crate) fn code_model(src: &str) -> CodeModel {
        CodeModel::from_str(src).expect("code model should parse")
    }

    #[test]
    fn test_model_packages() {
        let model = code_model(
            r#"
schemas:
  objects:
    - name: pet
      usage: [input]
    - name: PetPage
      usage: [output, internal]
    - name: Money
      namespace: com.shared.money
"#,
        );
        let settings = Settings::for_namespace("com.petstore");
        let ctx = MapperContext::new(&model, &settings);

        assert_eq!(
            ctx.model_class_by_name("pet").unwrap().full_name(),
            "com.petstore.models.Pet"
        );
        assert_eq!(
            ctx.model_class_by_name("PetPage").unwrap().full_name(),
            "com.petstore.implementation.models.PetPage"
        );
        assert_eq!(
            ctx.model_class_by_name("Money").unwrap().full_name(),
            "com.shared.money.Money"
        );
        assert!(ctx.model_class_by_name("Missing").is_err());
    }

    #[test]
    fn test_runtime_classes_are_external() {
        let model = code_model(
            r#"
schemas:
  objects:
    - name: ManagementError
      namespace: com.azure.core.management.exception
"#,
        );
        let settings = Settings::for_namespace("com.petstore");
        let ctx = MapperContext::new(&model, &settings);
        let object = model.object("ManagementError").unwrap();

        assert!(ctx.is_external(object));
        assert_eq!(
            ctx.model_class(object).full_name(),
            "com.azure.core.management.exception.ManagementError"
        );
    }

    #[test]
    fn test_merge_patch_classes_follow_inner_rename() {
        let model = code_model(
            r#"
schemas:
  objects:
    - name: Widget
      usage: [json-merge-patch]
      properties:
        - name: color
          schema: string
operation-groups:
  - name: Widgets
    operations:
      - name: get
        request:
          method: get
          path: /widgets/{name}
        responses:
          - status-codes: [200]
            schema: Widget
"#,
        );
        let mut settings = Settings::for_namespace("com.contoso.widgets");
        assert_eq!(
            MapperContext::new(&model, &settings).merge_patch_classes(),
            vec!["Widget"]
        );

        settings.generator.mode = javagen_codemodel::Mode::Management;
        assert_eq!(
            MapperContext::new(&model, &settings).merge_patch_classes(),
            vec!["WidgetInner"]
        );
    }

    #[test]
    fn test_map_client_models_packages() {
        let model = code_model(
            r#"
schemas:
  objects:
    - name: Pet
      usage: [input, output]
      properties:
        - name: name
          schema: string
operation-groups:
  - name: Pets
    operations:
      - name: get
        request:
          method: get
          path: /pets
        responses:
          - status-codes: [200]
            schema: Pet
clients:
  - name: PetStoreClient
"#,
        );
        let settings = Settings::for_namespace("com.petstore");
        let (models, diagnostics) = map_client_models(&model, &settings).unwrap();

        assert!(diagnostics.is_empty());
        let names: Vec<_> = models.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "com.petstore",
                "com.petstore.implementation",
                "com.petstore.models"
            ]
        );
        assert_eq!(
            models.packages[2].description,
            "Package containing the data models for PetStore."
        );
    }
}
