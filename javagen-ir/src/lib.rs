//! Client model types for the javagen Java client generator.
//!
//! The client model is what the templates render: Java-shaped models, enums,
//! proxy interfaces and service clients, resolved from the code model by the
//! mappers.
//!
//! # Architecture
//!
//! ```text
//! code model (YAML/JSON) → javagen-codemodel → mappers → javagen-ir → templates
//! ```
//!
//! The types are plain data. They carry no reference to the code model and
//! serialize to JSON for pipeline snapshots.

mod client;
mod method;
mod model;
mod types;

use std::collections::HashSet;

pub use client::{
    CredentialKind, FluentManager, MethodGroupClient, Proxy, PublicClient, SecurityInfo,
    ServiceClient, ServiceClientProperty, ServiceVersion, ServiceVersionEntry,
};
pub use method::{
    ClientMethod, ClientMethodParameter, ClientMethodType, ContinuationTokenDetails,
    MergePatchAccessor, MultipartPart, MultipartPartKind, PagingDetails, PollingDetails, ProxyMethod,
    ProxyMethodParameter, RequestParameterLocation, UnexpectedException,
};
pub use model::{
    ClientEnumValue, ClientModel, ClientModelProperty, EnumType, ModelUsage,
    PolymorphicDiscriminator,
};
use serde::Serialize;
pub use types::{ClassType, EnumTypeRef, IType, PrimitiveType, quote};

/// Class in the implementation package giving merge-patch models access to
/// each other's serialization state.
pub const JSON_MERGE_PATCH_HELPER: &str = "JsonMergePatchHelper";

/// Class in the implementation package writing `multipart/form-data` bodies.
pub const MULTIPART_FORM_DATA_HELPER: &str = "MultipartFormDataHelper";

/// A Java package with its `package-info.java` description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub description: String,
}

/// Root of the client model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientModels {
    pub namespace: String,
    pub models: Vec<ClientModel>,
    pub enums: Vec<EnumType>,
    /// Unions, all surfaced as `BinaryData`.
    pub union_types: Vec<String>,
    pub service_clients: Vec<ServiceClient>,
    /// Names of the models taking part in JSON merge patch.
    pub merge_patch_models: Vec<String>,
    pub packages: Vec<PackageInfo>,
    pub manager: Option<FluentManager>,
}

impl ClientModels {
    pub fn model(&self, name: &str) -> Option<&ClientModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Models that are rendered to source files.
    pub fn generated_models(&self) -> impl Iterator<Item = &ClientModel> {
        self.models.iter().filter(|m| !m.external)
    }

    /// Ancestors of `model`, nearest first. Stops at external or unknown parents.
    pub fn ancestors(&self, model: &ClientModel) -> Vec<&ClientModel> {
        let mut out: Vec<&ClientModel> = Vec::new();
        let mut seen = HashSet::from([model.name.as_str()]);
        let mut current = model.parent.as_ref();

        while let Some(parent) = current {
            if !seen.insert(parent.name.as_str()) {
                break;
            }
            let Some(found) = self.model(&parent.name) else {
                break;
            };
            out.push(found);
            current = found.parent.as_ref();
        }
        out
    }

    /// Properties inherited from ancestors, root first. Discriminators
    /// redeclared by `model` are skipped.
    pub fn inherited_properties(&self, model: &ClientModel) -> Vec<&ClientModelProperty> {
        let own: HashSet<&str> = model
            .properties
            .iter()
            .map(|p| p.serialized_name.as_str())
            .collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for ancestor in self.ancestors(model).into_iter().rev() {
            for property in &ancestor.properties {
                let name = property.serialized_name.as_str();
                if !own.contains(name) && seen.insert(name) {
                    out.push(property);
                }
            }
        }
        out
    }

    /// Constructor arguments of `model`: inherited ones root first, then its own.
    pub fn constructor_properties<'a>(
        &'a self,
        model: &'a ClientModel,
    ) -> Vec<&'a ClientModelProperty> {
        self.inherited_properties(model)
            .into_iter()
            .chain(model.properties.iter())
            .filter(|p| p.in_constructor)
            .collect()
    }

    /// The additional properties `model` declares or inherits, with the declaring model.
    pub fn additional_properties<'a>(
        &'a self,
        model: &'a ClientModel,
    ) -> Option<(&'a ClientModel, &'a ClientModelProperty)> {
        std::iter::once(model)
            .chain(self.ancestors(model))
            .find_map(|m| m.additional_properties.as_ref().map(|p| (m, p)))
    }

    /// The root of the polymorphic hierarchy `model` belongs to.
    pub fn polymorphic_root<'a>(&'a self, model: &'a ClientModel) -> &'a ClientModel {
        self.ancestors(model).last().copied().unwrap_or(model)
    }

    /// Every method group of every service client.
    pub fn method_groups(&self) -> impl Iterator<Item = &MethodGroupClient> {
        self.service_clients
            .iter()
            .flat_map(|c| c.method_groups.iter())
    }

    pub fn is_merge_patch(&self, name: &str) -> bool {
        self.merge_patch_models.iter().any(|m| m == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, in_constructor: bool) -> ClientModelProperty {
        ClientModelProperty {
            name: name.into(),
            serialized_name: name.into(),
            wire_type: IType::string(),
            client_type: IType::string(),
            required: in_constructor,
            read_only: false,
            nullable: false,
            constant_value: None,
            default_value: None,
            is_discriminator: false,
            in_constructor,
            description: String::new(),
            getter_name: String::new(),
            setter_name: String::new(),
            api_versions: Vec::new(),
            deprecated: false,
        }
    }

    fn model(name: &str, parent: Option<&str>, properties: Vec<ClientModelProperty>) -> ClientModel {
        ClientModel {
            name: name.into(),
            package: "com.fish.models".into(),
            description: String::new(),
            parent: parent.map(|p| ClassType::new("com.fish.models", p)),
            properties,
            additional_properties: None,
            discriminator: None,
            discriminator_value: None,
            derived_models: Vec::new(),
            is_polymorphic: false,
            is_polymorphic_parent: false,
            usage: ModelUsage::default(),
            immutable: false,
            deprecated: false,
            external: false,
            api_versions: Vec::new(),
        }
    }

    fn fish() -> ClientModels {
        ClientModels {
            models: vec![
                model("Fish", None, vec![property("age", true), property("kind", false)]),
                model("Shark", Some("Fish"), vec![property("birthday", true), property("kind", false)]),
                model("Sawshark", Some("Shark"), vec![property("teeth", false)]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let models = fish();
        let sawshark = models.model("Sawshark").unwrap();
        let names: Vec<_> = models
            .ancestors(sawshark)
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Shark", "Fish"]);
        assert_eq!(models.polymorphic_root(sawshark).name, "Fish");
    }

    #[test]
    fn test_inherited_properties_skip_redeclared() {
        let models = fish();
        let shark = models.model("Shark").unwrap();
        let names: Vec<_> = models
            .inherited_properties(shark)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["age"]);
    }

    #[test]
    fn test_constructor_properties_root_first() {
        let models = fish();
        let sawshark = models.model("Sawshark").unwrap();
        let names: Vec<_> = models
            .constructor_properties(sawshark)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["age", "birthday"]);
    }

    #[test]
    fn test_additional_properties_inherited() {
        let mut models = fish();
        let mut extra = property("additionalProperties", false);
        extra.wire_type = IType::map(IType::object());
        extra.client_type = IType::map(IType::object());
        models.models[1].additional_properties = Some(extra);

        let sawshark = models.model("Sawshark").unwrap();
        let (declared_by, property) = models.additional_properties(sawshark).unwrap();
        assert_eq!(declared_by.name, "Shark");
        assert_eq!(property.wire_type.simple_name(), "Map<String, Object>");
        assert!(models.additional_properties(models.model("Fish").unwrap()).is_none());
    }
}
