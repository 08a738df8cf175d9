//! Models and enums of the client model.

use serde::Serialize;

use crate::{ClassType, EnumTypeRef, IType};

/// How a model or enum is used by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelUsage {
    pub input: bool,
    pub output: bool,
    pub exception: bool,
    pub merge_patch: bool,
    /// Part of the public API surface (models package rather than implementation.models).
    pub public: bool,
}

impl ModelUsage {
    /// Used only in responses.
    pub fn is_output_only(&self) -> bool {
        self.output && !self.input && !self.merge_patch
    }
}

/// The discriminator of a polymorphic hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolymorphicDiscriminator {
    /// JSON field name.
    pub serialized_name: String,
    /// Java field name.
    pub property_name: String,
    pub client_type: IType,
    /// Name of the model declaring the discriminator.
    pub declared_by: String,
}

/// A generated model class.
#[derive(Debug, Clone, Serialize)]
pub struct ClientModel {
    pub name: String,
    pub package: String,
    pub description: String,
    pub parent: Option<ClassType>,
    /// Properties declared by this model, in declaration order.
    pub properties: Vec<ClientModelProperty>,
    /// `Map<String, T>` collecting JSON fields no property declares.
    pub additional_properties: Option<ClientModelProperty>,
    pub discriminator: Option<PolymorphicDiscriminator>,
    pub discriminator_value: Option<String>,
    /// All descendants, direct children first.
    pub derived_models: Vec<ClassType>,
    pub is_polymorphic: bool,
    pub is_polymorphic_parent: bool,
    pub usage: ModelUsage,
    /// No property can be set after construction.
    pub immutable: bool,
    pub deprecated: bool,
    /// Provided by the runtime library; no class is generated.
    pub external: bool,
    pub api_versions: Vec<String>,
}

impl ClientModel {
    pub fn class_type(&self) -> ClassType {
        ClassType::new(&self.package, &self.name)
    }

    pub fn as_type(&self) -> IType {
        IType::Model(self.class_type())
    }

    pub fn property(&self, name: &str) -> Option<&ClientModelProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_by_serialized_name(&self, serialized: &str) -> Option<&ClientModelProperty> {
        self.properties
            .iter()
            .find(|p| p.serialized_name == serialized)
    }

    /// The property holding this model's discriminator value, when declared here.
    pub fn discriminator_property(&self) -> Option<&ClientModelProperty> {
        self.properties.iter().find(|p| p.is_discriminator)
    }

    pub fn is_merge_patch(&self) -> bool {
        self.usage.merge_patch
    }
}

/// A property of a generated model.
#[derive(Debug, Clone, Serialize)]
pub struct ClientModelProperty {
    /// Java field name.
    pub name: String,
    pub serialized_name: String,
    /// Type stored in the field and written to JSON.
    pub wire_type: IType,
    /// Type exposed by the getter and setter.
    pub client_type: IType,
    pub required: bool,
    pub read_only: bool,
    pub nullable: bool,
    pub constant_value: Option<String>,
    pub default_value: Option<String>,
    pub is_discriminator: bool,
    /// Passed to the model constructor.
    pub in_constructor: bool,
    pub description: String,
    pub getter_name: String,
    pub setter_name: String,
    pub api_versions: Vec<String>,
    pub deprecated: bool,
}

impl ClientModelProperty {
    /// Whether a public setter is generated for the property.
    pub fn has_setter(&self) -> bool {
        !self.read_only
            && !self.in_constructor
            && !self.is_discriminator
            && self.constant_value.is_none()
    }

    pub fn has_conversion(&self) -> bool {
        self.wire_type != self.client_type
    }
}

/// A generated enum.
#[derive(Debug, Clone, Serialize)]
pub struct EnumType {
    pub name: String,
    pub package: String,
    pub description: String,
    pub element_type: IType,
    pub values: Vec<ClientEnumValue>,
    /// Open set of values.
    pub expandable: bool,
    pub usage: ModelUsage,
    pub from_method: String,
    pub to_method: String,
}

impl EnumType {
    pub fn class_type(&self) -> ClassType {
        ClassType::new(&self.package, &self.name)
    }

    pub fn as_type(&self) -> IType {
        IType::Enum(EnumTypeRef {
            class: self.class_type(),
            value_type: Box::new(self.element_type.clone()),
            expandable: self.expandable,
            from_method: self.from_method.clone(),
            to_method: self.to_method.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientEnumValue {
    pub name: String,
    pub value: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str) -> ClientModelProperty {
        ClientModelProperty {
            name: name.into(),
            serialized_name: name.into(),
            wire_type: IType::string(),
            client_type: IType::string(),
            required: false,
            read_only: false,
            nullable: false,
            constant_value: None,
            default_value: None,
            is_discriminator: false,
            in_constructor: false,
            description: String::new(),
            getter_name: String::new(),
            setter_name: String::new(),
            api_versions: Vec::new(),
            deprecated: false,
        }
    }

    #[test]
    fn test_has_setter() {
        let mut p = property("name");
        assert!(p.has_setter());
        p.in_constructor = true;
        assert!(!p.has_setter());

        let mut p = property("kind");
        p.is_discriminator = true;
        assert!(!p.has_setter());

        let mut p = property("id");
        p.read_only = true;
        assert!(!p.has_setter());
    }

    #[test]
    fn test_output_only_usage() {
        let usage = ModelUsage {
            output: true,
            ..Default::default()
        };
        assert!(usage.is_output_only());
        let usage = ModelUsage {
            output: true,
            input: true,
            ..Default::default()
        };
        assert!(!usage.is_output_only());
    }

    #[test]
    fn test_enum_as_type() {
        let e = EnumType {
            name: "Color".into(),
            package: "com.petstore.models".into(),
            description: String::new(),
            element_type: IType::string(),
            values: vec![],
            expandable: false,
            usage: ModelUsage::default(),
            from_method: "fromString".into(),
            to_method: "toString".into(),
        };
        let ty = e.as_type();
        assert_eq!(ty.simple_name(), "Color");
        assert_eq!(ty.as_enum().unwrap().from_method, "fromString");
    }
}
