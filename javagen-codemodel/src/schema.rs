//! Schema definitions of the code model.

use serde::Deserialize;

use crate::TypeExpr;

/// All schemas of a code model, grouped by kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Schemas {
    pub objects: Vec<ObjectSchema>,
    /// Expandable (open) enums.
    pub choices: Vec<ChoiceSchema>,
    /// Fixed enums.
    pub sealed_choices: Vec<ChoiceSchema>,
    pub constants: Vec<ConstantSchema>,
    pub unions: Vec<UnionSchema>,
}

/// How a schema is used by the operations of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Usage {
    Input,
    Output,
    Exception,
    JsonMergePatch,
    Internal,
    Public,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Namespace override for the generated class.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Serialized name of the discriminator property declared by this schema.
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub discriminator_value: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Value type of JSON fields not declared as properties.
    #[serde(default)]
    pub additional_properties: Option<TypeExpr>,
    #[serde(default)]
    pub usage: Vec<Usage>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub api_versions: Vec<String>,
}

impl ObjectSchema {
    pub fn has_usage(&self, usage: Usage) -> bool {
        self.usage.contains(&usage)
    }

    /// Find a declared property by serialized name.
    pub fn property(&self, serialized_name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.serialized_name() == serialized_name)
    }

    /// Type expressions of the declared properties, then of the additional properties.
    pub fn field_types(&self) -> impl Iterator<Item = &TypeExpr> {
        self.properties
            .iter()
            .map(|p| &p.schema)
            .chain(self.additional_properties.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Property {
    pub name: String,
    /// Name on the wire; defaults to `name`.
    #[serde(default)]
    pub serialized_name: Option<String>,
    pub schema: TypeExpr,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client_default_value: Option<String>,
    #[serde(default)]
    pub api_versions: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Property {
    pub fn serialized_name(&self) -> &str {
        self.serialized_name.as_deref().unwrap_or(&self.name)
    }
}

/// An enum schema. Whether it is expandable depends on which list holds it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChoiceSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_choice_type")]
    pub choice_type: TypeExpr,
    pub choices: Vec<ChoiceValue>,
    #[serde(default)]
    pub usage: Vec<Usage>,
}

fn default_choice_type() -> TypeExpr {
    TypeExpr::Primitive(crate::PrimitiveKind::String)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceValue {
    pub name: String,
    /// Wire value. Numbers are kept in their textual form.
    #[serde(deserialize_with = "deserialize_scalar")]
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConstantSchema {
    pub name: String,
    pub value_type: TypeExpr,
    #[serde(deserialize_with = "deserialize_scalar")]
    pub value: String,
}

/// A union of types, surfaced as raw binary data.
#[derive(Debug, Clone, Deserialize)]
pub struct UnionSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub variants: Vec<TypeExpr>,
}

/// Accept strings, numbers and booleans and keep their textual form.
pub(crate) fn deserialize_scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Str(s) => s,
    })
}

/// A borrowed schema of any kind.
#[derive(Debug, Clone, Copy)]
pub enum SchemaRef<'a> {
    Object(&'a ObjectSchema),
    Choice(&'a ChoiceSchema),
    SealedChoice(&'a ChoiceSchema),
    Constant(&'a ConstantSchema),
    Union(&'a UnionSchema),
}

impl<'a> SchemaRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            SchemaRef::Object(s) => &s.name,
            SchemaRef::Choice(s) | SchemaRef::SealedChoice(s) => &s.name,
            SchemaRef::Constant(s) => &s.name,
            SchemaRef::Union(s) => &s.name,
        }
    }

    /// Short label for the schema kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaRef::Object(_) => "object",
            SchemaRef::Choice(_) => "choice",
            SchemaRef::SealedChoice(_) => "sealed choice",
            SchemaRef::Constant(_) => "constant",
            SchemaRef::Union(_) => "union",
        }
    }
}

impl Schemas {
    /// Iterate over every schema.
    pub fn iter(&self) -> impl Iterator<Item = SchemaRef<'_>> {
        self.objects
            .iter()
            .map(SchemaRef::Object)
            .chain(self.choices.iter().map(SchemaRef::Choice))
            .chain(self.sealed_choices.iter().map(SchemaRef::SealedChoice))
            .chain(self.constants.iter().map(SchemaRef::Constant))
            .chain(self.unions.iter().map(SchemaRef::Union))
    }

    pub fn object(&self, name: &str) -> Option<&ObjectSchema> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut ObjectSchema> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
            + self.choices.len()
            + self.sealed_choices.len()
            + self.constants.len()
            + self.unions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
