//! Type expressions used by properties, parameters and responses.
//!
//! A type expression is a short string such as `string`, `array<Pet>` or
//! `dict<array<int32>>`. Anything that is not a primitive or a composite is a
//! reference to a named schema.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive types understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    Date,
    DateTime,
    DateTimeRfc1123,
    UnixTime,
    Duration,
    Uuid,
    Url,
    Bytes,
    Base64Url,
    Binary,
    Any,
}

impl PrimitiveKind {
    /// All primitives, in declaration order.
    pub const ALL: [PrimitiveKind; 18] = [
        PrimitiveKind::String,
        PrimitiveKind::Boolean,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Decimal,
        PrimitiveKind::Date,
        PrimitiveKind::DateTime,
        PrimitiveKind::DateTimeRfc1123,
        PrimitiveKind::UnixTime,
        PrimitiveKind::Duration,
        PrimitiveKind::Uuid,
        PrimitiveKind::Url,
        PrimitiveKind::Bytes,
        PrimitiveKind::Base64Url,
        PrimitiveKind::Binary,
        PrimitiveKind::Any,
    ];

    /// The keyword used in type expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::DateTimeRfc1123 => "date-time-rfc1123",
            Self::UnixTime => "unix-time",
            Self::Duration => "duration",
            Self::Uuid => "uuid",
            Self::Url => "url",
            Self::Bytes => "bytes",
            Self::Base64Url => "base64url",
            Self::Binary => "binary",
            Self::Any => "any",
        }
    }

    /// Look up a primitive by keyword.
    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    /// Whether the primitive is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64 | Self::Decimal
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    Primitive(PrimitiveKind),
    Array(Box<TypeExpr>),
    Dict(Box<TypeExpr>),
    /// Reference to a schema by name.
    Named(String),
}

/// Error returned for malformed type expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type expression '{expr}': {reason}")]
pub struct TypeExprError {
    pub expr: String,
    pub reason: &'static str,
}

impl TypeExpr {
    /// Parse a type expression.
    pub fn parse(expr: &str) -> Result<Self, TypeExprError> {
        let err = |reason| TypeExprError {
            expr: expr.to_string(),
            reason,
        };

        let s = expr.trim();
        if s.is_empty() {
            return Err(err("type expression is empty"));
        }

        for (prefix, wrap) in [
            ("array<", TypeExpr::Array as fn(Box<TypeExpr>) -> TypeExpr),
            ("dict<", TypeExpr::Dict),
        ] {
            if let Some(rest) = s.strip_prefix(prefix) {
                let inner = rest.strip_suffix('>').ok_or_else(|| err("missing '>'"))?;
                let inner = TypeExpr::parse(inner).map_err(|e| TypeExprError {
                    expr: expr.to_string(),
                    reason: e.reason,
                })?;
                return Ok(wrap(Box::new(inner)));
            }
        }

        if let Some(primitive) = PrimitiveKind::from_keyword(s) {
            return Ok(TypeExpr::Primitive(primitive));
        }

        if s.contains(['<', '>']) {
            return Err(err("unknown generic type, expected array<T> or dict<T>"));
        }
        if !s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '$'))
        {
            return Err(err("schema references may only contain letters, digits, '_', '.' and '$'"));
        }
        if s.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(err("schema references must not start with a digit"));
        }

        Ok(TypeExpr::Named(s.to_string()))
    }

    /// The schema name for named references.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The primitive kind, if this is a primitive.
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeExpr::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Element type of an array.
    pub fn element(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Every named reference in the expression, outermost first.
    pub fn named_references(&self) -> Vec<&str> {
        match self {
            TypeExpr::Primitive(_) => Vec::new(),
            TypeExpr::Array(inner) | TypeExpr::Dict(inner) => inner.named_references(),
            TypeExpr::Named(name) => vec![name.as_str()],
        }
    }

    /// Return a copy with named references renamed through `f`.
    pub fn rename_references(&self, f: &impl Fn(&str) -> Option<String>) -> TypeExpr {
        match self {
            TypeExpr::Primitive(p) => TypeExpr::Primitive(*p),
            TypeExpr::Array(inner) => TypeExpr::Array(Box::new(inner.rename_references(f))),
            TypeExpr::Dict(inner) => TypeExpr::Dict(Box::new(inner.rename_references(f))),
            TypeExpr::Named(name) => TypeExpr::Named(f(name).unwrap_or_else(|| name.clone())),
        }
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = TypeExprError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeExpr::parse(&value)
    }
}

impl From<TypeExpr> for String {
    fn from(value: TypeExpr) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{p}"),
            TypeExpr::Array(inner) => write!(f, "array<{inner}>"),
            TypeExpr::Dict(inner) => write!(f, "dict<{inner}>"),
            TypeExpr::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!(
            TypeExpr::parse("date-time").unwrap(),
            TypeExpr::Primitive(PrimitiveKind::DateTime)
        );
        assert_eq!(
            TypeExpr::parse(" int64 ").unwrap(),
            TypeExpr::Primitive(PrimitiveKind::Int64)
        );
    }

    #[test]
    fn test_parse_nested_composites() {
        let expr = TypeExpr::parse("dict<array<Pet>>").unwrap();
        assert_eq!(
            expr,
            TypeExpr::Dict(Box::new(TypeExpr::Array(Box::new(TypeExpr::Named(
                "Pet".into()
            )))))
        );
        assert_eq!(expr.to_string(), "dict<array<Pet>>");
        assert_eq!(expr.named_references(), vec!["Pet"]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(TypeExpr::parse("").is_err());
        assert!(TypeExpr::parse("array<Pet").is_err());
        assert!(TypeExpr::parse("list<Pet>").is_err());
        assert!(TypeExpr::parse("Pet Store").is_err());
        assert!(TypeExpr::parse("1Pet").is_err());
    }

    #[test]
    fn test_error_keeps_whole_expression() {
        let err = TypeExpr::parse("array<bad name>").unwrap_err();
        assert_eq!(err.expr, "array<bad name>");
    }

    #[test]
    fn test_deserialize_via_string() {
        let expr: TypeExpr = serde_json::from_str("\"array<string>\"").unwrap();
        assert_eq!(expr.element(), Some(&TypeExpr::Primitive(PrimitiveKind::String)));

        let err = serde_json::from_str::<TypeExpr>("\"array<\"").unwrap_err();
        assert!(err.to_string().contains("invalid type expression"));
    }

    #[test]
    fn test_rename_references() {
        let expr = TypeExpr::parse("array<Error>").unwrap();
        let renamed = expr.rename_references(&|name| {
            (name == "Error").then(|| "ManagementError".to_string())
        });
        assert_eq!(renamed.to_string(), "array<ManagementError>");
    }
}
