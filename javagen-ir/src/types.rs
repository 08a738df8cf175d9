//! Java types referenced by the client model.
//!
//! Besides naming and imports, an [`IType`] knows how a value of that type is
//! written to a `JsonWriter` and read back from a `JsonReader`, which is all
//! the stream-style serialization templates need.

use std::{collections::BTreeSet, fmt};

use serde::Serialize;

/// Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Void,
    Boolean,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Name of the `java.lang` wrapper class.
    pub fn boxed_name(&self) -> &'static str {
        match self {
            PrimitiveType::Void => "Void",
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Int => "Integer",
            PrimitiveType::Long => "Long",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
        }
    }

    fn from_boxed_name(name: &str) -> Option<Self> {
        [
            PrimitiveType::Void,
            PrimitiveType::Boolean,
            PrimitiveType::Int,
            PrimitiveType::Long,
            PrimitiveType::Float,
            PrimitiveType::Double,
        ]
        .into_iter()
        .find(|p| p.boxed_name() == name)
    }

    /// Suffix of the `JsonWriter`/`JsonReader` methods for this primitive.
    fn json_suffix(&self) -> &'static str {
        match self {
            PrimitiveType::Void => "Null",
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Int => "Int",
            PrimitiveType::Long => "Long",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
        }
    }
}

/// A named Java class, possibly generic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassType {
    pub package: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generic_args: Vec<IType>,
}

impl ClassType {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn java_lang(name: impl Into<String>) -> Self {
        Self::new("java.lang", name)
    }

    pub fn with_args(mut self, args: Vec<IType>) -> Self {
        self.generic_args = args;
        self
    }

    /// Fully-qualified name without generic arguments.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn is_java_lang(&self) -> bool {
        self.package == "java.lang"
    }

    /// Whether this is the class `package.name`.
    pub fn is(&self, package: &str, name: &str) -> bool {
        self.package == package && self.name == name
    }

    /// The primitive wrapped by this class, for `java.lang` wrappers.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        if self.is_java_lang() {
            PrimitiveType::from_boxed_name(&self.name)
        } else {
            None
        }
    }

    pub fn simple_name(&self) -> String {
        if self.generic_args.is_empty() {
            return self.name.clone();
        }
        let args: Vec<String> = self.generic_args.iter().map(IType::simple_name).collect();
        format!("{}<{}>", self.name, args.join(", "))
    }

    fn add_imports_to(&self, imports: &mut BTreeSet<String>) {
        if !self.is_java_lang() && !self.package.is_empty() {
            imports.insert(self.full_name());
        }
        for arg in &self.generic_args {
            arg.add_imports_to(imports);
        }
    }
}

/// Reference to a generated enum, with the methods converting to and from its wire value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumTypeRef {
    pub class: ClassType,
    pub value_type: Box<IType>,
    pub expandable: bool,
    /// Static factory, e.g. `fromString`.
    pub from_method: String,
    /// Instance accessor returning the wire value, e.g. `toString`.
    pub to_method: String,
}

/// A Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IType {
    Primitive(PrimitiveType),
    ByteArray,
    Class(ClassType),
    List(Box<IType>),
    Map(Box<IType>),
    Enum(EnumTypeRef),
    Model(ClassType),
}

/// Textual form of a well-known type, used to pick serialization calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Known {
    String,
    BigDecimal,
    OffsetDateTime,
    LocalDate,
    Duration,
    Uuid,
    Object,
    BinaryData,
    Base64Url,
    DateTimeRfc1123,
    Boxed(PrimitiveType),
    Other,
}

impl IType {
    pub const VOID: IType = IType::Primitive(PrimitiveType::Void);
    pub const BOOLEAN: IType = IType::Primitive(PrimitiveType::Boolean);
    pub const INT: IType = IType::Primitive(PrimitiveType::Int);
    pub const LONG: IType = IType::Primitive(PrimitiveType::Long);
    pub const FLOAT: IType = IType::Primitive(PrimitiveType::Float);
    pub const DOUBLE: IType = IType::Primitive(PrimitiveType::Double);

    pub fn string() -> Self {
        IType::Class(ClassType::java_lang("String"))
    }

    pub fn object() -> Self {
        IType::Class(ClassType::java_lang("Object"))
    }

    pub fn boxed_void() -> Self {
        IType::Class(ClassType::java_lang("Void"))
    }

    pub fn big_decimal() -> Self {
        IType::Class(ClassType::new("java.math", "BigDecimal"))
    }

    pub fn local_date() -> Self {
        IType::Class(ClassType::new("java.time", "LocalDate"))
    }

    pub fn offset_date_time() -> Self {
        IType::Class(ClassType::new("java.time", "OffsetDateTime"))
    }

    pub fn duration() -> Self {
        IType::Class(ClassType::new("java.time", "Duration"))
    }

    pub fn uuid() -> Self {
        IType::Class(ClassType::new("java.util", "UUID"))
    }

    pub fn list(element: IType) -> Self {
        IType::List(Box::new(element))
    }

    pub fn map(value: IType) -> Self {
        IType::Map(Box::new(value))
    }

    fn known(&self) -> Known {
        let IType::Class(class) = self else {
            return Known::Other;
        };
        if let Some(primitive) = class.unboxed() {
            return Known::Boxed(primitive);
        }
        match (class.package.as_str(), class.name.as_str()) {
            ("java.lang", "String") => Known::String,
            ("java.lang", "Object") => Known::Object,
            ("java.math", "BigDecimal") => Known::BigDecimal,
            ("java.time", "OffsetDateTime") => Known::OffsetDateTime,
            ("java.time", "LocalDate") => Known::LocalDate,
            ("java.time", "Duration") => Known::Duration,
            ("java.util", "UUID") => Known::Uuid,
            (_, "BinaryData") => Known::BinaryData,
            (_, "Base64Url" | "Base64Uri") => Known::Base64Url,
            (_, "DateTimeRfc1123") => Known::DateTimeRfc1123,
            _ => Known::Other,
        }
    }

    /// The boxed form of primitives; other types are returned unchanged.
    pub fn as_nullable(&self) -> IType {
        match self {
            IType::Primitive(p) => IType::Class(ClassType::java_lang(p.boxed_name())),
            other => other.clone(),
        }
    }

    /// The primitive form of `java.lang` wrappers; other types are returned unchanged.
    pub fn as_primitive(&self) -> IType {
        match self {
            IType::Class(class) => match class.unboxed() {
                Some(p) => IType::Primitive(p),
                None => self.clone(),
            },
            other => other.clone(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        !matches!(self, IType::Primitive(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, IType::Primitive(PrimitiveType::Void))
            || matches!(self, IType::Class(c) if c.is("java.lang", "Void"))
    }

    pub fn is_string(&self) -> bool {
        self.known() == Known::String
    }

    pub fn is_binary_data(&self) -> bool {
        self.known() == Known::BinaryData
    }

    pub fn as_model(&self) -> Option<&ClassType> {
        match self {
            IType::Model(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumTypeRef> {
        match self {
            IType::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Element type of a list.
    pub fn element(&self) -> Option<&IType> {
        match self {
            IType::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Value type of a map.
    pub fn map_value(&self) -> Option<&IType> {
        match self {
            IType::Map(inner) => Some(inner),
            _ => None,
        }
    }

    /// Name as written in Java source, e.g. `List<Pet>`.
    pub fn simple_name(&self) -> String {
        match self {
            IType::Primitive(p) => p.as_str().to_string(),
            IType::ByteArray => "byte[]".to_string(),
            IType::Class(class) | IType::Model(class) => class.simple_name(),
            IType::Enum(e) => e.class.simple_name(),
            IType::List(inner) => format!("List<{}>", inner.as_nullable().simple_name()),
            IType::Map(inner) => format!("Map<String, {}>", inner.as_nullable().simple_name()),
        }
    }

    /// Fully-qualified names that must be imported to use this type.
    pub fn imports(&self) -> BTreeSet<String> {
        let mut imports = BTreeSet::new();
        self.add_imports_to(&mut imports);
        imports
    }

    pub fn add_imports_to(&self, imports: &mut BTreeSet<String>) {
        match self {
            IType::Primitive(_) | IType::ByteArray => {}
            IType::Class(class) | IType::Model(class) => class.add_imports_to(imports),
            IType::Enum(e) => e.class.add_imports_to(imports),
            IType::List(inner) => {
                imports.insert("java.util.List".to_string());
                inner.add_imports_to(imports);
            }
            IType::Map(inner) => {
                imports.insert("java.util.Map".to_string());
                inner.add_imports_to(imports);
            }
        }
    }

    /// Extra imports needed by the JSON write and read expressions of this type.
    pub fn add_json_imports_to(&self, imports: &mut BTreeSet<String>) {
        self.add_imports_to(imports);
        match self.known() {
            Known::OffsetDateTime => {
                imports.insert("java.time.format.DateTimeFormatter".to_string());
            }
            Known::LocalDate | Known::Duration | Known::Uuid | Known::Base64Url
            | Known::DateTimeRfc1123 => {
                imports.insert("java.util.Objects".to_string());
            }
            _ => {}
        }
        match self {
            IType::List(inner) | IType::Map(inner) => inner.add_json_imports_to(imports),
            IType::Enum(e) => e.value_type.add_json_imports_to(imports),
            _ => {}
        }
    }

    /// Java expression for a literal of this type.
    pub fn default_value_expr(&self, value: &str) -> String {
        match self {
            IType::Primitive(p) => primitive_literal(*p, value),
            IType::ByteArray => format!("{}.getBytes()", quote(value)),
            IType::Enum(e) => format!(
                "{}.{}({})",
                e.class.name,
                e.from_method,
                e.value_type.as_primitive().default_value_expr(value)
            ),
            IType::Class(_) => match self.known() {
                Known::Boxed(p) => primitive_literal(p, value),
                Known::BigDecimal => format!("new BigDecimal({})", quote(value)),
                Known::OffsetDateTime => format!("OffsetDateTime.parse({})", quote(value)),
                Known::LocalDate => format!("LocalDate.parse({})", quote(value)),
                Known::Duration => format!("Duration.parse({})", quote(value)),
                Known::Uuid => format!("UUID.fromString({})", quote(value)),
                _ => quote(value),
            },
            IType::List(_) | IType::Map(_) | IType::Model(_) => quote(value),
        }
    }

    /// `JsonWriter` call writing `value` under the JSON field `field`, or as an
    /// array element when `field` is `None`.
    pub fn json_write_expr(&self, writer: &str, field: Option<&str>, value: &str) -> String {
        self.json_write_at(writer, field, value, 0)
    }

    fn json_write_at(&self, writer: &str, field: Option<&str>, value: &str, depth: usize) -> String {
        let call = |method: &str, arg: String| match field {
            Some(name) => format!("{writer}.write{method}Field(\"{name}\", {arg})"),
            None => format!("{writer}.write{method}({arg})"),
        };
        let nullable = |expr: String| format!("{value} == null ? null : {expr}");

        match self {
            IType::Primitive(p) => call(p.json_suffix(), value.to_string()),
            IType::ByteArray => call("Binary", value.to_string()),
            IType::Model(_) => call("Json", value.to_string()),
            IType::Enum(e) => {
                let wire = format!("{value}.{}()", e.to_method);
                let inner = e.value_type.as_nullable();
                let method = if inner.is_string() { "String" } else { "Number" };
                call(method, nullable(wire))
            }
            IType::List(inner) => {
                let (w, el) = lambda_names(depth);
                let body = inner.json_write_at(&w, None, &el, depth + 1);
                call("Array", format!("{value}, ({w}, {el}) -> {body}"))
            }
            IType::Map(inner) => {
                let (w, el) = lambda_names(depth);
                let body = inner.json_write_at(&w, None, &el, depth + 1);
                call("Map", format!("{value}, ({w}, {el}) -> {body}"))
            }
            IType::Class(_) => match self.known() {
                Known::String => call("String", value.to_string()),
                Known::Boxed(PrimitiveType::Boolean) => call("Boolean", value.to_string()),
                Known::Boxed(_) | Known::BigDecimal => call("Number", value.to_string()),
                Known::OffsetDateTime => call(
                    "String",
                    nullable(format!("DateTimeFormatter.ISO_OFFSET_DATE_TIME.format({value})")),
                ),
                Known::LocalDate
                | Known::Duration
                | Known::Uuid
                | Known::Base64Url
                | Known::DateTimeRfc1123 => {
                    call("String", format!("Objects.toString({value}, null)"))
                }
                Known::BinaryData => call("Untyped", nullable(format!("{value}.toObject(Object.class)"))),
                Known::Object | Known::Other => call("Untyped", value.to_string()),
            },
        }
    }

    /// `JsonReader` expression reading a value of this type from `reader`.
    pub fn json_read_expr(&self, reader: &str) -> String {
        self.json_read_at(reader, 1)
    }

    fn json_read_at(&self, reader: &str, depth: usize) -> String {
        let parse = |f: &str| format!("{reader}.getNullable(nonNullReader -> {f}(nonNullReader.getString()))");

        match self {
            IType::Primitive(p) => format!("{reader}.get{}()", p.json_suffix()),
            IType::ByteArray => format!("{reader}.getBinary()"),
            IType::Model(class) => format!("{}.fromJson({reader})", class.name),
            IType::Enum(e) => format!(
                "{}.{}({})",
                e.class.name,
                e.from_method,
                e.value_type.json_read_at(reader, depth)
            ),
            IType::List(inner) => {
                let nested = format!("reader{depth}");
                format!(
                    "{reader}.readArray({nested} -> {})",
                    inner.json_read_at(&nested, depth + 1)
                )
            }
            IType::Map(inner) => {
                let nested = format!("reader{depth}");
                format!(
                    "{reader}.readMap({nested} -> {})",
                    inner.json_read_at(&nested, depth + 1)
                )
            }
            IType::Class(_) => match self.known() {
                Known::String => format!("{reader}.getString()"),
                Known::Boxed(p) => format!("{reader}.getNullable(JsonReader::get{})", p.json_suffix()),
                Known::BigDecimal => parse("new BigDecimal"),
                Known::OffsetDateTime => parse("OffsetDateTime.parse"),
                Known::LocalDate => parse("LocalDate.parse"),
                Known::Duration => parse("Duration.parse"),
                Known::Uuid => parse("UUID.fromString"),
                Known::Base64Url => match self {
                    IType::Class(class) => parse(&format!("new {}", class.name)),
                    _ => parse("new Base64Url"),
                },
                Known::DateTimeRfc1123 => parse("new DateTimeRfc1123"),
                Known::BinaryData => format!(
                    "{reader}.getNullable(nonNullReader -> BinaryData.fromObject(nonNullReader.readUntyped()))"
                ),
                Known::Object | Known::Other => format!("{reader}.readUntyped()"),
            },
        }
    }

    /// Expression converting `expr` of this wire type into `client`.
    ///
    /// Returns `expr` unchanged when both types agree.
    pub fn wire_to_client_expr(&self, client: &IType, expr: &str) -> String {
        if self == client {
            return expr.to_string();
        }
        match (self.known(), client) {
            (Known::Base64Url, IType::ByteArray) => format!("{expr} == null ? null : {expr}.decodedBytes()"),
            (Known::DateTimeRfc1123, _) => format!("{expr} == null ? null : {expr}.getDateTime()"),
            (_, _) if client.known() == Known::OffsetDateTime && self.as_primitive() == IType::LONG => {
                let instant = format!(
                    "OffsetDateTime.ofInstant(Instant.ofEpochSecond({expr}), ZoneOffset.UTC)"
                );
                if self.is_nullable() {
                    format!("{expr} == null ? null : {instant}")
                } else {
                    instant
                }
            }
            _ => expr.to_string(),
        }
    }

    /// Expression converting `expr` of the `client` type into this wire type.
    pub fn client_to_wire_expr(&self, client: &IType, expr: &str) -> String {
        if self == client {
            return expr.to_string();
        }
        match (self, self.known()) {
            (IType::Class(class), Known::Base64Url) => {
                format!("{expr} == null ? null : {}.encode({expr})", class.name)
            }
            (_, Known::DateTimeRfc1123) => format!("{expr} == null ? null : new DateTimeRfc1123({expr})"),
            _ if self.as_primitive() == IType::LONG && client.known() == Known::OffsetDateTime => {
                if self.is_nullable() {
                    format!("{expr} == null ? null : {expr}.toEpochSecond()")
                } else {
                    format!("{expr}.toEpochSecond()")
                }
            }
            _ => expr.to_string(),
        }
    }

    /// Imports used by the conversions between this wire type and `client`.
    pub fn conversion_imports(&self, client: &IType) -> Vec<&'static str> {
        if self.as_primitive() == IType::LONG && client.known() == Known::OffsetDateTime {
            vec!["java.time.Instant", "java.time.ZoneOffset"]
        } else {
            Vec::new()
        }
    }
}

impl fmt::Display for IType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.simple_name())
    }
}

fn lambda_names(depth: usize) -> (String, String) {
    if depth == 0 {
        ("writer".to_string(), "element".to_string())
    } else {
        (format!("writer{depth}"), format!("element{depth}"))
    }
}

fn primitive_literal(p: PrimitiveType, value: &str) -> String {
    match p {
        PrimitiveType::Void => "null".to_string(),
        PrimitiveType::Boolean => value.to_ascii_lowercase(),
        PrimitiveType::Int => value.to_string(),
        PrimitiveType::Long => format!("{value}L"),
        PrimitiveType::Float => format!("{value}f"),
        PrimitiveType::Double => {
            if value.contains(['.', 'e', 'E']) {
                value.to_string()
            } else {
                format!("{value}.0")
            }
        }
    }
}

/// Quote a string as a Java literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet() -> IType {
        IType::Model(ClassType::new("com.petstore.models", "Pet"))
    }

    fn color() -> IType {
        IType::Enum(EnumTypeRef {
            class: ClassType::new("com.petstore.models", "Color"),
            value_type: Box::new(IType::string()),
            expandable: true,
            from_method: "fromString".into(),
            to_method: "toString".into(),
        })
    }

    #[test]
    fn test_simple_names() {
        assert_eq!(IType::INT.simple_name(), "int");
        assert_eq!(IType::list(IType::INT).simple_name(), "List<Integer>");
        assert_eq!(
            IType::map(IType::list(pet())).simple_name(),
            "Map<String, List<Pet>>"
        );
        assert_eq!(IType::ByteArray.to_string(), "byte[]");
    }

    #[test]
    fn test_as_nullable_boxes_primitives() {
        assert_eq!(IType::INT.as_nullable().simple_name(), "Integer");
        assert_eq!(IType::VOID.as_nullable(), IType::boxed_void());
        assert_eq!(IType::INT.as_nullable().as_primitive(), IType::INT);
        assert!(!IType::LONG.is_nullable());
        assert!(IType::LONG.as_nullable().is_nullable());
    }

    #[test]
    fn test_imports_skip_java_lang() {
        let ty = IType::map(IType::list(pet()));
        let imports: Vec<_> = ty.imports().into_iter().collect();
        assert_eq!(
            imports,
            vec!["com.petstore.models.Pet", "java.util.List", "java.util.Map"]
        );
        assert!(IType::string().imports().is_empty());
    }

    #[test]
    fn test_json_write_primitives_and_strings() {
        assert_eq!(
            IType::INT.json_write_expr("jsonWriter", Some("age"), "this.age"),
            "jsonWriter.writeIntField(\"age\", this.age)"
        );
        assert_eq!(
            IType::INT
                .as_nullable()
                .json_write_expr("jsonWriter", Some("age"), "this.age"),
            "jsonWriter.writeNumberField(\"age\", this.age)"
        );
        assert_eq!(
            IType::string().json_write_expr("jsonWriter", Some("name"), "this.name"),
            "jsonWriter.writeStringField(\"name\", this.name)"
        );
    }

    #[test]
    fn test_json_write_dates_and_enums() {
        assert_eq!(
            IType::offset_date_time().json_write_expr("jsonWriter", Some("at"), "this.at"),
            "jsonWriter.writeStringField(\"at\", this.at == null ? null : DateTimeFormatter.ISO_OFFSET_DATE_TIME.format(this.at))"
        );
        assert_eq!(
            color().json_write_expr("jsonWriter", Some("color"), "this.color"),
            "jsonWriter.writeStringField(\"color\", this.color == null ? null : this.color.toString())"
        );
    }

    #[test]
    fn test_json_write_nested_collections() {
        let ty = IType::list(IType::list(IType::string()));
        assert_eq!(
            ty.json_write_expr("jsonWriter", Some("grid"), "this.grid"),
            "jsonWriter.writeArrayField(\"grid\", this.grid, (writer, element) -> writer.writeArray(element, (writer1, element1) -> writer1.writeString(element1)))"
        );
    }

    #[test]
    fn test_json_read_exprs() {
        assert_eq!(IType::INT.json_read_expr("reader"), "reader.getInt()");
        assert_eq!(
            IType::LONG.as_nullable().json_read_expr("reader"),
            "reader.getNullable(JsonReader::getLong)"
        );
        assert_eq!(pet().json_read_expr("reader"), "Pet.fromJson(reader)");
        assert_eq!(
            color().json_read_expr("reader"),
            "Color.fromString(reader.getString())"
        );
        assert_eq!(
            IType::map(IType::list(pet())).json_read_expr("reader"),
            "reader.readMap(reader1 -> reader1.readArray(reader2 -> Pet.fromJson(reader2)))"
        );
        assert_eq!(
            IType::offset_date_time().json_read_expr("reader"),
            "reader.getNullable(nonNullReader -> OffsetDateTime.parse(nonNullReader.getString()))"
        );
    }

    #[test]
    fn test_json_imports() {
        let mut imports = BTreeSet::new();
        IType::list(IType::uuid()).add_json_imports_to(&mut imports);
        assert!(imports.contains("java.util.Objects"));
        assert!(imports.contains("java.util.UUID"));
        assert!(imports.contains("java.util.List"));
    }

    #[test]
    fn test_default_value_exprs() {
        assert_eq!(IType::LONG.default_value_expr("5"), "5L");
        assert_eq!(IType::DOUBLE.default_value_expr("5"), "5.0");
        assert_eq!(IType::BOOLEAN.default_value_expr("True"), "true");
        assert_eq!(IType::string().default_value_expr("a\"b"), "\"a\\\"b\"");
        assert_eq!(
            color().default_value_expr("red"),
            "Color.fromString(\"red\")"
        );
    }

    #[test]
    fn test_wire_conversions() {
        let unix = IType::LONG.as_nullable();
        let client = IType::offset_date_time();
        assert_eq!(
            unix.wire_to_client_expr(&client, "this.at"),
            "this.at == null ? null : OffsetDateTime.ofInstant(Instant.ofEpochSecond(this.at), ZoneOffset.UTC)"
        );
        assert_eq!(
            unix.client_to_wire_expr(&client, "at"),
            "at == null ? null : at.toEpochSecond()"
        );
        let base64 = IType::Class(ClassType::new("com.azure.core.util", "Base64Url"));
        assert_eq!(
            base64.client_to_wire_expr(&IType::ByteArray, "data"),
            "data == null ? null : Base64Url.encode(data)"
        );
        assert_eq!(IType::string().wire_to_client_expr(&IType::string(), "x"), "x");
    }
}
