//! Classes, interfaces and enums.

use javagen_codegen::builder::{CodeFragment, Renderable};

use super::{JavaAnnotation, JavaField, JavaJavadoc, JavaMethod, JavaModifiers};

/// The kind of type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JavaKind {
    Class,
    Interface,
    Enum,
}

impl JavaKind {
    fn keyword(self) -> &'static str {
        match self {
            JavaKind::Class => "class",
            JavaKind::Interface => "interface",
            JavaKind::Enum => "enum",
        }
    }
}

/// A member of a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum JavaMember {
    Field(JavaField),
    Method(JavaMethod),
    Type(Box<JavaClass>),
    Fragments(Vec<CodeFragment>),
}

impl Renderable for JavaMember {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            JavaMember::Field(f) => f.to_fragments(),
            JavaMember::Method(m) => m.to_fragments(),
            JavaMember::Type(t) => t.to_fragments(),
            JavaMember::Fragments(f) => f.clone(),
        }
    }
}

/// A constant of an enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaEnumConstant {
    pub javadoc: Option<JavaJavadoc>,
    pub annotations: Vec<JavaAnnotation>,
    /// Name with optional arguments, e.g. `RED("red")`.
    pub text: String,
}

/// A class, interface or enum declaration.
///
/// Interfaces and enums share the structure of classes and are built with
/// [`JavaClass::interface`] and [`JavaClass::enumeration`].
#[derive(Debug, Clone, PartialEq)]
pub struct JavaClass {
    kind: JavaKind,
    javadoc: Option<JavaJavadoc>,
    annotations: Vec<JavaAnnotation>,
    modifiers: JavaModifiers,
    name: String,
    extends: Vec<String>,
    implements: Vec<String>,
    constants: Vec<JavaEnumConstant>,
    members: Vec<JavaMember>,
}

impl JavaClass {
    fn of(kind: JavaKind, modifiers: JavaModifiers, name: impl Into<String>) -> Self {
        Self {
            kind,
            javadoc: None,
            annotations: Vec::new(),
            modifiers,
            name: name.into(),
            extends: Vec::new(),
            implements: Vec::new(),
            constants: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(modifiers: JavaModifiers, name: impl Into<String>) -> Self {
        Self::of(JavaKind::Class, modifiers, name)
    }

    pub fn interface(modifiers: JavaModifiers, name: impl Into<String>) -> Self {
        Self::of(JavaKind::Interface, modifiers, name)
    }

    pub fn enumeration(modifiers: JavaModifiers, name: impl Into<String>) -> Self {
        Self::of(JavaKind::Enum, modifiers, name)
    }

    pub fn kind(&self) -> JavaKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn javadoc(mut self, javadoc: JavaJavadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn annotate(mut self, annotation: JavaAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn extends(mut self, ty: impl Into<String>) -> Self {
        self.extends.push(ty.into());
        self
    }

    pub fn implements(mut self, ty: impl Into<String>) -> Self {
        self.implements.push(ty.into());
        self
    }

    pub fn constant(mut self, constant: JavaEnumConstant) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn field(mut self, field: JavaField) -> Self {
        self.members.push(JavaMember::Field(field));
        self
    }

    pub fn method(mut self, method: JavaMethod) -> Self {
        self.members.push(JavaMember::Method(method));
        self
    }

    pub fn nested(mut self, ty: JavaClass) -> Self {
        self.members.push(JavaMember::Type(Box::new(ty)));
        self
    }

    pub fn add_field(&mut self, field: JavaField) {
        self.members.push(JavaMember::Field(field));
    }

    pub fn add_method(&mut self, method: JavaMethod) {
        self.members.push(JavaMember::Method(method));
    }

    pub fn add_methods(&mut self, methods: impl IntoIterator<Item = JavaMethod>) {
        self.members.extend(methods.into_iter().map(JavaMember::Method));
    }

    pub fn add_nested(&mut self, ty: JavaClass) {
        self.members.push(JavaMember::Type(Box::new(ty)));
    }

    pub fn add_fragments(&mut self, fragments: Vec<CodeFragment>) {
        self.members.push(JavaMember::Fragments(fragments));
    }

    fn header(&self) -> String {
        let mut header = String::new();
        if !self.modifiers.is_empty() {
            header.push_str(&self.modifiers.to_string());
            header.push(' ');
        }
        header.push_str(self.kind.keyword());
        header.push(' ');
        header.push_str(&self.name);
        if !self.extends.is_empty() {
            header.push_str(" extends ");
            header.push_str(&self.extends.join(", "));
        }
        if !self.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&self.implements.join(", "));
        }
        header.push_str(" {");
        header
    }

    fn constant_fragments(&self) -> Vec<CodeFragment> {
        let last = self.constants.len().saturating_sub(1);
        let mut fragments = Vec::new();
        for (index, constant) in self.constants.iter().enumerate() {
            if let Some(doc) = &constant.javadoc {
                fragments.extend(doc.to_fragments());
            }
            fragments.extend(constant.annotations.iter().map(|a| CodeFragment::Line(a.to_string())));
            let end = if index == last { ";" } else { "," };
            fragments.push(CodeFragment::Line(format!("{}{end}", constant.text)));
            if index != last {
                fragments.push(CodeFragment::Blank);
            }
        }
        fragments
    }
}

impl Renderable for JavaClass {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self
            .javadoc
            .as_ref()
            .map(Renderable::to_fragments)
            .unwrap_or_default();
        fragments.extend(self.annotations.iter().map(|a| CodeFragment::Line(a.to_string())));

        let mut body = self.constant_fragments();
        for member in &self.members {
            if !body.is_empty() {
                body.push(CodeFragment::Blank);
            }
            body.extend(member.to_fragments());
        }

        fragments.push(CodeFragment::block(self.header(), body, Some("}".to_string())));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use javagen_codegen::builder::CodeBuilder;

    use super::*;
    use crate::ast::JavaBlock;

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::java();
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_class_members_separated_by_blank_lines() {
        let class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, "Pet")
            .implements("JsonSerializable<Pet>")
            .field(JavaField::new(JavaModifiers::PRIVATE, "String", "name"))
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, "String", "getName")
                    .body(JavaBlock::new().line("return this.name;")),
            );
        assert_eq!(
            render(&class),
            "public final class Pet implements JsonSerializable<Pet> {\n    private String name;\n\n    public String getName() {\n        return this.name;\n    }\n}\n"
        );
    }

    #[test]
    fn test_enum_constants() {
        let e = JavaClass::enumeration(JavaModifiers::PUBLIC, "Color")
            .constant(JavaEnumConstant {
                javadoc: None,
                annotations: Vec::new(),
                text: "RED(\"red\")".into(),
            })
            .constant(JavaEnumConstant {
                javadoc: None,
                annotations: Vec::new(),
                text: "BLUE(\"blue\")".into(),
            })
            .field(JavaField::new(JavaModifiers::PRIVATE | JavaModifiers::FINAL, "String", "value"));
        assert_eq!(
            render(&e),
            "public enum Color {\n    RED(\"red\"),\n\n    BLUE(\"blue\");\n\n    private final String value;\n}\n"
        );
    }

    #[test]
    fn test_interface_extends() {
        let i = JavaClass::interface(JavaModifiers::PUBLIC, "PetsClient").extends("Base");
        assert_eq!(render(&i), "public interface PetsClient extends Base {\n}\n");
    }
}
