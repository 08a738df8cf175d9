//! Fields and methods.

use javagen_codegen::builder::{CodeFragment, Renderable};
use javagen_core::escape_comment;

use super::{JavaAnnotation, JavaBlock, JavaJavadoc, JavaModifiers};

/// A field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaField {
    comment: Option<CodeFragment>,
    annotations: Vec<JavaAnnotation>,
    modifiers: JavaModifiers,
    ty: String,
    name: String,
    initializer: Option<String>,
}

impl JavaField {
    pub fn new(modifiers: JavaModifiers, ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            comment: None,
            annotations: Vec::new(),
            modifiers,
            ty: ty.into(),
            name: name.into(),
            initializer: None,
        }
    }

    /// A `/* ... */` comment above the field.
    pub fn comment(mut self, text: impl AsRef<str>) -> Self {
        let lines: Vec<String> = text
            .as_ref()
            .lines()
            .map(|l| escape_comment(l.trim_end()))
            .collect();
        self.comment = Some(CodeFragment::BlockComment(lines));
        self
    }

    pub fn javadoc(mut self, javadoc: JavaJavadoc) -> Self {
        self.comment = Some(CodeFragment::Javadoc(javadoc.lines()));
        self
    }

    pub fn annotate(mut self, annotation: JavaAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn init(mut self, expr: impl Into<String>) -> Self {
        self.initializer = Some(expr.into());
        self
    }

    fn declaration(&self) -> String {
        let mut out = String::new();
        if !self.modifiers.is_empty() {
            out.push_str(&self.modifiers.to_string());
            out.push(' ');
        }
        out.push_str(&self.ty);
        out.push(' ');
        out.push_str(&self.name);
        if let Some(init) = &self.initializer {
            out.push_str(" = ");
            out.push_str(init);
        }
        out.push(';');
        out
    }
}

impl Renderable for JavaField {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self.comment.iter().cloned().collect();
        fragments.extend(self.annotations.iter().map(|a| CodeFragment::Line(a.to_string())));
        fragments.push(CodeFragment::Line(self.declaration()));
        fragments
    }
}

/// A method or constructor. Without a body it renders as a declaration
/// ending in `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaMethod {
    javadoc: Option<JavaJavadoc>,
    line_comment: Option<String>,
    annotations: Vec<JavaAnnotation>,
    modifiers: JavaModifiers,
    type_parameters: Option<String>,
    /// `None` for constructors.
    return_type: Option<String>,
    name: String,
    parameters: Vec<String>,
    throws: Vec<String>,
    body: Option<JavaBlock>,
}

impl JavaMethod {
    pub fn new(
        modifiers: JavaModifiers,
        return_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            javadoc: None,
            line_comment: None,
            annotations: Vec::new(),
            modifiers,
            type_parameters: None,
            return_type: Some(return_type.into()),
            name: name.into(),
            parameters: Vec::new(),
            throws: Vec::new(),
            body: None,
        }
    }

    pub fn constructor(modifiers: JavaModifiers, class_name: impl Into<String>) -> Self {
        Self {
            return_type: None,
            ..Self::new(modifiers, "", class_name)
        }
    }

    pub fn javadoc(mut self, javadoc: JavaJavadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    /// A `// ...` line between the javadoc and the annotations.
    pub fn line_comment(mut self, text: impl AsRef<str>) -> Self {
        self.line_comment = Some(format!("// {}", text.as_ref().trim()));
        self
    }

    pub fn annotate(mut self, annotation: JavaAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotate_all(mut self, annotations: impl IntoIterator<Item = JavaAnnotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Generic parameters, e.g. `<T>`.
    pub fn type_parameters(mut self, params: impl Into<String>) -> Self {
        self.type_parameters = Some(params.into());
        self
    }

    /// A parameter written out in full, e.g. `String name` or `@PathParam("id") String id`.
    pub fn param(mut self, declaration: impl Into<String>) -> Self {
        self.parameters.push(declaration.into());
        self
    }

    pub fn params<I, S>(mut self, declarations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(declarations.into_iter().map(Into::into));
        self
    }

    pub fn throws(mut self, exception: impl Into<String>) -> Self {
        self.throws.push(exception.into());
        self
    }

    pub fn body(mut self, body: JavaBlock) -> Self {
        self.body = Some(body);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.modifiers.is_empty() {
            parts.push(self.modifiers.to_string());
        }
        if let Some(tp) = &self.type_parameters {
            parts.push(tp.clone());
        }
        if let Some(ret) = &self.return_type {
            parts.push(ret.clone());
        }
        let mut signature = parts.join(" ");
        if !signature.is_empty() {
            signature.push(' ');
        }
        signature.push_str(&format!("{}({})", self.name, self.parameters.join(", ")));
        if !self.throws.is_empty() {
            signature.push_str(&format!(" throws {}", self.throws.join(", ")));
        }
        signature
    }
}

impl Renderable for JavaMethod {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self
            .javadoc
            .as_ref()
            .map(Renderable::to_fragments)
            .unwrap_or_default();
        fragments.extend(self.line_comment.iter().cloned().map(CodeFragment::Line));
        fragments.extend(self.annotations.iter().map(|a| CodeFragment::Line(a.to_string())));

        let signature = self.signature();
        match &self.body {
            Some(body) => fragments.push(CodeFragment::block(
                format!("{signature} {{"),
                body.to_fragments(),
                Some("}".to_string()),
            )),
            None => fragments.push(CodeFragment::Line(format!("{signature};"))),
        }
        fragments
    }
}
