//! Javadoc comments.

use javagen_codegen::builder::{CodeFragment, Renderable};
use javagen_core::escape_comment;

/// A `/** ... */` comment with a description and block tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaJavadoc {
    description: Vec<String>,
    params: Vec<(String, String)>,
    returns: Option<String>,
    throws: Vec<(String, String)>,
    tags: Vec<String>,
}

impl JavaJavadoc {
    pub fn new(description: impl AsRef<str>) -> Self {
        Self::default().line(description)
    }

    /// Append description text; embedded newlines become separate lines.
    pub fn line(mut self, text: impl AsRef<str>) -> Self {
        self.description
            .extend(text.as_ref().lines().map(|l| escape_comment(l.trim_end())));
        self
    }

    pub fn param(mut self, name: impl Into<String>, description: impl AsRef<str>) -> Self {
        self.params
            .push((name.into(), escape_comment(description.as_ref())));
        self
    }

    pub fn returns(mut self, description: impl AsRef<str>) -> Self {
        self.returns = Some(escape_comment(description.as_ref()));
        self
    }

    pub fn throws(mut self, exception: impl Into<String>, description: impl AsRef<str>) -> Self {
        self.throws
            .push((exception.into(), escape_comment(description.as_ref())));
        self
    }

    /// A free-form block tag such as `@deprecated` or `@since`.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.params.is_empty()
            && self.returns.is_none()
            && self.throws.is_empty()
            && self.tags.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.description.clone();
        let has_tags = !self.params.is_empty()
            || self.returns.is_some()
            || !self.throws.is_empty()
            || !self.tags.is_empty();
        if has_tags && !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(self.params.iter().map(|(n, d)| format!("@param {n} {d}")));
        lines.extend(self.throws.iter().map(|(e, d)| format!("@throws {e} {d}")));
        lines.extend(self.returns.iter().map(|d| format!("@return {d}")));
        lines.extend(self.tags.iter().cloned());
        lines
    }
}

impl Renderable for JavaJavadoc {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.is_empty() {
            return Vec::new();
        }
        vec![CodeFragment::Javadoc(self.lines())]
    }
}
