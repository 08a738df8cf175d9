use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for code model operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "code-model.yaml");
/// ctx.validation_error("schema name must not be empty");
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a YAML error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from((loc.index(), 1)));
        Box::new(Error::ParseYaml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a JSON error.
    ///
    /// serde_json reports one-based line and column, which are turned back
    /// into a byte offset.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::ParseJson {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a toml error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ParseToml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a duplicate schema error.
    pub fn duplicate_schema_error(
        &self,
        name: impl Into<String>,
        first_span: Option<SourceSpan>,
        second_span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateSchema {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.into(),
        })
    }

    /// Create a duplicate operation error.
    pub fn duplicate_operation_error(
        &self,
        name: impl Into<String>,
        group: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateOperation {
            src: self.named_source(),
            span,
            name: name.into(),
            group: group.into(),
        })
    }
}

fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start = if line == 1 {
        0
    } else {
        src.match_indices('\n').nth(line - 2).map(|(i, _)| i + 1)?
    };
    Some((line_start + column.saturating_sub(1)).min(src.len().saturating_sub(1)))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(javagen::io),
        help("pass the code model with '-m <path>' or set 'code-model' in javagen.toml")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse code model")]
    #[diagnostic(code(javagen::parse_error))]
    ParseYaml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse code model")]
    #[diagnostic(code(javagen::parse_error))]
    ParseJson {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse javagen.toml")]
    #[diagnostic(code(javagen::settings_error))]
    ParseToml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(javagen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("duplicate schema '{name}'")]
    #[diagnostic(
        code(javagen::duplicate_schema),
        help("schema names are shared by objects, choices, constants and unions")
    )]
    DuplicateSchema {
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first_span: Option<SourceSpan>,
        #[label("defined again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("duplicate operation '{name}' in group '{group}'")]
    #[diagnostic(code(javagen::duplicate_operation))]
    DuplicateOperation {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared twice")]
        span: Option<SourceSpan>,
        name: String,
        group: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_first_line() {
        assert_eq!(offset_of("{\"a\": 1}", 1, 3), Some(2));
    }

    #[test]
    fn test_offset_of_later_line() {
        let src = "{\n  \"a\": x\n}";
        // line 2, column 8 is the `x`
        let offset = offset_of(src, 2, 8).unwrap();
        assert_eq!(&src[offset..offset + 1], "x");
    }

    #[test]
    fn test_offset_of_unknown_line() {
        assert_eq!(offset_of("abc", 0, 0), None);
        assert_eq!(offset_of("abc", 5, 1), None);
    }

    #[test]
    fn test_validation_error_message() {
        let ctx = SourceContext::new("schemas: {}", "cm.yaml");
        let err = ctx.validation_error("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(ctx.filename(), "cm.yaml");
    }
}
