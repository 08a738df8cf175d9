//! Java annotations.

use std::fmt;

/// An annotation such as `@Override` or `@ServiceMethod(returns = ReturnType.SINGLE)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaAnnotation {
    text: String,
}

impl JavaAnnotation {
    /// `@{name}` without arguments.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            text: format!("@{}", name.as_ref()),
        }
    }

    /// `@{name}({args})`.
    pub fn with_args<I, S>(name: impl AsRef<str>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        if args.is_empty() {
            return Self::new(name);
        }
        Self {
            text: format!("@{}({})", name.as_ref(), args.join(", ")),
        }
    }

    /// An annotation already written out, including the `@`.
    pub fn raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn overrides() -> Self {
        Self::new("Override")
    }
}

impl fmt::Display for JavaAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_text() {
        assert_eq!(JavaAnnotation::overrides().to_string(), "@Override");
        assert_eq!(
            JavaAnnotation::with_args("ExpectedResponses", ["{ 200, 201 }"]).to_string(),
            "@ExpectedResponses({ 200, 201 })"
        );
        assert_eq!(
            JavaAnnotation::with_args("Generated", Vec::<String>::new()).to_string(),
            "@Generated"
        );
    }
}
