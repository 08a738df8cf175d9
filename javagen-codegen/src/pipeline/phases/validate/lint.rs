use javagen_codemodel::{CodeModel, Settings};

use crate::pipeline::Diagnostic;

/// One check run over the code model before mapping.
///
/// Lints report through `diagnostics`; an error diagnostic stops the
/// pipeline after every lint has run.
pub trait Lint: Send + Sync {
    /// Kebab-case identifier, e.g. `unresolved-reference`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, code_model: &CodeModel, settings: &Settings, diagnostics: &mut Vec<Diagnostic>);
}
