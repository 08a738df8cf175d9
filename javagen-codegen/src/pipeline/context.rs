//! Compilation context passed through pipeline phases.

use javagen_codemodel::{CodeModel, Settings};
use javagen_ir::ClientModels;
use serde::Serialize;

use super::diagnostic::Diagnostic;

/// Package and summary data computed from the client model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    /// Packages holding at least one generated class, sorted.
    pub packages: Vec<String>,
    /// Packages exported by `module-info.java`.
    pub exported_packages: Vec<String>,
    /// Packages opened to the runtime for reflection.
    pub opened_packages: Vec<String>,
    pub merge_patch_models: Vec<String>,
    pub model_count: usize,
    pub enum_count: usize,
    pub client_count: usize,
    pub method_count: usize,
}

/// State threaded through the phases: each phase fills in its output.
#[derive(Debug)]
pub struct CompilationContext {
    /// The code model as loaded.
    pub code_model: CodeModel,
    /// The management-transformed copy of the code model (populated by TransformPhase).
    pub transformed: Option<CodeModel>,
    pub settings: Settings,
    /// The client model (populated by MapPhase).
    pub client_models: Option<ClientModels>,
    /// Summary data (populated by AnalyzePhase).
    pub analysis: Option<Analysis>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(code_model: CodeModel, settings: Settings) -> Self {
        Self {
            code_model,
            transformed: None,
            settings,
            client_models: None,
            analysis: None,
            diagnostics: Vec::new(),
        }
    }

    /// The code model mappers should read: the transformed copy when present.
    pub fn effective_code_model(&self) -> &CodeModel {
        self.transformed.as_ref().unwrap_or(&self.code_model)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}
