//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from code model validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the code model file.
    pub code_model_path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Lints that ran, as `name: description`.
    pub lints: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.code_model_path.display()));
        } else {
            out.preformatted(&format!(
                "✗ {} has {} error{}",
                self.code_model_path.display(),
                self.errors.len(),
                if self.errors.len() == 1 { "" } else { "s" }
            ));
        }

        out.newline();
        out.section(&format!("Checked with {} lints", self.lints.len()));
        for lint in &self.lints {
            out.list_item(lint);
        }
    }
}
