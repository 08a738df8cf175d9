//! Lint for long-running operations in the unbranded flavor.

use javagen_codemodel::{CodeModel, Flavor, Settings};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when the unbranded flavor meets a long-running operation.
///
/// The clientcore runtime has no poller, so such operations are generated as
/// simple methods.
pub struct UnbrandedLroLint;

impl Lint for UnbrandedLroLint {
    fn name(&self) -> &'static str {
        "unbranded-lro"
    }

    fn description(&self) -> &'static str {
        "Warn about long-running operations generated without a poller"
    }

    fn check(&self, code_model: &CodeModel, settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        if settings.flavor() != Flavor::Unbranded {
            return;
        }
        for (group, operation) in code_model.operations() {
            if operation.long_running.is_some() {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "long-running operation '{}' is generated as a simple method in the unbranded flavor",
                            operation.name
                        ),
                    )
                    .at(format!("operation-groups.{}.{}", group.name, operation.name)),
                );
            }
        }
    }
}
