//! Lint for repeated operations that survive into mapping.

use std::collections::HashSet;

use javagen_codemodel::{CodeModel, Settings};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on an `Operations` group repeating an operation name.
///
/// Other groups are rejected when the code model loads. Management
/// generation drops the repeats itself, so only data-plane runs are checked.
pub struct DuplicateOperationLint;

impl Lint for DuplicateOperationLint {
    fn name(&self) -> &'static str {
        "duplicate-operation"
    }

    fn description(&self) -> &'static str {
        "Detect operations listed twice in the Operations group"
    }

    fn check(&self, code_model: &CodeModel, settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        if settings.is_management() {
            return;
        }

        for group in code_model.operation_groups.iter().filter(|g| g.is_operations_listing()) {
            let mut seen = HashSet::new();
            for operation in &group.operations {
                if !seen.insert(operation.name.as_str()) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!("duplicate operation '{}' in group '{}'", operation.name, group.name),
                        )
                        .at(format!("operation-groups.{}.{}", group.name, operation.name)),
                    );
                }
            }
        }
    }
}
