//! Lint for missing descriptions.

use javagen_codemodel::{CodeModel, Settings};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns on schemas, operations and clients without a description.
pub struct EmptyDescriptionLint;

fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|t| t.trim().is_empty())
}

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn description(&self) -> &'static str {
        "Warn about schemas, operations and clients without descriptions"
    }

    fn check(&self, code_model: &CodeModel, _settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        let mut warn = |what: &str, name: &str, location: String| {
            diagnostics.push(
                Diagnostic::warning("validate", format!("{what} '{name}' has no description"))
                    .at(location),
            );
        };

        for object in &code_model.schemas.objects {
            if is_blank(object.description.as_deref()) && is_blank(object.summary.as_deref()) {
                warn("object", &object.name, format!("schemas.{}", object.name));
            }
        }
        for choice in code_model
            .schemas
            .choices
            .iter()
            .chain(&code_model.schemas.sealed_choices)
        {
            if is_blank(choice.description.as_deref()) {
                warn("enum", &choice.name, format!("schemas.{}", choice.name));
            }
        }
        for (group, operation) in code_model.operations() {
            if is_blank(operation.description.as_deref()) && is_blank(operation.summary.as_deref()) {
                warn(
                    "operation",
                    &operation.name,
                    format!("operation-groups.{}.{}", group.name, operation.name),
                );
            }
        }
        for client in &code_model.clients {
            if is_blank(client.description.as_deref()) {
                warn("client", &client.name, format!("clients.{}", client.name));
            }
        }
    }
}
