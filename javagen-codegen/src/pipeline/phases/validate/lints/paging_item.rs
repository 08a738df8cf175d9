//! Lint for paging operations whose page model lacks the item property.

use javagen_codemodel::{CodeModel, ObjectSchema, Settings};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when a paging operation's response has no item property.
pub struct PagingItemLint;

/// Whether `object` or one of its ancestors declares `serialized_name`.
fn has_property(code_model: &CodeModel, object: &ObjectSchema, serialized_name: &str) -> bool {
    object.property(serialized_name).is_some()
        || code_model
            .ancestors_of(&object.name)
            .iter()
            .any(|a| a.property(serialized_name).is_some())
}

impl Lint for PagingItemLint {
    fn name(&self) -> &'static str {
        "paging-item"
    }

    fn description(&self) -> &'static str {
        "Check that paging responses carry the item and next link properties"
    }

    fn check(&self, code_model: &CodeModel, _settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        for (group, operation) in code_model.operations() {
            let Some(paging) = &operation.paging else {
                continue;
            };
            let location = format!("operation-groups.{}.{}", group.name, operation.name);

            let page = operation
                .success_schema()
                .and_then(|s| s.as_named())
                .and_then(|name| code_model.object(name));
            let Some(page) = page else {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "paging operation '{}' does not return an object",
                            operation.name
                        ),
                    )
                    .at(location),
                );
                continue;
            };

            if !has_property(code_model, page, &paging.item_name) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "paging operation '{}': item property '{}' not found on '{}'",
                            operation.name, paging.item_name, page.name
                        ),
                    )
                    .at(location.clone()),
                );
            }
            if let Some(next_link) = paging.next_link_name.as_deref()
                && !has_property(code_model, page, next_link)
            {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "paging operation '{}': next link property '{next_link}' not found on '{}'",
                            operation.name, page.name
                        ),
                    )
                    .at(location),
                );
            }
        }
    }
}
