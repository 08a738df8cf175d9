//! Lint for schemas that collide once named as Java types.

use std::collections::HashMap;

use javagen_codemodel::{CodeModel, SchemaRef, Settings};
use javagen_core::naming::get_type_name;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when two schemas map to the same Java class name.
///
/// Java class names are compared case-insensitively since generated files
/// must not collide on case-insensitive file systems.
pub struct DuplicateModelLint;

impl Lint for DuplicateModelLint {
    fn name(&self) -> &'static str {
        "duplicate-model"
    }

    fn description(&self) -> &'static str {
        "Detect schemas whose Java class names collide"
    }

    fn check(&self, code_model: &CodeModel, _settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: HashMap<String, &str> = HashMap::new();

        for schema in code_model.schemas.iter() {
            // Constants and unions never become classes
            if matches!(schema, SchemaRef::Constant(_) | SchemaRef::Union(_)) {
                continue;
            }
            let name = schema.name();
            let normalized = get_type_name(name).to_lowercase();
            if let Some(first) = seen.get(&normalized) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "{} '{}' maps to the same Java class as '{}'",
                            schema.kind(),
                            name,
                            first
                        ),
                    )
                    .at(format!("schemas.{name}")),
                );
            } else {
                seen.insert(normalized, name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn check(src: &str) -> Vec<Diagnostic> {
        let model = CodeModel::from_str(src).unwrap();
        let mut diagnostics = Vec::new();
        DuplicateModelLint.check(&model, &Settings::for_namespace("com.petstore"), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_no_duplicates() {
        let diagnostics = check(
            r#"
schemas:
  objects:
    - name: Pet
    - name: Owner
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_case_insensitive_collision() {
        let diagnostics = check(
            r#"
schemas:
  objects:
    - name: pet-info
  choices:
    - name: PETINFO
      choices:
        - name: a
          value: a
"#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'PETINFO'"));
        assert_eq!(diagnostics[0].location.as_deref(), Some("schemas.PETINFO"));
    }

    #[test]
    fn test_constants_ignored() {
        let diagnostics = check(
            r#"
schemas:
  objects:
    - name: Accept
  constants:
    - name: accept
      value-type: string
      value: application/json
"#,
        );
        assert!(diagnostics.is_empty());
    }
}
