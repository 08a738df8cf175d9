//! Lint for type expressions naming unknown schemas.

use javagen_codemodel::{CodeModel, Settings, TypeExpr};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on references to schemas the code model does not declare.
pub struct UnresolvedReferenceLint;

impl Lint for UnresolvedReferenceLint {
    fn name(&self) -> &'static str {
        "unresolved-reference"
    }

    fn description(&self) -> &'static str {
        "Detect type expressions and parents naming unknown schemas"
    }

    fn check(&self, code_model: &CodeModel, _settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        let mut report = |expr: &TypeExpr, location: String| {
            for name in expr.named_references() {
                if code_model.schema(name).is_none() {
                    diagnostics.push(
                        Diagnostic::error("validate", format!("unknown schema '{name}' in '{expr}'"))
                            .at(location.clone()),
                    );
                }
            }
        };

        for object in &code_model.schemas.objects {
            for property in &object.properties {
                report(&property.schema, format!("schemas.{}.{}", object.name, property.name));
            }
            if let Some(additional) = &object.additional_properties {
                report(additional, format!("schemas.{}.additional-properties", object.name));
            }
        }
        for choice in code_model
            .schemas
            .choices
            .iter()
            .chain(&code_model.schemas.sealed_choices)
        {
            report(&choice.choice_type, format!("schemas.{}", choice.name));
        }
        for constant in &code_model.schemas.constants {
            report(&constant.value_type, format!("schemas.{}", constant.name));
        }
        for union in &code_model.schemas.unions {
            for variant in &union.variants {
                report(variant, format!("schemas.{}", union.name));
            }
        }
        for (group, operation) in code_model.operations() {
            let location = format!("operation-groups.{}.{}", group.name, operation.name);
            for expr in operation.type_references() {
                report(expr, location.clone());
            }
        }
        for client in &code_model.clients {
            for parameter in &client.global_parameters {
                report(&parameter.schema, format!("clients.{}.{}", client.name, parameter.name));
            }
        }

        for object in &code_model.schemas.objects {
            if let Some(parent) = object.parent.as_deref()
                && code_model.object(parent).is_none()
            {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("object '{}' extends unknown object '{parent}'", object.name),
                    )
                    .at(format!("schemas.{}", object.name)),
                );
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
        UnresolvedReferenceLint.check(
            &model,
            &Settings::for_namespace("com.petstore"),
            &mut diagnostics,
        );
        diagnostics
    }

    #[test]
    fn test_resolved_references() {
        let diagnostics = check(
            r#"
schemas:
  objects:
    - name: Pet
      properties:
        - name: tags
          schema: array<Tag>
    - name: Tag
"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_property_schema() {
        let diagnostics = check(
            r#"
schemas:
  objects:
    - name: Pet
      properties:
        - name: owners
          schema: dict<Owner>
"#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("unknown schema 'Owner'"));
        assert_eq!(diagnostics[0].location.as_deref(), Some("schemas.Pet.owners"));
    }

    #[test]
    fn test_unknown_response_and_parent() {
        let diagnostics = check(
            r#"
schemas:
  objects:
    - name: Dog
      parent: Animal
operation-groups:
  - name: Pets
    operations:
      - name: get
        request:
          method: get
          path: /pets
        responses:
          - status-codes: [200]
            schema: Pet
"#,
        );
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().any(|d| d.message.contains("'Pet'")));
        assert!(diagnostics.iter().any(|d| d.message.contains("unknown object 'Animal'")));
    }
}
