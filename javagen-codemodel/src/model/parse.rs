//! Code model parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{CodeModel, validate::validate_code_model};
use crate::{Error, Result, error::SourceContext};

/// Filename used when parsing from a string without one.
const DEFAULT_FILENAME: &str = "code-model.yaml";

impl FromStr for CodeModel {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_code_model(s, DEFAULT_FILENAME)
    }
}

impl CodeModel {
    /// Parse a code model file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_code_model(&content, &path.display().to_string())
    }

    /// Parse a code model from a string with a custom filename for error reporting.
    ///
    /// The format follows the extension: `.json` is parsed as JSON, anything
    /// else as YAML.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_code_model(content, filename)
    }
}

/// Parse a code model from content with the given filename for error reporting.
pub(crate) fn parse_code_model(content: &str, filename: &str) -> Result<CodeModel> {
    let source_ctx = SourceContext::new(content, filename);
    let model: CodeModel = if is_json(filename) {
        serde_json::from_str(content).map_err(|e| source_ctx.json_error(e))?
    } else {
        serde_yaml::from_str(content).map_err(|e| source_ctx.yaml_error(e))?
    };

    validate_code_model(&model, &source_ctx)?;
    tracing::debug!(
        file = filename,
        schemas = model.schemas.len(),
        operations = model.operation_count(),
        "parsed code model"
    );
    Ok(model)
}

fn is_json(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE: &str = r#"
info:
  title: Pet Store
schemas:
  objects:
    - name: Pet
      usage: [input, output]
      properties:
        - name: name
          schema: string
          required: true
        - name: tags
          schema: array<string>
operation-groups:
  - name: Pets
    operations:
      - name: get
        request:
          method: get
          path: /pets/{petId}
        parameters:
          - name: petId
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Pet
clients:
  - name: PetStoreClient
    api-versions: ["2024-01-01"]
"#;

    #[test]
    fn test_parse_yaml() {
        let model: CodeModel = PETSTORE.parse().unwrap();
        assert_eq!(model.info.title, "Pet Store");
        assert_eq!(model.schemas.objects.len(), 1);
        assert_eq!(model.operation_count(), 1);
        assert_eq!(model.clients[0].latest_api_version(), Some("2024-01-01"));
    }

    #[test]
    fn test_parse_json_by_extension() {
        let json = r#"{"schemas": {"objects": [{"name": "Pet"}]}}"#;
        let model = CodeModel::from_str_with_filename(json, "model.json").unwrap();
        assert!(model.object("Pet").is_some());
    }

    #[test]
    fn test_yaml_error_has_span() {
        let err = CodeModel::from_str("schemas:\n  objects: [\n").unwrap_err();
        match *err {
            Error::ParseYaml { span, .. } => assert!(span.is_some()),
            other => panic!("expected yaml error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_error_has_span() {
        let err = CodeModel::from_str_with_filename("{\"schemas\": ]", "m.json").unwrap_err();
        match *err {
            Error::ParseJson { span, .. } => assert!(span.is_some()),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_type_expression_is_parse_error() {
        let src = r#"
schemas:
  objects:
    - name: Pet
      properties:
        - name: tags
          schema: array<string
"#;
        let err = CodeModel::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::ParseYaml { .. }));
    }

    #[test]
    fn test_duplicate_schema_rejected() {
        let src = r#"
schemas:
  objects:
    - name: Pet
  choices:
    - name: Pet
      choices:
        - name: a
          value: a
"#;
        let err = CodeModel::from_str(src).unwrap_err();
        match *err {
            Error::DuplicateSchema {
                name,
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(name, "Pet");
                assert!(first_span.is_some());
                assert!(second_span.is_some());
            }
            other => panic!("expected duplicate schema, got {other:?}"),
        }
    }

    #[test]
    fn test_self_parent_rejected() {
        let src = "schemas:\n  objects:\n    - name: Node\n      parent: Node\n";
        let err = CodeModel::from_str(src).unwrap_err();
        assert!(err.to_string().contains("names itself as parent"));
    }

    #[test]
    fn test_duplicate_operation_rejected() {
        let src = r#"
operation-groups:
  - name: Pets
    operations:
      - name: list
        request: { method: get, path: /pets }
      - name: list
        request: { method: get, path: /pets2 }
"#;
        let err = CodeModel::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::DuplicateOperation { .. }));
        assert_eq!(err.to_string(), "duplicate operation 'list' in group 'Pets'");
    }

    #[test]
    fn test_operations_listing_may_repeat() {
        let src = r#"
operation-groups:
  - name: Operations
    operations:
      - name: list
        request: { method: get, path: /providers/Microsoft.Widgets/operations }
      - name: list
        request: { method: get, path: /providers/Microsoft.Widgets/operations }
"#;
        let model = CodeModel::from_str(src).unwrap();
        assert_eq!(model.operation_groups[0].operations.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let err = CodeModel::from_file("/nonexistent/code-model.yaml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
