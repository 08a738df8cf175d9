//! Post-parse validation of a code model.

use std::collections::{HashMap, HashSet};

use miette::SourceSpan;

use super::CodeModel;
use crate::{Result, error::SourceContext};

/// Validate a freshly parsed code model against its source text.
pub(crate) fn validate_code_model(model: &CodeModel, ctx: &SourceContext) -> Result<()> {
    validate_schemas(model, ctx)?;
    validate_operations(model, ctx)?;

    for client in &model.clients {
        if client.name.trim().is_empty() {
            return Err(ctx.validation_error("client name must not be empty"));
        }
    }

    Ok(())
}

fn validate_schemas(model: &CodeModel, ctx: &SourceContext) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for schema in model.schemas.iter() {
        let name = schema.name();
        if name.trim().is_empty() {
            return Err(ctx.validation_error(format!("{} schema name must not be empty", schema.kind())));
        }
        if !seen.insert(name) {
            let spans = find_name_spans(ctx.src(), name);
            return Err(ctx.duplicate_schema_error(
                name,
                spans.first().copied(),
                spans.get(1).copied(),
            ));
        }
    }

    for object in &model.schemas.objects {
        if object.parent.as_deref() == Some(object.name.as_str()) {
            return Err(ctx.validation_error_at(
                format!("object '{}' names itself as parent", object.name),
                find_name_spans(ctx.src(), &object.name).first().copied(),
            ));
        }
        for property in &object.properties {
            if property.name.trim().is_empty() {
                return Err(ctx.validation_error_at(
                    format!("property name must not be empty in object '{}'", object.name),
                    find_name_spans(ctx.src(), &object.name).first().copied(),
                ));
            }
        }
    }

    for choice in model.schemas.choices.iter().chain(&model.schemas.sealed_choices) {
        if choice.choices.is_empty() {
            return Err(ctx.validation_error_at(
                format!("enum '{}' declares no values", choice.name),
                find_name_spans(ctx.src(), &choice.name).first().copied(),
            ));
        }
    }

    Ok(())
}

fn validate_operations(model: &CodeModel, ctx: &SourceContext) -> Result<()> {
    for group in &model.operation_groups {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for operation in &group.operations {
            if operation.name.trim().is_empty() {
                return Err(ctx.validation_error(format!(
                    "operation name must not be empty in group '{}'",
                    group.name
                )));
            }
            let count = seen.entry(operation.name.as_str()).or_default();
            *count += 1;
            if *count > 1 && !group.is_operations_listing() {
                let span = find_name_spans(ctx.src(), &operation.name).get(1).copied();
                return Err(ctx.duplicate_operation_error(&operation.name, &group.name, span));
            }
            for parameter in &operation.parameters {
                if parameter.name.trim().is_empty() {
                    return Err(ctx.validation_error_at(
                        format!("parameter name must not be empty in operation '{}'", operation.name),
                        find_name_spans(ctx.src(), &operation.name).first().copied(),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Find every place where `name` is declared as a `name` value.
///
/// Understands YAML block style (`name: Pet`, quoted or not) and JSON
/// (`"name": "Pet"`). Spans cover the name only.
pub fn find_name_spans(src: &str, name: &str) -> Vec<SourceSpan> {
    if name.is_empty() {
        return Vec::new();
    }

    let prefixes = ["name: ", "name: \"", "name: '", "\"name\": \"", "\"name\":\""];
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for prefix in prefixes {
        let needle = format!("{prefix}{name}");
        for (pos, _) in src.match_indices(&needle) {
            let start = pos + prefix.len();
            let end = start + name.len();
            let boundary = src[end..]
                .chars()
                .next()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'));
            let key_boundary = src[..pos]
                .chars()
                .next_back()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'));
            if boundary && key_boundary && !spans.iter().any(|(s, _)| *s == start) {
                spans.push((start, name.len()));
            }
        }
    }

    spans.sort_unstable();
    spans.into_iter().map(SourceSpan::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_name_spans_yaml() {
        let src = "objects:\n  - name: Pet\n  - name: Pets\n  - name: \"Pet\"\n";
        let spans = find_name_spans(src, "Pet");
        assert_eq!(spans.len(), 2);
        assert_eq!(&src[spans[0].offset()..spans[0].offset() + 3], "Pet");
        assert!(spans[0].offset() < spans[1].offset());
    }

    #[test]
    fn test_find_name_spans_json() {
        let src = r#"{"objects": [{"name": "Pet"}]}"#;
        let spans = find_name_spans(src, "Pet");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].offset(), src.find("Pet").unwrap());
    }

    #[test]
    fn test_find_name_spans_ignores_other_keys() {
        let src = "serialized-name: Pet\nclassname: Pet\n";
        assert!(find_name_spans(src, "Pet").is_empty());
    }

    #[test]
    fn test_find_name_spans_empty_name() {
        assert!(find_name_spans("name: x", "").is_empty());
    }
}
