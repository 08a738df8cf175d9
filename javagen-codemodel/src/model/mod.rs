//! The code model root and its lookup helpers.

mod file;
mod parse;
mod validate;

use std::collections::HashSet;

pub use file::CodeModelFile;
use serde::Deserialize;
pub use validate::find_name_spans;

use crate::{Client, ObjectSchema, Operation, OperationGroup, SchemaRef, Schemas};

/// Root of a code model document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CodeModel {
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub schemas: Schemas,
    #[serde(default)]
    pub operation_groups: Vec<OperationGroup>,
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CodeModel {
    /// Look up a schema of any kind by name.
    pub fn schema(&self, name: &str) -> Option<SchemaRef<'_>> {
        self.schemas.iter().find(|s| s.name() == name)
    }

    pub fn object(&self, name: &str) -> Option<&ObjectSchema> {
        self.schemas.object(name)
    }

    /// Objects whose parent is `name`, in declaration order.
    pub fn children_of(&self, name: &str) -> Vec<&ObjectSchema> {
        self.schemas
            .objects
            .iter()
            .filter(|o| o.parent.as_deref() == Some(name))
            .collect()
    }

    /// All descendants of `name`: direct children first, then their children.
    pub fn descendants_of(&self, name: &str) -> Vec<&ObjectSchema> {
        let mut out: Vec<&ObjectSchema> = Vec::new();
        let mut seen = HashSet::from([name]);
        let mut frontier = vec![name];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for parent in frontier {
                for child in self.children_of(parent) {
                    if seen.insert(child.name.as_str()) {
                        out.push(child);
                        next.push(child.name.as_str());
                    }
                }
            }
            frontier = next;
        }
        out
    }

    /// Ancestors of `name`, nearest first. Stops at unknown parents and cycles.
    pub fn ancestors_of(&self, name: &str) -> Vec<&ObjectSchema> {
        let mut out: Vec<&ObjectSchema> = Vec::new();
        let mut seen = HashSet::from([name]);
        let mut current = self.object(name).and_then(|o| o.parent.as_deref());

        while let Some(parent_name) = current {
            if !seen.insert(parent_name) {
                break;
            }
            let Some(parent) = self.object(parent_name) else {
                break;
            };
            out.push(parent);
            current = parent.parent.as_deref();
        }
        out
    }

    /// The topmost known ancestor, or the object itself.
    pub fn root_of<'a>(&'a self, object: &'a ObjectSchema) -> &'a ObjectSchema {
        self.ancestors_of(&object.name)
            .last()
            .copied()
            .unwrap_or(object)
    }

    /// Every operation with its group.
    pub fn operations(&self) -> impl Iterator<Item = (&OperationGroup, &Operation)> {
        self.operation_groups
            .iter()
            .flat_map(|g| g.operations.iter().map(move |op| (g, op)))
    }

    /// Operation groups served by `client`.
    pub fn groups_of<'a>(&'a self, client: &'a Client) -> impl Iterator<Item = &'a OperationGroup> {
        self.operation_groups
            .iter()
            .filter(move |g| g.is_ungrouped() || client.serves(&g.name))
    }

    pub fn operation_count(&self) -> usize {
        self.operation_groups.iter().map(|g| g.operations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const HIERARCHY: &str = r#"
schemas:
  objects:
    - name: Fish
      discriminator: kind
      properties:
        - name: kind
          schema: string
          required: true
    - name: Shark
      parent: Fish
      discriminator-value: shark
    - name: Salmon
      parent: Fish
    - name: Sawshark
      parent: Shark
operation-groups: []
"#;

    #[test]
    fn test_children_and_descendants() {
        let model = CodeModel::from_str(HIERARCHY).unwrap();
        let children: Vec<_> = model
            .children_of("Fish")
            .into_iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(children, vec!["Shark", "Salmon"]);

        let descendants: Vec<_> = model
            .descendants_of("Fish")
            .into_iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(descendants, vec!["Shark", "Salmon", "Sawshark"]);
    }

    #[test]
    fn test_ancestors_and_root() {
        let model = CodeModel::from_str(HIERARCHY).unwrap();
        let ancestors: Vec<_> = model
            .ancestors_of("Sawshark")
            .into_iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(ancestors, vec!["Shark", "Fish"]);

        let sawshark = model.object("Sawshark").unwrap();
        assert_eq!(model.root_of(sawshark).name, "Fish");
    }

    #[test]
    fn test_schema_lookup_any_kind() {
        let model = CodeModel::from_str(
            r#"
schemas:
  choices:
    - name: Color
      choices:
        - name: red
          value: red
"#,
        )
        .unwrap();
        assert_eq!(model.schema("Color").unwrap().kind(), "choice");
        assert!(model.schema("Missing").is_none());
    }
}
