//! Lint for polymorphic hierarchies.

use std::collections::HashMap;

use javagen_codemodel::{CodeModel, Settings};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on malformed discriminated hierarchies.
///
/// Checks that a declared discriminator is one of the object's own
/// properties, that a child with a discriminator value sits under a root
/// declaring a discriminator, and that discriminator values are unique
/// per root. The root's own value, its name unless set, counts too.
pub struct DiscriminatorLint;

impl Lint for DiscriminatorLint {
    fn name(&self) -> &'static str {
        "discriminator"
    }

    fn description(&self) -> &'static str {
        "Check discriminator properties and values in polymorphic hierarchies"
    }

    fn check(&self, code_model: &CodeModel, _settings: &Settings, diagnostics: &mut Vec<Diagnostic>) {
        // (root, value) -> first schema using the value
        let mut values: HashMap<(&str, String), &str> = HashMap::new();
        for root in code_model
            .schemas
            .objects
            .iter()
            .filter(|o| o.parent.is_none() && o.discriminator.is_some())
        {
            let value = root.discriminator_value.clone().unwrap_or_else(|| root.name.clone());
            values.insert((root.name.as_str(), value), &root.name);
        }

        for object in &code_model.schemas.objects {
            let location = format!("schemas.{}", object.name);

            if let Some(discriminator) = object.discriminator.as_deref()
                && object.property(discriminator).is_none()
            {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "object '{}' declares discriminator '{discriminator}' but has no such property",
                            object.name
                        ),
                    )
                    .at(location.clone()),
                );
            }

            if object.parent.is_none() {
                continue;
            }

            let ancestors = code_model.ancestors_of(&object.name);
            let declares = object.discriminator.is_some()
                || ancestors.iter().any(|a| a.discriminator.is_some());
            if object.discriminator_value.is_some() && !declares {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "object '{}' has a discriminator value but no ancestor declares a discriminator",
                            object.name
                        ),
                    )
                    .at(location.clone()),
                );
                continue;
            }
            if !declares {
                continue;
            }

            let root = code_model.root_of(object);
            let value = object
                .discriminator_value
                .clone()
                .unwrap_or_else(|| object.name.clone());
            if let Some(first) = values.get(&(root.name.as_str(), value.clone())) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "discriminator value '{value}' of '{}' is already used by '{first}' under '{}'",
                            object.name, root.name
                        ),
                    )
                    .at(location),
                );
            } else {
                values.insert((root.name.as_str(), value), &object.name);
            }
        }
    }
}
