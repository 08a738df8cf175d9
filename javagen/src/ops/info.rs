//! Info operation - code model summary.

use std::path::Path;

use crate::{
    project::Project,
    reports::{ClientInfo, InfoReport, Stats},
};

/// Execute the info operation.
pub fn info(project: &Project) -> InfoReport {
    let model = &project.code_model;
    let generator = &project.settings.generator;

    let stats = Stats {
        objects: model.schemas.objects.len(),
        enums: model.schemas.choices.len() + model.schemas.sealed_choices.len(),
        constants: model.schemas.constants.len(),
        unions: model.schemas.unions.len(),
        operation_groups: model.operation_groups.len(),
        operations: model.operation_count(),
    };

    let clients = model
        .clients
        .iter()
        .map(|client| ClientInfo {
            name: client.name.clone(),
            api_versions: client.api_versions.clone(),
            operation_groups: client.operation_groups.clone(),
        })
        .collect();

    InfoReport {
        title: if model.info.title.is_empty() {
            generator.namespace.clone()
        } else {
            model.info.title.clone()
        },
        description: model.info.description.clone(),
        namespace: generator.namespace.clone(),
        flavor: generator.flavor.as_str().to_string(),
        mode: generator.mode.as_str().to_string(),
        config_path: canonical(&project.config_path),
        code_model_path: canonical(&generator.code_model),
        stats,
        clients,
    }
}

fn canonical(path: &Path) -> std::path::PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
