//! Check operation - code model validation.

use javagen_codegen::{CompilationContext, pipeline::phases::ValidatePhase};

use crate::{project::Project, reports::CheckReport};

/// Execute the check operation.
///
/// Runs every lint over the code model, without stopping at the first
/// error, and returns the diagnostics.
pub fn check(project: Project) -> CheckReport {
    let code_model_path = project.settings.generator.code_model.clone();
    let mut ctx = CompilationContext::new(project.code_model, project.settings);
    let phase = ValidatePhase::new();
    phase.collect(&mut ctx);

    let describe = |message: &str, location: Option<&String>| match location {
        Some(loc) => format!("{message}\n  --> {loc}"),
        None => message.to_string(),
    };

    CheckReport {
        code_model_path,
        errors: ctx
            .errors()
            .map(|d| describe(&d.message, d.location.as_ref()))
            .collect(),
        warnings: ctx
            .warnings()
            .map(|d| describe(&d.message, d.location.as_ref()))
            .collect(),
        lints: phase
            .lints()
            .map(|(name, description)| format!("{name}: {description}"))
            .collect(),
    }
}
