//! Dumps the compilation state after every phase, for `generate --visualize`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use eyre::{Result, WrapErr};
use javagen_ir::ClientModels;
use serde::Serialize;

use super::{Analysis, CompilationContext, Diagnostic, Plugin};

/// What a `{phase}.json` file contains.
#[derive(Debug, Serialize)]
pub struct PhaseSnapshot<'a> {
    pub phase: &'a str,
    /// Whether mappers read a management-transformed code model.
    pub transformed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_models: Option<&'a ClientModels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<&'a Analysis>,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> PhaseSnapshot<'a> {
    pub fn capture(phase: &'a str, ctx: &'a CompilationContext) -> Self {
        Self {
            phase,
            transformed: ctx.transformed.is_some(),
            client_models: ctx.client_models.as_ref(),
            analysis: ctx.analysis.as_ref(),
            diagnostics: &ctx.diagnostics,
        }
    }
}

/// Writes one [`PhaseSnapshot`] per completed phase into a directory.
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".javagen/debug"));
/// ```
pub struct SnapshotPlugin {
    output_dir: PathBuf,
    written: Mutex<Vec<PathBuf>>,
}

impl SnapshotPlugin {
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Snapshot files written so far, in phase order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .wrap_err_with(|| format!("failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(format!("{phase}.json"));
        let json = serde_json::to_string_pretty(&PhaseSnapshot::capture(phase, ctx))?;
        fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote pipeline snapshot");

        self.written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::{CodeModel, Settings};

    use super::*;

    fn context() -> CompilationContext {
        CompilationContext::new(CodeModel::default(), Settings::for_namespace("com.petstore"))
    }

    #[test]
    fn test_capture_before_map() {
        let ctx = context();
        let snapshot = PhaseSnapshot::capture("validate", &ctx);
        assert!(!snapshot.transformed);
        assert!(snapshot.client_models.is_none());
        assert!(snapshot.diagnostics.is_empty());
    }

    #[test]
    fn test_snapshot_written_per_phase() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = SnapshotPlugin::with_output_dir(dir.path().join("debug"));
        let mut ctx = context();
        ctx.add_warning("validate", "schema 'Pet' has no description");

        plugin.on_after_phase("validate", &mut ctx).unwrap();

        let path = plugin.output_dir().join("validate.json");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"phase\": \"validate\""));
        assert!(written.contains("has no description"));
        assert!(!written.contains("client_models"));
        assert_eq!(plugin.written(), vec![path]);
    }
}
