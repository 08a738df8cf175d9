//! Pipeline orchestrator.

use eyre::Result;
use javagen_codemodel::{CodeModel, Settings};

use super::{
    CompilationContext, Phase, Plugin,
    phases::{AnalyzePhase, MapPhase, TransformPhase, ValidatePhase},
};

/// Drives a code model through the built-in phases, then any extra ones.
///
/// Plugins observe every phase; the first fatal error ends the run.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".javagen/debug"))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(code_model, settings)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a code model.
    ///
    /// Executes all phases in order:
    /// 1. ValidatePhase - runs lints, collects diagnostics
    /// 2. TransformPhase - management transforms (no-op for data-plane)
    /// 3. MapPhase - maps the code model to the client model
    /// 4. AnalyzePhase - computes package and summary data
    /// 5. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, code_model: CodeModel, settings: Settings) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(code_model, settings);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(ValidatePhase::new()),
            Box::new(TransformPhase),
            Box::new(MapPhase),
            Box::new(AnalyzePhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        tracing::debug!(phase = phase_name, "{}", phase.description());

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        str::FromStr,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn make_test_code_model() -> CodeModel {
        CodeModel::from_str(
            r#"
info:
  title: Pet Store
schemas:
  objects:
    - name: Pet
      description: A pet.
      usage: [input, output]
      properties:
        - name: name
          schema: string
          required: true
          description: The name.
operation-groups:
  - name: Pets
    description: Pet operations.
    operations:
      - name: get
        description: Get a pet.
        request:
          method: get
          path: /pets/{name}
        parameters:
          - name: name
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Pet
clients:
  - name: PetStoreClient
    description: Pet store client.
"#,
        )
        .expect("code model should parse")
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let pipeline = Pipeline::new();

        let ctx = pipeline
            .run(make_test_code_model(), Settings::for_namespace("com.petstore"))
            .expect("pipeline should succeed");

        assert!(ctx.client_models.is_some());
        assert!(ctx.analysis.is_some());
        assert!(ctx.transformed.is_none());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(make_test_code_model(), Settings::for_namespace("com.petstore"))
            .expect("pipeline should succeed");

        // 4 built-in phases = 4 before + 4 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 4);
        assert_eq!(after_count.load(Ordering::SeqCst), 4);
    }

    struct PackageCountPhase;

    impl Phase for PackageCountPhase {
        fn name(&self) -> &'static str {
            "package-count"
        }

        fn description(&self) -> &'static str {
            "Warn about libraries spread over many packages"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let packages = ctx.analysis.as_ref().map_or(0, |a| a.packages.len());
            if packages > 2 {
                ctx.add_warning(self.name(), format!("{packages} packages generated"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_extra_phase_runs_after_analyze() {
        let ctx = Pipeline::new()
            .phase(PackageCountPhase)
            .run(make_test_code_model(), Settings::for_namespace("com.petstore"))
            .expect("pipeline should succeed");

        let warning = ctx
            .warnings()
            .find(|d| d.phase == "package-count")
            .expect("extra phase should warn");
        assert_eq!(warning.message, "3 packages generated");
    }

    #[test]
    fn test_pipeline_stops_on_validation_error() {
        let code_model = CodeModel::from_str(
            r#"
schemas:
  objects:
    - name: Pet
      properties:
        - name: owner
          schema: Owner
"#,
        )
        .unwrap();

        let (plugin, before_count, _) = CountingPlugin::new();
        let err = Pipeline::new()
            .plugin(plugin)
            .run(code_model, Settings::for_namespace("com.petstore"))
            .unwrap_err();

        assert!(err.to_string().contains("Validation failed"));
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
    }
}
