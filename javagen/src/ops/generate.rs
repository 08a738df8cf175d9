//! Generate operation - Java sources from the code model.

use eyre::{Context, Result};
use javagen_codegen::pipeline::{Pipeline, SnapshotPlugin};
use javagen_java::{Generator, LanguageCodegen};

use crate::{
    project::Project,
    reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult},
};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to write pipeline snapshots.
    pub visualize: bool,
}

/// Directory receiving pipeline snapshots, under the output directory.
const DEBUG_DIR: &str = ".javagen/debug";

/// Execute the generate operation.
///
/// Runs the pipeline on the code model and renders the Java library.
pub fn generate(project: Project, opts: GenerateOptions) -> Result<GenerateReport> {
    let output_dir = project.output_dir().to_path_buf();
    let debug_dir = output_dir.join(DEBUG_DIR);

    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }
    let ctx = pipeline
        .run(project.code_model, project.settings)
        .wrap_err("Pipeline failed")?;

    let warnings: Vec<String> = ctx.warnings().map(|d| d.message.clone()).collect();
    let generator = Generator::from_context(&ctx)?;

    let result = if opts.dry_run {
        let files = generator
            .preview()?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let generated = generator
            .generate(&output_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written(WrittenResult {
            output_dir: output_dir.clone(),
            written: generated.written,
            skipped: generated.skipped,
            debug_dir: opts.visualize.then_some(debug_dir),
        })
    };

    let generator_settings = &ctx.settings.generator;
    let (model_count, enum_count, client_count, method_count) = ctx
        .analysis
        .as_ref()
        .map(|a| (a.model_count, a.enum_count, a.client_count, a.method_count))
        .unwrap_or_default();

    Ok(GenerateReport {
        namespace: generator_settings.namespace.clone(),
        flavor: generator_settings.flavor.as_str().to_string(),
        mode: generator_settings.mode.as_str().to_string(),
        warnings,
        model_count,
        enum_count,
        client_count,
        method_count,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::project::Overrides;

    const SETTINGS: &str = r#"
[generator]
namespace = "com.petstore"
code-model = "petstore.yaml"
output = "out"
"#;

    const CODE_MODEL: &str = r#"
info:
  title: PetStore
schemas:
  objects:
    - name: Pet
      properties:
        - name: name
          schema: string
          required: true
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
"#;

    fn open(dir: &Path) -> Project {
        std::fs::write(dir.join("javagen.toml"), SETTINGS).unwrap();
        std::fs::write(dir.join("petstore.yaml"), CODE_MODEL).unwrap();
        Project::open(&dir.join("javagen.toml"), &Overrides::default()).unwrap()
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = generate(
            open(dir.path()),
            GenerateOptions {
                dry_run: true,
                visualize: false,
            },
        )
        .unwrap();

        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected a preview");
        };
        assert!(preview.files.iter().any(|f| f.path == "pom.xml"));
        assert!(!dir.path().join("out").exists());
        assert_eq!(report.model_count, 1);
        assert_eq!(report.client_count, 1);
    }

    #[test]
    fn test_generate_with_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let report = generate(
            open(dir.path()),
            GenerateOptions {
                dry_run: false,
                visualize: true,
            },
        )
        .unwrap();

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written files");
        };
        assert!(written.skipped.is_empty());
        assert!(dir.path().join("out/pom.xml").exists());
        assert!(dir.path().join("out/.javagen/debug/map.json").exists());
        assert_eq!(report.namespace, "com.petstore");
    }
}
