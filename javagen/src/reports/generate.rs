//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Root Java package of the library.
    pub namespace: String,
    /// Runtime flavor, e.g. `azure`.
    pub flavor: String,
    /// Library mode, e.g. `data-plane`.
    pub mode: String,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    pub model_count: usize,
    pub enum_count: usize,
    pub client_count: usize,
    pub method_count: usize,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files written by this run.
    pub written: Vec<String>,
    /// Create-once files left untouched.
    pub skipped: Vec<String>,
    /// Path to pipeline snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(debug_dir) = &written.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        out.preformatted(&format!("{} ({}, {})", self.namespace, self.flavor, self.mode));
        out.newline();
        out.preformatted(&format!(
            "  {} models, {} enums, {} clients, {} methods",
            self.model_count, self.enum_count, self.client_count, self.method_count
        ));
        out.newline();

        out.key_value("Generated", &written.output_dir.display().to_string());
        out.preformatted(&format!(
            "  {} written, {} skipped",
            written.written.len(),
            written.skipped.len()
        ));

        if !written.skipped.is_empty() {
            out.newline();
            out.section("Kept existing files");
            for path in &written.skipped {
                out.skipped_item(path);
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
