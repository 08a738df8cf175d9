//! The interface between the pipeline and a source generator.

use std::path::Path;

use eyre::Result;

/// Renders a compiled client model into source files.
pub trait LanguageCodegen {
    /// Target language, e.g. `java`.
    fn language(&self) -> &'static str;

    /// Extension of the generated sources, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Every file with its content, nothing written.
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Write every file under `output_dir`, honoring each file's write rules.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Paths, relative to the output directory, touched by [`LanguageCodegen::generate`].
#[derive(Debug, Default)]
pub struct GenerateResult {
    pub written: Vec<String>,
    /// Create-once files that already existed and were kept.
    pub skipped: Vec<String>,
}

impl GenerateResult {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative to the output directory, `/`-separated.
    pub path: String,
    pub content: String,
}
