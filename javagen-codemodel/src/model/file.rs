use std::path::{Path, PathBuf};

use super::CodeModel;
use crate::Result;

/// A code model file with both raw content and the parsed model.
pub struct CodeModelFile {
    path: PathBuf,
    content: String,
    model: CodeModel,
}

impl CodeModelFile {
    /// Open and parse a code model file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let model = CodeModel::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            model,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed code model.
    pub fn model(&self) -> &CodeModel {
        &self.model
    }

    /// Consume the file and keep the model.
    pub fn into_model(self) -> CodeModel {
        self.model
    }
}
