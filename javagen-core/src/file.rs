use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};

/// A file that knows where it goes and how to render itself.
pub trait GeneratedFile {
    /// Location of the file under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    fn render(&self) -> String;

    fn write(&self, base: &Path) -> Result<WriteResult> {
        self.rules().apply(&self.path(base), &self.render())
    }
}

/// Outcome of writing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// A create-once file was already present and left alone.
    Skipped,
}

/// Rendered content bound for a path relative to the output directory.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// A file that is rewritten on every run.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn write_to(&self, base: &Path) -> Result<WriteResult> {
        self.rules.apply(&base.join(&self.path), &self.content)
    }
}

/// What to do when the target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Generated sources: always replaced.
    Always,
    /// Files the user may edit after the first run, such as `pom.xml`.
    IfMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }
}

impl FileRules {
    pub fn create_once() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }

    fn apply(&self, path: &Path, content: &str) -> Result<WriteResult> {
        if self.overwrite == Overwrite::IfMissing && path.exists() {
            tracing::debug!(path = %path.display(), "kept existing file");
            return Ok(WriteResult::Skipped);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        tracing::trace!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_package_dirs() {
        let temp = TempDir::new().unwrap();
        let file = File::new("src/main/java/com/petstore/Pet.java", "class Pet {}");

        assert_eq!(file.write_to(temp.path()).unwrap(), WriteResult::Written);
        let written = temp.path().join("src/main/java/com/petstore/Pet.java");
        assert_eq!(fs::read_to_string(written).unwrap(), "class Pet {}");
    }

    #[test]
    fn test_generated_sources_are_replaced() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Pet.java"), "original").unwrap();

        let result = File::new("Pet.java", "updated").write_to(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(temp.path().join("Pet.java")).unwrap(), "updated");
    }

    #[test]
    fn test_create_once() {
        let temp = TempDir::new().unwrap();
        let pom = File::new("pom.xml", "<project/>").with_rules(FileRules::create_once());

        assert_eq!(pom.write_to(temp.path()).unwrap(), WriteResult::Written);
        fs::write(temp.path().join("pom.xml"), "edited").unwrap();
        assert_eq!(pom.write_to(temp.path()).unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(temp.path().join("pom.xml")).unwrap(), "edited");
    }

    #[test]
    fn test_generated_file_default_rules() {
        struct ModuleInfo;
        impl GeneratedFile for ModuleInfo {
            fn path(&self, base: &Path) -> PathBuf {
                base.join("src/main/java/module-info.java")
            }
            fn render(&self) -> String {
                "module com.petstore {\n}\n".to_string()
            }
        }

        let temp = TempDir::new().unwrap();
        assert_eq!(ModuleInfo.rules(), FileRules::default());
        assert_eq!(ModuleInfo.write(temp.path()).unwrap(), WriteResult::Written);
        assert!(temp.path().join("src/main/java/module-info.java").exists());
    }
}
