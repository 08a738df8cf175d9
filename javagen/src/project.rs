//! Loading of `javagen.toml` and the code model it points at.

use std::path::{Path, PathBuf};

use javagen_codemodel::{CodeModel, CodeModelFile, Flavor, Mode, Settings, SettingsFile};

/// Command-line values taking precedence over `javagen.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub code_model: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub flavor: Option<Flavor>,
    pub mode: Option<Mode>,
}

/// A settings file together with its parsed code model.
pub struct Project {
    pub config_path: PathBuf,
    pub settings: Settings,
    pub code_model: CodeModel,
}

impl Project {
    /// Open `config` and the code model it names.
    ///
    /// Paths in the settings file are relative to the file itself; paths
    /// given as overrides are taken as they are.
    pub fn open(config: &Path, overrides: &Overrides) -> javagen_codemodel::Result<Self> {
        let file = SettingsFile::open(config)?;
        let base_dir = file.base_dir().to_path_buf();
        let mut settings = file.into_settings();

        let generator = &mut settings.generator;
        generator.code_model = match &overrides.code_model {
            Some(path) => path.clone(),
            None => base_dir.join(&generator.code_model),
        };
        generator.output = match &overrides.output {
            Some(path) => path.clone(),
            None => base_dir.join(&generator.output),
        };
        if let Some(flavor) = overrides.flavor {
            generator.flavor = flavor;
        }
        if let Some(mode) = overrides.mode {
            generator.mode = mode;
        }

        tracing::debug!(
            code_model = %generator.code_model.display(),
            flavor = generator.flavor.as_str(),
            mode = generator.mode.as_str(),
            "loaded settings"
        );
        let code_model = CodeModelFile::open(&generator.code_model)?.into_model();

        Ok(Self {
            config_path: config.to_path_buf(),
            settings,
            code_model,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.settings.generator.output
    }
}
