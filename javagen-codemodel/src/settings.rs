//! Generator settings read from `javagen.toml`.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Root of `javagen.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub fluent: FluentSettings,
}

/// The `[generator]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Root Java package of the generated library.
    pub namespace: String,
    #[serde(default = "default_code_model")]
    pub code_model: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub flavor: Flavor,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_models_subpackage")]
    pub models_subpackage: String,
    #[serde(default = "default_implementation_subpackage")]
    pub implementation_subpackage: String,
    #[serde(default)]
    pub license_header: LicenseHeader,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default = "default_true")]
    pub required_fields_as_ctor_args: bool,
    #[serde(default)]
    pub client_side_validations: bool,
    #[serde(default = "default_true")]
    pub generate_pom: bool,
    #[serde(default = "default_true")]
    pub generate_module_info: bool,
}

fn default_code_model() -> PathBuf {
    PathBuf::from("code-model.yaml")
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

fn default_models_subpackage() -> String {
    "models".to_string()
}

fn default_implementation_subpackage() -> String {
    "implementation".to_string()
}

fn default_true() -> bool {
    true
}

/// The client runtime the generated code targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    /// azure-core runtime.
    #[default]
    Azure,
    /// clientcore runtime.
    Unbranded,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Azure => "azure",
            Flavor::Unbranded => "unbranded",
        }
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "azure" => Ok(Flavor::Azure),
            "unbranded" => Ok(Flavor::Unbranded),
            other => Err(format!("unknown flavor '{other}', expected azure or unbranded")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    DataPlane,
    /// Resource-management (fluent) libraries.
    Management,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::DataPlane => "data-plane",
            Mode::Management => "management",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "data-plane" => Ok(Mode::DataPlane),
            "management" => Ok(Mode::Management),
            other => Err(format!(
                "unknown mode '{other}', expected data-plane or management"
            )),
        }
    }
}

/// License header written at the top of every Java file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LicenseHeader {
    #[default]
    MicrosoftMit,
    None,
    /// Free text, one comment line per line of text.
    Custom(String),
}

impl From<String> for LicenseHeader {
    fn from(value: String) -> Self {
        match value.as_str() {
            "microsoft-mit" => LicenseHeader::MicrosoftMit,
            "none" | "" => LicenseHeader::None,
            _ => LicenseHeader::Custom(value),
        }
    }
}

impl LicenseHeader {
    /// Comment lines of the header, without trailing newline.
    pub fn lines(&self) -> Vec<String> {
        match self {
            LicenseHeader::MicrosoftMit => vec![
                "// Copyright (c) Microsoft Corporation. All rights reserved.".to_string(),
                "// Licensed under the MIT License.".to_string(),
                "// Code generated by Microsoft (R) TypeSpec Code Generator.".to_string(),
            ],
            LicenseHeader::None => Vec::new(),
            LicenseHeader::Custom(text) => text
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "//".to_string()
                    } else {
                        format!("// {line}")
                    }
                })
                .collect(),
        }
    }
}

/// The `[fluent]` section, only read in management mode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FluentSettings {
    #[serde(default)]
    pub rename_model: BTreeMap<String, String>,
    #[serde(default)]
    pub remove_operation_group: Vec<String>,
    #[serde(default)]
    pub preserve_model: Vec<String>,
    #[serde(default)]
    pub name_for_ungrouped_operations: Option<String>,
}

impl FromStr for Settings {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_settings(s, "javagen.toml")
    }
}

impl Settings {
    /// Build settings for a namespace with every other value defaulted.
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            generator: GeneratorSettings {
                namespace: namespace.into(),
                code_model: default_code_model(),
                output: default_output(),
                flavor: Flavor::default(),
                mode: Mode::default(),
                models_subpackage: default_models_subpackage(),
                implementation_subpackage: default_implementation_subpackage(),
                license_header: LicenseHeader::default(),
                service_name: None,
                required_fields_as_ctor_args: true,
                client_side_validations: false,
                generate_pom: true,
                generate_module_info: true,
            },
            fluent: FluentSettings::default(),
        }
    }

    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_settings(content, filename)
    }

    pub fn namespace(&self) -> &str {
        &self.generator.namespace
    }

    pub fn flavor(&self) -> Flavor {
        self.generator.flavor
    }

    pub fn is_management(&self) -> bool {
        self.generator.mode == Mode::Management
    }

    /// Package of public models.
    pub fn models_package(&self) -> String {
        format!(
            "{}.{}",
            self.generator.namespace, self.generator.models_subpackage
        )
    }

    /// Package of implementation classes.
    pub fn implementation_package(&self) -> String {
        format!(
            "{}.{}",
            self.generator.namespace, self.generator.implementation_subpackage
        )
    }

    /// Package of internal models.
    pub fn implementation_models_package(&self) -> String {
        format!(
            "{}.{}",
            self.implementation_package(),
            self.generator.models_subpackage
        )
    }

    /// Package of fluent interfaces (management mode).
    pub fn fluent_package(&self) -> String {
        format!("{}.fluent", self.generator.namespace)
    }

    /// Package of inner models (management mode).
    pub fn fluent_models_package(&self) -> String {
        format!("{}.fluent.models", self.generator.namespace)
    }
}

fn parse_settings(content: &str, filename: &str) -> Result<Settings> {
    let ctx = SourceContext::new(content, filename);
    let settings: Settings = toml::from_str(content).map_err(|e| ctx.toml_error(e))?;
    validate_settings(&settings, &ctx)?;
    Ok(settings)
}

fn validate_settings(settings: &Settings, ctx: &SourceContext) -> Result<()> {
    let namespace = &settings.generator.namespace;
    if namespace.is_empty() {
        return Err(ctx.validation_error("namespace must not be empty"));
    }
    for segment in namespace.split('.') {
        if let Some(reason) = invalid_package_segment(segment) {
            return Err(ctx.validation_error_at(
                format!("invalid namespace '{namespace}': {reason}"),
                quoted_span(ctx.src(), namespace),
            ));
        }
    }

    for sub in [
        &settings.generator.models_subpackage,
        &settings.generator.implementation_subpackage,
    ] {
        if let Some(reason) = invalid_package_segment(sub) {
            return Err(ctx.validation_error_at(
                format!("invalid subpackage '{sub}': {reason}"),
                quoted_span(ctx.src(), sub),
            ));
        }
    }

    Ok(())
}

/// Span of a quoted toml string value, excluding the quotes.
fn quoted_span(src: &str, value: &str) -> Option<miette::SourceSpan> {
    src.find(&format!("\"{value}\""))
        .map(|pos| miette::SourceSpan::from((pos + 1, value.len())))
}

fn invalid_package_segment(segment: &str) -> Option<&'static str> {
    let Some(first) = segment.chars().next() else {
        return Some("package segments must not be empty");
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Some("package segments must start with a letter or underscore");
    }
    if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("package segments may only contain letters, digits and underscores");
    }
    None
}

/// A `javagen.toml` file with both raw content and parsed settings.
pub struct SettingsFile {
    path: PathBuf,
    settings: Settings,
}

impl SettingsFile {
    /// Open and parse a settings file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let settings = parse_settings(&content, &path.display().to_string())?;
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the settings file; relative paths resolve against it.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }
}
