//! The Maven project file.

use std::path::{Path, PathBuf};

use javagen_codegen::Runtime;
use javagen_codemodel::Settings;
use javagen_core::{FileRules, GeneratedFile, escape_xml_comment};

/// Renders `pom.xml`.
///
/// The file belongs to the user once created: it is written only when
/// missing.
pub struct PomTemplate<'a> {
    settings: &'a Settings,
    description: String,
}

/// Maven `groupId` and `artifactId` of a library rooted at `namespace`.
///
/// `com.azure.pets.store` maps to `com.azure:azure-pets-store`; other
/// namespaces keep everything but the last segment as group id.
pub fn maven_coordinates(namespace: &str) -> (String, String) {
    if let Some(rest) = namespace.strip_prefix("com.azure.") {
        return ("com.azure".to_string(), format!("azure-{}", rest.replace('.', "-")));
    }
    match namespace.rsplit_once('.') {
        Some((group, artifact)) => (group.to_string(), artifact.to_string()),
        None => (namespace.to_string(), namespace.to_string()),
    }
}

impl<'a> PomTemplate<'a> {
    pub fn new(settings: &'a Settings, description: impl Into<String>) -> Self {
        Self {
            settings,
            description: description.into(),
        }
    }

    fn header(&self) -> String {
        let lines = self.settings.generator.license_header.lines();
        if lines.is_empty() {
            return String::new();
        }
        let text: Vec<String> = lines
            .iter()
            .map(|line| escape_xml_comment(line.trim_start_matches("//").trim()))
            .collect();
        format!("<!--\n  {}\n-->\n", text.join("\n  "))
    }
}

impl GeneratedFile for PomTemplate<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("pom.xml")
    }

    fn rules(&self) -> FileRules {
        FileRules::create_once()
    }

    fn render(&self) -> String {
        let (group_id, artifact_id) = maven_coordinates(self.settings.namespace());
        let runtime = Runtime::new(self.settings.flavor());

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&self.header());
        out.push_str("<project xmlns=\"http://maven.apache.org/POM/4.0.0\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd\">\n");
        out.push_str("  <modelVersion>4.0.0</modelVersion>\n");
        out.push_str(&format!("  <groupId>{group_id}</groupId>\n"));
        out.push_str(&format!("  <artifactId>{artifact_id}</artifactId>\n"));
        out.push_str("  <version>1.0.0-beta.1</version>\n");
        out.push_str("  <packaging>jar</packaging>\n\n");
        out.push_str(&format!("  <name>{}</name>\n", escape_xml_comment(&self.description)));
        out.push_str(&format!(
            "  <description>This package contains {}.</description>\n\n",
            escape_xml_comment(&self.description)
        ));
        out.push_str("  <properties>\n");
        out.push_str("    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>\n");
        out.push_str("    <maven.compiler.release>11</maven.compiler.release>\n");
        out.push_str("  </properties>\n\n");

        out.push_str("  <dependencies>\n");
        for dependency in runtime.maven_dependencies(self.settings.is_management()) {
            out.push_str("    <dependency>\n");
            out.push_str(&format!("      <groupId>{}</groupId>\n", dependency.group_id));
            out.push_str(&format!("      <artifactId>{}</artifactId>\n", dependency.artifact_id));
            out.push_str(&format!("      <version>{}</version>\n", dependency.version));
            if let Some(scope) = dependency.scope {
                out.push_str(&format!("      <scope>{scope}</scope>\n"));
            }
            out.push_str("    </dependency>\n");
        }
        out.push_str("  </dependencies>\n");
        out.push_str("</project>\n");
        out
    }
}
