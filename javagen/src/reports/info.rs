//! Info command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data describing a code model.
#[derive(Debug)]
pub struct InfoReport {
    /// Service title.
    pub title: String,
    pub description: Option<String>,
    pub namespace: String,
    pub flavor: String,
    pub mode: String,
    pub config_path: PathBuf,
    pub code_model_path: PathBuf,
    pub stats: Stats,
    pub clients: Vec<ClientInfo>,
}

/// Schema and operation counts.
#[derive(Debug, Default)]
pub struct Stats {
    pub objects: usize,
    /// Expandable and sealed choices together.
    pub enums: usize,
    pub constants: usize,
    pub unions: usize,
    pub operation_groups: usize,
    pub operations: usize,
}

/// One client of the code model.
#[derive(Debug)]
pub struct ClientInfo {
    pub name: String,
    pub api_versions: Vec<String>,
    /// Groups the client serves; empty means all.
    pub operation_groups: Vec<String>,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.title);
        if let Some(desc) = &self.description {
            out.preformatted(desc);
        }
        out.newline();

        out.key_value("Namespace", &self.namespace);
        out.key_value("Flavor", &self.flavor);
        out.key_value("Mode", &self.mode);
        out.key_value("Config", &self.config_path.display().to_string());
        out.key_value("Code model", &self.code_model_path.display().to_string());
        out.newline();

        out.section("Schemas");
        out.list_item(&format!("{} objects", self.stats.objects));
        out.list_item(&format!("{} enums", self.stats.enums));
        out.list_item(&format!("{} constants", self.stats.constants));
        out.list_item(&format!("{} unions", self.stats.unions));
        out.newline();

        out.section("Operations");
        out.list_item(&format!(
            "{} operations in {} groups",
            self.stats.operations, self.stats.operation_groups
        ));

        if !self.clients.is_empty() {
            out.newline();
            out.section("Clients");
            for client in &self.clients {
                let versions = if client.api_versions.is_empty() {
                    String::new()
                } else {
                    format!(" (api versions: {})", client.api_versions.join(", "))
                };
                let groups = if client.operation_groups.is_empty() {
                    "all groups".to_string()
                } else {
                    client.operation_groups.join(", ")
                };
                out.list_item(&format!("{}{} serving {}", client.name, versions, groups));
            }
        }
    }
}
