use serde::Deserialize;

use crate::Parameter;

/// A service client declared by the code model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Service name used for the service version enum and the fluent manager.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Supported api versions, oldest first.
    #[serde(default)]
    pub api_versions: Vec<String>,
    #[serde(default)]
    pub global_parameters: Vec<Parameter>,
    #[serde(default)]
    pub security: Option<Security>,
    /// Operation groups served by this client. Empty means all of them.
    #[serde(default)]
    pub operation_groups: Vec<String>,
}

impl Client {
    /// The service name, derived from the client name when absent.
    pub fn service_name(&self) -> &str {
        self.service_name.as_deref().unwrap_or_else(|| {
            self.name
                .strip_suffix("Client")
                .filter(|s| !s.is_empty())
                .unwrap_or(&self.name)
        })
    }

    /// Whether this client serves the operation group with the given name.
    pub fn serves(&self, group: &str) -> bool {
        self.operation_groups.is_empty() || self.operation_groups.iter().any(|g| g == group)
    }

    pub fn latest_api_version(&self) -> Option<&str> {
        self.api_versions.last().map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Security {
    pub kind: SecurityKind,
    /// Header carrying the key for `key` security.
    #[serde(default)]
    pub header_name: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityKind {
    Key,
    Oauth2,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str) -> Client {
        serde_json::from_str(&format!(r#"{{"name": "{name}"}}"#)).unwrap()
    }

    #[test]
    fn test_service_name_from_client_name() {
        assert_eq!(client("PetStoreClient").service_name(), "PetStore");
        assert_eq!(client("Client").service_name(), "Client");
        assert_eq!(client("PetStore").service_name(), "PetStore");
    }

    #[test]
    fn test_serves_all_groups_when_empty() {
        let mut c = client("PetStoreClient");
        assert!(c.serves("Pets"));
        c.operation_groups = vec!["Owners".into()];
        assert!(!c.serves("Pets"));
        assert!(c.serves("Owners"));
    }
}
