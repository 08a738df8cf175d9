//! Service clients, method groups and their proxies.

use serde::Serialize;

use crate::{ClassType, ClientMethod, IType, ProxyMethod};

/// A proxy interface, nested in the class that owns it.
#[derive(Debug, Clone, Serialize)]
pub struct Proxy {
    /// Interface name, e.g. `PetsService`.
    pub name: String,
    /// Name in `@ServiceInterface`, e.g. `PetStoreClientPets`.
    pub service_interface_name: String,
    pub base_url: String,
    pub methods: Vec<ProxyMethod>,
}

impl Proxy {
    pub fn method(&self, name: &str) -> Option<&ProxyMethod> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Implementation class of one operation group.
#[derive(Debug, Clone, Serialize)]
pub struct MethodGroupClient {
    /// Operation group name as given by the code model.
    pub name: String,
    /// Implementation class, e.g. `PetsImpl`.
    pub class_name: String,
    /// Interface implemented in management mode, e.g. `PetsClient`.
    pub interface_name: Option<String>,
    /// Field on the service client, e.g. `pets`.
    pub variable_name: String,
    /// Getter on the service client, e.g. `getPets`.
    pub getter_name: String,
    pub package: String,
    pub description: String,
    pub proxy: Proxy,
    pub client_methods: Vec<ClientMethod>,
}

/// A property held by the service client implementation.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceClientProperty {
    pub name: String,
    pub client_type: IType,
    pub description: String,
    pub read_only: bool,
    pub default_value: Option<String>,
}

impl ServiceClientProperty {
    pub fn getter_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("get{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => "get".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialKind {
    Key,
    TokenCredential,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityInfo {
    pub kind: CredentialKind,
    pub header_name: Option<String>,
    pub scopes: Vec<String>,
}

/// A public client class exposed by the builder.
#[derive(Debug, Clone, Serialize)]
pub struct PublicClient {
    pub class_name: String,
    /// Variable name of the wrapped method group; `None` for ungrouped operations.
    pub method_group: Option<String>,
    pub description: String,
}

/// Versions supported by a service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceVersion {
    pub class_name: String,
    pub package: String,
    pub service_name: String,
    pub versions: Vec<ServiceVersionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceVersionEntry {
    pub constant: String,
    pub value: String,
}

impl ServiceVersion {
    /// The last declared version.
    pub fn latest(&self) -> Option<&ServiceVersionEntry> {
        self.versions.last()
    }

    pub fn class_type(&self) -> ClassType {
        ClassType::new(&self.package, &self.class_name)
    }
}

/// A service client with its builder, implementation and method groups.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceClient {
    /// Public client base name, e.g. `PetStoreClient`.
    pub name: String,
    pub service_name: String,
    pub builder_name: String,
    /// Implementation class, e.g. `PetStoreClientImpl`.
    pub impl_name: String,
    /// Interface implemented in management mode.
    pub interface_name: Option<String>,
    /// Package of the implementation class.
    pub package: String,
    /// Package of the public clients and builder.
    pub client_package: String,
    pub description: String,
    pub service_version: Option<ServiceVersion>,
    pub properties: Vec<ServiceClientProperty>,
    pub method_groups: Vec<MethodGroupClient>,
    /// Proxy of the ungrouped operations.
    pub proxy: Option<Proxy>,
    pub client_methods: Vec<ClientMethod>,
    pub security: Option<SecurityInfo>,
    pub clients: Vec<PublicClient>,
}

impl ServiceClient {
    pub fn property(&self, name: &str) -> Option<&ServiceClientProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn method_group(&self, variable_name: &str) -> Option<&MethodGroupClient> {
        self.method_groups
            .iter()
            .find(|g| g.variable_name == variable_name)
    }

    pub fn impl_type(&self) -> ClassType {
        ClassType::new(&self.package, &self.impl_name)
    }

    /// Every client method, grouped ones included.
    pub fn all_client_methods(&self) -> impl Iterator<Item = &ClientMethod> {
        self.client_methods
            .iter()
            .chain(self.method_groups.iter().flat_map(|g| g.client_methods.iter()))
    }
}

/// Entry point of a management SDK.
#[derive(Debug, Clone, Serialize)]
pub struct FluentManager {
    /// e.g. `PetStoreManager`.
    pub name: String,
    pub package: String,
    pub service_name: String,
    pub description: String,
    pub client_interface: ClassType,
    pub client_impl: ClassType,
    pub client_builder: ClassType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_getter_name() {
        let p = ServiceClientProperty {
            name: "endpoint".into(),
            client_type: IType::string(),
            description: String::new(),
            read_only: true,
            default_value: None,
        };
        assert_eq!(p.getter_name(), "getEndpoint");
    }

    #[test]
    fn test_latest_service_version() {
        let version = ServiceVersion {
            class_name: "PetStoreServiceVersion".into(),
            package: "com.petstore".into(),
            service_name: "PetStore".into(),
            versions: vec![
                ServiceVersionEntry {
                    constant: "V2021_01_01".into(),
                    value: "2021-01-01".into(),
                },
                ServiceVersionEntry {
                    constant: "V2022_01_01".into(),
                    value: "2022-01-01".into(),
                },
            ],
        };
        assert_eq!(version.latest().unwrap().constant, "V2022_01_01");
        assert_eq!(version.class_type().full_name(), "com.petstore.PetStoreServiceVersion");
    }
}
