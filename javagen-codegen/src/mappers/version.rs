use javagen_codemodel::Client;
use javagen_ir::{ServiceVersion, ServiceVersionEntry};

/// Enum class name for the versions of `service_name`.
pub fn version_class_name(service_name: &str) -> String {
    if service_name.ends_with("Service") {
        format!("{service_name}Version")
    } else {
        format!("{service_name}ServiceVersion")
    }
}

/// Constant naming an api version, e.g. `V2022_11_01_PREVIEW`.
pub fn version_constant(version: &str) -> String {
    let body: String = version
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("V{body}")
}

/// The service version enum of `client`, when it declares api versions.
pub fn map_service_version(client: &Client, service_name: &str, package: &str) -> Option<ServiceVersion> {
    if client.api_versions.is_empty() {
        return None;
    }

    Some(ServiceVersion {
        class_name: version_class_name(service_name),
        package: package.to_string(),
        service_name: service_name.to_string(),
        versions: client
            .api_versions
            .iter()
            .map(|version| ServiceVersionEntry {
                constant: version_constant(version),
                value: version.clone(),
            })
            .collect(),
    })
}
