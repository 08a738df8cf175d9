//! Clients to service clients, method groups and public facades.

use eyre::{Result, WrapErr};
use indexmap::IndexMap;
use javagen_codemodel::{
    Client, CodeModel, OperationGroup, Parameter, SecurityKind, Settings,
};
use javagen_core::{naming, to_camel_case};
use javagen_ir::{
    ClientMethod, CredentialKind, IType, MethodGroupClient, Proxy, PublicClient, SecurityInfo,
    ServiceClient, ServiceClientProperty, ServiceVersion,
};

use super::{
    MapperContext,
    client_method::map_client_methods,
    proxy::{ProxyScope, is_client_parameter, is_endpoint, map_proxy_methods},
    types::map_type,
    version::map_service_version,
};
use crate::fluent;

const BASE_URL: &str = "{endpoint}";

/// Clients to generate.
///
/// A code model declaring operations but no client gets one client named
/// after the service.
pub fn clients_of(code_model: &CodeModel, settings: &Settings) -> Vec<Client> {
    if !code_model.clients.is_empty() || code_model.operation_count() == 0 {
        return code_model.clients.clone();
    }

    let service = settings
        .generator
        .service_name
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| code_model.info.title.clone());
    let mut name = naming::get_client_name(&service);
    if name.is_empty() {
        name = "Service".to_string();
    }
    if !name.ends_with("Client") {
        name.push_str("Client");
    }
    tracing::debug!(client = %name, "no client declared, using an implicit one");

    vec![Client {
        name,
        description: code_model.info.description.clone(),
        service_name: None,
        api_versions: Vec::new(),
        global_parameters: Vec::new(),
        security: None,
        operation_groups: Vec::new(),
    }]
}

/// Service name of a mapped client.
fn service_name_of(settings: &Settings, client: &Client) -> String {
    settings
        .generator
        .service_name
        .clone()
        .unwrap_or_else(|| naming::get_type_name(client.service_name()))
}

/// Properties held by the service client implementation.
fn properties_of(
    ctx: &MapperContext<'_>,
    client: &Client,
    groups: &[&OperationGroup],
    service_version: Option<&ServiceVersion>,
) -> Result<Vec<ServiceClientProperty>> {
    let mut properties: IndexMap<String, ServiceClientProperty> = IndexMap::new();
    properties.insert(
        "endpoint".to_string(),
        ServiceClientProperty {
            name: "endpoint".to_string(),
            client_type: IType::string(),
            description: "Service host".to_string(),
            read_only: true,
            default_value: None,
        },
    );
    if let Some(version) = service_version {
        properties.insert(
            "serviceVersion".to_string(),
            ServiceClientProperty {
                name: "serviceVersion".to_string(),
                client_type: IType::Class(version.class_type()),
                description: "Service version".to_string(),
                read_only: true,
                default_value: None,
            },
        );
    }

    let operation_parameters = groups
        .iter()
        .flat_map(|g| g.operations.iter())
        .flat_map(|op| op.parameters.iter())
        .filter(|p| is_client_parameter(p));

    for parameter in client.global_parameters.iter().chain(operation_parameters) {
        if is_endpoint(parameter) || (parameter.is_api_version() && service_version.is_some()) {
            continue;
        }
        let property = client_property(ctx, parameter)?;
        properties.entry(property.name.clone()).or_insert(property);
    }

    Ok(properties.into_values().collect())
}

fn client_property(ctx: &MapperContext<'_>, parameter: &Parameter) -> Result<ServiceClientProperty> {
    let name = if parameter.is_api_version() {
        "apiVersion".to_string()
    } else {
        naming::get_parameter_name(&parameter.name)
    };
    let mut mapped = map_type(ctx, &parameter.schema)?;
    if !parameter.required {
        mapped = mapped.nullable();
    }

    Ok(ServiceClientProperty {
        description: parameter
            .description
            .clone()
            .unwrap_or_else(|| format!("The {name} parameter.")),
        default_value: parameter
            .client_default_value
            .as_deref()
            .map(|value| mapped.client.default_value_expr(value)),
        client_type: mapped.client,
        read_only: true,
        name,
    })
}

/// Proxy and client methods of the operations in `group`.
fn map_operations(
    ctx: &MapperContext<'_>,
    scope: &ProxyScope<'_>,
    group: &OperationGroup,
) -> Result<(Vec<javagen_ir::ProxyMethod>, Vec<ClientMethod>)> {
    let mut proxy_methods = Vec::new();
    let mut client_methods = Vec::new();

    for op in &group.operations {
        let proxies = map_proxy_methods(ctx, scope, op)
            .wrap_err_with(|| format!("failed to map operation '{}'", op.name))?;
        client_methods.extend(
            map_client_methods(ctx, op, &proxies)
                .wrap_err_with(|| format!("failed to map operation '{}'", op.name))?,
        );
        proxy_methods.extend(proxies);
    }

    Ok((proxy_methods, client_methods))
}

fn security_of(ctx: &mut MapperContext<'_>, client: &Client) -> Option<SecurityInfo> {
    let security = client.security.as_ref()?;
    let kind = match security.kind {
        SecurityKind::Key => CredentialKind::Key,
        SecurityKind::Oauth2 if ctx.runtime.is_azure() => CredentialKind::TokenCredential,
        SecurityKind::Oauth2 => {
            ctx.warn(
                format!(
                    "oauth2 is not supported by the unbranded flavor, client '{}' is generated without a credential",
                    client.name
                ),
                format!("clients.{}", client.name),
            );
            return None;
        }
    };

    Some(SecurityInfo {
        kind,
        header_name: security.header_name.clone(),
        scopes: security.scopes.clone(),
    })
}

/// Map one client.
pub fn map_service_client(ctx: &mut MapperContext<'_>, client: &Client) -> Result<ServiceClient> {
    let settings = ctx.settings;
    let code_model = ctx.code_model;
    let management = ctx.is_management();
    let service_name = service_name_of(settings, client);

    let (name, interface_name, client_package) = if management {
        let name = fluent::management_client_name(&service_name);
        (name.clone(), Some(name), settings.fluent_package())
    } else {
        (
            naming::get_client_name(&client.name),
            None,
            settings.namespace().to_string(),
        )
    };
    let impl_name = format!("{name}Impl");
    let builder_name = format!("{name}Builder");
    let implementation_package = settings.implementation_package();

    let service_version = map_service_version(client, &service_name, settings.namespace());
    let groups: Vec<&OperationGroup> = code_model.groups_of(client).collect();

    let mut method_groups = Vec::new();
    let mut proxy = None;
    let mut client_methods = Vec::new();
    for group in &groups {
        if group.is_ungrouped() {
            let scope = ProxyScope {
                client,
                receiver: "this",
            };
            let (methods, clients) = map_operations(ctx, &scope, group)?;
            proxy = Some(Proxy {
                name: format!("{name}Service"),
                service_interface_name: name.clone(),
                base_url: BASE_URL.to_string(),
                methods,
            });
            client_methods = clients;
            continue;
        }

        let scope = ProxyScope {
            client,
            receiver: "this.client",
        };
        let (methods, clients) = map_operations(ctx, &scope, group)?;
        let group_name = naming::get_method_group_name(&group.name);
        let (class_name, interface) = if management {
            (
                format!("{group_name}ClientImpl"),
                Some(format!("{group_name}Client")),
            )
        } else {
            (format!("{group_name}Impl"), None)
        };

        method_groups.push(MethodGroupClient {
            name: group.name.clone(),
            class_name,
            interface_name: interface,
            variable_name: to_camel_case(&group_name),
            getter_name: format!("get{group_name}"),
            package: implementation_package.clone(),
            description: group
                .description
                .clone()
                .unwrap_or_else(|| format!("An instance of this class provides access to all the operations defined in {group_name}.")),
            proxy: Proxy {
                name: format!("{group_name}Service"),
                service_interface_name: format!("{name}{group_name}"),
                base_url: BASE_URL.to_string(),
                methods,
            },
            client_methods: clients,
        });
    }

    let clients = if management {
        Vec::new()
    } else {
        public_clients(&name, &method_groups, proxy.is_some())
    };

    Ok(ServiceClient {
        description: client
            .description
            .clone()
            .unwrap_or_else(|| format!("Initializes a new instance of the {name} type.")),
        properties: properties_of(ctx, client, &groups, service_version.as_ref())?,
        security: security_of(ctx, client),
        package: implementation_package,
        service_name,
        name,
        builder_name,
        impl_name,
        interface_name,
        client_package,
        service_version,
        method_groups,
        proxy,
        client_methods,
        clients,
    })
}

/// One facade per method group, plus one for the ungrouped operations.
fn public_clients(name: &str, groups: &[MethodGroupClient], ungrouped: bool) -> Vec<PublicClient> {
    let mut clients = Vec::new();
    if ungrouped || groups.is_empty() {
        clients.push(PublicClient {
            class_name: name.to_string(),
            method_group: None,
            description: format!("Initializes a new instance of the synchronous {name} type."),
        });
    }
    for group in groups {
        let class_name = format!("{}Client", group.class_name.trim_end_matches("Impl"));
        clients.push(PublicClient {
            description: format!("Initializes a new instance of the synchronous {class_name} type."),
            class_name,
            method_group: Some(group.variable_name.clone()),
        });
    }
    clients
}

#[cfg(test)]
mod tests {
    use javagen_codemodel::{Flavor, Mode};

    use super::*;
    use crate::mappers::tests::code_model;

    const STORE: &str = r#"
info:
  title: Pet Store
schemas:
  objects:
    - name: Pet
operation-groups:
  - name: ""
    operations:
      - name: ping
        request:
          method: get
          path: /ping
        responses:
          - status-codes: [204]
  - name: pets
    operations:
      - name: get
        request:
          method: get
          path: /pets/{petId}
        parameters:
          - name: petId
            location: path
            schema: string
            required: true
          - name: tenant
            location: header
            schema: string
            required: true
            implementation: client
          - name: api-version
            location: query
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Pet
clients:
  - name: PetStoreClient
    api-versions: ["2023-01-01", "2024-01-01"]
    security:
      kind: oauth2
      scopes: ["https://petstore/.default"]
"#;

    fn map(settings: &Settings) -> (ServiceClient, usize) {
        let model = code_model(STORE);
        let mut ctx = MapperContext::new(&model, settings);
        let client = map_service_client(&mut ctx, &model.clients[0]).unwrap();
        (client, ctx.diagnostics.len())
    }

    #[test]
    fn test_data_plane_client() {
        let settings = Settings::for_namespace("com.petstore");
        let (client, _) = map(&settings);

        assert_eq!(client.name, "PetStoreClient");
        assert_eq!(client.builder_name, "PetStoreClientBuilder");
        assert_eq!(client.impl_type().full_name(), "com.petstore.implementation.PetStoreClientImpl");
        assert_eq!(client.service_name, "PetStore");
        assert_eq!(client.service_version.as_ref().unwrap().class_name, "PetStoreServiceVersion");

        let property_names: Vec<_> = client.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(property_names, vec!["endpoint", "serviceVersion", "tenant"]);

        let pets = client.method_group("pets").unwrap();
        assert_eq!(pets.class_name, "PetsImpl");
        assert_eq!(pets.getter_name, "getPets");
        assert_eq!(pets.proxy.service_interface_name, "PetStoreClientPets");
        let get = pets.proxy.method("get").unwrap();
        let tenant = get.parameters.iter().find(|p| p.name == "tenant").unwrap();
        assert_eq!(tenant.client_accessor.as_deref(), Some("this.client.getTenant()"));

        let ungrouped = client.proxy.as_ref().unwrap();
        assert_eq!(ungrouped.name, "PetStoreClientService");
        let endpoint = &ungrouped.methods[0].parameters[0];
        assert_eq!(endpoint.client_accessor.as_deref(), Some("this.getEndpoint()"));

        let facades: Vec<_> = client.clients.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(facades, vec!["PetStoreClient", "PetsClient"]);
        assert_eq!(client.security.as_ref().unwrap().kind, CredentialKind::TokenCredential);
        assert_eq!(client.all_client_methods().count(), 4);
    }

    #[test]
    fn test_unbranded_oauth2_warns() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.flavor = Flavor::Unbranded;
        let (client, warnings) = map(&settings);

        assert!(client.security.is_none());
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_management_names() {
        let mut settings = Settings::for_namespace("com.petstore");
        settings.generator.mode = Mode::Management;
        let (client, _) = map(&settings);

        assert_eq!(client.name, "PetStoreManagementClient");
        assert_eq!(client.interface_name.as_deref(), Some("PetStoreManagementClient"));
        assert_eq!(client.client_package, "com.petstore.fluent");
        let pets = client.method_group("pets").unwrap();
        assert_eq!(pets.class_name, "PetsClientImpl");
        assert_eq!(pets.interface_name.as_deref(), Some("PetsClient"));
        assert!(client.clients.is_empty());
    }

    #[test]
    fn test_implicit_client() {
        let model = code_model(
            r#"
info:
  title: pet store
operation-groups:
  - name: ""
    operations:
      - name: ping
        request:
          method: get
          path: /ping
        responses:
          - status-codes: [204]
"#,
        );
        let settings = Settings::for_namespace("com.petstore");
        let clients = clients_of(&model, &settings);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "PetStoreClient");

        let empty = code_model("schemas: {}\n");
        assert!(clients_of(&empty, &settings).is_empty());
    }
}
