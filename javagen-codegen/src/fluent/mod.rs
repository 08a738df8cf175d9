//! Management (fluent) flavor of the generator.
//!
//! Management libraries reshape the code model before mapping (see
//! [`transform`]) and rename a few classes afterwards: models returned by
//! operations become `{Name}Inner` in the fluent models package, and the
//! service client is wrapped by a `{Service}Manager` entry point.

mod transforms;

use std::collections::BTreeSet;

use javagen_codemodel::{CodeModel, Operation, Settings};
use javagen_ir::{ClassType, FluentManager, ServiceClient};

pub use transforms::transform;

const INNER_SUFFIX: &str = "Inner";

/// Objects returned as the body of a paged operation.
pub fn page_models(code_model: &CodeModel) -> BTreeSet<String> {
    code_model
        .operations()
        .filter(|(_, op)| op.paging.is_some())
        .filter_map(|(_, op)| success_object(code_model, op))
        .collect()
}

/// Objects surfaced to callers as operation results: single-response bodies
/// and the items of paged responses.
pub fn inner_models(code_model: &CodeModel) -> BTreeSet<String> {
    let pages = page_models(code_model);
    let mut inner = BTreeSet::new();

    for (_, op) in code_model.operations() {
        let Some(body) = success_object(code_model, op) else {
            continue;
        };
        match &op.paging {
            None => {
                inner.insert(body);
            }
            Some(paging) => {
                let item = code_model
                    .object(&body)
                    .and_then(|page| page.property(&paging.item_name))
                    .and_then(|p| p.schema.element())
                    .and_then(|e| e.as_named())
                    .filter(|name| is_local_object(code_model, name));
                inner.extend(item.map(str::to_string));
            }
        }
    }

    inner.retain(|name| !pages.contains(name));
    inner
}

fn success_object(code_model: &CodeModel, op: &Operation) -> Option<String> {
    op.success_schema()
        .and_then(|body| body.as_named())
        .filter(|name| is_local_object(code_model, name))
        .map(str::to_string)
}

/// Whether `name` is an object generated in this library.
fn is_local_object(code_model: &CodeModel, name: &str) -> bool {
    code_model
        .object(name)
        .is_some_and(|object| object.namespace.is_none())
}

pub fn inner_name(name: &str) -> String {
    if name.ends_with(INNER_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{INNER_SUFFIX}")
    }
}

/// Name of the service client interface, e.g. `PetStoreManagementClient`.
pub fn management_client_name(service_name: &str) -> String {
    format!("{service_name}ManagementClient")
}

/// The `{Service}Manager` entry point wrapping `client`.
pub fn map_manager(settings: &Settings, client: &ServiceClient) -> FluentManager {
    let name = format!("{}Manager", client.service_name);
    FluentManager {
        description: format!("Entry point to {name}."),
        name,
        package: settings.namespace().to_string(),
        service_name: client.service_name.clone(),
        client_interface: ClassType::new(&client.client_package, &client.name),
        client_impl: ClassType::new(&client.package, &client.impl_name),
        client_builder: ClassType::new(&client.package, &client.builder_name),
    }
}
