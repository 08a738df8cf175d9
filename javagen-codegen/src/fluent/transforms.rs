//! Code model rewrites applied before mapping a management library.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use eyre::{Result, bail};
use javagen_codemodel::{
    CodeModel, HttpMethod, Implementation, ObjectSchema, Operation, OperationGroup, Parameter,
    ParameterLocation, PrimitiveKind, Property, Settings, TypeExpr,
};

const MANAGEMENT_NAMESPACE: &str = "com.azure.core.management";
const MANAGEMENT_EXCEPTION_NAMESPACE: &str = "com.azure.core.management.exception";
const MANAGEMENT_ERROR: &str = "ManagementError";

const PROXY_RESOURCE_FIELDS: [&str; 3] = ["id", "name", "type"];
const RESOURCE_EXTRA_FIELDS: [&str; 2] = ["location", "tags"];

/// Rewrite a copy of `code_model` into the shape management libraries expect.
pub fn transform(code_model: &CodeModel, settings: &Settings) -> Result<CodeModel> {
    let mut model = code_model.clone();
    let fluent = &settings.fluent;

    remove_operation_groups(&mut model, &fluent.remove_operation_group);
    if let Some(name) = &fluent.name_for_ungrouped_operations {
        rename_ungrouped_group(&mut model, name);
    }
    deduplicate_operations(&mut model);
    rename_host_parameter(&mut model);
    subscription_id_as_string(&mut model);
    normalize_parameter_location(&mut model);
    rename_models(&mut model, &fluent.rename_model)?;
    normalize_operation_names(&mut model);
    normalize_resource_types(&mut model);
    normalize_error_types(&mut model);
    cleanup_schemas(&mut model, &fluent.preserve_model);

    tracing::debug!(
        schemas = model.schemas.len(),
        operations = model.operation_count(),
        "transformed management code model"
    );
    Ok(model)
}

fn remove_operation_groups(model: &mut CodeModel, names: &[String]) {
    let removed = |group: &str| names.iter().any(|n| n.eq_ignore_ascii_case(group));

    model.operation_groups.retain(|group| {
        let remove = !group.is_ungrouped() && removed(&group.name);
        if remove {
            tracing::info!(group = %group.name, "removed operation group");
        }
        !remove
    });
    for client in &mut model.clients {
        client.operation_groups.retain(|group| !removed(group));
    }
}

fn rename_ungrouped_group(model: &mut CodeModel, name: &str) {
    if name.is_empty() {
        return;
    }
    let mut renamed = false;
    for group in model.operation_groups.iter_mut().filter(|g| g.is_ungrouped()) {
        tracing::info!(name, "renamed ungrouped operation group");
        group.name = name.to_string();
        renamed = true;
    }
    if renamed {
        for client in model.clients.iter_mut().filter(|c| !c.operation_groups.is_empty()) {
            client.operation_groups.push(name.to_string());
        }
    }
}

/// The `Operations` group often lists the same operation twice.
fn deduplicate_operations(model: &mut CodeModel) {
    let Some(group) = model
        .operation_groups
        .iter_mut()
        .find(|g| g.is_operations_listing())
    else {
        return;
    };

    let before = group.operations.len();
    let mut seen = HashSet::new();
    group.operations.retain(|op| seen.insert(op.name.clone()));
    if group.operations.len() < before {
        tracing::warn!("duplicate operations found in operation group 'Operations'");
    }
}

fn rename_host_parameter(model: &mut CodeModel) {
    for client in &mut model.clients {
        for parameter in &mut client.global_parameters {
            if parameter.serialized_name() == "$host" {
                if parameter.serialized_name.is_none() {
                    parameter.serialized_name = Some(parameter.name.clone());
                }
                parameter.name = "endpoint".to_string();
            }
        }
    }
}

fn subscription_id_as_string(model: &mut CodeModel) {
    for client in &mut model.clients {
        for parameter in &mut client.global_parameters {
            if parameter.serialized_name() == "subscriptionId"
                && parameter.schema.as_primitive() == Some(PrimitiveKind::Uuid)
            {
                parameter.schema = TypeExpr::Primitive(PrimitiveKind::String);
            }
        }
    }
}

/// Whether a client-held global parameter should be passed to each method.
fn belongs_on_method(parameter: &Parameter) -> bool {
    if parameter.implementation != Implementation::Client {
        return false;
    }
    let name = parameter.serialized_name();
    match parameter.location {
        ParameterLocation::Path => !name.eq_ignore_ascii_case("subscriptionId"),
        ParameterLocation::Query => !name.eq_ignore_ascii_case("api-version"),
        _ => false,
    }
}

/// Moves path and query globals other than the subscription id and api
/// version onto the operations of the client.
fn normalize_parameter_location(model: &mut CodeModel) {
    let mut moved: Vec<(Vec<String>, Parameter)> = Vec::new();

    for client in &mut model.clients {
        let (methods, kept): (Vec<_>, Vec<_>) = client
            .global_parameters
            .drain(..)
            .partition(belongs_on_method);
        client.global_parameters = kept;
        for mut parameter in methods {
            tracing::warn!(
                parameter = parameter.serialized_name(),
                "moved client parameter to method parameters"
            );
            parameter.implementation = Implementation::Method;
            moved.push((client.operation_groups.clone(), parameter));
        }
    }

    for (served, parameter) in moved {
        let groups = model
            .operation_groups
            .iter_mut()
            .filter(|g| g.is_ungrouped() || served.is_empty() || served.contains(&g.name));
        for op in groups.flat_map(|g| g.operations.iter_mut()) {
            let declared = op
                .parameters
                .iter()
                .any(|p| p.serialized_name() == parameter.serialized_name());
            if !declared && op.request.path.contains(&format!("{{{}}}", parameter.serialized_name()))
                || !declared && parameter.location == ParameterLocation::Query
            {
                op.parameters.push(parameter.clone());
            }
        }
    }
}

/// Rename every schema reference through `f`.
fn rename_references(model: &mut CodeModel, f: &impl Fn(&str) -> Option<String>) {
    let schemas = &mut model.schemas;
    for object in &mut schemas.objects {
        if let Some(parent) = object.parent.as_deref().and_then(f) {
            object.parent = Some(parent);
        }
        for property in &mut object.properties {
            property.schema = property.schema.rename_references(f);
        }
        if let Some(additional) = &mut object.additional_properties {
            *additional = additional.rename_references(f);
        }
    }
    for union in &mut schemas.unions {
        for variant in &mut union.variants {
            *variant = variant.rename_references(f);
        }
    }
    for constant in &mut schemas.constants {
        constant.value_type = constant.value_type.rename_references(f);
    }

    for client in &mut model.clients {
        for parameter in &mut client.global_parameters {
            parameter.schema = parameter.schema.rename_references(f);
        }
    }
    for op in model
        .operation_groups
        .iter_mut()
        .flat_map(|g| g.operations.iter_mut())
    {
        for parameter in &mut op.parameters {
            parameter.schema = parameter.schema.rename_references(f);
        }
        for response in op.responses.iter_mut().chain(op.exceptions.iter_mut()) {
            response.schema = response.schema.as_ref().map(|s| s.rename_references(f));
            for header in &mut response.headers {
                header.schema = header.schema.rename_references(f);
            }
        }
        if let Some(lro) = &mut op.long_running {
            lro.poll_result_type = lro.poll_result_type.as_ref().map(|t| t.rename_references(f));
            lro.final_result_type = lro.final_result_type.as_ref().map(|t| t.rename_references(f));
        }
    }
}

fn rename_models(model: &mut CodeModel, renames: &BTreeMap<String, String>) -> Result<()> {
    let mut applied = BTreeMap::new();
    for (from, to) in renames {
        if model.schema(from).is_none() {
            tracing::warn!(model = %from, "model to rename not found");
            continue;
        }
        if model.schema(to).is_some() {
            bail!("cannot rename model '{from}' to '{to}': a schema named '{to}' already exists");
        }
        applied.insert(from.clone(), to.clone());
    }
    if applied.is_empty() {
        return Ok(());
    }

    let rename = |name: &str| applied.get(name).cloned();
    let schemas = &mut model.schemas;
    for object in &mut schemas.objects {
        object.name = rename(&object.name).unwrap_or_else(|| object.name.clone());
    }
    for choice in schemas.choices.iter_mut().chain(schemas.sealed_choices.iter_mut()) {
        choice.name = rename(&choice.name).unwrap_or_else(|| choice.name.clone());
    }
    for constant in &mut schemas.constants {
        constant.name = rename(&constant.name).unwrap_or_else(|| constant.name.clone());
    }
    for union in &mut schemas.unions {
        union.name = rename(&union.name).unwrap_or_else(|| union.name.clone());
    }
    rename_references(model, &rename);

    for (from, to) in &applied {
        tracing::info!(from = %from, to = %to, "renamed model");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum WellKnownName {
    List,
    ListByResourceGroup,
    GetByResourceGroup,
    Delete,
}

impl WellKnownName {
    fn method_name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::ListByResourceGroup => "listByResourceGroup",
            Self::GetByResourceGroup => "getByResourceGroup",
            Self::Delete => "delete",
        }
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    path.trim().trim_matches('/').split('/').collect()
}

fn segment_is(segments: &[&str], index: usize, expected: &str) -> bool {
    segments
        .get(index)
        .is_some_and(|s| s.eq_ignore_ascii_case(expected))
}

/// `subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}`
fn is_resource_group_instance_path(segments: &[&str]) -> bool {
    segments.len() == 8
        && segment_is(segments, 0, "subscriptions")
        && segment_is(segments, 2, "resourceGroups")
        && segment_is(segments, 4, "providers")
}

/// Whether the operation returns an object with an array `value`.
fn returns_list(model: &CodeModel, op: &Operation) -> bool {
    op.success_schema()
        .and_then(|body| body.as_named())
        .and_then(|name| model.object(name))
        .and_then(|page| page.property("value"))
        .is_some_and(|value| matches!(value.schema, TypeExpr::Array(_)))
}

fn well_known_name(model: &CodeModel, op: &Operation) -> Option<WellKnownName> {
    let segments = path_segments(&op.request.path);
    match op.request.method {
        HttpMethod::Get if is_resource_group_instance_path(&segments) => {
            Some(WellKnownName::GetByResourceGroup)
        }
        HttpMethod::Get
            if (segments.len() == 5 || segments.len() == 7)
                && segment_is(&segments, 0, "subscriptions")
                && (op.paging.is_some() || returns_list(model, op)) =>
        {
            if segments.len() == 5 && segment_is(&segments, 2, "providers") {
                Some(WellKnownName::List)
            } else if (segments.len() == 7 && segment_is(&segments, 2, "resourceGroups"))
                || (segments.len() == 5 && !segment_is(&segments, 2, "providers"))
            {
                Some(WellKnownName::ListByResourceGroup)
            } else {
                None
            }
        }
        HttpMethod::Delete if is_resource_group_instance_path(&segments) => {
            Some(WellKnownName::Delete)
        }
        _ => None,
    }
}

/// Puts the resource group parameter before the resource name.
fn normalize_path_parameter_order(op: &mut Operation) {
    let segments = path_segments(&op.request.path);
    let group_parameter = segments[3].trim_matches(|c| c == '{' || c == '}').to_string();

    let path_indices: Vec<usize> = op
        .parameters
        .iter()
        .enumerate()
        .filter(|(_, p)| p.location == ParameterLocation::Path && p.implementation == Implementation::Method)
        .map(|(i, _)| i)
        .collect();
    if let [first, second] = path_indices[..]
        && op.parameters[second].serialized_name() == group_parameter
    {
        op.parameters.swap(first, second);
    }
}

fn rename_plan(model: &CodeModel, group: &OperationGroup) -> BTreeMap<String, String> {
    let mut candidates = BTreeSet::from([
        WellKnownName::List,
        WellKnownName::ListByResourceGroup,
        WellKnownName::GetByResourceGroup,
        WellKnownName::Delete,
    ]);
    let mut plan = BTreeMap::new();

    for op in &group.operations {
        let Some(name) = well_known_name(model, op) else {
            continue;
        };
        if !candidates.remove(&name) {
            continue;
        }
        if op.name != name.method_name() {
            plan.insert(op.name.clone(), name.method_name().to_string());
        }
    }
    plan
}

/// Renames the common ARM operations (`list`, `getByResourceGroup`, ...).
///
/// A rename is dropped when its new name collides with another operation.
fn normalize_operation_names(model: &mut CodeModel) {
    let plans: Vec<BTreeMap<String, String>> = model
        .operation_groups
        .iter()
        .map(|group| rename_plan(model, group))
        .collect();

    for (group, mut plan) in model.operation_groups.iter_mut().zip(plans) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for op in &group.operations {
            let name = plan.get(&op.name).map_or(op.name.as_str(), String::as_str);
            *counts.entry(name).or_default() += 1;
        }
        let conflicts: BTreeSet<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name.to_string())
            .collect();
        if !conflicts.is_empty() {
            tracing::warn!(group = %group.name, ?conflicts, "operation name conflict after rename");
            plan.retain(|_, to| !conflicts.contains(to));
        }

        for op in &mut group.operations {
            if let Some(to) = plan.get(&op.name) {
                tracing::info!(group = %group.name, from = %op.name, to = %to, "renamed operation");
                op.name = to.clone();
            }
            if matches!(op.name.as_str(), "getByResourceGroup" | "delete")
                && is_resource_group_instance_path(&path_segments(&op.request.path))
            {
                normalize_path_parameter_order(op);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourceKind {
    SubResource,
    ProxyResource,
    Resource,
}

impl ResourceKind {
    fn class_name(self) -> &'static str {
        match self {
            Self::SubResource => "SubResource",
            Self::ProxyResource => "ProxyResource",
            Self::Resource => "Resource",
        }
    }

    /// Fields declared by the runtime class.
    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::SubResource => &["id"],
            Self::ProxyResource => &PROXY_RESOURCE_FIELDS,
            Self::Resource => &["id", "name", "type", "location", "tags"],
        }
    }

    /// The runtime class as an external object schema.
    fn schema(self) -> ObjectSchema {
        let property = |name: &str, schema: TypeExpr, read_only: bool, description: &str| Property {
            name: name.to_string(),
            serialized_name: None,
            schema,
            required: false,
            read_only,
            nullable: false,
            description: Some(description.to_string()),
            client_default_value: None,
            api_versions: Vec::new(),
            deprecated: false,
        };
        let string = || TypeExpr::Primitive(PrimitiveKind::String);
        let read_only = self != Self::SubResource;

        let mut properties = vec![property(
            "id",
            string(),
            read_only,
            "The fully qualified resource ID for the resource.",
        )];
        if self != Self::SubResource {
            properties.push(property("name", string(), true, "The name of the resource."));
            properties.push(property("type", string(), true, "The type of the resource."));
        }
        if self == Self::Resource {
            properties.push(property(
                "location",
                string(),
                false,
                "The geo-location where the resource lives.",
            ));
            properties.push(property(
                "tags",
                TypeExpr::Dict(Box::new(string())),
                false,
                "Resource tags.",
            ));
        }

        external_object(self.class_name(), MANAGEMENT_NAMESPACE, properties)
    }
}

fn external_object(name: &str, namespace: &str, properties: Vec<Property>) -> ObjectSchema {
    ObjectSchema {
        name: name.to_string(),
        description: None,
        summary: None,
        namespace: Some(namespace.to_string()),
        discriminator: None,
        discriminator_value: None,
        parent: None,
        properties,
        additional_properties: None,
        usage: Vec::new(),
        deprecated: false,
        api_versions: Vec::new(),
    }
}

fn has_fields(object: &ObjectSchema, fields: &[&str]) -> bool {
    fields.iter().all(|f| object.property(f).is_some())
}

/// Resource kind of a base class, recognized by name and shape.
fn resource_kind_of(object: &ObjectSchema) -> Option<ResourceKind> {
    if object.namespace.is_some() {
        return None;
    }
    match object.name.as_str() {
        "SubResource" => Some(ResourceKind::SubResource),
        "ProxyResource" | "ExtensionResource" => Some(ResourceKind::ProxyResource),
        "TrackedResource" => Some(ResourceKind::Resource),
        "Resource" | "AzureResource" => {
            if has_fields(object, &RESOURCE_EXTRA_FIELDS) {
                Some(ResourceKind::Resource)
            } else if has_fields(object, &PROXY_RESOURCE_FIELDS) {
                Some(ResourceKind::ProxyResource)
            } else if has_fields(object, &["id"]) {
                Some(ResourceKind::SubResource)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Properties of `object` and its ancestors.
fn declared_properties(model: &CodeModel, object: &ObjectSchema) -> Vec<Property> {
    let mut properties = object.properties.clone();
    for ancestor in model.ancestors_of(&object.name) {
        properties.extend(ancestor.properties.iter().cloned());
    }
    properties
}

/// Objects derived from a local resource base now extend the runtime class.
///
/// Properties of the base that the runtime class lacks are copied down, as are
/// resource fields the base declared writable.
fn normalize_resource_types(model: &mut CodeModel) {
    let mut needed: BTreeSet<&'static str> = BTreeSet::new();
    let mut rewrites: Vec<(String, ResourceKind, Vec<Property>)> = Vec::new();

    for object in &model.schemas.objects {
        if object.namespace.is_some() {
            continue;
        }
        let parent = object.parent.as_deref().and_then(|p| model.object(p));
        let Some(parent) = parent else {
            continue;
        };
        let Some(kind) = resource_kind_of(parent) else {
            continue;
        };

        let extra: Vec<Property> = declared_properties(model, parent)
            .into_iter()
            .filter(|p| {
                let field = kind.fields().contains(&p.serialized_name());
                let writable_field = PROXY_RESOURCE_FIELDS.contains(&p.serialized_name()) && !p.read_only;
                (!field || writable_field) && object.property(p.serialized_name()).is_none()
            })
            .collect();
        rewrites.push((object.name.clone(), kind, extra));
        needed.insert(kind.class_name());
    }

    let mut adopted: Vec<(String, ResourceKind)> = Vec::new();
    for object in &model.schemas.objects {
        if object.parent.is_some()
            || object.namespace.is_some()
            || resource_kind_of(object).is_some()
            || !PROXY_RESOURCE_FIELDS
                .iter()
                .all(|f| object.property(f).is_some_and(|p| p.read_only))
        {
            continue;
        }
        let kind = if has_fields(object, &RESOURCE_EXTRA_FIELDS) {
            ResourceKind::Resource
        } else {
            ResourceKind::ProxyResource
        };
        adopted.push((object.name.clone(), kind));
        needed.insert(kind.class_name());
    }

    for (name, kind, extra) in rewrites {
        if let Some(object) = model.schemas.object_mut(&name) {
            tracing::info!(model = %name, parent = kind.class_name(), "changed resource parent");
            object.parent = Some(kind.class_name().to_string());
            object.properties.extend(extra);
        }
    }
    for (name, kind) in adopted {
        if let Some(object) = model.schemas.object_mut(&name) {
            tracing::info!(model = %name, parent = kind.class_name(), "added resource parent");
            object.parent = Some(kind.class_name().to_string());
            object.properties.retain(|p| {
                let name = p.serialized_name();
                !(PROXY_RESOURCE_FIELDS.contains(&name) && p.read_only)
                    && !(kind == ResourceKind::Resource && RESOURCE_EXTRA_FIELDS.contains(&name))
            });
        }
    }

    for kind in [ResourceKind::SubResource, ResourceKind::ProxyResource, ResourceKind::Resource] {
        if !needed.contains(kind.class_name()) {
            continue;
        }
        let schema = kind.schema();
        match model.schemas.object_mut(kind.class_name()) {
            Some(local) => *local = schema,
            None => model.schemas.objects.push(schema),
        }
    }
}

/// Whether `object`, or the object under its `error` property, has the shape
/// of the runtime `ManagementError`.
fn is_management_error(model: &CodeModel, object: &ObjectSchema) -> bool {
    let error = object
        .property("error")
        .and_then(|p| p.schema.as_named())
        .and_then(|name| model.object(name))
        .unwrap_or(object);
    has_fields(error, &["code", "message"])
}

fn normalize_error_types(model: &mut CodeModel) {
    let errors: BTreeSet<String> = model
        .operations()
        .flat_map(|(_, op)| op.exceptions.iter())
        .filter_map(|r| r.schema.as_ref()?.as_named())
        .filter(|name| {
            model
                .object(name)
                .is_some_and(|o| o.namespace.is_none() && is_management_error(model, o))
        })
        .map(str::to_string)
        .collect();
    if errors.is_empty() {
        return;
    }

    for op in model
        .operation_groups
        .iter_mut()
        .flat_map(|g| g.operations.iter_mut())
    {
        for response in &mut op.exceptions {
            if response
                .schema
                .as_ref()
                .and_then(|s| s.as_named())
                .is_some_and(|name| errors.contains(name))
            {
                response.schema = Some(TypeExpr::Named(MANAGEMENT_ERROR.to_string()));
            }
        }
    }
    for name in &errors {
        tracing::info!(model = %name, "replaced error type with ManagementError");
    }

    let string = || TypeExpr::Primitive(PrimitiveKind::String);
    let field = |name: &str| Property {
        name: name.to_string(),
        serialized_name: None,
        schema: string(),
        required: false,
        read_only: true,
        nullable: false,
        description: None,
        client_default_value: None,
        api_versions: Vec::new(),
        deprecated: false,
    };
    let schema = external_object(
        MANAGEMENT_ERROR,
        MANAGEMENT_EXCEPTION_NAMESPACE,
        vec![field("code"), field("message")],
    );
    match model.schemas.object_mut(MANAGEMENT_ERROR) {
        Some(local) => *local = schema,
        None => model.schemas.objects.push(schema),
    }
}

/// Names of every schema reachable from an operation, a client or `preserve`.
fn reachable_schemas(model: &CodeModel, preserve: &[String]) -> BTreeSet<String> {
    let mut frontier: Vec<String> = preserve.to_vec();
    for (_, op) in model.operations() {
        frontier.extend(
            op.type_references()
                .into_iter()
                .flat_map(|t| t.named_references())
                .map(str::to_string),
        );
    }
    for client in &model.clients {
        frontier.extend(
            client
                .global_parameters
                .iter()
                .flat_map(|p| p.schema.named_references())
                .map(str::to_string),
        );
    }

    let mut reachable = BTreeSet::new();
    while let Some(name) = frontier.pop() {
        if !reachable.insert(name.clone()) {
            continue;
        }
        if let Some(object) = model.object(&name) {
            frontier.extend(object.parent.iter().cloned());
            for ty in object.field_types() {
                frontier.extend(ty.named_references().into_iter().map(str::to_string));
            }
            let polymorphic = object.discriminator.is_some()
                || model
                    .ancestors_of(&name)
                    .iter()
                    .any(|a| a.discriminator.is_some());
            if polymorphic {
                frontier.extend(model.children_of(&name).iter().map(|c| c.name.clone()));
            }
        } else if let Some(union) = model.schemas.unions.iter().find(|u| u.name == name) {
            frontier.extend(
                union
                    .variants
                    .iter()
                    .flat_map(|v| v.named_references())
                    .map(str::to_string),
            );
        } else if let Some(constant) = model.schemas.constants.iter().find(|c| c.name == name) {
            frontier.extend(constant.value_type.named_references().into_iter().map(str::to_string));
        }
    }
    reachable
}

/// Drops schemas no operation can reach.
fn cleanup_schemas(model: &mut CodeModel, preserve: &[String]) {
    let reachable = reachable_schemas(model, preserve);
    let before = model.schemas.len();

    let schemas = &mut model.schemas;
    schemas.objects.retain(|s| reachable.contains(&s.name));
    schemas.choices.retain(|s| reachable.contains(&s.name));
    schemas.sealed_choices.retain(|s| reachable.contains(&s.name));
    schemas.constants.retain(|s| reachable.contains(&s.name));
    schemas.unions.retain(|s| reachable.contains(&s.name));

    let removed = before - model.schemas.len();
    if removed > 0 {
        tracing::info!(removed, "removed unused schemas");
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use javagen_codemodel::{Mode, Settings};

    use super::*;

    const WIDGETS: &str = r#"
schemas:
  objects:
    - name: TrackedResource
      properties:
        - name: id
          schema: string
          read-only: true
        - name: name
          schema: string
          read-only: true
        - name: type
          schema: string
          read-only: true
        - name: location
          schema: string
        - name: tags
          schema: dict<string>
        - name: systemData
          schema: string
          read-only: true
    - name: Widget
      parent: TrackedResource
      properties:
        - name: color
          schema: string
    - name: WidgetList
      properties:
        - name: value
          schema: array<Widget>
        - name: nextLink
          schema: string
    - name: ErrorDetail
      properties:
        - name: code
          schema: string
        - name: message
          schema: string
    - name: ErrorResponse
      properties:
        - name: error
          schema: ErrorDetail
    - name: Orphan
  sealed-choices:
    - name: Unused
      choices:
        - name: a
          value: a
operation-groups:
  - name: Widgets
    operations:
      - name: get
        request:
          method: get
          path: /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Contoso.Widgets/widgets/{widgetName}
        parameters:
          - name: widgetName
            location: path
            schema: string
            required: true
          - name: resourceGroupName
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Widget
        exceptions:
          - status-codes: [default]
            schema: ErrorResponse
      - name: listAll
        request:
          method: get
          path: /subscriptions/{subscriptionId}/providers/Contoso.Widgets/widgets
        responses:
          - status-codes: [200]
            schema: WidgetList
        paging:
          next-link-name: nextLink
      - name: listInGroup
        request:
          method: get
          path: /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Contoso.Widgets/widgets
        parameters:
          - name: resourceGroupName
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: WidgetList
        paging:
          next-link-name: nextLink
  - name: Operations
    operations:
      - name: list
        request:
          method: get
          path: /providers/Contoso.Widgets/operations
      - name: list
        request:
          method: get
          path: /providers/Contoso.Widgets/operations
  - name: Internal
    operations:
      - name: ping
        request:
          method: get
          path: /ping
clients:
  - name: WidgetsClient
    global-parameters:
      - name: $host
        location: uri
        schema: string
        implementation: client
      - name: subscriptionId
        location: path
        schema: uuid
        required: true
        implementation: client
      - name: region
        location: query
        schema: string
        implementation: client
"#;

    fn transformed(configure: impl FnOnce(&mut Settings)) -> CodeModel {
        let model = CodeModel::from_str(WIDGETS).unwrap();
        let mut settings = Settings::for_namespace("com.contoso.widgets");
        settings.generator.mode = Mode::Management;
        configure(&mut settings);
        transform(&model, &settings).unwrap()
    }

    fn operation_names(model: &CodeModel, group: &str) -> Vec<String> {
        model
            .operation_groups
            .iter()
            .find(|g| g.name == group)
            .unwrap()
            .operations
            .iter()
            .map(|op| op.name.clone())
            .collect()
    }

    #[test]
    fn test_operation_groups() {
        let model = transformed(|s| s.fluent.remove_operation_group = vec!["internal".into()]);
        let groups: Vec<_> = model.operation_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, vec!["Widgets", "Operations"]);
        assert_eq!(operation_names(&model, "Operations"), vec!["list"]);
    }

    #[test]
    fn test_well_known_operation_names() {
        let model = transformed(|_| {});
        assert_eq!(
            operation_names(&model, "Widgets"),
            vec!["getByResourceGroup", "list", "listByResourceGroup"]
        );

        let get = &model.operation_groups[0].operations[0];
        let order: Vec<_> = get.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order[..2], ["resourceGroupName", "widgetName"]);
    }

    #[test]
    fn test_global_parameters() {
        let model = transformed(|_| {});
        let globals = &model.clients[0].global_parameters;
        let names: Vec<_> = globals.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["endpoint", "subscriptionId"]);
        assert_eq!(globals[0].serialized_name(), "$host");
        assert_eq!(globals[1].schema, TypeExpr::Primitive(PrimitiveKind::String));

        let get = &model.operation_groups[0].operations[0];
        let region = get.parameters.iter().find(|p| p.name == "region").unwrap();
        assert_eq!(region.implementation, Implementation::Method);
    }

    #[test]
    fn test_resource_and_error_types() {
        let model = transformed(|_| {});

        let widget = model.object("Widget").unwrap();
        assert_eq!(widget.parent.as_deref(), Some("Resource"));
        let names: Vec<_> = widget.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["color", "systemData"]);

        let resource = model.object("Resource").unwrap();
        assert_eq!(resource.namespace.as_deref(), Some(MANAGEMENT_NAMESPACE));
        assert!(model.object("TrackedResource").is_none());

        let get = &model.operation_groups[0].operations[0];
        assert_eq!(
            get.exceptions[0].schema,
            Some(TypeExpr::Named(MANAGEMENT_ERROR.to_string()))
        );
        assert!(model.object("ErrorResponse").is_none());
    }

    #[test]
    fn test_unused_schemas_removed_unless_preserved() {
        let model = transformed(|_| {});
        assert!(model.object("Orphan").is_none());
        assert!(model.schema("Unused").is_none());

        let model = transformed(|s| s.fluent.preserve_model = vec!["Orphan".into()]);
        assert!(model.object("Orphan").is_some());
    }

    #[test]
    fn test_rename_model() {
        let model = transformed(|s| {
            s.fluent.rename_model.insert("WidgetList".into(), "WidgetListResult".into());
        });
        assert!(model.object("WidgetListResult").is_some());
        let list = &model.operation_groups[0].operations[1];
        assert_eq!(
            list.success_schema(),
            Some(&TypeExpr::Named("WidgetListResult".into()))
        );
    }

    #[test]
    fn test_rename_model_conflict() {
        let model = CodeModel::from_str(WIDGETS).unwrap();
        let mut settings = Settings::for_namespace("com.contoso.widgets");
        settings.fluent.rename_model.insert("WidgetList".into(), "Widget".into());
        let err = transform(&model, &settings).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_ungrouped_operations_renamed() {
        let mut model = CodeModel::from_str(WIDGETS).unwrap();
        model.operation_groups[2].name = String::new();
        let mut settings = Settings::for_namespace("com.contoso.widgets");
        settings.fluent.name_for_ungrouped_operations = Some("ResourceProvider".into());
        let model = transform(&model, &settings).unwrap();
        assert!(model.operation_groups.iter().any(|g| g.name == "ResourceProvider"));
    }
}
