//! Templates rendering the client model into Java files.
//!
//! Each template takes one element of the client model and returns a
//! [`JavaFile`](crate::ast::JavaFile) (or a [`GeneratedFile`] for non-Java
//! outputs). Templates never touch the filesystem.
//!
//! [`GeneratedFile`]: javagen_core::GeneratedFile

mod builder;
mod client;
mod client_method;
mod enums;
mod fluent;
mod merge_patch_helper;
mod method_group;
mod model;
mod multipart_helper;
mod package_info;
mod pom;
mod proxy;
mod service_client;
mod service_version;

pub use builder::ClientBuilderTemplate;
pub use client::ClientTemplate;
pub use client_method::ClientMethodTemplate;
pub use enums::EnumTemplate;
pub use fluent::{FluentInterfacesTemplate, FluentManagerTemplate};
pub use merge_patch_helper::JsonMergePatchHelperTemplate;
pub use method_group::MethodGroupTemplate;
pub use model::ModelTemplate;
pub use multipart_helper::{MultipartFormDataHelperTemplate, needs_multipart_helper};
pub use package_info::{ModuleInfoTemplate, PackageInfoTemplate};
pub use pom::PomTemplate;
pub use proxy::ProxyTemplate;
pub use service_client::ServiceClientTemplate;
pub use service_version::ServiceVersionTemplate;

use javagen_codegen::RuntimeClass;

use crate::ast::{JavaAnnotation, JavaContext};

/// `@Fluent` or `@Immutable`, or the clientcore `@Metadata` equivalent.
pub(crate) fn class_marker(ctx: &mut JavaContext, immutable: bool) -> JavaAnnotation {
    if ctx.is_azure() {
        let class = if immutable {
            RuntimeClass::Immutable
        } else {
            RuntimeClass::Fluent
        };
        JavaAnnotation::new(ctx.runtime_class(class))
    } else {
        ctx.runtime_class(RuntimeClass::Metadata);
        ctx.runtime_class(RuntimeClass::MetadataProperties);
        let property = if immutable { "IMMUTABLE" } else { "FLUENT" };
        JavaAnnotation::raw(format!(
            "@Metadata(properties = {{ MetadataProperties.{property} }})"
        ))
    }
}

/// Upper-case the first character, e.g. `pets` to `Pets`.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
