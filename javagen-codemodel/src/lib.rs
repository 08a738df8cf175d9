//! Code model input of the javagen generator.
//!
//! The code model is a YAML (or JSON) description of a service: its schemas,
//! operation groups and clients. It is parsed once and treated as read-only
//! by everything downstream.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod client;
mod error;
mod model;
mod operation;
mod schema;
mod settings;
mod type_expr;

pub use client::{Client, Security, SecurityKind};
pub use error::{Error, Result, SourceContext};
pub use model::{CodeModel, CodeModelFile, Info, find_name_spans};
pub use operation::{
    ContinuationToken, Header, HttpMethod, HttpRequest, Implementation, LongRunning, Operation,
    OperationGroup, Paging, Parameter, ParameterLocation, Response, StatusCode,
};
pub use schema::{
    ChoiceSchema, ChoiceValue, ConstantSchema, ObjectSchema, Property, SchemaRef, Schemas,
    UnionSchema, Usage,
};
pub use settings::{
    Flavor, FluentSettings, GeneratorSettings, LicenseHeader, Mode, Settings, SettingsFile,
};
pub use type_expr::{PrimitiveKind, TypeExpr, TypeExprError};
