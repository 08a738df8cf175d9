//! Compilation pipeline and shared code generation utilities for javagen.
//!
//! This crate turns a parsed code model into the client model that the Java
//! generator (`javagen-java`) renders.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Phases, plugins and the compilation context
//! - [`mappers`] - Code model to client model mapping
//! - [`fluent`] - Management (fluent) transforms and naming
//! - [`runtime`] - Runtime classes of the target client flavor
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`language`] - Language generator abstractions (LanguageCodegen, PreviewFile)

pub mod builder;
pub mod fluent;
pub mod language;
pub mod mappers;
pub mod pipeline;
pub mod runtime;

pub use mappers::{MapperContext, map_client_models};
pub use pipeline::{CompilationContext, Diagnostic, Pipeline, Severity};
pub use runtime::{Runtime, RuntimeClass};
