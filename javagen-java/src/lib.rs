//! Java code generation for javagen.
//!
//! This crate renders a mapped [`ClientModels`](javagen_ir::ClientModels)
//! into the sources of a Java client library:
//!
//! - [`ast`] - Java syntax builders (`JavaFile`, `JavaClass`, `JavaMethod`, ...)
//! - [`templates`] - one template per generated artifact
//! - [`postprocess`] - clean-up applied to every Java source
//! - [`Generator`] - the [`LanguageCodegen`] tying them together

pub mod ast;
mod generator;
pub mod postprocess;
pub mod templates;

pub use generator::Generator;
pub use javagen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
