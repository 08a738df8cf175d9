//! Core utilities and types for the javagen Java SDK generator.
//!
//! This crate provides the generated-file abstraction and the naming
//! rules shared by every stage of the generator.

mod file;
pub mod naming;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
// Naming utilities
pub use naming::{escape_comment, escape_xml_comment, to_camel_case, to_pascal_case};
