//! Compilation pipeline for code generation.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the compilation
//! phases from the parsed code model to the client model. The pipeline provides:
//!
//! - Explicit phase boundaries (validate → transform → map → analyze)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared computation via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use javagen_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(code_model, settings)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//!
//! let generator = JavaGenerator::from_context(ctx)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{Analysis, CompilationContext};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
