//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`ValidatePhase`] - runs lints on the code model and collects diagnostics
//! - [`TransformPhase`] - applies management transforms to a copy of the code model
//! - [`MapPhase`] - maps the code model to the client model
//! - [`AnalyzePhase`] - computes package and summary data from the client model

mod analyze;
mod map;
mod transform;
mod validate;

pub use analyze::AnalyzePhase;
pub use map::MapPhase;
pub use transform::TransformPhase;
pub use validate::{
    DiscriminatorLint, DuplicateModelLint, EmptyDescriptionLint, Lint, PagingItemLint,
    UnbrandedLroLint, UnresolvedReferenceLint, ValidatePhase,
};
