//! Text emission shared by the Java templates.
//!
//! Syntax nodes lower themselves to [`CodeFragment`]s through [`Renderable`];
//! a [`CodeBuilder`] lays the fragments out with Java's four-space indentation.

mod code_builder;
mod renderable;

pub use code_builder::CodeBuilder;
pub use renderable::{CodeFragment, Renderable};
