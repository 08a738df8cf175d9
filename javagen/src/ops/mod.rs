//! Core operations.
//!
//! This module contains the logic behind the javagen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod info;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use info::info;
