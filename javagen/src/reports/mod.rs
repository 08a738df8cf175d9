//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod info;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};
pub use info::{ClientInfo, InfoReport, Stats};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
