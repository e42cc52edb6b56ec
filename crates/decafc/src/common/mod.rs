//! Common infrastructure shared across the AST, analysis and printers

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::Line;
