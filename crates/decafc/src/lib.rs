//! Decaf Compiler - front-end middle for the Decaf teaching language
//!
//! This library takes a syntax tree built by an external parser, resolves
//! names against a scoped symbol stack, and projects the tree back to text.
//!
//! ## Architecture
//!
//! - **AST** (`ast/`): Node model for declarations, statements and expressions
//! - **Sema** (`sema/`): Symbol stack and the analysis pass
//! - **Printer** (`printer/`): Canonical dump and pretty printer
//! - **Driver** (`driver/`): Pipeline tying the passes together
//! - **Common** (`common/`): Shared infrastructure (errors, lines, reporting)

pub mod ast;
pub mod common;
pub mod driver;
pub mod printer;
pub mod sema;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Line};
pub use driver::{Pipeline, PipelineConfig, PipelineOutput};
pub use printer::{Canonical, PrettyConfig, PrettyPrinter, pretty_print};
pub use sema::{Analysis, AnalyzerConfig, Diagnostic, SemanticAnalyzer, SymbolStack};
