//! Semantic analysis module
//!
//! This module performs scoped name resolution and redeclaration checks.

mod analyzer;
mod diagnostic;
mod scope;

pub use analyzer::{Analysis, SemanticAnalyzer};
pub use diagnostic::{DeclWhat, Diagnostic, SemanticIssue, Severity, UseWhat};
pub use scope::{SymDescriptor, SymbolStack, SymbolTable, TypeTag};

/// Configuration options for the analysis pass
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Emit a note for every successfully defined variable
    pub report_definitions: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            report_definitions: true,
        }
    }
}
