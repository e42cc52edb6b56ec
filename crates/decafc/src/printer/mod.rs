//! Textual projections of the tree
//!
//! - [`Canonical`]: one-line `Kind(child,...)` dump for structural comparison
//! - [`PrettyPrinter`]: re-indented source with provenance comments
//!
//! Both are read-only traversals and may run before or after analysis. Only
//! the pretty printer's provenance comments depend on analysis having run.

mod canonical;
mod pretty;

pub use canonical::Canonical;
pub use pretty::{PrettyPrinter, pretty_print};

/// Configuration options for the pretty printer
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Append `// using decl on line: N` to assignments and call statements
    pub provenance_comments: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            provenance_comments: true,
        }
    }
}
