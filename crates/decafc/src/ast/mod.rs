//! Abstract Syntax Tree definitions
//!
//! The tree is built by an external parser and handed over complete. Every
//! node owns its children outright; optional children are `Option`s, never
//! placeholder nodes.

mod decl;
mod expr;
mod list;
mod stmt;
mod types;

pub use decl::*;
pub use expr::*;
pub use list::NodeList;
pub use stmt::*;
pub use types::*;

use crate::common::Line;

/// A complete Decaf program: extern declarations followed by one package
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub externs: NodeList<ExternFunction>,
    pub package: Option<Package>,
    pub line: Line,
}

impl Program {
    pub fn new(externs: NodeList<ExternFunction>, package: Option<Package>, line: Line) -> Self {
        Self { externs, package, line }
    }
}
