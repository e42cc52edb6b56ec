//! Symbol table and scope management

use std::collections::HashMap;
use std::fmt;

use tracing::{trace, warn};

use crate::ast::{Type, TypeKind};
use crate::common::Line;

/// Analysis-time classification of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeTag {
    Int,
    Bool,
    String,
    Void,
    /// Absent or unrecognized type node
    #[default]
    Unknown,
}

impl TypeTag {
    /// Classify an optional type node
    pub fn classify(ty: Option<&Type>) -> Self {
        ty.map_or(TypeTag::Unknown, |ty| ty.kind.into())
    }
}

impl From<TypeKind> for TypeTag {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Int => TypeTag::Int,
            TypeKind::Bool => TypeTag::Bool,
            TypeKind::String => TypeTag::String,
            TypeKind::Void => TypeTag::Void,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeTag::Int => "int",
            TypeTag::Bool => "bool",
            TypeTag::String => "string",
            TypeTag::Void => "void",
            TypeTag::Unknown => "unknown",
        })
    }
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymDescriptor {
    pub name: String,
    pub ty: TypeTag,
    pub line: Line,
}

impl SymDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeTag, line: Line) -> Self {
        Self {
            name: name.into(),
            ty,
            line,
        }
    }
}

/// A single scope: name to descriptor
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, SymDescriptor>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new symbol, returning the existing one if the name is taken
    pub fn insert(&mut self, symbol: SymDescriptor) -> Result<(), SymDescriptor> {
        if let Some(existing) = self.symbols.get(&symbol.name) {
            return Err(existing.clone());
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Insert or replace without the duplicate check
    pub fn overwrite(&mut self, symbol: SymDescriptor) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    pub fn lookup(&self, name: &str) -> Option<&SymDescriptor> {
        self.symbols.get(name)
    }

    /// Symbols sorted by name
    pub fn sorted(&self) -> Vec<&SymDescriptor> {
        let mut symbols: Vec<_> = self.symbols.values().collect();
        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        symbols
    }
}

/// Stack of scopes; the last entry is the innermost
///
/// Owned by a single analysis pass. Lookups search innermost to outermost, so
/// an inner declaration shadows an outer one until its scope is popped.
#[derive(Debug, Default, Clone)]
pub struct SymbolStack {
    scopes: Vec<SymbolTable>,
}

impl SymbolStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.scopes.push(SymbolTable::new());
        trace!(depth = self.scopes.len(), "scope pushed");
    }

    /// Remove the innermost scope; `None` if there was nothing to pop
    pub fn pop(&mut self) -> Option<SymbolTable> {
        let popped = self.scopes.pop();
        if popped.is_some() {
            trace!(depth = self.scopes.len(), "scope popped");
        } else {
            warn!("tried to pop empty symbol stack");
        }
        popped
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Insert into the innermost scope
    ///
    /// Fails with the existing descriptor if the name is already declared in
    /// that same scope. Outer declarations are not conflicts.
    pub fn insert(&mut self, name: &str, ty: TypeTag, line: Line) -> Result<(), SymDescriptor> {
        trace!(name, %ty, %line, "insert");
        self.innermost().insert(SymDescriptor::new(name, ty, line))
    }

    /// Replace (or create) the binding in the innermost scope unconditionally
    pub fn overwrite(&mut self, name: &str, ty: TypeTag, line: Line) {
        trace!(name, %ty, %line, "overwrite");
        self.innermost().overwrite(SymDescriptor::new(name, ty, line));
    }

    /// Nearest binding, innermost first
    pub fn lookup(&self, name: &str) -> Option<&SymDescriptor> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    fn innermost(&mut self) -> &mut SymbolTable {
        if self.scopes.is_empty() {
            warn!("insert into empty symbol stack, opening a scope");
            self.scopes.push(SymbolTable::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl fmt::Display for SymbolStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Symbol Table Stack =====")?;
        for (i, scope) in self.scopes.iter().enumerate().rev() {
            writeln!(f, "Scope {i}:")?;
            for sym in scope.sorted() {
                writeln!(f, "  {} : {} (declared on line {})", sym.name, sym.ty, sym.line)?;
            }
        }
        writeln!(f, "==============================")
    }
}
