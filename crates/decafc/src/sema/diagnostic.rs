//! Diagnostics produced by semantic analysis
//!
//! Nothing here is fatal. The analyzer records every condition it finds and
//! keeps walking, so one pass reports all independent problems.

use std::fmt;

use thiserror::Error;

use super::TypeTag;
use crate::common::Line;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

/// What kind of declaration a redeclaration diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclWhat {
    Field,
    ArrayField,
    GlobalVariable,
    Parameter,
    ExternFunction,
    Method,
}

impl fmt::Display for DeclWhat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclWhat::Field => "field",
            DeclWhat::ArrayField => "array field",
            DeclWhat::GlobalVariable => "global variable",
            DeclWhat::Parameter => "parameter",
            DeclWhat::ExternFunction => "extern function",
            DeclWhat::Method => "method",
        })
    }
}

/// What kind of use an unresolved-name diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseWhat {
    Variable,
    ArrayVariable,
    Array,
    Method,
}

impl fmt::Display for UseWhat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UseWhat::Variable => "variable",
            UseWhat::ArrayVariable => "array variable",
            UseWhat::Array => "array",
            UseWhat::Method => "method",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticIssue {
    #[error("defined variable: {name}, with type: {ty}, on line number: {line}")]
    Defined { name: String, ty: TypeTag, line: Line },

    #[error("{what} '{name}' redeclared (line {line})")]
    Redeclared {
        what: DeclWhat,
        name: String,
        line: Line,
        previous: Line,
    },

    #[error("redefining previously defined identifier: {name} (line {line})")]
    Redefinition { name: String, line: Line, previous: Line },

    #[error("{what} '{name}' not declared (line {line})")]
    Undeclared { what: UseWhat, name: String, line: Line },

    #[error("tried to pop empty symbol stack")]
    EmptyScopePop,
}

impl SemanticIssue {
    pub fn name(&self) -> Option<&str> {
        match self {
            SemanticIssue::Defined { name, .. }
            | SemanticIssue::Redeclared { name, .. }
            | SemanticIssue::Redefinition { name, .. }
            | SemanticIssue::Undeclared { name, .. } => Some(name),
            SemanticIssue::EmptyScopePop => None,
        }
    }

    pub fn line(&self) -> Line {
        match self {
            SemanticIssue::Defined { line, .. }
            | SemanticIssue::Redeclared { line, .. }
            | SemanticIssue::Redefinition { line, .. }
            | SemanticIssue::Undeclared { line, .. } => *line,
            SemanticIssue::EmptyScopePop => Line::UNKNOWN,
        }
    }

    /// Line of the earlier binding a conflict refers to
    pub fn previous(&self) -> Option<Line> {
        match self {
            SemanticIssue::Redeclared { previous, .. }
            | SemanticIssue::Redefinition { previous, .. } => Some(*previous),
            _ => None,
        }
    }
}

/// One entry of the diagnostic stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub issue: SemanticIssue,
}

impl Diagnostic {
    pub fn note(issue: SemanticIssue) -> Self {
        Self {
            severity: Severity::Note,
            issue,
        }
    }

    pub fn warning(issue: SemanticIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }

    pub fn error(issue: SemanticIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Plain one-line rendering: `Error: ...`, `Warning: ...`, or the bare note
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Note => write!(f, "{}", self.issue),
            Severity::Warning => write!(f, "Warning: {}", self.issue),
            Severity::Error => write!(f, "Error: {}", self.issue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() {
        let defined = Diagnostic::note(SemanticIssue::Defined {
            name: "x".into(),
            ty: TypeTag::Int,
            line: Line::new(3),
        });
        assert_eq!(defined.to_string(), "defined variable: x, with type: int, on line number: 3");

        let redeclared = Diagnostic::error(SemanticIssue::Redeclared {
            what: DeclWhat::ArrayField,
            name: "a".into(),
            line: Line::new(4),
            previous: Line::new(2),
        });
        assert_eq!(redeclared.to_string(), "Error: array field 'a' redeclared (line 4)");
        assert_eq!(redeclared.issue.previous(), Some(Line::new(2)));

        let pop = Diagnostic::warning(SemanticIssue::EmptyScopePop);
        assert_eq!(pop.to_string(), "Warning: tried to pop empty symbol stack");
        assert_eq!(pop.issue.name(), None);
    }
}
