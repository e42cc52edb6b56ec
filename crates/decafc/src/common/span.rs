//! Source line anchors

use std::fmt;

/// A 1-based source line, or unknown.
///
/// Every AST node carries one of these as its diagnostic anchor. Unknown lines
/// render as `-1`, which is also what unresolved provenance comments show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Line(Option<u32>);

impl Line {
    pub const UNKNOWN: Line = Line(None);

    pub fn new(line: u32) -> Self {
        Self(Some(line))
    }

    pub fn get(self) -> Option<u32> {
        self.0
    }

    pub fn is_known(self) -> bool {
        self.0.is_some()
    }

    /// Zero-based line index, as used by `codespan_reporting::files`
    pub fn index(self) -> Option<usize> {
        self.0.and_then(|l| (l as usize).checked_sub(1))
    }
}

impl From<u32> for Line {
    fn from(line: u32) -> Self {
        Self::new(line)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, "{line}"),
            None => f.write_str("-1"),
        }
    }
}
