//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic as Report, Label, Severity as ReportSeverity};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};
use thiserror::Error;

use super::Line;
use crate::sema::{Diagnostic, Severity};

/// Errors raised while building or emitting a tree
///
/// Semantic problems found by the analyzer are not errors in this sense; they
/// are collected as [`Diagnostic`]s and never abort anything.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("invalid assignment target at line {line}: expected a variable or array location, found {found}")]
    InvalidLvalue { found: &'static str, line: Line },

    #[error("invalid for-loop clause at line {line}: expected an assignment or call, found {found}")]
    InvalidForClause { found: &'static str, line: Line },

    #[error("diagnostic rendering failed: {0}")]
    Render(#[from] codespan_reporting::files::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn invalid_lvalue(found: &'static str, line: Line) -> Self {
        Self::InvalidLvalue { found, line }
    }

    pub fn invalid_for_clause(found: &'static str, line: Line) -> Self {
        Self::InvalidForClause { found, line }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
///
/// Without a registered source file diagnostics are rendered as bare messages;
/// once [`add_file`](Self::add_file) has been called each one is labelled with
/// the offending source line.
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    file_id: Option<usize>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            file_id: None,
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    /// Register the source the tree was built from. Later diagnostics label it.
    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        let id = self.files.add(name.into(), source.into());
        self.file_id = Some(id);
        id
    }

    pub fn report_error(&self, error: &CompileError) {
        let report = match error {
            CompileError::InvalidLvalue { line, .. } => {
                let report = Report::error().with_message("Invalid assignment target");
                self.attach_line(report, *line, error.to_string())
            }
            CompileError::InvalidForClause { line, .. } => {
                let report = Report::error().with_message("Invalid for-loop clause");
                self.attach_line(report, *line, error.to_string())
            }
            CompileError::Render(err) => {
                Report::error().with_message(format!("Rendering error: {err}"))
            }
            CompileError::Fmt(err) => {
                Report::error().with_message(format!("Formatting error: {err}"))
            }
            CompileError::Io(err) => Report::error().with_message(format!("IO error: {err}")),
        };

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &report);
    }

    /// Emit one semantic diagnostic to stderr
    pub fn report(&self, diagnostic: &Diagnostic) {
        let report = self.to_report(diagnostic);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &report);
    }

    pub fn report_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    /// Render diagnostics without colour, e.g. for snapshotting
    pub fn render(&self, diagnostics: &[Diagnostic]) -> CompileResult<String> {
        let mut buffer = NoColor::new(Vec::new());
        for diagnostic in diagnostics {
            term::emit(&mut buffer, &self.config, &self.files, &self.to_report(diagnostic))?;
        }
        Ok(String::from_utf8_lossy(&buffer.into_inner()).into_owned())
    }

    fn to_report(&self, diagnostic: &Diagnostic) -> Report<usize> {
        let severity = match diagnostic.severity {
            Severity::Note => ReportSeverity::Note,
            Severity::Warning => ReportSeverity::Warning,
            Severity::Error => ReportSeverity::Error,
        };
        let issue = &diagnostic.issue;
        let mut report = Report::new(severity).with_message(issue.to_string());

        if let Some(previous) = issue.previous().filter(|l| l.is_known()) {
            report = report.with_notes(vec![format!("previously declared on line {previous}")]);
        }

        let label = match issue.name() {
            Some(name) => format!("`{name}` here"),
            None => String::new(),
        };
        self.attach_line(report, issue.line(), label)
    }

    fn attach_line(&self, report: Report<usize>, line: Line, message: String) -> Report<usize> {
        let range = self
            .file_id
            .zip(line.index())
            .and_then(|(id, index)| self.files.line_range(id, index).ok().map(|r| (id, r)));

        match range {
            Some((id, range)) => {
                report.with_labels(vec![Label::primary(id, range).with_message(message)])
            }
            None => report,
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sema::{SemanticIssue, TypeTag, UseWhat};

    #[test]
    fn test_render_without_source() {
        let reporter = DiagnosticReporter::new();
        let diagnostics = vec![Diagnostic::error(SemanticIssue::Undeclared {
            what: UseWhat::Variable,
            name: "y".into(),
            line: Line::new(3),
        })];

        let out = reporter.render(&diagnostics).unwrap();
        assert!(out.contains("error"));
        assert!(out.contains("variable 'y' not declared (line 3)"));
    }

    #[test]
    fn test_render_labels_registered_source() {
        let mut reporter = DiagnosticReporter::new();
        reporter.add_file("test.decaf", "package P {\n  var x int;\n}\n");
        let diagnostics = vec![Diagnostic::note(SemanticIssue::Defined {
            name: "x".into(),
            ty: TypeTag::Int,
            line: Line::new(2),
        })];

        let out = reporter.render(&diagnostics).unwrap();
        assert!(out.contains("test.decaf:2"));
        assert!(out.contains("var x int;"));
    }

    #[test]
    fn test_invalid_lvalue_message() {
        let err = CompileError::invalid_lvalue("NumberExpr", Line::new(9));
        assert_eq!(
            err.to_string(),
            "invalid assignment target at line 9: expected a variable or array location, found NumberExpr"
        );
    }

    #[test]
    fn test_invalid_for_clause_message() {
        let err = CompileError::invalid_for_clause("WhileStmt", Line::new(4));
        assert_eq!(
            err.to_string(),
            "invalid for-loop clause at line 4: expected an assignment or call, found WhileStmt"
        );
    }
}
