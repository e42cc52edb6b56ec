//! Compilation driver and pipeline orchestration
//!
//! Runs the passes over a tree handed in by an external parser: semantic
//! analysis first, then the two textual projections. Diagnostics never stop
//! the pipeline; dump and pretty output are produced regardless.

use std::io::Write;

use tracing::debug;

use crate::ast::Program;
use crate::common::{CompileResult, DiagnosticReporter};
use crate::printer::{Canonical, PrettyConfig, pretty_print};
use crate::sema::{Analysis, AnalyzerConfig, SemanticAnalyzer};

/// Which passes to run and how
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub analyze: bool,
    pub dump: bool,
    pub pretty: bool,
    pub analyzer: AnalyzerConfig,
    pub pretty_config: PrettyConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            analyze: true,
            dump: true,
            pretty: true,
            analyzer: AnalyzerConfig::default(),
            pretty_config: PrettyConfig::default(),
        }
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub analysis: Analysis,
    pub dump: Option<String>,
    pub pretty: Option<String>,
}

impl PipelineOutput {
    /// Dump line followed by the pretty-printed source
    pub fn write_to(&self, out: &mut impl Write) -> CompileResult<()> {
        if let Some(dump) = &self.dump {
            writeln!(out, "{dump}")?;
        }
        if let Some(pretty) = &self.pretty {
            out.write_all(pretty.as_bytes())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Send every diagnostic through the reporter
    pub fn report(&self, reporter: &DiagnosticReporter) {
        reporter.report_all(&self.analysis.diagnostics);
    }
}

/// Analysis, dump and pretty-print over one program
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, program: &mut Program) -> PipelineOutput {
        let analysis = if self.config.analyze {
            SemanticAnalyzer::with_config(self.config.analyzer.clone()).analyze(program)
        } else {
            Analysis::default()
        };

        let dump = self.config.dump.then(|| program.canonical());
        let pretty = self
            .config
            .pretty
            .then(|| pretty_print(program, &self.config.pretty_config));

        debug!(
            diagnostics = analysis.diagnostics.len(),
            dumped = dump.is_some(),
            pretty = pretty.is_some(),
            "pipeline finished"
        );

        PipelineOutput {
            analysis,
            dump,
            pretty,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::common::Line;
    use pretty_assertions::assert_eq;

    fn program() -> Program {
        let l = Line::new;
        let body = MethodBlock::new(
            None,
            Some(vec![Stmt::ret(Some(Expr::variable("y", l(2))), l(2))].into()),
            l(1),
        );
        let method = MethodDecl::new("f", Some(Type::int(l(1))), NodeList::new(), Some(body), l(1));
        Program::new(
            NodeList::new(),
            Some(Package::new("P", NodeList::new(), vec![method].into(), l(1))),
            l(1),
        )
    }

    #[test]
    fn test_default_runs_everything() {
        let mut program = program();
        let output = Pipeline::default().run(&mut program);

        assert_eq!(output.analysis.errors().count(), 1);
        assert_eq!(
            output.dump.as_deref(),
            Some("Program(None,Package(P,None,Method(f,IntType,None,MethodBlock(None,ReturnStmt(VariableExpr(y))))))")
        );
        assert_eq!(
            output.pretty.as_deref(),
            Some("package P {\n  func f() int {\n    return y;\n  }\n}\n")
        );
    }

    #[test]
    fn test_skipped_passes() {
        let mut program = program();
        let pipeline = Pipeline::new(PipelineConfig {
            analyze: false,
            pretty: false,
            ..PipelineConfig::default()
        });
        let output = pipeline.run(&mut program);

        assert!(output.analysis.diagnostics.is_empty());
        assert!(output.dump.is_some());
        assert!(output.pretty.is_none());
    }

    #[test]
    fn test_write_to() {
        let output = PipelineOutput {
            analysis: Analysis::default(),
            dump: Some("Program(None,None)".into()),
            pretty: Some("package P {\n}\n".into()),
        };
        let mut buffer = Vec::new();
        output.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Program(None,None)\npackage P {\n}\n");
    }
}
