//! Verification pipeline: raw lines -> verdict.
//!
//! Thin orchestrator over the passes. Each non-blank line is lexed,
//! classified, run through the scope builder (pass 1) and syntax-checked
//! (pass 2) as it arrives; once the input is exhausted the semantics pass
//! (pass 3) runs over the whole annotated line list.

use crate::error::VerifyError;
use crate::lexer::lex_line;
use crate::line::Line;
use crate::pass1_build::ScopeBuilder;
use crate::pass2_syntax::check_syntax;
use crate::pass3_semantics::validate_semantics;
use crate::source::{FileSystemProvider, SourceProvider};
use crate::tables::Tables;
use std::io::BufRead;
use std::path::Path;

/// A successful run: the annotated lines and the final tables.
#[derive(Debug)]
pub struct Verification {
    pub lines: Vec<Line>,
    pub tables: Tables,
}

/// Outcome of verifying one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid(VerifyError),
    /// The source could not be read. Never produced by content problems.
    IoFailure(String),
}

impl Verdict {
    /// 0 legal, 1 illegal, 2 unreadable.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Valid => 0,
            Verdict::Invalid(_) => 1,
            Verdict::IoFailure(_) => 2,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl From<Result<Verification, VerifyError>> for Verdict {
    fn from(result: Result<Verification, VerifyError>) -> Self {
        match result {
            Ok(_) => Verdict::Valid,
            Err(err) => Verdict::Invalid(err),
        }
    }
}

/// Incremental verifier for one run. Feed lines in file order, then finish.
#[derive(Debug, Default)]
pub struct Verifier {
    builder: ScopeBuilder,
    lines: Vec<Line>,
}

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the per-line passes on one raw line. Blank lines are skipped and
    /// do not count toward line numbers.
    pub fn feed(&mut self, raw: &str) -> Result<(), VerifyError> {
        if raw.trim().is_empty() {
            return Ok(());
        }
        let number = self.lines.len() as u32 + 1;
        let mut line = Line::new(number, lex_line(raw))?;
        self.builder.process(&mut line)?;
        check_syntax(&line)?;
        self.lines.push(line);
        Ok(())
    }

    /// The annotated lines fed so far, without running the semantics pass.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// Run the semantics pass over everything fed so far.
    pub fn finish(self) -> Result<Verification, VerifyError> {
        let Verifier { builder, lines } = self;
        let mut tables = builder.into_tables();
        validate_semantics(&lines, &mut tables)?;
        Ok(Verification { lines, tables })
    }
}

/// Verify a complete sequence of raw lines.
pub fn verify_lines<I, S>(lines: I) -> Result<Verification, VerifyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut verifier = Verifier::new();
    for raw in lines {
        verifier.feed(raw.as_ref())?;
    }
    verifier.finish()
}

/// Lex, classify, scope-stamp and syntax-check every line, without the
/// semantics pass.
pub fn annotate_lines<I, S>(lines: I) -> Result<Vec<Line>, VerifyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut verifier = Verifier::new();
    for raw in lines {
        verifier.feed(raw.as_ref())?;
    }
    Ok(verifier.into_lines())
}

/// Pull lines from `reader` until the input ends or the first error.
pub fn verify_reader<R: BufRead>(reader: R) -> Verdict {
    let mut verifier = Verifier::new();
    for raw in reader.lines() {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => return Verdict::IoFailure(e.to_string()),
        };
        if let Err(err) = verifier.feed(&raw) {
            return Verdict::Invalid(err);
        }
    }
    verifier.finish().into()
}

pub fn verify_with_provider(path: &Path, provider: &dyn SourceProvider) -> Verdict {
    match provider.open(path) {
        Ok(reader) => verify_reader(reader),
        Err(e) => Verdict::IoFailure(format!("cannot read {}: {}", path.display(), e)),
    }
}

pub fn verify_file(path: &Path) -> Verdict {
    verify_with_provider(path, &FileSystemProvider)
}
