//! sjavac-core: static verifier for s-Java source files.
//!
//! A file is verified line by line. Each non-blank line is lexed into tokens,
//! classified by its first token, stamped with its lexical scope (pass 1) and
//! checked against its line kind's automaton (pass 2). After the last line
//! the semantics pass (pass 3) checks types, initialization, visibility and
//! placement against the variable and method tables. The first error found
//! ends the run.
//!
//! # Public API
//!
//! - [`verify_file()`] / [`verify_with_provider()`] -- read a source and
//!   return a [`Verdict`]
//! - [`verify_lines()`] -- verify in-memory lines, returning the annotated
//!   lines and tables
//! - [`annotate_lines()`] -- per-line passes only
//! - [`VerifyError`] / [`ErrorKind`] -- the error taxonomy

pub mod error;
pub mod lexer;
pub mod line;
mod machine;
pub mod pass1_build;
pub mod pass2_syntax;
pub mod pass3_semantics;
pub mod scope;
pub mod source;
pub mod tables;
pub mod verify;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{ErrorKind, VerifyError};
pub use lexer::{Token, TokenKind};
pub use line::{Line, LineKind};
pub use scope::{ScopePath, Segment};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
pub use tables::{Method, MethodTable, Tables, VarType, Variable, VariableTable};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use lexer::lex_line;
pub use pass1_build::ScopeBuilder;
pub use pass2_syntax::check_syntax;
pub use pass3_semantics::validate_semantics;
pub use verify::{
    annotate_lines, verify_file, verify_lines, verify_reader, verify_with_provider, Verdict,
    Verification, Verifier,
};
