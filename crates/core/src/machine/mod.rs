//! Per-line-kind finite automata.
//!
//! Token 0 fixed the line kind, so every automaton starts at token 1. A
//! transition function maps `(state, token)` to the next state or to a
//! description of what was expected there. The syntax pass only walks the
//! automaton; the semantics pass walks it again with a visitor that checks
//! each token against the tables in the state it was consumed in.

pub(crate) mod assignment;
pub(crate) mod condition;
pub(crate) mod declaration;
pub(crate) mod method_call;
pub(crate) mod method_decl;

use crate::error::VerifyError;
use crate::lexer::{Token, TokenKind};
use crate::line::Line;

pub(crate) type Step<S> = fn(S, &Token) -> Result<S, &'static str>;

/// Drive `step` over tokens 1.., calling `visit` with each new state and the
/// token that produced it. Returns the final state.
pub(crate) fn walk<S: Copy>(
    line: &Line,
    start: S,
    step: Step<S>,
    mut visit: impl FnMut(S, &Token) -> Result<(), VerifyError>,
) -> Result<S, VerifyError> {
    let mut state = start;
    for token in line.tokens.iter().skip(1) {
        state = step(state, token).map_err(|expected| {
            VerifyError::syntax(
                line.number,
                format!("expected {}, found {}", expected, token.kind.describe()),
            )
        })?;
        visit(state, token)?;
    }
    Ok(state)
}

/// Walk without inspecting tokens.
pub(crate) fn trace<S: Copy>(line: &Line, start: S, step: Step<S>) -> Result<S, VerifyError> {
    walk(line, start, step, |_, _| Ok(()))
}

/// The line must end in `kind`.
pub(crate) fn expect_last(line: &Line, kind: TokenKind) -> Result<(), VerifyError> {
    match line.last_kind() {
        Some(last) if last == kind => Ok(()),
        last => Err(VerifyError::syntax(
            line.number,
            format!(
                "line must end with {}, found {}",
                kind.describe(),
                last.map_or("nothing", TokenKind::describe)
            ),
        )),
    }
}

/// The line must be its first token and nothing else.
pub(crate) fn expect_single(line: &Line) -> Result<(), VerifyError> {
    match line.tokens.get(1) {
        None => Ok(()),
        Some(extra) => Err(VerifyError::syntax(
            line.number,
            format!(
                "{} must stand alone on its line, found {}",
                line.tokens[0].kind.describe(),
                extra.kind.describe()
            ),
        )),
    }
}

/// Literal or variable reference usable as a value.
pub(crate) fn is_value(kind: TokenKind) -> bool {
    kind.is_value_literal() || kind == TokenKind::VarName
}
