//! `if ( atom ((&& | ||) atom)* ) {` and the same for `while`.

use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// After `if (` or `while (`.
    Keyword,
    Atom,
    Operator,
    CloseParen,
    Open,
}

pub(crate) const START: State = State::Keyword;

/// Literals allowed directly in a condition.
pub(crate) fn is_condition_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::BooleanVal | TokenKind::IntVal | TokenKind::DoubleVal
    )
}

pub(crate) fn step(state: State, token: &Token) -> Result<State, &'static str> {
    match (state, token.kind) {
        (State::Keyword | State::Operator, TokenKind::VarName) => Ok(State::Atom),
        (State::Keyword | State::Operator, k) if is_condition_literal(k) => Ok(State::Atom),
        (State::Keyword | State::Operator, _) => Err("a variable or boolean, int or double literal"),
        (State::Atom, TokenKind::AndAnd | TokenKind::OrOr) => Ok(State::Operator),
        (State::Atom, TokenKind::RParen) => Ok(State::CloseParen),
        (State::Atom, _) => Err("'&&', '||' or ')'"),
        (State::CloseParen, TokenKind::LBrace) => Ok(State::Open),
        (State::CloseParen, _) => Err("'{'"),
        (State::Open, _) => Err("nothing after '{'"),
    }
}
