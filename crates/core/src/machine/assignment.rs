//! `name = value ;`

use super::is_value;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Name,
    Equals,
    Value,
    End,
}

pub(crate) const START: State = State::Name;

pub(crate) fn step(state: State, token: &Token) -> Result<State, &'static str> {
    match (state, token.kind) {
        (State::Name, TokenKind::Equals) => Ok(State::Equals),
        (State::Name, _) => Err("'='"),
        (State::Equals, k) if is_value(k) => Ok(State::Value),
        (State::Equals, _) => Err("a value"),
        (State::Value, TokenKind::Semicolon) => Ok(State::End),
        (State::Value, _) => Err("';'"),
        (State::End, _) => Err("nothing after ';'"),
    }
}
