//! `name( [value (, value)*] ) ;`

use super::is_value;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Name,
    Arg,
    Comma,
    CloseParen,
    End,
}

pub(crate) const START: State = State::Name;

pub(crate) fn step(state: State, token: &Token) -> Result<State, &'static str> {
    match (state, token.kind) {
        (State::Name | State::Comma, k) if is_value(k) => Ok(State::Arg),
        (State::Name, TokenKind::RParen) => Ok(State::CloseParen),
        (State::Name, _) => Err("an argument or ')'"),
        (State::Comma, _) => Err("an argument"),
        (State::Arg, TokenKind::Comma) => Ok(State::Comma),
        (State::Arg, TokenKind::RParen) => Ok(State::CloseParen),
        (State::Arg, _) => Err("',' or ')'"),
        (State::CloseParen, TokenKind::Semicolon) => Ok(State::End),
        (State::CloseParen, _) => Err("';'"),
        (State::End, _) => Err("nothing after ';'"),
    }
}
