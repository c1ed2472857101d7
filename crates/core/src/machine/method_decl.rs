//! `void name( [final] type param (, [final] type param)* ) {`

use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Void,
    Name,
    Final,
    Type,
    Param,
    Comma,
    CloseParen,
    Open,
}

pub(crate) const START: State = State::Void;

pub(crate) fn step(state: State, token: &Token) -> Result<State, &'static str> {
    match (state, token.kind) {
        (State::Void, TokenKind::MethodName) => Ok(State::Name),
        (State::Void, _) => Err("a method name"),
        (State::Name, TokenKind::RParen) => Ok(State::CloseParen),
        (State::Name | State::Comma, TokenKind::Final) => Ok(State::Final),
        (State::Name | State::Comma | State::Final, k) if k.is_type_keyword() => Ok(State::Type),
        (State::Name, _) => Err("a parameter type or ')'"),
        (State::Comma | State::Final, _) => Err("a parameter type"),
        (State::Type, TokenKind::VarName) => Ok(State::Param),
        (State::Type, _) => Err("a parameter name"),
        (State::Param, TokenKind::Comma) => Ok(State::Comma),
        (State::Param, TokenKind::RParen) => Ok(State::CloseParen),
        (State::Param, _) => Err("',' or ')'"),
        (State::CloseParen, TokenKind::LBrace) => Ok(State::Open),
        (State::CloseParen, _) => Err("'{'"),
        (State::Open, _) => Err("nothing after '{'"),
    }
}
