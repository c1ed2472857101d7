//! `[final] type name [= value] (, name [= value])* ;`

use super::{is_value, Step};
use crate::lexer::{Token, TokenKind};
use crate::line::LineKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// After `final`.
    Final,
    /// After the type keyword.
    Type,
    Name,
    Equals,
    Value,
    Comma,
    End,
}

pub(crate) fn start(kind: LineKind) -> State {
    if kind == LineKind::FinalVarDeclaration {
        State::Final
    } else {
        State::Type
    }
}

pub(crate) fn stepper(kind: LineKind) -> Step<State> {
    if kind == LineKind::FinalVarDeclaration {
        step_final
    } else {
        step
    }
}

fn step(state: State, token: &Token) -> Result<State, &'static str> {
    match (state, token.kind) {
        (State::Final, k) if k.is_type_keyword() => Ok(State::Type),
        (State::Final, _) => Err("a type after 'final'"),
        (State::Type | State::Comma, TokenKind::VarName) => Ok(State::Name),
        (State::Type | State::Comma, _) => Err("a variable name"),
        (State::Name, TokenKind::Equals) => Ok(State::Equals),
        (State::Name, TokenKind::Comma) => Ok(State::Comma),
        (State::Name, TokenKind::Semicolon) => Ok(State::End),
        (State::Name, _) => Err("'=', ',' or ';'"),
        (State::Equals, k) if is_value(k) => Ok(State::Value),
        (State::Equals, _) => Err("a value"),
        (State::Value, TokenKind::Comma) => Ok(State::Comma),
        (State::Value, TokenKind::Semicolon) => Ok(State::End),
        (State::Value, _) => Err("',' or ';'"),
        (State::End, _) => Err("nothing after ';'"),
    }
}

/// Every final name needs an initializer.
fn step_final(state: State, token: &Token) -> Result<State, &'static str> {
    match (state, token.kind) {
        (State::Name, TokenKind::Equals) => Ok(State::Equals),
        (State::Name, _) => Err("'=' (final variables must be initialized)"),
        _ => step(state, token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_line;
    use crate::line::Line;
    use crate::machine::trace;

    fn accepts(src: &str) -> bool {
        let line = Line::new(1, lex_line(src)).unwrap();
        trace(&line, start(line.kind), stepper(line.kind)).is_ok()
    }

    #[test]
    fn plain_declarations() {
        assert!(accepts("int a;"));
        assert!(accepts("int a, b;"));
        assert!(accepts("double a = 1, b, c = x;"));
        assert!(accepts("String s = \"hi\";"));
        assert!(!accepts("int a = ;"));
        assert!(!accepts("int a b;"));
        assert!(!accepts("int a = 1 2;"));
        assert!(!accepts("int = 1;"));
        assert!(!accepts("int a, ;"));
        assert!(!accepts("int a; b"));
    }

    #[test]
    fn final_declarations_need_values() {
        assert!(accepts("final int a = 1;"));
        assert!(accepts("final char a = 'x', b = c;"));
        assert!(!accepts("final int a;"));
        assert!(!accepts("final int a = 1, b;"));
        assert!(!accepts("final a = 1;"));
    }

    #[test]
    fn error_names_the_expectation() {
        let line = Line::new(3, lex_line("int a = ;")).unwrap();
        let err = trace(&line, start(line.kind), stepper(line.kind)).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("expected a value"), "{}", err.message);
    }
}
