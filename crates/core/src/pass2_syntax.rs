//! Pass 2: per-line syntax.
//!
//! Pure function of a line's tokens. Each line kind checks its terminal token
//! first, then walks its automaton from token 1.

use crate::error::VerifyError;
use crate::lexer::TokenKind;
use crate::line::{Line, LineKind};
use crate::machine::{
    assignment, condition, declaration, expect_last, expect_single, method_call, method_decl,
    trace,
};

pub fn check_syntax(line: &Line) -> Result<(), VerifyError> {
    match line.kind {
        LineKind::VarDeclaration | LineKind::FinalVarDeclaration => {
            expect_last(line, TokenKind::Semicolon)?;
            trace(
                line,
                declaration::start(line.kind),
                declaration::stepper(line.kind),
            )?;
        }
        LineKind::VarAssignment => {
            expect_last(line, TokenKind::Semicolon)?;
            trace(line, assignment::START, assignment::step)?;
        }
        LineKind::MethodCall => {
            expect_last(line, TokenKind::Semicolon)?;
            trace(line, method_call::START, method_call::step)?;
        }
        LineKind::MethodDeclaration => {
            expect_last(line, TokenKind::LBrace)?;
            trace(line, method_decl::START, method_decl::step)?;
        }
        LineKind::IfStatement | LineKind::WhileStatement => {
            expect_last(line, TokenKind::LBrace)?;
            trace(line, condition::START, condition::step)?;
        }
        LineKind::Return | LineKind::ClosingBracket => expect_single(line)?,
        LineKind::Comment => {}
    }
    Ok(())
}
