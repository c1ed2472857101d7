//! Pass 3: semantics over the complete, scope-stamped line list.
//!
//! Three steps, in order:
//! 1. initialization pre-pass: every `name =` pair marks the variable it
//!    resolves to as initialized, first occurrence wins;
//! 2. per-line rules, dispatched on [`LineKind`] to the submodules;
//! 3. the last line must be back in global scope.
//!
//! The tables are only refined here (initialization markers), never
//! structurally changed.

mod assignment;
mod control;
mod declaration;
mod method;

use crate::error::{ErrorKind, VerifyError};
use crate::lexer::{Token, TokenKind};
use crate::line::{Line, LineKind};
use crate::tables::{Tables, VarType, Variable, VariableTable};

pub fn validate_semantics(lines: &[Line], tables: &mut Tables) -> Result<(), VerifyError> {
    mark_initializations(lines, &mut tables.variables)?;

    let mut previous: Option<&Line> = None;
    for line in lines {
        check_line(line, previous, tables)?;
        previous = Some(line);
    }

    match lines.last() {
        Some(last) if !last.scope.is_global() => Err(VerifyError::new(
            ErrorKind::UnbalancedBrackets,
            last.number,
            format!("end of file reached inside {}", last.scope),
        )),
        _ => Ok(()),
    }
}

/// Record the first `name =` of every variable, resolved from the line's scope.
pub fn mark_initializations(lines: &[Line], vars: &mut VariableTable) -> Result<(), VerifyError> {
    for line in lines.iter().filter(|l| l.kind.assigns()) {
        for pair in line.tokens.windows(2) {
            if pair[0].kind == TokenKind::VarName && pair[1].kind == TokenKind::Equals {
                vars.resolve_mut(pair[0].name(), &line.scope, line.number)?
                    .mark_initialized(line.number, &line.scope);
            }
        }
    }
    Ok(())
}

fn check_line(line: &Line, previous: Option<&Line>, tables: &Tables) -> Result<(), VerifyError> {
    match line.kind {
        LineKind::VarDeclaration | LineKind::FinalVarDeclaration => {
            declaration::check(line, &tables.variables)
        }
        LineKind::VarAssignment => assignment::check(line, &tables.variables),
        LineKind::MethodDeclaration => method::check_declaration(line),
        LineKind::MethodCall => method::check_call(line, tables),
        LineKind::IfStatement | LineKind::WhileStatement => {
            control::check_condition(line, &tables.variables)
        }
        LineKind::Return => control::check_return(line),
        LineKind::ClosingBracket => control::check_closing_bracket(line, previous),
        LineKind::Comment => Ok(()),
    }
}

/// The type of a value token. A variable must be visible and legally
/// initialized as of `line`.
pub(crate) fn value_type(
    token: &Token,
    line: &Line,
    vars: &VariableTable,
) -> Result<VarType, VerifyError> {
    if token.kind == TokenKind::VarName {
        let var = vars.resolve(token.name(), &line.scope, line.number)?;
        require_initialized(var, token.name(), line)?;
        return Ok(var.var_type);
    }
    VarType::from_token(token.kind).ok_or_else(|| {
        VerifyError::syntax(
            line.number,
            format!("expected a value, found {}", token.kind.describe()),
        )
    })
}

pub(crate) fn require_initialized(
    var: &Variable,
    name: &str,
    line: &Line,
) -> Result<(), VerifyError> {
    if var.is_initialized_for(line.number, &line.scope) {
        Ok(())
    } else {
        Err(VerifyError::new(
            ErrorKind::UninitializedUse,
            line.number,
            format!("variable '{}' is used before it is initialized", name),
        ))
    }
}
