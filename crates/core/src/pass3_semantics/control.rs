use super::require_initialized;
use crate::error::VerifyError;
use crate::lexer::TokenKind;
use crate::line::{Line, LineKind};
use crate::machine::{condition, walk};
use crate::tables::VariableTable;

/// `if`/`while` only inside a method. Variable atoms must be int, double or
/// boolean, and initialized.
pub(super) fn check_condition(line: &Line, vars: &VariableTable) -> Result<(), VerifyError> {
    if line.scope.is_global() {
        return Err(VerifyError::illegal_scope(
            line.number,
            "condition outside a method body",
        ));
    }
    walk(line, condition::START, condition::step, |state, token| {
        if state != condition::State::Atom || token.kind != TokenKind::VarName {
            return Ok(());
        }
        let var = vars.resolve(token.name(), &line.scope, line.number)?;
        if !var.var_type.is_condition_compatible() {
            return Err(VerifyError::mismatch(
                line.number,
                format!(
                    "'{}' is {} and cannot be used as a condition",
                    token.name(),
                    var.var_type
                ),
            ));
        }
        require_initialized(var, token.name(), line)
    })?;
    Ok(())
}

pub(super) fn check_return(line: &Line) -> Result<(), VerifyError> {
    if line.scope.is_global() {
        Err(VerifyError::illegal_scope(
            line.number,
            "return outside a method body",
        ))
    } else {
        Ok(())
    }
}

/// A bracket that closes a method body must directly follow `return;`.
pub(super) fn check_closing_bracket(
    line: &Line,
    previous: Option<&Line>,
) -> Result<(), VerifyError> {
    let closes_method = line.scope.is_global();
    if closes_method && previous.map(|p| p.kind) != Some(LineKind::Return) {
        return Err(VerifyError::illegal_scope(
            line.number,
            "missing return statement",
        ));
    }
    Ok(())
}
