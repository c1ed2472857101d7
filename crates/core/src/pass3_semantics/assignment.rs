use super::value_type;
use crate::error::{ErrorKind, VerifyError};
use crate::line::Line;
use crate::machine::{assignment, walk};
use crate::tables::VariableTable;

/// `name = value;` -- the target must be visible and not final, and the
/// value must fit its type.
pub(super) fn check(line: &Line, vars: &VariableTable) -> Result<(), VerifyError> {
    let name = line.tokens[0].name();
    let target = vars.resolve(name, &line.scope, line.number)?;
    if target.is_final {
        return Err(VerifyError::new(
            ErrorKind::FinalReassignment,
            line.number,
            format!("cannot assign to final variable '{}'", name),
        ));
    }

    walk(line, assignment::START, assignment::step, |state, token| {
        if state != assignment::State::Value {
            return Ok(());
        }
        let source = value_type(token, line, vars)?;
        if target.var_type.accepts(source) {
            Ok(())
        } else {
            Err(VerifyError::mismatch(
                line.number,
                format!(
                    "cannot assign a {} value to {} '{}'",
                    source, target.var_type, name
                ),
            ))
        }
    })?;
    Ok(())
}
