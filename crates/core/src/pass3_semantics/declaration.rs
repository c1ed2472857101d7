use super::value_type;
use crate::error::VerifyError;
use crate::lexer::Token;
use crate::line::Line;
use crate::machine::{declaration, walk};
use crate::tables::VariableTable;

/// Each inline initializer must fit the declared type.
pub(super) fn check(line: &Line, vars: &VariableTable) -> Result<(), VerifyError> {
    let mut target = String::new();
    walk(
        line,
        declaration::start(line.kind),
        declaration::stepper(line.kind),
        |state, token| match state {
            declaration::State::Name => {
                target = token.name().to_owned();
                Ok(())
            }
            declaration::State::Value => check_initializer(line, vars, &target, token),
            _ => Ok(()),
        },
    )?;
    Ok(())
}

fn check_initializer(
    line: &Line,
    vars: &VariableTable,
    target: &str,
    value: &Token,
) -> Result<(), VerifyError> {
    let declared = vars.resolve(target, &line.scope, line.number)?.var_type;
    let source = value_type(value, line, vars)?;
    if declared.accepts(source) {
        Ok(())
    } else {
        Err(VerifyError::mismatch(
            line.number,
            format!(
                "cannot initialize {} '{}' with a {} value",
                declared, target, source
            ),
        ))
    }
}
