use super::value_type;
use crate::error::{ErrorKind, VerifyError};
use crate::line::Line;
use crate::machine::{method_call, walk};
use crate::tables::Tables;

/// Methods are declared only at top level.
pub(super) fn check_declaration(line: &Line) -> Result<(), VerifyError> {
    if line.scope.is_global() {
        Ok(())
    } else {
        Err(VerifyError::illegal_scope(
            line.number,
            format!("method declared inside {}", line.scope),
        ))
    }
}

/// `name(args);` -- only inside a method body, against a declared method,
/// with arguments matching the parameter list in count and type.
pub(super) fn check_call(line: &Line, tables: &Tables) -> Result<(), VerifyError> {
    let name = line.tokens[0].name();
    if line.scope.is_global() {
        return Err(VerifyError::illegal_scope(
            line.number,
            format!("call to '{}' outside a method body", name),
        ));
    }
    let method = tables.methods.get(name).ok_or_else(|| {
        VerifyError::new(
            ErrorKind::UnknownMethod,
            line.number,
            format!("method '{}' is not declared", name),
        )
    })?;

    let mut args = Vec::new();
    walk(line, method_call::START, method_call::step, |state, token| {
        if state == method_call::State::Arg {
            args.push(value_type(token, line, &tables.variables)?);
        }
        Ok(())
    })?;

    if args.len() != method.param_types.len() {
        return Err(VerifyError::mismatch(
            line.number,
            format!(
                "method '{}' takes {} argument(s) but {} were given",
                name,
                method.param_types.len(),
                args.len()
            ),
        ));
    }
    for (i, (param, arg)) in method.param_types.iter().zip(&args).enumerate() {
        if !param.accepts(*arg) {
            return Err(VerifyError::mismatch(
                line.number,
                format!(
                    "argument {} of '{}' expects {}, found {}",
                    i + 1,
                    name,
                    param,
                    arg
                ),
            ));
        }
    }
    Ok(())
}
