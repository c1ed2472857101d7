use serde::{Deserialize, Serialize};

/// The closed set of ways a source file can fail verification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Line has no tokens, or its first token starts no known line kind.
    MalformedLine,
    /// A line-kind automaton rejected a token or the terminal token.
    Syntax,
    DuplicateDeclaration,
    DuplicateMethod,
    UnknownMethod,
    ArityOrTypeMismatch,
    /// Variable is not visible from the scope it is used in.
    UnboundVariable,
    UninitializedUse,
    FinalReassignment,
    /// Construct placed in a scope where it is not allowed (method in method,
    /// return or call at top level, method body closed without `return;`).
    IllegalScope,
    UnbalancedBrackets,
}

impl ErrorKind {
    /// The pipeline stage that raises this kind of error.
    pub fn phase(self) -> &'static str {
        match self {
            ErrorKind::MalformedLine => "lex",
            ErrorKind::DuplicateDeclaration | ErrorKind::DuplicateMethod => "build",
            ErrorKind::Syntax => "syntax",
            ErrorKind::UnknownMethod
            | ErrorKind::ArityOrTypeMismatch
            | ErrorKind::UnboundVariable
            | ErrorKind::UninitializedUse
            | ErrorKind::FinalReassignment
            | ErrorKind::IllegalScope => "semantics",
            // Raised by the builder (too many `}`) and by the final check (too few).
            ErrorKind::UnbalancedBrackets => "scope",
        }
    }
}

/// A verification error, always tied to the 1-based (non-blank) line it was found on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct VerifyError {
    pub kind: ErrorKind,
    pub line: u32,
    pub message: String,
}

impl VerifyError {
    pub fn new(kind: ErrorKind, line: u32, message: impl Into<String>) -> Self {
        VerifyError {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn malformed(line: u32, message: impl Into<String>) -> Self {
        VerifyError::new(ErrorKind::MalformedLine, line, message)
    }

    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        VerifyError::new(ErrorKind::Syntax, line, message)
    }

    pub fn illegal_scope(line: u32, message: impl Into<String>) -> Self {
        VerifyError::new(ErrorKind::IllegalScope, line, message)
    }

    pub fn mismatch(line: u32, message: impl Into<String>) -> Self {
        VerifyError::new(ErrorKind::ArityOrTypeMismatch, line, message)
    }

    /// Serialize to the diagnostic JSON format. Every field is always present.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":    self.kind,
            "line":    self.line,
            "message": self.message,
            "phase":   self.kind.phase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_line_number() {
        let err = VerifyError::syntax(7, "expected ';'");
        assert_eq!(err.to_string(), "line 7: expected ';'");
    }

    #[test]
    fn json_uses_snake_case_kind() {
        let err = VerifyError::new(ErrorKind::FinalReassignment, 2, "cannot assign to final 'z'");
        let v = err.to_json_value();
        assert_eq!(v["kind"], "final_reassignment");
        assert_eq!(v["line"], 2);
        assert_eq!(v["phase"], "semantics");
    }
}
