//! A classified source line: its tokens, its kind, and the scope it was read in.

use crate::error::VerifyError;
use crate::lexer::{Token, TokenKind};
use crate::scope::ScopePath;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    FinalVarDeclaration,
    VarDeclaration,
    VarAssignment,
    MethodDeclaration,
    MethodCall,
    Comment,
    Return,
    IfStatement,
    WhileStatement,
    ClosingBracket,
}

impl LineKind {
    /// One-token lookahead: the kind of line a first token starts.
    pub fn classify(first: TokenKind) -> Option<LineKind> {
        if first.is_type_keyword() {
            return Some(LineKind::VarDeclaration);
        }
        let kind = match first {
            TokenKind::Final => LineKind::FinalVarDeclaration,
            TokenKind::VarName => LineKind::VarAssignment,
            TokenKind::Void => LineKind::MethodDeclaration,
            TokenKind::MethodName => LineKind::MethodCall,
            TokenKind::Return => LineKind::Return,
            TokenKind::RBrace => LineKind::ClosingBracket,
            TokenKind::If => LineKind::IfStatement,
            TokenKind::While => LineKind::WhileStatement,
            TokenKind::Comment => LineKind::Comment,
            _ => return None,
        };
        Some(kind)
    }

    /// Kinds whose tokens can carry `name =` initializations.
    pub fn assigns(self) -> bool {
        matches!(
            self,
            LineKind::VarDeclaration | LineKind::FinalVarDeclaration | LineKind::VarAssignment
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub number: u32,
    pub kind: LineKind,
    /// Stamped by the scope builder; global until then.
    pub scope: ScopePath,
    pub tokens: Vec<Token>,
}

impl Line {
    /// Build a line from its tokens. Fails if there are none or the first one
    /// cannot start a line.
    pub fn new(number: u32, tokens: Vec<Token>) -> Result<Line, VerifyError> {
        let first = tokens
            .first()
            .ok_or_else(|| VerifyError::malformed(number, "no legal tokens in line"))?;
        let kind = LineKind::classify(first.kind).ok_or_else(|| {
            VerifyError::malformed(
                number,
                format!("line cannot start with {}", first.kind.describe()),
            )
        })?;
        Ok(Line {
            number,
            kind,
            scope: ScopePath::global(),
            tokens,
        })
    }

    pub fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::lex_line;

    fn kind_of(src: &str) -> LineKind {
        Line::new(1, lex_line(src)).unwrap().kind
    }

    #[test]
    fn classifies_by_first_token() {
        assert_eq!(kind_of("int a;"), LineKind::VarDeclaration);
        assert_eq!(kind_of("boolean b = true;"), LineKind::VarDeclaration);
        assert_eq!(kind_of("final int a = 1;"), LineKind::FinalVarDeclaration);
        assert_eq!(kind_of("a = 1;"), LineKind::VarAssignment);
        assert_eq!(kind_of("void f() {"), LineKind::MethodDeclaration);
        assert_eq!(kind_of("f();"), LineKind::MethodCall);
        assert_eq!(kind_of("// hi"), LineKind::Comment);
        assert_eq!(kind_of("return;"), LineKind::Return);
        assert_eq!(kind_of("if (a) {"), LineKind::IfStatement);
        assert_eq!(kind_of("while (a) {"), LineKind::WhileStatement);
        assert_eq!(kind_of("}"), LineKind::ClosingBracket);
    }

    #[test]
    fn empty_token_list_is_malformed() {
        let err = Line::new(4, Vec::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 4);
    }

    #[test]
    fn unknown_first_token_is_malformed() {
        for src in ["5 = a;", "{", "= 3;", "+x;"] {
            let err = Line::new(2, lex_line(src)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::MalformedLine, "{}", src);
        }
    }

    #[test]
    fn scope_starts_global() {
        let line = Line::new(1, lex_line("int a;")).unwrap();
        assert!(line.scope.is_global());
    }
}
