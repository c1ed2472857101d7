//! Line lexer.
//!
//! Every token kind owns a fixed pattern. At each position the kinds are
//! tried in declaration order and the first one that matches wins, so the
//! order of [`TokenKind::PRIORITY`] is part of the language definition:
//! floating-point literals are tried before integers, type keywords (which
//! include their trailing space) before identifiers, method names (which
//! include their opening parenthesis) before plain names, and a single
//! unmatched character always falls through to [`TokenKind::Other`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Value literals
    DoubleVal,
    IntVal,
    StringVal,
    CharVal,
    BooleanVal,
    // Type keywords
    Int,
    Double,
    String,
    Char,
    Boolean,
    // Control keywords
    Void,
    Final,
    If,
    While,
    Return,
    Whitespace,
    // Punctuation
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Equals,
    AndAnd,
    OrOr,
    Semicolon,
    Comment,
    // Identifiers
    MethodName,
    VarName,
    /// Any single character no other pattern accepts.
    Other,
}

impl TokenKind {
    /// Matching priority, highest first.
    pub const PRIORITY: [TokenKind; 29] = [
        TokenKind::DoubleVal,
        TokenKind::IntVal,
        TokenKind::StringVal,
        TokenKind::CharVal,
        TokenKind::BooleanVal,
        TokenKind::Int,
        TokenKind::Double,
        TokenKind::String,
        TokenKind::Char,
        TokenKind::Boolean,
        TokenKind::Void,
        TokenKind::Final,
        TokenKind::If,
        TokenKind::While,
        TokenKind::Return,
        TokenKind::Whitespace,
        TokenKind::Comma,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Equals,
        TokenKind::AndAnd,
        TokenKind::OrOr,
        TokenKind::Semicolon,
        TokenKind::Comment,
        TokenKind::MethodName,
        TokenKind::VarName,
        TokenKind::Other,
    ];

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Double
                | TokenKind::String
                | TokenKind::Char
                | TokenKind::Boolean
        )
    }

    pub fn is_value_literal(self) -> bool {
        matches!(
            self,
            TokenKind::DoubleVal
                | TokenKind::IntVal
                | TokenKind::StringVal
                | TokenKind::CharVal
                | TokenKind::BooleanVal
        )
    }

    /// Human-readable form used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::DoubleVal => "double literal",
            TokenKind::IntVal => "int literal",
            TokenKind::StringVal => "string literal",
            TokenKind::CharVal => "char literal",
            TokenKind::BooleanVal => "boolean literal",
            TokenKind::Int => "'int'",
            TokenKind::Double => "'double'",
            TokenKind::String => "'String'",
            TokenKind::Char => "'char'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Void => "'void'",
            TokenKind::Final => "'final'",
            TokenKind::If => "'if ('",
            TokenKind::While => "'while ('",
            TokenKind::Return => "'return;'",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comma => "','",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Equals => "'='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comment => "'//'",
            TokenKind::MethodName => "method name",
            TokenKind::VarName => "variable name",
            TokenKind::Other => "unrecognized character",
        }
    }

    /// Length in chars of this kind's match starting at `pos`, if any.
    fn match_at(self, chars: &[char], pos: usize) -> Option<usize> {
        match self {
            TokenKind::DoubleVal => match_double(chars, pos),
            TokenKind::IntVal => match_int(chars, pos),
            TokenKind::StringVal => match_string(chars, pos),
            TokenKind::CharVal => {
                let quoted = chars.get(pos) == Some(&'\'')
                    && chars.get(pos + 1).is_some()
                    && chars.get(pos + 2) == Some(&'\'');
                quoted.then_some(3)
            }
            TokenKind::BooleanVal => {
                match_literal(chars, pos, "true").or_else(|| match_literal(chars, pos, "false"))
            }
            TokenKind::Int => match_literal(chars, pos, "int "),
            TokenKind::Double => match_literal(chars, pos, "double "),
            TokenKind::String => match_literal(chars, pos, "String "),
            TokenKind::Char => match_literal(chars, pos, "char "),
            TokenKind::Boolean => match_literal(chars, pos, "boolean "),
            TokenKind::Void => match_literal(chars, pos, "void "),
            TokenKind::Final => match_literal(chars, pos, "final "),
            TokenKind::If => match_keyword_paren(chars, pos, "if"),
            TokenKind::While => match_keyword_paren(chars, pos, "while"),
            TokenKind::Return => match_literal(chars, pos, "return;"),
            TokenKind::Whitespace => {
                let n = run_length(chars, pos, is_space);
                (n > 0).then_some(n)
            }
            TokenKind::Comma => match_literal(chars, pos, ","),
            TokenKind::LBrace => match_literal(chars, pos, "{"),
            TokenKind::RBrace => match_literal(chars, pos, "}"),
            TokenKind::LParen => match_literal(chars, pos, "("),
            TokenKind::RParen => match_literal(chars, pos, ")"),
            TokenKind::Equals => match_literal(chars, pos, "="),
            TokenKind::AndAnd => match_literal(chars, pos, "&&"),
            TokenKind::OrOr => match_literal(chars, pos, "||"),
            TokenKind::Semicolon => match_literal(chars, pos, ";"),
            TokenKind::Comment => match_literal(chars, pos, "//"),
            TokenKind::MethodName => match_method_name(chars, pos),
            TokenKind::VarName => match_var_name(chars, pos),
            TokenKind::Other => (pos < chars.len()).then_some(1),
        }
    }
}

/// One lexical token. `name` is set only for method and variable names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Token { kind, name: None }
    }

    pub fn named(kind: TokenKind, name: impl Into<String>) -> Self {
        Token {
            kind,
            name: Some(name.into()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Split one source line into tokens. Whitespace is consumed and dropped.
/// Never fails: anything unrecognized comes out as [`TokenKind::Other`].
pub fn lex_line(src: &str) -> Vec<Token> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let (kind, len) = TokenKind::PRIORITY
            .iter()
            .find_map(|&kind| kind.match_at(&chars, pos).map(|len| (kind, len)))
            .unwrap_or((TokenKind::Other, 1));
        let text = &chars[pos..pos + len];
        pos += len;

        match kind {
            TokenKind::Whitespace => {}
            TokenKind::VarName => {
                tokens.push(Token::named(kind, text.iter().collect::<String>()));
            }
            TokenKind::MethodName => {
                // Name ends at the first space, else at the opening parenthesis.
                let end = text
                    .iter()
                    .position(|c| *c == ' ')
                    .or_else(|| text.iter().position(|c| *c == '('))
                    .unwrap_or(text.len());
                tokens.push(Token::named(kind, text[..end].iter().collect::<String>()));
            }
            _ => tokens.push(Token::new(kind)),
        }
    }

    tokens
}

// ──────────────────────────────────────────────
// Pattern helpers
// ──────────────────────────────────────────────

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn run_length(chars: &[char], pos: usize, pred: impl Fn(char) -> bool) -> usize {
    chars[pos.min(chars.len())..]
        .iter()
        .take_while(|c| pred(**c))
        .count()
}

fn match_literal(chars: &[char], pos: usize, lit: &str) -> Option<usize> {
    let mut n = 0;
    for expected in lit.chars() {
        if chars.get(pos + n) != Some(&expected) {
            return None;
        }
        n += 1;
    }
    Some(n)
}

/// `-?` followed by at least one digit; returns the length of the sign plus digits.
fn match_signed_digits(chars: &[char], pos: usize) -> Option<usize> {
    let sign = usize::from(chars.get(pos) == Some(&'-'));
    let digits = run_length(chars, pos + sign, |c| c.is_ascii_digit());
    (digits > 0).then_some(sign + digits)
}

fn match_int(chars: &[char], pos: usize) -> Option<usize> {
    match_signed_digits(chars, pos)
}

fn match_double(chars: &[char], pos: usize) -> Option<usize> {
    let whole = match_signed_digits(chars, pos)?;
    if chars.get(pos + whole) != Some(&'.') {
        return None;
    }
    let frac = run_length(chars, pos + whole + 1, |c| c.is_ascii_digit());
    (frac > 0).then_some(whole + 1 + frac)
}

/// A quote, at least one character, and then up to the last quote on the line.
fn match_string(chars: &[char], pos: usize) -> Option<usize> {
    if chars.get(pos) != Some(&'"') {
        return None;
    }
    let last = chars.iter().rposition(|c| *c == '"')?;
    (last >= pos + 2).then_some(last + 1 - pos)
}

/// `keyword`, optional whitespace, then `(`.
fn match_keyword_paren(chars: &[char], pos: usize, keyword: &str) -> Option<usize> {
    let kw = match_literal(chars, pos, keyword)?;
    let ws = run_length(chars, pos + kw, is_space);
    (chars.get(pos + kw + ws) == Some(&'(')).then_some(kw + ws + 1)
}

fn match_method_name(chars: &[char], pos: usize) -> Option<usize> {
    if !chars.get(pos)?.is_ascii_alphabetic() {
        return None;
    }
    let word = 1 + run_length(chars, pos + 1, is_word);
    let ws = run_length(chars, pos + word, is_space);
    (chars.get(pos + word + ws) == Some(&'(')).then_some(word + ws + 1)
}

fn match_var_name(chars: &[char], pos: usize) -> Option<usize> {
    let first = *chars.get(pos)?;
    if first.is_ascii_alphabetic() {
        Some(1 + run_length(chars, pos + 1, |c| is_word(c) || c == '-'))
    } else if first == '_' {
        let rest = run_length(chars, pos + 1, is_word);
        (rest > 0).then_some(1 + rest)
    } else {
        None
    }
}
