//! Pass 1: scope tracking and symbol registration.
//!
//! Runs once per line, in file order. Stamps each line with the scope it was
//! read in and registers variable and method declarations. Lines reach this
//! pass before their syntax is checked, so malformed declarations register
//! whatever well-formed prefix they have and leave the rejection to pass 2.

use crate::error::{ErrorKind, VerifyError};
use crate::lexer::{Token, TokenKind};
use crate::line::{Line, LineKind};
use crate::scope::{ScopePath, Segment};
use crate::tables::{Method, Tables, VarType, Variable};

/// Run-scoped builder state. Create one per verification run.
#[derive(Debug, Default)]
pub struct ScopeBuilder {
    scope: ScopePath,
    if_count: u32,
    while_count: u32,
    tables: Tables,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope the next line will be read in.
    pub fn scope(&self) -> &ScopePath {
        &self.scope
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn into_tables(self) -> Tables {
        self.tables
    }

    /// Stamp `line` with its scope and apply its declarations.
    ///
    /// A closing bracket is stamped with the scope it returns to; every other
    /// line with the scope in effect before it.
    pub fn process(&mut self, line: &mut Line) -> Result<(), VerifyError> {
        match line.kind {
            LineKind::VarDeclaration => {
                line.scope = self.scope.clone();
                self.declare_variables(line, false)?;
            }
            LineKind::FinalVarDeclaration => {
                line.scope = self.scope.clone();
                self.declare_variables(line, true)?;
            }
            LineKind::MethodDeclaration => {
                line.scope = self.scope.clone();
                self.declare_method(line)?;
            }
            LineKind::IfStatement => {
                line.scope = self.scope.clone();
                self.if_count += 1;
                self.scope = self.scope.child(Segment::If(self.if_count));
            }
            LineKind::WhileStatement => {
                line.scope = self.scope.clone();
                self.while_count += 1;
                self.scope = self.scope.child(Segment::While(self.while_count));
            }
            LineKind::ClosingBracket => {
                if self.scope.pop().is_none() {
                    return Err(VerifyError::new(
                        ErrorKind::UnbalancedBrackets,
                        line.number,
                        "closing bracket without a matching block",
                    ));
                }
                line.scope = self.scope.clone();
            }
            LineKind::VarAssignment
            | LineKind::MethodCall
            | LineKind::Comment
            | LineKind::Return => {
                line.scope = self.scope.clone();
            }
        }
        Ok(())
    }

    /// `[final] type name [= v] (, name [= v])* ;`
    fn declare_variables(&mut self, line: &Line, is_final: bool) -> Result<(), VerifyError> {
        let type_pos = usize::from(is_final);
        let Some(var_type) = line.tokens.get(type_pos).and_then(declared_type) else {
            return Ok(());
        };

        for (i, token) in line.tokens.iter().enumerate().skip(type_pos + 1) {
            if token.kind != TokenKind::VarName {
                continue;
            }
            let follows_type = i == type_pos + 1;
            let follows_comma = line.tokens[i - 1].kind == TokenKind::Comma;
            if follows_type || follows_comma {
                let var = Variable::new(var_type, self.scope.clone(), is_final);
                self.tables
                    .variables
                    .declare(token.name(), var, line.number)?;
            }
        }
        Ok(())
    }

    /// `void name( [final] type param, ... ) {` -- enters the method scope,
    /// registers the parameters as initialized locals and the signature.
    fn declare_method(&mut self, line: &Line) -> Result<(), VerifyError> {
        let Some(name_pos) = line
            .tokens
            .iter()
            .position(|t| t.kind == TokenKind::MethodName)
        else {
            return Ok(());
        };
        let name = line.tokens[name_pos].name().to_owned();
        self.scope = self.scope.child(Segment::Method(name.clone()));

        let mut params: Vec<(&str, Variable)> = Vec::new();
        let mut pos = name_pos + 1;
        loop {
            let is_final = kind_at(&line.tokens, pos) == Some(TokenKind::Final);
            if is_final {
                pos += 1;
            }
            let Some(var_type) = line.tokens.get(pos).and_then(declared_type) else {
                break;
            };
            let Some(param) = line
                .tokens
                .get(pos + 1)
                .filter(|t| t.kind == TokenKind::VarName)
            else {
                break;
            };
            let mut var = Variable::new(var_type, self.scope.clone(), is_final);
            var.mark_initialized(line.number, &self.scope);
            params.push((param.name(), var));

            pos += 2;
            if kind_at(&line.tokens, pos) != Some(TokenKind::Comma) {
                break;
            }
            pos += 1;
        }

        let method = Method {
            name,
            param_types: params.iter().map(|(_, v)| v.var_type).collect(),
        };
        self.tables.methods.declare(method, line.number)?;
        for (param, var) in params {
            self.tables.variables.declare(param, var, line.number)?;
        }
        Ok(())
    }
}

fn declared_type(token: &Token) -> Option<VarType> {
    if token.kind.is_type_keyword() {
        VarType::from_token(token.kind)
    } else {
        None
    }
}

fn kind_at(tokens: &[Token], pos: usize) -> Option<TokenKind> {
    tokens.get(pos).map(|t| t.kind)
}
