//! Variable and method tables, built during the per-line pass and refined
//! (initialization markers only) by the semantics pass.

use crate::error::{ErrorKind, VerifyError};
use crate::lexer::TokenKind;
use crate::scope::ScopePath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarType {
    Int,
    Double,
    /// Reserved. No keyword or literal produces it and it matches nothing.
    Float,
    String,
    Char,
    Boolean,
}

impl VarType {
    /// The type named by a type keyword or carried by a literal token.
    pub fn from_token(kind: TokenKind) -> Option<VarType> {
        let t = match kind {
            TokenKind::Int | TokenKind::IntVal => VarType::Int,
            TokenKind::Double | TokenKind::DoubleVal => VarType::Double,
            TokenKind::String | TokenKind::StringVal => VarType::String,
            TokenKind::Char | TokenKind::CharVal => VarType::Char,
            TokenKind::Boolean | TokenKind::BooleanVal => VarType::Boolean,
            _ => return None,
        };
        Some(t)
    }

    /// Can a value of type `source` be stored in a slot of type `self`?
    pub fn accepts(self, source: VarType) -> bool {
        use VarType::*;
        match (self, source) {
            (Float, _) | (_, Float) => false,
            (Double, Int) => true,
            (Boolean, Int | Double) => true,
            (target, source) => target == source,
        }
    }

    /// Types usable as an atom of an `if`/`while` condition.
    pub fn is_condition_compatible(self) -> bool {
        matches!(self, VarType::Int | VarType::Double | VarType::Boolean)
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VarType::Int => "int",
            VarType::Double => "double",
            VarType::Float => "float",
            VarType::String => "String",
            VarType::Char => "char",
            VarType::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// Where a variable first received a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initialization {
    pub line: u32,
    pub scope: ScopePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub var_type: VarType,
    pub declared_scope: ScopePath,
    pub is_final: bool,
    init: Option<Initialization>,
}

impl Variable {
    pub fn new(var_type: VarType, declared_scope: ScopePath, is_final: bool) -> Self {
        Variable {
            var_type,
            declared_scope,
            is_final,
            init: None,
        }
    }

    pub fn initialization(&self) -> Option<&Initialization> {
        self.init.as_ref()
    }

    pub fn init_line(&self) -> Option<u32> {
        self.init.as_ref().map(|i| i.line)
    }

    /// Record the first initialization. Later calls are ignored.
    pub fn mark_initialized(&mut self, line: u32, scope: &ScopePath) {
        if self.init.is_none() {
            self.init = Some(Initialization {
                line,
                scope: scope.clone(),
            });
        }
    }

    /// May this variable's value be read on line `line`, read in scope `scope`?
    ///
    /// A global is usable at top level only after its initializing line, and
    /// inside a block only if it was initialized at top level or in that very
    /// block. A local is usable only in its own scope, after being initialized
    /// there.
    pub fn is_initialized_for(&self, line: u32, scope: &ScopePath) -> bool {
        let Some(init) = &self.init else {
            return false;
        };
        if self.declared_scope.is_global() {
            if scope.is_global() {
                init.line < line
            } else {
                init.scope.is_global() || init.scope == *scope
            }
        } else {
            self.declared_scope == *scope && init.scope == *scope && init.line < line
        }
    }
}

/// Name -> one record per declaring scope.
#[derive(Debug, Default)]
pub struct VariableTable {
    vars: HashMap<String, Vec<Variable>>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. Shadowing an outer scope is fine; a second
    /// declaration in the same scope is not.
    pub fn declare(&mut self, name: &str, var: Variable, line: u32) -> Result<(), VerifyError> {
        let records = self.vars.entry(name.to_owned()).or_default();
        if records
            .iter()
            .any(|existing| existing.declared_scope == var.declared_scope)
        {
            return Err(VerifyError::new(
                ErrorKind::DuplicateDeclaration,
                line,
                format!(
                    "variable '{}' is already declared in scope {}",
                    name, var.declared_scope
                ),
            ));
        }
        records.push(var);
        Ok(())
    }

    /// The innermost declaration of `name` visible from `scope`.
    pub fn lookup(&self, name: &str, scope: &ScopePath) -> Option<&Variable> {
        self.vars
            .get(name)?
            .iter()
            .filter(|v| v.declared_scope.is_prefix_of(scope))
            .max_by_key(|v| v.declared_scope.depth())
    }

    pub fn lookup_mut(&mut self, name: &str, scope: &ScopePath) -> Option<&mut Variable> {
        self.vars
            .get_mut(name)?
            .iter_mut()
            .filter(|v| v.declared_scope.is_prefix_of(scope))
            .max_by_key(|v| v.declared_scope.depth())
    }

    /// Like [`lookup`](Self::lookup) but fails with `UnboundVariable`.
    pub fn resolve(
        &self,
        name: &str,
        scope: &ScopePath,
        line: u32,
    ) -> Result<&Variable, VerifyError> {
        self.lookup(name, scope).ok_or_else(|| unbound(name, scope, line))
    }

    pub fn resolve_mut(
        &mut self,
        name: &str,
        scope: &ScopePath,
        line: u32,
    ) -> Result<&mut Variable, VerifyError> {
        self.lookup_mut(name, scope)
            .ok_or_else(|| unbound(name, scope, line))
    }

    pub fn len(&self) -> usize {
        self.vars.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn unbound(name: &str, scope: &ScopePath, line: u32) -> VerifyError {
    VerifyError::new(
        ErrorKind::UnboundVariable,
        line,
        format!("variable '{}' is not declared in scope {}", name, scope),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub param_types: Vec<VarType>,
}

/// Name -> method. There is no overloading.
#[derive(Debug, Default)]
pub struct MethodTable {
    methods: HashMap<String, Method>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, method: Method, line: u32) -> Result<(), VerifyError> {
        if self.methods.contains_key(&method.name) {
            return Err(VerifyError::new(
                ErrorKind::DuplicateMethod,
                line,
                format!("method '{}' is already declared", method.name),
            ));
        }
        self.methods.insert(method.name.clone(), method);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Both tables for one verification run.
#[derive(Debug, Default)]
pub struct Tables {
    pub variables: VariableTable,
    pub methods: MethodTable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Segment;

    fn global() -> ScopePath {
        ScopePath::global()
    }

    fn method(name: &str) -> ScopePath {
        global().child(Segment::Method(name.into()))
    }

    #[test]
    fn widening_is_one_directional() {
        use VarType::*;
        assert!(Double.accepts(Int));
        assert!(!Int.accepts(Double));
        assert!(Boolean.accepts(Boolean));
        assert!(Boolean.accepts(Int));
        assert!(Boolean.accepts(Double));
        assert!(!Double.accepts(Boolean));
        assert!(!String.accepts(Char));
        assert!(!Char.accepts(String));
        assert!(!Float.accepts(Float));
        assert!(!Double.accepts(Float));
    }

    #[test]
    fn redeclaration_in_same_scope_is_rejected() {
        let mut table = VariableTable::new();
        table
            .declare("a", Variable::new(VarType::Int, global(), false), 1)
            .unwrap();
        table
            .declare("a", Variable::new(VarType::Int, method("f"), false), 2)
            .unwrap();
        let err = table
            .declare("a", Variable::new(VarType::Char, global(), false), 3)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn lookup_prefers_innermost_declaration() {
        let mut table = VariableTable::new();
        table
            .declare("a", Variable::new(VarType::Int, global(), false), 1)
            .unwrap();
        table
            .declare("a", Variable::new(VarType::String, method("f"), false), 2)
            .unwrap();
        let inner = method("f").child(Segment::If(1));
        assert_eq!(table.lookup("a", &inner).unwrap().var_type, VarType::String);
        assert_eq!(table.lookup("a", &method("g")).unwrap().var_type, VarType::Int);
        assert!(table.lookup("b", &global()).is_none());
    }

    #[test]
    fn visibility_follows_prefix() {
        let mut table = VariableTable::new();
        let if1 = method("f").child(Segment::If(1));
        table
            .declare("x", Variable::new(VarType::Int, if1.clone(), false), 3)
            .unwrap();
        assert!(table.lookup("x", &if1).is_some());
        assert!(table.lookup("x", &if1.child(Segment::While(1))).is_some());
        assert!(table.lookup("x", &method("f")).is_none());
        assert!(table
            .lookup("x", &method("f").child(Segment::If(10)))
            .is_none());
    }

    #[test]
    fn first_initialization_wins() {
        let mut v = Variable::new(VarType::Int, global(), false);
        v.mark_initialized(2, &global());
        v.mark_initialized(5, &method("f"));
        assert_eq!(v.init_line(), Some(2));
        assert!(v.initialization().unwrap().scope.is_global());
    }

    #[test]
    fn global_initialized_at_top_level() {
        let mut v = Variable::new(VarType::Int, global(), false);
        assert!(!v.is_initialized_for(9, &global()));
        v.mark_initialized(4, &global());
        assert!(!v.is_initialized_for(4, &global()));
        assert!(v.is_initialized_for(5, &global()));
        // Any block may read it, even one that precedes the initialization.
        assert!(v.is_initialized_for(2, &method("f")));
    }

    #[test]
    fn global_initialized_inside_block_does_not_leak() {
        let mut v = Variable::new(VarType::Int, global(), false);
        let f_if = method("f").child(Segment::If(1));
        v.mark_initialized(4, &f_if);
        assert!(v.is_initialized_for(6, &f_if));
        assert!(!v.is_initialized_for(6, &method("f")));
        assert!(!v.is_initialized_for(8, &method("g")));
        // Top-level reads only compare line order.
        assert!(v.is_initialized_for(8, &global()));
    }

    #[test]
    fn local_usable_only_in_own_scope_after_init() {
        let mut v = Variable::new(VarType::Int, method("f"), false);
        v.mark_initialized(3, &method("f"));
        assert!(!v.is_initialized_for(3, &method("f")));
        assert!(v.is_initialized_for(4, &method("f")));
        assert!(!v.is_initialized_for(4, &method("f").child(Segment::If(1))));
    }

    #[test]
    fn duplicate_method_is_rejected_regardless_of_signature() {
        let mut methods = MethodTable::new();
        methods
            .declare(
                Method {
                    name: "f".into(),
                    param_types: vec![],
                },
                1,
            )
            .unwrap();
        let err = methods
            .declare(
                Method {
                    name: "f".into(),
                    param_types: vec![VarType::Int],
                },
                5,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateMethod);
    }
}
