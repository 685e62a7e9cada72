//! Checked construction of statement blocks.
//!
//! The builder tracks which variables have been assigned so far. Referencing
//! or appending to a name that was never assigned is a construction-time
//! error; generated build files must never mention variables that do not
//! exist.

use crate::error::AstError;
use crate::expr::Expr;
use crate::stmt::{Block, Stmt};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

#[derive(Debug, Default)]
pub struct BlockBuilder {
    stmts: Vec<Stmt>,
    variables: FxHashSet<SmolStr>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder for a nested block (an `if` body) that can see the
    /// variables assigned in the enclosing scope.
    pub fn nested(&self) -> BlockBuilder {
        BlockBuilder {
            stmts: Vec::new(),
            variables: self.variables.clone(),
        }
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    /// An identifier expression for an assigned variable.
    pub fn id(&self, name: &str) -> Result<Expr, AstError> {
        if !self.variables.contains(name) {
            return Err(AstError::UndefinedVariable(name.to_string()));
        }
        Ok(Expr::Id(SmolStr::new(name)))
    }

    pub fn expr(&mut self, expr: Expr) {
        self.stmts.push(Stmt::Expr(expr));
    }

    pub fn assign(&mut self, name: &str, value: Expr) {
        self.variables.insert(SmolStr::new(name));
        self.stmts.push(Stmt::Assign {
            name: SmolStr::new(name),
            value,
        });
    }

    pub fn plus_assign(&mut self, name: &str, value: Expr) -> Result<(), AstError> {
        if !self.variables.contains(name) {
            return Err(AstError::AppendToUndefined(name.to_string()));
        }
        self.stmts.push(Stmt::PlusAssign {
            name: SmolStr::new(name),
            value,
        });
        Ok(())
    }

    /// A single-branch `if` statement.
    pub fn if_stmt(&mut self, condition: Expr, body: Block) {
        self.stmts.push(Stmt::If {
            branches: vec![(condition, body)],
            else_block: None,
        });
    }

    pub fn finish(self) -> Block {
        Block { stmts: self.stmts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::args;

    #[test]
    fn test_id_requires_assignment() {
        let mut b = BlockBuilder::new();
        assert_eq!(
            b.id("lib").unwrap_err(),
            AstError::UndefinedVariable("lib".to_string())
        );

        b.assign("lib", Expr::call("static_library", args([Expr::str("lib")])));
        assert!(b.id("lib").is_ok());
    }

    #[test]
    fn test_plus_assign_requires_assignment() {
        let mut b = BlockBuilder::new();
        let err = b
            .plus_assign("dependencies", Expr::Array(vec![]))
            .unwrap_err();
        assert_eq!(err, AstError::AppendToUndefined("dependencies".to_string()));
    }

    #[test]
    fn test_nested_sees_outer_variables() {
        let mut b = BlockBuilder::new();
        b.assign("dependencies", Expr::Array(vec![]));

        let mut inner = b.nested();
        assert!(inner.id("dependencies").is_ok());
        inner
            .plus_assign("dependencies", Expr::Array(vec![Expr::str("x")]))
            .unwrap();
    }
}
