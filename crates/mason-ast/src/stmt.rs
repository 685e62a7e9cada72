use crate::expr::Expr;
use smol_str::SmolStr;

/// A statement in the Meson build language.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A bare expression statement, e.g. a `project(...)` call.
    Expr(Expr),
    Assign {
        name: SmolStr,
        value: Expr,
    },
    PlusAssign {
        name: SmolStr,
        value: Expr,
    },
    If {
        /// `if` plus any `elif` arms, in order.
        branches: Vec<(Expr, Block)>,
        else_block: Option<Block>,
    },
}

/// An ordered sequence of statements; the unit that renders to a file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
