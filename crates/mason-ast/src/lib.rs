//! AST for the subset of the Meson build language that mason emits.
//!
//! This crate only ever *produces* build definitions; there is no
//! evaluator. `Expr`/`Stmt`/`Block` model the nodes, `BlockBuilder` keeps
//! construction honest (it refuses references to variables that were never
//! assigned), and `Block::render` turns the tree into `meson.build` text.

mod error;
mod expr;
mod stmt;
mod builder;
mod render;

pub use error::AstError;
pub use expr::{args, Args, CompareOp, Expr, LogicOp};
pub use stmt::{Block, Stmt};
pub use builder::BlockBuilder;
