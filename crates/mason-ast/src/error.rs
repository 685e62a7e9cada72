use thiserror::Error;

/// Errors raised while constructing Meson AST nodes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A keyword argument was given twice in the same call.
    #[error("duplicate keyword argument: {0}")]
    DuplicateKeyword(String),

    /// A variable was referenced before any assignment to it.
    #[error("cannot reference undefined variable: {0}")]
    UndefinedVariable(String),

    /// `+=` on a variable that was never assigned.
    #[error("cannot append to undefined variable: {0}")]
    AppendToUndefined(String),
}
