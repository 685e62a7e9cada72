use crate::error::AstError;
use smol_str::SmolStr;

/// An expression in the Meson build language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Bool(bool),
    Number(i64),
    Id(SmolStr),
    Array(Vec<Expr>),
    FunctionCall {
        name: SmolStr,
        args: Args,
    },
    MethodCall {
        receiver: Box<Expr>,
        name: SmolStr,
        args: Args,
    },
    Comparison {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    In,
    NotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::In => "in",
            CompareOp::NotIn => "not in",
        }
    }

    /// The operator with inverted truth value.
    pub fn negated(self) -> CompareOp {
        match self {
            CompareOp::Eq => CompareOp::Ne,
            CompareOp::Ne => CompareOp::Eq,
            CompareOp::In => CompareOp::NotIn,
            CompareOp::NotIn => CompareOp::In,
        }
    }
}

impl LogicOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
        }
    }
}

impl Expr {
    pub fn str(value: impl Into<String>) -> Expr {
        Expr::Str(value.into())
    }

    /// An identifier node. Prefer `BlockBuilder::id`, which checks that the
    /// variable has been assigned.
    pub fn raw_id(name: impl Into<SmolStr>) -> Expr {
        Expr::Id(name.into())
    }

    pub fn call(name: impl Into<SmolStr>, args: Args) -> Expr {
        Expr::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn method(receiver: Expr, name: impl Into<SmolStr>, args: Args) -> Expr {
        Expr::MethodCall {
            receiver: Box::new(receiver),
            name: name.into(),
            args,
        }
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Expr {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicOp, left: Expr, right: Expr) -> Expr {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    /// A literal that renders on a single line with no internal structure.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Expr::Str(_) | Expr::Bool(_) | Expr::Number(_) | Expr::Id(_)
        )
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Expr {
        Expr::Str(value.to_string())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Expr {
        Expr::Str(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Expr {
        Expr::Bool(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Expr {
        Expr::Number(value)
    }
}

impl From<Vec<Expr>> for Expr {
    fn from(value: Vec<Expr>) -> Expr {
        Expr::Array(value)
    }
}

/// Positional and keyword arguments of a function or method call.
///
/// Keyword order is preserved; inserting the same keyword twice is an
/// error rather than a silent overwrite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    pub positional: Vec<Expr>,
    pub keyword: Vec<(SmolStr, Expr)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(&mut self, value: impl Into<Expr>) -> &mut Self {
        self.positional.push(value.into());
        self
    }

    pub fn kw(&mut self, name: &str, value: impl Into<Expr>) -> Result<&mut Self, AstError> {
        if self.keyword.iter().any(|(k, _)| k == name) {
            return Err(AstError::DuplicateKeyword(name.to_string()));
        }
        self.keyword.push((SmolStr::new(name), value.into()));
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

/// Convenience for calls that take only positional arguments.
pub fn args(positional: impl IntoIterator<Item = Expr>) -> Args {
    Args {
        positional: positional.into_iter().collect(),
        keyword: Vec::new(),
    }
}
