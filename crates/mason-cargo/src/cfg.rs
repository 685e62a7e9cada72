//! Lexer and parser for Cargo's `cfg()` expressions.
//!
//! cfg expressions have the following properties:
//! - bare predicates: `unix`, `windows`
//! - assignment predicates: `target_arch = "x86"`, `target_os = "linux"`
//! - `not()`, `all()` and `any()`; the latter two take comma-separated
//!   argument lists, e.g. `all(target_arch = "x86", target_os = "linux")`
//!
//! The parser accepts an expression with or without the outer `cfg(...)`
//! wrapper and folds `not(key = value)` into a not-equal node, which is the
//! shape the lowering code wants.

use mason_common::{Diagnostic, Span, Spanned};
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier directly followed by `(`.
    Function(SmolStr),
    Ident(SmolStr),
    Str(SmolStr),
    Equal,
    Comma,
    LParen,
    RParen,
}

pub type Token = Spanned<TokenKind>;

fn token(kind: TokenKind, start: usize, end: usize) -> Token {
    Spanned::new(kind, Span::new(start as u32, end as u32))
}

/// A parsed cfg expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CfgExpr {
    /// A bare predicate such as `unix`.
    Ident(SmolStr),
    Equal { key: SmolStr, value: SmolStr },
    NotEqual { key: SmolStr, value: SmolStr },
    Not(Box<CfgExpr>),
    Any(Vec<CfgExpr>),
    All(Vec<CfgExpr>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CfgError {
    #[error("unexpected character {ch:?} in cfg expression")]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("cfg expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("unexpected {found} in cfg expression")]
    UnexpectedToken { found: &'static str, span: Span },

    #[error("unknown cfg function {name:?}")]
    UnknownFunction { name: SmolStr, span: Span },

    #[error("not() takes exactly one argument")]
    NotArity { span: Span },

    #[error("expected a string after `=`")]
    ExpectedString { span: Span },

    #[error("trailing input after cfg expression")]
    TrailingInput { span: Span },
}

impl CfgError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CfgError::UnexpectedChar { span, .. }
            | CfgError::UnterminatedString { span }
            | CfgError::UnexpectedToken { span, .. }
            | CfgError::UnknownFunction { span, .. }
            | CfgError::NotArity { span }
            | CfgError::ExpectedString { span }
            | CfgError::TrailingInput { span } => Some(*span),
            CfgError::UnexpectedEnd => None,
        }
    }

    /// A diagnostic with the offending span labeled, for CLI rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self.span() {
            Some(span) => diag.with_span(span).with_label("here"),
            None => diag,
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Tokenize a cfg expression.
pub fn lex(expr: &str) -> Result<Vec<Token>, CfgError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            ' ' | '\t' => {}
            '(' => tokens.push(token(TokenKind::LParen, i, i + 1)),
            ')' => tokens.push(token(TokenKind::RParen, i, i + 1)),
            ',' => tokens.push(token(TokenKind::Comma, i, i + 1)),
            '=' => tokens.push(token(TokenKind::Equal, i, i + 1)),
            '"' => {
                let start = i;
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((end, '"')) => {
                            tokens.push(token(
                                TokenKind::Str(SmolStr::new(&value)),
                                start,
                                end + 1,
                            ));
                            break;
                        }
                        Some((_, c)) => value.push(c),
                        None => {
                            return Err(CfgError::UnterminatedString {
                                span: Span::new(start as u32, expr.len() as u32),
                            })
                        }
                    }
                }
            }
            c if is_ident_char(c) => {
                let start = i;
                let mut end = i + c.len_utf8();
                while let Some(&(j, c)) = chars.peek() {
                    if is_ident_char(c) {
                        chars.next();
                        end = j + c.len_utf8();
                    } else {
                        break;
                    }
                }
                let name = SmolStr::new(&expr[start..end]);
                // An identifier glued to an opening paren is a function.
                let kind = match chars.peek() {
                    Some(&(_, '(')) => TokenKind::Function(name),
                    _ => TokenKind::Ident(name),
                };
                tokens.push(token(kind, start, end));
            }
            other => {
                return Err(CfgError::UnexpectedChar {
                    ch: other,
                    span: Span::new(i as u32, (i + other.len_utf8()) as u32),
                })
            }
        }
    }

    Ok(tokens)
}

/// Parse a cfg expression, with or without the `cfg(...)` wrapper.
pub fn parse(expr: &str) -> Result<CfgExpr, CfgError> {
    let tokens = lex(expr)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };

    let ast = match parser.peek() {
        Some(TokenKind::Function(name)) if name == "cfg" => {
            parser.bump();
            parser.expect_lparen()?;
            let inner = parser.expr()?;
            parser.expect_rparen()?;
            inner
        }
        _ => parser.expr()?,
    };

    if let Some(token) = parser.current() {
        return Err(CfgError::TrailingInput { span: token.span });
    }
    Ok(ast)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&'a TokenKind> {
        self.current().map(|t| &t.node)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expect_lparen(&mut self) -> Result<(), CfgError> {
        match self.bump() {
            Some(t) if t.node == TokenKind::LParen => Ok(()),
            Some(t) => Err(CfgError::UnexpectedToken {
                found: "token",
                span: t.span,
            }),
            None => Err(CfgError::UnexpectedEnd),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), CfgError> {
        match self.bump() {
            Some(t) if t.node == TokenKind::RParen => Ok(()),
            Some(t) => Err(CfgError::UnexpectedToken {
                found: "token",
                span: t.span,
            }),
            None => Err(CfgError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<CfgExpr, CfgError> {
        match self.bump() {
            Some(token) => match &token.node {
                TokenKind::Function(name) => self.function(name.clone(), token.span),
                TokenKind::Ident(name) => {
                    if self.peek() == Some(&TokenKind::Equal) {
                        self.bump();
                        let value = self.string()?;
                        Ok(CfgExpr::Equal {
                            key: name.clone(),
                            value,
                        })
                    } else {
                        Ok(CfgExpr::Ident(name.clone()))
                    }
                }
                _ => Err(CfgError::UnexpectedToken {
                    found: "token",
                    span: token.span,
                }),
            },
            None => Err(CfgError::UnexpectedEnd),
        }
    }

    fn string(&mut self) -> Result<SmolStr, CfgError> {
        match self.bump() {
            Some(token) => match &token.node {
                TokenKind::Str(value) => Ok(value.clone()),
                _ => Err(CfgError::ExpectedString { span: token.span }),
            },
            None => Err(CfgError::UnexpectedEnd),
        }
    }

    fn function(&mut self, name: SmolStr, span: Span) -> Result<CfgExpr, CfgError> {
        self.expect_lparen()?;
        match name.as_str() {
            "not" => {
                let inner = self.expr()?;
                self.expect_rparen()?;
                Ok(negate(inner))
            }
            "any" | "all" => {
                let mut arguments = vec![self.expr()?];
                loop {
                    match self.peek() {
                        Some(TokenKind::Comma) => {
                            self.bump();
                            arguments.push(self.expr()?);
                        }
                        Some(TokenKind::RParen) => {
                            self.bump();
                            break;
                        }
                        Some(_) => {
                            let token = self.current().ok_or(CfgError::UnexpectedEnd)?;
                            return Err(CfgError::UnexpectedToken {
                                found: "token",
                                span: token.span,
                            });
                        }
                        None => return Err(CfgError::UnexpectedEnd),
                    }
                }
                if name == "any" {
                    Ok(CfgExpr::Any(arguments))
                } else {
                    Ok(CfgExpr::All(arguments))
                }
            }
            _ => Err(CfgError::UnknownFunction { name, span }),
        }
    }
}

/// `not(key = value)` folds into a not-equal node; double negation cancels.
fn negate(expr: CfgExpr) -> CfgExpr {
    match expr {
        CfgExpr::Equal { key, value } => CfgExpr::NotEqual { key, value },
        CfgExpr::NotEqual { key, value } => CfgExpr::Equal { key, value },
        CfgExpr::Not(inner) => *inner,
        other => CfgExpr::Not(Box::new(other)),
    }
}
