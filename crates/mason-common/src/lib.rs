mod span;
mod diagnostic;

pub use span::{Span, Spanned};
pub use diagnostic::{Diagnostic, DiagnosticLevel};
