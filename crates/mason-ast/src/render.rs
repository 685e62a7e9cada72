//! Rendering of AST blocks into Meson source text.
//!
//! The output is deterministic: one statement per line, two-space
//! indentation inside `if` bodies, single-quoted strings. Arrays render
//! inline except in assignments where an element carries structure (a
//! subproject lookup, for example), which get one element per line.

use crate::expr::{Args, Expr, LogicOp};
use crate::stmt::{Block, Stmt};
use std::fmt::Write;

const INDENT: &str = "  ";

impl Block {
    /// Render the block as a complete Meson source file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_block(self, 0, &mut out);
        out
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn render_block(block: &Block, level: usize, out: &mut String) {
    for stmt in &block.stmts {
        render_stmt(stmt, level, out);
    }
}

fn render_stmt(stmt: &Stmt, level: usize, out: &mut String) {
    match stmt {
        Stmt::Expr(expr) => {
            push_indent(out, level);
            render_expr(expr, out);
            out.push('\n');
        }
        Stmt::Assign { name, value } => {
            push_indent(out, level);
            let _ = write!(out, "{name} = ");
            render_assigned_value(value, level, out);
            out.push('\n');
        }
        Stmt::PlusAssign { name, value } => {
            push_indent(out, level);
            let _ = write!(out, "{name} += ");
            render_assigned_value(value, level, out);
            out.push('\n');
        }
        Stmt::If {
            branches,
            else_block,
        } => {
            for (i, (condition, body)) in branches.iter().enumerate() {
                push_indent(out, level);
                out.push_str(if i == 0 { "if " } else { "elif " });
                render_expr(condition, out);
                out.push('\n');
                render_block(body, level + 1, out);
            }
            if let Some(body) = else_block {
                push_indent(out, level);
                out.push_str("else\n");
                render_block(body, level + 1, out);
            }
            push_indent(out, level);
            out.push_str("endif\n");
        }
    }
}

/// The right-hand side of an assignment. Arrays with structured elements
/// break one element per line; everything else renders inline.
fn render_assigned_value(value: &Expr, level: usize, out: &mut String) {
    match value {
        Expr::Array(items) if !items.is_empty() && !items.iter().all(Expr::is_scalar) => {
            out.push_str("[\n");
            for item in items {
                push_indent(out, level + 1);
                render_expr(item, out);
                out.push_str(",\n");
            }
            push_indent(out, level);
            out.push(']');
        }
        other => render_expr(other, out),
    }
}

fn render_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Str(s) => {
            out.push('\'');
            for c in s.chars() {
                match c {
                    '\'' => out.push_str("\\'"),
                    '\\' => out.push_str("\\\\"),
                    other => out.push(other),
                }
            }
            out.push('\'');
        }
        Expr::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Expr::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Expr::Id(name) => out.push_str(name),
        Expr::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_expr(item, out);
            }
            out.push(']');
        }
        Expr::FunctionCall { name, args } => {
            out.push_str(name);
            render_args(args, out);
        }
        Expr::MethodCall {
            receiver,
            name,
            args,
        } => {
            render_expr(receiver, out);
            out.push('.');
            out.push_str(name);
            render_args(args, out);
        }
        Expr::Comparison { op, left, right } => {
            render_operand(left, None, out);
            let _ = write!(out, " {} ", op.as_str());
            render_operand(right, None, out);
        }
        Expr::Logical { op, left, right } => {
            render_operand(left, Some(*op), out);
            let _ = write!(out, " {} ", op.as_str());
            render_operand(right, Some(*op), out);
        }
        Expr::Not(inner) => {
            out.push_str("not ");
            if inner.is_scalar() {
                render_expr(inner, out);
            } else {
                out.push('(');
                render_expr(inner, out);
                out.push(')');
            }
        }
    }
}

fn render_args(args: &Args, out: &mut String) {
    out.push('(');
    let mut first = true;
    for positional in &args.positional {
        if !first {
            out.push_str(", ");
        }
        first = false;
        render_expr(positional, out);
    }
    for (name, value) in &args.keyword {
        if !first {
            out.push_str(", ");
        }
        first = false;
        let _ = write!(out, "{name} : ");
        render_expr(value, out);
    }
    out.push(')');
}

/// Parenthesize logical children under a different operator so that mixed
/// `and`/`or` chains keep their grouping.
fn render_operand(expr: &Expr, parent: Option<LogicOp>, out: &mut String) {
    let needs_parens = match expr {
        Expr::Logical { op, .. } => parent != Some(*op),
        _ => false,
    };
    if needs_parens {
        out.push('(');
        render_expr(expr, out);
        out.push(')');
    } else {
        render_expr(expr, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BlockBuilder;
    use crate::expr::{args, CompareOp};

    fn project_call() -> Expr {
        let mut a = Args::new();
        a.pos("demo");
        a.pos(Expr::Array(vec![Expr::str("rust")]));
        a.kw("version", "0.1.0").unwrap();
        Expr::call("project", a)
    }

    #[test]
    fn test_render_function_call() {
        let mut b = BlockBuilder::new();
        b.expr(project_call());
        assert_eq!(
            b.finish().render(),
            "project('demo', ['rust'], version : '0.1.0')\n"
        );
    }

    #[test]
    fn test_render_assignment_and_method_chain() {
        let mut b = BlockBuilder::new();
        b.assign(
            "rust",
            Expr::call("import", args([Expr::str("rust")])),
        );
        let subproject = Expr::method(
            b.id("rust").unwrap(),
            "subproject",
            args([Expr::str("log")]),
        );
        let dep = Expr::method(subproject, "get_variable", args([Expr::str("dep")]));
        b.assign("dependencies", Expr::Array(vec![dep]));

        insta::assert_snapshot!(b.finish().render(), @r"
        rust = import('rust')
        dependencies = [
          rust.subproject('log').get_variable('dep'),
        ]
        ");
    }

    #[test]
    fn test_render_if_block() {
        let mut b = BlockBuilder::new();
        b.assign("dependencies", Expr::Array(vec![]));
        let mut inner = b.nested();
        inner
            .plus_assign("dependencies", Expr::Array(vec![Expr::str("x")]))
            .unwrap();
        b.if_stmt(
            Expr::call("get_option", args([Expr::str("serde")])),
            inner.finish(),
        );

        insta::assert_snapshot!(b.finish().render(), @r"
        dependencies = []
        if get_option('serde')
          dependencies += ['x']
        endif
        ");
    }

    #[test]
    fn test_render_mixed_logic_parenthesized() {
        let system = Expr::method(Expr::raw_id("host_machine"), "system", Args::new());
        let not_windows = Expr::compare(CompareOp::Ne, system.clone(), Expr::str("windows"));
        let is_arm = Expr::compare(
            CompareOp::Eq,
            Expr::method(Expr::raw_id("host_machine"), "cpu_family", Args::new()),
            Expr::str("arm"),
        );
        let is_mips = Expr::compare(
            CompareOp::Eq,
            Expr::method(Expr::raw_id("host_machine"), "cpu_family", Args::new()),
            Expr::str("mips"),
        );
        let any = Expr::logical(crate::expr::LogicOp::Or, is_arm, is_mips);
        let all = Expr::logical(crate::expr::LogicOp::And, not_windows, any);

        let mut out = String::new();
        render_expr(&all, &mut out);
        assert_eq!(
            out,
            "host_machine.system() != 'windows' and \
             (host_machine.cpu_family() == 'arm' or host_machine.cpu_family() == 'mips')"
        );
    }

    #[test]
    fn test_render_string_escaping() {
        let mut out = String::new();
        render_expr(&Expr::str("feature=\"serde\""), &mut out);
        assert_eq!(out, "'feature=\"serde\"'");

        let mut out = String::new();
        render_expr(&Expr::str("it's"), &mut out);
        assert_eq!(out, "'it\\'s'");
    }
}
