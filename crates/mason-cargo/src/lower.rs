//! Lowering of `cfg()` ASTs into Meson condition expressions.
//!
//! cfg() is a purely functional mini-language in which every node is a
//! boolean, so `any(a, b, c)` simply becomes `a or b or c` and predicates
//! become comparisons against `host_machine`.

use crate::cfg::CfgExpr;
use crate::error::{ConvertError, Result};
use mason_ast::{Args, CompareOp, Expr, LogicOp};
use mason_common::Diagnostic;

/// Cargo `target_os` values mapped to `host_machine.system()` values.
const TARGET_OS_MAP: &[(&str, &str)] = &[
    ("android", "android"),
    ("darwin", "darwin"),
    ("dragonfly", "dragonfly"),
    ("freebsd", "freebsd"),
    ("haiku", "haiku"),
    ("illumos", "sunos"),
    ("ios", "darwin"),
    ("linux", "linux"),
    ("macos", "darwin"),
    ("netbsd", "netbsd"),
    ("openbsd", "openbsd"),
    ("solaris", "sunos"),
    ("windows", "windows"),
];

/// Unix-like values of `host_machine.system()`, sorted for deterministic
/// output.
const UNIX_LIKE_SYSTEMS: &[&str] = &[
    "android",
    "cygwin",
    "darwin",
    "dragonfly",
    "freebsd",
    "gnu",
    "linux",
    "netbsd",
    "openbsd",
    "sunos",
];

fn host_machine_method(name: &str) -> Expr {
    Expr::method(Expr::raw_id("host_machine"), name, Args::new())
}

fn map_target_os(os: &str, warnings: &mut Vec<Diagnostic>) -> String {
    match TARGET_OS_MAP.iter().find(|(cargo, _)| *cargo == os) {
        Some((_, meson)) => (*meson).to_string(),
        None => {
            warnings.push(Diagnostic::warning(format!(
                "cannot map cargo os {os:?} to a meson value, please report this as a bug"
            )));
            "unsupported platform".to_string()
        }
    }
}

/// `cpu_family()` folds some architecture spellings together.
fn map_target_arch(arch: &str) -> String {
    if arch.starts_with("powerpc") {
        if arch.ends_with("64") { "ppc64" } else { "ppc" }.to_string()
    } else if arch.starts_with("arm") {
        "arm".to_string()
    } else {
        arch.to_string()
    }
}

/// The `system() in [...]` membership check for a target family.
fn family_condition(op: CompareOp, family: &str) -> Expr {
    let systems: Vec<Expr> = if family == "windows" {
        vec![Expr::str("windows")]
    } else {
        UNIX_LIKE_SYSTEMS.iter().map(|s| Expr::str(*s)).collect()
    };
    Expr::compare(op, host_machine_method("system"), Expr::Array(systems))
}

fn equality(op: CompareOp, key: &str, value: &str, warnings: &mut Vec<Diagnostic>) -> Result<Expr> {
    match key {
        "target_os" => Ok(Expr::compare(
            op,
            host_machine_method("system"),
            Expr::str(map_target_os(value, warnings)),
        )),
        "target_arch" => Ok(Expr::compare(
            op,
            host_machine_method("cpu_family"),
            Expr::str(map_target_arch(value)),
        )),
        "target_family" => {
            let membership = match op {
                CompareOp::Eq => CompareOp::In,
                _ => CompareOp::NotIn,
            };
            Ok(family_condition(membership, value))
        }
        other => Err(ConvertError::UnsupportedCfgKey(other.to_string())),
    }
}

/// Lower a cfg expression into a Meson condition. Warnings (unknown OS
/// names) are appended to `warnings`.
pub fn lower(expr: &CfgExpr, warnings: &mut Vec<Diagnostic>) -> Result<Expr> {
    match expr {
        CfgExpr::Ident(name) => match name.as_str() {
            "unix" | "windows" => Ok(family_condition(CompareOp::In, name)),
            other => Err(ConvertError::UnsupportedCfgKey(other.to_string())),
        },
        CfgExpr::Equal { key, value } => equality(CompareOp::Eq, key, value, warnings),
        CfgExpr::NotEqual { key, value } => equality(CompareOp::Ne, key, value, warnings),
        CfgExpr::Not(inner) => {
            let lowered = lower(inner, warnings)?;
            Ok(match lowered {
                Expr::Comparison { op, left, right } => Expr::Comparison {
                    op: op.negated(),
                    left,
                    right,
                },
                other => Expr::not(other),
            })
        }
        CfgExpr::Any(arguments) => fold(LogicOp::Or, arguments, warnings),
        CfgExpr::All(arguments) => fold(LogicOp::And, arguments, warnings),
    }
}

fn fold(op: LogicOp, arguments: &[CfgExpr], warnings: &mut Vec<Diagnostic>) -> Result<Expr> {
    let mut iter = arguments.iter();
    let first = iter.next().ok_or_else(|| {
        ConvertError::UnsupportedCfgKey(format!("empty {}()", op.as_str()))
    })?;
    let mut acc = lower(first, warnings)?;
    for argument in iter {
        acc = Expr::logical(op, acc, lower(argument, warnings)?);
    }
    Ok(acc)
}

/// Parse and lower a cfg string in one step.
pub fn condition_for(cfg: &str, warnings: &mut Vec<Diagnostic>) -> Result<Expr> {
    let ast = crate::cfg::parse(cfg)?;
    lower(&ast, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::parse;

    fn render(cfg: &str) -> String {
        let mut warnings = Vec::new();
        let expr = lower(&parse(cfg).unwrap(), &mut warnings).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings for {cfg}");
        let mut b = mason_ast::BlockBuilder::new();
        b.expr(expr);
        let rendered = b.finish().render();
        rendered.trim_end().to_string()
    }

    #[test]
    fn test_target_os_equality() {
        // illumos exercises the cargo-to-meson name translation.
        assert_eq!(
            render("cfg(target_os = \"illumos\")"),
            "host_machine.system() == 'sunos'"
        );
        assert_eq!(
            render("cfg(not(target_os = \"windows\"))"),
            "host_machine.system() != 'windows'"
        );
    }

    #[test]
    fn test_target_os_unknown_warns() {
        let mut warnings = Vec::new();
        let expr = lower(
            &parse("cfg(target_os = \"vxworks\")").unwrap(),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(warnings.len(), 1);
        let mut b = mason_ast::BlockBuilder::new();
        b.expr(expr);
        assert_eq!(
            b.finish().render().trim_end(),
            "host_machine.system() == 'unsupported platform'"
        );
    }

    #[test]
    fn test_target_arch_normalization() {
        assert_eq!(
            render("cfg(target_arch = \"powerpc64\")"),
            "host_machine.cpu_family() == 'ppc64'"
        );
        assert_eq!(
            render("cfg(target_arch = \"powerpc\")"),
            "host_machine.cpu_family() == 'ppc'"
        );
        assert_eq!(
            render("cfg(target_arch = \"armv7\")"),
            "host_machine.cpu_family() == 'arm'"
        );
        assert_eq!(
            render("cfg(target_arch = \"x86_64\")"),
            "host_machine.cpu_family() == 'x86_64'"
        );
    }

    #[test]
    fn test_target_family() {
        assert_eq!(
            render("cfg(target_family = \"windows\")"),
            "host_machine.system() in ['windows']"
        );
        assert_eq!(
            render("cfg(target_family = \"unix\")"),
            "host_machine.system() in ['android', 'cygwin', 'darwin', 'dragonfly', \
             'freebsd', 'gnu', 'linux', 'netbsd', 'openbsd', 'sunos']"
        );
    }

    #[test]
    fn test_bare_unix_ident() {
        assert_eq!(
            render("cfg(unix)"),
            "host_machine.system() in ['android', 'cygwin', 'darwin', 'dragonfly', \
             'freebsd', 'gnu', 'linux', 'netbsd', 'openbsd', 'sunos']"
        );
        assert_eq!(
            render("cfg(not(windows))"),
            "host_machine.system() not in ['windows']"
        );
    }

    #[test]
    fn test_any_all_folding() {
        assert_eq!(
            render("cfg(any(target_os = \"linux\", target_os = \"macos\"))"),
            "host_machine.system() == 'linux' or host_machine.system() == 'darwin'"
        );
        assert_eq!(
            render(
                "cfg(all(not(target_os = \"windows\"), \
                 any(target_arch = \"mips\", target_arch = \"aarch64\")))"
            ),
            "host_machine.system() != 'windows' and \
             (host_machine.cpu_family() == 'mips' or host_machine.cpu_family() == 'aarch64')"
        );
    }

    #[test]
    fn test_unsupported_key() {
        let mut warnings = Vec::new();
        let err = lower(
            &parse("cfg(target_endian = \"little\")").unwrap(),
            &mut warnings,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedCfgKey(key) if key == "target_endian"));
    }
}
