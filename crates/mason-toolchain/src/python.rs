//! Python installation discovery and introspection.
//!
//! Finding "a python" is name resolution (python3/python2/python), a
//! version check, and import checks for required modules. The first
//! interpreter that passes all three is introspected with a sysconfig dump
//! so callers can ask for paths and config variables without spawning it
//! again.

use crate::error::{Result, ToolchainError};
use indexmap::IndexMap;
use mason_common::Diagnostic;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Dumps everything we ever ask an interpreter about, in one invocation.
const INTROSPECT_SCRIPT: &str = r#"import sysconfig
import json
import sys

install_paths = sysconfig.get_paths(scheme='posix_prefix', vars={'base': '', 'platbase': '', 'installed_base': ''})

print(json.dumps({
  'variables': sysconfig.get_config_vars(),
  'paths': sysconfig.get_paths(),
  'install_paths': install_paths,
  'version': sysconfig.get_python_version(),
  'platform': sysconfig.get_platform(),
  'is_pypy': '__pypy__' in sys.builtin_module_names,
}))
"#;

/// The parsed sysconfig dump.
#[derive(Debug, Clone, Deserialize)]
pub struct PythonIntrospection {
    pub variables: IndexMap<String, Value>,
    pub paths: IndexMap<String, String>,
    pub install_paths: IndexMap<String, String>,
    pub version: String,
    pub platform: String,
    pub is_pypy: bool,
}

/// A found and introspected interpreter.
#[derive(Debug, Clone)]
pub struct PythonInstallation {
    pub command: PathBuf,
    pub info: PythonIntrospection,
}

impl PythonInstallation {
    pub fn language_version(&self) -> &str {
        &self.info.version
    }

    pub fn has_path(&self, name: &str) -> bool {
        self.info.paths.contains_key(name)
    }

    pub fn get_path(&self, name: &str) -> Result<&str> {
        self.info
            .paths
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ToolchainError::UnknownPath(name.to_string()))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.info.variables.contains_key(name)
    }

    pub fn get_variable(&self, name: &str) -> Result<&Value> {
        self.info
            .variables
            .get(name)
            .ok_or_else(|| ToolchainError::UnknownVariable(name.to_string()))
    }

    /// Install dir for platform-specific modules under `prefix`.
    pub fn platlib_install_path(&self, prefix: &Path) -> Result<PathBuf> {
        self.install_path(prefix, "platlib")
    }

    /// Install dir for pure-python modules under `prefix`.
    pub fn purelib_install_path(&self, prefix: &Path) -> Result<PathBuf> {
        self.install_path(prefix, "purelib")
    }

    fn install_path(&self, prefix: &Path, name: &str) -> Result<PathBuf> {
        let relative = self
            .info
            .install_paths
            .get(name)
            .ok_or_else(|| ToolchainError::UnknownPath(name.to_string()))?;
        // install_paths are introspected with an empty base, so they come
        // back absolute-looking and must be re-rooted.
        Ok(prefix.join(relative.trim_start_matches('/')))
    }
}

/// The canonical interpreter name for a user-supplied one, plus the version
/// bound that name implies.
fn resolve_name(requested: Option<&str>) -> (&'static str, Option<&'static str>) {
    match requested {
        Some(name) if name.contains("python2") => ("python2", Some("< 3.0")),
        Some(name) if name.contains("python3") => ("python3", Some(">= 3.0")),
        Some(_) => ("python", None),
        None => ("python3", None),
    }
}

/// Find an interpreter matching `version` constraints that can import all
/// of `modules`. Candidates are tried in order and failures are reported
/// through `warnings`; only a fully matching interpreter is introspected.
pub fn find_installation(
    requested: Option<&str>,
    version: &[String],
    modules: &[String],
    warnings: &mut Vec<Diagnostic>,
) -> Result<PythonInstallation> {
    let (name, implied) = resolve_name(requested);

    let mut constraints: Vec<String> = version.to_vec();
    if let Some(implied) = implied {
        constraints.push(implied.to_string());
    }

    let mut candidates: Vec<String> = Vec::new();
    if let Some(requested) = requested {
        candidates.push(requested.to_string());
    }
    for fallback in ["python3", "python2", "python"] {
        if !candidates.iter().any(|c| c == fallback) {
            candidates.push(fallback.to_string());
        }
    }

    let mut last_missing: Vec<String> = Vec::new();
    for candidate in &candidates {
        match check_python(candidate, &constraints, modules) {
            CandidateCheck::Ok => {
                return introspect(candidate);
            }
            CandidateCheck::MissingModules(missing) => {
                warnings.push(Diagnostic::warning(format!(
                    "program {candidate} is missing modules: {}",
                    missing.join(", ")
                )));
                last_missing = missing;
            }
            CandidateCheck::NotUsable => {}
        }
    }

    if last_missing.is_empty() {
        Err(ToolchainError::PythonNotFound {
            name: name.to_string(),
        })
    } else {
        Err(ToolchainError::MissingModules {
            name: name.to_string(),
            modules: last_missing,
        })
    }
}

enum CandidateCheck {
    Ok,
    MissingModules(Vec<String>),
    /// Not on PATH, not runnable, or the wrong version.
    NotUsable,
}

fn check_python(candidate: &str, constraints: &[String], modules: &[String]) -> CandidateCheck {
    let output = match Command::new(candidate).arg("--version").output() {
        Ok(output) if output.status.success() => output,
        _ => return CandidateCheck::NotUsable,
    };

    // `python2 --version` writes to stderr.
    let mut raw = String::from_utf8_lossy(&output.stdout).into_owned();
    if raw.trim().is_empty() {
        raw = String::from_utf8_lossy(&output.stderr).into_owned();
    }
    let found = raw.trim().trim_start_matches("Python ").to_string();
    if !version_compare_many(&found, constraints) {
        return CandidateCheck::NotUsable;
    }

    let mut missing = Vec::new();
    for module in modules {
        let check = Command::new(candidate)
            .args(["-c", &format!("import {module}")])
            .output();
        match check {
            Ok(output) if output.status.success() => {}
            _ => missing.push(module.clone()),
        }
    }
    if missing.is_empty() {
        CandidateCheck::Ok
    } else {
        CandidateCheck::MissingModules(missing)
    }
}

fn introspect(candidate: &str) -> Result<PythonInstallation> {
    let output = Command::new(candidate)
        .args(["-c", INTROSPECT_SCRIPT])
        .output()
        .map_err(|e| ToolchainError::Spawn {
            program: candidate.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ToolchainError::Introspect {
            interpreter: candidate.to_string(),
            detail: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let info: PythonIntrospection = serde_json::from_slice(&output.stdout)?;
    Ok(PythonInstallation {
        command: PathBuf::from(candidate),
        info,
    })
}

/// `found` satisfies every constraint in `constraints`. Constraints use the
/// same strings the version translation emits: `>= 3.0`, `< 3.0`, `== 3.7`.
pub fn version_compare_many(found: &str, constraints: &[String]) -> bool {
    constraints.iter().all(|c| version_compare(found, c))
}

fn version_compare(found: &str, constraint: &str) -> bool {
    let constraint = constraint.trim();
    let (op, wanted) = if let Some(rest) = constraint.strip_prefix(">=") {
        (">=", rest)
    } else if let Some(rest) = constraint.strip_prefix("<=") {
        ("<=", rest)
    } else if let Some(rest) = constraint.strip_prefix("==") {
        ("==", rest)
    } else if let Some(rest) = constraint.strip_prefix("!=") {
        ("!=", rest)
    } else if let Some(rest) = constraint.strip_prefix('>') {
        (">", rest)
    } else if let Some(rest) = constraint.strip_prefix('<') {
        ("<", rest)
    } else {
        ("==", constraint)
    };

    let ordering = compare_versions(found, wanted.trim());
    match op {
        ">=" => ordering.is_ge(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        "<" => ordering.is_lt(),
        "!=" => ordering.is_ne(),
        _ => ordering.is_eq(),
    }
}

/// Compare dotted numeric versions component by component; a missing
/// component counts as zero, non-numeric tails compare as zero.
fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    let parse = |s: &str| -> Vec<u64> {
        s.split('.')
            .map(|part| {
                part.chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
                    .parse()
                    .unwrap_or(0)
            })
            .collect()
    };
    let a = parse(a);
    let b = parse(b);
    let len = a.len().max(b.len());
    for i in 0..len {
        let av = a.get(i).copied().unwrap_or(0);
        let bv = b.get(i).copied().unwrap_or(0);
        match av.cmp(&bv) {
            std::cmp::Ordering::Equal => {}
            other => return other,
        }
    }
    std::cmp::Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installation() -> PythonInstallation {
        let info: PythonIntrospection = serde_json::from_str(
            r#"{
                "variables": {"EXT_SUFFIX": ".cpython-311-x86_64-linux-gnu.so", "LIBDIR": "/usr/lib"},
                "paths": {"stdlib": "/usr/lib/python3.11", "purelib": "/usr/lib/python3.11/site-packages"},
                "install_paths": {"platlib": "/lib/python3.11/site-packages", "purelib": "/lib/python3.11/site-packages"},
                "version": "3.11",
                "platform": "linux-x86_64",
                "is_pypy": false
            }"#,
        )
        .unwrap();
        PythonInstallation {
            command: PathBuf::from("python3"),
            info,
        }
    }

    #[test]
    fn test_paths_and_variables() {
        let python = installation();
        assert_eq!(python.language_version(), "3.11");
        assert!(python.has_path("stdlib"));
        assert_eq!(python.get_path("stdlib").unwrap(), "/usr/lib/python3.11");
        assert!(matches!(
            python.get_path("nope").unwrap_err(),
            ToolchainError::UnknownPath(name) if name == "nope"
        ));

        assert!(python.has_variable("LIBDIR"));
        assert_eq!(
            python.get_variable("LIBDIR").unwrap(),
            &Value::String("/usr/lib".to_string())
        );
        assert!(python.get_variable("MISSING").is_err());
    }

    #[test]
    fn test_install_paths_are_rerooted() {
        let python = installation();
        assert_eq!(
            python.platlib_install_path(Path::new("/usr/local")).unwrap(),
            PathBuf::from("/usr/local/lib/python3.11/site-packages")
        );
    }

    #[test]
    fn test_resolve_name() {
        assert_eq!(resolve_name(None), ("python3", None));
        assert_eq!(resolve_name(Some("python3")), ("python3", Some(">= 3.0")));
        assert_eq!(
            resolve_name(Some("/opt/python2.7/bin/python2")),
            ("python2", Some("< 3.0"))
        );
        assert_eq!(resolve_name(Some("pypy")), ("python", None));
    }

    #[test]
    fn test_version_compare() {
        assert!(version_compare("3.11.2", ">= 3.0"));
        assert!(!version_compare("2.7.18", ">= 3.0"));
        assert!(version_compare("2.7.18", "< 3.0"));
        assert!(version_compare("3.7", "== 3.7"));
        assert!(version_compare("3.7", "3.7"));
        assert!(!version_compare("3.7.1", "== 3.7"));
        assert!(version_compare("3.10", "> 3.9"));
    }

    #[test]
    fn test_version_compare_many() {
        let constraints = vec![">= 3.0".to_string(), "< 4".to_string()];
        assert!(version_compare_many("3.11", &constraints));
        assert!(!version_compare_many("2.7", &constraints));
        assert!(version_compare_many("3.11", &[]));
    }
}
