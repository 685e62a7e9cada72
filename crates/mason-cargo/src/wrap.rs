//! Generation of Meson `.wrap` files for convertible Cargo dependencies.
//!
//! Only git dependencies translate into wrap files. A path dependency
//! needs no wrap at all (a directory under `subprojects/` is picked up as
//! is), and a registry dependency would need a WrapDB lookup, which
//! requires network access; both are reported instead.

use crate::error::{ConvertError, Result};
use crate::manifest::{underscore, Dependency, Manifest};
use mason_common::Diagnostic;
use std::fmt::Write as _;
use std::path::Path;

/// A single `subprojects/<name>.wrap` file pointing at a git checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapFile {
    /// Subproject name, dashes already underscored.
    pub name: String,
    pub url: String,
    /// A commit, tag or branch; `head` when the manifest pins nothing.
    pub revision: String,
}

impl WrapFile {
    /// Build a wrap for one dependency, or `None` for path and registry
    /// dependencies (reported through `warnings`).
    pub fn from_dependency(
        name: &str,
        dep: &Dependency,
        warnings: &mut Vec<Diagnostic>,
    ) -> Option<WrapFile> {
        let wrap_name = underscore(name);

        if let Some(detailed) = dep.git() {
            let url = detailed.git.clone()?;
            let revision = detailed
                .rev
                .clone()
                .or_else(|| detailed.tag.clone())
                .or_else(|| detailed.branch.clone())
                .unwrap_or_else(|| "head".to_string());
            return Some(WrapFile {
                name: wrap_name,
                url,
                revision,
            });
        }

        if let Some(path) = dep.path() {
            warnings.push(Diagnostic::warning(format!(
                "dependency {name} is a path dependency; place or link {path} at \
                 subprojects/{wrap_name}, no wrap file is needed"
            )));
            return None;
        }

        warnings.push(Diagnostic::warning(format!(
            "dependency {name} comes from a registry; fetching it would need a \
             WrapDB lookup, create subprojects/{wrap_name}.wrap by hand"
        )));
        None
    }

    pub fn file_name(&self) -> String {
        format!("{}.wrap", self.name)
    }

    /// The INI text of the wrap file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Shallow clones keep subproject checkouts small.
        let _ = writeln!(out, "[wrap-git]");
        let _ = writeln!(out, "directory = {}", self.name);
        let _ = writeln!(out, "url = {}", self.url);
        let _ = writeln!(out, "revision = {}", self.revision);
        let _ = writeln!(out, "depth = 1");
        let _ = writeln!(out);
        let _ = writeln!(out, "[provide]");
        let _ = writeln!(out, "dependency_names = {}", self.name);
        out
    }
}

/// Wraps for every convertible dependency of a manifest, regular and dev,
/// in manifest order and deduplicated by name.
pub fn wraps_for_manifest(manifest: &Manifest, warnings: &mut Vec<Diagnostic>) -> Vec<WrapFile> {
    let mut wraps: Vec<WrapFile> = Vec::new();
    let all = manifest
        .dependencies
        .iter()
        .chain(manifest.dev_dependencies.iter());

    for (name, dep) in all {
        if let Some(wrap) = WrapFile::from_dependency(name, dep, warnings) {
            if !wraps.iter().any(|w| w.name == wrap.name) {
                wraps.push(wrap);
            }
        }
    }
    wraps
}

/// Write the wrap files into `<output>/subprojects/`.
pub fn write_all(wraps: &[WrapFile], output: &Path) -> Result<()> {
    let dir = output.join("subprojects");
    std::fs::create_dir_all(&dir).map_err(|e| ConvertError::io(dir.display().to_string(), e))?;

    for wrap in wraps {
        let path = dir.join(wrap.file_name());
        std::fs::write(&path, wrap.render())
            .map_err(|e| ConvertError::io(path.display().to_string(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;

    fn manifest() -> Manifest {
        Manifest::from_str(
            r#"
[package]
name = "demo"
version = "1.0.0"

[dependencies]
log = "0.4"
fancy = { git = "https://example.com/fancy.git", tag = "v1.2" }
pinned = { git = "https://example.com/pinned.git", rev = "abc123", branch = "main" }
tracking = { git = "https://example.com/tracking.git" }
local-helper = { path = "../local-helper" }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_git_wrap_prefers_rev_over_branch() {
        let mut warnings = Vec::new();
        let wraps = wraps_for_manifest(&manifest(), &mut warnings);

        let pinned = wraps.iter().find(|w| w.name == "pinned").unwrap();
        assert_eq!(pinned.url, "https://example.com/pinned.git");
        assert_eq!(pinned.revision, "abc123");

        let tracking = wraps.iter().find(|w| w.name == "tracking").unwrap();
        assert_eq!(tracking.revision, "head");
    }

    #[test]
    fn test_registry_dependency_warns() {
        let mut warnings = Vec::new();
        let wraps = wraps_for_manifest(&manifest(), &mut warnings);

        assert!(!wraps.iter().any(|w| w.name == "log"));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("log") && w.message.contains("WrapDB")));
    }

    #[test]
    fn test_path_dependency_gets_no_wrap() {
        let mut warnings = Vec::new();
        let wraps = wraps_for_manifest(&manifest(), &mut warnings);

        assert!(!wraps.iter().any(|w| w.name == "local_helper"));
        let note = warnings
            .iter()
            .find(|w| w.message.contains("local-helper"))
            .unwrap();
        assert!(note.message.contains("subprojects/local_helper"));
        assert!(note.message.contains("no wrap file is needed"));
    }

    #[test]
    fn test_render_git_wrap() {
        let wrap = WrapFile {
            name: "fancy".to_string(),
            url: "https://example.com/fancy.git".to_string(),
            revision: "v1.2".to_string(),
        };
        insta::assert_snapshot!(wrap.render(), @r"
        [wrap-git]
        directory = fancy
        url = https://example.com/fancy.git
        revision = v1.2
        depth = 1

        [provide]
        dependency_names = fancy
        ");
    }

    #[test]
    fn test_write_all_creates_subprojects_dir() {
        let dir = tempfile::tempdir().unwrap();
        let wraps = vec![WrapFile {
            name: "fancy".to_string(),
            url: "https://example.com/fancy.git".to_string(),
            revision: "head".to_string(),
        }];
        write_all(&wraps, dir.path()).unwrap();

        let written = dir.path().join("subprojects").join("fancy.wrap");
        let content = std::fs::read_to_string(written).unwrap();
        assert!(content.starts_with("[wrap-git]"));
    }
}
