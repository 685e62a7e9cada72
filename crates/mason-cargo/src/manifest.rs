//! Typed model of a `Cargo.toml` manifest.
//!
//! Only the tables the converter consumes are modeled. Dependency maps use
//! `IndexMap` so the generated build definition lists subprojects in
//! manifest order.

use crate::error::{ConvertError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// A parsed manifest file.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub package: Package,

    /// The single `[lib]` section, if any. Cargo allows at most one.
    pub lib: Option<TargetEntry>,

    /// `[[bin]]` sections.
    #[serde(default)]
    pub bin: Vec<TargetEntry>,

    /// `[[test]]` sections (integration tests).
    #[serde(default)]
    pub test: Vec<TargetEntry>,

    /// Feature name to its requirement list.
    #[serde(default)]
    pub features: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub dependencies: IndexMap<String, Dependency>,

    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: IndexMap<String, Dependency>,

    /// `[target.'cfg(...)'.dependencies]` tables, keyed by the cfg string.
    #[serde(default)]
    pub target: IndexMap<String, TargetDependencies>,
}

/// The `[package]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Package {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub edition: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub license_file: Option<String>,
    /// A system library this package links against.
    pub links: Option<String>,
    /// Build script path. Its presence makes the manifest unconvertible.
    pub build: Option<String>,
    pub autobins: Option<bool>,
    pub autotests: Option<bool>,
}

/// A dependency: either a bare version string or a detailed table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Simple(String),
    Detailed(DetailedDependency),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DetailedDependency {
    pub version: Option<String>,

    /// Git source.
    pub git: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub rev: Option<String>,

    /// Local path source.
    pub path: Option<String>,

    #[serde(default)]
    pub optional: bool,

    /// Rename of the upstream package.
    pub package: Option<String>,

    pub default_features: Option<bool>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Dependencies declared under a `[target.'cfg(...)']` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetDependencies {
    #[serde(default)]
    pub dependencies: IndexMap<String, Dependency>,
}

/// A `[lib]`, `[[bin]]` or `[[test]]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetEntry {
    pub name: Option<String>,
    pub path: Option<String>,
    /// Whether a unit-test target is generated (default true).
    pub test: Option<bool>,
    pub bench: Option<bool>,
    pub harness: Option<bool>,
    pub proc_macro: Option<bool>,
    pub edition: Option<String>,
    pub crate_type: Option<CrateType>,
    #[serde(default)]
    pub required_features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrateType {
    Bin,
    Lib,
    Dylib,
    Staticlib,
    Cdylib,
    Rlib,
    ProcMacro,
}

impl Manifest {
    /// Parse a manifest and reject the shapes we cannot convert.
    pub fn from_str(content: &str) -> Result<Manifest> {
        let manifest: Manifest = toml::from_str(content)?;
        if manifest.package.build.is_some() {
            return Err(ConvertError::BuildScript(manifest.package.name));
        }
        Ok(manifest)
    }

    /// Read `Cargo.toml` from a crate directory.
    pub fn from_dir(dir: &Path) -> Result<Manifest> {
        let path = dir.join("Cargo.toml");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConvertError::io(path.display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// The package name with dashes replaced, as used for Meson targets and
    /// subproject names.
    pub fn meson_name(&self) -> String {
        underscore(&self.package.name)
    }
}

impl Dependency {
    pub fn is_optional(&self) -> bool {
        match self {
            Dependency::Simple(_) => false,
            Dependency::Detailed(d) => d.optional,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Dependency::Simple(v) => Some(v),
            Dependency::Detailed(d) => d.version.as_deref(),
        }
    }

    pub fn git(&self) -> Option<&DetailedDependency> {
        match self {
            Dependency::Detailed(d) if d.git.is_some() => Some(d),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Dependency::Detailed(d) => d.path.as_deref(),
            Dependency::Simple(_) => None,
        }
    }
}

impl CrateType {
    pub fn as_str(self) -> &'static str {
        match self {
            CrateType::Bin => "bin",
            CrateType::Lib => "lib",
            CrateType::Dylib => "dylib",
            CrateType::Staticlib => "staticlib",
            CrateType::Cdylib => "cdylib",
            CrateType::Rlib => "rlib",
            CrateType::ProcMacro => "proc-macro",
        }
    }
}

/// Cargo names allow dashes; Meson/rustc target names do not.
pub fn underscore(name: &str) -> String {
    name.replace('-', "_")
}
