//! Generation of `dub.json` package files for D projects.
//!
//! An existing `dub.json` is merged rather than replaced, so hand-written
//! fields survive regeneration. Output is 4-space-indented JSON, matching
//! what dub itself writes.

use crate::error::{Result, ToolchainError};
use indexmap::IndexMap;
use mason_common::Diagnostic;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Fields dub requires before a package can be published.
const PUBLISHING_FIELDS: &[&str] = &["description", "license"];

#[derive(Debug)]
pub struct DubFileGenerator {
    name: String,
    dir: PathBuf,
    description: Option<String>,
    license: Option<String>,
    dependencies: IndexMap<String, String>,
    /// Any other top-level fields to set, verbatim.
    extra: IndexMap<String, Value>,
}

impl DubFileGenerator {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            description: None,
            license: None,
            dependencies: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// A dependency with its version requirement; an empty requirement
    /// means "any version".
    pub fn dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Write `dub.json`, merging an existing file when one is present.
    /// Warnings (unreadable existing file, missing publishing fields) are
    /// appended to `warnings`.
    pub fn generate(&self, warnings: &mut Vec<Diagnostic>) -> Result<PathBuf> {
        let config_path = self.dir.join("dub.json");

        let mut config = self.load_existing(&config_path, warnings)?;
        config.insert("name".to_string(), Value::String(self.name.clone()));

        for field in PUBLISHING_FIELDS {
            let provided = match *field {
                "description" => self.description.is_some(),
                _ => self.license.is_some(),
            };
            if !provided && !config.contains_key(*field) {
                warnings.push(Diagnostic::warning(format!(
                    "without {field} the DUB package can't be published"
                )));
            }
        }

        if let Some(description) = &self.description {
            config.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        if let Some(license) = &self.license {
            config.insert("license".to_string(), Value::String(license.clone()));
        }
        for (key, value) in &self.extra {
            config.insert(key.clone(), value.clone());
        }

        if !self.dependencies.is_empty() {
            let mut deps = Map::new();
            for (name, version) in &self.dependencies {
                deps.insert(name.clone(), Value::String(version.clone()));
            }
            config.insert("dependencies".to_string(), Value::Object(deps));
        }

        let rendered = render_json(&Value::Object(config))?;
        std::fs::write(&config_path, rendered)
            .map_err(|e| ToolchainError::io(config_path.display().to_string(), e))?;
        Ok(config_path)
    }

    fn load_existing(&self, path: &Path, warnings: &mut Vec<Diagnostic>) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ToolchainError::io(path.display().to_string(), e))?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warnings.push(Diagnostic::warning("failed to load the data in dub.json"));
                Ok(Map::new())
            }
        }
    }
}

/// 4-space-indented JSON with a trailing newline.
fn render_json(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(value, &mut serializer)?;
    out.push(b'\n');
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut warnings = Vec::new();

        let path = DubFileGenerator::new("mypkg", dir.path())
            .description("A test package")
            .license("MIT")
            .dependency("vibe-d", ">=0.8.0")
            .generate(&mut warnings)
            .unwrap();

        assert!(warnings.is_empty());
        let written = std::fs::read_to_string(path).unwrap();
        insta::assert_snapshot!(written, @r#"
        {
            "name": "mypkg",
            "description": "A test package",
            "license": "MIT",
            "dependencies": {
                "vibe-d": ">=0.8.0"
            }
        }
        "#);
    }

    #[test]
    fn test_missing_publishing_fields_warn() {
        let dir = tempfile::tempdir().unwrap();
        let mut warnings = Vec::new();

        DubFileGenerator::new("mypkg", dir.path())
            .generate(&mut warnings)
            .unwrap();

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("description"));
        assert!(warnings[1].message.contains("license"));
    }

    #[test]
    fn test_existing_file_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dub.json"),
            r#"{"name": "oldname", "description": "kept", "targetType": "library"}"#,
        )
        .unwrap();

        let mut warnings = Vec::new();
        let path = DubFileGenerator::new("newname", dir.path())
            .license("BSL-1.0")
            .generate(&mut warnings)
            .unwrap();

        assert!(warnings.is_empty());
        let config: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(config["name"], "newname");
        assert_eq!(config["description"], "kept");
        assert_eq!(config["targetType"], "library");
        assert_eq!(config["license"], "BSL-1.0");
    }

    #[test]
    fn test_corrupt_existing_file_warns_and_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dub.json"), "{not json").unwrap();

        let mut warnings = Vec::new();
        DubFileGenerator::new("mypkg", dir.path())
            .description("d")
            .license("MIT")
            .generate(&mut warnings)
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("failed to load"));
    }
}
