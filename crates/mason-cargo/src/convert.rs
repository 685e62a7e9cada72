//! Conversion of a Cargo manifest into a Meson build definition and an
//! options file.
//!
//! Every generated target is marked `build_by_default : false` so that
//! Meson only compiles what a consumer actually references, and libraries
//! always expose their dependency object through a variable called `dep`.
//! Cargo features become yielding boolean options: Cargo has a single
//! feature namespace across a dependency tree, and yielding options are the
//! closest Meson equivalent.

use crate::error::{ConvertError, Result};
use crate::lower;
use crate::manifest::{underscore, CrateType, Manifest};
use mason_ast::{args, Args, Block, BlockBuilder, Expr};
use mason_common::Diagnostic;
use std::path::{Path, PathBuf};

/// Option names Meson reserves for itself; a Cargo feature with one of
/// these names gets a trailing underscore.
const RESERVED_OPTION_NAMES: &[&str] = &[
    "auto_features",
    "backend",
    "bindir",
    "buildtype",
    "datadir",
    "debug",
    "default_library",
    "errorlogs",
    "includedir",
    "infodir",
    "install_umask",
    "layout",
    "libdir",
    "libexecdir",
    "localedir",
    "localstatedir",
    "mandir",
    "optimization",
    "prefix",
    "sbindir",
    "sharedstatedir",
    "stdsplit",
    "strip",
    "sysconfdir",
    "unity",
    "unity_size",
    "warning_level",
    "werror",
    "wrap_mode",
];

const RESERVED_OPTION_PREFIXES: &[&str] = &["b_", "backend_", "c_", "cpp_", "rust_"];

pub fn is_reserved_option_name(name: &str) -> bool {
    RESERVED_OPTION_NAMES.contains(&name)
        || RESERVED_OPTION_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// The result of a conversion: the build definition, the options file, and
/// any warnings collected along the way.
#[derive(Debug)]
pub struct Conversion {
    pub build: Block,
    pub options: Block,
    pub warnings: Vec<Diagnostic>,
}

/// A Cargo feature mapped onto a Meson option.
struct FeatureOption {
    /// The (possibly mangled) Meson option name.
    option: String,
    /// The original Cargo feature name, used in `--cfg feature="..."`.
    feature: String,
    /// Dependencies that must be added when the feature is enabled.
    deps: Vec<String>,
    enabled_by_default: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ExeKind {
    Bin,
    Test,
}

impl ExeKind {
    fn manifest_section(self) -> &'static str {
        match self {
            ExeKind::Bin => "autobins",
            ExeKind::Test => "autotests",
        }
    }
}

pub struct ManifestConverter<'a> {
    manifest: &'a Manifest,
    src_dir: PathBuf,
    warnings: Vec<Diagnostic>,
    features: Vec<FeatureOption>,
}

impl<'a> ManifestConverter<'a> {
    pub fn new(manifest: &'a Manifest, src_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            src_dir: src_dir.into(),
            warnings: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Produce the build definition and options file for the manifest.
    pub fn convert(mut self) -> Result<Conversion> {
        let mut builder = BlockBuilder::new();
        let mut opt_builder = BlockBuilder::new();

        self.collect_features();

        self.emit_project(&mut builder)?;

        // The rust module is needed in enough places that importing it
        // unconditionally is the simpler choice.
        builder.assign("rust", Expr::call("import", args([Expr::str("rust")])));

        self.emit_options(&mut opt_builder)?;

        if !self.manifest.dependencies.is_empty() || !self.manifest.target.is_empty() {
            self.emit_dependencies(&mut builder)?;
        }
        if !self.manifest.dev_dependencies.is_empty() {
            self.emit_dev_dependencies(&mut builder)?;
        }

        self.emit_feature_args(&mut builder)?;

        // Libraries first: binaries link against them.
        self.emit_lib(&mut builder)?;
        self.emit_bins(&mut builder)?;
        self.emit_tests(&mut builder)?;

        Ok(Conversion {
            build: builder.finish(),
            options: opt_builder.finish(),
            warnings: self.warnings,
        })
    }

    /// Map Cargo features onto Meson options. Requirements of the form
    /// `other_crate/feature` cannot be expressed: Meson does not let a
    /// subproject change another subproject's options.
    fn collect_features(&mut self) {
        let default: Vec<&str> = self
            .manifest
            .features
            .get("default")
            .map(|reqs| reqs.iter().map(String::as_str).collect())
            .unwrap_or_default();

        for (name, requirements) in &self.manifest.features {
            if name == "default" {
                continue;
            }

            let option = if is_reserved_option_name(name) {
                format!("{name}_")
            } else {
                name.clone()
            };

            let mut deps = Vec::new();
            for requirement in requirements {
                if let Some((subp, opt)) = requirement.split_once('/') {
                    self.warnings.push(Diagnostic::warning(format!(
                        "crate {} wants to turn on {opt} in {subp}; meson does not allow \
                         subprojects to change another subproject's options, you may need \
                         to pass -D{subp}:{opt}=true to meson configure",
                        self.manifest.package.name
                    )));
                } else if self.manifest.dependencies.contains_key(requirement) {
                    deps.push(requirement.clone());
                }
            }

            self.features.push(FeatureOption {
                option,
                feature: name.clone(),
                deps,
                enabled_by_default: default.contains(&name.as_str()),
            });
        }
    }

    fn emit_project(&mut self, b: &mut BlockBuilder) -> Result<()> {
        let package = &self.manifest.package;

        let mut a = Args::new();
        a.pos(self.manifest.meson_name());
        a.pos(Expr::Array(vec![Expr::str("rust")]));
        a.kw("version", package.version.as_str())?;
        if let Some(license) = &package.license {
            a.kw("license", license.as_str())?;
        }
        if let Some(edition) = &package.edition {
            a.kw(
                "default_options",
                Expr::Array(vec![Expr::str(format!("rust_std={edition}"))]),
            )?;
        }
        b.expr(Expr::call("project", a));
        Ok(())
    }

    /// One boolean option per feature. Cargo features share a single
    /// namespace across the whole tree, hence `yield : true`.
    fn emit_options(&mut self, b: &mut BlockBuilder) -> Result<()> {
        for feature in &self.features {
            let mut a = args([Expr::str(feature.option.as_str())]);
            a.kw("type", "boolean")?;
            a.kw("yield", true)?;
            a.kw("value", feature.enabled_by_default)?;
            b.expr(Expr::call("option", a));
        }
        Ok(())
    }

    /// `rust.subproject('name').get_variable('dep')`, optionally tolerating
    /// a missing subproject by falling back to a disabler.
    fn subproject_dep(b: &BlockBuilder, name: &str, disabler: bool) -> Result<Expr> {
        let mut sub_args = args([Expr::str(underscore(name))]);
        if disabler {
            sub_args.kw("required", false)?;
        }
        let subproject = Expr::method(b.id("rust")?, "subproject", sub_args);

        // The variable is always called `dep`, by our own convention.
        let mut get_args = args([Expr::str("dep")]);
        if disabler {
            get_args.pos(Expr::call("disabler", Args::new()));
        }
        Ok(Expr::method(subproject, "get_variable", get_args))
    }

    /// The `dependencies` array: required dependencies unconditionally,
    /// optional ones guarded by their feature option, platform-specific
    /// ones guarded by the lowered cfg condition.
    fn emit_dependencies(&mut self, b: &mut BlockBuilder) -> Result<()> {
        let mut required = Vec::new();
        for (name, dep) in &self.manifest.dependencies {
            if !dep.is_optional() {
                required.push(Self::subproject_dep(b, name, false)?);
            }
        }
        b.assign("dependencies", Expr::Array(required));

        for feature in &self.features {
            if feature.deps.is_empty() {
                continue;
            }
            let mut body = b.nested();
            let mut deps = Vec::new();
            for name in &feature.deps {
                deps.push(Self::subproject_dep(&body, name, false)?);
            }
            body.plus_assign("dependencies", Expr::Array(deps))?;
            b.if_stmt(
                Expr::call("get_option", args([Expr::str(feature.option.as_str())])),
                body.finish(),
            );
        }

        for (cfg, table) in &self.manifest.target {
            let condition = lower::condition_for(cfg, &mut self.warnings)?;
            let mut body = b.nested();
            let mut deps = Vec::new();
            for (name, dep) in &table.dependencies {
                if !dep.is_optional() {
                    deps.push(Self::subproject_dep(&body, name, false)?);
                }
            }
            body.plus_assign("dependencies", Expr::Array(deps))?;
            b.if_stmt(condition, body.finish());
        }

        Ok(())
    }

    /// Dev-dependencies are needed by tests but must not break the build
    /// when absent, hence `required : false` plus a disabler fallback.
    fn emit_dev_dependencies(&mut self, b: &mut BlockBuilder) -> Result<()> {
        let mut deps = Vec::new();
        for (name, dep) in &self.manifest.dev_dependencies {
            if !dep.is_optional() {
                deps.push(Self::subproject_dep(b, name, true)?);
            }
        }
        b.assign("dev_dependencies", Expr::Array(deps));
        Ok(())
    }

    /// `add_project_arguments` keeps the feature-flag plumbing simple.
    fn emit_feature_args(&mut self, b: &mut BlockBuilder) -> Result<()> {
        for feature in &self.features {
            let mut body = b.nested();
            let mut a = args([Expr::Array(vec![
                Expr::str("--cfg"),
                Expr::str(format!("feature=\"{}\"", feature.feature)),
            ])]);
            a.kw("language", "rust")?;
            body.expr(Expr::call("add_project_arguments", a));
            b.if_stmt(
                Expr::call("get_option", args([Expr::str(feature.option.as_str())])),
                body.finish(),
            );
        }
        Ok(())
    }

    /// The `[lib]` target, if there is one. Cargo allows only a single lib
    /// per manifest, which spares us most of the autodiscovery pain.
    fn emit_lib(&mut self, b: &mut BlockBuilder) -> Result<()> {
        let lib = self.manifest.lib.clone();
        if lib.is_none() && !self.src_dir.join("src").join("lib.rs").exists() {
            return Ok(());
        }
        let lib = lib.unwrap_or_default();

        // The lib name defaults to the package name with dashes replaced.
        let name = lib
            .name
            .clone()
            .map(|n| underscore(&n))
            .unwrap_or_else(|| self.manifest.meson_name());
        let path = lib.path.clone().unwrap_or_else(|| "src/lib.rs".to_string());

        let mut a = args([Expr::str(name), Expr::str(path)]);
        if matches!(lib.crate_type, Some(CrateType::Dylib) | Some(CrateType::Cdylib)) {
            a.kw("target_type", "shared_library")?;
        } else {
            // "lib" and everything else build as static; Meson prefers
            // explicit over implicit here.
            a.kw("target_type", "static_library")?;
        }

        // A bare "lib" crate type means rlib, and we enforce that.
        match lib.crate_type {
            None | Some(CrateType::Lib) => a.kw("rust_crate_type", "rlib")?,
            Some(other) => a.kw("rust_crate_type", other.as_str())?,
        };

        a.kw("version", self.manifest.package.version.as_str())?;

        let edition = lib
            .edition
            .clone()
            .or_else(|| self.manifest.package.edition.clone());
        if let Some(edition) = edition {
            a.kw(
                "override_options",
                Expr::Array(vec![Expr::str(format!("rust_std={edition}"))]),
            )?;
        }

        if b.has_variable("dependencies") {
            a.kw("dependencies", b.id("dependencies")?)?;
        }
        a.kw("build_by_default", false)?;
        b.assign("lib", Expr::call("build_target", a));

        let mut dep_args = Args::new();
        dep_args.kw("link_with", b.id("lib")?)?;
        // Linking with the lib's own dependencies is not always strictly
        // necessary, but it is in some cases.
        if b.has_variable("dependencies") {
            dep_args.kw("dependencies", b.id("dependencies")?)?;
        }
        b.assign("dep", Expr::call("declare_dependency", dep_args));

        if lib.test.unwrap_or(true) {
            Self::rust_test(b, "lib_test", "lib")?;
        }
        Ok(())
    }

    /// `rust.test(name, target)`: Rust keeps unit tests inside the main
    /// sources, so the rust module builds the test executable for us.
    fn rust_test(b: &mut BlockBuilder, test_name: &str, target: &str) -> Result<()> {
        let mut a = args([Expr::str(test_name), b.id(target)?]);
        if b.has_variable("dev_dependencies") {
            a.kw("dependencies", b.id("dev_dependencies")?)?;
        }
        let call = Expr::method(b.id("rust")?, "test", a);
        b.expr(call);
        Ok(())
    }

    /// Binaries, plus a unit-test target for each unless it opted out.
    fn emit_bins(&mut self, b: &mut BlockBuilder) -> Result<()> {
        let created = self.emit_exe_targets(b, ExeKind::Bin)?;

        let no_tests: Vec<String> = self
            .manifest
            .bin
            .iter()
            .filter(|entry| !entry.test.unwrap_or(true))
            .filter_map(|entry| entry.name.as_deref().map(underscore))
            .collect();

        for target in &created {
            if no_tests.contains(target) {
                continue;
            }
            Self::rust_test(b, &format!("{target}_test"), target)?;
        }
        Ok(())
    }

    /// Integration-test executables, each with a plain `test()` wired up.
    /// These are named `_integration_test` to avoid colliding with the
    /// unit tests.
    fn emit_tests(&mut self, b: &mut BlockBuilder) -> Result<()> {
        let created = self.emit_exe_targets(b, ExeKind::Test)?;
        for target in &created {
            let a = args([
                Expr::str(format!("{target}_integration_test")),
                b.id(target)?,
            ]);
            b.expr(Expr::call("test", a));
        }
        Ok(())
    }

    /// Shared discovery and emission for executable targets. Cargo has
    /// both autodiscovery (globbing) and manual sections; manifests can mix
    /// the two. Returns the created target names so callers can attach
    /// tests.
    fn emit_exe_targets(&mut self, b: &mut BlockBuilder, kind: ExeKind) -> Result<Vec<String>> {
        let package = &self.manifest.package;
        let package_edition = package.edition.clone().unwrap_or_else(|| "2015".to_string());
        let manual = match kind {
            ExeKind::Bin => &self.manifest.bin,
            ExeKind::Test => &self.manifest.test,
        };

        let auto_flag = match kind {
            ExeKind::Bin => package.autobins,
            ExeKind::Test => package.autotests,
        };
        let auto = auto_flag.unwrap_or(package_edition == "2018" || manual.is_empty());

        let mut created = Vec::new();

        if auto {
            self.warnings.push(Diagnostic::warning(format!(
                "cargo is using {}, a form of globbing; ninja may not detect that a \
                 reconfigure is needed when the subproject changes, run \
                 `meson setup --reconfigure` manually in that case",
                kind.manifest_section()
            )));

            for source in self.discover_sources(kind)? {
                let stem = source
                    .rsplit('/')
                    .next()
                    .unwrap_or(&source)
                    .trim_end_matches(".rs");
                let mut name = underscore(stem);
                // `test` collides with the builtin function.
                if name == "test" {
                    name = "test_".to_string();
                }
                // Manual entries win; compare with the manual name in its
                // underscored form, since that is how it will be emitted.
                if manual
                    .iter()
                    .any(|entry| entry.name.as_deref().map(underscore).as_deref() == Some(name.as_str()))
                {
                    continue;
                }
                self.make_exe(b, &name, &source, &package_edition, kind)?;
                created.push(name);
            }
        }

        for entry in manual {
            let Some(name) = entry.name.clone() else {
                self.warnings.push(Diagnostic::warning(format!(
                    "skipping a [[{}]] entry without a name",
                    match kind {
                        ExeKind::Bin => "bin",
                        ExeKind::Test => "test",
                    }
                )));
                continue;
            };
            let name = underscore(&name);
            let source = entry.path.clone().unwrap_or_else(|| match kind {
                ExeKind::Bin => format!("src/bin/{name}.rs"),
                ExeKind::Test => format!("tests/{name}.rs"),
            });
            let edition = entry.edition.clone().unwrap_or_else(|| package_edition.clone());
            self.make_exe(b, &name, &source, &edition, kind)?;
            created.push(name);
        }

        Ok(created)
    }

    /// Candidate sources for autodiscovery, relative to the crate root and
    /// sorted for deterministic output.
    fn discover_sources(&self, kind: ExeKind) -> Result<Vec<String>> {
        let mut sources = Vec::new();

        let dir = match kind {
            ExeKind::Bin => {
                if self.src_dir.join("src").join("main.rs").exists() {
                    sources.push("src/main.rs".to_string());
                }
                self.src_dir.join("src").join("bin")
            }
            ExeKind::Test => self.src_dir.join("tests"),
        };

        if dir.is_dir() {
            let mut found = Vec::new();
            let entries = std::fs::read_dir(&dir)
                .map_err(|e| ConvertError::io(dir.display().to_string(), e))?;
            for entry in entries {
                let entry = entry.map_err(|e| ConvertError::io(dir.display().to_string(), e))?;
                let file_name = entry.file_name().to_string_lossy().to_string();
                if file_name.ends_with(".rs") {
                    found.push(file_name);
                }
            }
            found.sort();
            let prefix = match kind {
                ExeKind::Bin => "src/bin",
                ExeKind::Test => "tests",
            };
            sources.extend(found.into_iter().map(|f| format!("{prefix}/{f}")));
        }

        Ok(sources)
    }

    fn make_exe(
        &mut self,
        b: &mut BlockBuilder,
        name: &str,
        source: &str,
        edition: &str,
        kind: ExeKind,
    ) -> Result<()> {
        let mut a = args([Expr::str(name), Expr::str(source)]);
        if b.has_variable("lib") {
            a.kw("link_with", b.id("lib")?)?;
        }
        let deps_var = match kind {
            ExeKind::Bin => "dependencies",
            ExeKind::Test => "dev_dependencies",
        };
        if b.has_variable(deps_var) {
            a.kw("dependencies", b.id(deps_var)?)?;
        }
        a.kw(
            "override_options",
            Expr::Array(vec![Expr::str(format!("rust_std={edition}"))]),
        )?;
        a.kw("build_by_default", false)?;
        b.assign(name, Expr::call("executable", a));
        Ok(())
    }
}

/// Convenience wrapper: read the manifest from `src_dir` and convert it.
pub fn convert_crate(src_dir: &Path) -> Result<Conversion> {
    let manifest = Manifest::from_dir(src_dir)?;
    ManifestConverter::new(&manifest, src_dir).convert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use mason_common::DiagnosticLevel;

    fn convert_str(toml: &str, dir: &Path) -> Conversion {
        let manifest = Manifest::from_str(toml).unwrap();
        ManifestConverter::new(&manifest, dir).convert().unwrap()
    }

    #[test]
    fn test_full_library_conversion() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src").join("lib.rs"), "").unwrap();

        let conversion = convert_str(
            r#"
[package]
name = "demo-crate"
version = "0.2.0"
edition = "2018"
license = "MIT"
autobins = false
autotests = false

[lib]

[dependencies]
log = "0.4"
serde = { version = "1.0", optional = true }

[dev-dependencies]
quickcheck = "0.9"

[features]
default = []
json = ["serde"]

[target.'cfg(windows)'.dependencies]
winapi = "0.3"
"#,
            dir.path(),
        );

        assert!(conversion.warnings.is_empty());
        insta::assert_snapshot!(conversion.build.render(), @r#"
        project('demo_crate', ['rust'], version : '0.2.0', license : 'MIT', default_options : ['rust_std=2018'])
        rust = import('rust')
        dependencies = [
          rust.subproject('log').get_variable('dep'),
        ]
        if get_option('json')
          dependencies += [
            rust.subproject('serde').get_variable('dep'),
          ]
        endif
        if host_machine.system() in ['windows']
          dependencies += [
            rust.subproject('winapi').get_variable('dep'),
          ]
        endif
        dev_dependencies = [
          rust.subproject('quickcheck', required : false).get_variable('dep', disabler()),
        ]
        if get_option('json')
          add_project_arguments(['--cfg', 'feature="json"'], language : 'rust')
        endif
        lib = build_target('demo_crate', 'src/lib.rs', target_type : 'static_library', rust_crate_type : 'rlib', version : '0.2.0', override_options : ['rust_std=2018'], dependencies : dependencies, build_by_default : false)
        dep = declare_dependency(link_with : lib, dependencies : dependencies)
        rust.test('lib_test', lib, dependencies : dev_dependencies)
        "#);

        insta::assert_snapshot!(conversion.options.render(), @r#"
        option('json', type : 'boolean', yield : true, value : false)
        "#);
    }

    #[test]
    fn test_autodiscovery_of_bins_and_tests() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src").join("bin")).unwrap();
        std::fs::create_dir_all(root.join("tests")).unwrap();
        std::fs::write(root.join("src").join("main.rs"), "").unwrap();
        std::fs::write(root.join("src").join("bin").join("extra-tool.rs"), "").unwrap();
        std::fs::write(root.join("src").join("bin").join("test.rs"), "").unwrap();
        std::fs::write(root.join("tests").join("smoke.rs"), "").unwrap();

        let conversion = convert_str(
            r#"
[package]
name = "tools"
version = "0.1.0"
"#,
            root,
        );

        // One globbing warning for bins, one for tests.
        assert_eq!(conversion.warnings.len(), 2);
        assert!(conversion
            .warnings
            .iter()
            .all(|w| w.level == DiagnosticLevel::Warning));

        insta::assert_snapshot!(conversion.build.render(), @r"
        project('tools', ['rust'], version : '0.1.0')
        rust = import('rust')
        main = executable('main', 'src/main.rs', override_options : ['rust_std=2015'], build_by_default : false)
        extra_tool = executable('extra_tool', 'src/bin/extra-tool.rs', override_options : ['rust_std=2015'], build_by_default : false)
        test_ = executable('test_', 'src/bin/test.rs', override_options : ['rust_std=2015'], build_by_default : false)
        rust.test('main_test', main)
        rust.test('extra_tool_test', extra_tool)
        rust.test('test__test', test_)
        smoke = executable('smoke', 'tests/smoke.rs', override_options : ['rust_std=2015'], build_by_default : false)
        test('smoke_integration_test', smoke)
        ");
    }

    #[test]
    fn test_manual_entry_suppresses_autodiscovered_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src").join("bin")).unwrap();
        std::fs::write(root.join("src").join("bin").join("extra-tool.rs"), "").unwrap();

        // The dashed manual name and the autodiscovered file refer to the
        // same target; it must only be emitted once.
        let conversion = convert_str(
            r#"
[package]
name = "tools"
version = "0.1.0"
autobins = true
autotests = false

[[bin]]
name = "extra-tool"
path = "src/bin/extra-tool.rs"
"#,
            root,
        );

        let build = conversion.build.render();
        assert_eq!(build.matches("executable('extra_tool'").count(), 1);
        assert_eq!(build.matches("rust.test('extra_tool_test'").count(), 1);
    }

    #[test]
    fn test_manual_bins_and_test_opt_out() {
        let dir = tempfile::tempdir().unwrap();

        let conversion = convert_str(
            r#"
[package]
name = "cli"
version = "1.0.0"
autobins = false
autotests = false

[[bin]]
name = "cli"
path = "src/cli.rs"

[[bin]]
name = "helper"
path = "src/helper.rs"
test = false
"#,
            dir.path(),
        );

        assert!(conversion.warnings.is_empty());
        insta::assert_snapshot!(conversion.build.render(), @r"
        project('cli', ['rust'], version : '1.0.0')
        rust = import('rust')
        cli = executable('cli', 'src/cli.rs', override_options : ['rust_std=2015'], build_by_default : false)
        helper = executable('helper', 'src/helper.rs', override_options : ['rust_std=2015'], build_by_default : false)
        rust.test('cli_test', cli)
        ");
    }

    #[test]
    fn test_reserved_feature_name_is_mangled() {
        let dir = tempfile::tempdir().unwrap();

        let conversion = convert_str(
            r#"
[package]
name = "demo"
version = "1.0.0"
autobins = false
autotests = false

[features]
default = ["debug"]
debug = []
"#,
            dir.path(),
        );

        insta::assert_snapshot!(conversion.options.render(), @r#"
        option('debug_', type : 'boolean', yield : true, value : true)
        "#);

        // The rustc flag still carries the original feature name.
        let build = conversion.build.render();
        assert!(build.contains("get_option('debug_')"));
        assert!(build.contains("'feature=\"debug\"'"));
    }

    #[test]
    fn test_cross_crate_feature_requirement_warns() {
        let dir = tempfile::tempdir().unwrap();

        let conversion = convert_str(
            r#"
[package]
name = "demo"
version = "1.0.0"
autobins = false
autotests = false

[dependencies]
serde = "1.0"

[features]
fancy = ["serde/derive"]
"#,
            dir.path(),
        );

        assert_eq!(conversion.warnings.len(), 1);
        assert!(conversion.warnings[0]
            .message
            .contains("-Dserde:derive=true"));
    }

    #[test]
    fn test_is_reserved_option_name() {
        assert!(is_reserved_option_name("debug"));
        assert!(is_reserved_option_name("default_library"));
        assert!(is_reserved_option_name("b_lto"));
        assert!(is_reserved_option_name("rust_std"));
        assert!(!is_reserved_option_name("serde"));
    }
}
