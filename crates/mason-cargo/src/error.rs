//! Error types for the Cargo frontend.

use crate::cfg::CfgError;
use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// Failed to read the manifest or scan the source tree.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The manifest is not valid TOML (or not a valid manifest shape).
    #[error("failed to parse Cargo.toml: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Manifests with build scripts cannot be converted mechanically.
    #[error("package {0} uses a build script; write a meson.build by hand")]
    BuildScript(String),

    /// A version requirement in a syntax we do not translate.
    #[error("unsupported version requirement: {0:?}")]
    VersionReq(String),

    /// A `cfg()` expression failed to lex or parse.
    #[error(transparent)]
    Cfg(#[from] CfgError),

    /// A `cfg()` key with no Meson equivalent.
    #[error("cannot express cfg key {0:?} as a Meson condition")]
    UnsupportedCfgKey(String),

    /// AST construction failure; indicates a bug in the converter.
    #[error("build definition construction failed: {0}")]
    Ast(#[from] mason_ast::AstError),
}

impl ConvertError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
