//! The Cargo frontend: everything needed to turn a `Cargo.toml` into a
//! Meson build definition.
//!
//! - [`manifest`]: typed model of the manifest file.
//! - [`version`]: Cargo version requirements to Meson version constraints.
//! - [`cfg`]: lexer and parser for `cfg()` expressions.
//! - [`lower`]: `cfg()` ASTs to Meson conditions.
//! - [`convert`]: the manifest converter itself.
//! - [`wrap`]: `.wrap` files for git dependencies.

pub mod manifest;
pub mod version;
pub mod cfg;
pub mod lower;
pub mod convert;
pub mod wrap;

mod error;

pub use convert::{Conversion, ManifestConverter};
pub use error::{ConvertError, Result};
pub use manifest::Manifest;
