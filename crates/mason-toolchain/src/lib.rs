//! Toolchain helpers that sit next to the build-definition conversion:
//! dub.json generation for D packages, compiler argument-syntax
//! classification, and Python installation discovery.

pub mod dub;
mod error;
pub mod python;
pub mod syntax;

pub use dub::DubFileGenerator;
pub use error::{Result, ToolchainError};
pub use python::{find_installation, PythonInstallation};
pub use syntax::{ArgumentSyntax, PosixArgs};
