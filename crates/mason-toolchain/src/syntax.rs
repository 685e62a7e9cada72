//! Compiler argument-syntax classification and POSIX argument helpers.
//!
//! Build scripts only need to know which flag dialect a compiler speaks,
//! not which exact compiler it is, so the classification collapses the
//! compiler id down to three families.

/// The flag dialect a compiler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentSyntax {
    Gcc,
    Msvc,
    Other,
}

impl ArgumentSyntax {
    /// Classify a compiler id string.
    pub fn from_compiler_id(id: &str) -> ArgumentSyntax {
        match id {
            "gcc" | "clang" | "apple-clang" | "emscripten" | "intel" => ArgumentSyntax::Gcc,
            "msvc" | "clang-cl" | "intel-cl" => ArgumentSyntax::Msvc,
            _ => ArgumentSyntax::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentSyntax::Gcc => "gcc",
            ArgumentSyntax::Msvc => "msvc",
            ArgumentSyntax::Other => "other",
        }
    }
}

/// Arguments shared by every POSIX-compliant compiler. The list is short
/// on purpose, it covers only what the c99 interface specifies.
pub struct PosixArgs;

impl PosixArgs {
    pub fn compile_only() -> Vec<String> {
        vec!["-c".to_string()]
    }

    pub fn preprocess_only() -> Vec<String> {
        vec!["-E".to_string()]
    }

    /// `-I` glues to its path; an empty path means the current directory.
    pub fn include(path: &str) -> Vec<String> {
        let path = if path.is_empty() { "." } else { path };
        vec![format!("-I{path}")]
    }

    pub fn no_optimization() -> Vec<String> {
        vec!["-O0".to_string()]
    }

    pub fn output(target: &str) -> Vec<String> {
        vec!["-o".to_string(), target.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(ArgumentSyntax::from_compiler_id("gcc"), ArgumentSyntax::Gcc);
        assert_eq!(
            ArgumentSyntax::from_compiler_id("apple-clang"),
            ArgumentSyntax::Gcc
        );
        assert_eq!(
            ArgumentSyntax::from_compiler_id("clang-cl"),
            ArgumentSyntax::Msvc
        );
        assert_eq!(ArgumentSyntax::from_compiler_id("msvc"), ArgumentSyntax::Msvc);
        assert_eq!(
            ArgumentSyntax::from_compiler_id("dmd"),
            ArgumentSyntax::Other
        );
        assert_eq!(ArgumentSyntax::from_compiler_id("msvc").as_str(), "msvc");
    }

    #[test]
    fn test_posix_args() {
        assert_eq!(PosixArgs::compile_only(), vec!["-c"]);
        assert_eq!(PosixArgs::include("/usr/include"), vec!["-I/usr/include"]);
        assert_eq!(PosixArgs::include(""), vec!["-I."]);
        assert_eq!(PosixArgs::output("out.o"), vec!["-o", "out.o"]);
    }
}
