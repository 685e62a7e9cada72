use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not introspect {interpreter}: {detail}")]
    Introspect { interpreter: String, detail: String },

    #[error("{name} not found")]
    PythonNotFound { name: String },

    #[error("{name} is missing modules: {}", modules.join(", "))]
    MissingModules { name: String, modules: Vec<String> },

    #[error("{0} is not a valid path name")]
    UnknownPath(String),

    #[error("{0} is not a valid variable name")]
    UnknownVariable(String),
}

pub type Result<T> = std::result::Result<T, ToolchainError>;

impl ToolchainError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ToolchainError::Io {
            path: path.into(),
            source,
        }
    }
}
