use std::io;

pub type Result<T> = std::result::Result<T, SawError>;

#[derive(Debug, thiserror::Error)]
pub enum SawError {
    #[error("invalid action index {0} (expected 0..=6)")]
    InvalidAction(usize),

    #[error("unknown action name '{0}'")]
    UnknownActionName(String),

    #[error("site ({x}, {y}) is outside a {size}x{size} lattice")]
    SiteOutOfBounds { x: usize, y: usize, size: usize },

    #[error("invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    #[error("no environment registered under '{0}'")]
    UnknownEnvironment(String),

    #[error("environment '{0}' is already registered")]
    DuplicateEnvironment(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

impl SawError {
    pub(crate) fn config(param: &str, message: impl Into<String>) -> Self {
        SawError::InvalidConfig {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
