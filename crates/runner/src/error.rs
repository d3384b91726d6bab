use thiserror::Error;

/// Errors loading a page description
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors placing a clock into a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error("Clock not found (check id): {0}")]
    ClockNotFound(i64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
