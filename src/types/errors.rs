use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} cannot be a boolean in defaultConfig")]
    Schema { key: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid config type: {0}")]
    ConfigType(String),

    #[error("{0}")]
    Validation(String),

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
