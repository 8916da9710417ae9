use std::{fmt::Display, path::PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFound(PathBuf),
    Unreadable { path: PathBuf, message: String },
    Invalid { path: Option<PathBuf>, message: String },
    InvalidPattern(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) =>
                write!(f, "Config file not found: {}", path.display()),
            ConfigError::Unreadable { path, message } =>
                write!(f, "Could not read config file {}: {}", path.display(), message),
            ConfigError::Invalid { path: Some(path), message } =>
                write!(f, "Config file {} is not valid: {}", path.display(), message),
            ConfigError::Invalid { path: None, message } =>
                write!(f, "Config is not valid: {}", message),
            ConfigError::InvalidPattern(message) =>
                write!(f, "Identifier pattern does not compile: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}
