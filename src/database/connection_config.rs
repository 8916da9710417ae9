use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ConfigError;

pub const DEFAULT_ODBC_DRIVER: &str = "ODBC Driver 17 for SQL Server";

fn default_driver() -> String {
    DEFAULT_ODBC_DRIVER.to_string()
}

/// Connection settings of a SQL Server database, usually read from a
/// `config.json` file:
///
/// ```json
/// { "server": "localhost", "database": "Accounting", "username": "sa", "password": "secret" }
/// ```
///
/// - without both `username` and `password` the connection string asks for a
///   trusted (integrated) connection.
/// - `driver` defaults to [`DEFAULT_ODBC_DRIVER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub server: String,
    pub database: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_driver")]
    pub driver: String,
}

impl ConnectionConfig {
    pub fn new(server: &str, database: &str) -> Self {
        Self {
            server: server.to_string(),
            database: database.to_string(),
            username: None,
            password: None,
            driver: default_driver(),
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn with_driver(mut self, driver: &str) -> Self {
        self.driver = driver.to_string();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|err| ConfigError::Invalid { path: None, message: err.to_string() })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|err| ConfigError::Unreadable { path: path.to_path_buf(), message: err.to_string() })?;

        let config = serde_json::from_str::<ConnectionConfig>(&content)
            .map_err(|err| ConfigError::Invalid { path: Some(path.to_path_buf()), message: err.to_string() })?;

        info!(server = %config.server, database = %config.database, "loaded connection config from {}", path.display());
        Ok(config)
    }

    /// Credentials used for SQL authentication; blank values count as missing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() =>
                Some((username, password)),
            _ => None,
        }
    }

    pub fn uses_trusted_connection(&self) -> bool {
        self.credentials().is_none()
    }

    pub fn odbc_connection_string(&self) -> String {
        let mut parts = vec![
            format!("DRIVER={{{}}}", self.driver),
            format!("SERVER={}", Self::odbc_value(&self.server)),
            format!("DATABASE={}", Self::odbc_value(&self.database)),
        ];

        match self.credentials() {
            Some((username, password)) => {
                parts.push(format!("UID={}", Self::odbc_value(username)));
                parts.push(format!("PWD={}", Self::odbc_value(password)));
            },
            None => parts.push("Trusted_Connection=yes".to_string()),
        }
        parts.push("TrustServerCertificate=yes".to_string());

        parts.iter().map(|part| format!("{};", part)).collect()
    }

    /// Values holding `;`, `{` or `}` or surrounding spaces are wrapped in braces,
    /// with `}` doubled.
    fn odbc_value(value: &str) -> String {
        let needs_braces = value.contains([';', '{', '}']) || value.trim() != value;
        match needs_braces {
            true => format!("{{{}}}", value.replace('}', "}}")),
            false => value.to_string(),
        }
    }
}

/// Redacts the password so the config can be logged.
impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.credentials() {
            Some((username, _)) => write!(f, "{}/{} as {}", self.server, self.database, username),
            None => write!(f, "{}/{} (trusted)", self.server, self.database),
        }
    }
}
