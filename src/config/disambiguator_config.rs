use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, IdentifierQuote};

/// Settings of a [`Disambiguator`](crate::Disambiguator).
///
/// - `quotes` are the identifier quoting pairs of the target dialect. They are
///   honored when splitting columns and when recognizing qualified references.
/// - `indent` prefixes every rewritten column line.
/// - `respect_existing_aliases` makes `expr AS name` keep `name` as its base alias
///   instead of appending a second `AS` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisambiguatorConfig {
    pub quotes: Vec<IdentifierQuote>,
    pub indent: String,
    pub respect_existing_aliases: bool,
}

impl Default for DisambiguatorConfig {
    fn default() -> Self {
        Self {
            quotes: IdentifierQuote::sql_server(),
            indent: "    ".to_string(),
            respect_existing_aliases: true,
        }
    }
}

impl DisambiguatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sql_server() -> Self {
        Self::default()
    }

    pub fn mysql() -> Self {
        Self::default().with_quotes(IdentifierQuote::mysql())
    }

    pub fn ansi() -> Self {
        Self::default().with_quotes(IdentifierQuote::ansi())
    }

    pub fn with_quotes(mut self, quotes: Vec<IdentifierQuote>) -> Self { self.quotes = quotes; self }
    pub fn with_indent(mut self, indent: &str) -> Self { self.indent = indent.to_string(); self }
    pub fn with_existing_aliases(mut self, respect: bool) -> Self { self.respect_existing_aliases = respect; self }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|err| ConfigError::Invalid { path: None, message: err.to_string() })
    }
}
