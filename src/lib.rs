pub mod parser;

pub mod config;
pub use config::{ConfigError, DisambiguatorConfig, IdentifierQuote};

pub mod alias;
pub use alias::{fix_duplicate_columns_in_query, Disambiguator};

pub mod database;
pub use database::ConnectionConfig;

pub mod executor;
pub use executor::{QueryOutcome, QueryRunner, QuerySource, ResultSet, RunnerError, RunnerOptions, SourceError};
