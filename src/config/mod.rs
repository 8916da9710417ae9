pub mod identifier_quote;
pub use identifier_quote::*;

pub mod disambiguator_config;
pub use disambiguator_config::*;

pub mod config_error;
pub use config_error::*;
