pub mod base_alias;
pub use base_alias::*;

pub mod alias_registry;
pub use alias_registry::*;

pub mod disambiguator;
pub use disambiguator::*;
