pub mod query_source;
pub use query_source::*;

pub mod result_set;
pub use result_set::*;

pub mod report;
pub use report::*;

pub mod query_runner;
pub use query_runner::*;
