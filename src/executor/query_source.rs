use std::{fmt::Display, future::Future};

use crate::executor::ResultSet;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// the result could not be materialized because column names repeat
    DuplicateFieldNames(Vec<String>),
    /// a row handed to [`ResultSet::from_objects`] is not a JSON object
    InvalidRow(usize),
    /// a row does not have one value per column
    RowWidth { row: usize, expected: usize, got: usize },
    Execution(String),
}

impl SourceError {
    pub fn is_duplicate_field_names(&self) -> bool {
        matches!(self, SourceError::DuplicateFieldNames(_))
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::DuplicateFieldNames(names) =>
                write!(f, "Field names must be unique. Duplicates: {}", names.join(", ")),
            SourceError::InvalidRow(index) =>
                write!(f, "Row {} is not an object", index),
            SourceError::RowWidth { row, expected, got } =>
                write!(f, "Row {} has {} values, expected {}", row, got, expected),
            SourceError::Execution(message) =>
                write!(f, "Query execution failed: {}", message),
        }
    }
}

impl std::error::Error for SourceError {}

/// A relational source that runs SQL and materializes the result.
///
/// Materialization must fail with [`SourceError::DuplicateFieldNames`] when the
/// query yields repeated column names; [`ResultSet::new`] does that check.
pub trait QuerySource {
    fn read_sql(&self, sql: &str) -> impl Future<Output = Result<ResultSet, SourceError>> + Send;
}
