use std::{fmt::Display, path::PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    alias::Disambiguator,
    executor::{export_file_name, render_preview, QuerySource, ResultSet, SourceError},
};

/// How a [`QueryRunner`] previews and exports results.
///
/// `output_directory` is only touched when `export_csv` is set; it is created
/// on the first export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerOptions {
    /// rows shown in the preview
    pub preview_rows: usize,
    /// preview the last rows instead of the first ones
    pub display_tail: bool,
    pub show_preview: bool,
    /// retry once with aliased columns when field names repeat
    pub auto_fix_duplicates: bool,
    pub export_csv: bool,
    pub output_directory: PathBuf,
    /// preview cells longer than this are truncated
    pub cell_width: usize,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            display_tail: false,
            show_preview: true,
            auto_fix_duplicates: true,
            export_csv: false,
            output_directory: PathBuf::from("reports"),
            cell_width: 30,
        }
    }
}

impl RunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self { self.preview_rows = rows; self }
    pub fn with_tail(mut self, tail: bool) -> Self { self.display_tail = tail; self }
    pub fn with_preview(mut self, show: bool) -> Self { self.show_preview = show; self }
    pub fn with_auto_fix(mut self, auto_fix: bool) -> Self { self.auto_fix_duplicates = auto_fix; self }

    pub fn with_csv_export(mut self, output_directory: impl Into<PathBuf>) -> Self {
        self.export_csv = true;
        self.output_directory = output_directory.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// 1-based position of the query in its batch
    pub index: usize,
    /// the SQL that produced `result`, rewritten when `rewritten` is set
    pub sql: String,
    pub rewritten: bool,
    pub result: ResultSet,
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunnerError {
    Source(SourceError),
    Export { path: PathBuf, message: String },
}

impl From<SourceError> for RunnerError {
    fn from(error: SourceError) -> Self {
        RunnerError::Source(error)
    }
}

impl Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerError::Source(error) => write!(f, "{}", error),
            RunnerError::Export { path, message } =>
                write!(f, "Could not export to {}: {}", path.display(), message),
        }
    }
}

impl std::error::Error for RunnerError {}

/// Runs queries against a [`QuerySource`], working around duplicate column
/// names by rewriting the query once.
#[derive(Debug, Clone)]
pub struct QueryRunner {
    options: RunnerOptions,
    disambiguator: Disambiguator,
}

impl Default for QueryRunner {
    fn default() -> Self {
        Self::new(RunnerOptions::default())
    }
}

impl QueryRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self {
            options,
            disambiguator: Disambiguator::shared().clone(),
        }
    }

    pub fn with_disambiguator(mut self, disambiguator: Disambiguator) -> Self {
        self.disambiguator = disambiguator;
        self
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Runs a single query.
    ///
    /// When the source reports duplicate field names and `auto_fix_duplicates` is
    /// set, the query is rewritten with unique aliases and executed one more
    /// time. A second failure is returned as is. If the query cannot be
    /// rewritten the original error is returned without a retry.
    pub async fn run_query<S: QuerySource>(&self, source: &S, index: usize, sql: &str) -> Result<QueryOutcome, RunnerError> {
        info!(query = index, "executing query {}:\n{}", index, sql);

        let (sql, rewritten, result) = match source.read_sql(sql).await {
            Ok(result) => (sql.to_string(), false, result),
            Err(error) if error.is_duplicate_field_names() && self.options.auto_fix_duplicates => {
                warn!(query = index, %error, "duplicate columns found, fixing query");
                let fixed = self.disambiguator.fix_duplicate_columns(sql);
                if fixed == sql {
                    return Err(error.into());
                }

                let result = source.read_sql(&fixed).await?;
                (fixed, true, result)
            },
            Err(error) => return Err(error.into()),
        };

        if self.options.show_preview {
            let position = if self.options.display_tail { "last" } else { "top" };
            info!(
                query = index,
                "preview of query {} result ({} {} rows):\n{}",
                index,
                position,
                self.options.preview_rows,
                render_preview(&result, self.options.preview_rows, self.options.display_tail, self.options.cell_width),
            );
        }
        info!(query = index, records = result.len(), "query {} returned {} records", index, result.len());

        let csv_path = match self.options.export_csv {
            true => Some(self.export_csv(index, &result).await?),
            false => None,
        };

        Ok(QueryOutcome { index, sql, rewritten, result, csv_path })
    }

    /// Runs every query in order. A failing query is logged and reported in its
    /// slot without stopping the ones after it.
    pub async fn run_queries<S, Q>(&self, source: &S, queries: &[Q]) -> Vec<Result<QueryOutcome, RunnerError>>
    where
        S: QuerySource,
        Q: AsRef<str>,
    {
        let mut outcomes = Vec::with_capacity(queries.len());
        for (position, sql) in queries.iter().enumerate() {
            let index = position + 1;
            let outcome = self.run_query(source, index, sql.as_ref()).await;
            if let Err(error) = &outcome {
                error!(query = index, %error, "query {} failed", index);
            }
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn export_csv(&self, index: usize, result: &ResultSet) -> Result<PathBuf, RunnerError> {
        let directory = &self.options.output_directory;
        tokio::fs::create_dir_all(directory).await
            .map_err(|err| RunnerError::Export { path: directory.clone(), message: err.to_string() })?;

        let path = directory.join(export_file_name(index, &Local::now()));
        result.write_csv(&path)
            .map_err(|err| RunnerError::Export { path: path.clone(), message: err.to_string() })?;

        info!(query = index, path = %path.display(), "exported to CSV");
        Ok(path)
    }
}
