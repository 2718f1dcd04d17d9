use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading the three input tables.
///
/// Once loading succeeds the rest of the pipeline cannot fail.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read input file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name}: line {line}: column '{column}' has invalid value '{value}' ({reason})")]
    MalformedField {
        source_name: String,
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("{source_name}: malformed CSV: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// True for the missing-column / bad-value class of failures.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            LoadError::MissingColumn { .. } | LoadError::MalformedField { .. } | LoadError::Csv { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
