use thiserror::Error;

use crate::schema::Column;

#[derive(Error, Debug)]
pub enum HostbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing expected columns: {}", join_columns(.0))]
    MissingColumns(Vec<Column>),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub(crate) fn join_columns(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.canonical_name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, HostbookError>;
