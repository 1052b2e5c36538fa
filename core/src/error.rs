use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input format for {path} (expected .parquet, .json, .jsonl or .ndjson)")]
    UnsupportedFormat { path: String },

    #[error("Required column '{column}' missing from {table}")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Invalid value in column '{column}' at row {row}: {detail}")]
    InvalidValue {
        column: String,
        row: usize,
        detail: String,
    },

    #[error("Report output failed: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EdaResult<T> = Result<T, EdaError>;
