use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Invalid breakdown schema: {0}")]
    InvalidBreakdownSchema(String),

    #[error("Report has no content to export: {0}")]
    EmptyReport(String),

    #[error("CSV serialization error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "client")]
    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[cfg(feature = "client")]
    #[error("API request failed (status {status}): {message}")]
    ApiError { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, InsightsError>;
