use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Could not parse date: {value:?}")]
    DateParse { value: String },

    #[error("No tickets match the current filters")]
    EmptyResult,

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid ticket {name}: {reason}")]
    InvalidRow { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),
}

impl DashboardError {
    pub fn invalid_row(name: &str, reason: impl Into<String>) -> Self {
        DashboardError::InvalidRow {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }

    /// Errors a single row can recover from by being dropped.
    pub fn is_row_local(&self) -> bool {
        matches!(
            self,
            DashboardError::DateParse { .. } | DashboardError::InvalidRow { .. }
        )
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
