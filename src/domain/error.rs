use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// Fewer than two rows (header plus at least one data row) were supplied.
    InsufficientData(String),
    /// The upstream spreadsheet could not be decoded.
    FileFormatError(String),
    /// A single record's publish time could not be resolved; callers skip the record.
    DateResolutionFailure(String),
    ConfigError(String),
    IoError(String),
    SerializationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
            AppError::FileFormatError(msg) => write!(f, "File format error: {}", msg),
            AppError::DateResolutionFailure(msg) => write!(f, "Date resolution failure: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileFormatError(format!("CSV: {}", err))
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::FileFormatError(format!("Workbook: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = AppError::InsufficientData("1 row".to_string());
        assert_eq!(err.to_string(), "Insufficient data: 1 row");

        let err = AppError::FileFormatError("bad zip".to_string());
        assert_eq!(err.to_string(), "File format error: bad zip");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xlsx");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::IoError(msg) if msg.contains("missing.xlsx")));
    }
}
