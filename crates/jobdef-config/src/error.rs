//! Configuration resolution errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Processors may be set either in configuration or in configuration row, but not in both places."
    )]
    ProcessorConflict,

    #[error("None of rows \"{}\" was found.", .row_ids.join(","))]
    RowsNotFound { row_ids: Vec<String> },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("KDL parse error: {0}")]
    Settings(#[from] kdl::KdlError),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Every resolution error stems from the configuration the user supplied.
    pub fn is_user_error(&self) -> bool {
        true
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_not_found_lists_ids() {
        let err = ConfigError::RowsNotFound {
            row_ids: vec!["nonexistent".to_string(), "other".to_string()],
        };
        assert_eq!(err.to_string(), "None of rows \"nonexistent,other\" was found.");
    }

    #[test]
    fn test_processor_conflict_message() {
        assert_eq!(
            ConfigError::ProcessorConflict.to_string(),
            "Processors may be set either in configuration or in configuration row, but not in both places."
        );
    }
}
