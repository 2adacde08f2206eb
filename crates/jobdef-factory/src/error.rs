//! Factory errors.

use jobdef_config::ConfigError;
use thiserror::Error;

/// How the caller should present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caused by the job or its configuration; shown to the user.
    User,
    /// Secrets could not be decrypted.
    Encryption,
    /// Anything else.
    Application,
}

/// Failures while building job definitions. Collaborator errors are carried unchanged.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Resolve(#[from] ConfigError),

    #[error("failed to fetch configuration: {0}")]
    Storage(#[source] jobdef_core::Error),

    #[error("failed to decrypt configuration: {0}")]
    Decryption(#[source] jobdef_core::Error),

    #[error("failed to load component: {0}")]
    Component(#[source] jobdef_core::Error),

    #[error("job for component {component_id} has neither config data nor config id")]
    MissingConfigId { component_id: String },
}

impl FactoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FactoryError::Resolve(err) => {
                if err.is_user_error() {
                    ErrorKind::User
                } else {
                    ErrorKind::Application
                }
            }
            FactoryError::MissingConfigId { .. } => ErrorKind::User,
            FactoryError::Decryption(_) => ErrorKind::Encryption,
            FactoryError::Storage(err) | FactoryError::Component(err) => {
                if err.is_user_error() {
                    ErrorKind::User
                } else {
                    ErrorKind::Application
                }
            }
        }
    }
}

pub type FactoryResult<T> = std::result::Result<T, FactoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FactoryError::Resolve(ConfigError::ProcessorConflict).kind(),
            ErrorKind::User
        );
        assert_eq!(
            FactoryError::Decryption(jobdef_core::Error::Decryption("bad key".into())).kind(),
            ErrorKind::Encryption
        );
        assert_eq!(
            FactoryError::Storage(jobdef_core::Error::NotFound("config 1".into())).kind(),
            ErrorKind::User
        );
        assert_eq!(
            FactoryError::Storage(jobdef_core::Error::Storage("503".into())).kind(),
            ErrorKind::Application
        );
    }

    #[test]
    fn test_resolve_errors_are_user_errors() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            FactoryError::Resolve(ConfigError::Json(malformed)).kind(),
            ErrorKind::User
        );
        assert_eq!(
            FactoryError::MissingConfigId {
                component_id: "keboola.ex-db".into()
            }
            .kind(),
            ErrorKind::User
        );
    }

    #[test]
    fn test_resolve_error_message_is_verbatim() {
        let err = FactoryError::from(ConfigError::RowsNotFound {
            row_ids: vec!["nonexistent".to_string()],
        });
        assert_eq!(err.to_string(), "None of rows \"nonexistent\" was found.");
    }
}
