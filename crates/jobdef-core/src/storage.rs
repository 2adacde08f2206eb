//! Configuration storage and encryption abstractions.

use async_trait::async_trait;

use crate::{BranchType, Document, Result};

/// Trait for configuration storage backends.
#[async_trait]
pub trait ConfigurationStorage: Send + Sync {
    /// Fetch the raw stored configuration, rows included.
    async fn fetch_configuration(&self, component_id: &str, config_id: &str) -> Result<Document>;
}

/// Scope in which encrypted values are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionContext {
    pub component_id: String,
    pub config_id: Option<String>,
    pub branch_type: BranchType,
}

/// Trait for secret decryption backends.
#[async_trait]
pub trait Encryptor: Send + Sync {
    /// Return `data` with every encrypted value replaced by its plain form.
    ///
    /// Failures must be reported as [`crate::Error::Decryption`].
    async fn decrypt(&self, data: Document, context: &DecryptionContext) -> Result<Document>;
}
