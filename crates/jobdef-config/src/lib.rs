//! Configuration resolution for job definitions.
//!
//! This crate handles:
//! - Decoding stored configurations (base configuration plus rows)
//! - Deep merging row overrides onto the base configuration
//! - Normalizing configurations into the shape the runner expects
//! - Runtime settings in KDL

pub mod document;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod resolver;
pub mod settings;

pub use document::{ConfigurationRow, StoredConfiguration};
pub use error::{ConfigError, ConfigResult};
pub use merge::{deep_merge, merge_documents, merged};
pub use normalize::normalize;
pub use resolver::ConfigResolver;
pub use settings::{Settings, parse_settings};
