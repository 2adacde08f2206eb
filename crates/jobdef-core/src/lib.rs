//! Core domain types and traits for job definition resolution.
//!
//! This crate contains:
//! - Job definitions and job descriptors
//! - Component descriptors
//! - Collaborator traits (configuration storage, encryption, component metadata)
//! - Retry policy for storage collaborators

pub mod component;
pub mod error;
pub mod job;
pub mod retry;
pub mod storage;

pub use component::{Component, ComponentProvider};
pub use error::{Error, Result};
pub use job::{BranchType, ConfigVersion, Document, JobDefinition, JobDescriptor};
pub use retry::RetryPolicy;
pub use storage::{ConfigurationStorage, DecryptionContext, Encryptor};
