//! Job definition factory.
//!
//! Picks the configuration source for a job (inline data or configuration
//! storage), decrypts it and hands it to the resolver.

pub mod error;
pub mod factory;
pub mod retry;

pub use error::{ErrorKind, FactoryError, FactoryResult};
pub use factory::JobDefinitionFactory;
pub use retry::RetryingStorage;
