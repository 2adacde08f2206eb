//! Component descriptors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Document, Result};

/// Static metadata of a component, the unit of executable logic a job runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Stable component identifier, e.g. `keboola.ex-db-snowflake`.
    pub id: String,
    /// Container image reference, when the component publishes one.
    #[serde(default)]
    pub image: Option<String>,
    /// Feature flags declared by the component.
    #[serde(default)]
    pub features: Vec<String>,
    /// Free-form component data.
    #[serde(default)]
    pub data: Document,
}

impl Component {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Trait for component metadata backends.
#[async_trait]
pub trait ComponentProvider: Send + Sync {
    /// Get a component descriptor by id.
    async fn component(&self, component_id: &str) -> Result<Component>;
}
