//! Job definitions and job descriptors.
//!
//! A [`JobDescriptor`] is what the orchestrator hands us; a [`JobDefinition`]
//! is the resolved unit of work handed on to the container runner.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::Error;

/// A JSON mapping: configuration bodies, component state, inline config data.
pub type Document = serde_json::Map<String, Value>;

/// Environment class a job runs under.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    /// Production branch.
    #[default]
    #[display("default")]
    Default,
    /// Isolated development branch.
    #[display("dev")]
    Dev,
}

impl FromStr for BranchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(BranchType::Default),
            "dev" => Ok(BranchType::Dev),
            other => Err(Error::InvalidInput(format!("unknown branch type: {other}"))),
        }
    }
}

/// Version of a stored configuration. Storage backends emit either form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(untagged)]
pub enum ConfigVersion {
    #[display("{_0}")]
    Number(i64),
    #[display("{_0}")]
    Text(String),
}

impl From<&str> for ConfigVersion {
    fn from(s: &str) -> Self {
        ConfigVersion::Text(s.to_string())
    }
}

/// One fully resolved unit of executable work.
///
/// Built once by the resolver and never mutated afterwards; fields are only
/// reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDefinition {
    configuration: Document,
    component_id: String,
    config_id: Option<String>,
    config_version: Option<ConfigVersion>,
    row_id: Option<String>,
    is_disabled: bool,
    state: Document,
    branch_type: BranchType,
}

impl JobDefinition {
    /// Create a definition with no stored configuration, no row and empty state.
    pub fn new(
        component_id: impl Into<String>,
        configuration: Document,
        branch_type: BranchType,
    ) -> Self {
        Self {
            configuration,
            component_id: component_id.into(),
            config_id: None,
            config_version: None,
            row_id: None,
            is_disabled: false,
            state: Document::new(),
            branch_type,
        }
    }

    pub fn with_config(
        mut self,
        config_id: Option<String>,
        config_version: Option<ConfigVersion>,
    ) -> Self {
        self.config_id = config_id;
        self.config_version = config_version;
        self
    }

    pub fn with_row(mut self, row_id: impl Into<String>, is_disabled: bool) -> Self {
        self.row_id = Some(row_id.into());
        self.is_disabled = is_disabled;
        self
    }

    pub fn with_state(mut self, state: Document) -> Self {
        self.state = state;
        self
    }

    pub fn configuration(&self) -> &Document {
        &self.configuration
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn config_id(&self) -> Option<&str> {
        self.config_id.as_deref()
    }

    pub fn config_version(&self) -> Option<&ConfigVersion> {
        self.config_version.as_ref()
    }

    pub fn row_id(&self) -> Option<&str> {
        self.row_id.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn state(&self) -> &Document {
        &self.state
    }

    pub fn branch_type(&self) -> BranchType {
        self.branch_type
    }

    /// Shorthand for `configuration.parameters`, always present after normalization.
    pub fn parameters(&self) -> Option<&Document> {
        self.configuration.get("parameters").and_then(Value::as_object)
    }
}

/// A job as handed over by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub component_id: String,
    #[serde(default)]
    pub config_id: Option<String>,
    /// Inline configuration; takes precedence over the stored configuration.
    #[serde(default)]
    pub config_data: Option<Document>,
    /// Restrict resolution to these rows. Empty means all rows.
    #[serde(default, rename = "configRowIds")]
    pub requested_row_ids: Vec<String>,
    #[serde(default)]
    pub branch_type: BranchType,
}

impl JobDescriptor {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            ..Self::default()
        }
    }

    /// Inline config data that is present and not an empty mapping.
    pub fn inline_config_data(&self) -> Option<&Document> {
        self.config_data.as_ref().filter(|data| !data.is_empty())
    }
}
