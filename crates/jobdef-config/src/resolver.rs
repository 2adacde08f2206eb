//! Resolution of configurations into job definitions.

use jobdef_core::{BranchType, Component, Document, JobDefinition};

use crate::document::{ConfigurationRow, StoredConfiguration};
use crate::merge::merge_documents;
use crate::normalize::normalize;
use crate::{ConfigError, ConfigResult};

/// Turns a stored configuration or inline config data into job definitions.
///
/// Holds no state; one value can serve any number of resolutions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build the single definition for inline config data.
    ///
    /// Inline data has no rows, version or state; it is used as the configuration body as is.
    pub fn resolve_from_inline_data(
        &self,
        component: &Component,
        config_data: Document,
        config_id: Option<String>,
        branch_type: BranchType,
    ) -> ConfigResult<JobDefinition> {
        let configuration = normalize(config_data)?;
        Ok(JobDefinition::new(&component.id, configuration, branch_type)
            .with_config(config_id, None))
    }

    /// Build definitions for a raw stored configuration.
    ///
    /// See [`ConfigResolver::resolve_configuration`].
    pub fn resolve_from_stored_config(
        &self,
        component: &Component,
        config: Document,
        branch_type: BranchType,
        row_ids: &[String],
    ) -> ConfigResult<Vec<JobDefinition>> {
        let config = StoredConfiguration::from_document(config)?;
        self.resolve_configuration(component, config, branch_type, row_ids)
    }

    /// Build one definition per row, or a single one when there are no rows.
    ///
    /// When `row_ids` is non-empty only matching rows are resolved, in stored order.
    /// Processors may live on the configuration or on its rows but never on both;
    /// this is checked over every row before any filtering happens.
    pub fn resolve_configuration(
        &self,
        component: &Component,
        config: StoredConfiguration,
        branch_type: BranchType,
        row_ids: &[String],
    ) -> ConfigResult<Vec<JobDefinition>> {
        if config.has_processors()? && config.has_row_processors()? {
            return Err(ConfigError::ProcessorConflict);
        }

        let StoredConfiguration {
            id,
            version,
            state,
            configuration,
            rows,
        } = config;

        if rows.is_empty() {
            let configuration = normalize(configuration)?;
            let definition = JobDefinition::new(&component.id, configuration, branch_type)
                .with_config(id, version)
                .with_state(state);
            return Ok(vec![definition]);
        }

        let rows = filter_rows(rows, row_ids)?;

        rows.into_iter()
            .map(|row| -> ConfigResult<JobDefinition> {
                let merged = merge_documents(&configuration, &row.configuration);
                Ok(JobDefinition::new(&component.id, normalize(merged)?, branch_type)
                    .with_config(id.clone(), version.clone())
                    .with_row(row.id, row.is_disabled)
                    .with_state(row.state))
            })
            .collect()
    }
}

fn filter_rows(
    rows: Vec<ConfigurationRow>,
    row_ids: &[String],
) -> ConfigResult<Vec<ConfigurationRow>> {
    if row_ids.is_empty() {
        return Ok(rows);
    }

    let selected: Vec<ConfigurationRow> = rows
        .into_iter()
        .filter(|row| row_ids.contains(&row.id))
        .collect();

    if selected.is_empty() {
        return Err(ConfigError::RowsNotFound {
            row_ids: row_ids.to_vec(),
        });
    }
    Ok(selected)
}
