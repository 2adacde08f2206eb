//! Builds job definitions for jobs.

use jobdef_config::ConfigResolver;
use jobdef_core::{
    Component, ComponentProvider, ConfigurationStorage, DecryptionContext, Encryptor,
    JobDefinition, JobDescriptor,
};
use tracing::debug;

use crate::{FactoryError, FactoryResult};

/// Chooses where a job's configuration comes from and resolves it.
#[derive(Debug, Clone, Default)]
pub struct JobDefinitionFactory {
    resolver: ConfigResolver,
}

impl JobDefinitionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create job definitions for `job`.
    ///
    /// Inline config data wins over the stored configuration. Either source is
    /// decrypted with `encryptor` before resolution. Storage and encryption
    /// failures are returned as they come, without retries.
    pub async fn create_from_job(
        &self,
        component: &Component,
        job: &JobDescriptor,
        storage: &dyn ConfigurationStorage,
        encryptor: &dyn Encryptor,
    ) -> FactoryResult<Vec<JobDefinition>> {
        let context = DecryptionContext {
            component_id: job.component_id.clone(),
            config_id: job.config_id.clone(),
            branch_type: job.branch_type,
        };

        if let Some(config_data) = job.inline_config_data() {
            debug!(
                component_id = %job.component_id,
                config_id = ?job.config_id,
                "resolving inline config data"
            );
            let config_data = encryptor
                .decrypt(config_data.clone(), &context)
                .await
                .map_err(FactoryError::Decryption)?;
            let definition = self.resolver.resolve_from_inline_data(
                component,
                config_data,
                job.config_id.clone(),
                job.branch_type,
            )?;
            return Ok(vec![definition]);
        }

        let config_id = job
            .config_id
            .as_deref()
            .ok_or_else(|| FactoryError::MissingConfigId {
                component_id: job.component_id.clone(),
            })?;

        debug!(
            component_id = %job.component_id,
            config_id,
            rows = ?job.requested_row_ids,
            "fetching stored configuration"
        );
        let config = storage
            .fetch_configuration(&job.component_id, config_id)
            .await
            .map_err(FactoryError::Storage)?;
        let config = encryptor
            .decrypt(config, &context)
            .await
            .map_err(FactoryError::Decryption)?;

        let definitions = self.resolver.resolve_from_stored_config(
            component,
            config,
            job.branch_type,
            &job.requested_row_ids,
        )?;
        debug!(
            component_id = %job.component_id,
            config_id,
            count = definitions.len(),
            "resolved job definitions"
        );
        Ok(definitions)
    }

    /// Look up the job's component, then [`create_from_job`](Self::create_from_job).
    pub async fn create_for_job(
        &self,
        components: &dyn ComponentProvider,
        job: &JobDescriptor,
        storage: &dyn ConfigurationStorage,
        encryptor: &dyn Encryptor,
    ) -> FactoryResult<Vec<JobDefinition>> {
        let component = components
            .component(&job.component_id)
            .await
            .map_err(FactoryError::Component)?;
        self.create_from_job(&component, job, storage, encryptor)
            .await
    }
}
