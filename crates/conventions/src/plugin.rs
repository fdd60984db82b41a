//! Convention set plugin
//!
//! The plugin is the single entry point a host wires in: it holds the options
//! and the host services, and appends the enabled conventions to the host's
//! convention set.

use crate::convention::ConventionSet;
use crate::discriminator::DiscriminatorCheckConstraintConvention;
use crate::enum_constraint::EnumCheckConstraintConvention;
use crate::options::CheckConstraintsOptions;
use crate::validation::ValidationCheckConstraintConvention;
use checkwright_core::DatabaseProvider;
use checkwright_ir::{
    DialectSqlGenerationHelper, RelationalTypeMappingSource, SqlGenerationHelper,
    TypeMappingSource,
};
use std::sync::Arc;

/// Adds the check constraint conventions to a convention set
#[derive(Clone)]
pub struct CheckConstraintsConventionSetPlugin {
    options: CheckConstraintsOptions,
    provider: DatabaseProvider,
    type_mapping_source: Arc<dyn TypeMappingSource>,
    sql_generation_helper: Arc<dyn SqlGenerationHelper>,
}

impl CheckConstraintsConventionSetPlugin {
    /// Create a plugin using host-provided services
    pub fn new(
        options: CheckConstraintsOptions,
        provider: DatabaseProvider,
        type_mapping_source: Arc<dyn TypeMappingSource>,
        sql_generation_helper: Arc<dyn SqlGenerationHelper>,
    ) -> Self {
        Self {
            options,
            provider,
            type_mapping_source,
            sql_generation_helper,
        }
    }

    /// Create a plugin using the built-in services for the provider's dialect
    pub fn for_provider(options: CheckConstraintsOptions, provider: DatabaseProvider) -> Self {
        let type_mapping_source = Arc::new(RelationalTypeMappingSource::for_provider(&provider));
        let sql_generation_helper = Arc::new(DialectSqlGenerationHelper::for_provider(&provider));
        Self::new(options, provider, type_mapping_source, sql_generation_helper)
    }

    /// The configured options
    pub fn options(&self) -> &CheckConstraintsOptions {
        &self.options
    }

    /// The target provider
    pub fn provider(&self) -> &DatabaseProvider {
        &self.provider
    }

    /// Append the enabled conventions to `conventions`
    pub fn modify_conventions(&self, mut conventions: ConventionSet) -> ConventionSet {
        tracing::info!(provider = %self.provider, "{}", self.options.log_fragment());

        if self.options.enum_check_constraints {
            conventions.add(Box::new(EnumCheckConstraintConvention::new(
                Arc::clone(&self.type_mapping_source),
                Arc::clone(&self.sql_generation_helper),
            )));
        }

        if self.options.discriminator_check_constraints {
            conventions.add(Box::new(DiscriminatorCheckConstraintConvention::new(
                Arc::clone(&self.type_mapping_source),
                Arc::clone(&self.sql_generation_helper),
            )));
        }

        if let Some(validation) = &self.options.validation {
            conventions.add(Box::new(ValidationCheckConstraintConvention::new(
                validation.clone(),
                self.provider.clone(),
                Arc::clone(&self.type_mapping_source),
                Arc::clone(&self.sql_generation_helper),
            )));
        }

        conventions
    }
}

impl std::fmt::Debug for CheckConstraintsConventionSetPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckConstraintsConventionSetPlugin")
            .field("options", &self.options)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
