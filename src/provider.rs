//! Providers and the service trait a host calls.
//!
//! [`ProviderService`] is the surface a host-side transport drives: schema
//! and metadata queries, provider configuration, and data source
//! validation and reads. [`Provider`] implements it over a registry of
//! [`DataSource`]s that share one [`ConditionEvaluator`].
//!
//! Providers shipped with the crate:
//!
//! | Constructor                              | Type name | Data sources                     |
//! |------------------------------------------|-----------|----------------------------------|
//! | [`Provider::assert`]                     | `assert`  | `assert` (messages form)         |
//! | [`Provider::assert_with_severity_schema`]| `assert`  | `assert` (severity form)         |
//! | [`Provider::check`]                      | `check`   | `check`                          |
//!
//! # Example
//!
//! ```
//! use assert_provider::{Provider, ProviderService};
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let provider = Provider::assert("0.1.0");
//! let result = provider
//!     .read_data_source("assert", json!({"condition": false, "warning_message": "low disk"}))
//!     .await
//!     .unwrap();
//!
//! assert!(!result.has_errors());
//! assert!(result.id().is_some());
//! # });
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::data_sources::{AssertDataSource, AssertForm, CheckDataSource, DataSource};
use crate::error::ProviderError;
use crate::evaluator::ConditionEvaluator;
use crate::schema::{has_errors, Diagnostic, ProviderSchema};
use crate::types::{ProviderMetadata, ReadDataSourceResult};
use crate::validation::validate;

/// Trait that provider implementations must implement.
///
/// Calls never fail because a condition is false; that surfaces as error
/// diagnostics in the returned values. `Err` is reserved for requests the
/// provider cannot serve at all.
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// Return the provider's schema including all data sources.
    fn schema(&self) -> ProviderSchema;

    /// Return the provider's name, version and data source names.
    fn metadata(&self) -> ProviderMetadata;

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Validate the provider configuration before configuring.
    async fn validate_provider_config(
        &self,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&self.schema().provider, &config))
    }

    /// Configure the provider.
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Stop the provider gracefully.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Validate a data source's configuration.
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Read a data source, evaluating its assertions.
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<ReadDataSourceResult, ProviderError>;
}

/// A provider serving a fixed set of data sources.
pub struct Provider {
    type_name: String,
    version: String,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
    evaluator: ConditionEvaluator,
}

impl Provider {
    /// Create a provider with no data sources.
    pub fn new(type_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            version: version.into(),
            data_sources: BTreeMap::new(),
            evaluator: ConditionEvaluator::new(),
        }
    }

    /// The `assert` provider with the `error_message`/`warning_message` form.
    pub fn assert(version: impl Into<String>) -> Self {
        Self::new("assert", version).with_data_source(AssertDataSource::new(AssertForm::Messages))
    }

    /// The `assert` provider with the `severity`/`summary`/`detail` form.
    pub fn assert_with_severity_schema(version: impl Into<String>) -> Self {
        Self::new("assert", version).with_data_source(AssertDataSource::new(AssertForm::Severity))
    }

    /// The `check` provider.
    pub fn check(version: impl Into<String>) -> Self {
        Self::new("check", version).with_data_source(CheckDataSource::new())
    }

    /// Register a data source under its type name, replacing any previous one.
    pub fn with_data_source(mut self, data_source: impl DataSource + 'static) -> Self {
        self.data_sources
            .insert(data_source.type_name().to_string(), Box::new(data_source));
        self
    }

    /// Use the given evaluator for every read.
    pub fn with_evaluator(mut self, evaluator: ConditionEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// The provider type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The provider version.
    pub fn version(&self) -> &str {
        &self.version
    }

    fn data_source(&self, data_source_type: &str) -> Result<&dyn DataSource, ProviderError> {
        self.data_sources
            .get(data_source_type)
            .map(|ds| ds.as_ref())
            .ok_or_else(|| ProviderError::UnknownDataSource(data_source_type.to_string()))
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("type_name", &self.type_name)
            .field("version", &self.version)
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait::async_trait]
impl ProviderService for Provider {
    fn schema(&self) -> ProviderSchema {
        self.data_sources
            .iter()
            .fold(ProviderSchema::new(), |schema, (name, ds)| {
                schema.with_data_source(name.as_str(), ds.schema())
            })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: self.type_name.clone(),
            version: self.version.clone(),
            data_sources: self.data_sources.keys().cloned().collect(),
        }
    }

    #[instrument(skip(self, config), name = "provider.configure")]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let diagnostics = self.validate_provider_config(config).await?;
        if has_errors(&diagnostics) {
            warn!(provider = %self.type_name, diagnostics = diagnostics.len(), "Configure completed with errors");
        } else {
            info!(provider = %self.type_name, version = %self.version, "Provider configured");
        }
        Ok(diagnostics)
    }

    #[instrument(skip(self, config), name = "provider.validate_data_source_config")]
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let diagnostics = self.data_source(data_source_type)?.validate(&config);
        debug!(diagnostics = diagnostics.len(), "ValidateDataSourceConfig completed");
        Ok(diagnostics)
    }

    #[instrument(skip(self, config), name = "provider.read_data_source")]
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<ReadDataSourceResult, ProviderError> {
        let data_source = self.data_source(data_source_type).map_err(|e| {
            warn!(error = %e, "ReadDataSource failed");
            e
        })?;

        let result = data_source.read(config, &self.evaluator)?;
        if result.has_errors() {
            warn!(diagnostics = result.diagnostics.len(), "ReadDataSource halted");
        } else {
            info!(
                warnings = result.diagnostics.len(),
                "ReadDataSource completed successfully"
            );
        }
        Ok(result)
    }
}
