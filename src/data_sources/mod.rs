//! Data sources exposed by the assert and check providers.
//!
//! Every data source follows the same read flow:
//!
//! 1. Validate the config against the schema and config validators. Any
//!    error halts the read with those diagnostics.
//! 2. Decode the config into [`Assertion`]s.
//! 3. Run the [`ConditionEvaluator`]. Any error diagnostic halts the read.
//! 4. Otherwise echo the config back as state with `id` set to the
//!    evaluation's fresh identifier, alongside any warnings.
//!
//! Implementations only declare their schema and validators and say how to
//! build assertions from a config.

mod assert;
mod check;

pub use assert::{AssertDataSource, AssertForm};
pub use check::CheckDataSource;

use crate::error::ProviderError;
use crate::evaluator::{Assertion, ConditionEvaluator};
use crate::schema::{has_errors, Diagnostic, Schema};
use crate::types::ReadDataSourceResult;
use crate::validation::{validate_config, ConfigValidator};
use serde_json::Value;
use tracing::{debug, warn};

/// Description shared by every `id` attribute.
pub(crate) const ID_DESCRIPTION: &str = "This is set to a random value at read time.";

/// Description shared by every `error_message` attribute.
pub(crate) const ERROR_MESSAGE_DESCRIPTION: &str =
    "The message included in the error if the condition is not satisfied.";

/// Description shared by every `warning_message` attribute.
pub(crate) const WARNING_MESSAGE_DESCRIPTION: &str =
    "The message included in the warning if the condition is not satisfied.";

/// A read-only data source whose read evaluates assertions.
pub trait DataSource: Send + Sync {
    /// The type name the data source is registered under.
    fn type_name(&self) -> &str;

    /// The config schema.
    fn schema(&self) -> Schema;

    /// Cross-attribute rules applied after schema validation.
    fn config_validators(&self) -> Vec<ConfigValidator> {
        Vec::new()
    }

    /// Build the assertion set from an already validated config.
    fn assertions(&self, config: &Value) -> Result<Vec<Assertion>, ProviderError>;

    /// Validate a config, returning errors and warnings.
    fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        validate_config(&self.schema(), &self.config_validators(), config)
    }

    /// Validate, evaluate, and build the read result.
    fn read(
        &self,
        config: Value,
        evaluator: &ConditionEvaluator,
    ) -> Result<ReadDataSourceResult, ProviderError> {
        let mut diagnostics = self.validate(&config);
        if has_errors(&diagnostics) {
            warn!(
                data_source = self.type_name(),
                diagnostics = diagnostics.len(),
                "Config validation failed"
            );
            return Ok(ReadDataSourceResult::halted(diagnostics));
        }

        let assertions = self.assertions(&config)?;
        let evaluation = evaluator.evaluate(&assertions);
        let halted = evaluation.has_errors();
        let warnings = evaluation.warning_count();
        diagnostics.extend(evaluation.diagnostics);

        if halted {
            warn!(
                data_source = self.type_name(),
                diagnostics = diagnostics.len(),
                "Unsatisfied condition halted read"
            );
            return Ok(ReadDataSourceResult::halted(diagnostics));
        }

        debug!(
            data_source = self.type_name(),
            id = %evaluation.id,
            warnings,
            "Assertions satisfied"
        );
        let state = with_id(config, evaluation.id)?;
        Ok(ReadDataSourceResult::with_state(state, diagnostics))
    }
}

/// Echo a config object back as state with its computed `id` set.
fn with_id(config: Value, id: String) -> Result<Value, ProviderError> {
    match config {
        Value::Object(mut map) => {
            map.insert("id".to_string(), Value::String(id));
            Ok(Value::Object(map))
        },
        other => Err(ProviderError::InvalidRequest(format!(
            "Expected config object, got {}",
            other
        ))),
    }
}
