//! The `assert` data source: one condition at the config root.
//!
//! Two config forms exist. The messages form takes exactly one of
//! `error_message` and `warning_message`:
//!
//! ```hcl
//! data "assert" "disk" {
//!   condition     = var.disk_gb >= 20
//!   error_message = "disk must be at least 20 GB"
//! }
//! ```
//!
//! The severity form names the severity explicitly:
//!
//! ```hcl
//! data "assert" "disk" {
//!   condition = var.disk_gb >= 20
//!   severity  = "warn"
//!   summary   = "Small disk"
//!   detail    = "disk should be at least 20 GB"
//! }
//! ```

use super::{DataSource, ERROR_MESSAGE_DESCRIPTION, ID_DESCRIPTION, WARNING_MESSAGE_DESCRIPTION};
use crate::error::ProviderError;
use crate::evaluator::{Assertion, Message};
use crate::path::AttributePath;
use crate::schema::{Attribute, DiagnosticSeverity, Schema};
use crate::validation::ConfigValidator;
use serde::Deserialize;
use serde_json::Value;

const SEVERITY_ERROR: &str = "error";
const SEVERITY_WARN: &str = "warn";

/// Which config form an [`AssertDataSource`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssertForm {
    /// `error_message` / `warning_message`, exactly one set.
    #[default]
    Messages,
    /// `severity` (`"error"` or `"warn"`), `detail`, optional `summary`.
    Severity,
}

/// Asserts that a single condition is true.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertDataSource {
    form: AssertForm,
}

#[derive(Debug, Deserialize)]
struct MessagesModel {
    condition: bool,
    error_message: Option<String>,
    warning_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeverityModel {
    condition: bool,
    severity: String,
    summary: Option<String>,
    detail: String,
}

impl AssertDataSource {
    /// Create an `assert` data source accepting the given form.
    pub fn new(form: AssertForm) -> Self {
        Self { form }
    }

    /// The config form this data source accepts.
    pub fn form(&self) -> AssertForm {
        self.form
    }

    fn messages_assertion(config: &Value) -> Result<Assertion, ProviderError> {
        let model = MessagesModel::deserialize(config)?;
        let message = match (model.error_message, model.warning_message) {
            (Some(text), None) => Message::Error(text),
            (None, Some(text)) => Message::Warning(text),
            _ => {
                return Err(ProviderError::Validation(
                    "exactly one of error_message or warning_message must be set".to_string(),
                ))
            },
        };
        Ok(Assertion::exclusive(model.condition, message, condition_path()))
    }

    fn severity_assertion(config: &Value) -> Result<Assertion, ProviderError> {
        let model = SeverityModel::deserialize(config)?;
        let severity = parse_severity(&model.severity)?;
        Ok(Assertion::with_severity(
            model.condition,
            severity,
            model.summary,
            model.detail,
            condition_path(),
        ))
    }
}

impl DataSource for AssertDataSource {
    fn type_name(&self) -> &str {
        "assert"
    }

    fn schema(&self) -> Schema {
        let schema = Schema::v0()
            .with_description(
                "Asserts that a condition is true, otherwise reports a warning or error.",
            )
            .with_attribute(
                "id",
                Attribute::computed_string().with_description(ID_DESCRIPTION),
            )
            .with_attribute(
                "condition",
                Attribute::required_bool()
                    .with_description("The assertion that is expected to be true."),
            );

        match self.form {
            AssertForm::Messages => schema
                .with_attribute(
                    "error_message",
                    Attribute::optional_string().with_description(ERROR_MESSAGE_DESCRIPTION),
                )
                .with_attribute(
                    "warning_message",
                    Attribute::optional_string().with_description(WARNING_MESSAGE_DESCRIPTION),
                ),
            AssertForm::Severity => schema
                .with_attribute(
                    "severity",
                    Attribute::required_string().with_description(
                        "The severity of the diagnostic if the condition is not satisfied: `error` or `warn`.",
                    ),
                )
                .with_attribute(
                    "summary",
                    Attribute::optional_string()
                        .with_description("The summary of the diagnostic."),
                )
                .with_attribute(
                    "detail",
                    Attribute::required_string()
                        .with_description("The detail of the diagnostic."),
                ),
        }
    }

    fn config_validators(&self) -> Vec<ConfigValidator> {
        match self.form {
            AssertForm::Messages => vec![ConfigValidator::exactly_one_of([
                "error_message",
                "warning_message",
            ])],
            AssertForm::Severity => vec![ConfigValidator::one_of(
                "severity",
                [SEVERITY_ERROR, SEVERITY_WARN],
            )],
        }
    }

    fn assertions(&self, config: &Value) -> Result<Vec<Assertion>, ProviderError> {
        let assertion = match self.form {
            AssertForm::Messages => Self::messages_assertion(config)?,
            AssertForm::Severity => Self::severity_assertion(config)?,
        };
        Ok(vec![assertion])
    }
}

fn condition_path() -> AttributePath {
    AttributePath::root("condition")
}

fn parse_severity(value: &str) -> Result<DiagnosticSeverity, ProviderError> {
    match value {
        SEVERITY_ERROR => Ok(DiagnosticSeverity::Error),
        SEVERITY_WARN => Ok(DiagnosticSeverity::Warning),
        other => Err(ProviderError::Validation(format!(
            "severity must be \"{}\" or \"{}\", got {:?}",
            SEVERITY_ERROR, SEVERITY_WARN, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::ConditionEvaluator;
    use crate::id::SequenceIdGenerator;
    use serde_json::json;

    fn evaluator() -> ConditionEvaluator {
        ConditionEvaluator::with_id_generator(SequenceIdGenerator::new("assert"))
    }

    #[test]
    fn test_messages_schema() {
        let schema = AssertDataSource::default().schema();
        let attrs = &schema.block.attributes;
        assert!(attrs["id"].flags.computed);
        assert!(attrs["condition"].flags.required);
        assert!(attrs["error_message"].flags.optional);
        assert!(attrs["warning_message"].flags.optional);
        assert!(!attrs.contains_key("severity"));
        assert!(schema.block.blocks.is_empty());
    }

    #[test]
    fn test_severity_schema() {
        let schema = AssertDataSource::new(AssertForm::Severity).schema();
        let attrs = &schema.block.attributes;
        assert!(attrs["severity"].flags.required);
        assert!(attrs["detail"].flags.required);
        assert!(attrs["summary"].flags.optional);
        assert!(!attrs.contains_key("error_message"));
        assert!(schema.block.blocks.is_empty());
    }

    #[test]
    fn test_false_condition_with_error_halts() {
        let result = AssertDataSource::default()
            .read(
                json!({"condition": false, "error_message": "test error"}),
                &evaluator(),
            )
            .unwrap();

        assert!(result.has_errors());
        assert!(result.state.is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].summary, "Unsatisfied Condition");
        assert_eq!(result.diagnostics[0].detail.as_deref(), Some("test error"));
        assert_eq!(
            result.diagnostics[0].attribute,
            Some(AttributePath::root("condition"))
        );
    }

    #[test]
    fn test_false_condition_with_warning_keeps_state() {
        let result = AssertDataSource::default()
            .read(
                json!({"condition": false, "warning_message": "test warning"}),
                &evaluator(),
            )
            .unwrap();

        assert!(!result.has_errors());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Warning);
        assert_eq!(result.id(), Some("assert-1"));
    }

    #[test]
    fn test_true_condition_sets_id() {
        let result = AssertDataSource::default()
            .read(
                json!({"condition": true, "warning_message": "test warning"}),
                &evaluator(),
            )
            .unwrap();

        assert!(result.diagnostics.is_empty());
        let state = result.state.unwrap();
        assert_eq!(state["id"], "assert-1");
        assert_eq!(state["condition"], true);
        assert_eq!(state["warning_message"], "test warning");
    }

    #[test]
    fn test_both_messages_rejected() {
        let result = AssertDataSource::default()
            .read(
                json!({"condition": true, "error_message": "e", "warning_message": "w"}),
                &evaluator(),
            )
            .unwrap();

        assert!(result.state.is_none());
        assert_eq!(result.diagnostics[0].summary, "Invalid Attribute Combination");
    }

    #[test]
    fn test_no_message_rejected() {
        let result = AssertDataSource::default()
            .read(json!({"condition": true}), &evaluator())
            .unwrap();

        assert!(result.state.is_none());
        assert_eq!(result.diagnostics[0].summary, "Missing Attribute Configuration");
    }

    #[test]
    fn test_assertions_without_validation_reports_invariant() {
        let err = AssertDataSource::default()
            .assertions(&json!({"condition": true}))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn test_severity_error() {
        let result = AssertDataSource::new(AssertForm::Severity)
            .read(
                json!({
                    "condition": false,
                    "severity": "error",
                    "summary": "Test Summary",
                    "detail": "Test details."
                }),
                &evaluator(),
            )
            .unwrap();

        assert!(result.state.is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Error);
        assert_eq!(result.diagnostics[0].summary, "Test Summary");
        assert_eq!(result.diagnostics[0].detail.as_deref(), Some("Test details."));
    }

    #[test]
    fn test_severity_warn_without_summary() {
        let result = AssertDataSource::new(AssertForm::Severity)
            .read(
                json!({"condition": false, "severity": "warn", "detail": "Test details."}),
                &evaluator(),
            )
            .unwrap();

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Warning);
        assert_eq!(result.diagnostics[0].summary, "");
        assert_eq!(result.id(), Some("assert-1"));
    }

    #[test]
    fn test_severity_out_of_range_rejected() {
        let result = AssertDataSource::new(AssertForm::Severity)
            .read(
                json!({"condition": false, "severity": "fatal", "detail": "d"}),
                &evaluator(),
            )
            .unwrap();

        assert!(result.state.is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].summary, "Invalid Attribute Value Match");
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!(parse_severity("error").unwrap(), DiagnosticSeverity::Error);
        assert_eq!(parse_severity("warn").unwrap(), DiagnosticSeverity::Warning);
        assert!(parse_severity("warning").is_err());
    }
}
