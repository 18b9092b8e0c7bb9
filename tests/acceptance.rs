//! End-to-end reads through the shipped providers.

use assert_provider::testing::{
    assert_error_contains, assert_has_warnings, assert_no_errors, assert_warning_contains,
    ProviderTester,
};
use assert_provider::{
    AttributePath, ConditionEvaluator, DiagnosticSeverity, Provider, SequenceIdGenerator,
};
use serde_json::json;

fn assert_tester() -> ProviderTester<Provider> {
    ProviderTester::new(Provider::assert("test"))
}

fn check_tester() -> ProviderTester<Provider> {
    ProviderTester::new(Provider::check("test"))
}

#[tokio::test]
async fn assert_true_condition_with_warning_does_not_fire() {
    let result = assert_tester()
        .read_data_source(
            "assert",
            json!({"condition": true, "warning_message": "test warning"}),
        )
        .await
        .unwrap();

    assert!(result.diagnostics.is_empty());
    assert!(result.id().is_some());
}

#[tokio::test]
async fn assert_false_condition_with_warning_fires() {
    let result = assert_tester()
        .read_data_source(
            "assert",
            json!({"condition": false, "warning_message": "test warning"}),
        )
        .await
        .unwrap();

    assert_no_errors(&result.diagnostics);
    assert_warning_contains(&result.diagnostics, "test warning");
    assert!(result.id().is_some());
}

#[tokio::test]
async fn assert_true_condition_with_error_does_not_fire() {
    let state = assert_tester()
        .read_state(
            "assert",
            json!({"condition": true, "error_message": "test error"}),
        )
        .await
        .unwrap();

    assert_eq!(state["error_message"], "test error");
    assert!(state["id"].as_str().unwrap().parse::<u64>().is_ok());
}

#[tokio::test]
async fn assert_false_condition_with_error_fires() {
    let result = assert_tester()
        .read_data_source(
            "assert",
            json!({"condition": false, "error_message": "test error"}),
        )
        .await
        .unwrap();

    assert_error_contains(&result.diagnostics, "test error");
    assert!(result.state.is_none());
}

#[tokio::test]
async fn assert_with_both_messages_is_rejected() {
    let result = assert_tester()
        .read_data_source(
            "assert",
            json!({
                "condition": true,
                "error_message": "test error",
                "warning_message": "test warning"
            }),
        )
        .await
        .unwrap();

    assert_error_contains(&result.diagnostics, "Invalid Attribute Combination");
    assert!(result.state.is_none());
}

#[tokio::test]
async fn assert_with_no_message_is_rejected() {
    let result = assert_tester()
        .read_data_source("assert", json!({"condition": true}))
        .await
        .unwrap();

    assert_error_contains(&result.diagnostics, "Missing Attribute Configuration");
}

#[tokio::test]
async fn assert_severity_form_error() {
    let tester = ProviderTester::new(Provider::assert_with_severity_schema("test"));
    let result = tester
        .read_data_source(
            "assert",
            json!({
                "condition": false,
                "severity": "error",
                "summary": "Test Summary",
                "detail": "Test details."
            }),
        )
        .await
        .unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
    assert_eq!(diagnostic.summary, "Test Summary");
    assert_eq!(diagnostic.detail.as_deref(), Some("Test details."));
    assert!(result.state.is_none());
}

#[tokio::test]
async fn assert_severity_form_rejects_unknown_severity() {
    let tester = ProviderTester::new(Provider::assert_with_severity_schema("test"));
    let result = tester
        .read_data_source(
            "assert",
            json!({"condition": true, "severity": "fatal", "detail": "Test details."}),
        )
        .await
        .unwrap();

    assert_error_contains(&result.diagnostics, "Invalid Attribute Value Match");
}

#[tokio::test]
async fn check_true_condition_with_warning_does_not_fire() {
    let result = check_tester()
        .read_data_source(
            "check",
            json!({"assert": [{"condition": true, "warning_message": "test warning"}]}),
        )
        .await
        .unwrap();

    assert!(result.diagnostics.is_empty());
    assert!(result.id().is_some());
}

#[tokio::test]
async fn check_false_condition_with_warning_fires() {
    let result = check_tester()
        .read_data_source(
            "check",
            json!({"assert": [{"condition": false, "warning_message": "test warning"}]}),
        )
        .await
        .unwrap();

    assert_has_warnings(&result.diagnostics);
    assert!(result.id().is_some());
}

#[tokio::test]
async fn check_false_condition_with_error_fires() {
    let result = check_tester()
        .read_data_source(
            "check",
            json!({"assert": [{"condition": false, "error_message": "test error"}]}),
        )
        .await
        .unwrap();

    assert_error_contains(&result.diagnostics, "test error");
    assert!(result.state.is_none());
}

#[tokio::test]
async fn check_evaluates_every_block_before_halting() {
    let result = check_tester()
        .read_data_source(
            "check",
            json!({"assert": [
                {"condition": false, "error_message": "first", "warning_message": "first-warn"},
                {"condition": true, "error_message": "never"},
                {"condition": false, "error_message": "third"}
            ]}),
        )
        .await
        .unwrap();

    let summary: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| {
            (
                d.severity,
                d.detail.clone().unwrap(),
                d.attribute.as_ref().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                DiagnosticSeverity::Error,
                "first".to_string(),
                "assert.0.condition".to_string()
            ),
            (
                DiagnosticSeverity::Warning,
                "first-warn".to_string(),
                "assert.0.condition".to_string()
            ),
            (
                DiagnosticSeverity::Error,
                "third".to_string(),
                "assert.2.condition".to_string()
            ),
        ]
    );
    assert!(result.state.is_none());
}

#[tokio::test]
async fn identical_reads_get_different_ids() {
    let tester = assert_tester();
    let config = json!({"condition": true, "warning_message": "test warning"});

    let first = tester.read_state("assert", config.clone()).await.unwrap();
    let second = tester.read_state("assert", config).await.unwrap();
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn injected_ids_are_used_for_state() {
    let provider = Provider::check("test").with_evaluator(ConditionEvaluator::with_id_generator(
        SequenceIdGenerator::new("fixed"),
    ));
    let tester = ProviderTester::new(provider);

    let state = tester
        .read_state("check", json!({"assert": [{"condition": true}]}))
        .await
        .unwrap();
    assert_eq!(state["id"], "fixed-1");
}

#[tokio::test]
async fn diagnostics_point_at_condition() {
    let result = assert_tester()
        .read_data_source(
            "assert",
            json!({"condition": false, "warning_message": "test warning"}),
        )
        .await
        .unwrap();

    assert_eq!(
        result.diagnostics[0].attribute,
        Some(AttributePath::root("condition"))
    );
}
