//! Testing utilities for provider implementations.
//!
//! This module provides utilities to test `ProviderService` implementations
//! without a host or transport.
//!
//! # Example
//!
//! ```ignore
//! use assert_provider::testing::{assert_error_contains, ProviderTester};
//! use assert_provider::Provider;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_unsatisfied_condition() {
//!     let tester = ProviderTester::new(Provider::assert("dev"));
//!     tester.configure(json!({})).await.unwrap();
//!
//!     let result = tester
//!         .read_data_source("assert", json!({"condition": false, "error_message": "too small"}))
//!         .await
//!         .unwrap();
//!
//!     assert_error_contains(&result.diagnostics, "too small");
//! }
//! ```

use crate::error::ProviderError;
use crate::provider::ProviderService;
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::types::ReadDataSourceResult;
use serde_json::Value;
use std::fmt;

/// A test harness for provider implementations.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    /// Create a new tester for the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// Get the provider's schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Get the list of data source type names.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Configure the provider.
    ///
    /// Returns `Err` with the error diagnostics if configuration fails.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.configure(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Stop the provider.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Validate a data source configuration.
    ///
    /// Returns `Err` with the error diagnostics if validation fails.
    pub async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_data_source_config(data_source_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Read a data source, returning the full result including warnings.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<ReadDataSourceResult, ProviderError> {
        self.provider
            .read_data_source(data_source_type, config)
            .await
    }

    /// Read a data source and require it to succeed.
    ///
    /// Returns the state on success, or `Err` with the error diagnostics if
    /// the read halted.
    pub async fn read_state(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, TestError> {
        let result = self.read_data_source(data_source_type, config).await?;
        if result.has_errors() {
            return Err(TestError::Diagnostics(
                result
                    .diagnostics
                    .into_iter()
                    .filter(Diagnostic::is_error)
                    .collect(),
            ));
        }
        result
            .state
            .ok_or_else(|| TestError::Diagnostics(Vec::new()))
    }
}

/// Error type for test operations that may fail with diagnostics.
#[derive(Debug)]
pub enum TestError {
    /// The operation failed with diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The operation failed with a provider error.
    Provider(ProviderError),
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "Operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            },
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

fn mentions(diagnostic: &Diagnostic, substring: &str) -> bool {
    diagnostic.summary.contains(substring)
        || diagnostic
            .detail
            .as_deref()
            .is_some_and(|detail| detail.contains(substring))
}

fn texts(diagnostics: &[Diagnostic], severity: DiagnosticSeverity) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| match &d.detail {
            Some(detail) => format!("{}: {}", d.summary, detail),
            None => d.summary.clone(),
        })
        .collect()
}

// =========================================================================
// Assertion Helpers
// =========================================================================

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there are any error diagnostics.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors = texts(diagnostics, DiagnosticSeverity::Error);
    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if there are no error diagnostics.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics.iter().any(Diagnostic::is_error),
        "Expected at least one error, but got none"
    );
}

/// Assert that diagnostics contain at least one warning.
///
/// # Panics
///
/// Panics if there are no warning diagnostics.
pub fn assert_has_warnings(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Warning),
        "Expected at least one warning, but got none"
    );
}

/// Assert that an error's summary or detail contains the given substring.
///
/// # Panics
///
/// Panics if no error diagnostic mentions the substring.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let found = diagnostics
        .iter()
        .any(|d| d.is_error() && mentions(d, substring));

    assert!(
        found,
        "Expected an error containing '{}', but no matching error found. Errors: {:?}",
        substring,
        texts(diagnostics, DiagnosticSeverity::Error)
    );
}

/// Assert that a warning's summary or detail contains the given substring.
///
/// # Panics
///
/// Panics if no warning diagnostic mentions the substring.
pub fn assert_warning_contains(diagnostics: &[Diagnostic], substring: &str) {
    let found = diagnostics
        .iter()
        .any(|d| d.severity == DiagnosticSeverity::Warning && mentions(d, substring));

    assert!(
        found,
        "Expected a warning containing '{}', but no matching warning found. Warnings: {:?}",
        substring,
        texts(diagnostics, DiagnosticSeverity::Warning)
    );
}
