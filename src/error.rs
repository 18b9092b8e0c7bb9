//! Error types for the assert and check providers.
//!
//! An unsatisfied condition is never an error here: it is a [`Diagnostic`]
//! returned from a read. `ProviderError` covers faults in the plumbing
//! around the evaluator, such as an unknown data source type or a config
//! that cannot be decoded.

use crate::schema::Diagnostic;
use thiserror::Error;

/// Errors that can occur while serving a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested data source type is not registered.
    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request from the host.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Render this error as a single error diagnostic.
    ///
    /// Hosts that only understand diagnostics use this to surface plumbing
    /// failures alongside condition failures.
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn test_error_display() {
        let err = ProviderError::UnknownDataSource("assert_equal".to_string());
        assert_eq!(format!("{}", err), "Unknown data source type: assert_equal");

        let err = ProviderError::Validation("invalid input".to_string());
        assert_eq!(format!("{}", err), "Validation error: invalid input");

        let err = ProviderError::InvalidRequest("bad request".to_string());
        assert_eq!(format!("{}", err), "Invalid request: bad request");
    }

    #[test]
    fn test_serialization_from_serde() {
        let serde_err = serde_json::from_str::<bool>("not json").unwrap_err();
        let err: ProviderError = serde_err.into();
        assert!(matches!(err, ProviderError::Serialization(_)));
        assert!(format!("{}", err).starts_with("Serialization error:"));
    }

    #[test]
    fn test_into_diagnostic() {
        let diagnostic = ProviderError::UnknownDataSource("nope".to_string()).into_diagnostic();
        assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
        assert_eq!(diagnostic.summary, "Unknown data source type: nope");
        assert!(diagnostic.attribute.is_none());
    }
}
