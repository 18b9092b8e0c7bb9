//! Result and metadata types returned by providers.

use crate::schema::{has_errors, Diagnostic};
use serde::{Deserialize, Serialize};

/// The result of reading a data source.
///
/// A read that produced any error diagnostic has no state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReadDataSourceResult {
    /// The data source state, including its computed `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
    /// Errors and warnings raised while reading.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadDataSourceResult {
    /// A successful read, possibly with warnings.
    pub fn with_state(state: serde_json::Value, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            state: Some(state),
            diagnostics,
        }
    }

    /// A read halted by the given diagnostics.
    pub fn halted(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }

    /// The computed `id` of the read, if it produced state.
    pub fn id(&self) -> Option<&str> {
        self.state.as_ref()?.get("id")?.as_str()
    }
}

/// Provider metadata: its name, version and data source type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// The provider type name, e.g. `assert`.
    pub type_name: String,
    /// The provider version.
    pub version: String,
    /// List of data source type names.
    pub data_sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_state() {
        let result = ReadDataSourceResult::with_state(
            json!({"id": "42", "condition": true}),
            vec![Diagnostic::warning("heads up")],
        );
        assert!(!result.has_errors());
        assert_eq!(result.id(), Some("42"));
    }

    #[test]
    fn test_halted() {
        let result = ReadDataSourceResult::halted(vec![Diagnostic::error("stop")]);
        assert!(result.has_errors());
        assert!(result.state.is_none());
        assert_eq!(result.id(), None);
    }

    #[test]
    fn test_serialization_skips_missing_state() {
        let value = serde_json::to_value(ReadDataSourceResult::halted(vec![])).unwrap();
        assert_eq!(value, json!({"diagnostics": []}));
    }
}
