//! Assert Provider
//!
//! This crate implements two small providers, `assert` and `check`, whose
//! data sources assert boolean conditions while a plan is computed. A false
//! condition becomes a warning or an error diagnostic; an error halts the
//! read and no state is produced.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - **ConditionEvaluator**: Maps assertions to ordered diagnostics and stamps
//!   each evaluation with a fresh identifier
//! - **Data sources**: `assert` (single condition) and `check` (a list of
//!   `assert` blocks), each with a schema and config validators
//! - **Provider**: A [`ProviderService`] implementation serving those data sources
//! - **Schema & validation**: Attribute shapes and the checks run before a read
//! - **Logging**: Integration with `tracing` for structured logging
//! - **Testing**: A harness and diagnostic assertions for provider tests
//!
//! # Quick Start
//!
//! ```
//! use assert_provider::evaluator::{Assertion, ConditionEvaluator};
//! use assert_provider::path::AttributePath;
//!
//! let evaluator = ConditionEvaluator::new();
//! let evaluation = evaluator.evaluate(&[
//!     Assertion::independent(
//!         false,
//!         None,
//!         Some("only one replica".to_string()),
//!         AttributePath::root("assert").index(0).name("condition"),
//!     ),
//! ]);
//!
//! assert!(!evaluation.has_errors());
//! assert_eq!(evaluation.diagnostics.len(), 1);
//! ```
//!
//! # Read Semantics
//!
//! A data source read validates its config, evaluates its assertions in
//! order, and:
//!
//! - returns the error diagnostics and no state if validation or any
//!   assertion produced an error
//! - otherwise returns the config as state with a freshly generated `id`,
//!   together with any warnings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data_sources;
pub mod error;
pub mod evaluator;
pub mod id;
pub mod logging;
pub mod path;
pub mod provider;
pub mod schema;
pub mod testing;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use data_sources::{AssertDataSource, AssertForm, CheckDataSource, DataSource};
pub use error::ProviderError;
pub use evaluator::{Assertion, ConditionEvaluator, Evaluation, Message, MessagePolicy};
pub use id::{IdGenerator, RandomIdGenerator, SequenceIdGenerator};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use path::AttributePath;
pub use provider::{Provider, ProviderService};
pub use schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
pub use types::{ProviderMetadata, ReadDataSourceResult};
pub use validation::{validate, validate_config, ConfigValidator};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
