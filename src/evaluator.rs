//! Condition evaluation.
//!
//! The [`ConditionEvaluator`] turns an ordered set of [`Assertion`]s into an
//! ordered list of [`Diagnostic`]s. A true condition emits nothing. A false
//! condition emits diagnostics according to the assertion's
//! [`MessagePolicy`]:
//!
//! | Policy        | Emits for a false condition                               |
//! |---------------|-----------------------------------------------------------|
//! | `Exclusive`   | one error or one warning, from whichever message is set   |
//! | `Independent` | an error if `error_message` is set, then a warning if `warning_message` is set |
//! | `Severity`    | one diagnostic of the configured severity                 |
//!
//! The evaluator never stops early and never fails. Whether an error
//! diagnostic halts the surrounding read is up to the caller; see
//! [`Evaluation::has_errors`].
//!
//! # Example
//!
//! ```
//! use assert_provider::evaluator::{Assertion, ConditionEvaluator, Message};
//! use assert_provider::id::SequenceIdGenerator;
//! use assert_provider::path::AttributePath;
//!
//! let evaluator = ConditionEvaluator::with_id_generator(SequenceIdGenerator::new("read"));
//! let evaluation = evaluator.evaluate(&[Assertion::exclusive(
//!     false,
//!     Message::Error("test error".to_string()),
//!     AttributePath::root("condition"),
//! )]);
//!
//! assert!(evaluation.has_errors());
//! assert_eq!(evaluation.diagnostics[0].detail.as_deref(), Some("test error"));
//! assert_eq!(evaluation.id, "read-1");
//! ```

use crate::id::{IdGenerator, RandomIdGenerator};
use crate::path::AttributePath;
use crate::schema::{has_errors, Diagnostic, DiagnosticSeverity};
use std::fmt;
use tracing::debug;

/// Summary used for diagnostics from message-based assertions.
pub const UNSATISFIED_CONDITION: &str = "Unsatisfied Condition";

/// The single message of an exclusive assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Report an error with this text.
    Error(String),
    /// Report a warning with this text.
    Warning(String),
}

impl Message {
    fn into_diagnostic(self, location: AttributePath) -> Diagnostic {
        let (severity, text) = match self {
            Self::Error(text) => (DiagnosticSeverity::Error, text),
            Self::Warning(text) => (DiagnosticSeverity::Warning, text),
        };
        Diagnostic::new(severity, UNSATISFIED_CONDITION)
            .with_detail(text)
            .with_attribute(location)
    }
}

/// How a false condition is turned into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePolicy {
    /// Exactly one message, whose kind picks the severity.
    Exclusive(Message),
    /// Two optional messages that fire independently, error first.
    Independent {
        /// Text of the error diagnostic, if any.
        error_message: Option<String>,
        /// Text of the warning diagnostic, if any.
        warning_message: Option<String>,
    },
    /// An explicit severity with a required detail and optional summary.
    Severity {
        /// Severity of the emitted diagnostic.
        severity: DiagnosticSeverity,
        /// Diagnostic summary; empty when unset.
        summary: Option<String>,
        /// Diagnostic detail.
        detail: String,
    },
}

/// One condition together with what to report when it is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// The already-resolved condition.
    pub condition: bool,
    /// The diagnostics to emit when the condition is false.
    pub messages: MessagePolicy,
    /// Where in the config the condition was declared.
    pub location: AttributePath,
}

impl Assertion {
    /// Create an assertion.
    pub fn new(condition: bool, messages: MessagePolicy, location: AttributePath) -> Self {
        Self {
            condition,
            messages,
            location,
        }
    }

    /// Create an assertion with a single error or warning message.
    pub fn exclusive(condition: bool, message: Message, location: AttributePath) -> Self {
        Self::new(condition, MessagePolicy::Exclusive(message), location)
    }

    /// Create an assertion whose error and warning messages fire independently.
    pub fn independent(
        condition: bool,
        error_message: Option<String>,
        warning_message: Option<String>,
        location: AttributePath,
    ) -> Self {
        Self::new(
            condition,
            MessagePolicy::Independent {
                error_message,
                warning_message,
            },
            location,
        )
    }

    /// Create an assertion with an explicit severity.
    pub fn with_severity(
        condition: bool,
        severity: DiagnosticSeverity,
        summary: Option<String>,
        detail: impl Into<String>,
        location: AttributePath,
    ) -> Self {
        Self::new(
            condition,
            MessagePolicy::Severity {
                severity,
                summary,
                detail: detail.into(),
            },
            location,
        )
    }

    fn diagnose(&self, out: &mut Vec<Diagnostic>) {
        if self.condition {
            return;
        }

        match &self.messages {
            MessagePolicy::Exclusive(message) => {
                out.push(message.clone().into_diagnostic(self.location.clone()));
            },
            MessagePolicy::Independent {
                error_message,
                warning_message,
            } => {
                if let Some(text) = error_message {
                    out.push(Message::Error(text.clone()).into_diagnostic(self.location.clone()));
                }
                if let Some(text) = warning_message {
                    out.push(
                        Message::Warning(text.clone()).into_diagnostic(self.location.clone()),
                    );
                }
            },
            MessagePolicy::Severity {
                severity,
                summary,
                detail,
            } => {
                out.push(
                    Diagnostic::new(*severity, summary.clone().unwrap_or_default())
                        .with_detail(detail.clone())
                        .with_attribute(self.location.clone()),
                );
            },
        }
    }
}

/// The outcome of evaluating an assertion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Diagnostics in assertion order.
    pub diagnostics: Vec<Diagnostic>,
    /// Fresh identifier for this evaluation.
    pub id: String,
}

impl Evaluation {
    /// Whether any diagnostic is an error, meaning the read must halt.
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }

    /// Number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_error()).count()
    }
}

/// Evaluates assertion sets and stamps each evaluation with a fresh id.
pub struct ConditionEvaluator {
    ids: Box<dyn IdGenerator>,
}

impl ConditionEvaluator {
    /// Create an evaluator that uses random ids.
    pub fn new() -> Self {
        Self::with_id_generator(RandomIdGenerator)
    }

    /// Create an evaluator with a custom id generator.
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    /// Evaluate every assertion in order and collect the diagnostics.
    pub fn evaluate(&self, assertions: &[Assertion]) -> Evaluation {
        let mut diagnostics = Vec::new();
        for assertion in assertions {
            assertion.diagnose(&mut diagnostics);
        }

        let evaluation = Evaluation {
            diagnostics,
            id: self.ids.next_id(),
        };
        debug!(
            assertions = assertions.len(),
            diagnostics = evaluation.diagnostics.len(),
            has_errors = evaluation.has_errors(),
            "Evaluated assertions"
        );
        evaluation
    }
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionEvaluator").finish_non_exhaustive()
    }
}
