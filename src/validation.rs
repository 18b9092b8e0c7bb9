//! Config validation helpers.
//!
//! Validation happens in two passes before a data source is read:
//!
//! 1. [`validate`] checks a `serde_json::Value` against a [`Schema`]: required
//!    attributes, attribute types, and the shape of nested blocks.
//! 2. [`ConfigValidator`]s express cross-attribute rules the schema cannot,
//!    such as "exactly one of `error_message` and `warning_message`".
//!
//! [`validate_config`] runs both, skipping the second pass when the first
//! already produced errors.
//!
//! # Example
//!
//! ```
//! use assert_provider::schema::{Attribute, Schema};
//! use assert_provider::validation::{validate_config, ConfigValidator};
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("condition", Attribute::required_bool())
//!     .with_attribute("error_message", Attribute::optional_string())
//!     .with_attribute("warning_message", Attribute::optional_string());
//! let validators = [ConfigValidator::exactly_one_of(["error_message", "warning_message"])];
//!
//! let diagnostics = validate_config(&schema, &validators, &json!({
//!     "condition": true,
//!     "error_message": "boom"
//! }));
//! assert!(diagnostics.is_empty());
//!
//! let diagnostics = validate_config(&schema, &validators, &json!({"condition": true}));
//! assert_eq!(diagnostics[0].summary, "Missing Attribute Configuration");
//! ```

use crate::path::AttributePath;
use crate::schema::{has_errors, Attribute, AttributeType, Block, Diagnostic, NestedBlock, Schema};
use serde_json::Value;

/// Validate a JSON value against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Optional attributes may be absent or null
/// - Computed attributes are skipped (provider sets these)
/// - Attribute types must match the schema
/// - Nested blocks must be lists of objects and are validated recursively
/// - A null root config is accepted; a null list item is not
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_block(&schema.block, value, &AttributePath::empty(), &mut diagnostics);
    diagnostics
}

/// Validate a config against its schema and then its config validators.
///
/// Config validators only run when the schema pass found no errors, so a
/// mistyped attribute is reported once rather than once per rule.
pub fn validate_config(
    schema: &Schema,
    validators: &[ConfigValidator],
    config: &Value,
) -> Vec<Diagnostic> {
    let mut diagnostics = validate(schema, config);
    if has_errors(&diagnostics) {
        return diagnostics;
    }
    for validator in validators {
        diagnostics.extend(validator.validate(config));
    }
    diagnostics
}

/// A cross-attribute rule applied to a whole config object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidator {
    /// Exactly one of the named root attributes must be set (non-null).
    ExactlyOneOf(Vec<String>),
    /// If set, the named root string attribute must equal one of the values.
    OneOf {
        /// The attribute to check.
        attribute: String,
        /// The accepted values.
        values: Vec<String>,
    },
}

impl ConfigValidator {
    /// Require exactly one of the given attributes.
    pub fn exactly_one_of<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ExactlyOneOf(attributes.into_iter().map(Into::into).collect())
    }

    /// Restrict a string attribute to a fixed set of values.
    pub fn one_of<I, S>(attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            attribute: attribute.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Apply this rule to a config object.
    pub fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        match self {
            Self::ExactlyOneOf(attributes) => validate_exactly_one_of(attributes, config),
            Self::OneOf { attribute, values } => validate_one_of(attribute, values, config),
        }
    }
}

fn validate_exactly_one_of(attributes: &[String], config: &Value) -> Vec<Diagnostic> {
    let configured: Vec<&String> = attributes
        .iter()
        .filter(|name| !matches!(config.get(name.as_str()), None | Some(Value::Null)))
        .collect();

    let detail = format!(
        "Exactly one of these attributes must be configured: [{}]",
        attributes.join(",")
    );

    match configured.len() {
        1 => Vec::new(),
        0 => vec![Diagnostic::error("Missing Attribute Configuration").with_detail(detail)],
        n => vec![Diagnostic::error("Invalid Attribute Combination")
            .with_detail(format!(
                "{} attributes specified when one (and only one) of [{}] is required",
                n,
                attributes.join(",")
            ))
            .with_attribute(AttributePath::root(configured[0].as_str()))],
    }
}

fn validate_one_of(attribute: &str, values: &[String], config: &Value) -> Vec<Diagnostic> {
    let got = match config.get(attribute) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::String(s)) => s,
        // The schema pass reports non-string values.
        Some(_) => return Vec::new(),
    };

    if values.iter().any(|v| v == got) {
        return Vec::new();
    }

    let accepted = values
        .iter()
        .map(|v| format!("{:?}", v))
        .collect::<Vec<_>>()
        .join(", ");
    vec![Diagnostic::error("Invalid Attribute Value Match")
        .with_detail(format!(
            "Attribute {} value must be one of: [{}], got: {:?}",
            attribute, accepted, got
        ))
        .with_attribute(AttributePath::root(attribute))]
}

fn validate_block(
    block: &Block,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let obj = match value {
        Value::Object(map) => map,
        Value::Null if path.is_empty() => return,
        _ => {
            let diagnostic = Diagnostic::error("Expected object")
                .with_detail(format!("Got {}", value_type_name(value)));
            diagnostics.push(if path.is_empty() {
                diagnostic
            } else {
                diagnostic.with_attribute(path.clone())
            });
            return;
        },
    };

    for (name, attr) in &block.attributes {
        let attr_path = path.clone().name(name.as_str());
        validate_attribute(attr, obj.get(name), &attr_path, diagnostics);
    }

    for (name, nested_block) in &block.blocks {
        let block_path = path.clone().name(name.as_str());
        validate_nested_block(nested_block, obj.get(name), &block_path, diagnostics);
    }
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &AttributePath,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // Computed-only attributes are set by the provider.
    if attr.flags.computed && !attr.flags.optional && !attr.flags.required {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path.clone()),
                );
            }
        },
        Some(v) => validate_attribute_type(&attr.attr_type, v, path, diagnostics),
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if !value.is_string() {
                diagnostics.push(type_error(path, "string", value));
            }
        },
        AttributeType::Bool => {
            if !value.is_boolean() {
                diagnostics.push(type_error(path, "bool", value));
            }
        },
    }
}

fn validate_nested_block(
    nested: &NestedBlock,
    value: Option<&Value>,
    path: &AttributePath,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        None | Some(Value::Null) => {},
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let item_path = path.clone().index(i);
                validate_block(&nested.block, item, &item_path, diagnostics);
            }
        },
        Some(v) => {
            diagnostics.push(
                Diagnostic::error(format!("Expected list for block '{}'", path))
                    .with_detail(format!("Got {}", value_type_name(v)))
                    .with_attribute(path.clone()),
            );
        },
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(path: &AttributePath, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!(
            "Expected {}, got {}",
            expected,
            value_type_name(got)
        ))
        .with_attribute(path.clone())
}
