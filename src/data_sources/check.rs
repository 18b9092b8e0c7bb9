//! The `check` data source: a list of `assert` blocks.
//!
//! ```hcl
//! data "check" "cluster" {
//!   assert {
//!     condition     = var.nodes >= 3
//!     error_message = "a cluster needs at least 3 nodes"
//!   }
//!   assert {
//!     condition       = var.nodes % 2 == 1
//!     warning_message = "an even node count cannot break ties"
//!   }
//! }
//! ```
//!
//! Each block may set an error message, a warning message, both, or
//! neither; each set message fires on its own when the block's condition
//! is false.

use super::{DataSource, ERROR_MESSAGE_DESCRIPTION, ID_DESCRIPTION, WARNING_MESSAGE_DESCRIPTION};
use crate::error::ProviderError;
use crate::evaluator::Assertion;
use crate::path::AttributePath;
use crate::schema::{Attribute, Block, NestedBlock, Schema};
use serde::Deserialize;
use serde_json::Value;

const ASSERT_BLOCK: &str = "assert";

/// Checks a list of assertions in one read.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckDataSource;

#[derive(Debug, Deserialize)]
struct CheckModel {
    #[serde(rename = "assert")]
    assertions: Option<Vec<CheckAssertionModel>>,
}

#[derive(Debug, Deserialize)]
struct CheckAssertionModel {
    condition: bool,
    error_message: Option<String>,
    warning_message: Option<String>,
}

impl CheckDataSource {
    /// Create a `check` data source.
    pub fn new() -> Self {
        Self
    }
}

impl DataSource for CheckDataSource {
    fn type_name(&self) -> &str {
        "check"
    }

    fn schema(&self) -> Schema {
        let assertion = Block::new()
            .with_attribute(
                "condition",
                Attribute::required_bool()
                    .with_description("The assertion that is expected to be true."),
            )
            .with_attribute(
                "error_message",
                Attribute::optional_string().with_description(ERROR_MESSAGE_DESCRIPTION),
            )
            .with_attribute(
                "warning_message",
                Attribute::optional_string().with_description(WARNING_MESSAGE_DESCRIPTION),
            );

        Schema::v0()
            .with_description(
                "Checks a list of assertions, reporting a warning or error for each one that is not satisfied.",
            )
            .with_attribute(
                "id",
                Attribute::computed_string().with_description(ID_DESCRIPTION),
            )
            .with_block(ASSERT_BLOCK, NestedBlock::list(assertion))
    }

    fn assertions(&self, config: &Value) -> Result<Vec<Assertion>, ProviderError> {
        let model = CheckModel::deserialize(config)?;
        Ok(model
            .assertions
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, block)| {
                Assertion::independent(
                    block.condition,
                    block.error_message,
                    block.warning_message,
                    AttributePath::root(ASSERT_BLOCK).index(i).name("condition"),
                )
            })
            .collect())
    }
}
