use serde_json::Value;
use tracing::debug;

use crate::dsl;
use crate::error::RenderError;
use crate::types::{Condition, ConditionGroup};

/// Parse a condition group from its JSON text.
///
/// JSON syntax errors and shape errors are both reported as
/// `RenderError::MalformedCondition`.
///
/// Example:
/// ```rust
/// use fireguard_core::{parse_group, RuleExpr};
/// let text = r#"{
///     "operation": "&&",
///     "conditions": [
///         [["field", ["age"]], ">=", 18],
///         [["field", ["name"]], "size", "<", 64]
///     ]
/// }"#;
/// let group = parse_group(text).unwrap();
/// assert_eq!(group.to_rule().unwrap(), "(.age >= 18) && (.name.size() < 64)");
/// ```
pub fn parse_group(text: &str) -> Result<ConditionGroup, RenderError> {
    let value: Value = serde_json::from_str(text)?;
    let group = dsl::group_from_value(&value)?;
    debug!(
        event = "Load",
        phase = "Group",
        operation = %group.operation(),
        members = group.len(),
        depth = group.depth()
    );
    Ok(group)
}

/// Parse a single condition from its JSON text.
pub fn parse_condition(text: &str) -> Result<Condition, RenderError> {
    let value: Value = serde_json::from_str(text)?;
    dsl::condition_from_value(&value)
}
