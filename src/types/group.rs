//! Condition groups.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dsl;
use crate::error::RenderError;
use crate::traits::RuleExpr;

use super::condition::Condition;
use super::operator::LogicalOperator;

/// A member of a group: a single condition or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupMember {
    Condition(Condition),
    Group(ConditionGroup),
}

impl From<Condition> for GroupMember {
    fn from(condition: Condition) -> Self {
        GroupMember::Condition(condition)
    }
}

impl From<ConditionGroup> for GroupMember {
    fn from(group: ConditionGroup) -> Self {
        GroupMember::Group(group)
    }
}

impl RuleExpr for GroupMember {
    fn to_rule(&self) -> Result<String, RenderError> {
        match self {
            GroupMember::Condition(condition) => condition.to_rule(),
            GroupMember::Group(group) => group.to_rule(),
        }
    }
}

/// An ordered, non-empty list of members combined under one logical operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ConditionGroup {
    operation: LogicalOperator,
    conditions: Vec<GroupMember>,
}

impl ConditionGroup {
    /// Build a group. A group must combine at least one member.
    pub fn new<I, M>(operation: LogicalOperator, conditions: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = M>,
        M: Into<GroupMember>,
    {
        let conditions: Vec<GroupMember> = conditions.into_iter().map(Into::into).collect();
        if conditions.is_empty() {
            return Err(RenderError::malformed(
                "a condition group needs at least one condition",
            ));
        }
        Ok(Self {
            operation,
            conditions,
        })
    }

    /// Shorthand for an `&&` group.
    pub fn all<I, M>(conditions: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = M>,
        M: Into<GroupMember>,
    {
        Self::new(LogicalOperator::And, conditions)
    }

    /// Shorthand for an `||` group.
    pub fn any<I, M>(conditions: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = M>,
        M: Into<GroupMember>,
    {
        Self::new(LogicalOperator::Or, conditions)
    }

    pub fn operation(&self) -> LogicalOperator {
        self.operation
    }

    pub fn conditions(&self) -> &[GroupMember] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Always false for a constructed group.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Nesting depth; a flat group has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .conditions
            .iter()
            .map(|member| match member {
                GroupMember::Condition(_) => 0,
                GroupMember::Group(group) => group.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

impl TryFrom<Value> for ConditionGroup {
    type Error = RenderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        dsl::group_from_value(&value)
    }
}

impl From<ConditionGroup> for Value {
    fn from(group: ConditionGroup) -> Self {
        dsl::group_to_value(&group)
    }
}

impl FromStr for ConditionGroup {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::loader::parse_group(s)
    }
}

impl RuleExpr for ConditionGroup {
    fn to_rule(&self) -> Result<String, RenderError> {
        crate::render::render_group(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, NumberCondition};

    fn is_integer(name: &str) -> Condition {
        Condition::Number(Field::local([name]).unwrap(), NumberCondition::IsInteger)
    }

    #[test]
    fn test_group_rejects_empty() {
        let result = ConditionGroup::all(Vec::<Condition>::new());
        assert!(matches!(result, Err(RenderError::MalformedCondition(_))));
    }

    #[test]
    fn test_group_shorthands() {
        let all = ConditionGroup::all([is_integer("a")]).unwrap();
        let any = ConditionGroup::any([is_integer("a"), is_integer("b")]).unwrap();
        assert_eq!(all.operation(), LogicalOperator::And);
        assert_eq!(any.operation(), LogicalOperator::Or);
        assert_eq!(any.len(), 2);
        assert!(!any.is_empty());
    }

    #[test]
    fn test_group_depth() {
        let inner = ConditionGroup::any([is_integer("a"), is_integer("b")]).unwrap();
        assert_eq!(inner.depth(), 1);
        let outer = ConditionGroup::all([
            GroupMember::from(is_integer("c")),
            GroupMember::from(inner),
        ])
        .unwrap();
        assert_eq!(outer.depth(), 2);
    }
}
