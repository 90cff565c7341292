//! Single conditions, one variant per category.
//!
//! The category is fixed when a condition is built; the renderer never infers
//! it from shape. Inference from the tagged-tuple form happens once, in
//! [`crate::dsl::condition_from_value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumDiscriminants, EnumString};

use crate::dsl;
use crate::error::RenderError;
use crate::traits::RuleExpr;

use super::field::Field;
use super::operator::{Comparison, SetOperation, TimeUnit};
use super::path::PathSegment;
use super::scalar::{Literal, Scalar};

/// One predicate over a field reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[serde(try_from = "Value", into = "Value")]
#[strum_discriminants(name(ConditionCategory), derive(Display, AsRefStr, EnumString, Hash))]
#[strum_discriminants(strum(serialize_all = "lowercase"))]
pub enum Condition {
    /// The field itself is the boolean expression.
    Boolean(Field),
    Timestamp(Field, TimestampCondition),
    Number(Field, NumberCondition),
    String(Field, StringCondition),
    Geo(Field, GeoCondition),
    Map(Field, MapCondition),
    List(Field, ListCondition),
}

impl Condition {
    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::from(self)
    }

    /// The field the condition is about.
    pub fn field(&self) -> &Field {
        match self {
            Condition::Boolean(field)
            | Condition::Timestamp(field, _)
            | Condition::Number(field, _)
            | Condition::String(field, _)
            | Condition::Geo(field, _)
            | Condition::Map(field, _)
            | Condition::List(field, _) => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimestampCondition {
    /// The timestamp lies less than `amount` units before the request time.
    WithinRequest { unit: TimeUnit, amount: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberCondition {
    Compare { op: Comparison, value: f64 },
    In(Vec<f64>),
    IsInteger,
    IsFloat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringCondition {
    /// Equality only; the operand is a string literal or a parameter.
    Compare { op: Comparison, value: Scalar },
    Size { op: Comparison, value: f64 },
    In(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoTarget {
    LatLng { lat: f64, lng: f64 },
    Field(Field),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoCondition {
    DistanceTo {
        target: GeoTarget,
        op: Comparison,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCondition {
    Size { op: Comparison, value: f64 },
    /// `key` is a literal member name or a parameter.
    Get {
        key: PathSegment,
        op: Comparison,
        value: Scalar,
    },
    Keys { op: SetOperation, keys: Vec<String> },
    Values { op: SetOperation, values: Vec<Literal> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListCondition {
    Size { op: Comparison, value: f64 },
    Get {
        index: usize,
        op: Comparison,
        value: Scalar,
    },
    /// `hasAll`, `hasAny` or `hasOnly` over the list viewed as a set.
    Set { op: SetOperation, values: Vec<Literal> },
}

impl TryFrom<Value> for Condition {
    type Error = RenderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        dsl::condition_from_value(&value)
    }
}

impl From<Condition> for Value {
    fn from(condition: Condition) -> Self {
        dsl::condition_to_value(&condition)
    }
}

impl std::str::FromStr for Condition {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::loader::parse_condition(s)
    }
}

impl RuleExpr for Condition {
    fn to_rule(&self) -> Result<String, RenderError> {
        crate::render::render_condition(self)
    }
}
