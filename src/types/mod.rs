//! Data model for the condition description language.
//!
//! Every value here is an immutable description consumed top-down by the
//! renderer in [`crate::render`]:
//! - Paths: [`PathSegment`] and [`FieldPath`], e.g. `map.id` or `users[uid]`
//! - Field references: [`Field`] (local, cross-document, update-target)
//! - Operands: [`Scalar`] (string, number, parameter) and [`Literal`]
//! - Conditions: [`Condition`], one variant per category
//! - Groups: [`ConditionGroup`], an AND/OR combination of conditions
//!
//! Field, condition and group values (de)serialize in the tagged-tuple form
//! described in [`crate::dsl`].

mod condition;
mod field;
mod group;
mod operator;
mod path;
mod scalar;

pub use condition::{
    Condition, ConditionCategory, GeoCondition, GeoTarget, ListCondition, MapCondition,
    NumberCondition, StringCondition, TimestampCondition,
};
pub use field::Field;
pub use group::{ConditionGroup, GroupMember};
pub use operator::{Comparison, LogicalOperator, SetOperation, TimeUnit};
pub use path::{FieldPath, PathSegment};
pub use scalar::{Literal, Scalar};
