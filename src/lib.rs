// src/lib.rs
pub use error::RenderError;
pub use loader::{parse_condition, parse_group};
pub use render::{
    render_condition, render_doc_field_path, render_field, render_field_path, render_group,
    render_literal_list,
};
pub use traits::RuleExpr;
pub use types::{
    Comparison, Condition, ConditionCategory, ConditionGroup, Field, FieldPath, GeoCondition,
    GeoTarget, GroupMember, ListCondition, Literal, LogicalOperator, MapCondition,
    NumberCondition, PathSegment, Scalar, SetOperation, StringCondition, TimeUnit,
    TimestampCondition,
};

pub mod dsl;
mod error;
mod loader;
mod render;
mod traits;
pub mod types;
