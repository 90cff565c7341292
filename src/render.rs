//! Rendering of fields, conditions and groups into rule-language text.
//!
//! Output is byte-exact: single spaces around comparison operators, no
//! whitespace inside list literals, dot notation for literal path segments
//! and brackets for parameters.

use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::error::RenderError;
use crate::types::{
    Comparison, Condition, ConditionGroup, Field, FieldPath, GeoCondition, GeoTarget,
    GroupMember, ListCondition, Literal, MapCondition, NumberCondition, PathSegment, Scalar,
    SetOperation, StringCondition, TimestampCondition,
};

const DOCUMENT_FETCH_PREFIX: &str = "get(/databases/$(database)/documents/";
const DOCUMENT_DATA_SUFFIX: &str = ").data";
const REQUEST_TIME_MILLIS: &str = "request.time.toMillis()";

/// Render a local field path, e.g. `.users[uid]`.
pub fn render_field_path(path: &FieldPath) -> String {
    path.segments().iter().map(render_segment).collect()
}

fn render_segment(segment: &PathSegment) -> String {
    match segment {
        PathSegment::Literal(name) => format!(".{name}"),
        PathSegment::Param(name) => format!("[{name}]"),
    }
}

/// Render a list literal, e.g. `[0,1,"abc"]`.
pub fn render_literal_list(items: &[Literal]) -> Result<String, RenderError> {
    let rendered: Vec<String> = items
        .iter()
        .map(render_literal)
        .collect::<Result<_, _>>()?;
    Ok(format!("[{}]", rendered.join(",")))
}

fn render_literal(literal: &Literal) -> Result<String, RenderError> {
    match literal {
        Literal::String(s) => Ok(format!("\"{s}\"")),
        Literal::Number(n) => render_number(*n),
    }
}

fn render_scalar(scalar: &Scalar) -> Result<String, RenderError> {
    match scalar {
        Scalar::String(s) => Ok(format!("\"{s}\"")),
        Scalar::Number(n) => render_number(*n),
        Scalar::Param(name) => Ok(name.clone()),
    }
}

/// Shortest round-trip decimal; integral values carry no fractional part.
fn render_number(n: f64) -> Result<String, RenderError> {
    if !n.is_finite() {
        return Err(RenderError::malformed(format!(
            "number {n} has no rule-language form"
        )));
    }
    if n == 0.0 {
        // Collapses -0.
        return Ok("0".to_string());
    }
    Ok(format!("{n}"))
}

/// Render a field of another document, e.g.
/// `get(/databases/$(database)/documents/users/$(uid)).data.displayName`.
pub fn render_doc_field_path(document: &FieldPath, field: &FieldPath) -> String {
    let path = document
        .segments()
        .iter()
        .map(|segment| match segment {
            PathSegment::Literal(name) => name.clone(),
            PathSegment::Param(name) => format!("$({name})"),
        })
        .join("/");
    format!(
        "{DOCUMENT_FETCH_PREFIX}{path}{DOCUMENT_DATA_SUFFIX}{}",
        render_field_path(field)
    )
}

/// Render any field reference.
pub fn render_field(field: &Field) -> Result<String, RenderError> {
    let rendered = match field {
        Field::Local(path) => render_field_path(path),
        Field::Doc { document, field } => render_doc_field_path(document, field),
        Field::Update(path) => {
            return Err(RenderError::malformed(format!(
                "update-target field '{path}' has no rule-language rendering"
            )));
        }
    };
    trace!(event = "Render", phase = "Field", rule = rendered.as_str());
    Ok(rendered)
}

fn render_comparison(lhs: &str, op: Comparison, rhs: &str) -> String {
    format!("{lhs} {op} {rhs}")
}

/// `.size()` comparison shared by strings, maps and lists.
fn render_size(field: &str, op: Comparison, value: f64) -> Result<String, RenderError> {
    Ok(render_comparison(
        &format!("{field}.size()"),
        op,
        &render_number(value)?,
    ))
}

fn render_set(receiver: &str, op: SetOperation, items: &[Literal]) -> Result<String, RenderError> {
    Ok(format!("{receiver}.{op}({})", render_literal_list(items)?))
}

fn render_in<T>(field: &str, items: &[T]) -> Result<String, RenderError>
where
    T: Clone + Into<Literal>,
{
    let items: Vec<Literal> = items.iter().cloned().map(Into::into).collect();
    Ok(format!("{field} in {}", render_literal_list(&items)?))
}

fn render_timestamp(field: &str, condition: &TimestampCondition) -> Result<String, RenderError> {
    match condition {
        TimestampCondition::WithinRequest { unit, amount } => Ok(format!(
            "({REQUEST_TIME_MILLIS} - {field}.seconds() * 1000) < duration.value({}, \"{}\")",
            render_number(*amount)?,
            unit.duration_code()
        )),
    }
}

fn render_number_condition(field: &str, condition: &NumberCondition) -> Result<String, RenderError> {
    match condition {
        NumberCondition::Compare { op, value } => {
            Ok(render_comparison(field, *op, &render_number(*value)?))
        }
        NumberCondition::In(values) => render_in(field, values),
        NumberCondition::IsInteger => Ok(format!("int({field}) === {field}")),
        NumberCondition::IsFloat => Ok(format!("float({field}) === {field}")),
    }
}

fn render_string_condition(field: &str, condition: &StringCondition) -> Result<String, RenderError> {
    match condition {
        StringCondition::Compare { op, value } => {
            if !op.is_equality() {
                return Err(RenderError::malformed(format!(
                    "string comparison only supports == and !==, found '{op}'"
                )));
            }
            if let Scalar::Number(n) = value {
                return Err(RenderError::malformed(format!(
                    "string comparison against number {n}"
                )));
            }
            Ok(render_comparison(field, *op, &render_scalar(value)?))
        }
        StringCondition::Size { op, value } => render_size(field, *op, *value),
        StringCondition::In(values) => render_in(field, values),
    }
}

fn render_geo_condition(field: &str, condition: &GeoCondition) -> Result<String, RenderError> {
    match condition {
        GeoCondition::DistanceTo { target, op, value } => {
            let target = match target {
                GeoTarget::LatLng { lat, lng } => format!(
                    "latlng.value({}, {})",
                    render_number(*lat)?,
                    render_number(*lng)?
                ),
                GeoTarget::Field(target) => render_field(target)?,
            };
            Ok(render_comparison(
                &format!("{field}.distance({target})"),
                *op,
                &render_number(*value)?,
            ))
        }
    }
}

fn render_map_condition(field: &str, condition: &MapCondition) -> Result<String, RenderError> {
    match condition {
        MapCondition::Size { op, value } => render_size(field, *op, *value),
        MapCondition::Get { key, op, value } => Ok(render_comparison(
            &format!("{field}{}", render_segment(key)),
            *op,
            &render_scalar(value)?,
        )),
        MapCondition::Keys { op, keys } => {
            let keys: Vec<Literal> = keys.iter().cloned().map(Literal::String).collect();
            render_set(&format!("{field}.keys()"), *op, &keys)
        }
        MapCondition::Values { op, values } => {
            render_set(&format!("{field}.values()"), *op, values)
        }
    }
}

fn render_list_condition(field: &str, condition: &ListCondition) -> Result<String, RenderError> {
    match condition {
        ListCondition::Size { op, value } => render_size(field, *op, *value),
        ListCondition::Get { index, op, value } => Ok(render_comparison(
            &format!("{field}[{index}]"),
            *op,
            &render_scalar(value)?,
        )),
        ListCondition::Set { op, values } => render_set(&format!("{field}.set()"), *op, values),
    }
}

fn render_condition_inner(condition: &Condition) -> Result<String, RenderError> {
    let field = render_field(condition.field())?;
    match condition {
        Condition::Boolean(_) => Ok(field),
        Condition::Timestamp(_, c) => render_timestamp(&field, c),
        Condition::Number(_, c) => render_number_condition(&field, c),
        Condition::String(_, c) => render_string_condition(&field, c),
        Condition::Geo(_, c) => render_geo_condition(&field, c),
        Condition::Map(_, c) => render_map_condition(&field, c),
        Condition::List(_, c) => render_list_condition(&field, c),
    }
}

/// Render one condition into a boolean rule expression.
pub fn render_condition(condition: &Condition) -> Result<String, RenderError> {
    let category = condition.category();
    let rendered = render_condition_inner(condition).inspect_err(|e| {
        warn!(
            event = "Render",
            phase = "Condition",
            category = %category,
            error = %e
        );
    })?;
    debug!(
        event = "Render",
        phase = "Condition",
        category = %category,
        rule = rendered.as_str()
    );
    Ok(rendered)
}

/// Render a group: each member in parentheses, joined by the group operator.
pub fn render_group(group: &ConditionGroup) -> Result<String, RenderError> {
    let members: Vec<String> = group
        .conditions()
        .iter()
        .map(|member| -> Result<String, RenderError> {
            let rendered = match member {
                GroupMember::Condition(condition) => render_condition(condition)?,
                GroupMember::Group(nested) => render_group(nested)?,
            };
            Ok(format!("({rendered})"))
        })
        .collect::<Result<_, _>>()?;
    let rendered = members.join(group.operation().separator());
    debug!(
        event = "Render",
        phase = "Group",
        operation = %group.operation(),
        members = group.len(),
        rule = rendered.as_str()
    );
    Ok(rendered)
}

#[cfg(test)]
mod tests;
