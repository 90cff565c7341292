//! Tagged-tuple form of the condition language.
//!
//! Condition descriptions arrive from the rules-authoring layer as JSON
//! arrays whose leading elements tag their shape:
//!
//! - Segment: `"name"` or `["param", "name"]`
//! - Field: `["field", [seg, ...]]`, `["doc", [seg, ...], ["field", [seg, ...]]]`
//!   or `["updateField", [seg, ...]]`
//! - Condition: a bare field (boolean), or `[field, token, operands...]`
//! - Group: `{"operation": "&&" | "||", "conditions": [member, ...]}`, where a
//!   member is a condition or a nested group
//!
//! Shapes shared between categories resolve in declaration order: `size`
//! is a string condition, a numeric comparison operand makes a number
//! condition, `in` over numbers is numeric and over strings is textual, and
//! `get` with a numeric index addresses a list while a name or parameter
//! addresses a map.

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::error::RenderError;
use crate::types::{
    Comparison, Condition, ConditionGroup, Field, FieldPath, GeoCondition, GeoTarget,
    GroupMember, ListCondition, Literal, LogicalOperator, MapCondition, NumberCondition,
    PathSegment, Scalar, SetOperation, StringCondition, TimeUnit, TimestampCondition,
};

const FIELD_TAG: &str = "field";
const DOC_TAG: &str = "doc";
const UPDATE_FIELD_TAG: &str = "updateField";
const PARAM_TAG: &str = "param";
const LATLNG_TAG: &str = "latlng";
const OPERATION_KEY: &str = "operation";
const CONDITIONS_KEY: &str = "conditions";

fn malformed(what: &str, value: &Value) -> RenderError {
    RenderError::malformed(format!("{what}, found {value}"))
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value], RenderError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(&format!("expected {what}"), value))
}

fn as_number(value: &Value) -> Result<f64, RenderError> {
    value
        .as_f64()
        .ok_or_else(|| malformed("expected a number", value))
}

fn as_token<'a>(value: &'a Value) -> Result<&'a str, RenderError> {
    value
        .as_str()
        .ok_or_else(|| malformed("expected an operator token", value))
}

fn parse_token<T: FromStr>(value: &Value, what: &str) -> Result<T, RenderError> {
    as_token(value)?
        .parse()
        .map_err(|_| malformed(&format!("expected {what}"), value))
}

fn comparison(value: &Value) -> Result<Comparison, RenderError> {
    parse_token(value, "a comparison operator (==, !==, <, >, <=, >=)")
}

fn set_operation(value: &Value) -> Result<SetOperation, RenderError> {
    parse_token(value, "a set operation (hasAll, hasAny, hasOnly)")
}

fn param_name(value: &Value) -> Option<&str> {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::String(tag), Value::String(name)]) if tag == PARAM_TAG => Some(name.as_str()),
        _ => None,
    }
}

fn segment_from_value(value: &Value) -> Result<PathSegment, RenderError> {
    if let Value::String(name) = value {
        return Ok(PathSegment::literal(name.as_str()));
    }
    param_name(value)
        .map(PathSegment::param)
        .ok_or_else(|| malformed("expected a path segment or [\"param\", name]", value))
}

fn path_from_value(value: &Value) -> Result<FieldPath, RenderError> {
    let segments = as_array(value, "a list of path segments")?
        .iter()
        .map(segment_from_value)
        .collect::<Result<Vec<_>, _>>()?;
    FieldPath::new(segments)
}

fn local_path_from_value(value: &Value) -> Result<FieldPath, RenderError> {
    match as_array(value, "a [\"field\", path] reference")? {
        [Value::String(tag), path] if tag == FIELD_TAG => path_from_value(path),
        _ => Err(malformed("expected a [\"field\", path] reference", value)),
    }
}

fn scalar_from_value(value: &Value) -> Result<Scalar, RenderError> {
    match value {
        Value::String(s) => Ok(Scalar::String(s.clone())),
        Value::Number(_) => Ok(Scalar::Number(as_number(value)?)),
        _ => param_name(value)
            .map(Scalar::param)
            .ok_or_else(|| malformed("expected a string, number or [\"param\", name]", value)),
    }
}

fn literal_from_value(value: &Value) -> Result<Literal, RenderError> {
    match value {
        Value::String(s) => Ok(Literal::String(s.clone())),
        Value::Number(_) => Ok(Literal::Number(as_number(value)?)),
        _ => Err(malformed("expected a string or number literal", value)),
    }
}

fn literals_from_value(value: &Value) -> Result<Vec<Literal>, RenderError> {
    as_array(value, "a list of literals")?
        .iter()
        .map(literal_from_value)
        .collect()
}

fn strings_from_value(value: &Value) -> Result<Vec<String>, RenderError> {
    as_array(value, "a list of strings")?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| malformed("expected a string", item))
        })
        .collect()
}

/// True when `value` is tagged like a field reference.
pub fn is_field(value: &Value) -> bool {
    matches!(
        value.as_array().and_then(|items| items.first()).and_then(Value::as_str),
        Some(FIELD_TAG | DOC_TAG | UPDATE_FIELD_TAG)
    )
}

/// Read a field reference.
pub fn field_from_value(value: &Value) -> Result<Field, RenderError> {
    match as_array(value, "a field reference")? {
        [Value::String(tag), path] if tag == FIELD_TAG => Ok(Field::Local(path_from_value(path)?)),
        [Value::String(tag), document, field] if tag == DOC_TAG => Ok(Field::Doc {
            document: path_from_value(document)?,
            field: local_path_from_value(field)?,
        }),
        [Value::String(tag), path] if tag == UPDATE_FIELD_TAG => {
            Ok(Field::Update(path_from_value(path)?))
        }
        _ => Err(malformed(
            "expected [\"field\", path], [\"doc\", path, field] or [\"updateField\", path]",
            value,
        )),
    }
}

fn geo_target_from_value(value: &Value) -> Result<GeoTarget, RenderError> {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::String(tag), lat, lng]) if tag == LATLNG_TAG => Ok(GeoTarget::LatLng {
            lat: as_number(lat)?,
            lng: as_number(lng)?,
        }),
        _ if is_field(value) => Ok(GeoTarget::Field(field_from_value(value)?)),
        _ => Err(malformed(
            "expected [\"latlng\", lat, lng] or a field reference",
            value,
        )),
    }
}

fn list_index(value: &Value) -> Result<usize, RenderError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| malformed("expected a non-negative list index", value))
}

/// Read a single condition, assigning its category from its shape.
pub fn condition_from_value(value: &Value) -> Result<Condition, RenderError> {
    let items = as_array(value, "a condition")?;
    if is_field(value) {
        return Ok(Condition::Boolean(field_from_value(value)?));
    }
    let (field, rest) = match items {
        [field, rest @ ..] if !rest.is_empty() => (field_from_value(field)?, rest),
        _ => return Err(malformed("expected [field, token, operands...]", value)),
    };
    let token = as_token(&rest[0])?;

    let condition = match (token, &rest[1..]) {
        ("withinRequest", [unit, amount]) => Condition::Timestamp(
            field,
            TimestampCondition::WithinRequest {
                unit: parse_token::<TimeUnit>(unit, "a time unit (seconds, minutes, hours, days)")?,
                amount: as_number(amount)?,
            },
        ),
        ("isInteger", []) => Condition::Number(field, NumberCondition::IsInteger),
        ("isFloat", []) => Condition::Number(field, NumberCondition::IsFloat),
        ("in", [list]) => in_condition(field, list)?,
        ("size", [op, n]) => Condition::String(
            field,
            StringCondition::Size {
                op: comparison(op)?,
                value: as_number(n)?,
            },
        ),
        ("distanceTo", [target, op, n]) => Condition::Geo(
            field,
            GeoCondition::DistanceTo {
                target: geo_target_from_value(target)?,
                op: comparison(op)?,
                value: as_number(n)?,
            },
        ),
        ("get", [key, op, operand]) => {
            let op = comparison(op)?;
            let value = scalar_from_value(operand)?;
            if key.is_number() {
                Condition::List(
                    field,
                    ListCondition::Get {
                        index: list_index(key)?,
                        op,
                        value,
                    },
                )
            } else {
                Condition::Map(
                    field,
                    MapCondition::Get {
                        key: segment_from_value(key)?,
                        op,
                        value,
                    },
                )
            }
        }
        ("keys", [op, list]) => Condition::Map(
            field,
            MapCondition::Keys {
                op: set_operation(op)?,
                keys: strings_from_value(list)?,
            },
        ),
        ("values", [op, list]) => Condition::Map(
            field,
            MapCondition::Values {
                op: set_operation(op)?,
                values: literals_from_value(list)?,
            },
        ),
        ("diff", _) => {
            return Err(malformed("map diff conditions are not supported", value));
        }
        (token, [list]) if SetOperation::from_str(token).is_ok() => Condition::List(
            field,
            ListCondition::Set {
                op: set_operation(&rest[0])?,
                values: literals_from_value(list)?,
            },
        ),
        (token, [operand]) if Comparison::from_str(token).is_ok() => {
            comparison_condition(field, comparison(&rest[0])?, operand)?
        }
        _ => {
            return Err(malformed(
                &format!("unrecognized condition shape for token '{token}'"),
                value,
            ));
        }
    };
    Ok(condition)
}

fn in_condition(field: Field, list: &Value) -> Result<Condition, RenderError> {
    let items = as_array(list, "a list for 'in'")?;
    if items.iter().all(Value::is_number) {
        let values = items.iter().map(as_number).collect::<Result<_, _>>()?;
        return Ok(Condition::Number(field, NumberCondition::In(values)));
    }
    if items.iter().all(Value::is_string) {
        return Ok(Condition::String(
            field,
            StringCondition::In(strings_from_value(list)?),
        ));
    }
    Err(malformed(
        "expected 'in' over all numbers or all strings",
        list,
    ))
}

fn comparison_condition(field: Field, op: Comparison, operand: &Value) -> Result<Condition, RenderError> {
    match scalar_from_value(operand)? {
        Scalar::Number(value) => Ok(Condition::Number(
            field,
            NumberCondition::Compare { op, value },
        )),
        value if op.is_equality() => Ok(Condition::String(
            field,
            StringCondition::Compare { op, value },
        )),
        _ => Err(malformed(
            &format!("'{op}' compares numbers only"),
            operand,
        )),
    }
}

/// Read a condition group, including nested groups.
pub fn group_from_value(value: &Value) -> Result<ConditionGroup, RenderError> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("expected a condition group object", value))?;
    if let Some(key) = object
        .keys()
        .find(|key| *key != OPERATION_KEY && *key != CONDITIONS_KEY)
    {
        return Err(malformed(&format!("unexpected group key '{key}'"), value));
    }
    let operation = object
        .get(OPERATION_KEY)
        .ok_or_else(|| malformed("missing group 'operation'", value))
        .and_then(|op| parse_token::<LogicalOperator>(op, "&& or ||"))?;
    let members = object
        .get(CONDITIONS_KEY)
        .ok_or_else(|| malformed("missing group 'conditions'", value))
        .and_then(|list| as_array(list, "a list of conditions"))?
        .iter()
        .map(|member| {
            if member.is_object() {
                group_from_value(member).map(GroupMember::Group)
            } else {
                condition_from_value(member).map(GroupMember::Condition)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    ConditionGroup::new(operation, members)
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

fn segment_value(segment: &PathSegment) -> Value {
    match segment {
        PathSegment::Literal(name) => json!(name),
        PathSegment::Param(name) => json!([PARAM_TAG, name]),
    }
}

fn path_value(path: &FieldPath) -> Value {
    Value::Array(path.segments().iter().map(segment_value).collect())
}

fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::String(s) => json!(s),
        Scalar::Number(n) => number_value(*n),
        Scalar::Param(name) => json!([PARAM_TAG, name]),
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => json!(s),
        Literal::Number(n) => number_value(*n),
    }
}

fn literals_value(literals: &[Literal]) -> Value {
    Value::Array(literals.iter().map(literal_value).collect())
}

/// Write a field reference in tuple form.
pub fn field_to_value(field: &Field) -> Value {
    match field {
        Field::Local(path) => json!([FIELD_TAG, path_value(path)]),
        Field::Doc { document, field } => json!([
            DOC_TAG,
            path_value(document),
            [FIELD_TAG, path_value(field)]
        ]),
        Field::Update(path) => json!([UPDATE_FIELD_TAG, path_value(path)]),
    }
}

/// Write a condition in tuple form.
pub fn condition_to_value(condition: &Condition) -> Value {
    let field = field_to_value(condition.field());
    let tail: Vec<Value> = match condition {
        Condition::Boolean(_) => return field,
        Condition::Timestamp(_, TimestampCondition::WithinRequest { unit, amount }) => {
            vec![json!("withinRequest"), json!(unit.to_string()), number_value(*amount)]
        }
        Condition::Number(_, c) => match c {
            NumberCondition::Compare { op, value } => vec![json!(op.to_string()), number_value(*value)],
            NumberCondition::In(values) => vec![
                json!("in"),
                Value::Array(values.iter().copied().map(number_value).collect()),
            ],
            NumberCondition::IsInteger => vec![json!("isInteger")],
            NumberCondition::IsFloat => vec![json!("isFloat")],
        },
        Condition::String(_, c) => match c {
            StringCondition::Compare { op, value } => vec![json!(op.to_string()), scalar_value(value)],
            StringCondition::Size { op, value } => {
                vec![json!("size"), json!(op.to_string()), number_value(*value)]
            }
            StringCondition::In(values) => vec![json!("in"), json!(values)],
        },
        Condition::Geo(_, GeoCondition::DistanceTo { target, op, value }) => {
            let target = match target {
                GeoTarget::LatLng { lat, lng } => {
                    json!([LATLNG_TAG, number_value(*lat), number_value(*lng)])
                }
                GeoTarget::Field(target) => field_to_value(target),
            };
            vec![json!("distanceTo"), target, json!(op.to_string()), number_value(*value)]
        }
        Condition::Map(_, c) => match c {
            MapCondition::Size { op, value } => {
                vec![json!("size"), json!(op.to_string()), number_value(*value)]
            }
            MapCondition::Get { key, op, value } => vec![
                json!("get"),
                segment_value(key),
                json!(op.to_string()),
                scalar_value(value),
            ],
            MapCondition::Keys { op, keys } => vec![json!("keys"), json!(op.to_string()), json!(keys)],
            MapCondition::Values { op, values } => {
                vec![json!("values"), json!(op.to_string()), literals_value(values)]
            }
        },
        Condition::List(_, c) => match c {
            ListCondition::Size { op, value } => {
                vec![json!("size"), json!(op.to_string()), number_value(*value)]
            }
            ListCondition::Get { index, op, value } => vec![
                json!("get"),
                json!(index),
                json!(op.to_string()),
                scalar_value(value),
            ],
            ListCondition::Set { op, values } => vec![json!(op.to_string()), literals_value(values)],
        },
    };
    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(field);
    items.extend(tail);
    Value::Array(items)
}

/// Write a condition group in object form.
pub fn group_to_value(group: &ConditionGroup) -> Value {
    let conditions: Vec<Value> = group
        .conditions()
        .iter()
        .map(|member| match member {
            GroupMember::Condition(condition) => condition_to_value(condition),
            GroupMember::Group(nested) => group_to_value(nested),
        })
        .collect();
    let mut object = Map::new();
    object.insert(OPERATION_KEY.to_string(), json!(group.operation().to_string()));
    object.insert(CONDITIONS_KEY.to_string(), Value::Array(conditions));
    Value::Object(object)
}
