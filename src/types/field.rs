//! Field references.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dsl;
use crate::error::RenderError;
use crate::traits::RuleExpr;

use super::path::FieldPath;

/// A typed pointer to a location in the evaluated document or in another one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Field {
    /// A location in the document being evaluated.
    Local(FieldPath),
    /// A location in another document, addressed by its collection/document path.
    Doc { document: FieldPath, field: FieldPath },
    /// A location in a pending write's resulting state. Not renderable.
    Update(FieldPath),
}

impl Field {
    /// Build a local field from literal or parameter segments.
    pub fn local<I, S>(segments: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<super::PathSegment>,
    {
        Ok(Field::Local(FieldPath::new(segments)?))
    }

    /// Build a cross-document field.
    pub fn doc(document: FieldPath, field: FieldPath) -> Self {
        Field::Doc { document, field }
    }
}

impl TryFrom<Value> for Field {
    type Error = RenderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        dsl::field_from_value(&value)
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        dsl::field_to_value(&field)
    }
}

impl RuleExpr for Field {
    fn to_rule(&self) -> Result<String, RenderError> {
        crate::render::render_field(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathSegment;
    use serde_json::json;

    #[test]
    fn test_field_deserializes_from_tuple() {
        let field: Field = serde_json::from_value(json!(["field", ["users", ["param", "uid"]]])).unwrap();
        assert_eq!(
            field,
            Field::local([PathSegment::literal("users"), PathSegment::param("uid")]).unwrap()
        );
    }

    #[test]
    fn test_field_serializes_to_tuple() {
        let field = Field::doc(
            FieldPath::new(["users", "abc"]).unwrap(),
            FieldPath::new(["displayName"]).unwrap(),
        );
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value, json!(["doc", ["users", "abc"], ["field", ["displayName"]]]));
    }

    #[test]
    fn test_field_rejects_unknown_tag() {
        let result: Result<Field, _> = serde_json::from_value(json!(["column", ["a"]]));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_field_is_not_renderable() {
        let field: Field = serde_json::from_value(json!(["updateField", ["count"]])).unwrap();
        assert!(matches!(field, Field::Update(_)));
        assert!(matches!(field.to_rule(), Err(RenderError::MalformedCondition(_))));
    }
}
