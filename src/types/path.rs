//! Path segments and local field paths.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::RenderError;
use crate::traits::RuleExpr;

/// One step of a field or document path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A literal name, e.g. `users`.
    Literal(String),
    /// A name bound by the surrounding rule, e.g. the `uid` in `/users/{uid}`.
    Param(String),
}

impl PathSegment {
    pub fn literal(name: impl Into<String>) -> Self {
        PathSegment::Literal(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        PathSegment::Param(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            PathSegment::Literal(name) | PathSegment::Param(name) => name,
        }
    }

    pub fn is_param(&self) -> bool {
        matches!(self, PathSegment::Param(_))
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::literal(name)
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Literal(name)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PathSegment::Literal(name) => write!(f, "{name}"),
            PathSegment::Param(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// A non-empty, ordered sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Build a path from its segments. An empty path is rejected.
    pub fn new<I, S>(segments: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        let segments: Vec<PathSegment> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(RenderError::malformed("a path needs at least one segment"));
        }
        Ok(FieldPath(segments))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Slash-joined form, with parameters in braces (`users/{uid}`).
impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl RuleExpr for FieldPath {
    fn to_rule(&self) -> Result<String, RenderError> {
        Ok(crate::render::render_field_path(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_field_path_rejects_empty() {
        let result = FieldPath::new(Vec::<PathSegment>::new());
        assert!(matches!(result, Err(RenderError::MalformedCondition(_))));
    }

    #[test]
    fn test_field_path_keeps_order() {
        let path = FieldPath::new(["a", "b", "c"]).unwrap();
        let names: Vec<&str> = path.segments().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
    }

    #[parameterized(
        literal_only = { vec![PathSegment::literal("users"), PathSegment::literal("abc")], "users/abc" },
        with_param = { vec![PathSegment::literal("users"), PathSegment::param("uid")], "users/{uid}" },
        single = { vec![PathSegment::param("doc")], "{doc}" },
    )]
    fn test_field_path_display(segments: Vec<PathSegment>, expected: &str) {
        let path = FieldPath::new(segments).unwrap();
        assert_eq!(path.to_string(), expected);
    }

    #[test]
    fn test_segment_from_str_is_literal() {
        let segment: PathSegment = "name".into();
        assert!(!segment.is_param());
        assert!(PathSegment::param("uid").is_param());
    }

    #[test]
    fn test_field_path_to_rule() {
        let path = FieldPath::new([PathSegment::literal("users"), PathSegment::param("uid")]).unwrap();
        assert_eq!(path.to_rule().unwrap(), ".users[uid]");
    }
}
