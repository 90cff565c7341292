use crate::error::RenderError;

/// Anything that renders to a rule-language expression, e.g. `.users[uid]`,
/// `.map.id.size() < 5` or `(.a == 1) && (.b == 2)`.
pub trait RuleExpr {
    /// The expression text. Fails only for input with no rendering.
    fn to_rule(&self) -> Result<String, RenderError>;
}
