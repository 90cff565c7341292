//! Operator and unit tokens of the condition language.
//!
//! The string form of each variant (via `Display`, `AsRef<str>` and
//! `FromStr`) is the token used in the tagged-tuple input, which is also the
//! token emitted into the rule text.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Comparison operators, shared by every category that compares values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
pub enum Comparison {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!==")]
    Ne,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">=")]
    Ge,
}

impl Comparison {
    /// `==` and `!==`, the only comparisons string equality accepts.
    pub fn is_equality(&self) -> bool {
        matches!(self, Comparison::Eq | Comparison::Ne)
    }
}

/// Set predicates over a list literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum SetOperation {
    HasAll,
    HasAny,
    HasOnly,
}

/// Time window units for `withinRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// The unit code understood by `duration.value`.
    pub fn duration_code(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }
}

/// How a condition group combines its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
pub enum LogicalOperator {
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
}

impl LogicalOperator {
    /// The separator placed between rendered members.
    pub fn separator(&self) -> &'static str {
        match self {
            LogicalOperator::And => " && ",
            LogicalOperator::Or => " || ",
        }
    }
}
