//! Operand values: literals and parameter references.

/// A literal list element: a string or a number. Parameters are not allowed here.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
}

/// An operand in comparison position.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Rendered in double quotes.
    String(String),
    /// Rendered bare, in canonical decimal form.
    Number(f64),
    /// Rendered bare, as the parameter name.
    Param(String),
}

impl Scalar {
    pub fn param(name: impl Into<String>) -> Self {
        Scalar::Param(name.into())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(f64::from(n))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<Literal> for Scalar {
    fn from(l: Literal) -> Self {
        match l {
            Literal::String(s) => Scalar::String(s),
            Literal::Number(n) => Scalar::Number(n),
        }
    }
}
