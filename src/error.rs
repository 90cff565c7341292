use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum RenderError {
    #[error("malformed condition: {0}")]
    MalformedCondition(String),
}

impl RenderError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        RenderError::MalformedCondition(msg.into())
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::MalformedCondition(err.to_string())
    }
}
