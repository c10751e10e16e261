use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which way a call to the dog-image API went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Request never completed or its body could not be decoded.
    Transport,
    /// The API answered with a non-success status.
    Upstream,
    /// Every request succeeded or failed without producing a usable record.
    EmptyResult,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Upstream => "upstream",
            FailureKind::EmptyResult => "empty_result",
        }
    }
}

/// The single message shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct UserFacingError {
    pub kind: FailureKind,
    pub message: String,
}

impl UserFacingError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
