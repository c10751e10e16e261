use reqwest::StatusCode;
use shared::error::FailureKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DogApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} answered http {status}")]
    HttpStatus { endpoint: String, status: StatusCode },
    #[error("{endpoint} reported status '{status}': {detail}")]
    Upstream {
        endpoint: String,
        status: String,
        detail: String,
    },
    #[error("none of {requested} random image requests produced a dog")]
    EmptyBatch { requested: usize },
    #[error("invalid api base url '{0}'")]
    InvalidBaseUrl(String),
    #[error("'{0}' is not a breed name")]
    InvalidBreed(String),
}

impl DogApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DogApiError::Transport { .. }
            | DogApiError::Decode { .. }
            | DogApiError::HttpStatus { .. }
            | DogApiError::InvalidBaseUrl(_)
            | DogApiError::InvalidBreed(_) => FailureKind::Transport,
            DogApiError::Upstream { .. } => FailureKind::Upstream,
            DogApiError::EmptyBatch { .. } => FailureKind::EmptyResult,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            DogApiError::Transport { endpoint, .. }
            | DogApiError::Decode { endpoint, .. }
            | DogApiError::HttpStatus { endpoint, .. }
            | DogApiError::Upstream { endpoint, .. } => Some(endpoint),
            DogApiError::EmptyBatch { .. }
            | DogApiError::InvalidBaseUrl(_)
            | DogApiError::InvalidBreed(_) => None,
        }
    }
}
