//! Wire shapes of the dog-image API.

use serde::{Deserialize, Serialize};

pub const SUCCESS_STATUS: &str = "success";

/// Every endpoint answers `{"status": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub message: T,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// `GET /breeds/list/all`: breed name to its sub-breeds, in response order.
pub type BreedListMessage = serde_json::Map<String, serde_json::Value>;

/// `GET /breeds/image/random`.
pub type RandomImageMessage = String;

/// `GET /breed/{breed}/images/random/{count}`.
pub type BreedImagesMessage = Vec<String>;

pub fn breed_list_path() -> &'static str {
    "breeds/list/all"
}

pub fn random_image_path() -> &'static str {
    "breeds/image/random"
}

/// Breeds are a single path segment of ASCII letters, digits and hyphens.
pub fn is_valid_breed_segment(breed: &str) -> bool {
    !breed.is_empty()
        && breed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// `None` when `breed` would not stay inside its own path segment.
pub fn breed_images_path(breed: &str, count: usize) -> Option<String> {
    is_valid_breed_segment(breed).then(|| format!("breed/{breed}/images/random/{count}"))
}
