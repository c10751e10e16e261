use async_trait::async_trait;

pub mod controller;
pub mod error;
pub mod transport;
pub mod view;

pub use controller::{
    filter_dogs, matches_filter, PendingLoad, ViewerCommand, ViewerController, ViewerOptions,
    DEFAULT_BATCH_SIZE, DEFAULT_BREED_IMAGE_COUNT,
};
pub use error::DogApiError;
pub use transport::{HttpDogApi, DEFAULT_API_BASE_URL};
pub use view::{DogCard, Renderer, Summary, ViewState};

/// The three dog-image API calls the viewer depends on.
#[async_trait]
pub trait DogApi: Send + Sync {
    /// Breed names, in the order the API lists them.
    async fn list_breeds(&self) -> Result<Vec<String>, DogApiError>;
    /// One random image URL.
    async fn random_image(&self) -> Result<String, DogApiError>;
    async fn breed_images(&self, breed: &str, count: usize) -> Result<Vec<String>, DogApiError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
