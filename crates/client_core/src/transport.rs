//! reqwest-backed client for the dog-image API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::protocol::{
    breed_images_path, breed_list_path, random_image_path, ApiEnvelope, BreedImagesMessage,
    BreedListMessage, RandomImageMessage,
};
use tracing::debug;
use url::Url;

use crate::{error::DogApiError, DogApi};

pub const DEFAULT_API_BASE_URL: &str = "https://dog.ceo/api";

pub struct HttpDogApi {
    http: Client,
    base_url: Url,
}

impl HttpDogApi {
    pub fn new(base_url: &str) -> Result<Self, DogApiError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, DogApiError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_message<T: DeserializeOwned>(&self, path: &str) -> Result<T, DogApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| DogApiError::InvalidBaseUrl(format!("{}{path}", self.base_url)))?;
        let endpoint = url.to_string();
        debug!(%endpoint, "requesting dog api");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| DogApiError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        let status = res.status();
        let body = res.bytes().await.map_err(|source| DogApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        // Unknown breeds come back as a JSON error envelope with a 404, so the
        // body is decoded before the http status is looked at.
        let envelope: ApiEnvelope<Value> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(DogApiError::HttpStatus { endpoint, status });
            }
            Err(source) => return Err(DogApiError::Decode { endpoint, source }),
        };

        if !envelope.is_success() {
            let detail = match envelope.message {
                Value::String(text) => text,
                other => other.to_string(),
            };
            return Err(DogApiError::Upstream {
                endpoint,
                status: envelope.status,
                detail,
            });
        }

        serde_json::from_value(envelope.message)
            .map_err(|source| DogApiError::Decode { endpoint, source })
    }
}

/// Accepts the base with or without a trailing slash; relative joins need one.
pub fn parse_base_url(raw: &str) -> Result<Url, DogApiError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    match Url::parse(&normalized) {
        Ok(url) if !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(DogApiError::InvalidBaseUrl(raw.to_string())),
    }
}

#[async_trait]
impl DogApi for HttpDogApi {
    async fn list_breeds(&self) -> Result<Vec<String>, DogApiError> {
        let breeds: BreedListMessage = self.get_message(breed_list_path()).await?;
        Ok(breeds.into_iter().map(|(breed, _)| breed).collect())
    }

    async fn random_image(&self) -> Result<String, DogApiError> {
        let url: RandomImageMessage = self.get_message(random_image_path()).await?;
        Ok(url)
    }

    async fn breed_images(&self, breed: &str, count: usize) -> Result<Vec<String>, DogApiError> {
        let path = breed_images_path(breed, count)
            .ok_or_else(|| DogApiError::InvalidBreed(breed.to_string()))?;
        let urls: BreedImagesMessage = self.get_message(&path).await?;
        Ok(urls)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
