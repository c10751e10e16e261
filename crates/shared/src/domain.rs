use chrono::Utc;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(DogId);

impl DogId {
    /// Id of the `index`-th dog in a batch created at `stamp_millis`.
    pub fn batch(stamp_millis: i64, index: usize) -> Self {
        Self(stamp_millis + index as i64)
    }

    pub fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }
}

pub const ALL_BREEDS_LABEL: &str = "All Breeds";
pub const UNKNOWN_BREED: &str = "unknown";

/// Index of the breed segment in `https://images.dog.ceo/breeds/<breed>/<file>`
/// after splitting on `/`.
const BREED_URL_SEGMENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub url: String,
    pub breed: String,
}

impl Dog {
    pub fn new(id: DogId, url: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            breed: breed.into(),
        }
    }

    /// Builds a dog from a random-image URL, deriving the breed from its path.
    pub fn from_image_url(id: DogId, url: impl Into<String>) -> Self {
        let url = url.into();
        let breed = breed_from_image_url(&url);
        Self { id, url, breed }
    }

    pub fn label(&self) -> String {
        breed_label(&self.breed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedOption {
    pub label: String,
    pub value: String,
}

impl BreedOption {
    pub fn all_breeds() -> Self {
        Self {
            label: ALL_BREEDS_LABEL.to_string(),
            value: String::new(),
        }
    }

    pub fn for_breed(breed: &str) -> Self {
        Self {
            label: breed_label(breed),
            value: breed.to_string(),
        }
    }
}

/// Selection options for a breed vocabulary, "All Breeds" first.
pub fn breed_options(breeds: &[String]) -> Vec<BreedOption> {
    std::iter::once(BreedOption::all_breeds())
        .chain(breeds.iter().map(|breed| BreedOption::for_breed(breed)))
        .collect()
}

/// `"english-setter"` -> `"English Setter"`. Only hyphens split words.
pub fn breed_label(breed: &str) -> String {
    breed
        .split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reads the breed out of an image URL path. Only the first hyphen becomes a
/// space, so `german-shepherd-dog` stays partially hyphenated.
pub fn breed_from_image_url(url: &str) -> String {
    match url.split('/').nth(BREED_URL_SEGMENT) {
        Some(segment) if !segment.is_empty() => segment.replacen('-', " ", 1),
        _ => UNKNOWN_BREED.to_string(),
    }
}
