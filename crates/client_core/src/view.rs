//! Presentation snapshot handed to a [`Renderer`] after every state change.

use shared::domain::{breed_label, BreedOption, Dog, DogId, ALL_BREEDS_LABEL};

/// Consumer of view snapshots. Implementations draw; they never call back
/// into the controller.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &ViewState);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogCard {
    pub id: DogId,
    pub image_url: String,
    pub breed: String,
    pub heading: String,
    pub chip: String,
}

impl DogCard {
    pub fn from_dog(dog: &Dog) -> Self {
        let label = dog.label();
        Self {
            id: dog.id,
            image_url: dog.url.clone(),
            breed: dog.breed.clone(),
            heading: label.clone(),
            chip: label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub showing: usize,
    pub selected_breed_label: String,
}

impl Summary {
    pub fn new(total: usize, showing: usize, selected_breed: &str) -> Self {
        let selected_breed_label = if selected_breed.is_empty() {
            ALL_BREEDS_LABEL.to_string()
        } else {
            breed_label(selected_breed)
        };
        Self {
            total,
            showing,
            selected_breed_label,
        }
    }

    pub fn total_text(&self) -> String {
        format!("Total Dogs: {}", self.total)
    }

    pub fn showing_text(&self) -> String {
        format!("Showing: {}", self.showing)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub gallery: Vec<DogCard>,
    pub breed_options: Vec<BreedOption>,
    pub search_text: String,
    pub selected_breed: String,
    pub summary: Option<Summary>,
    pub empty_state_visible: bool,
    pub error: Option<String>,
    pub loading: bool,
    pub load_buttons_enabled: bool,
}
