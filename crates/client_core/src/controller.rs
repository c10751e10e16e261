//! The viewer controller: owns the loaded and filtered dog sets and pushes a
//! fresh [`ViewState`] to the renderer after every change.

use std::sync::Arc;

use futures::future::join_all;
use shared::{
    domain::{breed_options, BreedOption, Dog, DogId},
    error::UserFacingError,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::DogApiError,
    view::{DogCard, Renderer, Summary, ViewState},
    DogApi,
};

pub const DEFAULT_BATCH_SIZE: usize = 8;
pub const DEFAULT_BREED_IMAGE_COUNT: usize = 8;

const BREED_LIST_ERROR: &str = "Failed to load dog breeds. Please check your internet connection.";
const RANDOM_BATCH_ERROR: &str = "Failed to load dog images. Please try again.";

fn breed_images_error(breed: &str) -> String {
    format!("Failed to load images for {breed}. Please try again.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOptions {
    pub batch_size: usize,
    pub breed_image_count: usize,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            breed_image_count: DEFAULT_BREED_IMAGE_COUNT,
        }
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    LoadRandomBatch,
    LoadBreedList,
    SetSearchText(String),
    /// Empty value selects "All Breeds".
    SelectBreed(String),
    Clear,
}

impl ViewerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ViewerCommand::LoadRandomBatch => "load_random_batch",
            ViewerCommand::LoadBreedList => "load_breed_list",
            ViewerCommand::SetSearchText(_) => "set_search_text",
            ViewerCommand::SelectBreed(_) => "select_breed",
            ViewerCommand::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadKind {
    BreedList,
    RandomBatch,
    BreedImages(String),
}

/// Network work accepted by [`ViewerController::prepare`]. The loading
/// state it raised stays up until the load is handed to
/// [`ViewerController::complete`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad(LoadKind);

impl PendingLoad {
    pub fn name(&self) -> &'static str {
        match self.0 {
            LoadKind::BreedList => "load_breed_list",
            LoadKind::RandomBatch => "load_random_batch",
            LoadKind::BreedImages(_) => "load_breed_images",
        }
    }
}

/// Case-insensitive search on the breed AND containment of the selected
/// breed value. Empty inputs match everything.
pub fn matches_filter(dog: &Dog, search_text: &str, selected_breed: &str) -> bool {
    let search = search_text.to_lowercase();
    let matches_search = search.is_empty() || dog.breed.to_lowercase().contains(&search);
    let matches_breed = selected_breed.is_empty() || dog.breed.contains(selected_breed);
    matches_search && matches_breed
}

pub fn filter_dogs(dogs: &[Dog], search_text: &str, selected_breed: &str) -> Vec<Dog> {
    dogs.iter()
        .filter(|dog| matches_filter(dog, search_text, selected_breed))
        .cloned()
        .collect()
}

#[derive(Default)]
struct ViewerState {
    dogs: Vec<Dog>,
    filtered: Vec<Dog>,
    breeds: Vec<String>,
    breed_options: Vec<BreedOption>,
    search_text: String,
    selected_breed: String,
    load_in_flight: bool,
    // Breed-list loads are counted apart from the image guard: they never
    // block an image load and finishing one never releases the guard.
    pending_breed_lists: usize,
    summary_visible: bool,
    empty_state_visible: bool,
    error: Option<UserFacingError>,
}

impl ViewerState {
    fn new() -> Self {
        Self {
            breed_options: breed_options(&[]),
            ..Self::default()
        }
    }

    fn loading(&self) -> bool {
        self.load_in_flight || self.pending_breed_lists > 0
    }

    fn replace_dogs(&mut self, dogs: Vec<Dog>) {
        self.filtered = dogs.clone();
        self.dogs = dogs;
        self.show_gallery();
    }

    fn refilter(&mut self) {
        self.filtered = filter_dogs(&self.dogs, &self.search_text, &self.selected_breed);
        self.show_gallery();
    }

    fn show_gallery(&mut self) {
        self.empty_state_visible = self.filtered.is_empty();
        self.summary_visible = true;
    }

    fn begin_load(&mut self) -> bool {
        if self.load_in_flight {
            return false;
        }
        self.load_in_flight = true;
        true
    }

    fn clear(&mut self) {
        self.dogs.clear();
        self.filtered.clear();
        self.search_text.clear();
        self.selected_breed.clear();
        self.summary_visible = false;
        self.empty_state_visible = false;
        self.error = None;
    }

    fn fail(&mut self, err: &DogApiError, message: impl Into<String>) {
        let kind = err.kind();
        warn!(
            kind = kind.as_str(),
            endpoint = err.endpoint().unwrap_or("-"),
            error = %err,
            "dog api call failed"
        );
        self.error = Some(UserFacingError::new(kind, message));
    }

    fn snapshot(&self) -> ViewState {
        ViewState {
            gallery: self.filtered.iter().map(DogCard::from_dog).collect(),
            breed_options: self.breed_options.clone(),
            search_text: self.search_text.clone(),
            selected_breed: self.selected_breed.clone(),
            summary: self.summary_visible.then(|| {
                Summary::new(self.dogs.len(), self.filtered.len(), &self.selected_breed)
            }),
            empty_state_visible: self.empty_state_visible,
            error: self.error.as_ref().map(|err| err.message.clone()),
            loading: self.loading(),
            load_buttons_enabled: !self.loading(),
        }
    }
}

pub struct ViewerController {
    api: Arc<dyn DogApi>,
    renderer: Arc<dyn Renderer>,
    options: ViewerOptions,
    inner: Mutex<ViewerState>,
}

impl ViewerController {
    pub fn new(api: Arc<dyn DogApi>, renderer: Arc<dyn Renderer>) -> Arc<Self> {
        Self::with_options(api, renderer, ViewerOptions::default())
    }

    pub fn with_options(
        api: Arc<dyn DogApi>,
        renderer: Arc<dyn Renderer>,
        options: ViewerOptions,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            renderer,
            options,
            inner: Mutex::new(ViewerState::new()),
        })
    }

    pub fn options(&self) -> ViewerOptions {
        self.options
    }

    /// Initial population: the breed vocabulary, then a random batch.
    pub async fn start(&self) {
        self.load_breed_list().await;
        self.load_random_batch().await;
    }

    pub async fn dispatch(&self, command: ViewerCommand) {
        if let Some(pending) = self.prepare(command).await {
            self.complete(pending).await;
        }
    }

    /// Applies the part of `command` that touches only local state and
    /// returns the network part still owed, if any. Running `prepare` for
    /// each command in arrival order keeps selection, search and clear in
    /// the order the user issued them.
    pub async fn prepare(&self, command: ViewerCommand) -> Option<PendingLoad> {
        debug!(command = command.name(), "dispatching viewer command");
        let mut state = self.inner.lock().await;
        let pending = match command {
            ViewerCommand::LoadBreedList => {
                state.pending_breed_lists += 1;
                Some(PendingLoad(LoadKind::BreedList))
            }
            ViewerCommand::LoadRandomBatch => {
                if !state.begin_load() {
                    debug!("random batch ignored; a load is already in flight");
                    return None;
                }
                Some(PendingLoad(LoadKind::RandomBatch))
            }
            ViewerCommand::SetSearchText(text) => {
                state.search_text = text;
                state.refilter();
                None
            }
            ViewerCommand::SelectBreed(value) => {
                state.selected_breed = value.clone();
                if value.is_empty() {
                    state.refilter();
                    None
                } else {
                    state.search_text.clear();
                    if state.begin_load() {
                        Some(PendingLoad(LoadKind::BreedImages(value)))
                    } else {
                        debug!(breed = %value, "breed load ignored; a load is already in flight");
                        None
                    }
                }
            }
            ViewerCommand::Clear => {
                state.clear();
                None
            }
        };
        self.publish(&state);
        pending
    }

    /// Runs the network request owed by [`prepare`](Self::prepare) and
    /// folds its result into the state.
    pub async fn complete(&self, pending: PendingLoad) {
        match pending.0 {
            LoadKind::BreedList => self.finish_breed_list().await,
            LoadKind::RandomBatch => self.finish_random_batch().await,
            LoadKind::BreedImages(breed) => self.finish_breed_images(&breed).await,
        }
    }

    pub async fn view(&self) -> ViewState {
        self.inner.lock().await.snapshot()
    }

    pub async fn dogs(&self) -> Vec<Dog> {
        self.inner.lock().await.dogs.clone()
    }

    pub async fn filtered_dogs(&self) -> Vec<Dog> {
        self.inner.lock().await.filtered.clone()
    }

    pub async fn breeds(&self) -> Vec<String> {
        self.inner.lock().await.breeds.clone()
    }

    pub async fn load_breed_list(&self) {
        self.dispatch(ViewerCommand::LoadBreedList).await;
    }

    pub async fn load_random_batch(&self) {
        self.dispatch(ViewerCommand::LoadRandomBatch).await;
    }

    pub async fn load_breed_images(&self, breed: &str) {
        {
            let mut state = self.inner.lock().await;
            if !state.begin_load() {
                debug!(breed, "breed load ignored; a load is already in flight");
                return;
            }
            self.publish(&state);
        }
        self.finish_breed_images(breed).await;
    }

    pub async fn apply_filter(&self) {
        let mut state = self.inner.lock().await;
        state.refilter();
        self.publish(&state);
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.dispatch(ViewerCommand::SetSearchText(text.into())).await;
    }

    /// A concrete breed reloads that breed and drops the search text; the
    /// "All Breeds" value filters what is already loaded.
    pub async fn on_breed_selection_changed(&self, value: impl Into<String>) {
        self.dispatch(ViewerCommand::SelectBreed(value.into())).await;
    }

    pub async fn clear(&self) {
        self.dispatch(ViewerCommand::Clear).await;
    }

    async fn finish_breed_list(&self) {
        let result = self.api.list_breeds().await;

        let mut state = self.inner.lock().await;
        match result {
            Ok(breeds) => {
                info!(count = breeds.len(), "loaded breed list");
                state.breed_options = breed_options(&breeds);
                state.breeds = breeds;
                state.error = None;
            }
            Err(err) => state.fail(&err, BREED_LIST_ERROR),
        }
        state.pending_breed_lists = state.pending_breed_lists.saturating_sub(1);
        self.publish(&state);
    }

    async fn finish_random_batch(&self) {
        let requested = self.options.batch_size;
        let results = join_all((0..requested).map(|_| self.api.random_image())).await;

        let stamp = DogId::now_millis();
        let mut dogs = Vec::with_capacity(requested);
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(url) => dogs.push(Dog::from_image_url(DogId::batch(stamp, index), url)),
                Err(err) => warn!(
                    kind = err.kind().as_str(),
                    endpoint = err.endpoint().unwrap_or("-"),
                    error = %err,
                    "random image request failed"
                ),
            }
        }

        let mut state = self.inner.lock().await;
        if dogs.is_empty() {
            state.fail(&DogApiError::EmptyBatch { requested }, RANDOM_BATCH_ERROR);
        } else {
            info!(count = dogs.len(), requested, "loaded random batch");
            state.replace_dogs(dogs);
            state.error = None;
        }
        state.load_in_flight = false;
        self.publish(&state);
    }

    async fn finish_breed_images(&self, breed: &str) {
        let result = self
            .api
            .breed_images(breed, self.options.breed_image_count)
            .await;

        let mut state = self.inner.lock().await;
        match result {
            Ok(urls) => {
                info!(breed, count = urls.len(), "loaded breed images");
                let stamp = DogId::now_millis();
                let dogs = urls
                    .into_iter()
                    .enumerate()
                    .map(|(index, url)| Dog::new(DogId::batch(stamp, index), url, breed))
                    .collect();
                state.replace_dogs(dogs);
                state.error = None;
            }
            Err(err) => state.fail(&err, breed_images_error(breed)),
        }
        state.load_in_flight = false;
        self.publish(&state);
    }

    fn publish(&self, state: &ViewerState) {
        self.renderer.render(&state.snapshot());
    }
}
