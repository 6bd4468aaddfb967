//! In-memory UI state and the transitions that mutate it.
//!
//! Every change goes through [`Store::dispatch`] with a named [`Action`];
//! [`AppState::apply`] is the only place fields are written. Actions that
//! belong to a generation carry its id, and anything tagged with an id that
//! is no longer active (cancelled or superseded) is dropped.

use crate::{
    models::{GenerationResult, GenerationStatus, ModelId},
    suggestions::SuggestionBoard,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPrompt(String),
    SelectModel(ModelId),
    /// A submission was rejected before reaching the network.
    ValidationFailed(String),
    DismissAlert,
    GenerationStarted { id: u64 },
    PollingStarted { id: u64 },
    ProgressTick { id: u64, status: GenerationStatus },
    /// Polling ended without completing (fetch failure or submit resolved).
    PollingStopped { id: u64 },
    GenerationFinished { id: u64, result: GenerationResult },
    /// The displayed image failed to load on the front end.
    ImageLoadFailed,
    Cancelled,
    GalleryLoaded(Vec<String>),
    SelectGalleryImage(Option<String>),
    PopSuggestion(usize),
    Regenerated(SuggestionBoard),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub prompt: String,
    pub model: ModelId,
    pub progress: u8,
    pub eta: u64,
    /// Image reference as returned by the backend, unresolved.
    pub image_url: Option<String>,
    pub image_error: bool,
    pub loading: bool,
    pub polling: bool,
    pub active_generation: Option<u64>,
    pub last_generation_id: u64,
    pub alert: Option<String>,
    pub gallery: Vec<String>,
    pub selected_gallery_image: Option<String>,
    pub suggestions: SuggestionBoard,
}

impl AppState {
    fn is_active(&self, id: u64) -> bool {
        self.active_generation == Some(id)
    }

    /// Applies one action. Returns `false` when the action was stale and
    /// left the state untouched.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetPrompt(prompt) => {
                self.prompt = prompt;
            }
            Action::SelectModel(model) => {
                self.model = model;
            }
            Action::ValidationFailed(message) => {
                self.alert = Some(message);
            }
            Action::DismissAlert => {
                self.alert = None;
            }
            Action::GenerationStarted { id } => {
                self.progress = 0;
                self.eta = 0;
                self.image_url = None;
                self.image_error = false;
                self.loading = true;
                self.polling = false;
                self.alert = None;
                self.active_generation = Some(id);
                self.last_generation_id = self.last_generation_id.max(id);
            }
            Action::PollingStarted { id } => {
                if !self.is_active(id) {
                    return false;
                }
                self.polling = true;
            }
            Action::ProgressTick { id, status } => {
                if !self.is_active(id) || !self.polling {
                    return false;
                }
                self.progress = self.progress.max(status.progress.min(100));
                self.eta = status.eta;
                if status.is_complete() {
                    self.polling = false;
                    self.loading = false;
                }
            }
            Action::PollingStopped { id } => {
                if !self.is_active(id) {
                    return false;
                }
                self.polling = false;
            }
            Action::GenerationFinished { id, result } => {
                if !self.is_active(id) {
                    return false;
                }
                match result {
                    GenerationResult::Image { image_url } => {
                        self.image_url = Some(image_url);
                        self.image_error = false;
                    }
                    GenerationResult::Failed { .. } => {
                        self.image_url = None;
                        self.image_error = true;
                    }
                }
                self.loading = false;
                self.polling = false;
                self.active_generation = None;
            }
            Action::ImageLoadFailed => {
                if self.image_url.is_none() {
                    return false;
                }
                self.image_error = true;
            }
            Action::Cancelled => {
                self.loading = false;
                self.polling = false;
                self.progress = 0;
                self.eta = 0;
                self.active_generation = None;
            }
            Action::GalleryLoaded(images) => {
                self.gallery = images;
            }
            Action::SelectGalleryImage(image) => {
                self.selected_gallery_image = image;
            }
            Action::PopSuggestion(id) => match self.suggestions.pop(id) {
                Some(text) => {
                    if !self.prompt.is_empty() {
                        self.prompt.push(' ');
                    }
                    self.prompt.push_str(&text);
                }
                None => return false,
            },
            Action::Regenerated(board) => {
                self.prompt.clear();
                self.image_url = None;
                self.image_error = false;
                self.progress = 0;
                self.eta = 0;
                self.suggestions = board;
            }
        }
        true
    }
}

/// Shared handle to the application state. Clones point at the same state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn dispatch(&self, action: Action) -> bool {
        log::trace!("dispatch {:?}", action);
        self.lock().apply(action)
    }

    /// Allocates the next generation id and starts it in one step.
    pub fn begin_generation(&self) -> u64 {
        let mut state = self.lock();
        let id = state.last_generation_id + 1;
        state.apply(Action::GenerationStarted { id });
        id
    }

    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }
}
