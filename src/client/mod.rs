pub mod chat_client;
pub mod gallery_client;
pub mod generation_client;
pub mod poller;

use crate::{
    backend::{HttpBackend, ImagineBackend},
    config::Config,
    error::Result,
    models::ModelId,
    store::{Action, AppState, Store},
    suggestions::SuggestionBoard,
};
use std::sync::Arc;

pub use chat_client::ChatClient;
pub use gallery_client::GalleryClient;
pub use generation_client::GenerationClient;
pub use poller::{PollerState, ProgressPoller};

#[derive(Clone)]
pub struct ImagineClient {
    config: Config,
    store: Store,
    generation_client: GenerationClient,
    gallery_client: GalleryClient,
    chat_client: ChatClient,
}

impl ImagineClient {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let backend = Arc::new(HttpBackend::new(&config)?);
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: Config, backend: Arc<dyn ImagineBackend>) -> Result<Self> {
        config.validate()?;
        let origin = config.backend_origin()?;

        let store = Store::new(AppState {
            suggestions: SuggestionBoard::shuffled(),
            ..Default::default()
        });

        let gallery_client = GalleryClient::new(backend.clone(), store.clone(), origin.clone());
        let poller = ProgressPoller::new(backend.clone(), store.clone(), config.poll_interval);
        let generation_client = GenerationClient::new(
            backend.clone(),
            store.clone(),
            poller,
            gallery_client.clone(),
            origin,
        );
        let chat_client = ChatClient::new(backend);

        Ok(Self {
            config,
            store,
            generation_client,
            gallery_client,
            chat_client,
        })
    }

    pub fn generation(&self) -> &GenerationClient {
        &self.generation_client
    }

    pub fn gallery(&self) -> &GalleryClient {
        &self.gallery_client
    }

    pub fn chat(&self) -> &ChatClient {
        &self.chat_client
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initial gallery load. Failure leaves the gallery empty.
    pub async fn load(&self) {
        let _ = self.gallery_client.refresh().await;
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.store.dispatch(Action::SetPrompt(prompt.into()));
    }

    pub fn select_model(&self, model: ModelId) {
        self.store.dispatch(Action::SelectModel(model));
    }

    pub fn pop_suggestion(&self, id: usize) -> bool {
        self.store.dispatch(Action::PopSuggestion(id))
    }

    pub fn dismiss_alert(&self) {
        self.store.dispatch(Action::DismissAlert);
    }

    /// Clears the prompt and current image and deals a fresh set of
    /// suggestions.
    pub fn regenerate(&self) {
        self.store
            .dispatch(Action::Regenerated(SuggestionBoard::shuffled()));
    }
}
