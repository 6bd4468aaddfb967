use crate::{
    backend::ImagineBackend,
    client::{
        gallery_client::GalleryClient,
        poller::{PollerState, ProgressPoller},
    },
    error::{ImagineError, Result},
    image_url, logger,
    models::{GenerationRequest, GenerationResult},
    store::{Action, Store},
};
use reqwest::Url;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn ImagineBackend>,
    store: Store,
    poller: Arc<Mutex<ProgressPoller>>,
    gallery: GalleryClient,
    origin: Url,
}

impl GenerationClient {
    pub fn new(
        backend: Arc<dyn ImagineBackend>,
        store: Store,
        poller: ProgressPoller,
        gallery: GalleryClient,
        origin: Url,
    ) -> Self {
        Self {
            backend,
            store,
            poller: Arc::new(Mutex::new(poller)),
            gallery,
            origin,
        }
    }

    fn poller(&self) -> MutexGuard<'_, ProgressPoller> {
        self.poller.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Submits the prompt and model currently held in the store.
    pub async fn generate(&self) -> Result<GenerationResult> {
        let request = self
            .store
            .read(|s| GenerationRequest::new(s.prompt.clone(), s.model));
        self.submit(request).await
    }

    /// Runs one generation cycle. Only a blank prompt is returned as an
    /// error; backend failures come back as [`GenerationResult::Failed`]
    /// and are mirrored in the store.
    pub async fn submit(&self, request: GenerationRequest) -> Result<GenerationResult> {
        if let Err(e) = request.validate() {
            if let ImagineError::Validation(message) = &e {
                log::warn!("Rejected generation: {}", message);
                self.store.dispatch(Action::ValidationFailed(message.clone()));
            }
            return Err(e);
        }

        let id = self.store.begin_generation();
        let _timer = logger::timer(&format!("Generation #{} ({})", id, request.model));

        {
            let mut poller = self.poller();
            if request.model.is_synchronous() {
                poller.stop();
            } else {
                poller.start(request.model, id);
            }
        }

        let outcome = self.backend.generate(&request).await;

        if self.poller().stop_for(id) {
            self.store.dispatch(Action::PollingStopped { id });
        }

        let result = GenerationResult::from(
            outcome
                .inspect(|image_url| log::info!("🎨 Generation #{} produced {}", id, image_url))
                .inspect_err(|e| log::error!("Error in generation #{}: {}", id, e)),
        );

        if !self.store.dispatch(Action::GenerationFinished {
            id,
            result: result.clone(),
        }) {
            log::info!(
                "Generation #{} resolved after it was cancelled or superseded; result discarded",
                id
            );
        }

        // failures are logged by the gallery client and keep the old list
        let _ = self.gallery.refresh().await;

        Ok(result)
    }

    /// Resets the client immediately and tells the backend to abort without
    /// waiting for it. The returned handle resolves once the notice is sent.
    /// Must be called from within a tokio runtime.
    pub fn cancel(&self) -> JoinHandle<()> {
        self.poller().stop();
        self.store.dispatch(Action::Cancelled);
        log::info!("🛑 Generation cancelled");

        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Err(e) = backend.cancel().await {
                log::error!("Error cancelling generation: {}", e);
            }
        })
    }

    /// Reports that the front end could not load the current image. Returns
    /// `false` when there is no image to fail.
    pub fn report_image_load_failed(&self) -> bool {
        let failed = self.store.dispatch(Action::ImageLoadFailed);
        if failed {
            log::warn!("Image could not be loaded");
        }
        failed
    }

    pub fn is_polling(&self) -> bool {
        self.poller().state() == PollerState::Polling
    }

    /// The current image, resolved and cache-busted for display.
    pub fn display_image_url(&self) -> Option<String> {
        self.store
            .read(|s| s.image_url.clone())
            .map(|url| image_url::display_url(&self.origin, &url))
    }
}
