use crate::{
    backend::ImagineBackend,
    error::Result,
    image_url,
    store::{Action, Store},
};
use reqwest::Url;
use std::sync::Arc;

#[derive(Clone)]
pub struct GalleryClient {
    backend: Arc<dyn ImagineBackend>,
    store: Store,
    origin: Url,
}

impl GalleryClient {
    pub fn new(backend: Arc<dyn ImagineBackend>, store: Store, origin: Url) -> Self {
        Self {
            backend,
            store,
            origin,
        }
    }

    /// Replaces the gallery with the backend's list. On failure the error
    /// is logged and the previous list stays.
    pub async fn refresh(&self) -> Result<usize> {
        match self.backend.gallery().await {
            Ok(images) => {
                log::info!("🖼️  Fetched {} gallery images", images.len());
                let count = images.len();
                self.store.dispatch(Action::GalleryLoaded(images));
                Ok(count)
            }
            Err(e) => {
                log::error!("Error fetching gallery: {}", e);
                Err(e)
            }
        }
    }

    pub fn images(&self) -> Vec<String> {
        self.store.read(|s| s.gallery.clone())
    }

    /// Gallery entries joined onto the backend origin where relative.
    pub fn resolved_images(&self) -> Vec<String> {
        self.store.read(|s| {
            s.gallery
                .iter()
                .map(|url| image_url::resolve(&self.origin, url))
                .collect()
        })
    }

    pub fn select(&self, image: impl Into<String>) {
        self.store
            .dispatch(Action::SelectGalleryImage(Some(image.into())));
    }

    pub fn clear_selection(&self) {
        self.store.dispatch(Action::SelectGalleryImage(None));
    }

    pub fn selected(&self) -> Option<String> {
        self.store.read(|s| s.selected_gallery_image.clone())
    }
}
