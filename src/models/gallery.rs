use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryResponse {
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl GalleryResponse {
    pub fn into_images(self) -> Vec<String> {
        self.images.unwrap_or_default()
    }
}
