use crate::{
    error::Result,
    models::{GenerationRequest, GenerationStatus, ModelId},
};
use async_trait::async_trait;

/// The five calls the client makes against an Imagine backend.
#[async_trait]
pub trait ImagineBackend: Send + Sync {
    /// `POST /generate`; yields the image reference exactly as sent.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// `GET /progress?model=`.
    async fn progress(&self, model: ModelId) -> Result<GenerationStatus>;

    /// `POST /cancel`. The reply body is ignored.
    async fn cancel(&self) -> Result<()>;

    /// `GET /gallery`.
    async fn gallery(&self) -> Result<Vec<String>>;

    /// `POST /api/gemini`.
    async fn chat(&self, prompt: &str) -> Result<String>;
}
