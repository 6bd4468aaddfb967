use crate::error::{ImagineError, Result};
use crate::models::ModelId;
use serde::{Deserialize, Serialize};

pub const EMPTY_PROMPT_ALERT: &str = "Please enter a prompt before generating an image.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: ModelId,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: ModelId) -> Self {
        Self {
            prompt: prompt.into(),
            model,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ImagineError::Validation(EMPTY_PROMPT_ALERT.into()));
        }
        Ok(())
    }
}

/// Body of a `/generate` reply. The backend sends either an image
/// reference or some error indicator; only `imageUrl` is relied upon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl GenerateResponse {
    pub fn into_image_url(self) -> Result<String> {
        match self.image_url {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => match self.error {
                Some(err) => Err(ImagineError::Response(format!(
                    "backend reported an error: {}",
                    err
                ))),
                None => Err(ImagineError::MissingField("imageUrl")),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Image { image_url: String },
    Failed { reason: String },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Image { .. })
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            GenerationResult::Image { image_url } => Some(image_url),
            GenerationResult::Failed { .. } => None,
        }
    }
}

impl From<Result<String>> for GenerationResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(image_url) => GenerationResult::Image { image_url },
            Err(e) => GenerationResult::Failed {
                reason: e.to_string(),
            },
        }
    }
}
