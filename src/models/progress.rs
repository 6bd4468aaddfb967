use crate::error::{ImagineError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStatus {
    /// Percent complete, 0..=100.
    pub progress: u8,
    /// Estimated seconds remaining.
    pub eta: u64,
}

impl GenerationStatus {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

/// Raw `/progress` body. Numbers may arrive as integers or floats.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub eta: Option<f64>,
}

impl ProgressResponse {
    pub fn into_status(self) -> Result<GenerationStatus> {
        let progress = self
            .progress
            .filter(|p| p.is_finite())
            .ok_or(ImagineError::MissingField("progress"))?;
        let eta = self.eta.filter(|e| e.is_finite()).unwrap_or(0.0);

        Ok(GenerationStatus {
            progress: progress.clamp(0.0, 100.0).floor() as u8,
            eta: eta.max(0.0).ceil() as u64,
        })
    }
}
