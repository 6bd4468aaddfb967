use crate::error::ImagineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Image models offered by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    #[default]
    Model1,
    Model2,
    Dalle,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [ModelId::Model1, ModelId::Model2, ModelId::Dalle];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Model1 => "model1",
            ModelId::Model2 => "model2",
            ModelId::Dalle => "dalle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelId::Model1 => "Realistic",
            ModelId::Model2 => "Anime",
            ModelId::Dalle => "DALL·E",
        }
    }

    /// Synchronous models answer `/generate` with the finished image and
    /// expose no progress endpoint, so they are never polled.
    pub fn is_synchronous(&self) -> bool {
        matches!(self, ModelId::Dalle)
    }

    /// Fixed wait hint shown instead of a progress bar for synchronous models.
    pub fn estimated_duration(&self) -> Option<Duration> {
        match self {
            ModelId::Dalle => Some(Duration::from_secs(30)),
            _ => None,
        }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, bool)> {
        Self::ALL
            .iter()
            .map(|m| (m.as_str(), m.label(), m.is_synchronous()))
            .collect()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = ImagineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted) || m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ImagineError::Validation(format!("unknown model '{}'", s)))
    }
}
