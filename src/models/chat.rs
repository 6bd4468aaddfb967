use crate::error::{ImagineError, Result};
use serde::{Deserialize, Serialize};

pub const CHAT_WELCOME: &str = "Welcome to Imagine.AI! I’m your assistant for using the web app. Feel free to ask any questions or ask for help navigating our features.";
pub const CHAT_FALLBACK: &str = "Sorry, there was an error processing your request.";

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatResponse {
    pub fn into_text(self) -> Result<String> {
        self.response.ok_or(ImagineError::MissingField("response"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
        }
    }
}
