pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod image_url;
pub mod logger;
pub mod models;
pub mod store;
pub mod suggestions;

pub use backend::{HttpBackend, ImagineBackend};
pub use client::{
    ChatClient, GalleryClient, GenerationClient, ImagineClient, PollerState, ProgressPoller,
};
pub use config::Config;
pub use error::{ImagineError, Result};
pub use models::*;
pub use store::{Action, AppState, Store};
pub use suggestions::{Suggestion, SuggestionBoard};
