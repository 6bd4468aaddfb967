pub mod chat;
pub mod common;
pub mod gallery;
pub mod generation;
pub mod progress;

pub use chat::*;
pub use common::*;
pub use gallery::*;
pub use generation::*;
pub use progress::*;
