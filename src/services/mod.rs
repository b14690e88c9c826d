// Service exports
pub mod firebase;
pub mod gemini;

pub use firebase::{FirebaseClient, StoreError};
pub use gemini::{AssistantError, GeminiClient};
