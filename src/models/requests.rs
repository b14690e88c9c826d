use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to ask the school assistant a free-text question
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "question")]
    pub query: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "English".to_string()
}
