use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the completion API
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the hosted text-completion API (Gemini generateContent)
///
/// The chatbot is a thin wrapper: the school catalogue is serialized into
/// the prompt as context and the model does the rest. No retries.
pub struct GeminiClient {
    api_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url,
            api_key,
            model,
            client,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    /// Assemble the prompt: fixed instruction, school data as context,
    /// then the question and the language to answer in.
    fn build_prompt(context: &str, question: &str, language: &str) -> String {
        format!(
            "You are an assistant helping parents choose a school for their child. \
             Answer using only the school data below; if the data does not contain \
             the answer, say so plainly. Reply in {language}.\n\n\
             School data:\n{context}\n\n\
             Question: {question}"
        )
    }

    /// Answer a free-text question given the serialized school context.
    pub async fn complete(
        &self,
        context: &str,
        question: &str,
        language: &str,
    ) -> Result<String, AssistantError> {
        let prompt = Self::build_prompt(context, question, language);

        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!("Sending completion request ({} chars of prompt)", prompt.len());

        let response = self
            .client
            .post(self.generate_url())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::ApiError(format!(
                "Completion request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let reply = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| AssistantError::InvalidResponse("Missing candidate text".into()))?;

        Ok(reply.trim().to_string())
    }
}
