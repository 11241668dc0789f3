//! Gemini `generateContent` completion provider

use async_trait::async_trait;
use serde::Deserialize;

use super::{truncate_body, DEFAULT_GEMINI_BASE_URL};
use crate::domain::completion::{build_prompt, CompletionProvider, GenerationParams};
use crate::domain::QaError;
use crate::infrastructure::http_client::{HttpClientTrait, TransportError};

/// Completion provider speaking the Gemini `generateContent` wire shape.
///
/// One attempt per `complete` call; retry and fallback conversion live in
/// the [`crate::infrastructure::services::CompletionClient`] wrapping it.
#[derive(Debug)]
pub struct GeminiCompletionProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
    params: GenerationParams,
}

impl<C: HttpClientTrait> GeminiCompletionProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
            model: model.into(),
            params: GenerationParams::default(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": self.params,
        })
    }

    fn parse_response(&self, body: &str) -> Result<String, QaError> {
        let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
            QaError::completion_permanent(format!("Failed to parse response: {}", e))
        })?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| QaError::completion_permanent("Response contained no answer text"))
    }

    fn classify_status(&self, status: u16, body: &str) -> QaError {
        let message = format!("HTTP {}: {}", status, truncate_body(body));

        if status == 429 || status >= 500 {
            QaError::completion_transient(message)
        } else {
            QaError::completion_permanent(message)
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for GeminiCompletionProvider<C> {
    async fn complete(&self, question: &str, context: &str) -> Result<String, QaError> {
        let prompt = build_prompt(question, context);
        let body = self.build_request(&prompt);

        // A request that never reached the service is worth retrying.
        let response = self
            .client
            .post_json(&self.generate_url(), &body)
            .await
            .map_err(|err: TransportError| QaError::completion_transient(err.to_string()))?;

        if response.is_success() {
            self.parse_response(&response.body)
        } else {
            Err(self.classify_status(response.status, &response.body))
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
