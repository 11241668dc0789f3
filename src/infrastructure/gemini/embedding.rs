//! Gemini `embedContent` embedding provider

use async_trait::async_trait;
use serde::Deserialize;

use super::{truncate_body, DEFAULT_GEMINI_BASE_URL};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::QaError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Embedding provider speaking the Gemini `embedContent` wire shape.
///
/// Every failure maps to [`QaError::Embedding`]: the retrieval path degrades
/// to an empty context instead of retrying, so no transient/permanent split
/// is needed here.
#[derive(Debug)]
pub struct GeminiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl<C: HttpClientTrait> GeminiEmbeddingProvider<C> {
    pub fn new(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self::with_base_url(client, api_key, model, dimensions, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
            model: model.into(),
            dimensions,
        }
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:embedContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": format!("models/{}", self.model),
            "content": {
                "parts": [{ "text": text }]
            }
        })
    }

    fn parse_response(&self, body: &str) -> Result<Vec<f32>, QaError> {
        let response: EmbedResponse = serde_json::from_str(body)
            .map_err(|e| QaError::embedding(format!("Failed to parse response: {}", e)))?;

        let values = response
            .embedding
            .ok_or_else(|| QaError::embedding("Response contained no embedding"))?
            .values;

        if values.len() != self.dimensions {
            return Err(QaError::embedding(format!(
                "Expected {} dimensions, got {}",
                self.dimensions,
                values.len()
            )));
        }

        Ok(values)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for GeminiEmbeddingProvider<C> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, QaError> {
        let body = self.build_request(text);

        let response = self
            .client
            .post_json(&self.embed_url(), &body)
            .await
            .map_err(|e| QaError::embedding(e.to_string()))?;

        if response.is_success() {
            self.parse_response(&response.body)
        } else {
            Err(QaError::embedding(format!(
                "HTTP {}: {}",
                response.status,
                truncate_body(&response.body)
            )))
        }
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbedValues>,
}

#[derive(Debug, Deserialize)]
struct EmbedValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    fn provider(client: MockHttpClient) -> GeminiEmbeddingProvider<MockHttpClient> {
        GeminiEmbeddingProvider::new(client, "test-key", "text-embedding-004", 3)
    }

    #[test]
    fn test_url_carries_model_and_key() {
        let provider = provider(MockHttpClient::new());
        let url = provider.embed_url();

        assert!(url.contains("/v1beta/models/text-embedding-004:embedContent"));
        assert!(url.ends_with("key=test-key"));
    }

    #[tokio::test]
    async fn test_success_parses_vector() {
        let client = MockHttpClient::new()
            .with_response(200, r#"{"embedding": {"values": [0.1, 0.2, 0.3]}}"#);
        let provider = provider(client);

        let vector = provider.embed("hello").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_error() {
        let client =
            MockHttpClient::new().with_response(200, r#"{"embedding": {"values": [0.1]}}"#);
        let provider = provider(client);

        let err = provider.embed("hello").await.unwrap_err();
        assert!(matches!(err, QaError::Embedding { .. }));
    }

    #[tokio::test]
    async fn test_http_failure_maps_to_embedding_error() {
        let client = MockHttpClient::new().with_response(500, "boom");
        let provider = provider(client);

        let err = provider.embed("hello").await.unwrap_err();
        assert!(matches!(err, QaError::Embedding { .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_missing_embedding_field_is_error() {
        let client = MockHttpClient::new().with_response(200, "{}");
        let provider = provider(client);

        assert!(provider.embed("hello").await.is_err());
    }
}
