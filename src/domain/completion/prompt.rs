//! Grounding prompt template and fixed generation controls

use serde::Serialize;

/// Build the grounding prompt sent to the completion service.
///
/// The template pins the model to the retrieved context and delegates the
/// "not enough information" fallback to the service itself; nothing is
/// enforced locally. Fixed template, no per-call variation.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Context information is below.\n\
         ---------------------\n\
         {context}\n\
         ---------------------\n\
         Given the context information and not prior knowledge, answer the question.\n\
         If the answer cannot be found in the context, say that you don't have enough \
         information to answer.\n\
         \n\
         Question: {question}\n\
         Answer:"
    )
}

/// Generation controls sent with every completion request.
///
/// These are constants of the deployment, not varied per call. Serializes to
/// the service's `generationConfig` field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 1024,
        }
    }
}
