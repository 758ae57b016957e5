//! LLM client abstraction.
//!
//! A single-call, non-streaming completion interface. The pipeline makes two
//! independent calls per request (generation, then narration), so the trait
//! stays deliberately small: one prompt in, one completion out.

use async_trait::async_trait;

use crate::error::LlmError;

/// Generative text model client.
///
/// Implementations must be cheap to share across concurrent requests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Name of the model this client targets.
    fn model_name(&self) -> &str;
}
