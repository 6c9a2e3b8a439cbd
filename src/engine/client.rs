use async_trait::async_trait;

use super::errors::CompletionOutcome;

/// Port for the external text-completion service
///
/// One call issues exactly one request: no retry, no timeout, no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` authenticated with `credential` and return the completion text
    async fn complete(&self, prompt: &str, credential: &str) -> CompletionOutcome<String>;
}
