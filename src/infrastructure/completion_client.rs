// OpenRouter chat-completion client
//
// Sends the generated prompt as a single user message to a fixed model and
// maps every outcome onto `CompletionError`.

use async_trait::async_trait;
use reqwest::Client;

use crate::engine::client::CompletionClient;
use crate::engine::errors::{
    CompletionError, CompletionOutcome, GENERIC_FAILURE_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
use crate::engine::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorResponse};

/// Chat-completion endpoint used in production
pub const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// CompletionClient talking to the OpenRouter HTTP API
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    endpoint: String,
    referer: Option<String>,
}

impl OpenRouterClient {
    /// Client for the production endpoint
    pub fn new() -> Self {
        Self::with_endpoint(OPENROUTER_ENDPOINT)
    }

    /// Client for an alternative endpoint URL
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            referer: None,
        }
    }

    /// Origin sent in the `HTTP-Referer` header
    pub fn with_referer(mut self, origin: impl Into<String>) -> Self {
        self.referer = Some(origin.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str, credential: &str) -> CompletionOutcome<String> {
        if credential.is_empty() {
            return Err(CompletionError::MissingCredential);
        }

        let mut request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential)
            .json(&ChatCompletionRequest::for_prompt(prompt));
        if let Some(referer) = &self.referer {
            request = request.header("HTTP-Referer", referer);
        }

        tracing::debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "Sending completion request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Completion request failed before a response");
            CompletionError::NetworkOrServer(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorResponse::message_from(&body)
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            tracing::warn!(%status, message = %message, "Completion endpoint returned an error");
            return Err(CompletionError::NetworkOrServer(message));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Undecodable completion response");
            CompletionError::Unknown(UNKNOWN_ERROR_MESSAGE.to_string())
        })?;

        Ok(parsed.first_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenRouterClient {
        OpenRouterClient::with_endpoint(format!("{}/api/v1/chat/completions", server.uri()))
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "openai/gpt-4o-mini",
                "messages": [{"role": "user", "content": "Hello World!"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "# Result"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete("Hello World!", "sk-test")
            .await
            .unwrap();

        assert_eq!(text, "# Result");
    }

    #[tokio::test]
    async fn test_complete_sends_referer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("HTTP-Referer", "http://localhost:3000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .with_referer("http://localhost:3000")
            .complete("p", "sk-test")
            .await
            .unwrap();

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_complete_missing_content_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": [{"message": {}}]})))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("p", "sk").await.unwrap();

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_complete_surfaces_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "No auth credentials found"}})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", "sk").await.unwrap_err();

        assert_eq!(
            err,
            CompletionError::NetworkOrServer("No auth credentials found".to_string())
        );
    }

    #[tokio::test]
    async fn test_complete_generic_error_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", "sk").await.unwrap_err();

        assert_eq!(
            err,
            CompletionError::NetworkOrServer(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_complete_undecodable_success_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", "sk").await.unwrap_err();

        assert!(matches!(err, CompletionError::Unknown(_)));
    }

    #[tokio::test]
    async fn test_empty_credential_never_calls_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", "").await.unwrap_err();

        assert_eq!(err, CompletionError::MissingCredential);
    }

    #[test]
    fn test_default_endpoint() {
        assert_eq!(OpenRouterClient::new().endpoint(), OPENROUTER_ENDPOINT);
    }
}
