//! Generation Provider
//!
//! Contract for the remote text-generation service used by the wizard, and the HTTP
//! client that talks to an Ollama-style endpoint. The client owns its credential slot;
//! nothing here is process-global.

use crate::config::GenerationConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod credential;

pub use credential::{Credential, CredentialSlot, CREDENTIAL_PATTERN};

/// Text generation client trait
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Validate and store a credential. A rejected value leaves the slot untouched.
    fn set_credential(&self, raw: &str) -> Result<(), ApiError>;

    /// Whether a validated credential is currently stored
    fn has_credential(&self) -> bool;

    /// Send `prompt` and return the trimmed response text
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ApiError>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Request body sent to the generation endpoint.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub max_tokens: u32,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(prompt: &'a str, model: &'a str, max_tokens: u32) -> Self {
        Self {
            prompt,
            model,
            max_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerationResponse {
    response: Option<String>,
}

// Helper function to map transport errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderRequestFailed(format!("HTTP error: {}", error))
    }
}

fn build_http_client(config: &GenerationConfig) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// HTTP client for an Ollama-style `{prompt, model}` endpoint
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
    credential: CredentialSlot,
}

impl OllamaClient {
    pub fn new(config: &GenerationConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: config.endpoint.trim().to_string(),
            model: config.model.clone(),
            credential: CredentialSlot::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    fn set_credential(&self, raw: &str) -> Result<(), ApiError> {
        self.credential.set(raw)?;
        debug!("API key validated and set");
        Ok(())
    }

    fn has_credential(&self) -> bool {
        self.credential.is_set()
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ApiError> {
        let bearer = self.credential.bearer().ok_or(ApiError::MissingCredential)?;
        let request = GenerationRequest::new(prompt, &self.model, max_tokens);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", bearer)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Generation request rejected");
            return Err(ApiError::ProviderStatus {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        payload
            .response
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                ApiError::ProviderError("Response payload has no 'response' field".to_string())
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    credential: CredentialSlot,
    outcomes: std::collections::HashMap<String, Result<String, u16>>,
    prompts: parking_lot::Mutex<Vec<(String, u32)>>,
}

#[cfg(test)]
impl MockProvider {
    /// Prompts not listed in `outcomes` answer "Mock response"; `Err(status)` fails.
    pub fn new(outcomes: Vec<(&str, Result<&str, u16>)>) -> Self {
        Self {
            credential: CredentialSlot::new(),
            outcomes: outcomes
                .into_iter()
                .map(|(prompt, outcome)| (prompt.to_string(), outcome.map(str::to_string)))
                .collect(),
            prompts: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn with_credential(self) -> Self {
        self.credential
            .set("sk-test-key")
            .expect("test credential is well formed");
        self
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl GenerationClient for MockProvider {
    fn set_credential(&self, raw: &str) -> Result<(), ApiError> {
        self.credential.set(raw)
    }

    fn has_credential(&self) -> bool {
        self.credential.is_set()
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ApiError> {
        self.prompts.lock().push((prompt.to_string(), max_tokens));
        match self.outcomes.get(prompt) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(status)) => Err(ApiError::ProviderStatus {
                status: *status,
                message: "mock failure".to_string(),
            }),
            None => Ok("Mock response".to_string()),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
