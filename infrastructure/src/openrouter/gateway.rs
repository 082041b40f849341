//! OpenRouter-compatible model gateway

use super::error::GatewayError;
use super::protocol::{
    ChatRequest, completions_url, extract_content, http_error_message, timeout_message,
};
use crate::config::FileGatewayConfig;
use async_trait::async_trait;
use debate_application::ModelGateway;
use debate_domain::{CallFailureKind, Model, ModelCallResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read-only connection settings, built once at startup
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Resolve the API key and timeout from the `[gateway]` section
    pub fn from_file(file: &FileGatewayConfig) -> Result<Self, GatewayError> {
        let api_key = file
            .resolve_api_key()
            .ok_or_else(|| GatewayError::MissingApiKey {
                env_var: file.api_key_env.clone(),
            })?;
        Ok(Self {
            base_url: file.base_url.clone(),
            api_key,
            timeout: Duration::from_secs(file.timeout_secs),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gateway speaking the OpenAI chat-completions protocol over HTTP
pub struct OpenRouterGateway {
    client: reqwest::Client,
    config: Arc<GatewayConfig>,
    endpoint: String,
}

impl OpenRouterGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("debate-quorum/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let endpoint = completions_url(&config.base_url);
        Ok(Self {
            client,
            config: Arc::new(config),
            endpoint,
        })
    }

    async fn send(&self, model: &Model, prompt: &str) -> ModelCallResult {
        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::user(model.as_str(), prompt))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return transport_failure(model, &e, self.config.timeout),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return transport_failure(model, &e, self.config.timeout),
        };

        if !status.is_success() {
            return ModelCallResult::failed(
                model.clone(),
                CallFailureKind::HttpError,
                http_error_message(status.as_u16(), &body),
            );
        }

        match extract_content(&body) {
            Ok(content) => ModelCallResult::ok(model.clone(), content),
            Err(message) => {
                ModelCallResult::failed(model.clone(), CallFailureKind::MalformedResponse, message)
            }
        }
    }
}

fn transport_failure(model: &Model, error: &reqwest::Error, timeout: Duration) -> ModelCallResult {
    if error.is_timeout() {
        ModelCallResult::failed(
            model.clone(),
            CallFailureKind::Timeout,
            timeout_message(timeout.as_secs()),
        )
    } else {
        ModelCallResult::failed(
            model.clone(),
            CallFailureKind::TransportError,
            error.to_string(),
        )
    }
}

#[async_trait]
impl ModelGateway for OpenRouterGateway {
    async fn call(&self, model: &Model, prompt: &str) -> ModelCallResult {
        debug!("Calling {} ({} chars)", model, prompt.len());
        match tokio::time::timeout(self.config.timeout, self.send(model, prompt)).await {
            Ok(result) => result,
            Err(_) => ModelCallResult::failed(
                model.clone(),
                CallFailureKind::Timeout,
                timeout_message(self.config.timeout.as_secs()),
            ),
        }
    }
}
