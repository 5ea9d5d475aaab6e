pub mod model_client;
mod response;
pub mod text_base_client;

use crate::{
    config::ClientConfig,
    error::{LithoError, Result},
    models::{GeneratedArtifact, ModelGenerationRequest, TextBaseRequest},
};
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;

pub use model_client::ModelClient;
pub use text_base_client::TextBaseClient;

pub const HEALTH_PATH: &str = "/health";

/// Entry point for talking to the LithoMaker backend. Cheap to clone; all
/// clones share the same connection pool and base URL.
#[derive(Clone)]
pub struct LithoClient {
    // Never follows redirects, a 3xx on `/health` counts as unhealthy.
    health_client: Client,
    config: Arc<ClientConfig>,
    model_client: ModelClient,
    text_base_client: TextBaseClient,
}

impl LithoClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| LithoError::ConfigError(format!("failed to build HTTP client: {}", e)))?;
        Self::with_http_client(config, client)
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Uses a caller-configured `reqwest::Client`, e.g. one with a timeout,
    /// for the generation calls.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let health_client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| LithoError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            model_client: ModelClient::new(client.clone(), config.clone()),
            text_base_client: TextBaseClient::new(client, config.clone()),
            health_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model(&self) -> &ModelClient {
        &self.model_client
    }

    pub fn text_base(&self) -> &TextBaseClient {
        &self.text_base_client
    }

    pub async fn generate_model(&self, request: ModelGenerationRequest) -> Result<GeneratedArtifact> {
        self.model_client.generate(request).await
    }

    pub async fn generate_text_base(&self, texto: impl Into<String>) -> Result<GeneratedArtifact> {
        self.text_base_client
            .generate(TextBaseRequest::new(texto))
            .await
    }

    /// True for any 2xx answer on `/health`. Never fails: transport errors
    /// count as unhealthy.
    pub async fn health_check(&self) -> bool {
        let url = self.config.endpoint(HEALTH_PATH);

        match self.health_client.get(&url).send().await {
            Ok(response) => {
                let healthy = response.status().is_success();
                if !healthy {
                    log::warn!("Health check on {} answered {}", url, response.status());
                }
                healthy
            }
            Err(e) => {
                log::warn!("Health check on {} failed: {}", url, e);
                false
            }
        }
    }
}
