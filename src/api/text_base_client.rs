use crate::{
    api::response::{read_artifact, transport_error},
    config::ClientConfig,
    error::Result,
    logger::Timer,
    models::{GeneratedArtifact, TextBaseRequest},
};
use reqwest::{multipart::Form, Client};
use std::sync::Arc;

pub const GENERATE_TEXT_BASE_PATH: &str = "/api/generate-text-base/";
pub const GENERATE_TEXT_BASE_FALLBACK: &str = "Error generating text base";

#[derive(Clone)]
pub struct TextBaseClient {
    client: Client,
    config: Arc<ClientConfig>,
}

impl TextBaseClient {
    pub fn new(client: Client, config: Arc<ClientConfig>) -> Self {
        Self { client, config }
    }

    pub async fn generate(&self, request: TextBaseRequest) -> Result<GeneratedArtifact> {
        let url = self.config.endpoint(GENERATE_TEXT_BASE_PATH);
        log::info!("Generating text base ({} chars) via {}", request.texto.chars().count(), url);
        let _timer = Timer::new("generate-text-base");

        let form = Form::new().text("texto", request.texto);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(GENERATE_TEXT_BASE_FALLBACK, e))?;

        let artifact = read_artifact(response, GENERATE_TEXT_BASE_FALLBACK).await?;
        log::info!("Text base generated: {} bytes", artifact.len());
        Ok(artifact)
    }
}
