use crate::{
    api::response::{read_artifact, transport_error},
    config::ClientConfig,
    error::{LithoError, Result},
    logger::Timer,
    models::{GeneratedArtifact, ModelGenerationRequest},
};
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use std::sync::Arc;

pub const GENERATE_MODEL_PATH: &str = "/api/generate-3d/";
pub const GENERATE_MODEL_FALLBACK: &str = "Error generating model";

#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    config: Arc<ClientConfig>,
}

impl ModelClient {
    pub fn new(client: Client, config: Arc<ClientConfig>) -> Self {
        Self { client, config }
    }

    /// Uploads an image and returns the lithophane STL.
    pub async fn generate(&self, request: ModelGenerationRequest) -> Result<GeneratedArtifact> {
        request.validate()?;

        let url = self.config.endpoint(GENERATE_MODEL_PATH);
        let query = request.shaping.query_params();
        let form = build_form(request)?;

        log::info!("Generating model via {}", url);
        let _timer = Timer::new("generate-3d");

        let mut builder = self.client.post(&url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        let response = builder
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(GENERATE_MODEL_FALLBACK, e))?;

        let artifact = read_artifact(response, GENERATE_MODEL_FALLBACK).await?;
        log::info!("Model generated: {} bytes", artifact.len());
        Ok(artifact)
    }
}

fn build_form(request: ModelGenerationRequest) -> Result<Form> {
    let fields = request.form_fields();
    let filename = request.filename().to_string();
    let mime = image_mime(&filename);

    let file = Part::bytes(request.file)
        .file_name(filename)
        .mime_str(mime)
        .map_err(|e| LithoError::InvalidRequest(format!("bad image content type: {}", e)))?;

    let mut form = Form::new().part("file", file);
    for (name, value) in fields {
        form = form.text(name, value);
    }
    Ok(form)
}

// The backend only accepts JPEG and PNG uploads and checks the part's type.
fn image_mime(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("litho.png"), "image/png");
        assert_eq!(image_mime("Holiday.JPG"), "image/jpeg");
        assert_eq!(image_mime("scan.jpeg"), "image/jpeg");
        assert_eq!(image_mime("noextension"), "application/octet-stream");
    }
}
