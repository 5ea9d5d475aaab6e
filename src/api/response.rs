use crate::{
    error::{LithoError, Result},
    models::{filename_from_disposition, ErrorBody, GeneratedArtifact},
};
use reqwest::{header::CONTENT_DISPOSITION, Response};

/// What a failed response told us about the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FailureDetail {
    Backend(String),
    Unreadable,
}

impl FailureDetail {
    /// Anything other than a JSON object with a non-empty string `detail`
    /// is unreadable.
    pub(crate) fn from_body(body: &[u8]) -> Self {
        match ErrorBody::from_slice(body) {
            Ok(ErrorBody {
                detail: Some(detail),
            }) if !detail.is_empty() => FailureDetail::Backend(detail),
            Ok(_) => FailureDetail::Unreadable,
            Err(e) => {
                log::debug!("Error body is not a detail payload: {}", e);
                FailureDetail::Unreadable
            }
        }
    }

    pub(crate) fn into_message(self, fallback: &str) -> String {
        match self {
            FailureDetail::Backend(detail) => detail,
            FailureDetail::Unreadable => fallback.to_string(),
        }
    }
}

pub(crate) fn transport_error(fallback: &str, error: reqwest::Error) -> LithoError {
    LithoError::RequestFailed(format!("{}: {}", fallback, error))
}

/// Turns a generation response into the artifact, or into `RequestFailed`
/// carrying the backend's `detail` (or `fallback`).
pub(crate) async fn read_artifact(response: Response, fallback: &str) -> Result<GeneratedArtifact> {
    let status = response.status();

    if !status.is_success() {
        let detail = match response.bytes().await {
            Ok(body) => FailureDetail::from_body(&body),
            Err(e) => {
                log::debug!("Could not read error body: {}", e);
                FailureDetail::Unreadable
            }
        };
        let message = detail.into_message(fallback);
        log::warn!("Backend answered {}: {}", status, message);
        return Err(LithoError::RequestFailed(message));
    }

    let suggested_filename = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
        .and_then(filename_from_disposition);

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(fallback, e))?;

    let artifact = GeneratedArtifact::new(body.to_vec());
    Ok(match suggested_filename {
        Some(filename) => artifact.with_suggested_filename(filename),
        None => artifact,
    })
}
