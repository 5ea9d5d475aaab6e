use crate::error::{LithoError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILENAME: &str = "litho.png";
pub const DEFAULT_TEXT_HEIGHT_MM: f64 = 12.0;
pub const DEFAULT_TEXT_MARGIN_MM: f64 = 4.0;

/// Image upload for `/api/generate-3d/`.
#[derive(Debug, Clone, Default)]
pub struct ModelGenerationRequest {
    pub file: Vec<u8>,
    pub filename: Option<String>,
    pub text: Option<String>,
    pub text_height_mm: Option<f64>,
    pub text_margin_mm: Option<f64>,
    pub shaping: ShapeOptions,
}

impl ModelGenerationRequest {
    pub fn new(file: impl Into<Vec<u8>>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_text_height_mm(mut self, height: f64) -> Self {
        self.text_height_mm = Some(height);
        self
    }

    pub fn with_text_margin_mm(mut self, margin: f64) -> Self {
        self.text_margin_mm = Some(margin);
        self
    }

    pub fn with_shaping(mut self, shaping: ShapeOptions) -> Self {
        self.shaping = shaping;
        self
    }

    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file.is_empty() {
            return Err(LithoError::InvalidRequest("image file is empty".into()));
        }
        for (name, value) in [
            ("text height", self.text_height_mm),
            ("text margin", self.text_margin_mm),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(LithoError::InvalidRequest(format!(
                        "{} must be a positive number of millimeters, got {}",
                        name, value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Text fields of the multipart form, defaults applied.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("texto", self.text.clone().unwrap_or_default()),
            (
                "texto_alto_mm",
                format_number(self.text_height_mm.unwrap_or(DEFAULT_TEXT_HEIGHT_MM)),
            ),
            (
                "texto_margin_mm",
                format_number(self.text_margin_mm.unwrap_or(DEFAULT_TEXT_MARGIN_MM)),
            ),
        ]
    }
}

/// Lithophane outline accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelShape {
    #[serde(rename = "Corazón")]
    Heart,
    #[serde(rename = "Círculo")]
    Circle,
    #[serde(rename = "Cuadrado")]
    Square,
}

impl ModelShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelShape::Heart => "Corazón",
            ModelShape::Circle => "Círculo",
            ModelShape::Square => "Cuadrado",
        }
    }
}

/// Frame and framing parameters, sent as query parameters only when set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeOptions {
    pub shape: Option<ModelShape>,
    pub zoom: Option<f64>,
    pub frame_width_mm: Option<f64>,
    pub offset_x: Option<i32>,
    pub offset_y: Option<i32>,
}

impl ShapeOptions {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(shape) = self.shape {
            params.push(("shape", shape.as_str().to_string()));
        }
        if let Some(zoom) = self.zoom {
            params.push(("zoom", format_number(zoom)));
        }
        if let Some(width) = self.frame_width_mm {
            params.push(("frame_width", format_number(width)));
        }
        if let Some(x) = self.offset_x {
            params.push(("offset_x", x.to_string()));
        }
        if let Some(y) = self.offset_y {
            params.push(("offset_y", y.to_string()));
        }
        params
    }
}

/// Text-only upload for `/api/generate-text-base/`. The text is forwarded
/// unchecked, the backend decides what it accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBaseRequest {
    pub texto: String,
}

impl TextBaseRequest {
    pub fn new(texto: impl Into<String>) -> Self {
        Self {
            texto: texto.into(),
        }
    }
}

/// Error payload of a failed generation call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Parses a failure body. Only a JSON object counts: derived structs
    /// would also accept a sequence like `["disk full"]` as positional fields.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("error body is not a JSON object"));
        }
        serde_json::from_value(value)
    }
}

// f64's Display is locale-free and drops a zero fraction: 12.0 -> "12".
fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_to_form_fields() {
        let request = ModelGenerationRequest::new(vec![1, 2, 3]);
        assert_eq!(request.filename(), "litho.png");
        assert_eq!(
            request.form_fields(),
            vec![
                ("texto", String::new()),
                ("texto_alto_mm", "12".to_string()),
                ("texto_margin_mm", "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbers_serialize_as_plain_decimals() {
        let request = ModelGenerationRequest::new(vec![1])
            .with_text("ANA")
            .with_text_height_mm(12.5)
            .with_text_margin_mm(3.0);
        let fields = request.form_fields();
        assert_eq!(fields[0].1, "ANA");
        assert_eq!(fields[1].1, "12.5");
        assert_eq!(fields[2].1, "3");
    }

    #[test]
    fn test_validate() {
        assert!(ModelGenerationRequest::new(vec![7]).validate().is_ok());
        assert!(matches!(
            ModelGenerationRequest::new(Vec::new()).validate(),
            Err(LithoError::InvalidRequest(_))
        ));
        assert!(ModelGenerationRequest::new(vec![7])
            .with_text_height_mm(0.0)
            .validate()
            .is_err());
        assert!(ModelGenerationRequest::new(vec![7])
            .with_text_margin_mm(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_query_params_only_when_set() {
        assert!(ShapeOptions::default().query_params().is_empty());

        let shaping = ShapeOptions {
            shape: Some(ModelShape::Circle),
            zoom: Some(1.2),
            offset_y: Some(-15),
            ..Default::default()
        };
        assert_eq!(
            shaping.query_params(),
            vec![
                ("shape", "Círculo".to_string()),
                ("zoom", "1.2".to_string()),
                ("offset_y", "-15".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_body_shapes() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"bad image"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("bad image"));

        let body: ErrorBody = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(body.detail.is_none());

        assert!(serde_json::from_str::<ErrorBody>(r#"{"detail":[{"loc":["file"]}]}"#).is_err());
    }

    #[test]
    fn test_error_body_from_slice_requires_object() {
        let body = ErrorBody::from_slice(br#"{"detail":"bad image"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("bad image"));

        assert!(ErrorBody::from_slice(br#"["disk full"]"#).is_err());
        assert!(ErrorBody::from_slice(br#""disk full""#).is_err());
        assert!(ErrorBody::from_slice(b"null").is_err());
    }
}
