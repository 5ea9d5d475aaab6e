use std::fmt;
use std::path::Path;

/// STL bytes exactly as the backend sent them.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    data: Vec<u8>,
    suggested_filename: Option<String>,
}

impl GeneratedArtifact {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            suggested_filename: None,
        }
    }

    pub fn with_suggested_filename(mut self, filename: impl Into<String>) -> Self {
        self.suggested_filename = Some(filename.into());
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Filename from the response's `Content-Disposition` header, if any.
    pub fn suggested_filename(&self) -> Option<&str> {
        self.suggested_filename.as_deref()
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        tokio::fs::write(path, &self.data).await
    }
}

impl fmt::Debug for GeneratedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedArtifact")
            .field("len", &self.data.len())
            .field("suggested_filename", &self.suggested_filename)
            .finish()
    }
}

/// Pulls `filename` out of a `Content-Disposition` header value.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim().trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=litho_corazón_manifold.stl"),
            Some("litho_corazón_manifold.stl".to_string())
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="base.stl""#),
            Some("base.stl".to_string())
        );
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition("attachment; filename="), None);
    }

    #[tokio::test]
    async fn test_save_writes_bytes_unchanged() {
        let path = std::env::temp_dir().join(format!("litho-{}.stl", uuid::Uuid::new_v4()));
        let artifact = GeneratedArtifact::new(b"solid litho\nendsolid litho\n".to_vec());

        artifact.save(&path).await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(written, artifact.as_bytes());
    }
}
