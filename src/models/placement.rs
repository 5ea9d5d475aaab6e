use crate::models::artifact::GeneratedArtifact;
use serde::{Deserialize, Serialize};

/// Per-axis values where `None` means "viewer default", not zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Vec3 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Fills absent axes from `defaults`.
    pub fn resolve(&self, defaults: [f64; 3]) -> [f64; 3] {
        [
            self.x.unwrap_or(defaults[0]),
            self.y.unwrap_or(defaults[1]),
            self.z.unwrap_or(defaults[2]),
        ]
    }
}

/// A generated STL plus how it should sit in the scene. Rotation is in
/// degrees, offset in scene units.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementDescriptor {
    pub artifact: GeneratedArtifact,
    pub rotation: Option<Vec3>,
    pub offset: Option<Vec3>,
}

impl PlacementDescriptor {
    pub fn new(artifact: GeneratedArtifact) -> Self {
        Self {
            artifact,
            rotation: None,
            offset: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn rotation_or(&self, defaults: [f64; 3]) -> [f64; 3] {
        self.rotation.unwrap_or_default().resolve(defaults)
    }

    pub fn offset_or(&self, defaults: [f64; 3]) -> [f64; 3] {
        self.offset.unwrap_or_default().resolve(defaults)
    }
}
