/// Viewer settings loaded from an optional JSON file
use std::fs;
use std::io;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use wave3d_core::models::MAX_SUBDIVISIONS;
use wave3d_core::{CameraConfig, GeometryError, GeometryResult, Plane};

/// Everything the terminal viewer lets a user tune.
///
/// Missing keys fall back to [`ViewerConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    /// Icosphere refinement passes.
    pub subdivisions: u32,
    /// Distance moved per key press.
    pub move_step: f32,
    /// Rotation input per key press, before the camera's `rotate_scale`.
    pub rotate_step: f32,
    /// Height of the horizontal mirror used by the mirrored view.
    pub mirror_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                position: [0.0, 0.0, 4.0],
                far: 100.0,
                ..CameraConfig::default()
            },
            subdivisions: 2,
            move_step: 0.2,
            rotate_step: 0.02,
            mirror_height: -1.5,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a config
    ///
    /// Both malformed JSON and out-of-range values are `InvalidData`.
    pub fn from_json(text: &str) -> io::Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    pub fn validate(&self) -> GeometryResult<()> {
        self.camera.validate()?;
        if self.subdivisions > MAX_SUBDIVISIONS {
            return Err(GeometryError::invalid_argument(format!(
                "subdivisions must be at most {MAX_SUBDIVISIONS}, got {}",
                self.subdivisions
            )));
        }
        if ![self.move_step, self.rotate_step, self.mirror_height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(GeometryError::invalid_argument(
                "move_step, rotate_step and mirror_height must be finite",
            ));
        }
        Ok(())
    }

    /// The horizontal mirror plane, facing up
    pub fn mirror_plane(&self) -> Plane {
        Plane::new(
            Point3::new(0.0, self.mirror_height, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }
}
