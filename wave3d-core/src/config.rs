/// Camera configuration
///
/// Field of view, clip planes and input scaling used to be hard-coded in
/// every scene. They live here so scenes can load them from a file.
use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// Tunables shared by every [`Camera`](crate::camera::Camera).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Distance kept between pitch and straight up/down, in radians.
    pub pitch_padding: f32,
    /// Multiplier applied to `rotate` input.
    pub rotate_scale: f32,
    /// Initial eye position.
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 1.0,
            far: 500.0,
            pitch_padding: 0.01,
            rotate_scale: PI,
            position: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraConfig {
    /// Config with a different far plane, everything else default.
    #[must_use]
    pub fn with_far(far: f32) -> Self {
        Self {
            far,
            ..Self::default()
        }
    }

    /// Check that the settings give a finite projection and a usable pitch range.
    ///
    /// Deserialized configs are not checked on their own; call this before
    /// building a [`Camera`](crate::camera::Camera) from user input.
    pub fn validate(&self) -> GeometryResult<()> {
        if !(0.0..FRAC_PI_2).contains(&self.pitch_padding) {
            return Err(GeometryError::invalid_argument(format!(
                "pitch_padding must be in [0, pi/2), got {}",
                self.pitch_padding
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(GeometryError::invalid_argument(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.near.is_finite()) {
            return Err(GeometryError::invalid_argument(format!(
                "near must be positive, got {}",
                self.near
            )));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return Err(GeometryError::invalid_argument(format!(
                "far must be beyond near ({}), got {}",
                self.near, self.far
            )));
        }
        if !self.rotate_scale.is_finite() || !self.position.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::invalid_argument(
                "rotate_scale and position must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CameraConfig::default();
        assert_eq!(config.fov_degrees, 45.0);
        assert_eq!(config.near, 1.0);
        assert_eq!(config.far, 500.0);
        assert_eq!(config.rotate_scale, PI);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CameraConfig = serde_json::from_str(r#"{ "far": 1000.0 }"#).unwrap();
        assert_eq!(config, CameraConfig::with_far(1000.0));
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = CameraConfig {
            pitch_padding: 0.05,
            ..CameraConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CameraConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    fn rejects(json: &str) -> bool {
        let config: CameraConfig = serde_json::from_str(json).unwrap();
        matches!(config.validate(), Err(GeometryError::InvalidArgument(_)))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));
        assert_eq!(CameraConfig::with_far(1000.0).validate(), Ok(()));
        assert!(!rejects(r#"{ "pitch_padding": 0.0 }"#));
    }

    #[test]
    fn test_validate_rejects_pitch_padding() {
        assert!(rejects(r#"{ "pitch_padding": 2.0 }"#));
        assert!(rejects(r#"{ "pitch_padding": -0.1 }"#));
    }

    #[test]
    fn test_validate_rejects_fov() {
        assert!(rejects(r#"{ "fov_degrees": 0.0 }"#));
        assert!(rejects(r#"{ "fov_degrees": 180.0 }"#));
    }

    #[test]
    fn test_validate_rejects_clip_planes() {
        assert!(rejects(r#"{ "near": 0.0 }"#));
        assert!(rejects(r#"{ "near": -1.0 }"#));
        assert!(rejects(r#"{ "near": 5.0, "far": 5.0 }"#));
        assert!(rejects(r#"{ "near": 5.0, "far": 2.0 }"#));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = CameraConfig {
            rotate_scale: f32::NAN,
            ..CameraConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CameraConfig {
            pitch_padding: f32::NAN,
            ..CameraConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
