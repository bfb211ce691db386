/// Camera state and the view/projection matrices derived from it
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use tracing::warn;

use crate::config::CameraConfig;
use crate::error::MathResult;
use crate::matrix::{inverse, multiply, multiply_vector, transform_homogeneous, transform_point};
use crate::transform::{EulerAngles, Transform};
use crate::vector::{reflect, Plane};

/// A camera in 3D space
///
/// Orientation is kept as Euler angles. The camera looks down its local `-Z`
/// axis with `+Y` up. A camera is meant to be owned by the frame loop that
/// moves it; it has no interior synchronization.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    position: Point3<f32>,
    rotation: EulerAngles,
    scale: Vector3<f32>,
    aspect: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        let [x, y, z] = config.position;
        Self {
            config,
            position: Point3::new(x, y, z),
            rotation: EulerAngles::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            aspect: 1.0,
            projection: Self::perspective_for(&config, 1.0),
        }
    }

    /// Camera whose projection matches a `width` x `height` viewport
    pub fn with_viewport(config: CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self::new(config);
        camera.set_aspect(width as f32 / height.max(1) as f32);
        camera
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn rotation(&self) -> EulerAngles {
        self.rotation
    }

    /// Replace the orientation, clamping pitch like [`Camera::rotate`] does
    pub fn set_rotation(&mut self, rotation: EulerAngles) {
        self.rotation = rotation;
        self.rotation.clamp_pitch(self.config.pitch_padding);
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Change the viewport aspect ratio and rebuild the cached projection
    ///
    /// Non-positive or non-finite ratios are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect > 0.0 && aspect.is_finite()) {
            warn!(aspect, "ignoring invalid aspect ratio");
            return;
        }
        self.aspect = aspect;
        self.projection = Self::perspective_for(&self.config, aspect);
    }

    /// Projection for the current aspect ratio
    pub fn projection(&self) -> Matrix4<f32> {
        self.projection
    }

    /// Projection for an arbitrary aspect ratio, leaving the cache alone
    pub fn projection_for(&self, aspect: f32) -> Matrix4<f32> {
        Self::perspective_for(&self.config, aspect)
    }

    fn perspective_for(config: &CameraConfig, aspect: f32) -> Matrix4<f32> {
        Transform::perspective(aspect, config.fov_degrees, config.near, config.far)
    }

    /// Move the camera relative to its current facing
    ///
    /// `direction` is in camera-local axes with pitch ignored, so moving
    /// "forward" (`-Z`) stays level with the ground.
    pub fn translate(&mut self, direction: &Vector3<f32>) -> MathResult<()> {
        let trans = Transform::translation_vector(direction);
        let rot = multiply(&[
            Transform::rotation(0.0, 0.0, self.rotation.roll),
            Transform::rotation(0.0, self.rotation.yaw, 0.0),
        ]);
        let inv_rot = inverse(&rot)?;
        let local = transform_point(&multiply(&[trans, inv_rot]), &self.position);
        self.position = transform_point(&rot, &local);
        Ok(())
    }

    /// Accumulate pitch and yaw, scaled by `rotate_scale`
    ///
    /// Pitch is clamped short of straight up and straight down.
    pub fn rotate(&mut self, pitch: f32, yaw: f32) {
        let k = self.config.rotate_scale;
        self.rotation.rotate(pitch * k, yaw * k, 0.0);
        self.rotation.clamp_pitch(self.config.pitch_padding);
    }

    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        multiply(&[
            Transform::rotation(0.0, 0.0, self.rotation.roll),
            Transform::rotation(0.0, self.rotation.yaw, 0.0),
            Transform::rotation(self.rotation.pitch, 0.0, 0.0),
        ])
    }

    /// Camera-local to world transform: translation * rotation * scale
    pub fn camera_to_world(&self) -> Matrix4<f32> {
        multiply(&[
            Transform::translation(self.position.x, self.position.y, self.position.z),
            self.rotation_matrix(),
            Transform::scaling(self.scale.x, self.scale.y, self.scale.z),
        ])
    }

    /// World to camera transform
    ///
    /// Fails when the camera transform is singular, e.g. a zero scale axis.
    pub fn view(&self) -> MathResult<Matrix4<f32>> {
        inverse(&self.camera_to_world())
    }

    /// [`Camera::view`], falling back to the identity when it cannot be built
    pub fn view_or_identity(&self) -> Matrix4<f32> {
        self.view().unwrap_or_else(|err| {
            warn!(position = ?self.position, scale = ?self.scale, "camera view unavailable: {err}");
            Matrix4::identity()
        })
    }

    /// Direction the camera is looking in world space
    pub fn forward(&self) -> Vector3<f32> {
        multiply_vector(&self.rotation_matrix(), &Vector4::new(0.0, 0.0, -1.0, 0.0)).xyz()
    }

    /// Camera up direction in world space
    pub fn up(&self) -> Vector3<f32> {
        multiply_vector(&self.rotation_matrix(), &Vector4::new(0.0, 1.0, 0.0, 0.0)).xyz()
    }

    /// Reflect the camera in a mirror
    ///
    /// The copy sits at the mirrored position, its forward and up vectors are
    /// mirrored through the plane's normal, and its local X scale is negated so
    /// the handedness flip of the mirror is carried by the scale rather than the
    /// rotation. The resulting view equals `view * reflection(plane)`.
    pub fn reflect(&self, plane: &Plane) -> MathResult<Camera> {
        let mirror = Transform::reflection(&plane.through_origin())?;
        let flip_x = Transform::scaling(-1.0, 1.0, 1.0);
        let rotation = multiply(&[mirror, self.rotation_matrix(), flip_x]);

        Ok(Camera {
            config: self.config,
            position: reflect(&self.position, plane)?,
            rotation: Transform::euler_angles(&rotation),
            scale: Vector3::new(-self.scale.x, self.scale.y, self.scale.z),
            aspect: self.aspect,
            projection: self.projection,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

/// Project a point through a model-view-projection matrix to screen space
///
/// Returns `(x, y, depth)` in pixels with `y` growing downwards, or `None` when
/// the point is behind the eye or outside the viewport.
pub fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip = transform_homogeneous(mvp, &point.to_homogeneous());

    // Prevent division by near-zero depth values
    if clip.w < 1e-6 {
        return None;
    }

    let ndc = clip.xyz() / clip.w;

    // Clip test
    if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
        return None;
    }

    let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

    Some((screen_x, screen_y, ndc.z))
}
