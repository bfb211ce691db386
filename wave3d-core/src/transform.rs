/// 3D transformation matrices and Euler rotation state
use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Vector3};

use crate::error::MathResult;
use crate::matrix::multiply;
use crate::vector::{cross, dot, normalize, Plane};

/// Rotation around the X (pitch), Y (yaw) and Z (roll) axes, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EulerAngles {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.pitch += pitch;
        self.yaw += yaw;
        self.roll += roll;
    }

    /// Keep pitch inside `(-π/2 + padding, π/2 - padding)`
    ///
    /// A padding past vertical (or NaN) pins pitch to level.
    pub fn clamp_pitch(&mut self, padding: f32) {
        let limit = (FRAC_PI_2 - padding).max(0.0);
        self.pitch = self.pitch.clamp(-limit, limit);
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Translation stored in the fourth column
    #[rustfmt::skip]
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::from_column_slice(&[
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            x,   y,   z,   1.0,
        ])
    }

    pub fn translation_vector(v: &Vector3<f32>) -> Matrix4<f32> {
        Self::translation(v.x, v.y, v.z)
    }

    /// Create a rotation matrix from pitch, yaw and roll
    ///
    /// Composed as `Z * Y * X`, so a vector is rotated about X first, then Y,
    /// then Z.
    #[rustfmt::skip]
    pub fn rotation(pitch: f32, yaw: f32, roll: f32) -> Matrix4<f32> {
        let (sx, cx) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        let (sz, cz) = roll.sin_cos();

        let rot_x = Matrix4::from_column_slice(&[
            1.0, 0.0, 0.0, 0.0,
            0.0,  cx,  sx, 0.0,
            0.0, -sx,  cx, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        let rot_y = Matrix4::from_column_slice(&[
             cy, 0.0, -sy, 0.0,
            0.0, 1.0, 0.0, 0.0,
             sy, 0.0,  cy, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        let rot_z = Matrix4::from_column_slice(&[
             cz,  sz, 0.0, 0.0,
            -sz,  cz, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);

        multiply(&[rot_z, rot_y, rot_x])
    }

    pub fn rotation_matrix(angles: &EulerAngles) -> Matrix4<f32> {
        Self::rotation(angles.pitch, angles.yaw, angles.roll)
    }

    /// Recover the angles of a matrix built by [`Transform::rotation`]
    ///
    /// Only the upper 3x3 block is read and it must be a pure rotation. At
    /// yaw = ±π/2 pitch and roll share an axis; roll is reported as zero there.
    pub fn euler_angles(m: &Matrix4<f32>) -> EulerAngles {
        let sin_yaw = -m[(2, 0)];
        if sin_yaw.abs() < 1.0 - 1e-6 {
            EulerAngles {
                pitch: m[(2, 1)].atan2(m[(2, 2)]),
                yaw: sin_yaw.asin(),
                roll: m[(1, 0)].atan2(m[(0, 0)]),
            }
        } else if sin_yaw > 0.0 {
            EulerAngles::new(m[(0, 1)].atan2(m[(1, 1)]), FRAC_PI_2, 0.0)
        } else {
            EulerAngles::new((-m[(0, 1)]).atan2(m[(1, 1)]), -FRAC_PI_2, 0.0)
        }
    }

    /// Create a scale matrix
    pub fn scaling(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::from_diagonal(&nalgebra::Vector4::new(x, y, z, 1.0))
    }

    pub fn uniform_scaling(s: f32) -> Matrix4<f32> {
        Self::scaling(s, s, s)
    }

    /// Symmetric-frustum perspective projection
    ///
    /// The element order matches what the shaders expect and is uploaded
    /// verbatim: the depth pair sits in column 2, the `-1` in column 3.
    #[rustfmt::skip]
    pub fn perspective(aspect: f32, fov_degrees: f32, near: f32, far: f32) -> Matrix4<f32> {
        let fov = fov_degrees.to_radians();
        let f = 1.0 / (fov / 2.0).tan();
        let range = 1.0 / (near - far);

        let x = f / aspect;
        let y = f;
        let z = (near + far) * range;
        let w = near * far * range * 2.0;
        Matrix4::from_column_slice(&[
              x, 0.0, 0.0, 0.0,
            0.0,   y, 0.0, 0.0,
            0.0, 0.0,   z,   w,
            0.0, 0.0, -1.0, 0.0,
        ])
    }

    /// Rotation taking `+Z` onto the direction of `v`
    ///
    /// Built with Rodrigues' formula around `Z × v`. When `v` already points
    /// along `+Z` the identity is returned; along `-Z` the result is a half
    /// turn about X.
    pub fn matrix_from_vector(v: &Vector3<f32>) -> MathResult<Matrix4<f32>> {
        let v = normalize(v)?;
        let unit = Vector3::z();
        let c = dot(&unit, &v).clamp(-1.0, 1.0);

        let Ok(axis) = normalize(&cross(&unit, &v)) else {
            return Ok(if c > 0.0 {
                Matrix4::identity()
            } else {
                Self::scaling(1.0, -1.0, -1.0)
            });
        };

        let s = c.acos().sin();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        Ok(Matrix4::new(
            t * x * x + c,
            t * x * y - z * s,
            t * x * z + y * s,
            0.0,
            t * x * y + z * s,
            t * y * y + c,
            t * y * z - x * s,
            0.0,
            t * x * z - y * s,
            t * y * z + x * s,
            t * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ))
    }

    /// Affine mirror across a plane
    ///
    /// Applying the result to a point matches [`crate::vector::reflect`] for a
    /// unit normal. The matrix is its own inverse and has determinant -1.
    pub fn reflection(plane: &Plane) -> MathResult<Matrix4<f32>> {
        let n = normalize(&plane.normal)?;
        let linear = nalgebra::Matrix3::identity() - (n * n.transpose()) * 2.0;
        let offset = n * (2.0 * dot(&n, &plane.origin.coords));

        let mut m = linear.to_homogeneous();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&offset);
        Ok(m)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        multiply(&[*projection, *view, *model])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{determinant, inverse, transform_point};
    use crate::vector::reflect;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use std::f32::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_euler_angles_state() {
        let mut state = EulerAngles::zero();
        assert_eq!(state.pitch, 0.0);
        assert_eq!(state.yaw, 0.0);
        assert_eq!(state.roll, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.pitch - 0.1).abs() < 1e-6);
        assert!((state.yaw - 0.2).abs() < 1e-6);
        assert!((state.roll - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_pitch() {
        let mut state = EulerAngles::new(10.0, 0.0, 0.0);
        state.clamp_pitch(0.01);
        assert_relative_eq!(state.pitch, FRAC_PI_2 - 0.01);

        state.rotate(-20.0, 0.0, 0.0);
        state.clamp_pitch(0.01);
        assert_relative_eq!(state.pitch, -FRAC_PI_2 + 0.01);
    }

    #[test]
    fn test_clamp_pitch_with_oversized_padding() {
        let mut state = EulerAngles::new(0.5, 0.0, 0.0);
        state.clamp_pitch(2.0);
        assert_eq!(state.pitch, 0.0);

        let mut state = EulerAngles::new(-0.5, 0.0, 0.0);
        state.clamp_pitch(f32::NAN);
        assert_eq!(state.pitch, 0.0);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&EulerAngles::zero());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_rotating_a_point() {
        let m = Transform::rotation(0.0, FRAC_PI_4, 0.0);
        let result = transform_point(&m, &Point3::new(4.0, 5.0, 6.0));
        assert_relative_eq!(result, Point3::new(7.071_068, 5.0, 1.414_214), epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_matches_axis_angle() {
        let (pitch, yaw, roll) = (0.3, -1.1, 0.7);
        let expected = Matrix4::new_rotation(Vector3::z() * roll)
            * Matrix4::new_rotation(Vector3::y() * yaw)
            * Matrix4::new_rotation(Vector3::x() * pitch);
        assert_relative_eq!(Transform::rotation(pitch, yaw, roll), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_euler_angles_round_trip() {
        let angles = EulerAngles::new(0.4, -0.9, 2.5);
        let recovered = Transform::euler_angles(&Transform::rotation_matrix(&angles));
        assert_relative_eq!(recovered.pitch, angles.pitch, epsilon = 1e-4);
        assert_relative_eq!(recovered.yaw, angles.yaw, epsilon = 1e-4);
        assert_relative_eq!(recovered.roll, angles.roll, epsilon = 1e-4);
    }

    #[test]
    fn test_euler_angles_at_gimbal_lock() {
        let m = Transform::rotation(0.6, FRAC_PI_2, 0.0);
        let recovered = Transform::euler_angles(&m);
        assert_relative_eq!(Transform::rotation_matrix(&recovered), m, epsilon = 1e-4);
    }

    #[test]
    fn test_translation_and_scaling() {
        let m = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(&m.as_slice()[12..16], &[1.0, 2.0, 3.0, 1.0]);

        let p = transform_point(&Transform::scaling(2.0, 3.0, 4.0), &Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Point3::new(2.0, 3.0, 4.0));
        assert_eq!(Transform::uniform_scaling(5.0), Transform::scaling(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_perspective_layout() {
        let m = Transform::perspective(2.0, 90.0, 1.0, 3.0);
        let s = m.as_slice();
        assert_relative_eq!(s[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(s[5], 1.0, epsilon = 1e-6);
        assert_relative_eq!(s[10], -2.0, epsilon = 1e-6);
        assert_relative_eq!(s[11], -3.0, epsilon = 1e-6);
        assert_eq!(s[14], -1.0);
        assert_eq!(s[15], 0.0);
    }

    #[test]
    fn test_matrix_from_vector() {
        let target = Vector3::new(1.0, 2.0, -0.5).normalize();
        let m = Transform::matrix_from_vector(&target).unwrap();
        let rotated = transform_point(&m, &Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(rotated.coords, target, epsilon = 1e-5);
        assert_relative_eq!(determinant(&m), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_matrix_from_vector_parallel_axes() {
        let same = Transform::matrix_from_vector(&Vector3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(same, Matrix4::identity());

        let opposite = Transform::matrix_from_vector(&Vector3::new(0.0, 0.0, -1.0)).unwrap();
        let rotated = transform_point(&opposite, &Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(rotated, Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(determinant(&opposite), 1.0);

        assert!(Transform::matrix_from_vector(&Vector3::zeros()).is_err());
    }

    #[test]
    fn test_reflection_matches_point_reflect() {
        let plane = Plane::new(Point3::new(1.0, 2.0, 0.5), Vector3::new(0.0, 0.6, 0.8));
        let m = Transform::reflection(&plane).unwrap();
        let p = Point3::new(-3.0, 4.0, 2.0);

        let expected = reflect(&p, &plane).unwrap();
        assert_relative_eq!(transform_point(&m, &p), expected, epsilon = 1e-5);
        assert_relative_eq!(determinant(&m), -1.0, epsilon = 1e-5);
        assert_relative_eq!(inverse(&m).unwrap(), m, epsilon = 1e-5);
    }

    #[test]
    fn test_mvp_order() {
        let model = Transform::translation(1.0, 0.0, 0.0);
        let view = Transform::rotation(0.0, PI, 0.0);
        let projection = Transform::uniform_scaling(2.0);
        let mvp = Transform::mvp_matrix(&model, &view, &projection);
        assert_relative_eq!(mvp, projection * view * model, epsilon = 1e-6);
    }
}
