/// 4x4 matrix algebra on column-major storage
///
/// All functions index the matrix through `as_slice()`, which nalgebra keeps
/// in column-major order: `m[0..4]` is column 0. This is also the order the
/// matrices are uploaded in, so none of these functions transpose.
use nalgebra::{Matrix4, Point3, Vector4};

use crate::error::{MathError, MathResult};

/// The four columns of a matrix
pub type Columns = [Vector4<f32>; 4];

/// The four rows of a matrix
pub type Rows = [Vector4<f32>; 4];

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

/// Split the 16-element buffer into its columns
pub fn columns(m: &Matrix4<f32>) -> Columns {
    let s = m.as_slice();
    std::array::from_fn(|i| Vector4::new(s[i * 4], s[i * 4 + 1], s[i * 4 + 2], s[i * 4 + 3]))
}

/// Split the 16-element buffer into its rows
pub fn rows(m: &Matrix4<f32>) -> Rows {
    let s = m.as_slice();
    std::array::from_fn(|i| Vector4::new(s[i], s[4 + i], s[8 + i], s[12 + i]))
}

/// Element-wise sum of every matrix in `mats`
pub fn add_matrices(mats: &[Matrix4<f32>]) -> Matrix4<f32> {
    mats.iter().fold(Matrix4::zeros(), |acc, m| acc + m)
}

/// Column-major matrix-vector product: each column scaled by the matching
/// component of `v`, then summed
pub fn multiply_vector(m: &Matrix4<f32>, v: &Vector4<f32>) -> Vector4<f32> {
    columns(m)
        .iter()
        .zip(v.iter())
        .fold(Vector4::zeros(), |acc, (column, k)| acc + column * *k)
}

/// Left fold of matrix products
///
/// `multiply(&[a, b, c])` is `a * b * c`: transforming a vector by the result
/// applies `c` first. An empty slice yields the identity.
pub fn multiply(mats: &[Matrix4<f32>]) -> Matrix4<f32> {
    let mut iter = mats.iter();
    let Some(first) = iter.next() else {
        return identity();
    };

    iter.fold(*first, |result, m| {
        let transformed = columns(m).map(|column| multiply_vector(&result, &column));
        Matrix4::from_columns(&transformed)
    })
}

/// Transform a point with an implied `w` of 1, then divide by the resulting `w`
pub fn transform_point(m: &Matrix4<f32>, p: &Point3<f32>) -> Point3<f32> {
    let hp = multiply_vector(m, &p.to_homogeneous());
    Point3::new(hp.x / hp.w, hp.y / hp.w, hp.z / hp.w)
}

/// Transform a homogeneous point without the perspective divide
pub fn transform_homogeneous(m: &Matrix4<f32>, p: &Vector4<f32>) -> Vector4<f32> {
    multiply_vector(m, p)
}

/// 24-term cofactor expansion of the determinant
#[rustfmt::skip]
pub fn determinant(m: &Matrix4<f32>) -> f32 {
    let [
        m00, m01, m02, m03,
        m10, m11, m12, m13,
        m20, m21, m22, m23,
        m30, m31, m32, m33,
    ] = flat(m);

    (m00 * m11 * m22 * m33) - (m00 * m11 * m23 * m32) +
    (m00 * m12 * m23 * m31) - (m00 * m12 * m21 * m33) +
    (m00 * m13 * m21 * m32) - (m00 * m13 * m22 * m31) -
    (m01 * m12 * m23 * m30) + (m01 * m12 * m20 * m33) -
    (m01 * m13 * m20 * m32) + (m01 * m13 * m22 * m30) -
    (m01 * m10 * m22 * m33) + (m01 * m10 * m23 * m32) +
    (m02 * m13 * m20 * m31) - (m02 * m13 * m21 * m30) +
    (m02 * m10 * m21 * m33) - (m02 * m10 * m23 * m31) +
    (m02 * m11 * m23 * m30) - (m02 * m11 * m20 * m33) -
    (m03 * m10 * m21 * m32) + (m03 * m10 * m22 * m31) -
    (m03 * m11 * m22 * m30) + (m03 * m11 * m20 * m32) -
    (m03 * m12 * m20 * m31) + (m03 * m12 * m21 * m30)
}

/// Invert a matrix through its adjugate
///
/// The 16 cofactors are assembled from twelve 2x2 minors, six over the first
/// two rows (`a0..a5`) and six over the last two (`b0..b5`), then divided by
/// the determinant.
///
/// Returns [`MathError::SingularMatrix`] when the determinant is zero.
pub fn inverse(m: &Matrix4<f32>) -> MathResult<Matrix4<f32>> {
    let det = determinant(m);
    if det == 0.0 || !det.is_finite() {
        return Err(MathError::SingularMatrix);
    }
    let d = 1.0 / det;
    let m = flat(m);

    let b0 = (m[2] * m[7]) - (m[6] * m[3]);
    let b1 = (m[2] * m[11]) - (m[10] * m[3]);
    let b2 = (m[14] * m[3]) - (m[2] * m[15]);
    let b3 = (m[6] * m[11]) - (m[10] * m[7]);
    let b4 = (m[14] * m[7]) - (m[6] * m[15]);
    let b5 = (m[10] * m[15]) - (m[14] * m[11]);

    let a0 = (m[0] * m[5]) - (m[4] * m[1]);
    let a1 = (m[0] * m[9]) - (m[8] * m[1]);
    let a2 = (m[12] * m[1]) - (m[0] * m[13]);
    let a3 = (m[4] * m[9]) - (m[8] * m[5]);
    let a4 = (m[12] * m[5]) - (m[4] * m[13]);
    let a5 = (m[8] * m[13]) - (m[12] * m[9]);

    let d11 = (m[5] * b5) + (m[9] * b4) + (m[13] * b3);
    let d12 = (m[1] * b5) + (m[9] * b2) + (m[13] * b1);
    let d13 = (m[1] * -b4) + (m[5] * b2) + (m[13] * b0);
    let d14 = (m[1] * b3) + (m[5] * -b1) + (m[9] * b0);

    let d21 = (m[4] * b5) + (m[8] * b4) + (m[12] * b3);
    let d22 = (m[0] * b5) + (m[8] * b2) + (m[12] * b1);
    let d23 = (m[0] * -b4) + (m[4] * b2) + (m[12] * b0);
    let d24 = (m[0] * b3) + (m[4] * -b1) + (m[8] * b0);

    let d31 = (m[7] * a5) + (m[11] * a4) + (m[15] * a3);
    let d32 = (m[3] * a5) + (m[11] * a2) + (m[15] * a1);
    let d33 = (m[3] * -a4) + (m[7] * a2) + (m[15] * a0);
    let d34 = (m[3] * a3) + (m[7] * -a1) + (m[11] * a0);

    let d41 = (m[6] * a5) + (m[10] * a4) + (m[14] * a3);
    let d42 = (m[2] * a5) + (m[10] * a2) + (m[14] * a1);
    let d43 = (m[2] * -a4) + (m[6] * a2) + (m[14] * a0);
    let d44 = (m[2] * a3) + (m[6] * -a1) + (m[10] * a0);

    Ok(Matrix4::from_column_slice(&[
        d11 * d,
        -(d12 * d),
        d13 * d,
        -(d14 * d),
        -(d21 * d),
        d22 * d,
        -(d23 * d),
        d24 * d,
        d31 * d,
        -(d32 * d),
        d33 * d,
        -(d34 * d),
        -(d41 * d),
        d42 * d,
        -(d43 * d),
        d44 * d,
    ]))
}

fn flat(m: &Matrix4<f32>) -> [f32; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(m.as_slice());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[rustfmt::skip]
    fn sample() -> Matrix4<f32> {
        Matrix4::from_column_slice(&[
            1.0, 0.0, 4.0, 0.0,
            0.0, 1.0, 0.0, 2.0,
            2.0, 0.0, 3.0, 0.0,
            0.0, 7.0, 1.0, 2.0,
        ])
    }

    #[test]
    fn test_columns_and_rows() {
        let m = sample();
        let cols = columns(&m);
        assert_eq!(cols[0], Vector4::new(1.0, 0.0, 4.0, 0.0));
        assert_eq!(cols[3], Vector4::new(0.0, 7.0, 1.0, 2.0));

        let rows = rows(&m);
        assert_eq!(rows[0], Vector4::new(1.0, 0.0, 2.0, 0.0));
        assert_eq!(rows[1], Vector4::new(0.0, 1.0, 0.0, 7.0));
    }

    #[test]
    #[rustfmt::skip]
    fn test_multiply_matrices() {
        let other = Matrix4::from_column_slice(&[
            3.0, 3.0, 5.0, 8.0,
            7.0, 1.0, 4.0, 5.0,
            2.0, 3.0, 2.0, 1.0,
            3.0, 5.0, 0.0, 1.0,
        ]);
        let expected = Matrix4::from_column_slice(&[
            13.0, 59.0, 35.0, 22.0,
            15.0, 36.0, 45.0, 12.0,
             6.0, 10.0, 15.0,  8.0,
             3.0, 12.0, 13.0, 12.0,
        ]);

        let result = multiply(&[sample(), other]);
        assert_eq!(result, expected);
        // Agrees with nalgebra's own product
        assert_eq!(result, sample() * other);
    }

    #[test]
    fn test_multiply_edge_cases() {
        assert_eq!(multiply(&[]), identity());
        assert_eq!(multiply(&[sample()]), sample());
    }

    #[test]
    fn test_multiply_vector() {
        let result = multiply_vector(&sample(), &Vector4::new(4.0, 5.0, 6.0, 1.0));
        assert_eq!(result, Vector4::new(16.0, 12.0, 35.0, 12.0));
    }

    #[test]
    fn test_transform_point() {
        let result = transform_point(&sample(), &Point3::new(4.0, 5.0, 6.0));
        assert_relative_eq!(result, Point3::new(1.333_333, 1.0, 2.916_667), epsilon = 1e-4);
    }

    #[test]
    fn test_transform_homogeneous_skips_divide() {
        let result = transform_homogeneous(&sample(), &Vector4::new(4.0, 5.0, 6.0, 1.0));
        assert_eq!(result.w, 12.0);
        assert_eq!(result.x, 16.0);
    }

    #[test]
    fn test_add_matrices() {
        let sum = add_matrices(&[identity(), identity(), sample()]);
        assert_eq!(sum[(0, 0)], 3.0);
        assert_eq!(sum[(3, 3)], 4.0);
        assert_eq!(sum[(2, 0)], 4.0);
    }

    #[test]
    fn test_determinant() {
        assert_eq!(determinant(&identity()), 1.0);
        let m = Matrix4::from_column_slice(&INVERTIBLE);
        assert_relative_eq!(determinant(&m), 356.0, epsilon = 1e-3);
        assert_relative_eq!(determinant(&m), m.determinant(), epsilon = 1e-3);
    }

    #[rustfmt::skip]
    const INVERTIBLE: [f32; 16] = [
        3.0, 7.0, 2.0, 3.0,
        3.0, 1.0, 3.0, 5.0,
        5.0, 4.0, 2.0, 0.0,
        8.0, 5.0, 1.0, 1.0,
    ];

    #[test]
    #[rustfmt::skip]
    fn test_inverse() {
        let m = Matrix4::from_column_slice(&INVERTIBLE);
        let expected = Matrix4::from_column_slice(&[
            -0.112_360,  0.033_708, -0.022_472,  0.168_539,
             0.179_775, -0.103_933, -0.014_045, -0.019_663,
            -0.078_652,  0.123_596,  0.584_270, -0.382_022,
             0.078_652,  0.126_404, -0.334_270,  0.132_022,
        ]);

        let result = inverse(&m).unwrap();
        assert_relative_eq!(result, expected, epsilon = 1e-4);
        assert_relative_eq!(multiply(&[m, result]), identity(), epsilon = 1e-4);
    }

    #[test]
    fn test_inverse_singular() {
        let mut m = identity();
        m[(1, 1)] = 0.0;
        assert_eq!(inverse(&m), Err(MathError::SingularMatrix));
        assert_eq!(inverse(&Matrix4::zeros()), Err(MathError::SingularMatrix));
    }
}
