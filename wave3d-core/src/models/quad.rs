/// Screen-filling quad
use nalgebra::Point3;

#[rustfmt::skip]
const QUAD_VERTICES: [[f32; 3]; 6] = [
    [-1.0, -1.0, 0.0],
    [ 1.0, -1.0, 0.0],
    [-1.0,  1.0, 0.0],

    [ 1.0, -1.0, 0.0],
    [ 1.0,  1.0, 0.0],
    [-1.0,  1.0, 0.0],
];

/// Two counter-clockwise triangles covering `[-1, 1]²` in the XY plane.
///
/// `callback` receives each position and its slot within the triangle.
pub fn build_quad<T>(mut callback: impl FnMut(Point3<f32>, usize) -> T) -> Vec<T> {
    QUAD_VERTICES
        .iter()
        .enumerate()
        .map(|(i, &p)| callback(Point3::from(p), i % 3))
        .collect()
}
