/// The regular icosahedron used as the base mesh for spheres
use nalgebra::{Point3, Vector3};

use crate::error::GeometryResult;
use crate::geometry::{Mesh, Vertex};

use super::{calculate_normals, subdivide_mesh};

/// The golden ratio.
pub const PHI: f32 = 1.618_034;

/// Corners of the icosahedron, before projection onto the unit sphere.
#[rustfmt::skip]
pub const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0,  PHI,  0.0],
    [ 1.0,  PHI,  0.0],
    [-1.0, -PHI,  0.0],
    [ 1.0, -PHI,  0.0],
    [ 0.0, -1.0,  PHI],
    [ 0.0,  1.0,  PHI],
    [ 0.0, -1.0, -PHI],
    [ 0.0,  1.0, -PHI],
    [ PHI,  0.0, -1.0],
    [ PHI,  0.0,  1.0],
    [-PHI,  0.0, -1.0],
    [-PHI,  0.0,  1.0],
];

/// Counter-clockwise (outward facing) faces, as indices into
/// [`ICOSAHEDRON_VERTICES`].
pub const ICOSAHEDRON_TRIS: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 30 unique edges, for wireframe rendering.
pub const ICOSAHEDRON_LINES: [[usize; 2]; 30] = [
    // Top
    [0, 11],
    [0, 5],
    [0, 1],
    [0, 7],
    [0, 10],
    [1, 5],
    [5, 11],
    [11, 10],
    [10, 7],
    [7, 1],
    // Bottom
    [3, 9],
    [3, 4],
    [3, 2],
    [3, 6],
    [3, 8],
    [4, 9],
    [2, 4],
    [6, 2],
    [8, 6],
    [9, 8],
    // Mid
    [1, 9],
    [5, 9],
    [5, 4],
    [11, 4],
    [11, 2],
    [10, 2],
    [10, 6],
    [7, 6],
    [7, 8],
    [1, 8],
];

/// Corner `index` projected onto the unit sphere.
///
/// Every corner is a permutation of `(±1, ±φ, 0)`, so they share one length.
fn unit_vertex(index: usize) -> Point3<f32> {
    let radius = (1.0 + PHI * PHI).sqrt();
    Point3::from(Vector3::from(ICOSAHEDRON_VERTICES[index]) / radius)
}

/// Build the 60-vertex triangle list of the icosahedron.
///
/// `callback` receives each unit-sphere position and its slot (0, 1 or 2)
/// within the triangle.
pub fn build_icosahedron<T>(mut callback: impl FnMut(Point3<f32>, usize) -> T) -> Vec<T> {
    let mut vertices = Vec::with_capacity(ICOSAHEDRON_TRIS.len() * 3);
    for tri in &ICOSAHEDRON_TRIS {
        for (slot, &index) in tri.iter().enumerate() {
            vertices.push(callback(unit_vertex(index), slot));
        }
    }
    vertices
}

/// Unit sphere approximated by an icosahedron refined `subdivisions` times,
/// with flat normals and per-triangle barycentric coordinates.
///
/// Fails above [`MAX_SUBDIVISIONS`](crate::models::MAX_SUBDIVISIONS) passes.
pub fn icosphere(subdivisions: u32) -> GeometryResult<Mesh<Vertex>> {
    let base = build_icosahedron(Vertex::with_slot);
    let mut vertices = subdivide_mesh(&base, subdivisions, Vertex::with_slot)?;
    calculate_normals(&mut vertices)?;
    Mesh::new(vertices)
}
