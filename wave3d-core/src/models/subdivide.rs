/// Recursive triangle refinement on the unit sphere
use nalgebra::Point3;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult, MathResult};
use crate::geometry::{BaseVertex, Triangle};
use crate::vector::normalize;

/// Deepest refinement accepted by [`subdivide_mesh`]
///
/// Eight passes turn the 20-face icosahedron into 1,310,720 triangles.
pub const MAX_SUBDIVISIONS: u32 = 8;

/// Children of a split triangle, as indices into `[v0, v1, v2, m01, m12, m20]`:
/// one triangle per original corner plus the center one.
const SPLIT_PATTERN: [[usize; 3]; 4] = [[0, 3, 5], [3, 1, 4], [5, 3, 4], [5, 4, 2]];

/// Split a triangle into four at its edge midpoints
///
/// Midpoints are pushed back onto the unit sphere, so repeated splitting of a
/// sphere-inscribed mesh converges on the sphere. Winding is preserved.
pub fn subdivide_triangle(tri: &Triangle) -> MathResult<[Triangle; 4]> {
    let [v0, v1, v2] = *tri;
    let points = [
        v0,
        v1,
        v2,
        midway(&v0, &v1)?,
        midway(&v1, &v2)?,
        midway(&v2, &v0)?,
    ];

    Ok(SPLIT_PATTERN.map(|[a, b, c]| [points[a], points[b], points[c]]))
}

fn midway(p0: &Point3<f32>, p1: &Point3<f32>) -> MathResult<Point3<f32>> {
    let mid = (p0.coords + p1.coords) * 0.5;
    Ok(Point3::from(normalize(&mid)?))
}

/// Subdivide every triangle of a mesh `count` times
///
/// At most [`MAX_SUBDIVISIONS`] passes are allowed. Each pass multiplies the
/// triangle count by four; the output buffer of each pass is allocated at its
/// final size. Only positions carry over; every output vertex is produced by
/// `build(position, slot)`.
pub fn subdivide_mesh<V, F>(vertices: &[V], count: u32, mut build: F) -> GeometryResult<Vec<V>>
where
    V: BaseVertex,
    F: FnMut(Point3<f32>, usize) -> V,
{
    if vertices.len() % 3 != 0 {
        return Err(GeometryError::invalid_argument(format!(
            "cannot subdivide {} vertices, expected a multiple of 3",
            vertices.len()
        )));
    }
    if count > MAX_SUBDIVISIONS {
        return Err(GeometryError::invalid_argument(format!(
            "{count} subdivisions requested, at most {MAX_SUBDIVISIONS} are supported"
        )));
    }

    let mut positions: Vec<Point3<f32>> = vertices.iter().map(BaseVertex::position).collect();
    for _ in 0..count {
        let mut next = Vec::with_capacity(positions.len() * 4);
        for tri in positions.chunks_exact(3) {
            for child in subdivide_triangle(&[tri[0], tri[1], tri[2]])? {
                next.extend_from_slice(&child);
            }
        }
        positions = next;
    }
    debug!(passes = count, vertices = positions.len(), "subdivided mesh");

    let mut output = Vec::with_capacity(positions.len());
    for tri in positions.chunks_exact(3) {
        for (slot, &position) in tri.iter().enumerate() {
            output.push(build(position, slot));
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use crate::geometry::{face_normal, Vertex};
    use crate::models::build_icosahedron;
    use approx::assert_relative_eq;

    fn octant() -> Triangle {
        [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_subdivide_triangle_pattern() {
        let children = subdivide_triangle(&octant()).unwrap();
        let [v0, v1, v2] = octant();
        let m01 = Point3::new(1.0, 1.0, 0.0) / 2.0f32.sqrt();

        assert_eq!(children[0][0], v0);
        assert_relative_eq!(children[0][1], m01, epsilon = 1e-6);
        assert_eq!(children[1][1], v1);
        assert_eq!(children[3][2], v2);
        for child in &children {
            for p in child {
                assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_subdivide_preserves_winding() {
        let parent = face_normal(&octant()).unwrap();
        for child in subdivide_triangle(&octant()).unwrap() {
            assert!(face_normal(&child).unwrap().dot(&parent) > 0.0);
        }
    }

    #[test]
    fn test_antipodal_edge_is_degenerate() {
        let tri = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(subdivide_triangle(&tri), Err(MathError::DegenerateVector));
    }

    #[test]
    fn test_subdivide_mesh_counts() {
        let base = build_icosahedron(Vertex::with_slot);
        for n in 0..4 {
            let refined = subdivide_mesh(&base, n, Vertex::with_slot).unwrap();
            assert_eq!(refined.len(), 60 * 4usize.pow(n));
        }
    }

    #[test]
    fn test_subdivide_mesh_rebuilds_barycentrics() {
        let base = build_icosahedron(Vertex::with_slot);
        let refined = subdivide_mesh(&base, 1, Vertex::with_slot).unwrap();
        for tri in refined.chunks_exact(3) {
            assert_eq!(tri[0].barycentric, Point3::new(1.0, 0.0, 0.0));
            assert_eq!(tri[1].barycentric, Point3::new(0.0, 1.0, 0.0));
            assert_eq!(tri[2].barycentric, Point3::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_subdivide_ragged_mesh() {
        let base = build_icosahedron(Vertex::with_slot);
        let result = subdivide_mesh(&base[..59], 1, Vertex::with_slot);
        assert!(matches!(result, Err(GeometryError::InvalidArgument(_))));
    }

    #[test]
    fn test_subdivide_mesh_depth_limit() {
        let base = build_icosahedron(Vertex::with_slot);
        for count in [MAX_SUBDIVISIONS + 1, 16, u32::MAX] {
            let result = subdivide_mesh(&base, count, Vertex::with_slot);
            assert!(matches!(result, Err(GeometryError::InvalidArgument(_))));
        }
    }
}
