/// Procedural base meshes and flat normal generation
mod icosahedron;
mod quad;
mod subdivide;

pub use icosahedron::{
    build_icosahedron, icosphere, ICOSAHEDRON_LINES, ICOSAHEDRON_TRIS, ICOSAHEDRON_VERTICES,
    PHI,
};
pub use quad::build_quad;
pub use subdivide::{subdivide_mesh, subdivide_triangle, MAX_SUBDIVISIONS};

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{face_normal, BaseVertex};

/// Give every vertex the flat normal of its triangle.
///
/// Triangles are wound counter-clockwise, so `(0,0,0), (1,0,0), (0,1,0)`
/// gets `(0,0,1)`. Vertices are not shared, so nothing is averaged.
pub fn calculate_normals<V: BaseVertex>(vertices: &mut [V]) -> GeometryResult<()> {
    if vertices.len() % 3 != 0 {
        return Err(GeometryError::invalid_argument(format!(
            "cannot compute normals for {} vertices, expected a multiple of 3",
            vertices.len()
        )));
    }

    for tri in vertices.chunks_exact_mut(3) {
        let normal = face_normal(&[tri[0].position(), tri[1].position(), tri[2].position()])?;
        for vertex in tri.iter_mut() {
            vertex.set_normal(normal);
        }
    }
    Ok(())
}
