/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3, Vector4};
use tracing::debug;

use crate::error::{GeometryError, GeometryResult, MathResult};
use crate::vector::{cross, normalize};

/// Three corner positions, counter-clockwise when seen from the front
pub type Triangle = [Point3<f32>; 3];

/// A line segment between two points
pub type Wire = [Point3<f32>; 2];

/// Unit normal of a counter-clockwise triangle
pub fn face_normal(triangle: &Triangle) -> MathResult<Vector3<f32>> {
    let [v0, v1, v2] = triangle;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    normalize(&cross(&edge1, &edge2))
}

/// Barycentric coordinate for the corner at `slot` of a triangle
pub fn barycentric(slot: usize) -> Point3<f32> {
    match slot % 3 {
        0 => Point3::new(1.0, 0.0, 0.0),
        1 => Point3::new(0.0, 1.0, 0.0),
        _ => Point3::new(0.0, 0.0, 1.0),
    }
}

/// Minimal vertex interface needed by normal generation and subdivision
pub trait BaseVertex {
    fn position(&self) -> Point3<f32>;
    fn set_normal(&mut self, normal: Vector3<f32>);
}

/// A 3D vertex with the attributes the scene shaders read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub barycentric: Point3<f32>,
    pub color: Vector4<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            barycentric: barycentric(0),
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Vertex for corner `slot` of its triangle, used as a mesh builder callback
    pub fn with_slot(position: Point3<f32>, slot: usize) -> Self {
        Self {
            barycentric: barycentric(slot),
            ..Self::new(position)
        }
    }

    pub fn with_color(self, color: Vector4<f32>) -> Self {
        Self { color, ..self }
    }
}

impl BaseVertex for Vertex {
    fn position(&self) -> Point3<f32> {
        self.position
    }

    fn set_normal(&mut self, normal: Vector3<f32>) {
        self.normal = normal;
    }
}

/// One contiguous float buffer per [`Vertex`] attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexArrays {
    pub position: Vec<f32>,
    pub normal: Vec<f32>,
    pub barycentric: Vec<f32>,
    pub color: Vec<f32>,
}

/// A non-indexed triangle list: every 3 consecutive vertices form a triangle
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    vertices: Vec<V>,
}

impl<V> Mesh<V> {
    /// Wrap a triangle list, rejecting empty or ragged input
    pub fn new(vertices: Vec<V>) -> GeometryResult<Self> {
        if vertices.is_empty() {
            return Err(GeometryError::EmptyMesh);
        }
        if vertices.len() % 3 != 0 {
            return Err(GeometryError::invalid_argument(format!(
                "triangle list has {} vertices, expected a multiple of 3",
                vertices.len()
            )));
        }
        debug!(vertices = vertices.len(), "built mesh");
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[V]> {
        self.vertices.chunks_exact(3)
    }

    /// Gather one attribute of every vertex into a flat buffer
    pub fn attribute<const N: usize>(&self, extract: impl Fn(&V) -> [f32; N]) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * N);
        for vertex in &self.vertices {
            data.extend_from_slice(&extract(vertex));
        }
        data
    }
}

impl<V: BaseVertex + Clone> Mesh<V> {
    /// The three edges of every triangle, in winding order
    pub fn wires(&self) -> Vec<Wire> {
        let mut wires = Vec::with_capacity(self.vertices.len());
        for tri in self.triangles() {
            let [p0, p1, p2] = [tri[0].position(), tri[1].position(), tri[2].position()];
            wires.push([p0, p1]);
            wires.push([p1, p2]);
            wires.push([p2, p0]);
        }
        wires
    }

    /// Copy of the mesh without the triangles lying entirely below `height`
    pub fn clip_below(&self, height: f32) -> GeometryResult<Self> {
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for tri in self.triangles() {
            if tri.iter().all(|v| v.position().y < height) {
                continue;
            }
            vertices.extend_from_slice(tri);
        }
        Self::new(vertices)
    }

    /// Overwrite every normal with its triangle's flat face normal
    pub fn recalculate_normals(&mut self) -> GeometryResult<()> {
        crate::models::calculate_normals(&mut self.vertices)
    }
}

impl Mesh<Vertex> {
    /// Split the mesh into per-attribute buffers, ready for upload
    pub fn to_arrays(&self) -> VertexArrays {
        VertexArrays {
            position: self.attribute(|v| -> [f32; 3] { v.position.coords.into() }),
            normal: self.attribute(|v| -> [f32; 3] { v.normal.into() }),
            barycentric: self.attribute(|v| -> [f32; 3] { v.barycentric.coords.into() }),
            color: self.attribute(|v| -> [f32; 4] { v.color.into() }),
        }
    }
}
