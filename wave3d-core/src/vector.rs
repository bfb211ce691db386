/// Fixed-arity vector operations and plane reflection
use nalgebra::{Point3, SVector, Vector3};

use crate::error::{MathError, MathResult};

/// An infinite plane through `origin`, facing along `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Plane {
    pub fn new(origin: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { origin, normal }
    }

    /// The plane with the same normal passing through the world origin
    pub fn through_origin(&self) -> Self {
        Self {
            origin: Point3::origin(),
            normal: self.normal,
        }
    }
}

pub fn add<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> SVector<f32, D> {
    a + b
}

pub fn subtract<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> SVector<f32, D> {
    a - b
}

pub fn scale<const D: usize>(v: &SVector<f32, D>, k: f32) -> SVector<f32, D> {
    v * k
}

/// Sum of the component products
pub fn dot<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

pub fn magnitude<const D: usize>(v: &SVector<f32, D>) -> f32 {
    dot(v, v).sqrt()
}

/// Scale `v` to unit length
///
/// Fails with [`MathError::DegenerateVector`] when `v` has no length.
pub fn normalize<const D: usize>(v: &SVector<f32, D>) -> MathResult<SVector<f32, D>> {
    let mag = magnitude(v);
    if mag <= f32::MIN_POSITIVE || !mag.is_finite() {
        return Err(MathError::DegenerateVector);
    }
    Ok(v / mag)
}

/// Mirror a point across a plane
///
/// The plane normal is normalized for the distance term but the offset is
/// applied along the normal as given, so callers should pass a unit normal.
pub fn reflect(point: &Point3<f32>, plane: &Plane) -> MathResult<Point3<f32>> {
    let offset = point - plane.origin;
    let s = dot(&offset, &normalize(&plane.normal)?) * 2.0;
    Ok(point - scale(&plane.normal, s))
}
