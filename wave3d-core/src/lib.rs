/// wave3d Core Library - Shared math, camera and geometry logic
///
/// This library provides the renderer-independent core for 3D scenes:
/// vector and 4x4 matrix algebra, transform builders, a mirrorable camera,
/// and procedural sphere geometry. Matrices are column-major and can be
/// uploaded as-is through `as_slice()`.
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod models;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{project_to_screen, Camera};
pub use config::CameraConfig;
pub use error::{GeometryError, GeometryResult, MathError, MathResult};
pub use geometry::{BaseVertex, Mesh, Vertex, VertexArrays};
pub use transform::{EulerAngles, Transform};
pub use vector::Plane;
