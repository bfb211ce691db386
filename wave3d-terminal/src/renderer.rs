/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::io::Write;
use wave3d_core::matrix::multiply_vector;
use wave3d_core::{project_to_screen, Mesh, Transform, Vertex};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character drawn where a pixel lies on a triangle edge
const EDGE_CHAR: char = '|';

/// Barycentric weight below which a pixel counts as an edge
const EDGE_WIDTH: f32 = 0.06;

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    light_dir: Vector3<f32>,
}

/// A triangle corner after projection
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    barycentric: Point3<f32>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            light_dir: Vector3::new(0.3, 0.5, 1.0).normalize(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Number of cells covered by geometry in the last frame
    pub fn covered_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    pub fn render_mesh(
        &mut self,
        mesh: &Mesh<Vertex>,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        let mvp = Transform::mvp_matrix(model, view, projection);
        for triangle in mesh.triangles() {
            self.render_triangle(triangle, model, &mvp);
        }
    }

    fn render_triangle(&mut self, triangle: &[Vertex], model: &Matrix4<f32>, mvp: &Matrix4<f32>) {
        // Project vertices to screen space
        let mut corners = [None; 3];
        for (corner, vertex) in corners.iter_mut().zip(triangle) {
            *corner = project_to_screen(
                mvp,
                &vertex.position,
                self.width as u32,
                self.height as u32,
            )
            .map(|(x, y, depth)| ScreenVertex {
                x,
                y,
                depth,
                barycentric: vertex.barycentric,
            });
        }
        let [Some(v0), Some(v1), Some(v2)] = corners else {
            return; // Triangle is clipped
        };

        // Face normals are flat, so any corner will do
        let n = triangle[0].normal;
        let normal = multiply_vector(model, &Vector4::new(n.x, n.y, n.z, 0.0)).xyz();
        let brightness = normal.dot(&self.light_dir).max(0.0);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle([v0, v1, v2], character);
    }

    fn rasterize_triangle(&mut self, corners: [ScreenVertex; 3], character: char) {
        let [v0, v1, v2] = corners;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    let edge = v0.barycentric.coords * w0
                        + v1.barycentric.coords * w1
                        + v2.barycentric.coords * w2;
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = if edge.min() < EDGE_WIDTH {
                        EDGE_CHAR
                    } else {
                        character
                    };
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkMagenta,
                    '-' | '=' => Color::Magenta,
                    '+' | '*' => Color::Cyan,
                    '#' | '%' | '@' => Color::White,
                    EDGE_CHAR => Color::Yellow,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
