/// wave3d Web - WASM bindings for the camera and sphere geometry
///
/// The browser side owns the WebGL context. This crate hands it column-major
/// matrices and flat vertex buffers ready for `uniformMatrix4fv` and
/// `bufferData`.
use nalgebra::{Point3, Vector3};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wave3d_core::models::icosphere;
use wave3d_core::{Camera, CameraConfig, GeometryError, GeometryResult, Plane, VertexArrays};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn lens_camera(fov_degrees: f32, near: f32, far: f32, aspect: f32) -> GeometryResult<Camera> {
    let config = CameraConfig {
        fov_degrees,
        near,
        far,
        ..CameraConfig::default()
    };
    config.validate()?;
    if !(aspect > 0.0 && aspect.is_finite()) {
        return Err(GeometryError::invalid_argument(format!(
            "aspect must be positive, got {aspect}"
        )));
    }
    let mut camera = Camera::new(config);
    camera.set_aspect(aspect);
    Ok(camera)
}

#[wasm_bindgen]
pub struct WebCamera {
    inner: Camera,
}

#[wasm_bindgen]
impl WebCamera {
    /// Camera with default settings sized for a `width` x `height` canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebCamera {
        WebCamera {
            inner: Camera::with_viewport(CameraConfig::default(), width, height),
        }
    }

    /// Camera with explicit lens settings
    ///
    /// Rejects lenses that would give a non-finite projection.
    pub fn with_lens(
        fov_degrees: f32,
        near: f32,
        far: f32,
        aspect: f32,
    ) -> Result<WebCamera, JsValue> {
        let inner = lens_camera(fov_degrees, near, far, aspect).map_err(js_error)?;
        Ok(WebCamera { inner })
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.inner.set_position(Point3::new(x, y, z));
    }

    pub fn position(&self) -> Vec<f32> {
        self.inner.position().coords.as_slice().to_vec()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.inner.set_aspect(aspect);
    }

    /// Move relative to the current heading
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.inner
            .translate(&Vector3::new(x, y, z))
            .map_err(js_error)
    }

    pub fn rotate(&mut self, pitch: f32, yaw: f32) {
        self.inner.rotate(pitch, yaw);
    }

    /// View matrix as 16 column-major floats
    pub fn view(&self) -> Result<Vec<f32>, JsValue> {
        let view = self.inner.view().map_err(js_error)?;
        Ok(view.as_slice().to_vec())
    }

    /// Projection matrix as 16 column-major floats
    pub fn projection(&self) -> Vec<f32> {
        self.inner.projection().as_slice().to_vec()
    }

    /// The camera as seen in a mirror through `(ox, oy, oz)` facing `(nx, ny, nz)`
    pub fn reflect(
        &self,
        ox: f32,
        oy: f32,
        oz: f32,
        nx: f32,
        ny: f32,
        nz: f32,
    ) -> Result<WebCamera, JsValue> {
        let plane = Plane::new(Point3::new(ox, oy, oz), Vector3::new(nx, ny, nz));
        let inner = self.inner.reflect(&plane).map_err(js_error)?;
        Ok(WebCamera { inner })
    }
}

/// Icosphere vertex buffers
#[wasm_bindgen]
pub struct WebMesh {
    arrays: VertexArrays,
    vertex_count: usize,
}

#[wasm_bindgen]
impl WebMesh {
    pub fn icosphere(subdivisions: u32) -> Result<WebMesh, JsValue> {
        let mesh = icosphere(subdivisions).map_err(js_error)?;
        Ok(WebMesh {
            vertex_count: mesh.vertex_count(),
            arrays: mesh.to_arrays(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn positions(&self) -> Vec<f32> {
        self.arrays.position.clone()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.arrays.normal.clone()
    }

    pub fn barycentrics(&self) -> Vec<f32> {
        self.arrays.barycentric.clone()
    }

    pub fn colors(&self) -> Vec<f32> {
        self.arrays.color.clone()
    }
}

/// Width over height of the canvas with the given element id
#[wasm_bindgen]
pub fn canvas_aspect(canvas_id: &str) -> Result<f32, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    if canvas.height() == 0 {
        web_sys::console::warn_1(&JsValue::from_str("canvas has zero height"));
        return Ok(1.0);
    }
    Ok(canvas.width() as f32 / canvas.height() as f32)
}
