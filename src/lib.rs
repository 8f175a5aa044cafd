use wasm_bindgen::prelude::*;

pub mod engine;
pub mod math;

use engine::error::SpongeError;
use engine::renderer;
use engine::scene::{SceneConfig, SceneState};

/// Initialize the WASM module (runs once when JS instantiates it).
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Sponge scene handle held by the JS host.
///
/// Built once at startup; the host then calls `renderFrame` from its frame
/// callback with a monotonically increasing frame index and replays the
/// returned command buffer against its canvas.
#[wasm_bindgen]
pub struct MengerScene {
    state: SceneState,
}

#[wasm_bindgen]
impl MengerScene {
    /// `config` — optional JS object with any of the `SceneConfig` fields in
    /// camelCase (`level`, `initialSize`, `width`, `height`, ...).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MengerScene, JsError> {
        let config = config_from_js(config)?;
        let state = SceneState::new(config)?;
        Ok(Self { state })
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        self.state.config().level
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.state.config().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.state.config().height
    }

    #[wasm_bindgen(getter, js_name = cubeSize)]
    pub fn cube_size(&self) -> f64 {
        self.state.cube_size()
    }

    #[wasm_bindgen(getter, js_name = cubeCount)]
    pub fn cube_count(&self) -> u32 {
        self.state.positions().len() as u32
    }

    #[wasm_bindgen(getter, js_name = minZ)]
    pub fn min_z(&self) -> f64 {
        self.state.min_z()
    }

    #[wasm_bindgen(getter, js_name = maxZ)]
    pub fn max_z(&self) -> f64 {
        self.state.max_z()
    }

    /// Cube centers as a flat [x, y, z, x, y, z, ...] array.
    pub fn positions(&self) -> js_sys::Float64Array {
        js_sys::Float64Array::from(flatten(self.state.positions()).as_slice())
    }

    /// Per-cube gradient colors as a flat [r, g, b, ...] byte array.
    pub fn colors(&self) -> js_sys::Uint8Array {
        let bytes: Vec<u8> = self
            .state
            .positions()
            .iter()
            .flat_map(|p| self.state.cube_color(p.z).to_bytes())
            .collect();
        js_sys::Uint8Array::from(bytes.as_slice())
    }

    /// Draw-call buffer for one frame (layout: `renderer::CommandBuffer`).
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self, frame_index: u32) -> js_sys::Float64Array {
        js_sys::Float64Array::from(renderer::encode_frame(&self.state, frame_index).as_slice())
    }

    /// Cube centers after the frame's global rotation, flat xyz.
    #[wasm_bindgen(js_name = worldPositions)]
    pub fn world_positions(&self, frame_index: u32) -> js_sys::Float64Array {
        let world = renderer::world_positions(&self.state, frame_index);
        js_sys::Float64Array::from(flatten(&world).as_slice())
    }
}

/// Generate sponge positions without building a scene.
///
/// Returns a flat [x, y, z, ...] array; the cube edge is `initial_size / 3^level`.
#[wasm_bindgen(js_name = generatePositions)]
pub fn generate_positions(level: u32, initial_size: f64) -> Result<js_sys::Float64Array, JsError> {
    let sponge = engine::sponge::generate_sponge(level, initial_size)?;
    Ok(js_sys::Float64Array::from(flatten(&sponge.positions).as_slice()))
}

/// Decode a scene config from JS. `undefined` and `null` select the defaults.
fn config_from_js(value: JsValue) -> Result<SceneConfig, SpongeError> {
    if value.is_undefined() || value.is_null() {
        return Ok(SceneConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| SpongeError::InvalidConfig(e.to_string()))
}

fn flatten(points: &[engine::types::Vec3D]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::types::Vec3D;

    #[test]
    fn test_flatten() {
        let flat = flatten(&[Vec3D::new(1.0, 2.0, 3.0), Vec3D::new(-1.0, 0.0, 5.0)]);
        assert_eq!(flat, vec![1.0, 2.0, 3.0, -1.0, 0.0, 5.0]);
    }
}
