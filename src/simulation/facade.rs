use wasm_bindgen::prelude::*;

use super::perf_stats::StepStats;
use super::{SessionConfig, SessionCore};

fn to_js(err: crate::core::RigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Game {
    core: SessionCore,
}

#[wasm_bindgen]
impl Game {
    /// Create a game with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Game, JsValue> {
        let core = SessionCore::new(SessionConfig::default()).map_err(to_js)?;
        Ok(Self { core })
    }

    /// Create a game from a JSON `SessionConfig`; missing fields take their defaults.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: String) -> Result<Game, JsValue> {
        let core = SessionCore::from_json(&json).map_err(to_js)?;
        Ok(Self { core })
    }

    /// Effective configuration as JSON.
    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    /// Feed a `KeyboardEvent.code` key-down. Returns false for unmapped keys.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.core.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.core.key_up(code)
    }

    /// Advance one presentation frame.
    pub fn tick(&mut self) {
        self.core.tick();
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    pub fn toggle_pause(&mut self) {
        self.core.toggle_pause();
    }

    pub fn single_step(&mut self) {
        self.core.single_step();
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_gravity(x, y).map_err(to_js)
    }

    pub fn set_damping(&mut self, damping: f32) -> Result<(), JsValue> {
        self.core.set_damping(damping).map_err(to_js)
    }

    pub fn set_impulses_while_paused(&mut self, enabled: bool) {
        self.core.set_impulses_while_paused(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool { self.core.paused() }

    #[wasm_bindgen(getter)]
    pub fn fallen(&self) -> bool { self.core.fallen() }

    #[wasm_bindgen(getter)]
    pub fn should_quit(&self) -> bool { self.core.should_quit() }

    #[wasm_bindgen(getter)]
    pub fn sim_time(&self) -> f64 { self.core.sim_time() }

    /// Top of the ground box, for drawing the floor line.
    #[wasm_bindgen(getter)]
    pub fn ground_surface(&self) -> f32 { self.core.config().ground.surface }

    pub fn get_stats(&self) -> StepStats {
        self.core.stats()
    }

    /// Drawables as a JSON array, back to front.
    pub fn draw_list_json(&self) -> String {
        self.core.draw_list_json()
    }

    /// Same data as `draw_list_json` packed as `[z, x, y, angle, half_w, half_h]` per segment.
    pub fn pose_buffer(&self) -> Vec<f32> {
        self.core.pose_buffer()
    }

    #[wasm_bindgen(getter)]
    pub fn pose_stride(&self) -> usize { super::POSE_STRIDE }
}
