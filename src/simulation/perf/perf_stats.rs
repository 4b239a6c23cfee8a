use wasm_bindgen::prelude::*;

/// Running counters for one session. Cloned out to JS on demand.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepStats {
    pub(super) ticks: u32,
    pub(super) stepper_calls: u32,
    pub(super) substeps: u32,
    pub(super) sim_seconds: f64,
    pub(super) impulses: u32,
    pub(super) resets: u32,
    pub(super) falls: u32,
    pub(super) last_step_ms: f64,
}

#[wasm_bindgen]
impl StepStats {
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
    #[wasm_bindgen(getter)]
    pub fn stepper_calls(&self) -> u32 { self.stepper_calls }
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
    #[wasm_bindgen(getter)]
    pub fn sim_seconds(&self) -> f64 { self.sim_seconds }
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    #[wasm_bindgen(getter)]
    pub fn resets(&self) -> u32 { self.resets }
    #[wasm_bindgen(getter)]
    pub fn falls(&self) -> u32 { self.falls }
    /// Wall-clock duration of the most recent stepper call.
    #[wasm_bindgen(getter)]
    pub fn last_step_ms(&self) -> f64 { self.last_step_ms }
}
