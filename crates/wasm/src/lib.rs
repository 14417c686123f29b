#![deny(unsafe_code)]
//! WASM bindings for the browser front end.
//!
//! The page's animation loop owns a [`WasmSim`] per canvas and a single
//! [`WasmQuiz`]. Parameters and snapshots cross the boundary as JSON strings.

use fieldlab_core::error::LabError;
use fieldlab_core::Simulation;
use fieldlab_quiz::{Answer, QuizSession};
use fieldlab_sims::SimKind;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger was already installed by an earlier module instance.
        log::debug!("console logger already initialised");
    }
}

fn js_err(e: LabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_json(text: &str) -> Result<serde_json::Value, LabError> {
    serde_json::from_str(text).map_err(|e| LabError::InvalidInput(format!("JSON: {e}")))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, LabError> {
    serde_json::to_string(value).map_err(|e| LabError::Io(e.to_string()))
}

/// A simulation driven once per animation frame.
#[wasm_bindgen]
pub struct WasmSim {
    inner: SimKind,
}

impl WasmSim {
    fn build(name: &str, width: u32, height: u32, seed: u32, params: &str) -> Result<Self, LabError> {
        let params = parse_json(params)?;
        let inner = SimKind::from_name(name, width, height, u64::from(seed), &params)?;
        Ok(Self { inner })
    }

    fn apply(&mut self, params: &str) -> Result<(), LabError> {
        self.inner.set_params(&parse_json(params)?)
    }
}

#[wasm_bindgen]
impl WasmSim {
    /// Builds a simulation by name with default parameters.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, width: u32, height: u32, seed: u32) -> Result<WasmSim, JsValue> {
        Self::build(name, width, height, seed, "{}").map_err(js_err)
    }

    /// Pushes the current UI state, e.g. `{"current": 40, "has_core": true}`.
    pub fn set_params(&mut self, json: &str) -> Result<(), JsValue> {
        self.apply(json).map_err(js_err)
    }

    pub fn step(&mut self) -> Result<(), JsValue> {
        self.inner.step().map_err(js_err)
    }

    pub fn snapshot(&self) -> String {
        self.inner.snapshot().to_string()
    }

    pub fn params(&self) -> String {
        self.inner.params().to_string()
    }

    pub fn param_schema(&self) -> String {
        self.inner.param_schema().to_string()
    }

    pub fn frame(&self) -> f64 {
        self.inner.frame() as f64
    }

    /// RGBA pixels of the current field-lines frame for `ImageData`;
    /// empty for every other simulation.
    pub fn field_lines_rgba(&self) -> Vec<u8> {
        match &self.inner {
            SimKind::FieldLines(sim) => fieldlab_sims::raster::render_field_lines(sim).into_data(),
            _ => Vec::new(),
        }
    }
}

/// The quiz, one session per page.
#[wasm_bindgen]
pub struct WasmQuiz {
    session: QuizSession,
}

impl WasmQuiz {
    fn answer(&mut self, answer: &Answer) -> Result<String, LabError> {
        let outcome = self.session.submit(answer)?;
        to_json(&outcome)
    }
}

impl Default for WasmQuiz {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmQuiz {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmQuiz {
        WasmQuiz {
            session: QuizSession::default(),
        }
    }

    /// Submits slider settings; returns the outcome as JSON.
    pub fn submit_slider(&mut self, current: f64, turns: f64) -> Result<String, JsValue> {
        self.answer(&Answer::slider(current, turns)).map_err(js_err)
    }

    /// Submits an option key ("into", "out", "up", "down"); returns the outcome as JSON.
    pub fn submit_choice(&mut self, key: &str) -> Result<String, JsValue> {
        self.answer(&Answer::choice(key)).map_err(js_err)
    }

    /// `{level_index, level_title, score, rank, complete}` as JSON.
    pub fn status(&self) -> Result<String, JsValue> {
        to_json(&self.session.status()).map_err(js_err)
    }

    /// The current level's title, description and options as JSON, or `null`.
    pub fn current_level(&self) -> Result<String, JsValue> {
        to_json(&self.session.current_level()).map_err(js_err)
    }

    pub fn summary(&self) -> String {
        self.session.summary()
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_step_every_simulation() {
        for name in SimKind::list_simulations() {
            let mut sim = WasmSim::build(name, 300, 200, 7, "{}").unwrap();
            sim.inner.step().unwrap();
            assert_eq!(sim.frame(), 1.0);
            let snap: serde_json::Value = serde_json::from_str(&sim.snapshot()).unwrap();
            assert_eq!(snap["frame"], 1);
        }
    }

    #[test]
    fn apply_parses_json_params() {
        let mut sim = WasmSim::build("electromagnet", 300, 200, 7, "{}").unwrap();
        sim.apply(r#"{"current": 20}"#).unwrap();
        assert!(sim.params().contains("20"));
        assert!(matches!(sim.apply("{oops"), Err(LabError::InvalidInput(_))));
    }

    #[test]
    fn field_lines_pixels_match_canvas() {
        let sim = WasmSim::build("field-lines", 120, 80, 1, "{}").unwrap();
        assert_eq!(sim.field_lines_rgba().len(), 120 * 80 * 4);
        let motor = WasmSim::build("motor", 120, 80, 1, "{}").unwrap();
        assert!(motor.field_lines_rgba().is_empty());
    }

    #[test]
    fn quiz_answers_return_outcome_json() {
        let mut quiz = WasmQuiz::new();
        let out: serde_json::Value =
            serde_json::from_str(&quiz.answer(&Answer::slider(50.0, 60.0)).unwrap()).unwrap();
        assert_eq!(out["correct"], true);
        assert_eq!(out["score_delta"], 100);
        quiz.restart();
        assert_eq!(quiz.summary(), "Final Score: 0/300");
    }
}
