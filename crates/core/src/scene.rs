//! Reproducible description of a simulation run.
//!
//! A [`Scene`] captures everything needed to replay a run: simulation name,
//! canvas dimensions, parameters, PRNG seed, and frame count.

use crate::error::LabError;
use serde::{Deserialize, Serialize};

/// Default canvas used by the CLI when no scene file is given.
pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Two identical `Scene` values fed to the same binary produce identical
/// snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub simulation: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub frames: u64,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with empty params (`{}`) and zero frames.
    pub fn new(simulation: &str, width: u32, height: u32, seed: u64) -> Self {
        Self {
            simulation: simulation.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
        }
    }

    /// Rejects zero-sized canvases.
    pub fn validate(&self) -> Result<(), LabError> {
        if self.width == 0 || self.height == 0 {
            return Err(LabError::InvalidDimensions);
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, LabError> {
        let scene: Scene =
            serde_json::from_str(text).map_err(|e| LabError::InvalidInput(format!("scene: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_scene_with_default_params_and_frames() {
        let s = Scene::new("electromagnet", 600, 400, 42);
        assert_eq!(s.simulation, "electromagnet");
        assert_eq!(s.width, 600);
        assert_eq!(s.height, 400);
        assert_eq!(s.seed, 42);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = Scene::new("field-lines", 800, 500, 99);
        s.params = serde_json::json!({"sprinkle": 30, "show_all": false});
        s.frames = 120;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let s = Scene::from_json(r#"{"simulation": "motor", "width": 300, "height": 200}"#)
            .unwrap();
        assert_eq!(s.seed, 0);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn from_json_rejects_zero_size() {
        let err = Scene::from_json(r#"{"simulation": "motor", "width": 0, "height": 200}"#)
            .unwrap_err();
        assert!(matches!(err, LabError::InvalidDimensions));
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = Scene::from_json("{not json").unwrap_err();
        assert!(matches!(err, LabError::InvalidInput(_)));
    }

    #[test]
    fn validate_fails_for_zero_height() {
        assert!(Scene::new("generator", 512, 0, 1).validate().is_err());
        assert!(Scene::new("generator", 512, 512, 1).validate().is_ok());
    }
}
