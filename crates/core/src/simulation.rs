//! The `Simulation` trait that every interactive demo implements.
//!
//! A front end drives a simulation once per animation frame: push the
//! current UI state with [`Simulation::set_params`], advance with
//! [`Simulation::step`], then draw from [`Simulation::snapshot`]. The trait is
//! object-safe so simulations can be switched at runtime behind
//! `Box<dyn Simulation>`.

use crate::error::LabError;
use serde_json::Value;

/// Core trait for frame-driven simulations.
pub trait Simulation {
    /// Advance the simulation by one frame.
    fn step(&mut self) -> Result<(), LabError>;

    /// Apply a partial parameter update. Keys that are absent keep their
    /// current value; present keys of the wrong type are rejected.
    fn set_params(&mut self, params: &Value) -> Result<(), LabError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing every parameter: type, range, and default.
    fn param_schema(&self) -> Value;

    /// Everything a renderer needs to draw the current frame.
    fn snapshot(&self) -> Value;

    /// Frames stepped since construction.
    fn frame(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{check_types, param_f64};
    use serde_json::json;

    /// Minimal simulation used to verify trait object safety.
    struct Counter {
        frame: u64,
        rate: f64,
        total: f64,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                frame: 0,
                rate: 1.0,
                total: 0.0,
            }
        }
    }

    impl Simulation for Counter {
        fn step(&mut self) -> Result<(), LabError> {
            self.frame += 1;
            self.total += self.rate;
            Ok(())
        }

        fn set_params(&mut self, params: &Value) -> Result<(), LabError> {
            check_types(params, &self.param_schema())?;
            self.rate = param_f64(params, "rate", self.rate);
            Ok(())
        }

        fn params(&self) -> Value {
            json!({"rate": self.rate})
        }

        fn param_schema(&self) -> Value {
            json!({
                "rate": {
                    "type": "number",
                    "default": 1.0,
                    "description": "Amount added per frame"
                }
            })
        }

        fn snapshot(&self) -> Value {
            json!({"frame": self.frame, "total": self.total})
        }

        fn frame(&self) -> u64 {
            self.frame
        }
    }

    #[test]
    fn simulation_trait_is_object_safe() {
        let mut sim: Box<dyn Simulation> = Box::new(Counter::new());
        sim.step().unwrap();
        assert_eq!(sim.frame(), 1);
        assert_eq!(sim.snapshot()["total"], 1.0);
    }

    #[test]
    fn set_params_is_partial() {
        let mut sim = Counter::new();
        sim.set_params(&json!({"rate": 2.5})).unwrap();
        sim.set_params(&json!({})).unwrap();
        assert_eq!(sim.params()["rate"], 2.5);
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim.snapshot()["total"], 5.0);
    }

    #[test]
    fn set_params_rejects_wrong_type() {
        let mut sim = Counter::new();
        let err = sim.set_params(&json!({"rate": "fast"})).unwrap_err();
        assert!(matches!(err, LabError::ParamTypeMismatch { .. }));
        assert_eq!(sim.params()["rate"], 1.0);
    }

    #[test]
    fn schema_has_expected_structure() {
        let sim = Counter::new();
        let schema = sim.param_schema();
        assert_eq!(schema["rate"]["type"], "number");
        assert!(schema["rate"].get("default").is_some());
    }

    #[test]
    fn dyn_mut_reference_works() {
        let mut sim = Counter::new();
        let r: &mut dyn Simulation = &mut sim;
        r.set_params(&json!({"rate": 3})).unwrap();
        r.step().unwrap();
        assert_eq!(r.snapshot()["total"], 3.0);
    }
}
