//! Motor effect: a wire seen end-on between two poles. Toggling the field
//! or the current flips the force, and the wire eases toward the side the
//! left-hand rule pushes it to.

use fieldlab_core::error::LabError;
use fieldlab_core::hand_rule::{motor_force, CurrentDirection, FieldDirection, HandRule};
use fieldlab_core::params::{check_types, param_str};
use fieldlab_core::Simulation;
use serde_json::{json, Value};

/// Wire displacement from the centre line when fully pushed.
pub const WIRE_TRAVEL: f64 = 80.0;
/// Fraction of the remaining distance covered per frame.
const EASE: f64 = 0.1;

/// The motor-effect simulation.
pub struct Motor {
    height: f64,
    field: FieldDirection,
    current: CurrentDirection,
    wire_y: f64,
    frame: u64,
}

impl Motor {
    pub fn new(
        width: u32,
        height: u32,
        field: FieldDirection,
        current: CurrentDirection,
    ) -> Result<Self, LabError> {
        let size = crate::canvas_size(width, height)?;
        Ok(Self {
            height: size.y,
            field,
            current,
            wire_y: size.y / 2.0,
            frame: 0,
        })
    }

    pub fn from_json(width: u32, height: u32, params: &Value) -> Result<Self, LabError> {
        let mut sim = Self::new(
            width,
            height,
            FieldDirection::Right,
            CurrentDirection::IntoPage,
        )?;
        sim.set_params(params)?;
        Ok(sim)
    }

    pub fn wire_y(&self) -> f64 {
        self.wire_y
    }

    /// Where the wire settles for the current field and current.
    pub fn target_y(&self) -> f64 {
        let force = motor_force(self.field, self.current);
        self.height / 2.0 + force.sign().as_f64() * WIRE_TRAVEL
    }

    /// Pole letters on the left and right magnets.
    fn pole_labels(&self) -> (&'static str, &'static str) {
        match self.field {
            FieldDirection::Right => ("N", "S"),
            FieldDirection::Left => ("S", "N"),
        }
    }
}

fn parse_field(value: &str) -> Result<FieldDirection, LabError> {
    match value {
        "right" => Ok(FieldDirection::Right),
        "left" => Ok(FieldDirection::Left),
        other => Err(LabError::UnknownOption(other.to_owned())),
    }
}

fn parse_current(value: &str) -> Result<CurrentDirection, LabError> {
    match value {
        "into" => Ok(CurrentDirection::IntoPage),
        "out" => Ok(CurrentDirection::OutOfPage),
        other => Err(LabError::UnknownOption(other.to_owned())),
    }
}

impl Simulation for Motor {
    fn step(&mut self) -> Result<(), LabError> {
        let target = self.target_y();
        self.wire_y += (target - self.wire_y) * EASE;
        self.frame += 1;
        Ok(())
    }

    fn set_params(&mut self, params: &Value) -> Result<(), LabError> {
        check_types(params, &self.param_schema())?;
        let field = parse_field(param_str(params, "field", self.field.label()))?;
        let current = parse_current(param_str(params, "current", self.current.label()))?;
        if field != self.field || current != self.current {
            log::debug!("motor: field {field}, current {current}");
        }
        self.field = field;
        self.current = current;
        Ok(())
    }

    fn params(&self) -> Value {
        json!({
            "field": self.field.label(),
            "current": self.current.label(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "field": {
                "type": "choice",
                "options": ["right", "left"],
                "default": "right",
                "description": "Field direction between the poles (right = N on the left)"
            },
            "current": {
                "type": "choice",
                "options": ["into", "out"],
                "default": "into",
                "description": "Current through the wire (into or out of the page)"
            }
        })
    }

    fn snapshot(&self) -> Value {
        let force = motor_force(self.field, self.current);
        let (left, right) = self.pole_labels();
        json!({
            "frame": self.frame,
            "field": self.field.label(),
            "current": self.current.label(),
            "force": force.label(),
            "wire_y": self.wire_y,
            "target_y": self.target_y(),
            "poles": [left, right],
            "rule": HandRule::LeftHand.title(),
            "hint": HandRule::motor_hint(self.field, self.current, force),
        })
    }

    fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(sim: &mut Motor) {
        for _ in 0..200 {
            sim.step().unwrap();
        }
    }

    #[test]
    fn default_setup_pushes_wire_down() {
        let mut sim = Motor::from_json(600, 400, &json!({})).unwrap();
        assert_eq!(sim.wire_y(), 200.0);
        settle(&mut sim);
        assert!((sim.wire_y() - 280.0).abs() < 1e-6, "wire_y = {}", sim.wire_y());
        assert_eq!(sim.snapshot()["force"], "down");
    }

    #[test]
    fn toggling_current_reverses_force() {
        let mut sim = Motor::from_json(600, 400, &json!({"current": "out"})).unwrap();
        settle(&mut sim);
        assert!((sim.wire_y() - 120.0).abs() < 1e-6);
    }

    #[test]
    fn toggling_both_restores_force() {
        let mut sim = Motor::from_json(600, 400, &json!({"field": "left", "current": "out"})).unwrap();
        assert_eq!(sim.target_y(), 280.0);
        assert_eq!(sim.snapshot()["poles"], json!(["S", "N"]));
        settle(&mut sim);
        assert!((sim.wire_y() - 280.0).abs() < 1e-6);
    }

    #[test]
    fn wire_eases_ten_percent_per_frame() {
        let mut sim = Motor::from_json(600, 400, &json!({})).unwrap();
        sim.step().unwrap();
        assert!((sim.wire_y() - 208.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let mut sim = Motor::from_json(600, 400, &json!({})).unwrap();
        let err = sim.set_params(&json!({"field": "up"})).unwrap_err();
        assert!(matches!(err, LabError::UnknownOption(ref s) if s == "up"));
        assert_eq!(sim.params()["field"], "right");
    }

    #[test]
    fn snapshot_carries_hand_hint() {
        let sim = Motor::from_json(600, 400, &json!({})).unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap["rule"], "Left Hand Rule");
        assert_eq!(snap["hint"][2], "Force (Thumb): down");
    }
}
