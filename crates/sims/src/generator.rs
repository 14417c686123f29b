//! Generator effect: drag a wire up or down through a fixed field and watch
//! the induced current appear. Released, the wire drifts back to the centre.

use fieldlab_core::error::LabError;
use fieldlab_core::hand_rule::{
    generator_current, CurrentDirection, FieldDirection, HandRule, MotionDirection,
};
use fieldlab_core::params::{check_types, param_bool, param_f64};
use fieldlab_core::rect::Rect;
use fieldlab_core::Simulation;
use glam::DVec2;
use serde_json::{json, Value};

/// Width of each pole block at the canvas sides.
const POLE_WIDTH: f64 = 80.0;
/// Gap between the pole blocks and the top and bottom edges.
const POLE_MARGIN: f64 = 50.0;
/// Fraction of the distance back to centre covered per frame when released.
const RETURN_EASE: f64 = 0.05;
const FIELD: FieldDirection = FieldDirection::Right;

/// The generator-effect simulation.
pub struct Generator {
    height: f64,
    gap: Rect,
    pointer: Option<DVec2>,
    wire_y: f64,
    velocity: f64,
    dragging: bool,
    frame: u64,
}

impl Generator {
    pub fn new(width: u32, height: u32) -> Result<Self, LabError> {
        let size = crate::canvas_size(width, height)?;
        Ok(Self {
            height: size.y,
            gap: Rect::new(
                DVec2::new(POLE_WIDTH, POLE_MARGIN),
                DVec2::new(size.x - POLE_WIDTH, size.y - POLE_MARGIN),
            ),
            pointer: None,
            wire_y: size.y / 2.0,
            velocity: 0.0,
            dragging: false,
            frame: 0,
        })
    }

    pub fn from_json(width: u32, height: u32, params: &Value) -> Result<Self, LabError> {
        let mut sim = Self::new(width, height)?;
        sim.set_params(params)?;
        Ok(sim)
    }

    pub fn wire_y(&self) -> f64 {
        self.wire_y
    }

    /// Wire movement during the last frame, screen y (positive is down).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn motion(&self) -> Option<MotionDirection> {
        MotionDirection::from_velocity(self.velocity)
    }

    /// Current induced by the last frame's motion, if the wire moved fast enough.
    pub fn induced_current(&self) -> Option<CurrentDirection> {
        self.motion().map(|m| generator_current(FIELD, m))
    }

    /// True when `point` is strictly inside the space between the poles.
    fn in_gap(&self, point: DVec2) -> bool {
        point.x > self.gap.min.x
            && point.x < self.gap.max.x
            && point.y > self.gap.min.y
            && point.y < self.gap.max.y
    }
}

impl Simulation for Generator {
    fn step(&mut self) -> Result<(), LabError> {
        let grabbed = self.pointer.filter(|&p| self.in_gap(p));
        let target = match grabbed {
            Some(p) => p.y,
            None => self.wire_y + (self.height / 2.0 - self.wire_y) * RETURN_EASE,
        };
        self.dragging = grabbed.is_some();
        self.velocity = target - self.wire_y;
        self.wire_y = target;
        self.frame += 1;
        if let Some(current) = self.induced_current() {
            log::trace!("generator frame {}: induced {current}", self.frame);
        }
        Ok(())
    }

    fn set_params(&mut self, params: &Value) -> Result<(), LabError> {
        check_types(params, &self.param_schema())?;
        let down = param_bool(params, "pointer_down", self.pointer.is_some());
        let last = self.pointer.unwrap_or(DVec2::ZERO);
        self.pointer = down.then(|| {
            DVec2::new(
                param_f64(params, "pointer_x", last.x),
                param_f64(params, "pointer_y", last.y),
            )
        });
        Ok(())
    }

    fn params(&self) -> Value {
        let p = self.pointer.unwrap_or(DVec2::ZERO);
        json!({
            "pointer_down": self.pointer.is_some(),
            "pointer_x": p.x,
            "pointer_y": p.y,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "pointer_down": {
                "type": "boolean",
                "default": false,
                "description": "Pointer (mouse or touch) is pressed"
            },
            "pointer_x": {
                "type": "number",
                "default": 0.0,
                "description": "Pointer x in canvas units"
            },
            "pointer_y": {
                "type": "number",
                "default": 0.0,
                "description": "Pointer y in canvas units"
            }
        })
    }

    fn snapshot(&self) -> Value {
        let motion = self.motion();
        let induced = self.induced_current();
        json!({
            "frame": self.frame,
            "field": FIELD.label(),
            "wire_y": self.wire_y,
            "velocity": self.velocity,
            "dragging": self.dragging,
            "motion": motion.map(MotionDirection::label),
            "induced": induced.map(CurrentDirection::label),
            "rule": HandRule::RightHand.title(),
            "hint": (!self.dragging).then_some("Grab the wire and move it up/down!"),
        })
    }

    fn frame(&self) -> u64 {
        self.frame
    }
}
