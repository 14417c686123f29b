//! Electromagnet bench: a coil with adjustable current and turns, an
//! optional iron core, and a pile of paperclips that jump to the magnet once
//! the field is strong enough.

use fieldlab_core::electromagnet::{coil_color, field_line_alpha, Coil, Paperclip};
use fieldlab_core::error::LabError;
use fieldlab_core::params::{check_types, param_bool, param_f64_clamped};
use fieldlab_core::prng::Xorshift64;
use fieldlab_core::Simulation;
use glam::DVec2;
use serde_json::{json, Value};

const DEFAULT_CURRENT: f64 = 50.0;
const DEFAULT_TURNS: f64 = 30.0;
const CURRENT_RANGE: (f64, f64) = (0.0, 100.0);
const TURNS_RANGE: (f64, f64) = (10.0, 50.0);
/// Number of paperclips on the bench.
pub const PAPERCLIP_COUNT: usize = 15;
/// Clips rest this far above the bottom edge.
const REST_MARGIN_BOTTOM: f64 = 20.0;
/// Clips are scattered no closer than this to the side edges.
const REST_MARGIN_SIDE: f64 = 100.0;
/// Horizontal spread of clips gathering under the magnet.
const GATHER_JITTER: f64 = 50.0;
/// Current arrows are drawn above this current.
const ARROW_MIN_CURRENT: f64 = 5.0;
/// Frames per current-arrow loop along the lead wires.
const ARROW_PERIOD: u64 = 60;

/// The electromagnet simulation.
pub struct Electromagnet {
    width: f64,
    height: f64,
    coil: Coil,
    clips: Vec<Paperclip>,
    rng: Xorshift64,
    frame: u64,
}

impl Electromagnet {
    /// Scatters the paperclips along the bottom of the canvas.
    pub fn new(width: u32, height: u32, seed: u64, coil: Coil) -> Result<Self, LabError> {
        let size = crate::canvas_size(width, height)?;
        let mut rng = Xorshift64::new(seed);
        let (lo, hi) = if size.x > 2.0 * REST_MARGIN_SIDE {
            (REST_MARGIN_SIDE, size.x - REST_MARGIN_SIDE)
        } else {
            (0.0, size.x)
        };
        let rest_y = (size.y - REST_MARGIN_BOTTOM).max(0.0);
        let clips = (0..PAPERCLIP_COUNT)
            .map(|_| {
                let x = rng.next_range(lo, hi);
                let angle = rng.next_range(0.0, std::f64::consts::TAU);
                Paperclip::new(DVec2::new(x, rest_y), angle)
            })
            .collect();
        Ok(Self {
            width: size.x,
            height: size.y,
            coil: clamp_coil(coil),
            clips,
            rng,
            frame: 0,
        })
    }

    /// Builds from JSON params, falling back to defaults for missing keys.
    pub fn from_json(width: u32, height: u32, seed: u64, params: &Value) -> Result<Self, LabError> {
        let mut sim = Self::new(
            width,
            height,
            seed,
            Coil::new(DEFAULT_CURRENT, DEFAULT_TURNS, true),
        )?;
        sim.set_params(params)?;
        Ok(sim)
    }

    pub fn coil(&self) -> Coil {
        self.coil
    }

    pub fn paperclips(&self) -> &[Paperclip] {
        &self.clips
    }

    pub fn captured_count(&self) -> usize {
        self.clips.iter().filter(|c| c.captured).count()
    }

    /// Point under the coil where captured clips gather.
    pub fn magnet_point(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Position of the animated current arrow along the lead wires in
    /// `[0, 1)`, or `None` when the current is too small to show.
    pub fn arrow_phase(&self) -> Option<f64> {
        (self.coil.current > ARROW_MIN_CURRENT)
            .then(|| (self.frame % ARROW_PERIOD) as f64 / ARROW_PERIOD as f64)
    }
}

fn clamp_coil(coil: Coil) -> Coil {
    let clamp = |v: f64, (lo, hi): (f64, f64), default: f64| {
        if v.is_finite() {
            v.clamp(lo, hi)
        } else {
            default
        }
    };
    Coil {
        current: clamp(coil.current, CURRENT_RANGE, DEFAULT_CURRENT),
        turns: clamp(coil.turns, TURNS_RANGE, DEFAULT_TURNS),
        has_core: coil.has_core,
    }
}

impl Simulation for Electromagnet {
    fn step(&mut self) -> Result<(), LabError> {
        let strength = self.coil.strength();
        let target = self.magnet_point();
        for clip in &mut self.clips {
            let jitter = self.rng.next_range(-GATHER_JITTER, GATHER_JITTER);
            clip.update(strength, target, jitter);
        }
        self.frame += 1;
        log::trace!(
            "electromagnet frame {}: strength {:.2}, {} captured",
            self.frame,
            strength,
            self.captured_count()
        );
        Ok(())
    }

    fn set_params(&mut self, params: &Value) -> Result<(), LabError> {
        check_types(params, &self.param_schema())?;
        let (c_lo, c_hi) = CURRENT_RANGE;
        let (t_lo, t_hi) = TURNS_RANGE;
        self.coil = Coil {
            current: param_f64_clamped(params, "current", self.coil.current, c_lo, c_hi),
            turns: param_f64_clamped(params, "turns", self.coil.turns, t_lo, t_hi),
            has_core: param_bool(params, "has_core", self.coil.has_core),
        };
        Ok(())
    }

    fn params(&self) -> Value {
        json!({
            "current": self.coil.current,
            "turns": self.coil.turns,
            "has_core": self.coil.has_core,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "current": {
                "type": "number",
                "default": DEFAULT_CURRENT,
                "min": CURRENT_RANGE.0,
                "max": CURRENT_RANGE.1,
                "description": "Coil current in A"
            },
            "turns": {
                "type": "number",
                "default": DEFAULT_TURNS,
                "min": TURNS_RANGE.0,
                "max": TURNS_RANGE.1,
                "description": "Number of coil turns"
            },
            "has_core": {
                "type": "boolean",
                "default": true,
                "description": "Iron core fitted (five times stronger than air)"
            }
        })
    }

    fn snapshot(&self) -> Value {
        let strength = self.coil.strength();
        let clips: Vec<Value> = self
            .clips
            .iter()
            .map(|c| {
                json!({
                    "x": c.position.x,
                    "y": c.position.y,
                    "angle": c.angle,
                    "captured": c.captured,
                })
            })
            .collect();
        json!({
            "frame": self.frame,
            "strength": strength,
            "strength_label": format!("Field Strength: {strength:.2} T"),
            "core_label": self.coil.core_label(),
            "field_line_alpha": field_line_alpha(strength, self.coil.has_core),
            "coil_color": coil_color(self.coil.current),
            "arrow_phase": self.arrow_phase(),
            "captured": self.captured_count(),
            "paperclips": clips,
        })
    }

    fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(params: Value) -> Electromagnet {
        Electromagnet::from_json(600, 400, 42, &params).unwrap()
    }

    #[test]
    fn clips_start_at_rest_along_the_bottom() {
        let s = sim(json!({}));
        assert_eq!(s.paperclips().len(), PAPERCLIP_COUNT);
        for clip in s.paperclips() {
            assert_eq!(clip.position.y, 380.0);
            assert!((100.0..500.0).contains(&clip.position.x), "x = {}", clip.position.x);
            assert!(!clip.captured);
        }
    }

    #[test]
    fn strong_iron_core_captures_every_clip() {
        let mut s = sim(json!({"current": 80, "turns": 50, "has_core": true}));
        for _ in 0..120 {
            s.step().unwrap();
        }
        assert_eq!(s.captured_count(), PAPERCLIP_COUNT);
    }

    #[test]
    fn max_air_core_captures_nothing() {
        let mut s = sim(json!({"current": 100, "turns": 50, "has_core": false}));
        for _ in 0..120 {
            s.step().unwrap();
        }
        assert_eq!(s.captured_count(), 0);
        assert_eq!(s.snapshot()["core_label"], "Air Core");
    }

    #[test]
    fn switching_off_drops_the_clips() {
        let mut s = sim(json!({"current": 100, "turns": 50}));
        for _ in 0..120 {
            s.step().unwrap();
        }
        s.set_params(&json!({"current": 0})).unwrap();
        for _ in 0..120 {
            s.step().unwrap();
        }
        assert_eq!(s.captured_count(), 0);
    }

    #[test]
    fn slider_inputs_are_clamped() {
        let s = sim(json!({"current": 250, "turns": 3}));
        assert_eq!(s.coil().current, 100.0);
        assert_eq!(s.coil().turns, 10.0);
    }

    #[test]
    fn wrong_param_type_is_rejected() {
        let result = Electromagnet::from_json(600, 400, 1, &json!({"has_core": "yes"}));
        assert!(matches!(result, Err(LabError::ParamTypeMismatch { .. })));
    }

    #[test]
    fn arrow_phase_loops_every_sixty_frames() {
        let mut s = sim(json!({"current": 40}));
        assert_eq!(s.arrow_phase(), Some(0.0));
        for _ in 0..30 {
            s.step().unwrap();
        }
        assert_eq!(s.arrow_phase(), Some(0.5));
        for _ in 0..30 {
            s.step().unwrap();
        }
        assert_eq!(s.arrow_phase(), Some(0.0));
        s.set_params(&json!({"current": 5})).unwrap();
        assert_eq!(s.arrow_phase(), None);
    }

    #[test]
    fn snapshot_reports_strength_and_visuals() {
        let snap = sim(json!({"current": 80, "turns": 50})).snapshot();
        assert_eq!(snap["strength"], 8.0);
        assert_eq!(snap["field_line_alpha"], 255);
        assert_eq!(snap["strength_label"], "Field Strength: 8.00 T");
        assert_eq!(snap["paperclips"].as_array().map(Vec::len), Some(PAPERCLIP_COUNT));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Electromagnet::from_json(0, 400, 1, &json!({})),
            Err(LabError::InvalidDimensions)
        ));
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = sim(json!({"current": 90, "turns": 40}));
        let mut b = sim(json!({"current": 90, "turns": 40}));
        for _ in 0..25 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
