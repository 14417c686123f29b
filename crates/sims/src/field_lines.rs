//! Field-line explorer: a bar magnet whose field lines stay hidden until
//! iron filings are sprinkled over them.
//!
//! Every frame the full seed set is retraced and each point gets an alpha
//! from the [`RevealGrid`] intensity under it. Once enough of the canvas has
//! been dusted the `show_all` toggle unlocks and draws every line at full
//! opacity.

use fieldlab_core::error::LabError;
use fieldlab_core::magnet::Magnet;
use fieldlab_core::params::{check_types, param_bool, param_f64, param_usize_clamped};
use fieldlab_core::prng::Xorshift64;
use fieldlab_core::rect::Rect;
use fieldlab_core::reveal::{RevealGrid, MAX_INTENSITY};
use fieldlab_core::streamline::{
    seeds, trace, Seed, SeedLayout, Termination, TraceParams, MAX_STEPS_LIMIT,
};
use fieldlab_core::Simulation;
use glam::DVec2;
use serde_json::{json, Value};

const DEFAULT_FILINGS_PER_FRAME: usize = 12;
const MAX_FILINGS_PER_FRAME: usize = 200;
const DEFAULT_SPREAD: f64 = 25.0;

/// One traced field line with a per-point alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedLine {
    pub points: Vec<DVec2>,
    pub alpha: Vec<u8>,
    pub termination: Option<Termination>,
}

/// The field-lines simulation.
pub struct FieldLines {
    bounds: Rect,
    magnet: Magnet,
    seeds: Vec<Seed>,
    trace_params: TraceParams,
    grid: RevealGrid,
    rng: Xorshift64,
    pointer: Option<DVec2>,
    filings_per_frame: usize,
    spread: f64,
    show_all: bool,
    clear_requested: bool,
    lines: Vec<TracedLine>,
    frame: u64,
}

impl FieldLines {
    pub fn new(width: u32, height: u32, seed: u64) -> Result<Self, LabError> {
        let size = crate::canvas_size(width, height)?;
        let magnet = Magnet::centered(size.x, size.y);
        let mut sim = Self {
            bounds: Rect::from_size(size.x, size.y),
            magnet,
            seeds: seeds(&magnet, &SeedLayout::default()),
            trace_params: TraceParams::default(),
            grid: RevealGrid::default(),
            rng: Xorshift64::new(seed),
            pointer: None,
            filings_per_frame: DEFAULT_FILINGS_PER_FRAME,
            spread: DEFAULT_SPREAD,
            show_all: false,
            clear_requested: false,
            lines: Vec::new(),
            frame: 0,
        };
        sim.retrace();
        Ok(sim)
    }

    pub fn from_json(width: u32, height: u32, seed: u64, params: &Value) -> Result<Self, LabError> {
        let mut sim = Self::new(width, height, seed)?;
        sim.set_params(params)?;
        sim.retrace();
        Ok(sim)
    }

    pub fn magnet(&self) -> &Magnet {
        &self.magnet
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn grid(&self) -> &RevealGrid {
        &self.grid
    }

    /// Lines traced on the last frame.
    pub fn lines(&self) -> &[TracedLine] {
        &self.lines
    }

    /// True when every line is currently drawn at full opacity.
    pub fn showing_all(&self) -> bool {
        self.show_all && self.grid.is_unlocked()
    }

    /// Drops `count` filings in a disc of `radius` around `center`.
    pub fn sprinkle(&mut self, center: DVec2, radius: f64, count: usize) {
        for _ in 0..count {
            let point = center + self.rng.next_in_disc(radius);
            self.grid.record(point);
        }
    }

    /// Drops `count` filings uniformly over the whole canvas.
    pub fn scatter(&mut self, count: usize) {
        let (min, max) = (self.bounds.min, self.bounds.max);
        for _ in 0..count {
            let point = DVec2::new(
                self.rng.next_range(min.x, max.x),
                self.rng.next_range(min.y, max.y),
            );
            self.grid.record(point);
        }
        self.retrace();
    }

    fn point_alpha(&self, point: DVec2, full: bool) -> u8 {
        if full {
            return u8::MAX;
        }
        let intensity = self.grid.intensity(point);
        (intensity / MAX_INTENSITY * 255.0).round().clamp(0.0, 255.0) as u8
    }

    /// Retraces every seed against the current grid. No caching: the cost is
    /// bounded by seeds x (max_steps + 1) points.
    fn retrace(&mut self) {
        let full = self.showing_all();
        let exclusion = self.magnet.body();
        let mut lines = Vec::with_capacity(self.seeds.len());
        for &seed in &self.seeds {
            let mut line = trace(seed, &self.magnet, self.trace_params, self.bounds, exclusion);
            let points: Vec<DVec2> = line.by_ref().collect();
            let termination = line.termination();
            let alpha = points.iter().map(|&p| self.point_alpha(p, full)).collect();
            lines.push(TracedLine {
                points,
                alpha,
                termination,
            });
        }
        self.lines = lines;
    }
}

impl Simulation for FieldLines {
    fn step(&mut self) -> Result<(), LabError> {
        if self.clear_requested {
            self.grid.clear();
            self.clear_requested = false;
        }
        if let Some(center) = self.pointer {
            self.sprinkle(center, self.spread, self.filings_per_frame);
        }
        self.retrace();
        self.frame += 1;
        log::trace!(
            "field-lines frame {}: {} cells exposed",
            self.frame,
            self.grid.len()
        );
        Ok(())
    }

    fn set_params(&mut self, params: &Value) -> Result<(), LabError> {
        check_types(params, &self.param_schema())?;
        let trace_params = TraceParams {
            step_size: param_f64(params, "step_size", self.trace_params.step_size),
            max_steps: param_usize_clamped(
                params,
                "max_steps",
                self.trace_params.max_steps,
                1,
                MAX_STEPS_LIMIT,
            ),
            clip_to_bounds: param_bool(params, "clip_to_bounds", self.trace_params.clip_to_bounds),
        };
        trace_params.validate()?;
        self.trace_params = trace_params;

        let down = param_bool(params, "pointer_down", self.pointer.is_some());
        let last = self.pointer.unwrap_or(DVec2::ZERO);
        self.pointer = down.then(|| {
            DVec2::new(
                param_f64(params, "pointer_x", last.x),
                param_f64(params, "pointer_y", last.y),
            )
        });
        self.filings_per_frame = param_usize_clamped(
            params,
            "filings_per_frame",
            self.filings_per_frame,
            0,
            MAX_FILINGS_PER_FRAME,
        );
        let spread = param_f64(params, "spread", self.spread);
        if spread.is_finite() && spread >= 0.0 {
            self.spread = spread;
        }
        self.show_all = param_bool(params, "show_all", self.show_all);
        if param_bool(params, "clear", false) {
            self.clear_requested = true;
        }
        Ok(())
    }

    fn params(&self) -> Value {
        let p = self.pointer.unwrap_or(DVec2::ZERO);
        json!({
            "pointer_down": self.pointer.is_some(),
            "pointer_x": p.x,
            "pointer_y": p.y,
            "filings_per_frame": self.filings_per_frame,
            "spread": self.spread,
            "show_all": self.show_all,
            "step_size": self.trace_params.step_size,
            "max_steps": self.trace_params.max_steps,
            "clip_to_bounds": self.trace_params.clip_to_bounds,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "pointer_down": {
                "type": "boolean",
                "default": false,
                "description": "Sprinkle filings at the pointer this frame"
            },
            "pointer_x": {"type": "number", "default": 0.0, "description": "Pointer x"},
            "pointer_y": {"type": "number", "default": 0.0, "description": "Pointer y"},
            "filings_per_frame": {
                "type": "integer",
                "default": DEFAULT_FILINGS_PER_FRAME,
                "min": 0,
                "max": MAX_FILINGS_PER_FRAME,
                "description": "Filings dropped per frame while sprinkling"
            },
            "spread": {
                "type": "number",
                "default": DEFAULT_SPREAD,
                "min": 0.0,
                "description": "Radius of the sprinkle around the pointer"
            },
            "show_all": {
                "type": "boolean",
                "default": false,
                "description": "Draw every line at full opacity (once unlocked)"
            },
            "clear": {
                "type": "boolean",
                "default": false,
                "description": "Sweep away all filings on the next frame"
            },
            "step_size": {
                "type": "number",
                "default": fieldlab_core::streamline::DEFAULT_STEP_SIZE,
                "min": 0.0,
                "description": "Streamline integration step"
            },
            "max_steps": {
                "type": "integer",
                "default": fieldlab_core::streamline::DEFAULT_MAX_STEPS,
                "min": 1,
                "max": MAX_STEPS_LIMIT,
                "description": "Maximum integration steps per line"
            },
            "clip_to_bounds": {
                "type": "boolean",
                "default": true,
                "description": "Cut lines at the canvas edge"
            }
        })
    }

    fn snapshot(&self) -> Value {
        let body = self.magnet.body();
        let lines: Vec<Value> = self
            .lines
            .iter()
            .map(|line| {
                let points: Vec<[f64; 3]> = line
                    .points
                    .iter()
                    .zip(&line.alpha)
                    .map(|(p, &a)| [p.x, p.y, f64::from(a)])
                    .collect();
                json!(points)
            })
            .collect();
        json!({
            "frame": self.frame,
            "magnet": {
                "north": [self.magnet.north.x, self.magnet.north.y],
                "south": [self.magnet.south.x, self.magnet.south.y],
                "body": [body.min.x, body.min.y, body.max.x, body.max.y],
            },
            "exposed_cells": self.grid.len(),
            "unlocked": self.grid.is_unlocked(),
            "show_all": self.showing_all(),
            "lines": lines,
        })
    }

    fn frame(&self) -> u64 {
        self.frame
    }
}
