//! Field-line tracing by forward-Euler streamline integration.
//!
//! [`trace`] returns a lazy [`Streamline`] iterator. Each step samples the
//! field, normalizes it, and advances `step_size` along (or against) it.
//! A streamline ends when it leaves the canvas bounds, enters the magnet
//! body, hits a zero field, or runs out of steps. Calling [`trace`] again
//! with the same inputs yields the same points.

use glam::DVec2;
use serde_json::Value;

use crate::error::LabError;
use crate::field_source::FieldSource;
use crate::magnet::Magnet;
use crate::params::{param_bool, param_f64, param_usize_clamped};
use crate::rect::Rect;

/// Default distance advanced per integration step, in canvas units.
pub const DEFAULT_STEP_SIZE: f64 = 5.0;
/// Default integration step limit per streamline.
pub const DEFAULT_MAX_STEPS: usize = 350;
/// Upper bound accepted for `max_steps` from JSON params.
pub const MAX_STEPS_LIMIT: usize = 1000;

/// Integration direction relative to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow the field (away from north, toward south).
    Forward,
    /// Run against the field.
    Backward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Start point and direction of one streamline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub point: DVec2,
    pub direction: Direction,
}

impl Seed {
    pub fn new(point: DVec2, direction: Direction) -> Self {
        Self { point, direction }
    }

    /// Same start point, opposite direction.
    pub fn reversed(self) -> Self {
        Self {
            direction: self.direction.reversed(),
            ..self
        }
    }
}

/// Step size and termination policy for [`trace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceParams {
    /// Distance advanced per step. Keep well under a tenth of the magnet
    /// length or curves facet visibly.
    pub step_size: f64,
    /// Maximum integration steps; a streamline has at most `max_steps + 1` points.
    pub max_steps: usize,
    /// Cut the final segment at the canvas edge instead of emitting the
    /// out-of-bounds point.
    pub clip_to_bounds: bool,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            max_steps: DEFAULT_MAX_STEPS,
            clip_to_bounds: true,
        }
    }
}

impl TraceParams {
    /// Reads `step_size`, `max_steps`, and `clip_to_bounds`, falling back to
    /// defaults, then validates. `max_steps` is clamped to `1..=MAX_STEPS_LIMIT`.
    pub fn from_json(params: &Value) -> Result<Self, LabError> {
        let parsed = Self {
            step_size: param_f64(params, "step_size", DEFAULT_STEP_SIZE),
            max_steps: param_usize_clamped(
                params,
                "max_steps",
                DEFAULT_MAX_STEPS,
                1,
                MAX_STEPS_LIMIT,
            ),
            clip_to_bounds: param_bool(params, "clip_to_bounds", true),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Rejects zero, negative, and non-finite step sizes.
    pub fn validate(&self) -> Result<(), LabError> {
        if self.step_size.is_finite() && self.step_size > 0.0 {
            Ok(())
        } else {
            Err(LabError::InvalidStepSize(self.step_size))
        }
    }
}

/// Why a streamline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The seed itself lay outside the bounds; nothing was emitted.
    SeedOutOfBounds,
    /// The curve crossed the bounds; the last point sits on (or past) the edge.
    LeftBounds,
    /// The curve entered the exclusion rectangle; the last point is inside it.
    EnteredExclusion,
    /// The field vanished (or was not finite) at the current point.
    Stalled,
    /// `max_steps` integration steps were taken.
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceState {
    Start,
    Running,
    Done(Termination),
}

/// Lazy sequence of points along one field line. See [`trace`].
pub struct Streamline<'a, F: FieldSource + ?Sized> {
    field: &'a F,
    params: TraceParams,
    bounds: Rect,
    exclusion: Rect,
    sign: f64,
    point: DVec2,
    steps: usize,
    state: TraceState,
}

/// Traces the field line through `seed`.
///
/// The seed point is emitted first (unless it lies outside `bounds`), then
/// one point per Euler step. Only the final point may lie inside
/// `exclusion` or on the canvas edge.
pub fn trace<'a, F: FieldSource + ?Sized>(
    seed: Seed,
    field: &'a F,
    params: TraceParams,
    bounds: Rect,
    exclusion: Rect,
) -> Streamline<'a, F> {
    Streamline {
        field,
        params,
        bounds,
        exclusion,
        sign: seed.direction.sign(),
        point: seed.point,
        steps: 0,
        state: TraceState::Start,
    }
}

impl<F: FieldSource + ?Sized> Streamline<'_, F> {
    /// Integration steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Reason the streamline ended, once it has.
    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            TraceState::Done(reason) => Some(reason),
            _ => None,
        }
    }

    fn finish(&mut self, reason: Termination) {
        log::trace!(
            "streamline from step {} stopped: {:?}",
            self.steps,
            reason
        );
        self.state = TraceState::Done(reason);
    }
}

impl<F: FieldSource + ?Sized> Iterator for Streamline<'_, F> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        match self.state {
            TraceState::Done(_) => None,
            TraceState::Start => {
                if !self.bounds.contains(self.point) {
                    self.finish(Termination::SeedOutOfBounds);
                    return None;
                }
                if self.exclusion.contains(self.point) {
                    self.finish(Termination::EnteredExclusion);
                } else {
                    self.state = TraceState::Running;
                }
                Some(self.point)
            }
            TraceState::Running => {
                if self.steps >= self.params.max_steps {
                    self.finish(Termination::StepLimit);
                    return None;
                }
                let v = self.field.sample(self.point);
                let magnitude = v.length();
                if magnitude == 0.0 || !magnitude.is_finite() {
                    self.finish(Termination::Stalled);
                    return None;
                }
                let next = self.point + v * (self.params.step_size * self.sign / magnitude);
                self.steps += 1;

                if !self.bounds.contains(next) {
                    let last = if self.params.clip_to_bounds {
                        self.bounds.clip_segment(self.point, next)
                    } else {
                        next
                    };
                    self.finish(Termination::LeftBounds);
                    if last == self.point {
                        return None;
                    }
                    self.point = last;
                    return Some(last);
                }

                self.point = next;
                if self.exclusion.contains(next) {
                    self.finish(Termination::EnteredExclusion);
                }
                Some(next)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            TraceState::Done(_) => (0, Some(0)),
            TraceState::Start => (0, Some(self.params.max_steps.saturating_add(1))),
            TraceState::Running => (0, Some(self.params.max_steps - self.steps)),
        }
    }
}

impl<F: FieldSource + ?Sized> std::iter::FusedIterator for Streamline<'_, F> {}

/// How seeds are spread around a magnet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedLayout {
    /// Seeds on the outward half-circle around each pole.
    pub per_pole: usize,
    /// Seed positions along each long side of the body; each is traced both ways.
    pub along_body: usize,
    /// Gap between the magnet body and each seed.
    pub offset: f64,
}

impl Default for SeedLayout {
    fn default() -> Self {
        Self {
            per_pole: 8,
            along_body: 3,
            offset: 8.0,
        }
    }
}

/// The fixed seed set for a magnet.
///
/// North-pole seeds run forward, south-pole seeds run backward, so both
/// families head away from the magnet. Body seeds sit just above and below
/// the bar and run in both directions.
pub fn seeds(magnet: &Magnet, layout: &SeedLayout) -> Vec<Seed> {
    let axis = magnet.axis();
    let radius = magnet.pole_clearance() + layout.offset;
    let mut out = Vec::with_capacity(2 * layout.per_pole + 4 * layout.along_body);

    let fan = |pole: DVec2, outward: DVec2, direction: Direction, out: &mut Vec<Seed>| {
        for i in 0..layout.per_pole {
            let t = (i as f64 + 0.5) / layout.per_pole as f64;
            let angle = (t - 0.5) * std::f64::consts::PI;
            let dir = DVec2::from_angle(angle).rotate(outward);
            out.push(Seed::new(pole + dir * radius, direction));
        }
    };
    fan(magnet.north, -axis, Direction::Forward, &mut out);
    fan(magnet.south, axis, Direction::Backward, &mut out);

    let normal = axis.perp() * (magnet.half_thickness + layout.offset);
    for j in 0..layout.along_body {
        let t = (j as f64 + 0.5) / layout.along_body as f64;
        let base = magnet.north.lerp(magnet.south, t);
        for point in [base - normal, base + normal] {
            let forward = Seed::new(point, Direction::Forward);
            out.push(forward);
            out.push(forward.reversed());
        }
    }
    out
}
