//! Electromagnet strength, the paperclip capture policy, and the coil
//! visuals that depend on them.
//!
//! Strength is in arbitrary "T" display units: `current * turns` divided by
//! a core-dependent constant. An iron core is five times stronger than an
//! air core.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// `current * turns` per unit strength with an iron core.
pub const IRON_CORE_DIVISOR: f64 = 500.0;
/// `current * turns` per unit strength with an air core.
pub const AIR_CORE_DIVISOR: f64 = 2500.0;
/// Strength above which paperclips are pulled in.
pub const CAPTURE_THRESHOLD: f64 = 2.0;
/// Fraction of the remaining distance a paperclip covers per frame.
pub const CLIP_EASE: f64 = 0.1;
/// Vertical distance at which a moving paperclip counts as arrived.
pub const CLIP_SNAP_DISTANCE: f64 = 5.0;

/// Coil input: current in A, number of turns, and whether an iron core is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coil {
    pub current: f64,
    pub turns: f64,
    pub has_core: bool,
}

impl Coil {
    pub fn new(current: f64, turns: f64, has_core: bool) -> Self {
        Self {
            current,
            turns,
            has_core,
        }
    }

    pub fn strength(&self) -> f64 {
        strength(self.current, self.turns, self.has_core)
    }

    pub fn core_label(&self) -> &'static str {
        if self.has_core {
            "Iron Core"
        } else {
            "Air Core"
        }
    }
}

/// Field strength of a coil. Inputs are not clamped, so values outside the
/// slider ranges extrapolate linearly.
pub fn strength(current: f64, turns: f64, has_core: bool) -> f64 {
    let divisor = if has_core {
        IRON_CORE_DIVISOR
    } else {
        AIR_CORE_DIVISOR
    };
    current * turns / divisor
}

/// Whether attachable objects should be held by the magnet this frame.
///
/// Engages when `strength` rises above [`CAPTURE_THRESHOLD`] and releases when
/// it falls to or below it. The previous state only matters for telling
/// transitions apart; the result depends on `strength` alone.
pub fn capture_policy(strength: f64, currently_captured: bool) -> bool {
    let strong = strength > CAPTURE_THRESHOLD;
    match (currently_captured, strong) {
        (false, true) => true,
        (true, false) => false,
        (held, _) => held,
    }
}

/// Opacity of the drawn field lines around the coil, `0..=255`.
///
/// The iron core reaches full opacity at strength 4; the air core tops out
/// at 150 by strength 0.8 so weak fields are still visible.
pub fn field_line_alpha(strength: f64, has_core: bool) -> u8 {
    let alpha = if has_core {
        strength / 4.0 * 255.0
    } else {
        strength / 0.8 * 150.0
    };
    if alpha.is_nan() {
        return 0;
    }
    alpha.clamp(0.0, 255.0).round() as u8
}

/// Coil wire colour: copper at 0 A shading to yellow at 100 A.
pub fn coil_color(current: f64) -> [u8; 3] {
    const COPPER: [f64; 3] = [184.0, 115.0, 51.0];
    const GLOW: [f64; 3] = [255.0, 255.0, 0.0];
    let t = if current.is_finite() {
        (current / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut rgb = [0u8; 3];
    for (out, (a, b)) in rgb.iter_mut().zip(COPPER.iter().zip(GLOW.iter())) {
        *out = (a + (b - a) * t).round() as u8;
    }
    rgb
}

/// An object the electromagnet can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paperclip {
    pub position: DVec2,
    /// Where the clip lies when not held.
    pub rest: DVec2,
    /// Drawing rotation in radians.
    pub angle: f64,
    pub captured: bool,
}

impl Paperclip {
    pub fn new(rest: DVec2, angle: f64) -> Self {
        Self {
            position: rest,
            rest,
            angle,
            captured: false,
        }
    }

    /// Advances the clip one frame.
    ///
    /// `magnet_point` is where captured clips gather; `jitter` is added to its
    /// x coordinate so clips do not stack on a single pixel. A clip in
    /// flight keeps moving until it arrives, and a clip that has arrived
    /// stays put until the policy changes.
    pub fn update(&mut self, strength: f64, magnet_point: DVec2, jitter: f64) {
        let engaged = capture_policy(strength, self.captured);
        if engaged && !self.captured {
            let target = DVec2::new(magnet_point.x + jitter, magnet_point.y);
            self.position = self.position.lerp(target, CLIP_EASE);
            if (self.position.y - magnet_point.y).abs() < CLIP_SNAP_DISTANCE {
                self.captured = true;
                log::trace!("paperclip captured at {}", self.position);
            }
        } else if !engaged && self.captured {
            self.position = self.position.lerp(self.rest, CLIP_EASE);
            if (self.position.y - self.rest.y).abs() < CLIP_SNAP_DISTANCE {
                self.captured = false;
                log::trace!("paperclip released at {}", self.position);
            }
        }
    }
}
