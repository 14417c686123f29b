//! Axis-aligned rectangles used for canvas bounds and pole exclusion.

use glam::DVec2;

/// An axis-aligned rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// Rectangle spanning `min..=max`. Corners are reordered if needed.
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Canvas-sized rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    /// Rectangle centered on `center` extending `half_size` on each side.
    pub fn from_center(center: DVec2, half_size: DVec2) -> Self {
        let half = half_size.abs();
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// True when `p` lies inside or on the edge.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Cuts the segment `from -> to` at the rectangle edge.
    ///
    /// `from` must be inside. Returns the last point of the segment that is
    /// still inside the rectangle (which is `to` itself when `to` is inside).
    pub fn clip_segment(&self, from: DVec2, to: DVec2) -> DVec2 {
        let delta = to - from;
        let mut t: f64 = 1.0;
        for axis in 0..2 {
            let (d, f, lo, hi) = (delta[axis], from[axis], self.min[axis], self.max[axis]);
            if f + d > hi && d != 0.0 {
                t = t.min((hi - f) / d);
            } else if f + d < lo && d != 0.0 {
                t = t.min((lo - f) / d);
            }
        }
        (from + delta * t.clamp(0.0, 1.0)).clamp(self.min, self.max)
    }
}
