//! Bar magnet geometry: pole positions and the body used as the
//! pole-exclusion region for streamline tracing.

use glam::DVec2;

use crate::field_source::{Polarity, PointPole};
use crate::rect::Rect;

/// Default bar length in canvas units, end face to end face.
pub const BODY_LENGTH: f64 = 120.0;
/// Default bar thickness in canvas units.
pub const BODY_THICKNESS: f64 = 30.0;
/// How far each point pole sits inside its end face.
///
/// Lines leaving the outer face of the north pole land on the outer face of
/// the south pole; with the pole inset they cross the body edge on arrival.
pub const POLE_INSET: f64 = 10.0;

/// A bar magnet: two poles plus the rectangular body around them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnet {
    pub north: DVec2,
    pub south: DVec2,
    /// Half the body extent perpendicular to the pole axis.
    pub half_thickness: f64,
    /// Body extension past each pole along the axis.
    pub pole_inset: f64,
}

impl Magnet {
    /// Magnet with the given poles and the default body proportions.
    pub fn new(north: DVec2, south: DVec2) -> Self {
        Self {
            north,
            south,
            half_thickness: BODY_THICKNESS / 2.0,
            pole_inset: POLE_INSET,
        }
    }

    /// Horizontal bar magnet centered on a `width x height` canvas,
    /// north pole on the left.
    pub fn centered(width: f64, height: f64) -> Self {
        let center = DVec2::new(width / 2.0, height / 2.0);
        let half = DVec2::new(BODY_LENGTH / 2.0 - POLE_INSET, 0.0);
        Self::new(center - half, center + half)
    }

    /// North then south.
    pub fn poles(&self) -> [PointPole; 2] {
        [
            PointPole::new(self.north, Polarity::North),
            PointPole::new(self.south, Polarity::South),
        ]
    }

    pub fn center(&self) -> DVec2 {
        (self.north + self.south) * 0.5
    }

    /// Unit vector from the north pole toward the south pole.
    pub fn axis(&self) -> DVec2 {
        let axis = (self.south - self.north).normalize_or_zero();
        if axis == DVec2::ZERO {
            DVec2::X
        } else {
            axis
        }
    }

    /// Bounding rectangle of the magnet body. Streamlines stop on entry.
    pub fn body(&self) -> Rect {
        let axis = self.axis();
        let along = ((self.south - self.north) * 0.5).abs() + (axis * self.pole_inset).abs();
        let across = (axis.perp() * self.half_thickness).abs();
        Rect::from_center(self.center(), along + across)
    }

    /// Distance from a pole to the far corners of its end of the body.
    /// Seeds placed beyond this radius on the outward side are clear of the body.
    pub fn pole_clearance(&self) -> f64 {
        DVec2::new(self.pole_inset, self.half_thickness).length()
    }

    /// Same magnet with the poles swapped.
    pub fn flipped(&self) -> Self {
        Self {
            north: self.south,
            south: self.north,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_places_poles_symmetrically() {
        let m = Magnet::centered(600.0, 400.0);
        assert_eq!(m.north, DVec2::new(250.0, 200.0));
        assert_eq!(m.south, DVec2::new(350.0, 200.0));
        assert_eq!(m.center(), DVec2::new(300.0, 200.0));
    }

    #[test]
    fn axis_points_north_to_south() {
        let m = Magnet::centered(600.0, 400.0);
        assert_eq!(m.axis(), DVec2::X);
        assert_eq!(m.flipped().axis(), -DVec2::X);
    }

    #[test]
    fn body_spans_end_faces_and_thickness() {
        let m = Magnet::centered(600.0, 400.0);
        let body = m.body();
        assert_eq!(body.min, DVec2::new(240.0, 185.0));
        assert_eq!(body.max, DVec2::new(360.0, 215.0));
        assert!(body.contains(m.north));
        assert!(body.contains(m.south));
    }

    #[test]
    fn vertical_magnet_body_is_tall() {
        let m = Magnet::new(DVec2::new(0.0, -60.0), DVec2::new(0.0, 60.0));
        let size = m.body().size();
        assert!((size.x - BODY_THICKNESS).abs() < 1e-12, "got {size}");
        assert!((size.y - (120.0 + 2.0 * POLE_INSET)).abs() < 1e-12, "got {size}");
    }

    #[test]
    fn flipped_keeps_body() {
        let m = Magnet::centered(600.0, 400.0);
        assert_eq!(m.flipped().body(), m.body());
    }

    #[test]
    fn clearance_reaches_body_corner() {
        let m = Magnet::centered(600.0, 400.0);
        let corner = m.body().min;
        assert!((m.north.distance(corner) - m.pole_clearance()).abs() < 1e-12);
    }

    #[test]
    fn coincident_poles_fall_back_to_x_axis() {
        let m = Magnet::new(DVec2::ONE, DVec2::ONE);
        assert_eq!(m.axis(), DVec2::X);
    }
}
