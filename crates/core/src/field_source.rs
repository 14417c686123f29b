//! Field sources: 2D vector fields sampled by the streamline tracer.
//!
//! A bar magnet is approximated by dipole superposition: the north pole is
//! an inverse-square point source, the south pole an inverse-square sink.
//! Every sample is a pure function of its inputs.

use glam::DVec2;

use crate::magnet::Magnet;

/// A source of 2D field vectors.
///
/// All implementations must be deterministic: same point = same vector.
pub trait FieldSource: Send + Sync {
    /// Sample the field at `point`. The result is not normalized.
    fn sample(&self, point: DVec2) -> DVec2;
}

/// Which end of the magnet a pole sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Field lines leave the pole (source).
    North,
    /// Field lines enter the pole (sink).
    South,
}

impl Polarity {
    /// +1 for north, -1 for south.
    pub fn sign(self) -> f64 {
        match self {
            Polarity::North => 1.0,
            Polarity::South => -1.0,
        }
    }
}

/// An inverse-square point pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPole {
    pub position: DVec2,
    pub polarity: Polarity,
}

impl PointPole {
    pub fn new(position: DVec2, polarity: Polarity) -> Self {
        Self { position, polarity }
    }
}

impl FieldSource for PointPole {
    fn sample(&self, point: DVec2) -> DVec2 {
        let r = point - self.position;
        let mut dist = r.length();
        // Exactly on the pole: clamp so the contribution collapses to zero
        // instead of dividing by zero.
        if dist == 0.0 {
            dist = 1.0;
        }
        r * (self.polarity.sign() / (dist * dist * dist))
    }
}

/// Field of a two-pole magnet at `point`.
///
/// `(p - N) / |p - N|^3 - (p - S) / |p - S|^3`, repulsive at the north
/// pole and attractive at the south pole.
pub fn dipole_field(point: DVec2, magnet: &Magnet) -> DVec2 {
    magnet
        .poles()
        .iter()
        .fold(DVec2::ZERO, |acc, pole| acc + pole.sample(point))
}

impl FieldSource for Magnet {
    fn sample(&self, point: DVec2) -> DVec2 {
        dipole_field(point, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Magnet {
        Magnet::new(DVec2::new(-60.0, 0.0), DVec2::new(60.0, 0.0))
    }

    #[test]
    fn north_pole_pushes_away() {
        let pole = PointPole::new(DVec2::ZERO, Polarity::North);
        let v = pole.sample(DVec2::new(2.0, 0.0));
        assert!(v.x > 0.0, "north pole should repel, got {v}");
        assert!(v.y.abs() < 1e-15);
    }

    #[test]
    fn south_pole_pulls_in() {
        let pole = PointPole::new(DVec2::ZERO, Polarity::South);
        let v = pole.sample(DVec2::new(0.0, 3.0));
        assert!(v.y < 0.0, "south pole should attract, got {v}");
    }

    #[test]
    fn pole_falls_off_with_inverse_square() {
        let pole = PointPole::new(DVec2::ZERO, Polarity::North);
        let near = pole.sample(DVec2::new(1.0, 0.0)).length();
        let far = pole.sample(DVec2::new(2.0, 0.0)).length();
        assert!((near / far - 4.0).abs() < 1e-12, "ratio {}", near / far);
    }

    #[test]
    fn sample_on_pole_is_zero_not_nan() {
        let pole = PointPole::new(DVec2::new(3.0, 4.0), Polarity::South);
        let v = pole.sample(DVec2::new(3.0, 4.0));
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn field_on_north_pole_comes_from_south_only() {
        let magnet = bar();
        let on_pole = dipole_field(magnet.north, &magnet);
        let south_only = PointPole::new(magnet.south, Polarity::South).sample(magnet.north);
        assert_eq!(on_pole, south_only);
        assert!(on_pole.is_finite());
    }

    #[test]
    fn bisector_field_runs_parallel_to_axis_from_north_to_south() {
        let magnet = bar();
        for y in [-200.0, -50.0, -5.0, 5.0, 50.0, 200.0] {
            let v = dipole_field(DVec2::new(0.0, y), &magnet);
            assert!(v.x > 0.0, "field should point north to south at y={y}, got {v}");
            assert!(
                v.y.abs() < 1e-12 * v.x.abs().max(1.0),
                "perpendicular component should cancel at y={y}, got {v}"
            );
        }
    }

    #[test]
    fn bisector_field_is_mirror_symmetric() {
        let magnet = bar();
        let above = dipole_field(DVec2::new(0.0, -80.0), &magnet);
        let below = dipole_field(DVec2::new(0.0, 80.0), &magnet);
        assert!((above - below).length() < 1e-15);
    }

    #[test]
    fn swapping_poles_negates_field() {
        let a = DVec2::new(100.0, 150.0);
        let b = DVec2::new(220.0, 150.0);
        let forward = Magnet::new(a, b);
        let reversed = Magnet::new(b, a);
        let p = DVec2::new(37.0, 81.0);
        let lhs = dipole_field(p, &reversed);
        let rhs = -dipole_field(p, &forward);
        assert!((lhs - rhs).length() < 1e-15, "{lhs} vs {rhs}");
    }

    #[test]
    fn magnet_is_a_field_source() {
        let magnet = bar();
        let source: &dyn FieldSource = &magnet;
        let p = DVec2::new(10.0, -30.0);
        assert_eq!(source.sample(p), dipole_field(p, &magnet));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f64> {
            -500.0_f64..500.0
        }

        proptest! {
            #[test]
            fn field_is_odd_under_pole_swap(
                ax in coord(), ay in coord(),
                bx in coord(), by in coord(),
                px in coord(), py in coord(),
            ) {
                let a = DVec2::new(ax, ay);
                let b = DVec2::new(bx, by);
                let p = DVec2::new(px, py);
                let lhs = dipole_field(p, &Magnet::new(b, a));
                let rhs = -dipole_field(p, &Magnet::new(a, b));
                prop_assert!(
                    (lhs - rhs).length() <= 1e-12 * lhs.length().max(1.0),
                    "swap not antisymmetric: {} vs {}", lhs, rhs
                );
            }

            #[test]
            fn field_is_always_finite(
                px in coord(), py in coord(),
            ) {
                let magnet = Magnet::new(DVec2::new(-60.0, 0.0), DVec2::new(60.0, 0.0));
                let v = dipole_field(DVec2::new(px, py), &magnet);
                prop_assert!(v.is_finite(), "non-finite field {} at ({}, {})", v, px, py);
            }

            #[test]
            fn sampling_is_deterministic(
                px in coord(), py in coord(),
            ) {
                let magnet = Magnet::new(DVec2::new(-60.0, 0.0), DVec2::new(60.0, 0.0));
                let p = DVec2::new(px, py);
                let a = dipole_field(p, &magnet);
                let b = dipole_field(p, &magnet);
                prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
                prop_assert_eq!(a.y.to_bits(), b.y.to_bits());
            }
        }
    }
}
