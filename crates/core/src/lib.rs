#![deny(unsafe_code)]
//! Core types and traits for the fieldlab electromagnetism lab.
//!
//! Provides the dipole field model (`FieldSource`, `Magnet`), the streamline
//! tracer, the `RevealGrid` exposure map, the electromagnet strength and
//! capture model, the hand-rule sign engine, the `Simulation` trait,
//! `Xorshift64` PRNG, `Scene`, and parameter helpers.

pub mod electromagnet;
pub mod error;
pub mod field_source;
pub mod hand_rule;
pub mod magnet;
pub mod params;
pub mod prng;
pub mod rect;
pub mod reveal;
pub mod scene;
pub mod simulation;
pub mod streamline;

pub use electromagnet::{capture_policy, strength, Coil, Paperclip};
pub use error::LabError;
pub use field_source::{dipole_field, FieldSource, PointPole, Polarity};
pub use hand_rule::{
    generator_current, motor_force, signed_outcome, CurrentDirection, FieldDirection,
    ForceDirection, HandRule, MotionDirection, Sign,
};
pub use magnet::Magnet;
pub use prng::Xorshift64;
pub use rect::Rect;
pub use reveal::RevealGrid;
pub use scene::Scene;
pub use simulation::Simulation;
pub use streamline::{seeds, trace, Direction, Seed, SeedLayout, Streamline, Termination, TraceParams};
