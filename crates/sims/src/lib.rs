#![deny(unsafe_code)]
//! Simulation registry: maps simulation names to implementations and
//! provides CPU-side snapshot rendering.
//!
//! Both the CLI and the WASM bindings depend on this crate so dispatch
//! logic lives in one place.

pub mod electromagnet;
pub mod field_lines;
pub mod generator;
pub mod motor;
pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use fieldlab_core::error::LabError;
use fieldlab_core::Simulation;
use glam::DVec2;
use serde_json::Value;

/// All available simulation names.
const SIMULATION_NAMES: &[&str] = &["electromagnet", "motor", "generator", "field-lines"];

/// Canvas size as a vector, rejecting zero dimensions.
pub(crate) fn canvas_size(width: u32, height: u32) -> Result<DVec2, LabError> {
    if width == 0 || height == 0 {
        return Err(LabError::InvalidDimensions);
    }
    Ok(DVec2::new(f64::from(width), f64::from(height)))
}

/// Enumeration of all available simulations.
///
/// Wraps each implementation and delegates `Simulation` trait methods.
/// Use [`SimKind::from_name`] for string-based construction (CLI, WASM).
pub enum SimKind {
    Electromagnet(electromagnet::Electromagnet),
    Motor(motor::Motor),
    Generator(generator::Generator),
    FieldLines(field_lines::FieldLines),
}

impl SimKind {
    /// Constructs a simulation by name.
    ///
    /// Returns `LabError::UnknownSimulation` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: u32,
        height: u32,
        seed: u64,
        params: &Value,
    ) -> Result<Self, LabError> {
        let sim = match name {
            "electromagnet" => SimKind::Electromagnet(electromagnet::Electromagnet::from_json(
                width, height, seed, params,
            )?),
            "motor" => SimKind::Motor(motor::Motor::from_json(width, height, params)?),
            "generator" => SimKind::Generator(generator::Generator::from_json(width, height, params)?),
            "field-lines" => SimKind::FieldLines(field_lines::FieldLines::from_json(
                width, height, seed, params,
            )?),
            _ => return Err(LabError::UnknownSimulation(name.to_string())),
        };
        log::debug!("created simulation {name} ({width}x{height}, seed {seed})");
        Ok(sim)
    }

    /// Returns a slice of all recognized simulation names.
    pub fn list_simulations() -> &'static [&'static str] {
        SIMULATION_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            SimKind::Electromagnet(_) => "electromagnet",
            SimKind::Motor(_) => "motor",
            SimKind::Generator(_) => "generator",
            SimKind::FieldLines(_) => "field-lines",
        }
    }

    fn inner(&self) -> &dyn Simulation {
        match self {
            SimKind::Electromagnet(s) => s,
            SimKind::Motor(s) => s,
            SimKind::Generator(s) => s,
            SimKind::FieldLines(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Simulation {
        match self {
            SimKind::Electromagnet(s) => s,
            SimKind::Motor(s) => s,
            SimKind::Generator(s) => s,
            SimKind::FieldLines(s) => s,
        }
    }
}

impl Simulation for SimKind {
    fn step(&mut self) -> Result<(), LabError> {
        self.inner_mut().step()
    }

    fn set_params(&mut self, params: &Value) -> Result<(), LabError> {
        self.inner_mut().set_params(params)
    }

    fn params(&self) -> Value {
        self.inner().params()
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }

    fn snapshot(&self) -> Value {
        self.inner().snapshot()
    }

    fn frame(&self) -> u64 {
        self.inner().frame()
    }
}
