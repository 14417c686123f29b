//! Error types for the fieldlab core.

use thiserror::Error;

/// Errors produced by simulation, configuration, and quiz operations.
#[derive(Debug, Error)]
pub enum LabError {
    /// Width or height was zero (or not finite) when building a scene or canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Streamline step size was zero, negative, or not finite.
    #[error("invalid step size {0}: must be a positive finite number")]
    InvalidStepSize(f64),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// The requested simulation name is not registered.
    #[error("unknown simulation: {0}")]
    UnknownSimulation(String),

    /// A quiz answer of the wrong kind was submitted for the current level.
    #[error("level {level} expects a {expected} answer")]
    AnswerMismatch { level: usize, expected: String },

    /// A multiple-choice answer named an option the level does not offer.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// An answer was submitted after the final level was cleared.
    #[error("quiz already complete; restart to play again")]
    QuizComplete,

    /// Text handed in by a caller (params, scene) was not valid JSON.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}
