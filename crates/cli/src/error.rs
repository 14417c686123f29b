//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation or quiz error (unknown simulation, bad answer, bad dimensions)
//! - 11: I/O error (file read/write, snapshot)
//! - 12: input error (bad JSON params, scene or answers)
//! - 13: serialization error

use fieldlab_core::LabError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A simulation or quiz error.
    Lab(LabError),
    /// An I/O error (file read or write, snapshot rendering).
    Io(String),
    /// A user input error (bad JSON on the command line or in a file).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Lab(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Lab(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<LabError> for CliError {
    fn from(e: LabError) -> Self {
        match e {
            LabError::Io(msg) => CliError::Io(msg),
            LabError::InvalidInput(msg) => CliError::Input(msg),
            LabError::ParamTypeMismatch { .. } | LabError::InvalidStepSize(_) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Lab(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
