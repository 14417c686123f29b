#![deny(unsafe_code)]
//! The three-level electromagnetism quiz.
//!
//! [`level`] holds the level definitions and the per-level answer checks;
//! [`session`] tracks progress and score across levels. Hand-rule levels
//! derive their correct option from `fieldlab_core::hand_rule`, so the quiz
//! and the motor/generator simulations always agree.

pub mod level;
pub mod session;

pub use level::{standard_levels, Answer, ChoiceOption, Level, LevelKind, Outcome, Verdict};
pub use session::{QuizSession, QuizState, Rank, Status};
