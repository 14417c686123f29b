//! Quiz session state machine.
//!
//! ```text
//! Level(0) --correct--> Level(1) --correct--> ... --correct--> Victory
//!    ^  |                  |                                     |
//!    |  +--wrong--(stay)   +--wrong--(stay)                      |
//!    +------------------------- restart -------------------------+
//! ```

use fieldlab_core::error::LabError;
use serde::Serialize;

use crate::level::{standard_levels, Answer, Level, Outcome};

/// Where the player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum QuizState {
    /// Playing the level at this index.
    Level(usize),
    /// Every level cleared.
    Victory,
}

/// Badge shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rank {
    Apprentice,
    Engineer,
    ChiefScientist,
}

impl Rank {
    /// Below 100 is Apprentice, below 250 Engineer, otherwise Chief Scientist.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=99 => Rank::Apprentice,
            100..=249 => Rank::Engineer,
            _ => Rank::ChiefScientist,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Apprentice => "Apprentice",
            Rank::Engineer => "Engineer",
            Rank::ChiefScientist => "Chief Scientist",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display summary of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    /// Index of the level being played; `None` after victory.
    pub level_index: Option<usize>,
    pub level_title: Option<String>,
    pub score: u32,
    pub rank: &'static str,
    pub complete: bool,
}

/// One player's run through the levels.
#[derive(Debug, Clone)]
pub struct QuizSession {
    levels: Vec<Level>,
    state: QuizState,
    score: u32,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(standard_levels())
    }
}

impl QuizSession {
    /// Starts at the first level with score 0. An empty level list starts
    /// (and stays) in `Victory`.
    pub fn new(levels: Vec<Level>) -> Self {
        let state = if levels.is_empty() {
            QuizState::Victory
        } else {
            QuizState::Level(0)
        };
        Self {
            levels,
            state,
            score: 0,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rank(&self) -> Rank {
        Rank::from_score(self.score)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The level being played, if any.
    pub fn current_level(&self) -> Option<&Level> {
        match self.state {
            QuizState::Level(i) => self.levels.get(i),
            QuizState::Victory => None,
        }
    }

    /// Sum of every level's reward.
    pub fn max_score(&self) -> u32 {
        self.levels.iter().map(|l| l.reward).sum()
    }

    /// Judges `answer` against the current level and applies the score
    /// change. Correct answers advance; wrong ones stay. The score never
    /// drops below 0.
    pub fn submit(&mut self, answer: &Answer) -> Result<Outcome, LabError> {
        let QuizState::Level(index) = self.state else {
            return Err(LabError::QuizComplete);
        };
        let level = self.levels.get(index).ok_or(LabError::QuizComplete)?;
        let outcome = level.evaluate(index, answer)?;

        self.score = apply_delta(self.score, outcome.score_delta);
        log::debug!(
            "level {} answered: {:?}, score {}",
            index + 1,
            outcome.verdict,
            self.score
        );

        if outcome.correct {
            let next = index + 1;
            if next < self.levels.len() {
                self.state = QuizState::Level(next);
                log::info!("advanced to level {}: {}", next + 1, self.levels[next].title);
            } else {
                self.state = QuizState::Victory;
                log::info!("quiz complete: {}", self.summary());
            }
        }
        Ok(outcome)
    }

    /// Back to the first level with score 0.
    pub fn restart(&mut self) {
        *self = Self::new(std::mem::take(&mut self.levels));
        log::info!("quiz restarted");
    }

    pub fn status(&self) -> Status {
        let level_index = match self.state {
            QuizState::Level(i) => Some(i),
            QuizState::Victory => None,
        };
        Status {
            level_index,
            level_title: self.current_level().map(|l| l.title.clone()),
            score: self.score,
            rank: self.rank().label(),
            complete: self.state == QuizState::Victory,
        }
    }

    /// "Final Score: s/max".
    pub fn summary(&self) -> String {
        format!("Final Score: {}/{}", self.score, self.max_score())
    }
}

fn apply_delta(score: u32, delta: i64) -> u32 {
    let next = i64::from(score).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}
