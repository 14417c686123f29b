//! Quiz levels and how each one judges an answer.

use fieldlab_core::error::LabError;
use fieldlab_core::hand_rule::{
    generator_current, motor_force, CurrentDirection, FieldDirection, ForceDirection,
    MotionDirection,
};
use serde::{Deserialize, Serialize};

/// `current * turns` per tesla for the crane magnet in level 1.
pub const CRANE_DIVISOR: f64 = 1000.0;

/// Field strength of the crane magnet.
pub fn crane_strength(current: f64, turns: f64) -> f64 {
    current * turns / CRANE_DIVISOR
}

/// A player's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Slider settings for a [`LevelKind::SliderCheck`] level.
    Slider { current: f64, turns: f64 },
    /// Option key for a [`LevelKind::MultipleChoice`] level.
    Choice(String),
}

impl Answer {
    pub fn slider(current: f64, turns: f64) -> Self {
        Answer::Slider { current, turns }
    }

    pub fn choice(key: &str) -> Self {
        Answer::Choice(key.to_owned())
    }
}

/// One button of a multiple-choice level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
    pub correct: bool,
    /// Feedback shown when this option is picked.
    pub feedback: String,
}

/// What a level asks for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LevelKind {
    /// Set current and turns so the magnet reaches `target_strength`
    /// without exceeding `max_current`.
    SliderCheck {
        target_strength: f64,
        max_current: f64,
        /// Deducted on overload.
        overload_penalty: u32,
    },
    /// Pick one of `options`; a wrong pick costs `penalty`.
    MultipleChoice {
        options: Vec<ChoiceOption>,
        penalty: u32,
    },
}

/// How an answer was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Success,
    /// Slider level: current above the limit.
    Overload,
    /// Slider level: within limits but not strong enough.
    TooWeak,
    /// Multiple-choice level: wrong option.
    Incorrect,
}

/// Result of judging one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub correct: bool,
    pub score_delta: i64,
    pub verdict: Verdict,
    pub message: String,
}

/// A quiz level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Points for a correct answer.
    pub reward: u32,
    pub kind: LevelKind,
}

impl Level {
    /// Judges `answer`. `index` only appears in the error for an answer of
    /// the wrong kind.
    pub fn evaluate(&self, index: usize, answer: &Answer) -> Result<Outcome, LabError> {
        match (&self.kind, answer) {
            (
                LevelKind::SliderCheck {
                    target_strength,
                    max_current,
                    overload_penalty,
                },
                Answer::Slider { current, turns },
            ) => Ok(self.judge_slider(
                *current,
                *turns,
                *target_strength,
                *max_current,
                *overload_penalty,
            )),
            (LevelKind::MultipleChoice { options, penalty }, Answer::Choice(key)) => {
                let option = options
                    .iter()
                    .find(|o| o.key == *key)
                    .ok_or_else(|| LabError::UnknownOption(key.clone()))?;
                Ok(if option.correct {
                    Outcome {
                        correct: true,
                        score_delta: i64::from(self.reward),
                        verdict: Verdict::Success,
                        message: option.feedback.clone(),
                    }
                } else {
                    Outcome {
                        correct: false,
                        score_delta: -i64::from(*penalty),
                        verdict: Verdict::Incorrect,
                        message: option.feedback.clone(),
                    }
                })
            }
            (kind, _) => Err(LabError::AnswerMismatch {
                level: index + 1,
                expected: kind.answer_name().to_owned(),
            }),
        }
    }

    fn judge_slider(
        &self,
        current: f64,
        turns: f64,
        target: f64,
        max_current: f64,
        penalty: u32,
    ) -> Outcome {
        if current > max_current {
            return Outcome {
                correct: false,
                score_delta: -i64::from(penalty),
                verdict: Verdict::Overload,
                message: "WARNING: Circuit Overload! Reduce current!".to_owned(),
            };
        }
        if crane_strength(current, turns) >= target {
            Outcome {
                correct: true,
                score_delta: i64::from(self.reward),
                verdict: Verdict::Success,
                message: "Success! Magnet engaged. Lifting car...".to_owned(),
            }
        } else {
            Outcome {
                correct: false,
                score_delta: 0,
                verdict: Verdict::TooWeak,
                message: format!("Field too weak. Needs > {target:.1} T"),
            }
        }
    }
}

impl LevelKind {
    fn answer_name(&self) -> &'static str {
        match self {
            LevelKind::SliderCheck { .. } => "slider",
            LevelKind::MultipleChoice { .. } => "choice",
        }
    }
}

const REWARD: u32 = 100;
const CHOICE_PENALTY: u32 = 20;

fn motor_level() -> Level {
    let field = FieldDirection::Right;
    let wanted = ForceDirection::Up;
    let options = [
        (CurrentDirection::IntoPage, "INTO Page"),
        (CurrentDirection::OutOfPage, "OUT of Page"),
    ]
    .into_iter()
    .map(|(current, label)| {
        let force = motor_force(field, current);
        let feedback = if force == wanted {
            format!("Correct! Current {current} + Field {field} = Force {force}.")
        } else {
            format!("Incorrect. Index={field}, Middle={current} -> Thumb={force}.")
        };
        ChoiceOption {
            key: current.label().to_owned(),
            label: label.to_owned(),
            correct: force == wanted,
            feedback,
        }
    })
    .collect();
    Level {
        id: 2,
        title: "Motor Wire Repair".to_owned(),
        description: "A wire is in a magnetic field pointing RIGHT (N to S). We need the wire \
                      to feel a force UPWARDS. According to Fleming's Left Hand Rule, which \
                      way should the current flow?"
            .to_owned(),
        reward: REWARD,
        kind: LevelKind::MultipleChoice {
            options,
            penalty: CHOICE_PENALTY,
        },
    }
}

fn generator_level() -> Level {
    let field = FieldDirection::Right;
    let wanted = CurrentDirection::IntoPage;
    let options = [
        (MotionDirection::Up, "MOVE UP"),
        (MotionDirection::Down, "MOVE DOWN"),
    ]
    .into_iter()
    .map(|(motion, label)| {
        let current = generator_current(field, motion);
        let feedback = if current == wanted {
            format!("Correct! Moving {motion} induces current {current} the page.")
        } else {
            format!("Incorrect. Moving {motion} induces current {current} of the page.")
        };
        ChoiceOption {
            key: motion.label().to_owned(),
            label: label.to_owned(),
            correct: current == wanted,
            feedback,
        }
    })
    .collect();
    Level {
        id: 3,
        title: "Generator Emergency".to_owned(),
        description: "The main power is out! You see a wire in a field pointing RIGHT (N to S). \
                      To generate current flowing INTO (Cross) the page, which way must you \
                      move the wire? Use Fleming's Right Hand Rule!"
            .to_owned(),
        reward: REWARD,
        kind: LevelKind::MultipleChoice {
            options,
            penalty: CHOICE_PENALTY,
        },
    }
}

/// The three built-in levels: crane magnet, motor rule, generator rule.
pub fn standard_levels() -> Vec<Level> {
    vec![
        Level {
            id: 1,
            title: "Junkyard Magnet".to_owned(),
            description: "We need to lift a 2-ton car. The electromagnet needs a field \
                          strength of at least 3.0 T. Setting the current too high (>80A) \
                          will fuse the circuits!"
                .to_owned(),
            reward: REWARD,
            kind: LevelKind::SliderCheck {
                target_strength: 3.0,
                max_current: 80.0,
                overload_penalty: 10,
            },
        },
        motor_level(),
        generator_level(),
    ]
}
