//! Fleming's hand rules as sign multiplication.
//!
//! Each direction is a signed axis: field Right (north to south, left to
//! right) is `+`, current IntoPage is `+`, force Down (screen y) is `+`,
//! generator motion Up is `+`. With those encodings both rules reduce to
//! `outcome = a * b`:
//!
//! | rule  | index finger | second finger | thumb  |
//! |-------|--------------|---------------|--------|
//! | left  | field        | current       | force  |
//! | right | field        | current       | motion |

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

/// Sign of a direction along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            1 => Some(Sign::Plus),
            -1 => Some(Sign::Minus),
            _ => None,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_i8())
    }

    pub fn flipped(self) -> Self {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        signed_outcome(self, rhs)
    }
}

/// `a * b`: `+` when the signs agree, `-` otherwise.
pub fn signed_outcome(a: Sign, b: Sign) -> Sign {
    if a == b {
        Sign::Plus
    } else {
        Sign::Minus
    }
}

macro_rules! signed_direction {
    ($(#[$meta:meta])* $name:ident { plus: $plus:ident => $plus_label:literal, minus: $minus:ident => $minus_label:literal $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $plus,
            $minus,
        }

        impl $name {
            pub fn sign(self) -> Sign {
                match self {
                    $name::$plus => Sign::Plus,
                    $name::$minus => Sign::Minus,
                }
            }

            pub fn from_sign(sign: Sign) -> Self {
                match sign {
                    Sign::Plus => $name::$plus,
                    Sign::Minus => $name::$minus,
                }
            }

            pub fn reversed(self) -> Self {
                Self::from_sign(self.sign().flipped())
            }

            pub fn label(self) -> &'static str {
                match self {
                    $name::$plus => $plus_label,
                    $name::$minus => $minus_label,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

signed_direction! {
    /// Horizontal field between the poles. `Right` is north on the left.
    FieldDirection { plus: Right => "right", minus: Left => "left" }
}

signed_direction! {
    /// Current through a wire seen end-on. Drawn as a cross (into) or a dot (out).
    CurrentDirection { plus: IntoPage => "into", minus: OutOfPage => "out" }
}

signed_direction! {
    /// Force on a current-carrying wire, in screen coordinates.
    ForceDirection { plus: Down => "down", minus: Up => "up" }
}

signed_direction! {
    /// Motion of a wire moved through the field.
    MotionDirection { plus: Up => "up", minus: Down => "down" }
}

/// Per-frame vertical speed below which a moving wire counts as still.
pub const MOTION_DEAD_ZONE: f64 = 1.0;

impl MotionDirection {
    /// Direction of a per-frame screen-y velocity (positive is down), or
    /// `None` inside the dead zone.
    pub fn from_velocity(velocity: f64) -> Option<Self> {
        if velocity.abs() > MOTION_DEAD_ZONE {
            Some(if velocity > 0.0 {
                MotionDirection::Down
            } else {
                MotionDirection::Up
            })
        } else {
            None
        }
    }
}

/// Left-hand rule: force on a wire carrying `current` through `field`.
pub fn motor_force(field: FieldDirection, current: CurrentDirection) -> ForceDirection {
    ForceDirection::from_sign(field.sign() * current.sign())
}

/// Right-hand rule: current induced in a wire moved through `field`.
pub fn generator_current(field: FieldDirection, motion: MotionDirection) -> CurrentDirection {
    CurrentDirection::from_sign(field.sign() * motion.sign())
}

/// Which of Fleming's rules applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandRule {
    /// Motors: force from field and current.
    LeftHand,
    /// Generators: current from field and motion.
    RightHand,
}

impl HandRule {
    pub fn title(self) -> &'static str {
        match self {
            HandRule::LeftHand => "Left Hand Rule",
            HandRule::RightHand => "Right Hand Rule",
        }
    }

    /// Finger assignments, one line each.
    pub fn fingers(self) -> [&'static str; 3] {
        match self {
            HandRule::LeftHand => ["Field (Index)", "Current (SeCond)", "Force (Thumb)"],
            HandRule::RightHand => ["Field (Index)", "Current (SeCond)", "Motion (Thumb)"],
        }
    }

    /// Caption lines for a motor diagram.
    pub fn motor_hint(
        field: FieldDirection,
        current: CurrentDirection,
        force: ForceDirection,
    ) -> [String; 3] {
        let [f, c, t] = HandRule::LeftHand.fingers();
        [
            format!("{f}: {field}"),
            format!("{c}: {current}"),
            format!("{t}: {force}"),
        ]
    }
}
