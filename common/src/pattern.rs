use crate::{error::PatternError, hex::Hex};
use std::{fmt, str::FromStr};

pub const FIREWORKS: &[Hex] = &[
    Hex::new(-4, 2),
    Hex::new(-3, 1),
    Hex::new(-3, 2),
    Hex::new(1, -1),
    Hex::new(1, 0),
    Hex::new(2, -1),
];

#[rustfmt::skip]
pub const PPM: &[Hex] = &[
    // P
    Hex::new(-7, 2), Hex::new(-7, 3), Hex::new(-7, 4), Hex::new(-7, 5),
    Hex::new(-6, 1), Hex::new(-6, 3), Hex::new(-5, 1), Hex::new(-5, 2),
    // P
    Hex::new(-3, 0), Hex::new(-3, 1), Hex::new(-3, 2), Hex::new(-3, 3),
    Hex::new(-2, -1), Hex::new(-2, 1), Hex::new(-1, -1), Hex::new(-1, 0),
    // M
    Hex::new(1, -2), Hex::new(1, -1), Hex::new(1, 0), Hex::new(1, 1),
    Hex::new(2, -2), Hex::new(3, -2), Hex::new(4, -3),
    Hex::new(5, -4), Hex::new(5, -3), Hex::new(5, -2), Hex::new(5, -1),
];

/// Built-in lit sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Fireworks,
    Ppm,
}

impl Pattern {
    pub const ALL: [Pattern; 2] = [Pattern::Fireworks, Pattern::Ppm];

    pub fn cells(self) -> &'static [Hex] {
        match self {
            Self::Fireworks => FIREWORKS,
            Self::Ppm => PPM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fireworks => "fireworks",
            Self::Ppm => "ppm",
        }
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PatternError::Unknown(s.to_owned()))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
