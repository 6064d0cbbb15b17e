use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// One of the tournament's three playing days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "Day 1")]
    One,
    #[serde(rename = "Day 2")]
    Two,
    #[serde(rename = "Day 3")]
    Three,
}

impl Day {
    /// All days in playing order.
    pub const ALL: [Day; 3] = [Day::One, Day::Two, Day::Three];

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "Day 1",
            Self::Two => "Day 2",
            Self::Three => "Day 3",
        }
    }

    /// 1-based day number.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn from_number(number: u8) -> Result<Self, ScoringError> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ScoringError::UnknownDay(format!("Day {other}"))),
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.label() == s)
            .ok_or_else(|| ScoringError::UnknownDay(s.to_string()))
    }
}
