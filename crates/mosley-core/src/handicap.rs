use serde::{Deserialize, Serialize};

use crate::course::{COURSE_LENGTH, validate_difficulty};
use crate::error::ScoringError;

/// Largest handicap a competitor may carry.
pub const MAX_HANDICAP: u8 = 30;

/// Handicap cap applied in the primary competition.
pub const PRIMARY_HANDICAP_CAP: u8 = 20;

/// The two concurrent competitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    /// The Mosley Open, played off handicaps capped at 20.
    Primary,
    /// The Twisted Creek, played off the full handicap.
    Secondary,
}

impl Competition {
    pub fn title(self) -> &'static str {
        match self {
            Self::Primary => "Mosley Open",
            Self::Secondary => "Twisted Creek",
        }
    }
}

impl std::str::FromStr for Competition {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(ScoringError::InvalidCompetitor(format!(
                "unknown competition {other:?}"
            ))),
        }
    }
}

/// A competitor's handicap in each competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HandicapProfile {
    primary: u8,
    secondary: u8,
}

impl HandicapProfile {
    /// Build a profile from a competitor's full handicap.
    pub fn new(handicap: i64) -> Result<Self, ScoringError> {
        let secondary = u8::try_from(handicap)
            .ok()
            .filter(|&h| h <= MAX_HANDICAP)
            .ok_or(ScoringError::InvalidHandicap(handicap))?;
        Ok(Self {
            primary: secondary.min(PRIMARY_HANDICAP_CAP),
            secondary,
        })
    }

    pub fn primary(self) -> u8 {
        self.primary
    }

    pub fn secondary(self) -> u8 {
        self.secondary
    }

    pub fn for_competition(self, competition: Competition) -> u8 {
        match competition {
            Competition::Primary => self.primary,
            Competition::Secondary => self.secondary,
        }
    }
}

impl TryFrom<u8> for HandicapProfile {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<HandicapProfile> for u8 {
    fn from(profile: HandicapProfile) -> Self {
        profile.secondary
    }
}

/// Per-hole bonus strokes ("dots") for a handicap on a course.
///
/// A hole of difficulty rank `R` gets two dots when `H - 18 - R >= 0`, one
/// when `H - R >= 0`, and none otherwise, so handicaps above 18 earn their
/// second stroke on the hardest holes first.
pub fn allocate_strokes(
    difficulty: &[u8],
    handicap: u8,
) -> Result<[u8; COURSE_LENGTH], ScoringError> {
    let ranks = validate_difficulty(difficulty)?;
    Ok(dots_for_ranks(&ranks, handicap))
}

/// Stroke allocation over an already validated ranking.
pub(crate) fn dots_for_ranks(ranks: &[u8; COURSE_LENGTH], handicap: u8) -> [u8; COURSE_LENGTH] {
    let handicap = i32::from(handicap);
    let course_length = COURSE_LENGTH as i32;

    let mut dots = [0u8; COURSE_LENGTH];
    for (dot, &rank) in dots.iter_mut().zip(ranks.iter()) {
        let rank = i32::from(rank);
        *dot = if handicap - course_length - rank >= 0 {
            2
        } else if handicap - rank >= 0 {
            1
        } else {
            0
        };
    }
    dots
}
