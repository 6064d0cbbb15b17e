use serde::{Deserialize, Serialize};

use crate::course::{COURSE_LENGTH, Course};
use crate::error::ScoringError;
use crate::handicap::dots_for_ranks;
use crate::stableford::{PAR_ROUND_POINTS, check_card_length, score_round};

/// One competitor's completed round on one day.
///
/// The Stableford total is computed once at construction; a round is
/// replaced wholesale rather than edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundCard", into = "RoundCard")]
pub struct RoundRecord {
    course: Course,
    raw_scores: Vec<i32>,
    points: i32,
}

/// Stored form of a round; points are recomputed when it is read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoundCard {
    course: Course,
    raw_scores: Vec<i32>,
}

impl TryFrom<RoundCard> for RoundRecord {
    type Error = ScoringError;

    fn try_from(card: RoundCard) -> Result<Self, Self::Error> {
        RoundRecord::new(card.course, card.raw_scores)
    }
}

impl From<RoundRecord> for RoundCard {
    fn from(round: RoundRecord) -> Self {
        Self {
            course: round.course,
            raw_scores: round.raw_scores,
        }
    }
}

impl RoundRecord {
    pub fn new(course: Course, raw_scores: Vec<i32>) -> Result<Self, ScoringError> {
        check_card_length(&raw_scores)?;
        let points = score_round(&raw_scores, course.par())?;
        Ok(Self {
            course,
            raw_scores,
            points,
        })
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn raw_scores(&self) -> &[i32] {
        &self.raw_scores
    }

    /// Stableford points before any handicap allowance.
    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn total_raw_score(&self) -> i32 {
        self.raw_scores.iter().sum()
    }

    /// Points relative to the day's target of `36 - handicap`.
    pub fn net_points(&self, handicap: u8) -> i32 {
        self.points - point_target(handicap)
    }

    /// Bonus strokes per hole for `handicap` on this round's course.
    pub fn dots(&self, handicap: u8) -> [u8; COURSE_LENGTH] {
        dots_for_ranks(self.course.difficulty(), handicap)
    }

    /// Strokes relative to par on each hole.
    pub fn net_scores(&self) -> [i32; COURSE_LENGTH] {
        let mut net = [0; COURSE_LENGTH];
        for ((n, &raw), &par) in net.iter_mut().zip(&self.raw_scores).zip(self.course.par()) {
            *n = raw - i32::from(par);
        }
        net
    }
}

/// Points a competitor must reach in a day to break even.
pub fn point_target(handicap: u8) -> i32 {
    PAR_ROUND_POINTS - i32::from(handicap)
}
