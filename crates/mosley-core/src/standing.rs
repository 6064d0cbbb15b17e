use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::error::ScoringError;
use crate::handicap::{Competition, HandicapProfile};
use crate::round::RoundRecord;

/// Longest accepted competitor name.
pub const MAX_NAME_LEN: usize = 64;

/// A competitor's identity: their name as entered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompetitorId(String);

impl CompetitorId {
    pub fn new(name: &str) -> Result<Self, ScoringError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoringError::InvalidCompetitor(
                "name must not be empty".to_string(),
            ));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ScoringError::InvalidCompetitor(format!(
                "name exceeds {MAX_NAME_LEN} chars"
            )));
        }
        if name.contains(['/', '\\']) || name.chars().any(char::is_control) {
            return Err(ScoringError::InvalidCompetitor(format!(
                "name {name:?} contains reserved characters"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CompetitorId {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CompetitorId> for String {
    fn from(id: CompetitorId) -> Self {
        id.0
    }
}

/// Which competitions a competitor is still playing in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    PrimaryOnly,
    SecondaryOnly,
    #[default]
    BothEligible,
}

impl Eligibility {
    pub fn admits(self, competition: Competition) -> bool {
        match (self, competition) {
            (Self::BothEligible, _) => true,
            (Self::PrimaryOnly, Competition::Primary) => true,
            (Self::SecondaryOnly, Competition::Secondary) => true,
            _ => false,
        }
    }
}

/// A competitor's tournament record: handicap, rounds so far and eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorStanding {
    pub id: CompetitorId,
    pub handicap: HandicapProfile,
    #[serde(default)]
    pub rounds: BTreeMap<Day, RoundRecord>,
    #[serde(default)]
    pub eligibility: Eligibility,
}

impl CompetitorStanding {
    pub fn new(id: CompetitorId, handicap: HandicapProfile) -> Self {
        Self {
            id,
            handicap,
            rounds: BTreeMap::new(),
            eligibility: Eligibility::default(),
        }
    }

    pub fn round(&self, day: Day) -> Option<&RoundRecord> {
        self.rounds.get(&day)
    }

    /// Store a day's round, replacing any earlier submission for that day.
    pub fn record_round(&mut self, day: Day, round: RoundRecord) -> Option<RoundRecord> {
        self.rounds.insert(day, round)
    }

    pub fn days_played(&self) -> usize {
        self.rounds.len()
    }

    pub fn total_raw_score(&self) -> i32 {
        self.rounds.values().map(RoundRecord::total_raw_score).sum()
    }

    /// Stableford points across all played rounds, before handicap.
    pub fn total_points(&self) -> i32 {
        self.rounds.values().map(RoundRecord::points).sum()
    }

    /// Net points over played days; unplayed days contribute nothing.
    pub fn net_points(&self, handicap: u8) -> i32 {
        self.rounds.values().map(|r| r.net_points(handicap)).sum()
    }

    pub fn daily_net_points(&self, day: Day, handicap: u8) -> Option<i32> {
        self.round(day).map(|r| r.net_points(handicap))
    }

    pub fn competition_net_points(&self, competition: Competition) -> i32 {
        self.net_points(self.handicap.for_competition(competition))
    }

    /// Day net points in the Calcutta, which plays off the full handicap.
    pub fn calcutta_daily_points(&self, day: Day) -> Option<i32> {
        self.daily_net_points(day, self.handicap.secondary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{flat_course, standing};

    #[test]
    fn competitor_id_validation() {
        assert_eq!(CompetitorId::new("  Sam ").unwrap().as_str(), "Sam");
        assert!(CompetitorId::new("").is_err());
        assert!(CompetitorId::new("a/b").is_err());
        assert!(CompetitorId::new(&"x".repeat(65)).is_err());
    }

    #[test]
    fn eligibility_admits() {
        assert!(Eligibility::BothEligible.admits(Competition::Primary));
        assert!(Eligibility::BothEligible.admits(Competition::Secondary));
        assert!(Eligibility::PrimaryOnly.admits(Competition::Primary));
        assert!(!Eligibility::PrimaryOnly.admits(Competition::Secondary));
        assert!(!Eligibility::SecondaryOnly.admits(Competition::Primary));
    }

    #[test]
    fn unplayed_days_contribute_nothing() {
        let s = standing("Ann", 10, &[]);
        assert_eq!(s.days_played(), 0);
        assert_eq!(s.net_points(10), 0);
        assert_eq!(s.total_raw_score(), 0);
        assert_eq!(s.daily_net_points(Day::One, 10), None);
    }

    #[test]
    fn net_points_additive_over_days() {
        let mut day_two = vec![4; 18];
        day_two[0] = 3;
        day_two[1] = 6;
        let s = standing("Ann", 8, &[(Day::One, vec![5; 18]), (Day::Two, day_two)]);
        let sum: i32 = [Day::One, Day::Two]
            .iter()
            .filter_map(|&d| s.daily_net_points(d, 8))
            .sum();
        assert_eq!(s.net_points(8), sum);
        assert_eq!(s.daily_net_points(Day::One, 8), Some(18 - 28));
    }

    #[test]
    fn competition_handicaps_differ_above_twenty() {
        let s = standing("Big", 26, &[(Day::One, vec![5; 18])]);
        assert_eq!(s.competition_net_points(Competition::Primary), 18 - 16);
        assert_eq!(s.competition_net_points(Competition::Secondary), 18 - 10);
        assert_eq!(s.calcutta_daily_points(Day::One), Some(8));
    }

    #[test]
    fn replacing_a_round_returns_the_old_one() {
        let mut s = standing("Ann", 0, &[(Day::One, vec![4; 18])]);
        let replacement = RoundRecord::new(flat_course(), vec![5; 18]).unwrap();
        let old = s.record_round(Day::One, replacement).unwrap();
        assert_eq!(old.points(), 36);
        assert_eq!(s.days_played(), 1);
        assert_eq!(s.total_points(), 18);
    }
}
