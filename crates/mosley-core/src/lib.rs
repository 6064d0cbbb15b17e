pub mod calcutta;
pub mod collaborators;
pub mod course;
pub mod day;
pub mod error;
pub mod handicap;
pub mod leaderboard;
pub mod pairing;
pub mod ranking;
pub mod round;
pub mod split;
pub mod stableford;
pub mod standing;
pub mod tournament;

pub use error::ScoringError;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::course::Course;
    use crate::day::Day;
    use crate::handicap::HandicapProfile;
    use crate::round::RoundRecord;
    use crate::standing::{CompetitorId, CompetitorStanding};

    /// Par 4 on every hole, hole `n` ranked `n` for difficulty.
    pub fn flat_course() -> Course {
        let difficulty: Vec<u8> = (1..=18).collect();
        Course::new("Flat Meadows", &[4; 18], &difficulty).expect("flat course is well formed")
    }

    pub fn id(name: &str) -> CompetitorId {
        CompetitorId::new(name).expect("valid competitor name")
    }

    /// Build a standing with the given rounds, all played on [`flat_course`].
    pub fn standing(name: &str, handicap: i64, rounds: &[(Day, Vec<i32>)]) -> CompetitorStanding {
        let profile = HandicapProfile::new(handicap).expect("valid handicap");
        let mut standing = CompetitorStanding::new(id(name), profile);
        for (day, raw) in rounds {
            let round = RoundRecord::new(flat_course(), raw.clone()).expect("valid round");
            standing.record_round(*day, round);
        }
        standing
    }
}
