use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::course::COURSE_LENGTH;
use crate::day::Day;
use crate::error::ScoringError;
use crate::round::RoundRecord;
use crate::standing::{CompetitorId, CompetitorStanding};

/// Points a team earns on a hole it plays to net par.
const NET_PAR_HOLE_POINTS: i32 = 2;

/// Team points for a round of net pars.
const NET_PAR_ROUND_POINTS: i32 = NET_PAR_HOLE_POINTS * COURSE_LENGTH as i32;

/// Adjusted score a hole is capped at after stroke allocation.
const ADJUSTED_HOLE_CAP: i32 = 2;

/// One member's contribution to a best-ball day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcuttaCard {
    /// Net-of-dots score per hole, with triple bogeys capped at double.
    pub holes: [i32; COURSE_LENGTH],
    /// Under-par strokes credited minus gross triple bogeys.
    pub modifier: i32,
}

/// Build a member's card from raw scores, par and their stroke allocation.
pub fn member_card(raw: &[i32], par: &[u8], dots: &[u8]) -> Result<CalcuttaCard, ScoringError> {
    if raw.len() != COURSE_LENGTH || par.len() != COURSE_LENGTH || dots.len() != COURSE_LENGTH {
        return Err(ScoringError::InvalidScoreInput(format!(
            "Calcutta card needs {COURSE_LENGTH} scores, pars and dots"
        )));
    }

    let mut net = [0; COURSE_LENGTH];
    for (hole, n) in net.iter_mut().enumerate() {
        let strokes = raw[hole];
        if strokes <= 0 {
            return Err(ScoringError::InvalidScoreInput(format!(
                "invalid score of {strokes} on hole {}",
                hole + 1
            )));
        }
        *n = strokes - i32::from(par[hole]);
    }
    let mut hole_dots = [0; COURSE_LENGTH];
    hole_dots.copy_from_slice(dots);
    Ok(card_from_net(&net, &hole_dots))
}

/// A member's card for a stored round, using the given handicap's dots.
pub fn round_card(round: &RoundRecord, handicap: u8) -> CalcuttaCard {
    card_from_net(&round.net_scores(), &round.dots(handicap))
}

fn card_from_net(net: &[i32; COURSE_LENGTH], dots: &[u8; COURSE_LENGTH]) -> CalcuttaCard {
    // bonus and deductions are taken from the gross net, before dots
    let bonus: i32 = net.iter().filter(|&&n| n < 0).map(|&n| -n).sum();
    let deductions = net.iter().filter(|&&n| n == 3).count() as i32;

    let mut holes = [0; COURSE_LENGTH];
    for ((hole, &n), &d) in holes.iter_mut().zip(net).zip(dots) {
        let adjusted = n - i32::from(d);
        *hole = if adjusted == 3 {
            ADJUSTED_HOLE_CAP
        } else {
            adjusted
        };
    }

    CalcuttaCard {
        holes,
        modifier: bonus - deductions,
    }
}

/// Best-ball score for a pair's day: the better adjusted score on each hole
/// earns `2 - score` points, both modifiers are added and the net-par
/// baseline of 36 removed.
pub fn pair_day_score(first: &CalcuttaCard, second: &CalcuttaCard) -> i32 {
    let points: i32 = first
        .holes
        .iter()
        .zip(&second.holes)
        .map(|(&a, &b)| NET_PAR_HOLE_POINTS - a.min(b))
        .sum();
    points + first.modifier + second.modifier - NET_PAR_ROUND_POINTS
}

/// Two competitors playing the Calcutta together, stored in name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcuttaPair {
    first: CompetitorId,
    second: CompetitorId,
    #[serde(default)]
    days: BTreeMap<Day, i32>,
}

impl CalcuttaPair {
    pub fn new(a: CompetitorId, b: CompetitorId) -> Result<Self, ScoringError> {
        if a == b {
            return Err(ScoringError::InvalidPairing(format!(
                "{a} cannot be paired with themselves"
            )));
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Ok(Self {
            first,
            second,
            days: BTreeMap::new(),
        })
    }

    pub fn first(&self) -> &CompetitorId {
        &self.first
    }

    pub fn second(&self) -> &CompetitorId {
        &self.second
    }

    pub fn contains(&self, id: &CompetitorId) -> bool {
        &self.first == id || &self.second == id
    }

    /// True when this pair is made of exactly `a` and `b`, in either order.
    pub fn is(&self, a: &CompetitorId, b: &CompetitorId) -> bool {
        (&self.first == a && &self.second == b) || (&self.first == b && &self.second == a)
    }

    /// Display label, e.g. "Ann and Bob".
    pub fn label(&self) -> String {
        format!("{} and {}", self.first, self.second)
    }

    pub fn day_score(&self, day: Day) -> Option<i32> {
        self.days.get(&day).copied()
    }

    pub fn day_scores(&self) -> &BTreeMap<Day, i32> {
        &self.days
    }

    pub fn set_day_score(&mut self, day: Day, score: i32) {
        self.days.insert(day, score);
    }

    /// Sum over scored days.
    pub fn total_points(&self) -> i32 {
        self.days.values().sum()
    }
}

/// Compute a pair's score for `day` from its members' standings. Each member
/// plays off their secondary-competition handicap.
pub fn score_pair_day(
    pair: &CalcuttaPair,
    first: &CompetitorStanding,
    second: &CompetitorStanding,
    day: Day,
) -> Result<i32, ScoringError> {
    let incomplete = || ScoringError::IncompletePairData {
        pair: pair.label(),
        day,
    };
    let first_round = first.round(day).ok_or_else(incomplete)?;
    let second_round = second.round(day).ok_or_else(incomplete)?;

    let first_card = round_card(first_round, first.handicap.secondary());
    let second_card = round_card(second_round, second.handicap.secondary());
    let score = pair_day_score(&first_card, &second_card);
    tracing::debug!(pair = %pair.label(), %day, score, "Calcutta pair scored");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{flat_course, id, standing};

    const PAR: [u8; 18] = [4; 18];

    #[test]
    fn adjusted_triple_is_capped() {
        // net 4 (quad) with one dot adjusts to 3 and is recorded as 2
        let mut raw = [4; 18];
        raw[0] = 8;
        let mut dots = [0; 18];
        dots[0] = 1;
        let card = member_card(&raw, &PAR, &dots).unwrap();
        assert_eq!(card.holes[0], 2);
    }

    #[test]
    fn gross_triple_is_deducted_and_capped() {
        let mut raw = [4; 18];
        raw[3] = 7;
        let card = member_card(&raw, &PAR, &[0; 18]).unwrap();
        assert_eq!(card.holes[3], 2);
        assert_eq!(card.modifier, -1);
    }

    #[test]
    fn non_positive_strokes_rejected() {
        let mut raw = [4; 18];
        raw[5] = i32::MIN;
        let err = member_card(&raw, &PAR, &[0; 18]).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidScoreInput(format!("invalid score of {} on hole 6", i32::MIN))
        );
        raw[5] = 0;
        assert!(member_card(&raw, &PAR, &[0; 18]).is_err());
    }

    #[test]
    fn under_par_strokes_are_bonus() {
        let mut raw = [4; 18];
        raw[0] = 3;
        raw[1] = 2;
        let mut dots = [0; 18];
        dots[1] = 1;
        let card = member_card(&raw, &PAR, &dots).unwrap();
        assert_eq!(card.modifier, 3);
        assert_eq!(card.holes[0], -1);
        assert_eq!(card.holes[1], -3);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(member_card(&[4; 17], &PAR, &[0; 18]).is_err());
    }

    #[test]
    fn round_card_matches_member_card() {
        let mut raw = vec![5; 18];
        raw[2] = 3;
        raw[7] = 7;
        let round = RoundRecord::new(flat_course(), raw.clone()).unwrap();
        let dots = round.dots(22);
        assert_eq!(
            round_card(&round, 22),
            member_card(&raw, &PAR, &dots).unwrap()
        );
    }

    #[test]
    fn par_pair_scores_zero() {
        let card = member_card(&[4; 18], &PAR, &[0; 18]).unwrap();
        assert_eq!(pair_day_score(&card, &card), 0);
    }

    #[test]
    fn best_ball_takes_lower_hole() {
        let mut a_raw = [4; 18];
        a_raw[0] = 3;
        let mut b_raw = [4; 18];
        b_raw[1] = 3;
        b_raw[2] = 6;
        let a = member_card(&a_raw, &PAR, &[0; 18]).unwrap();
        let b = member_card(&b_raw, &PAR, &[0; 18]).unwrap();
        // holes: 3 + 3 + 2*16 = 38; modifiers 1 + 1; minus 36
        assert_eq!(pair_day_score(&a, &b), 4);
        assert_eq!(pair_day_score(&b, &a), 4);
    }

    #[test]
    fn pair_is_canonical_and_distinct() {
        let pair = CalcuttaPair::new(id("Zed"), id("Amy")).unwrap();
        assert_eq!(pair.first().as_str(), "Amy");
        assert_eq!(pair.label(), "Amy and Zed");
        assert!(pair.is(&id("Zed"), &id("Amy")));
        assert_eq!(pair, CalcuttaPair::new(id("Amy"), id("Zed")).unwrap());
        assert!(matches!(
            CalcuttaPair::new(id("Amy"), id("Amy")),
            Err(ScoringError::InvalidPairing(_))
        ));
    }

    #[test]
    fn pair_total_sums_days() {
        let mut pair = CalcuttaPair::new(id("A"), id("B")).unwrap();
        pair.set_day_score(Day::One, 4);
        pair.set_day_score(Day::Three, -2);
        assert_eq!(pair.total_points(), 2);
        assert_eq!(pair.day_score(Day::Two), None);
    }

    #[test]
    fn scoring_requires_both_rounds() {
        let a = standing("A", 10, &[(Day::One, vec![5; 18])]);
        let b = standing("B", 10, &[(Day::Two, vec![5; 18])]);
        let pair = CalcuttaPair::new(a.id.clone(), b.id.clone()).unwrap();
        assert_eq!(
            score_pair_day(&pair, &a, &b, Day::One),
            Err(ScoringError::IncompletePairData {
                pair: "A and B".to_string(),
                day: Day::One,
            })
        );
    }

    #[test]
    fn handicapped_pair_scores() {
        // Two 18 handicaps shooting bogey golf play to net par.
        let a = standing("A", 18, &[(Day::One, vec![5; 18])]);
        let b = standing("B", 18, &[(Day::One, vec![5; 18])]);
        let pair = CalcuttaPair::new(a.id.clone(), b.id.clone()).unwrap();
        assert_eq!(score_pair_day(&pair, &a, &b, Day::One), Ok(0));
    }
}
