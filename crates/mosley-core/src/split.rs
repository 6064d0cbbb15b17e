use crate::handicap::Competition;
use crate::ranking::rank_by_competition;
use crate::standing::{CompetitorStanding, Eligibility};

/// Days that must be complete before the field is split.
pub const SPLIT_AFTER_DAYS: usize = 2;

/// The list shown to the arbiter choosing a cutline: competitors with both
/// opening rounds in, ranked by primary-competition net points.
pub fn split_candidates<'a, I>(standings: I) -> Vec<&'a CompetitorStanding>
where
    I: IntoIterator<Item = &'a CompetitorStanding>,
{
    let finished = standings
        .into_iter()
        .filter(|s| s.days_played() == SPLIT_AFTER_DAYS);
    rank_by_competition(finished, Competition::Primary)
}

/// Eligibility a standing receives at `cutline`: at or above the line plays
/// the primary competition only, everyone else the secondary.
pub fn eligibility_at(standing: &CompetitorStanding, cutline: i32) -> Eligibility {
    if standing.competition_net_points(Competition::Primary) >= cutline {
        Eligibility::PrimaryOnly
    } else {
        Eligibility::SecondaryOnly
    }
}

/// Assign every standing its side of the cutline. Returns how many made the
/// primary cut.
pub fn apply_cutline<'a, I>(standings: I, cutline: i32) -> usize
where
    I: IntoIterator<Item = &'a mut CompetitorStanding>,
{
    let mut made_cut = 0;
    for standing in standings {
        standing.eligibility = eligibility_at(standing, cutline);
        if standing.eligibility == Eligibility::PrimaryOnly {
            made_cut += 1;
        }
    }
    made_cut
}
