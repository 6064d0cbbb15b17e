use crate::day::Day;
use crate::handicap::Competition;
use crate::standing::CompetitorStanding;

/// Order standings for a competition: net points descending, then total raw
/// score descending. Full ties keep their input order.
///
/// Eligibility is not consulted here; callers filter first if they need to.
pub fn rank_by_competition<'a, I>(
    standings: I,
    competition: Competition,
) -> Vec<&'a CompetitorStanding>
where
    I: IntoIterator<Item = &'a CompetitorStanding>,
{
    let mut ranked: Vec<&CompetitorStanding> = standings.into_iter().collect();
    // sort_by_key is stable
    ranked.sort_by_key(|s| {
        std::cmp::Reverse((s.competition_net_points(competition), s.total_raw_score()))
    });
    ranked
}

/// Order the competitors who played `day` by that day's Calcutta net points
/// descending, then that day's raw Stableford points descending.
pub fn rank_by_day<'a, I>(standings: I, day: Day) -> Vec<&'a CompetitorStanding>
where
    I: IntoIterator<Item = &'a CompetitorStanding>,
{
    let mut ranked: Vec<(&CompetitorStanding, (i32, i32))> = standings
        .into_iter()
        .filter_map(|s| {
            let round = s.round(day)?;
            let net = round.net_points(s.handicap.secondary());
            Some((s, (net, round.points())))
        })
        .collect();
    ranked.sort_by_key(|&(_, key)| std::cmp::Reverse(key));
    ranked.into_iter().map(|(s, _)| s).collect()
}
