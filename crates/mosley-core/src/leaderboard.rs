//! Leaderboard tables: one per competition, a daily dogfight and the
//! Calcutta. Data only; presentation is left to the consumer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::day::Day;
use crate::handicap::Competition;
use crate::round::point_target;
use crate::tournament::Tournament;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayResult {
    pub day: Day,
    pub points: i32,
    pub net_points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitionRow {
    pub position: usize,
    pub name: String,
    pub point_target: i32,
    pub days: Vec<DayResult>,
    pub total_net_points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitionBoard {
    pub competition: Competition,
    pub title: &'static str,
    pub rows: Vec<CompetitionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DogfightRow {
    pub position: usize,
    pub name: String,
    pub point_target: i32,
    pub points: i32,
    pub net_points: i32,
}

/// One day's standings across the whole field, off full handicaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DogfightBoard {
    pub day: Day,
    pub rows: Vec<DogfightRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalcuttaRow {
    pub position: usize,
    pub pair: String,
    pub days: BTreeMap<Day, i32>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub primary: CompetitionBoard,
    pub secondary: CompetitionBoard,
    pub calcutta: Vec<CalcuttaRow>,
    pub dogfights: Vec<DogfightBoard>,
}

pub fn competition_board(tournament: &Tournament, competition: Competition) -> CompetitionBoard {
    let rows = tournament
        .rank_field(competition)
        .into_iter()
        .enumerate()
        .map(|(i, standing)| {
            let handicap = standing.handicap.for_competition(competition);
            CompetitionRow {
                position: i + 1,
                name: standing.id.to_string(),
                point_target: point_target(handicap),
                days: standing
                    .rounds
                    .iter()
                    .map(|(&day, round)| DayResult {
                        day,
                        points: round.points(),
                        net_points: round.net_points(handicap),
                    })
                    .collect(),
                total_net_points: standing.net_points(handicap),
            }
        })
        .collect();
    CompetitionBoard {
        competition,
        title: competition.title(),
        rows,
    }
}

pub fn dogfight_board(tournament: &Tournament, day: Day) -> DogfightBoard {
    let rows = tournament
        .rank_day(day)
        .into_iter()
        .enumerate()
        .filter_map(|(i, standing)| {
            let handicap = standing.handicap.secondary();
            let round = standing.round(day)?;
            Some(DogfightRow {
                position: i + 1,
                name: standing.id.to_string(),
                point_target: point_target(handicap),
                points: round.points(),
                net_points: round.net_points(handicap),
            })
        })
        .collect();
    DogfightBoard { day, rows }
}

/// Pairs by total score, best first; ties keep draw order.
pub fn calcutta_board(tournament: &Tournament) -> Vec<CalcuttaRow> {
    let mut pairs: Vec<_> = tournament.pairs().iter().collect();
    pairs.sort_by_key(|pair| std::cmp::Reverse(pair.total_points()));
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, pair)| CalcuttaRow {
            position: i + 1,
            pair: pair.label(),
            days: pair.day_scores().clone(),
            total: pair.total_points(),
        })
        .collect()
}

/// Every board. Dogfights are only produced for days someone has played.
pub fn leaderboard(tournament: &Tournament) -> Leaderboard {
    let dogfights = Day::ALL
        .into_iter()
        .map(|day| dogfight_board(tournament, day))
        .filter(|board| !board.rows.is_empty())
        .collect();
    Leaderboard {
        primary: competition_board(tournament, Competition::Primary),
        secondary: competition_board(tournament, Competition::Secondary),
        calcutta: calcutta_board(tournament),
        dogfights,
    }
}
