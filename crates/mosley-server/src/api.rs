use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use mosley_core::ScoringError;
use mosley_core::calcutta::CalcuttaPair;
use mosley_core::collaborators::{CourseLookup, PresetArbiter};
use mosley_core::course::{Course, CourseSpec};
use mosley_core::day::Day;
use mosley_core::handicap::Competition;
use mosley_core::leaderboard::{self, CompetitionBoard, DogfightBoard, Leaderboard};
use mosley_core::round::RoundRecord;
use mosley_core::stableford::parse_score_card;
use mosley_core::standing::{CompetitorId, CompetitorStanding, Eligibility};
use mosley_core::tournament::{DayReport, Entry, PAIRING_DAY, SPLIT_DAY};

use crate::error::AppError;
use crate::state::AppState;

/// A competitor's standing as reported by the API.
#[derive(Debug, Serialize)]
pub struct StandingSummary {
    pub name: String,
    pub primary_handicap: u8,
    pub secondary_handicap: u8,
    pub eligibility: Eligibility,
    pub days_played: usize,
    pub total_raw_score: i32,
    pub primary_net_points: i32,
    pub secondary_net_points: i32,
}

impl From<&CompetitorStanding> for StandingSummary {
    fn from(s: &CompetitorStanding) -> Self {
        Self {
            name: s.id.to_string(),
            primary_handicap: s.handicap.primary(),
            secondary_handicap: s.handicap.secondary(),
            eligibility: s.eligibility,
            days_played: s.days_played(),
            total_raw_score: s.total_raw_score(),
            primary_net_points: s.competition_net_points(Competition::Primary),
            secondary_net_points: s.competition_net_points(Competition::Secondary),
        }
    }
}

fn competitor(name: &str) -> Result<CompetitorId, AppError> {
    Ok(CompetitorId::new(name)?)
}

/// GET /api/v1/courses
pub async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    let keeper = state.scorekeeper.read().await;
    Json(keeper.courses.courses().cloned().collect())
}

/// POST /api/v1/courses: add or replace a course.
pub async fn add_course(
    State(state): State<AppState>,
    Json(spec): Json<CourseSpec>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = Course::try_from(spec)?;
    state
        .scorekeeper
        .write()
        .await
        .add_course(course.clone())?;
    tracing::info!(course = course.name(), "Course added");
    Ok((StatusCode::CREATED, Json(course)))
}

#[derive(Debug, Deserialize)]
pub struct EnterBody {
    pub name: String,
    pub handicap: i64,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub entry: Entry,
    pub standing: StandingSummary,
}

/// POST /api/v1/competitors: enter a competitor or update their handicap.
pub async fn enter_competitor(
    State(state): State<AppState>,
    Json(body): Json<EnterBody>,
) -> Result<(StatusCode, Json<EntryResponse>), AppError> {
    let id = competitor(&body.name)?;
    let mut keeper = state.scorekeeper.write().await;
    let response = keeper.update(|t, _| {
        let entry = t.enter(id.clone(), body.handicap)?;
        let standing = t
            .standing(&id)
            .map(StandingSummary::from)
            .ok_or_else(|| ScoringError::UnknownCompetitor(id.to_string()))?;
        Ok(EntryResponse { entry, standing })
    })?;
    let status = match response.entry {
        Entry::Added => StatusCode::CREATED,
        Entry::Unchanged | Entry::Reset => StatusCode::OK,
    };
    Ok((status, Json(response)))
}

/// DELETE /api/v1/competitors/{name}
pub async fn withdraw_competitor(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = competitor(&name)?;
    state
        .scorekeeper
        .write()
        .await
        .update(|t, _| t.withdraw(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// One hole on a submitted card: a number, or the text typed into the form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HoleEntry {
    Strokes(i64),
    Text(String),
}

impl HoleEntry {
    fn to_text(&self) -> String {
        match self {
            Self::Strokes(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoundBody {
    pub competitor: String,
    pub day: Day,
    /// Course name; omitting it is an error reported by the scorer.
    #[serde(default)]
    pub course: Option<String>,
    pub scores: Vec<HoleEntry>,
}

#[derive(Debug, Serialize)]
pub struct RoundResponse {
    pub day: Day,
    pub points: i32,
    pub standing: StandingSummary,
}

/// POST /api/v1/rounds: submit a competitor's card for a day.
pub async fn submit_round(
    State(state): State<AppState>,
    Json(body): Json<RoundBody>,
) -> Result<Json<RoundResponse>, AppError> {
    let id = competitor(&body.competitor)?;
    let entries: Vec<String> = body.scores.iter().map(HoleEntry::to_text).collect();
    let raw = parse_score_card(&entries)?;
    let day = body.day;

    let mut keeper = state.scorekeeper.write().await;
    let course = match &body.course {
        Some(name) => Some(
            keeper
                .courses
                .course(name)
                .map_err(|e| AppError::NotFound(e.to_string()))?,
        ),
        None => None,
    };
    let response = keeper.update(|t, _| {
        let standing = t.submit_round(&id, day, course.as_ref(), raw)?;
        Ok(RoundResponse {
            day,
            points: standing.round(day).map_or(0, RoundRecord::points),
            standing: StandingSummary::from(standing),
        })
    })?;
    Ok(Json(response))
}

/// GET /api/v1/standings/{competition}: `primary` or `secondary`.
pub async fn competition_standings(
    State(state): State<AppState>,
    Path(competition): Path<String>,
) -> Result<Json<CompetitionBoard>, AppError> {
    let competition: Competition = competition.parse()?;
    let keeper = state.scorekeeper.read().await;
    Ok(Json(leaderboard::competition_board(
        &keeper.tournament,
        competition,
    )))
}

/// GET /api/v1/days/{day}/standings: the day's dogfight.
pub async fn day_standings(
    State(state): State<AppState>,
    Path(day): Path<u8>,
) -> Result<Json<DogfightBoard>, AppError> {
    let day = Day::from_number(day)?;
    let keeper = state.scorekeeper.read().await;
    Ok(Json(leaderboard::dogfight_board(&keeper.tournament, day)))
}

#[derive(Debug, Serialize)]
pub struct SplitCandidate {
    pub position: usize,
    pub name: String,
    pub net_points: i32,
    pub total_raw_score: i32,
}

/// GET /api/v1/split/candidates: the ranked list a cutline is chosen from.
pub async fn split_candidates(State(state): State<AppState>) -> Json<Vec<SplitCandidate>> {
    let keeper = state.scorekeeper.read().await;
    let candidates = keeper
        .tournament
        .split_candidates()
        .into_iter()
        .enumerate()
        .map(|(i, s)| SplitCandidate {
            position: i + 1,
            name: s.id.to_string(),
            net_points: s.competition_net_points(Competition::Primary),
            total_raw_score: s.total_raw_score(),
        })
        .collect();
    Json(candidates)
}

#[derive(Debug, Deserialize)]
pub struct SplitBody {
    pub cutline: i32,
}

#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub cutline: i32,
    pub made_cut: usize,
    pub field: usize,
}

/// POST /api/v1/split
pub async fn apply_split(
    State(state): State<AppState>,
    Json(body): Json<SplitBody>,
) -> Result<Json<SplitResponse>, AppError> {
    let mut keeper = state.scorekeeper.write().await;
    let response = keeper.update(|t, _| {
        let made_cut = t.apply_split(body.cutline)?;
        Ok(SplitResponse {
            cutline: body.cutline,
            made_cut,
            field: t.len(),
        })
    })?;
    Ok(Json(response))
}

/// GET /api/v1/pairs
pub async fn list_pairs(State(state): State<AppState>) -> Json<Vec<CalcuttaPair>> {
    let keeper = state.scorekeeper.read().await;
    Json(keeper.tournament.pairs().to_vec())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PairsBody {
    pub doubled: Option<String>,
}

/// POST /api/v1/pairs: draw the Calcutta pairs from the opening day.
pub async fn generate_pairs(
    State(state): State<AppState>,
    Json(body): Json<PairsBody>,
) -> Result<(StatusCode, Json<Vec<CalcuttaPair>>), AppError> {
    let doubled = body.doubled.as_deref().map(competitor).transpose()?;
    let mut keeper = state.scorekeeper.write().await;
    let pairs = keeper.update(|t, _| Ok(t.generate_pairs(doubled.as_ref())?.to_vec()))?;
    Ok((StatusCode::CREATED, Json(pairs)))
}

#[derive(Debug, Deserialize)]
pub struct PairScoreBody {
    pub first: String,
    pub second: String,
    pub day: Day,
}

#[derive(Debug, Serialize)]
pub struct PairScoreResponse {
    pub day: Day,
    pub score: i32,
    pub pair: CalcuttaPair,
}

/// POST /api/v1/pairs/score: recompute one pair's score for a day.
pub async fn score_pair(
    State(state): State<AppState>,
    Json(body): Json<PairScoreBody>,
) -> Result<Json<PairScoreResponse>, AppError> {
    let first = competitor(&body.first)?;
    let second = competitor(&body.second)?;
    let day = body.day;
    let mut keeper = state.scorekeeper.write().await;
    let response = keeper.update(|t, _| {
        let score = t.update_pair_score(&first, &second, day)?;
        let pair = t
            .pairs()
            .iter()
            .find(|p| p.is(&first, &second))
            .cloned()
            .ok_or_else(|| {
                ScoringError::InvalidPairing(format!("{first} and {second} are not a pair"))
            })?;
        Ok(PairScoreResponse { day, score, pair })
    })?;
    Ok(Json(response))
}

/// Decisions the arbiter made for a day's completion.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompleteDayBody {
    pub cutline: Option<i32>,
    pub doubled: Option<String>,
}

/// POST /api/v1/days/{day}/complete: run the end-of-day workflow.
pub async fn complete_day(
    State(state): State<AppState>,
    Path(day): Path<u8>,
    Json(body): Json<CompleteDayBody>,
) -> Result<Json<DayReport>, AppError> {
    let day = Day::from_number(day)?;
    let doubled = body.doubled.as_deref().map(competitor).transpose()?;
    let mut keeper = state.scorekeeper.write().await;

    if day == SPLIT_DAY && body.cutline.is_none() {
        return Err(AppError::BadRequest(format!("completing {day} needs a cutline")));
    }
    if day == PAIRING_DAY
        && doubled.is_none()
        && keeper.tournament.rank_day(day).len() % 2 == 1
    {
        return Err(AppError::BadRequest(
            "an odd field needs a doubled competitor".to_string(),
        ));
    }

    let mut arbiter = PresetArbiter {
        cutline: body.cutline,
        doubled,
    };
    let report = keeper.update(|t, _| t.complete_day(day, &mut arbiter))?;
    Ok(Json(report))
}

/// GET /api/v1/leaderboard
pub async fn get_leaderboard(State(state): State<AppState>) -> Json<Leaderboard> {
    let keeper = state.scorekeeper.read().await;
    Json(leaderboard::leaderboard(&keeper.tournament))
}
