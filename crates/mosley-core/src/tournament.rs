//! The tournament: the set of standings, the Calcutta pairs and the split.
//!
//! Every mutating operation either succeeds completely or leaves the
//! tournament untouched. Persisting the result is a separate step the caller
//! takes afterwards ([`Tournament::save_to`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calcutta::{CalcuttaPair, score_pair_day};
use crate::collaborators::{Arbiter, StandingsStore};
use crate::course::Course;
use crate::day::Day;
use crate::error::ScoringError;
use crate::handicap::{Competition, HandicapProfile};
use crate::pairing::snake_pairs;
use crate::ranking::{rank_by_competition, rank_by_day};
use crate::round::RoundRecord;
use crate::split::{apply_cutline, split_candidates};
use crate::standing::{CompetitorId, CompetitorStanding};

/// Day whose results seed the Calcutta pairs.
pub const PAIRING_DAY: Day = Day::One;

/// Day after which the field is split.
pub const SPLIT_DAY: Day = Day::Two;

/// What [`Tournament::enter`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Added,
    Unchanged,
    /// The handicap changed, so earlier rounds were discarded.
    Reset,
}

/// Summary of a completed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: Day,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs_generated: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub made_cut: Option<usize>,
    pub pairs_scored: usize,
}

/// Plain-data form of a tournament.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub standings: Vec<CompetitorStanding>,
    #[serde(default)]
    pub pairs: Vec<CalcuttaPair>,
    #[serde(default)]
    pub cutline: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tournament {
    field: BTreeMap<CompetitorId, CompetitorStanding>,
    pairs: Vec<CalcuttaPair>,
    cutline: Option<i32>,
}

fn unknown(id: &CompetitorId) -> ScoringError {
    ScoringError::UnknownCompetitor(id.to_string())
}

impl Tournament {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn standing(&self, id: &CompetitorId) -> Option<&CompetitorStanding> {
        self.field.get(id)
    }

    /// Standings in name order.
    pub fn standings(&self) -> impl Iterator<Item = &CompetitorStanding> {
        self.field.values()
    }

    pub fn pairs(&self) -> &[CalcuttaPair] {
        &self.pairs
    }

    /// The cutline, once the field has been split.
    pub fn cutline(&self) -> Option<i32> {
        self.cutline
    }

    /// Enter a competitor, or update their handicap. A changed handicap
    /// discards the competitor's rounds and eligibility.
    ///
    /// Once the field is split, only unchanged re-entries are accepted.
    pub fn enter(&mut self, id: CompetitorId, handicap: i64) -> Result<Entry, ScoringError> {
        let profile = HandicapProfile::new(handicap)?;
        let unchanged = self
            .field
            .get(&id)
            .is_some_and(|existing| existing.handicap == profile);
        if unchanged {
            return Ok(Entry::Unchanged);
        }
        if let Some(cutline) = self.cutline {
            tracing::warn!(competitor = %id, handicap, cutline, "Entry refused after split");
            return Err(ScoringError::SplitAlreadyApplied { cutline });
        }
        match self.field.get_mut(&id) {
            Some(existing) => {
                tracing::info!(
                    competitor = %id,
                    handicap,
                    rounds_dropped = existing.days_played(),
                    "Handicap changed, standing reset"
                );
                *existing = CompetitorStanding::new(id, profile);
                Ok(Entry::Reset)
            }
            None => {
                tracing::info!(competitor = %id, handicap, "Competitor entered");
                self.field
                    .insert(id.clone(), CompetitorStanding::new(id, profile));
                Ok(Entry::Added)
            }
        }
    }

    /// Remove a competitor along with any Calcutta pair they belong to.
    pub fn withdraw(&mut self, id: &CompetitorId) -> Result<CompetitorStanding, ScoringError> {
        let standing = self.field.remove(id).ok_or_else(|| unknown(id))?;
        let before = self.pairs.len();
        self.pairs.retain(|pair| !pair.contains(id));
        tracing::info!(
            competitor = %id,
            pairs_dropped = before - self.pairs.len(),
            "Competitor withdrawn"
        );
        Ok(standing)
    }

    /// Score and store a competitor's round for `day`, replacing any earlier
    /// round for that day.
    pub fn submit_round(
        &mut self,
        id: &CompetitorId,
        day: Day,
        course: Option<&Course>,
        raw_scores: Vec<i32>,
    ) -> Result<&CompetitorStanding, ScoringError> {
        let course = course.ok_or(ScoringError::MissingCourseSelection)?;
        let standing = self.field.get_mut(id).ok_or_else(|| unknown(id))?;
        let round = RoundRecord::new(course.clone(), raw_scores).inspect_err(|e| {
            tracing::warn!(competitor = %id, %day, error = %e, "Round rejected");
        })?;
        let points = round.points();
        if standing.record_round(day, round).is_some() {
            tracing::debug!(competitor = %id, %day, "Replaced earlier round");
        }
        tracing::info!(
            competitor = %id,
            %day,
            course = course.name(),
            points,
            "Round recorded"
        );
        Ok(standing)
    }

    /// Competitors still in `competition`, best first.
    pub fn rank_field(&self, competition: Competition) -> Vec<&CompetitorStanding> {
        let eligible = self
            .field
            .values()
            .filter(|s| s.eligibility.admits(competition));
        rank_by_competition(eligible, competition)
    }

    /// Competitors who played `day`, best first by Calcutta daily points.
    pub fn rank_day(&self, day: Day) -> Vec<&CompetitorStanding> {
        rank_by_day(self.field.values(), day)
    }

    pub fn split_candidates(&self) -> Vec<&CompetitorStanding> {
        split_candidates(self.field.values())
    }

    /// Split the field at `cutline`. Returns how many made the primary cut.
    ///
    /// Applying the same cutline again changes nothing; a different one is
    /// refused.
    pub fn apply_split(&mut self, cutline: i32) -> Result<usize, ScoringError> {
        if let Some(applied) = self.cutline
            && applied != cutline
        {
            tracing::warn!(applied, requested = cutline, "Split already applied");
            return Err(ScoringError::SplitAlreadyApplied { cutline: applied });
        }
        let made_cut = apply_cutline(self.field.values_mut(), cutline);
        self.cutline = Some(cutline);
        tracing::info!(cutline, made_cut, field = self.field.len(), "Field split");
        Ok(made_cut)
    }

    /// Replace the Calcutta pairs with a fresh snake pairing of the opening
    /// day's ranking.
    pub fn generate_pairs(
        &mut self,
        doubled: Option<&CompetitorId>,
    ) -> Result<&[CalcuttaPair], ScoringError> {
        let ranked: Vec<CompetitorId> = self
            .rank_day(PAIRING_DAY)
            .into_iter()
            .map(|s| s.id.clone())
            .collect();
        self.pairs = snake_pairs(&ranked, doubled)?;
        Ok(&self.pairs)
    }

    /// Recompute one pair's score for `day`.
    pub fn update_pair_score(
        &mut self,
        a: &CompetitorId,
        b: &CompetitorId,
        day: Day,
    ) -> Result<i32, ScoringError> {
        let index = self
            .pairs
            .iter()
            .position(|pair| pair.is(a, b))
            .ok_or_else(|| {
                ScoringError::InvalidPairing(format!("{a} and {b} are not a Calcutta pair"))
            })?;
        let score = self.score_pair(&self.pairs[index], day)?;
        self.pairs[index].set_day_score(day, score);
        Ok(score)
    }

    /// Recompute every pair's score for `day`. Returns how many were scored.
    pub fn update_pair_scores(&mut self, day: Day) -> Result<usize, ScoringError> {
        let scores = self
            .pairs
            .iter()
            .map(|pair| self.score_pair(pair, day))
            .collect::<Result<Vec<_>, _>>()?;
        for (pair, score) in self.pairs.iter_mut().zip(scores) {
            pair.set_day_score(day, score);
        }
        Ok(self.pairs.len())
    }

    fn score_pair(&self, pair: &CalcuttaPair, day: Day) -> Result<i32, ScoringError> {
        let first = self.standing(pair.first()).ok_or_else(|| unknown(pair.first()))?;
        let second = self
            .standing(pair.second())
            .ok_or_else(|| unknown(pair.second()))?;
        score_pair_day(pair, first, second, day)
    }

    /// Run the end-of-day workflow once `day`'s rounds are in.
    ///
    /// After the pairing day the Calcutta pairs are drawn, asking the arbiter
    /// for a doubled competitor when the field is odd. After the split day the
    /// arbiter picks a cutline from the split candidates. Every day rescores
    /// all pairs. Nothing changes unless every step succeeds.
    pub fn complete_day(
        &mut self,
        day: Day,
        arbiter: &mut dyn Arbiter,
    ) -> Result<DayReport, ScoringError> {
        let mut next = self.clone();
        let report = next.run_day(day, arbiter).inspect_err(|e| {
            tracing::warn!(%day, error = %e, "Day completion failed, nothing changed");
        })?;
        *self = next;
        tracing::info!(
            %day,
            pairs_generated = ?report.pairs_generated,
            made_cut = ?report.made_cut,
            pairs_scored = report.pairs_scored,
            "Day completed"
        );
        Ok(report)
    }

    fn run_day(&mut self, day: Day, arbiter: &mut dyn Arbiter) -> Result<DayReport, ScoringError> {
        let mut report = DayReport {
            day,
            pairs_generated: None,
            made_cut: None,
            pairs_scored: 0,
        };

        if day == PAIRING_DAY {
            let ranked = self.rank_day(day);
            let doubled = if ranked.len() % 2 == 1 {
                Some(arbiter.doubled_competitor(&ranked)?)
            } else {
                None
            };
            report.pairs_generated = Some(self.generate_pairs(doubled.as_ref())?.len());
        }

        if day == SPLIT_DAY {
            let cutline = arbiter.cutline(&self.split_candidates())?;
            report.made_cut = Some(self.apply_split(cutline)?);
        }

        report.pairs_scored = self.update_pair_scores(day)?;
        Ok(report)
    }

    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            standings: self.field.values().cloned().collect(),
            pairs: self.pairs.clone(),
            cutline: self.cutline,
        }
    }

    /// Rebuild a tournament from a snapshot, checking that names are unique
    /// and that every pair member is in the field.
    pub fn restore(snapshot: TournamentSnapshot) -> Result<Self, ScoringError> {
        let mut field = BTreeMap::new();
        for standing in snapshot.standings {
            let id = standing.id.clone();
            if field.insert(id.clone(), standing).is_some() {
                return Err(ScoringError::InvalidCompetitor(format!(
                    "{id} appears more than once"
                )));
            }
        }
        for pair in &snapshot.pairs {
            for member in [pair.first(), pair.second()] {
                if !field.contains_key(member) {
                    return Err(unknown(member));
                }
            }
        }
        Ok(Self {
            field,
            pairs: snapshot.pairs,
            cutline: snapshot.cutline,
        })
    }

    /// Write every standing, pair and the cutline to `store`, removing
    /// standings the store holds for competitors no longer entered.
    pub fn save_to<S>(&self, store: &mut S) -> Result<(), ScoringError>
    where
        S: StandingsStore + ?Sized,
    {
        for stored in store.list_standings()? {
            if !self.field.contains_key(&stored.id) {
                store.delete_standing(&stored.id)?;
            }
        }
        for standing in self.field.values() {
            store.save_standing(standing)?;
        }
        store.clear_pairs()?;
        for pair in &self.pairs {
            store.save_pair(pair)?;
        }
        store.save_cutline(self.cutline)?;
        tracing::debug!(
            standings = self.field.len(),
            pairs = self.pairs.len(),
            "Tournament saved"
        );
        Ok(())
    }

    pub fn load_from<S>(store: &S) -> Result<Self, ScoringError>
    where
        S: StandingsStore + ?Sized,
    {
        let tournament = Self::restore(TournamentSnapshot {
            standings: store.list_standings()?,
            pairs: store.list_pairs()?,
            cutline: store.load_cutline()?,
        })?;
        tracing::info!(
            standings = tournament.len(),
            pairs = tournament.pairs.len(),
            "Tournament loaded"
        );
        Ok(tournament)
    }
}
