//! Boundaries to the outside world: course lookup, entity persistence and
//! the human decisions the scoring flow needs.
//!
//! Failures reported through these traits surface as
//! [`ScoringError::ExternalFailure`] and are never retried by the engine.

use std::collections::BTreeMap;

use crate::calcutta::CalcuttaPair;
use crate::course::{Course, CourseLibrary};
use crate::error::ScoringError;
use crate::standing::{CompetitorId, CompetitorStanding};

/// Resolve a course by name.
pub trait CourseLookup {
    fn course(&self, name: &str) -> Result<Course, ScoringError>;
}

impl CourseLookup for CourseLibrary {
    fn course(&self, name: &str) -> Result<Course, ScoringError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ScoringError::InvalidCourseData(format!("course {name:?} not found")))
    }
}

/// Persistent home for standings and Calcutta pairs.
pub trait StandingsStore {
    fn load_standing(&self, id: &CompetitorId) -> Result<Option<CompetitorStanding>, ScoringError>;
    fn save_standing(&mut self, standing: &CompetitorStanding) -> Result<(), ScoringError>;
    fn delete_standing(&mut self, id: &CompetitorId) -> Result<(), ScoringError>;
    fn list_standings(&self) -> Result<Vec<CompetitorStanding>, ScoringError>;

    fn save_pair(&mut self, pair: &CalcuttaPair) -> Result<(), ScoringError>;
    fn list_pairs(&self) -> Result<Vec<CalcuttaPair>, ScoringError>;
    /// Remove every stored pair, used when the field is re-paired.
    fn clear_pairs(&mut self) -> Result<(), ScoringError>;

    fn load_cutline(&self) -> Result<Option<i32>, ScoringError>;
    fn save_cutline(&mut self, cutline: Option<i32>) -> Result<(), ScoringError>;
}

/// The arbiter who makes the tournament's judgement calls.
pub trait Arbiter {
    /// Pick the primary-competition cutline after viewing the ranked field.
    fn cutline(&mut self, ranked: &[&CompetitorStanding]) -> Result<i32, ScoringError>;

    /// Pick which competitor of an odd field plays in two Calcutta pairs.
    fn doubled_competitor(
        &mut self,
        ranked: &[&CompetitorStanding],
    ) -> Result<CompetitorId, ScoringError>;
}

/// Arbiter whose answers were collected ahead of time, e.g. from a request.
#[derive(Debug, Clone, Default)]
pub struct PresetArbiter {
    pub cutline: Option<i32>,
    pub doubled: Option<CompetitorId>,
}

impl Arbiter for PresetArbiter {
    fn cutline(&mut self, _ranked: &[&CompetitorStanding]) -> Result<i32, ScoringError> {
        self.cutline
            .ok_or_else(|| ScoringError::ExternalFailure("no cutline was provided".to_string()))
    }

    fn doubled_competitor(
        &mut self,
        _ranked: &[&CompetitorStanding],
    ) -> Result<CompetitorId, ScoringError> {
        self.doubled.clone().ok_or_else(|| {
            ScoringError::ExternalFailure("no doubled competitor was provided".to_string())
        })
    }
}

/// Store that keeps everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    standings: BTreeMap<CompetitorId, CompetitorStanding>,
    /// Kept in draw order.
    pairs: Vec<CalcuttaPair>,
    cutline: Option<i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StandingsStore for MemoryStore {
    fn load_standing(&self, id: &CompetitorId) -> Result<Option<CompetitorStanding>, ScoringError> {
        Ok(self.standings.get(id).cloned())
    }

    fn save_standing(&mut self, standing: &CompetitorStanding) -> Result<(), ScoringError> {
        self.standings.insert(standing.id.clone(), standing.clone());
        Ok(())
    }

    fn delete_standing(&mut self, id: &CompetitorId) -> Result<(), ScoringError> {
        self.standings.remove(id);
        Ok(())
    }

    fn list_standings(&self) -> Result<Vec<CompetitorStanding>, ScoringError> {
        Ok(self.standings.values().cloned().collect())
    }

    fn save_pair(&mut self, pair: &CalcuttaPair) -> Result<(), ScoringError> {
        match self
            .pairs
            .iter_mut()
            .find(|p| p.is(pair.first(), pair.second()))
        {
            Some(existing) => *existing = pair.clone(),
            None => self.pairs.push(pair.clone()),
        }
        Ok(())
    }

    fn list_pairs(&self) -> Result<Vec<CalcuttaPair>, ScoringError> {
        Ok(self.pairs.clone())
    }

    fn clear_pairs(&mut self) -> Result<(), ScoringError> {
        self.pairs.clear();
        Ok(())
    }

    fn load_cutline(&self) -> Result<Option<i32>, ScoringError> {
        Ok(self.cutline)
    }

    fn save_cutline(&mut self, cutline: Option<i32>) -> Result<(), ScoringError> {
        self.cutline = cutline;
        Ok(())
    }
}
