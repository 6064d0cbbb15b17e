//! On-disk entity store. Each standing is its own MessagePack file under
//! `standings/`; pairs, the cutline and courses each live in a single file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use mosley_core::ScoringError;
use mosley_core::calcutta::CalcuttaPair;
use mosley_core::collaborators::StandingsStore;
use mosley_core::course::{Course, CourseLibrary};
use mosley_core::standing::{CompetitorId, CompetitorStanding};

const STANDINGS_DIR: &str = "standings";
const PAIRS_FILE: &str = "pairs.msgpack";
const SPLIT_FILE: &str = "split.msgpack";
const COURSES_FILE: &str = "courses.msgpack";
const EXTENSION: &str = "msgpack";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

fn failure(action: &str, path: &Path, err: impl std::fmt::Display) -> ScoringError {
    ScoringError::ExternalFailure(format!("{action} {}: {err}", path.display()))
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ScoringError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(failure("reading", path, e)),
    };
    rmp_serde::from_slice(&bytes)
        .map(Some)
        .map_err(|e| failure("decoding", path, e))
}

/// Write through a temporary file so a crash never leaves half a record.
fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ScoringError> {
    let bytes = rmp_serde::to_vec_named(value).map_err(|e| failure("encoding", path, e))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(|e| failure("writing", &tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| failure("replacing", path, e))
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ScoringError> {
        let root = root.into();
        let standings = root.join(STANDINGS_DIR);
        fs::create_dir_all(&standings).map_err(|e| failure("creating", &standings, e))?;
        tracing::info!(path = %root.display(), "Opened data directory");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn standing_path(&self, id: &CompetitorId) -> PathBuf {
        self.root
            .join(STANDINGS_DIR)
            .join(format!("{id}.{EXTENSION}"))
    }

    pub fn list_courses(&self) -> Result<Vec<Course>, ScoringError> {
        Ok(read(&self.root.join(COURSES_FILE))?.unwrap_or_default())
    }

    pub fn save_courses(&self, library: &CourseLibrary) -> Result<(), ScoringError> {
        let courses: Vec<&Course> = library.courses().collect();
        write(&self.root.join(COURSES_FILE), &courses)
    }
}

impl StandingsStore for FileStore {
    fn load_standing(&self, id: &CompetitorId) -> Result<Option<CompetitorStanding>, ScoringError> {
        read(&self.standing_path(id))
    }

    fn save_standing(&mut self, standing: &CompetitorStanding) -> Result<(), ScoringError> {
        write(&self.standing_path(&standing.id), standing)
    }

    fn delete_standing(&mut self, id: &CompetitorId) -> Result<(), ScoringError> {
        let path = self.standing_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(failure("deleting", &path, e)),
        }
    }

    fn list_standings(&self) -> Result<Vec<CompetitorStanding>, ScoringError> {
        let dir = self.root.join(STANDINGS_DIR);
        let entries = fs::read_dir(&dir).map_err(|e| failure("listing", &dir, e))?;
        let mut standings = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| failure("listing", &dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION)
                && let Some(standing) = read(&path)?
            {
                standings.push(standing);
            }
        }
        Ok(standings)
    }

    fn save_pair(&mut self, pair: &CalcuttaPair) -> Result<(), ScoringError> {
        let mut pairs = self.list_pairs()?;
        match pairs
            .iter_mut()
            .find(|p| p.is(pair.first(), pair.second()))
        {
            Some(existing) => *existing = pair.clone(),
            None => pairs.push(pair.clone()),
        }
        write(&self.root.join(PAIRS_FILE), &pairs)
    }

    fn list_pairs(&self) -> Result<Vec<CalcuttaPair>, ScoringError> {
        Ok(read(&self.root.join(PAIRS_FILE))?.unwrap_or_default())
    }

    fn clear_pairs(&mut self) -> Result<(), ScoringError> {
        write(&self.root.join(PAIRS_FILE), &Vec::<CalcuttaPair>::new())
    }

    fn load_cutline(&self) -> Result<Option<i32>, ScoringError> {
        Ok(read::<Option<i32>>(&self.root.join(SPLIT_FILE))?.flatten())
    }

    fn save_cutline(&mut self, cutline: Option<i32>) -> Result<(), ScoringError> {
        write(&self.root.join(SPLIT_FILE), &cutline)
    }
}
