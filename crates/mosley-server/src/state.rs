use std::sync::Arc;

use tokio::sync::RwLock;

use mosley_core::ScoringError;
use mosley_core::course::{Course, CourseLibrary};
use mosley_core::tournament::Tournament;

use crate::auth::AuthConfig;
use crate::config::ServerConfig;
use crate::store::FileStore;

/// Everything the API reads and mutates, guarded by a single lock.
#[derive(Debug)]
pub struct Scorekeeper {
    pub tournament: Tournament,
    pub courses: CourseLibrary,
    store: Option<FileStore>,
}

impl Scorekeeper {
    /// Memory-only scorekeeper seeded with `courses`.
    pub fn new(courses: CourseLibrary) -> Self {
        Self {
            tournament: Tournament::new(),
            courses,
            store: None,
        }
    }

    /// Load the tournament and stored courses from `store`. Configured
    /// courses take precedence over stored ones with the same name.
    pub fn open(store: FileStore, configured: CourseLibrary) -> Result<Self, ScoringError> {
        let tournament = Tournament::load_from(&store)?;
        let mut courses: CourseLibrary = store.list_courses()?.into_iter().collect();
        for course in configured.courses() {
            courses.insert(course.clone());
        }
        Ok(Self {
            tournament,
            courses,
            store: Some(store),
        })
    }

    /// Run `op` against a copy of the tournament, persist the copy, then
    /// make it current. On any failure the current tournament is untouched.
    pub fn update<R>(
        &mut self,
        op: impl FnOnce(&mut Tournament, &CourseLibrary) -> Result<R, ScoringError>,
    ) -> Result<R, ScoringError> {
        let mut next = self.tournament.clone();
        let result = op(&mut next, &self.courses)?;
        if let Some(store) = self.store.as_mut() {
            next.save_to(store)?;
        }
        self.tournament = next;
        Ok(result)
    }

    /// Add or replace a course and persist the library.
    pub fn add_course(&mut self, course: Course) -> Result<(), ScoringError> {
        let mut next = self.courses.clone();
        next.insert(course);
        if let Some(store) = &self.store {
            store.save_courses(&next)?;
        }
        self.courses = next;
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }
}

pub type SharedScorekeeper = Arc<RwLock<Scorekeeper>>;

#[derive(Clone)]
pub struct AppState {
    pub scorekeeper: SharedScorekeeper,
    pub auth: AuthConfig,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, ScoringError> {
        let auth = AuthConfig {
            bearer_token: config.auth.bearer_token.clone(),
        };
        let courses = config.course_library();
        let scorekeeper = match &config.data_dir {
            Some(dir) => Scorekeeper::open(FileStore::open(dir)?, courses)?,
            None => Scorekeeper::new(courses),
        };
        tracing::info!(
            competitors = scorekeeper.tournament.len(),
            courses = scorekeeper.courses.len(),
            persistent = scorekeeper.is_persistent(),
            "Scorekeeper ready"
        );
        Ok(Self {
            scorekeeper: Arc::new(RwLock::new(scorekeeper)),
            auth,
            config: Arc::new(config),
        })
    }
}
