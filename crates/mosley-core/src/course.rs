use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Number of holes in a round.
pub const COURSE_LENGTH: usize = 18;

/// Raw course definition as entered by an organizer or read from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSpec {
    pub name: String,
    pub par: Vec<u8>,
    /// Hole difficulty ranks, 1 = hardest.
    pub difficulty: Vec<u8>,
}

/// A validated 18-hole course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourseSpec", into = "CourseSpec")]
pub struct Course {
    name: String,
    par: [u8; COURSE_LENGTH],
    difficulty: [u8; COURSE_LENGTH],
}

impl Course {
    pub fn new(name: &str, par: &[u8], difficulty: &[u8]) -> Result<Self, ScoringError> {
        if name.trim().is_empty() {
            return Err(ScoringError::InvalidCourseData(
                "course name cannot be empty".to_string(),
            ));
        }
        let par = holes(par, "par")?;
        if let Some(hole) = par.iter().position(|&p| p == 0) {
            return Err(ScoringError::InvalidCourseData(format!(
                "par on hole {} must be positive",
                hole + 1
            )));
        }
        let difficulty = validate_difficulty(difficulty)?;
        Ok(Self {
            name: name.to_string(),
            par,
            difficulty,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn par(&self) -> &[u8; COURSE_LENGTH] {
        &self.par
    }

    pub fn difficulty(&self) -> &[u8; COURSE_LENGTH] {
        &self.difficulty
    }

    pub fn total_par(&self) -> u32 {
        self.par.iter().map(|&p| u32::from(p)).sum()
    }
}

impl TryFrom<CourseSpec> for Course {
    type Error = ScoringError;

    fn try_from(spec: CourseSpec) -> Result<Self, Self::Error> {
        Course::new(&spec.name, &spec.par, &spec.difficulty)
    }
}

impl From<Course> for CourseSpec {
    fn from(course: Course) -> Self {
        Self {
            name: course.name,
            par: course.par.to_vec(),
            difficulty: course.difficulty.to_vec(),
        }
    }
}

fn holes(values: &[u8], what: &str) -> Result<[u8; COURSE_LENGTH], ScoringError> {
    values.try_into().map_err(|_| {
        ScoringError::InvalidCourseData(format!(
            "course {what} length must be {COURSE_LENGTH}, got {}",
            values.len()
        ))
    })
}

/// Check that a difficulty ranking holds each rank 1..=18 exactly once.
pub(crate) fn validate_difficulty(ranks: &[u8]) -> Result<[u8; COURSE_LENGTH], ScoringError> {
    let ranks = holes(ranks, "difficulty")?;
    let mut seen = [false; COURSE_LENGTH];
    for (hole, &rank) in ranks.iter().enumerate() {
        let slot = usize::from(rank);
        if !(1..=COURSE_LENGTH).contains(&slot) {
            return Err(ScoringError::InvalidCourseData(format!(
                "difficulty rank {rank} on hole {} must be between 1 and {COURSE_LENGTH}",
                hole + 1
            )));
        }
        if seen[slot - 1] {
            return Err(ScoringError::InvalidCourseData(format!(
                "difficulty rank {rank} appears more than once"
            )));
        }
        seen[slot - 1] = true;
    }
    Ok(ranks)
}

/// Named collection of courses available to the tournament.
#[derive(Debug, Clone, Default)]
pub struct CourseLibrary {
    courses: BTreeMap<String, Course>,
}

impl CourseLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a course, keyed by its name.
    pub fn insert(&mut self, course: Course) {
        tracing::debug!(course = %course.name(), "Course added to library");
        self.courses.insert(course.name().to_string(), course);
    }

    pub fn get(&self, name: &str) -> Option<&Course> {
        self.courses.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl FromIterator<Course> for CourseLibrary {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut library = Self::new();
        for course in iter {
            library.insert(course);
        }
        library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> Vec<u8> {
        (1..=18).collect()
    }

    #[test]
    fn valid_course_accepted() {
        let course = Course::new("Twisted Creek", &[4; 18], &ranks()).unwrap();
        assert_eq!(course.name(), "Twisted Creek");
        assert_eq!(course.total_par(), 72);
        assert_eq!(course.difficulty()[17], 18);
    }

    #[test]
    fn short_par_rejected() {
        let err = Course::new("Short", &[4; 17], &ranks()).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidCourseData("course par length must be 18, got 17".into())
        );
    }

    #[test]
    fn zero_par_rejected() {
        let mut par = vec![4; 18];
        par[5] = 0;
        assert!(Course::new("Zero", &par, &ranks()).is_err());
    }

    #[test]
    fn duplicate_rank_rejected() {
        let mut difficulty = ranks();
        difficulty[1] = 1;
        assert!(matches!(
            Course::new("Dupes", &[4; 18], &difficulty),
            Err(ScoringError::InvalidCourseData(_))
        ));
    }

    #[test]
    fn out_of_range_rank_rejected() {
        let mut difficulty = ranks();
        difficulty[0] = 19;
        assert!(Course::new("Wide", &[4; 18], &difficulty).is_err());
        difficulty[0] = 0;
        assert!(Course::new("Wide", &[4; 18], &difficulty).is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(Course::new("  ", &[4; 18], &ranks()).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let good = r#"{"name":"Home","par":[4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4],
            "difficulty":[1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18]}"#;
        let course: Course = serde_json::from_str(good).unwrap();
        assert_eq!(course.par()[0], 4);

        let bad = r#"{"name":"Home","par":[4,4,4],"difficulty":[1,2,3]}"#;
        assert!(serde_json::from_str::<Course>(bad).is_err());
    }

    #[test]
    fn library_replaces_by_name() {
        let mut library = CourseLibrary::new();
        library.insert(Course::new("Home", &[4; 18], &ranks()).unwrap());
        library.insert(Course::new("Home", &[3; 18], &ranks()).unwrap());
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("Home").unwrap().total_par(), 54);
        assert!(library.get("Away").is_none());
    }
}
