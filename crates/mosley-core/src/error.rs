use crate::day::Day;

/// Every failure the scoring engine can report.
///
/// All variants except [`ScoringError::ExternalFailure`] are local validation
/// failures; an operation that returns one of them has left the tournament
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Malformed par or difficulty sequence, or a bad course name.
    InvalidCourseData(String),
    /// Wrong-length score card, a non-numeric entry, or an impossible score.
    InvalidScoreInput(String),
    /// Handicap outside `[0, 30]`.
    InvalidHandicap(i64),
    UnknownDay(String),
    /// Calcutta scoring attempted before both members played the day.
    IncompletePairData { pair: String, day: Day },
    MissingCourseSelection,
    UnknownCompetitor(String),
    InvalidCompetitor(String),
    InvalidPairing(String),
    /// The field was already split at a different cutline.
    SplitAlreadyApplied { cutline: i32 },
    /// Persistence or decision-source failure reported by a collaborator.
    ExternalFailure(String),
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCourseData(m) => write!(f, "invalid course data: {m}"),
            Self::InvalidScoreInput(m) => write!(f, "invalid score input: {m}"),
            Self::InvalidHandicap(h) => write!(f, "handicap {h} must be between 0 and 30"),
            Self::UnknownDay(label) => write!(f, "unknown day: {label:?}"),
            Self::IncompletePairData { pair, day } => {
                write!(f, "pair {pair} is missing a round for {day}")
            },
            Self::MissingCourseSelection => {
                write!(f, "select a course before submitting scores")
            },
            Self::UnknownCompetitor(name) => write!(f, "unknown competitor: {name}"),
            Self::InvalidCompetitor(m) => write!(f, "invalid competitor: {m}"),
            Self::InvalidPairing(m) => write!(f, "invalid pairing: {m}"),
            Self::SplitAlreadyApplied { cutline } => {
                write!(f, "field already split at cutline {cutline}")
            },
            Self::ExternalFailure(m) => write!(f, "external failure: {m}"),
        }
    }
}

impl std::error::Error for ScoringError {}

impl ScoringError {
    /// True for failures caused by the caller's input rather than by a
    /// collaborator.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::ExternalFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            format!("{}", ScoringError::InvalidHandicap(31)),
            "handicap 31 must be between 0 and 30"
        );
        assert_eq!(
            format!("{}", ScoringError::UnknownDay("Day 9".into())),
            "unknown day: \"Day 9\""
        );
        let incomplete = ScoringError::IncompletePairData {
            pair: "Ann and Bob".into(),
            day: Day::Two,
        };
        assert_eq!(
            format!("{incomplete}"),
            "pair Ann and Bob is missing a round for Day 2"
        );
        assert!(format!("{}", ScoringError::ExternalFailure("disk full".into())).contains("disk"));
    }

    #[test]
    fn only_external_failures_are_not_validation() {
        assert!(ScoringError::MissingCourseSelection.is_validation());
        assert!(ScoringError::SplitAlreadyApplied { cutline: 3 }.is_validation());
        assert!(!ScoringError::ExternalFailure("offline".into()).is_validation());
    }
}
