use crate::course::COURSE_LENGTH;
use crate::error::ScoringError;

/// Points for a scratch round played exactly to par.
pub const PAR_ROUND_POINTS: i32 = 36;

/// Stableford points for a hole played `net` strokes over par.
///
/// The table is closed: anything outside `[-4, 3]` has no value.
pub fn hole_points(net: i32) -> Option<i32> {
    match net {
        3 => Some(-1),
        2 => Some(0),
        1 => Some(1),
        0 => Some(2),
        -1 => Some(4),
        -2 => Some(6),
        -3 => Some(8),
        -4 => Some(12),
        _ => None,
    }
}

/// Convert a full round into Stableford points.
pub fn score_round(raw: &[i32], par: &[u8]) -> Result<i32, ScoringError> {
    check_card_length(raw)?;
    if par.len() != COURSE_LENGTH {
        return Err(ScoringError::InvalidCourseData(format!(
            "course par length must be {COURSE_LENGTH}, got {}",
            par.len()
        )));
    }

    let mut points = 0;
    for (hole, (&strokes, &hole_par)) in raw.iter().zip(par).enumerate() {
        let value = (strokes > 0)
            .then(|| strokes.checked_sub(i32::from(hole_par)))
            .flatten()
            .and_then(hole_points)
            .ok_or_else(|| {
                ScoringError::InvalidScoreInput(format!(
                    "invalid score of {strokes} on hole {}",
                    hole + 1
                ))
            })?;
        points += value;
    }
    Ok(points)
}

pub(crate) fn check_card_length(raw: &[i32]) -> Result<(), ScoringError> {
    if raw.len() != COURSE_LENGTH {
        return Err(ScoringError::InvalidScoreInput(format!(
            "score card must have {COURSE_LENGTH} holes, got {}",
            raw.len()
        )));
    }
    Ok(())
}

/// Parse a score card typed in as text, one entry per hole.
pub fn parse_score_card<S: AsRef<str>>(entries: &[S]) -> Result<Vec<i32>, ScoringError> {
    let scores = entries
        .iter()
        .enumerate()
        .map(|(hole, entry)| {
            let entry = entry.as_ref().trim();
            entry.parse::<i32>().map_err(|_| {
                ScoringError::InvalidScoreInput(format!(
                    "hole {} score {entry:?} is not a number",
                    hole + 1
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_card_length(&scores)?;
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn par_round_is_thirty_six() {
        assert_eq!(score_round(&[4; 18], &[4; 18]).unwrap(), PAR_ROUND_POINTS);
    }

    #[test]
    fn mixed_round_sums_table() {
        let par = [4u8; 18];
        let mut raw = [4i32; 18];
        raw[0] = 3; // birdie: 4
        raw[1] = 2; // eagle: 6
        raw[2] = 7; // triple: -1
        raw[3] = 6; // double: 0
        raw[4] = 5; // bogey: 1
        assert_eq!(score_round(&raw, &par).unwrap(), 4 + 6 - 1 + 1 + 13 * 2);
    }

    #[test]
    fn condor_on_par_five() {
        let mut par = [4u8; 18];
        par[0] = 5;
        let mut raw = [4i32; 18];
        raw[0] = 1;
        assert_eq!(score_round(&raw, &par).unwrap(), 12 + 17 * 2);
    }

    #[test]
    fn quadruple_bogey_rejected() {
        let mut raw = [4i32; 18];
        raw[6] = 8;
        let err = score_round(&raw, &[4; 18]).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidScoreInput("invalid score of 8 on hole 7".to_string())
        );
    }

    #[test]
    fn zero_strokes_rejected_even_when_in_table() {
        // par 4, zero strokes: net -4 is in the table but impossible
        let mut raw = [4i32; 18];
        raw[0] = 0;
        assert!(score_round(&raw, &[4; 18]).is_err());
        // par 3, zero strokes: net -3
        let mut par = [4u8; 18];
        par[0] = 3;
        assert!(score_round(&raw, &par).is_err());
    }

    #[test]
    fn extreme_strokes_rejected_without_overflow() {
        let mut raw = [4i32; 18];
        raw[0] = i32::MIN;
        let err = score_round(&raw, &[4; 18]).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidScoreInput(format!("invalid score of {} on hole 1", i32::MIN))
        );
        raw[0] = i32::MAX;
        assert!(score_round(&raw, &[4; 18]).is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(matches!(
            score_round(&[4; 17], &[4; 18]),
            Err(ScoringError::InvalidScoreInput(_))
        ));
    }

    #[test]
    fn parse_card_reads_numbers() {
        let entries: Vec<String> = (0..18).map(|_| " 5 ".to_string()).collect();
        assert_eq!(parse_score_card(&entries).unwrap(), vec![5; 18]);
    }

    #[test]
    fn parse_card_rejects_text() {
        let mut entries = vec!["4"; 18];
        entries[2] = "x";
        assert_eq!(
            parse_score_card(&entries),
            Err(ScoringError::InvalidScoreInput(
                "hole 3 score \"x\" is not a number".to_string()
            ))
        );
        assert!(parse_score_card(&["4"; 10]).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_rounds_score_table_sum(
                holes in proptest::collection::vec((3u8..=5, -4i32..=3), 18)
            ) {
                let par: Vec<u8> = holes.iter().map(|&(p, _)| p).collect();
                let raw: Vec<i32> = holes.iter().map(|&(p, n)| i32::from(p) + n).collect();
                let expected: i32 = holes
                    .iter()
                    .map(|&(_, n)| hole_points(n).unwrap())
                    .sum();
                let valid = raw.iter().all(|&r| r > 0);
                match score_round(&raw, &par) {
                    Ok(points) => {
                        prop_assert!(valid);
                        prop_assert_eq!(points, expected);
                    },
                    Err(_) => prop_assert!(!valid),
                }
            }
        }
    }
}
