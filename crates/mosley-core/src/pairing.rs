use crate::calcutta::CalcuttaPair;
use crate::error::ScoringError;
use crate::standing::CompetitorId;

/// Snake-pair a ranked field: best with worst, second with second-worst,
/// working inward.
///
/// An odd field needs `doubled`, a competitor who plays in two pairs. Their
/// duplicate entry is placed right next to their own rank before pairing.
pub fn snake_pairs(
    ranked: &[CompetitorId],
    doubled: Option<&CompetitorId>,
) -> Result<Vec<CalcuttaPair>, ScoringError> {
    if ranked.is_empty() {
        return Err(ScoringError::InvalidPairing(
            "cannot pair an empty field".to_string(),
        ));
    }

    let mut working: Vec<&CompetitorId> = ranked.iter().collect();
    if working.len() % 2 != 0 {
        let doubled = doubled.ok_or_else(|| {
            ScoringError::InvalidPairing(format!(
                "a field of {} needs a doubled competitor",
                ranked.len()
            ))
        })?;
        let position = ranked
            .iter()
            .position(|id| id == doubled)
            .ok_or_else(|| {
                ScoringError::InvalidPairing(format!(
                    "doubled competitor {doubled} is not in the field"
                ))
            })?;
        working.insert(position, &ranked[position]);
    }

    let n = working.len();
    let pairs = (0..n / 2)
        .map(|i| CalcuttaPair::new(working[i].clone(), working[n - 1 - i].clone()))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(field = ranked.len(), pairs = pairs.len(), "Calcutta pairs generated");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::id;

    fn field(n: usize) -> Vec<CompetitorId> {
        (1..=n).map(|i| id(&format!("P{i}"))).collect()
    }

    #[test]
    fn even_field_pairs_outside_in() {
        let ranked = field(4);
        let pairs = snake_pairs(&ranked, None).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].is(&ranked[0], &ranked[3]));
        assert!(pairs[1].is(&ranked[1], &ranked[2]));
    }

    #[test]
    fn doubled_competitor_plays_twice_with_different_partners() {
        let ranked = field(5);
        let doubled = ranked[3].clone();
        let pairs = snake_pairs(&ranked, Some(&doubled)).unwrap();
        assert_eq!(pairs.len(), 3);
        let with_doubled: Vec<_> = pairs.iter().filter(|p| p.contains(&doubled)).collect();
        assert_eq!(with_doubled.len(), 2);
        assert!(pairs[0].is(&ranked[0], &ranked[4]));
        assert!(pairs[1].is(&ranked[1], &doubled));
        assert!(pairs[2].is(&ranked[2], &doubled));
    }

    #[test]
    fn doubling_the_leader() {
        let ranked = field(3);
        let pairs = snake_pairs(&ranked, Some(&ranked[0])).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].is(&ranked[0], &ranked[2]));
        assert!(pairs[1].is(&ranked[0], &ranked[1]));
    }

    #[test]
    fn doubling_the_middle_would_self_pair() {
        let ranked = field(5);
        assert!(matches!(
            snake_pairs(&ranked, Some(&ranked[2])),
            Err(ScoringError::InvalidPairing(_))
        ));
    }

    #[test]
    fn odd_field_needs_present_doubled_competitor() {
        let ranked = field(3);
        assert!(snake_pairs(&ranked, None).is_err());
        assert!(snake_pairs(&ranked, Some(&id("Stranger"))).is_err());
    }

    #[test]
    fn empty_field_rejected() {
        assert!(snake_pairs(&[], None).is_err());
    }

    #[test]
    fn doubled_ignored_for_even_field() {
        let ranked = field(2);
        let pairs = snake_pairs(&ranked, Some(&id("Stranger"))).unwrap();
        assert_eq!(pairs.len(), 1);
    }
}
