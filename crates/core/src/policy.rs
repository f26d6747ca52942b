use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::PlannedRound;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("interval sequence must not be empty")]
    Empty,

    #[error("review intervals must be positive, got {provided}")]
    NonPositiveInterval { provided: i64 },

    #[error("review intervals must be strictly ascending (offending index {index})")]
    NotAscending { index: usize },

    #[error("at most {max} review rounds are supported, got {provided}")]
    TooManyRounds { provided: usize, max: usize },

    #[error("invalid interval value: {raw}")]
    InvalidInterval { raw: String },
}

//
// ─── INTERVAL POLICY ───────────────────────────────────────────────────────────
//

/// Default Ebbinghaus-style offsets, in days.
pub const DEFAULT_REVIEW_INTERVALS: [i64; 5] = [1, 2, 4, 7, 15];

const MAX_ROUNDS: usize = u8::MAX as usize;

/// The fixed review schedule: an ordered sequence of day offsets.
///
/// The sequence length defines the number of review rounds N. The policy is
/// read once at startup and treated as immutable for the process lifetime;
/// changing it does not retroactively alter already-generated plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalPolicy {
    intervals: Vec<i64>,
}

impl IntervalPolicy {
    /// Validates and wraps an interval sequence.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if the sequence is empty, contains a
    /// non-positive offset, is not strictly ascending, or has more rounds
    /// than a round number can express.
    pub fn new(intervals: Vec<i64>) -> Result<Self, PolicyError> {
        if intervals.is_empty() {
            return Err(PolicyError::Empty);
        }
        if intervals.len() > MAX_ROUNDS {
            return Err(PolicyError::TooManyRounds {
                provided: intervals.len(),
                max: MAX_ROUNDS,
            });
        }
        for (index, window) in intervals.windows(2).enumerate() {
            if window[1] <= window[0] {
                return Err(PolicyError::NotAscending { index: index + 1 });
            }
        }
        if let Some(&first) = intervals.first() {
            if first <= 0 {
                return Err(PolicyError::NonPositiveInterval { provided: first });
            }
        }
        Ok(Self { intervals })
    }

    /// Parses a comma-separated day list, e.g. `"1,2,4,7,15"`.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::InvalidInterval` for tokens that are not
    /// integers, plus the validation errors of [`IntervalPolicy::new`].
    pub fn parse(raw: &str) -> Result<Self, PolicyError> {
        let mut intervals = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let days: i64 = token.parse().map_err(|_| PolicyError::InvalidInterval {
                raw: token.to_string(),
            })?;
            intervals.push(days);
        }
        Self::new(intervals)
    }

    /// Number of review rounds N defined by this policy.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounds(&self) -> u8 {
        // Length is checked against MAX_ROUNDS in the constructor.
        self.intervals.len() as u8
    }

    #[must_use]
    pub fn intervals(&self) -> &[i64] {
        &self.intervals
    }

    /// Produces the full round set for a plan generated at `now`:
    /// round i (1-based) is due at `now + intervals[i-1]` days.
    #[must_use]
    pub fn plan_rounds(&self, now: DateTime<Utc>) -> Vec<PlannedRound> {
        self.intervals
            .iter()
            .enumerate()
            .map(|(i, days)| PlannedRound {
                #[allow(clippy::cast_possible_truncation)]
                review_round: (i + 1) as u8,
                scheduled_date: now + Duration::days(*days),
            })
            .collect()
    }
}

impl Default for IntervalPolicy {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_REVIEW_INTERVALS.to_vec(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn default_policy_has_five_rounds() {
        let policy = IntervalPolicy::default();
        assert_eq!(policy.rounds(), 5);
        assert_eq!(policy.intervals(), &[1, 2, 4, 7, 15]);
    }

    #[test]
    fn plan_rounds_are_one_based_with_increasing_dates() {
        let policy = IntervalPolicy::default();
        let now = fixed_now();
        let rounds = policy.plan_rounds(now);

        assert_eq!(rounds.len(), 5);
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(usize::from(round.review_round), i + 1);
            assert_eq!(
                round.scheduled_date,
                now + Duration::days(DEFAULT_REVIEW_INTERVALS[i])
            );
        }
        for pair in rounds.windows(2) {
            assert!(pair[0].scheduled_date < pair[1].scheduled_date);
        }
    }

    #[test]
    fn rejects_empty_sequence() {
        assert_eq!(IntervalPolicy::new(vec![]).unwrap_err(), PolicyError::Empty);
    }

    #[test]
    fn rejects_non_positive_interval() {
        let err = IntervalPolicy::new(vec![0, 2]).unwrap_err();
        assert_eq!(err, PolicyError::NonPositiveInterval { provided: 0 });

        let err = IntervalPolicy::new(vec![-1, 2]).unwrap_err();
        assert_eq!(err, PolicyError::NonPositiveInterval { provided: -1 });
    }

    #[test]
    fn rejects_non_ascending_sequence() {
        let err = IntervalPolicy::new(vec![1, 3, 3]).unwrap_err();
        assert_eq!(err, PolicyError::NotAscending { index: 2 });
    }

    #[test]
    fn parse_accepts_spaced_list() {
        let policy = IntervalPolicy::parse(" 1, 2,4 ,7,15 ").unwrap();
        assert_eq!(policy.intervals(), &[1, 2, 4, 7, 15]);
    }

    #[test]
    fn parse_rejects_junk_and_empty() {
        assert!(matches!(
            IntervalPolicy::parse("1,two,3").unwrap_err(),
            PolicyError::InvalidInterval { .. }
        ));
        assert_eq!(IntervalPolicy::parse("").unwrap_err(), PolicyError::Empty);
    }
}
