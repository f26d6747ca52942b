use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{ProblemId, ProgressId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("unrecognized progress status: {0}")]
    InvalidStatus(String),

    #[error("mastery level must be in 0..={max}, got {provided}")]
    InvalidMasteryLevel { provided: u8, max: u8 },
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle state of a tracked problem.
///
/// `NotStarted → InProgress` happens on the first recorded attempt and
/// triggers review plan generation. `InProgress → Mastered` is automatic,
/// driven by completed review rounds; there is no automatic transition out
/// of `Mastered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Mastered,
}

impl ProgressStatus {
    /// Storage label for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not_started",
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Mastered => "mastered",
        }
    }

    /// Parses a status label.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidStatus` for unknown labels. Rejection
    /// happens before any mutation, so a bad label never half-applies.
    pub fn parse(label: &str) -> Result<Self, ProgressError> {
        match label {
            "not_started" => Ok(ProgressStatus::NotStarted),
            "in_progress" => Ok(ProgressStatus::InProgress),
            "mastered" => Ok(ProgressStatus::Mastered),
            other => Err(ProgressError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── ATTEMPT OUTCOME ───────────────────────────────────────────────────────────
//

/// What a recorded attempt asks the caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    /// True exactly when the attempt moved the progress out of
    /// `NotStarted` into `InProgress`. The caller must generate the
    /// review plan once, and only then.
    pub schedule_reviews: bool,
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Per-problem tracking record: status, attempt count, mastery level, and
/// the first-solved / last-attempt timestamps.
///
/// Exactly one `Progress` exists per catalogue problem; it is created at
/// seeding time in the `NotStarted` state and never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    id: ProgressId,
    problem_id: ProblemId,
    status: ProgressStatus,
    attempt_count: u32,
    mastery_level: u8,
    first_solved: Option<DateTime<Utc>>,
    last_attempt: Option<DateTime<Utc>>,
}

impl Progress {
    /// Fresh progress record for a newly seeded problem.
    #[must_use]
    pub fn new(id: ProgressId, problem_id: ProblemId) -> Self {
        Self {
            id,
            problem_id,
            status: ProgressStatus::NotStarted,
            attempt_count: 0,
            mastery_level: 0,
            first_solved: None,
            last_attempt: None,
        }
    }

    /// Rebuilds a progress record from storage.
    #[must_use]
    pub fn from_persisted(
        id: ProgressId,
        problem_id: ProblemId,
        status: ProgressStatus,
        attempt_count: u32,
        mastery_level: u8,
        first_solved: Option<DateTime<Utc>>,
        last_attempt: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            problem_id,
            status,
            attempt_count,
            mastery_level,
            first_solved,
            last_attempt,
        }
    }

    #[must_use]
    pub fn id(&self) -> ProgressId {
        self.id
    }

    #[must_use]
    pub fn problem_id(&self) -> ProblemId {
        self.problem_id
    }

    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    #[must_use]
    pub fn mastery_level(&self) -> u8 {
        self.mastery_level
    }

    #[must_use]
    pub fn first_solved(&self) -> Option<DateTime<Utc>> {
        self.first_solved
    }

    #[must_use]
    pub fn last_attempt(&self) -> Option<DateTime<Utc>> {
        self.last_attempt
    }

    /// Records an attempt, moving the status to `new_status`.
    ///
    /// Always increments `attempt_count` and stamps `last_attempt`.
    /// `first_solved` is set once, on the transition out of `NotStarted`.
    /// An explicit `mastery_level` is a manual override (advanced
    /// adjustment) and is validated against `total_rounds` first; `None`
    /// leaves the derived level untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidMasteryLevel` if the override is
    /// above `total_rounds`; nothing is mutated in that case.
    pub fn record_attempt(
        &mut self,
        new_status: ProgressStatus,
        mastery_level: Option<u8>,
        total_rounds: u8,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, ProgressError> {
        if let Some(level) = mastery_level {
            if level > total_rounds {
                return Err(ProgressError::InvalidMasteryLevel {
                    provided: level,
                    max: total_rounds,
                });
            }
        }

        let was_not_started = self.status == ProgressStatus::NotStarted;

        self.attempt_count = self.attempt_count.saturating_add(1);
        self.last_attempt = Some(now);

        if was_not_started && new_status != ProgressStatus::NotStarted && self.first_solved.is_none()
        {
            self.first_solved = Some(now);
        }

        if let Some(level) = mastery_level {
            self.mastery_level = level;
        }
        self.status = new_status;

        Ok(AttemptOutcome {
            schedule_reviews: was_not_started && new_status == ProgressStatus::InProgress,
        })
    }

    /// Advances mastery after one more review round completes.
    ///
    /// `completed_rounds_before` is the count of rounds already durably
    /// completed, read before the in-flight round commits; the round being
    /// completed is added here explicitly. Counting after the commit would
    /// be off by one under a stale read.
    pub fn apply_round_completion(&mut self, completed_rounds_before: u32, total_rounds: u8) {
        let completed = completed_rounds_before.saturating_add(1);
        self.mastery_level = u8::try_from(completed.min(u32::from(total_rounds)))
            .unwrap_or(total_rounds);
        if completed >= u32::from(total_rounds) {
            self.status = ProgressStatus::Mastered;
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

    fn fresh() -> Progress {
        Progress::new(ProgressId::new(1), ProblemId::new(1))
    }

    #[test]
    fn status_labels_round_trip() {
        for s in [
            ProgressStatus::NotStarted,
            ProgressStatus::InProgress,
            ProgressStatus::Mastered,
        ] {
            assert_eq!(ProgressStatus::parse(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn status_rejects_legacy_labels() {
        for label in ["attempted", "reviewing", "done"] {
            let err = ProgressStatus::parse(label).unwrap_err();
            assert!(matches!(err, ProgressError::InvalidStatus(_)));
        }
    }

    #[test]
    fn first_attempt_moves_to_in_progress_and_schedules() {
        let mut p = fresh();
        let now = fixed_now();

        let outcome = p
            .record_attempt(ProgressStatus::InProgress, None, 5, now)
            .unwrap();

        assert!(outcome.schedule_reviews);
        assert_eq!(p.status(), ProgressStatus::InProgress);
        assert_eq!(p.attempt_count(), 1);
        assert_eq!(p.first_solved(), Some(now));
        assert_eq!(p.last_attempt(), Some(now));
    }

    #[test]
    fn later_attempts_do_not_reschedule_or_reset_first_solved() {
        let mut p = fresh();
        let t0 = fixed_now();
        let t1 = t0 + chrono::Duration::days(1);

        p.record_attempt(ProgressStatus::InProgress, None, 5, t0)
            .unwrap();
        let outcome = p
            .record_attempt(ProgressStatus::InProgress, None, 5, t1)
            .unwrap();

        assert!(!outcome.schedule_reviews);
        assert_eq!(p.attempt_count(), 2);
        assert_eq!(p.first_solved(), Some(t0));
        assert_eq!(p.last_attempt(), Some(t1));
    }

    #[test]
    fn mastery_override_out_of_range_rejected_without_mutation() {
        let mut p = fresh();
        let before = p.clone();

        let err = p
            .record_attempt(ProgressStatus::InProgress, Some(6), 5, fixed_now())
            .unwrap_err();

        assert_eq!(
            err,
            ProgressError::InvalidMasteryLevel {
                provided: 6,
                max: 5
            }
        );
        assert_eq!(p, before);
    }

    #[test]
    fn round_completions_drive_mastery_and_terminal_status() {
        let mut p = fresh();
        p.record_attempt(ProgressStatus::InProgress, None, 5, fixed_now())
            .unwrap();

        for completed_before in 0..4 {
            p.apply_round_completion(completed_before, 5);
            assert_eq!(p.mastery_level(), u8::try_from(completed_before).unwrap() + 1);
            assert_eq!(p.status(), ProgressStatus::InProgress);
        }

        p.apply_round_completion(4, 5);
        assert_eq!(p.mastery_level(), 5);
        assert_eq!(p.status(), ProgressStatus::Mastered);
    }

    #[test]
    fn mastery_level_is_capped_at_total_rounds() {
        let mut p = fresh();
        p.apply_round_completion(7, 5);
        assert_eq!(p.mastery_level(), 5);
        assert_eq!(p.status(), ProgressStatus::Mastered);
    }
}
