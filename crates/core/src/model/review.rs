use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{ProgressId, ReviewId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewPlanError {
    #[error("review round numbers are 1-based, got 0")]
    ZeroRound,

    #[error("completed_at must be set if and only if the plan is completed")]
    CompletionMismatch,
}

//
// ─── PLANNED ROUND ─────────────────────────────────────────────────────────────
//

/// One not-yet-persisted review round produced by the interval policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRound {
    pub review_round: u8,
    pub scheduled_date: DateTime<Utc>,
}

//
// ─── REVIEW PLAN ───────────────────────────────────────────────────────────────
//

/// A single scheduled review round for one progress record.
///
/// Pending rows are replaced wholesale when the plan is regenerated;
/// completed rows are history and survive regeneration, so round numbers
/// may repeat across generations in the completed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPlan {
    id: ReviewId,
    progress_id: ProgressId,
    scheduled_date: DateTime<Utc>,
    review_round: u8,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
}

impl ReviewPlan {
    /// Rebuilds a plan row from storage.
    ///
    /// # Errors
    ///
    /// Returns `ReviewPlanError::ZeroRound` for a 0 round number and
    /// `ReviewPlanError::CompletionMismatch` when `completed_at` and
    /// `completed` disagree.
    pub fn from_persisted(
        id: ReviewId,
        progress_id: ProgressId,
        scheduled_date: DateTime<Utc>,
        review_round: u8,
        completed: bool,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ReviewPlanError> {
        if review_round == 0 {
            return Err(ReviewPlanError::ZeroRound);
        }
        if completed != completed_at.is_some() {
            return Err(ReviewPlanError::CompletionMismatch);
        }
        Ok(Self {
            id,
            progress_id,
            scheduled_date,
            review_round,
            completed,
            completed_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> ReviewId {
        self.id
    }

    #[must_use]
    pub fn progress_id(&self) -> ProgressId {
        self.progress_id
    }

    #[must_use]
    pub fn scheduled_date(&self) -> DateTime<Utc> {
        self.scheduled_date
    }

    #[must_use]
    pub fn review_round(&self) -> u8 {
        self.review_round
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    /// Marks this round completed at `now`.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(now);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn pending_plan() -> ReviewPlan {
        ReviewPlan::from_persisted(
            ReviewId::new(1),
            ProgressId::new(1),
            fixed_now(),
            1,
            false,
            None,
        )
        .unwrap()
    }

    #[test]
    fn rejects_zero_round() {
        let err = ReviewPlan::from_persisted(
            ReviewId::new(1),
            ProgressId::new(1),
            fixed_now(),
            0,
            false,
            None,
        )
        .unwrap_err();
        assert_eq!(err, ReviewPlanError::ZeroRound);
    }

    #[test]
    fn rejects_completion_mismatch() {
        let err = ReviewPlan::from_persisted(
            ReviewId::new(1),
            ProgressId::new(1),
            fixed_now(),
            1,
            true,
            None,
        )
        .unwrap_err();
        assert_eq!(err, ReviewPlanError::CompletionMismatch);

        let err = ReviewPlan::from_persisted(
            ReviewId::new(1),
            ProgressId::new(1),
            fixed_now(),
            1,
            false,
            Some(fixed_now()),
        )
        .unwrap_err();
        assert_eq!(err, ReviewPlanError::CompletionMismatch);
    }

    #[test]
    fn complete_sets_timestamp() {
        let mut plan = pending_plan();
        assert!(plan.is_pending());

        let done_at = fixed_now() + chrono::Duration::days(1);
        plan.complete(done_at);

        assert!(plan.completed());
        assert_eq!(plan.completed_at(), Some(done_at));
        assert!(!plan.is_pending());
    }
}
