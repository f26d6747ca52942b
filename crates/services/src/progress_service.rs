//! Progress updates and the attempt-driven side of the state machine.

use std::sync::Arc;

use hot100_core::Clock;
use hot100_core::model::{ProblemId, Progress, ProgressStatus};
use hot100_core::policy::IntervalPolicy;
use storage::repository::{
    ProgressPersistence, ProgressRepository, ReviewPlanRepository, StorageError,
};

use crate::error::ProgressServiceError;

/// Caller-supplied fields of one progress update.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub status: ProgressStatus,
    /// Manual mastery override; `None` leaves the derived level alone.
    pub mastery_level: Option<u8>,
}

/// A progress record together with its review round counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub progress: Progress,
    pub completed_reviews: u32,
    pub total_reviews: u32,
}

/// Records attempts against problems and keeps review plans in step.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    policy: IntervalPolicy,
    progress: Arc<dyn ProgressRepository>,
    reviews: Arc<dyn ReviewPlanRepository>,
    persistence: Arc<dyn ProgressPersistence>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        policy: IntervalPolicy,
        progress: Arc<dyn ProgressRepository>,
        reviews: Arc<dyn ReviewPlanRepository>,
        persistence: Arc<dyn ProgressPersistence>,
    ) -> Self {
        Self {
            clock,
            policy,
            progress,
            reviews,
            persistence,
        }
    }

    /// Applies an update to the progress owned by `problem_id`.
    ///
    /// Validation happens before any write, so a rejected update leaves
    /// both the progress row and its plan rows untouched. The first
    /// transition out of `not_started` into `in_progress` generates the
    /// full review plan; later updates never regenerate it. Progress row
    /// and generated rounds commit in one transaction, so a storage fault
    /// never consumes the scheduling trigger without writing the plan.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) if the problem has no
    /// progress row, `ProgressError::InvalidMasteryLevel` for an
    /// out-of-range override.
    pub async fn update_progress(
        &self,
        problem_id: ProblemId,
        update: ProgressUpdate,
    ) -> Result<ProgressView, ProgressServiceError> {
        let mut progress = self
            .progress
            .get_by_problem(problem_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let now = self.clock.now();
        let outcome = progress.record_attempt(
            update.status,
            update.mastery_level,
            self.policy.rounds(),
            now,
        )?;

        let rounds = if outcome.schedule_reviews {
            self.policy.plan_rounds(now)
        } else {
            Vec::new()
        };
        self.persistence.apply_attempt(&progress, &rounds).await?;

        self.view(progress).await
    }

    /// Fetches the progress owned by `problem_id` with its round counters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) if the problem has no
    /// progress row.
    pub async fn get_progress(
        &self,
        problem_id: ProblemId,
    ) -> Result<ProgressView, ProgressServiceError> {
        let progress = self
            .progress
            .get_by_problem(problem_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        self.view(progress).await
    }

    async fn view(&self, progress: Progress) -> Result<ProgressView, ProgressServiceError> {
        let completed_reviews = self.reviews.completed_count(progress.id()).await?;
        let mut total_reviews = self.reviews.total_count(progress.id()).await?;
        if total_reviews == 0 {
            // No plan generated yet; report the policy's round count so the
            // "x of N" display is stable from day one.
            total_reviews = u32::from(self.policy.rounds());
        }
        Ok(ProgressView {
            progress,
            completed_reviews,
            total_reviews,
        })
    }
}
