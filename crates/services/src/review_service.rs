//! Review queue queries and round completion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use hot100_core::Clock;
use hot100_core::model::{
    Difficulty, Problem, Progress, ProgressId, ReviewId, ReviewPlan,
};
use hot100_core::policy::IntervalPolicy;
use hot100_core::schedule::{ReviewBucket, classify};
use storage::repository::{
    ProblemRepository, ProgressPersistence, ProgressRepository, ReviewPlanRepository,
    StorageError,
};

use crate::error::ReviewServiceError;

//
// ─── QUEUE ITEMS ───────────────────────────────────────────────────────────────
//

/// Problem display fields attached to a queue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemSummary {
    pub id: u64,
    pub leetcode_id: u32,
    pub title: String,
    pub title_cn: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub url: Option<String>,
}

impl ProblemSummary {
    fn from_problem(problem: &Problem) -> Self {
        Self {
            id: problem.id().value(),
            leetcode_id: problem.leetcode_id(),
            title: problem.title().to_string(),
            title_cn: problem.title_cn().to_string(),
            difficulty: problem.difficulty(),
            category: problem.category().to_string(),
            url: problem.url().map(str::to_string),
        }
    }
}

/// One review plan row enriched with its problem, ready for display.
///
/// `problem` is `None` when the owning progress or problem row has gone
/// missing; the queue entry is still shown rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewQueueItem {
    pub id: u64,
    pub progress_id: u64,
    pub scheduled_date: DateTime<Utc>,
    pub review_round: u8,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub problem: Option<ProblemSummary>,
}

impl ReviewQueueItem {
    fn from_parts(plan: &ReviewPlan, problem: Option<ProblemSummary>) -> Self {
        Self {
            id: plan.id().value(),
            progress_id: plan.progress_id().value(),
            scheduled_date: plan.scheduled_date(),
            review_round: plan.review_round(),
            completed: plan.completed(),
            completed_at: plan.completed_at(),
            problem,
        }
    }
}

/// The three display buckets of the review queue, each ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewQueue {
    pub overdue: Vec<ReviewQueueItem>,
    pub today: Vec<ReviewQueueItem>,
    pub upcoming: Vec<ReviewQueueItem>,
}

/// Result of completing one review round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedReview {
    pub review: ReviewQueueItem,
    pub progress: Progress,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Serves the review queue and commits round completions.
#[derive(Clone)]
pub struct ReviewService {
    clock: Clock,
    policy: IntervalPolicy,
    problems: Arc<dyn ProblemRepository>,
    progress: Arc<dyn ProgressRepository>,
    reviews: Arc<dyn ReviewPlanRepository>,
    persistence: Arc<dyn ProgressPersistence>,
}

impl ReviewService {
    #[must_use]
    pub fn new(
        clock: Clock,
        policy: IntervalPolicy,
        problems: Arc<dyn ProblemRepository>,
        progress: Arc<dyn ProgressRepository>,
        reviews: Arc<dyn ReviewPlanRepository>,
        persistence: Arc<dyn ProgressPersistence>,
    ) -> Self {
        Self {
            clock,
            policy,
            problems,
            progress,
            reviews,
            persistence,
        }
    }

    /// Regenerates the review plan for one progress record at "now".
    ///
    /// Pending rounds are replaced wholesale; completed rounds survive.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) if the progress record
    /// does not exist.
    pub async fn generate_review_plans(
        &self,
        progress_id: ProgressId,
    ) -> Result<Vec<ReviewQueueItem>, ReviewServiceError> {
        let progress = self
            .progress
            .get_progress(progress_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let rounds = self.policy.plan_rounds(self.clock.now());
        self.reviews.replace_pending(progress.id(), &rounds).await?;

        let plans = self.reviews.plans_for_progress(progress.id()).await?;
        self.enrich_all(plans).await
    }

    /// Marks one round done and advances mastery in the same commit.
    ///
    /// The completed-round count is read before the write so the level
    /// formula counts this round exactly once, even if the row was somehow
    /// already completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) if the review id or its
    /// progress record does not exist; nothing is mutated in that case.
    pub async fn complete_review(
        &self,
        review_id: ReviewId,
    ) -> Result<CompletedReview, ReviewServiceError> {
        let mut plan = self
            .reviews
            .get_plan(review_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        let mut progress = self
            .progress
            .get_progress(plan.progress_id())
            .await?
            .ok_or(StorageError::NotFound)?;

        let mut completed_before = self.reviews.completed_count(plan.progress_id()).await?;
        if plan.completed() {
            // Re-completing an already-done row must not double count it.
            completed_before = completed_before.saturating_sub(1);
        }

        plan.complete(self.clock.now());
        progress.apply_round_completion(completed_before, self.policy.rounds());

        self.persistence.apply_completion(&plan, &progress).await?;

        let problem = self.summary_for(&progress).await?;
        Ok(CompletedReview {
            review: ReviewQueueItem::from_parts(&plan, problem),
            progress,
        })
    }

    /// The review queue relative to the current day: overdue, today, and
    /// the next seven days of upcoming rounds.
    ///
    /// All three buckets are classified from one pending snapshot, read
    /// in ascending date order, so a regeneration racing this query can
    /// never put the same round in two buckets.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` (wrapped) on adapter failures.
    pub async fn today_reviews(&self) -> Result<ReviewQueue, ReviewServiceError> {
        let now = self.clock.now();
        let pending = self.reviews.list_plans(Some(false)).await?;

        let mut queue = ReviewQueue::default();
        for item in self.enrich_all(pending).await? {
            match classify(item.scheduled_date, now) {
                Some(ReviewBucket::Overdue) => queue.overdue.push(item),
                Some(ReviewBucket::Today) => queue.today.push(item),
                Some(ReviewBucket::Upcoming) => queue.upcoming.push(item),
                None => {}
            }
        }
        Ok(queue)
    }

    /// Every plan row, optionally filtered by completion state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` (wrapped) on adapter failures.
    pub async fn list_reviews(
        &self,
        completed: Option<bool>,
    ) -> Result<Vec<ReviewQueueItem>, ReviewServiceError> {
        let plans = self.reviews.list_plans(completed).await?;
        self.enrich_all(plans).await
    }

    async fn enrich_all(
        &self,
        plans: Vec<ReviewPlan>,
    ) -> Result<Vec<ReviewQueueItem>, ReviewServiceError> {
        let mut items = Vec::with_capacity(plans.len());
        for plan in plans {
            let problem = match self.progress.get_progress(plan.progress_id()).await? {
                Some(progress) => self.summary_for(&progress).await?,
                None => None,
            };
            items.push(ReviewQueueItem::from_parts(&plan, problem));
        }
        Ok(items)
    }

    async fn summary_for(
        &self,
        progress: &Progress,
    ) -> Result<Option<ProblemSummary>, ReviewServiceError> {
        let problem = self.problems.get_problem(progress.problem_id()).await?;
        Ok(problem.as_ref().map(ProblemSummary::from_problem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use hot100_core::catalog::HOT_100;
    use hot100_core::model::ProgressStatus;
    use hot100_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, NewProblemRecord};

    fn service(repo: &InMemoryRepository, clock: Clock) -> ReviewService {
        ReviewService::new(
            clock,
            IntervalPolicy::default(),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    async fn seeded_progress(repo: &InMemoryRepository) -> ProgressId {
        let problem_id = repo
            .insert_problem(NewProblemRecord::from_catalog(&HOT_100[0]))
            .await
            .unwrap();
        repo.insert_progress(problem_id).await.unwrap()
    }

    #[tokio::test]
    async fn generate_for_unknown_progress_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());

        let err = service
            .generate_review_plans(ProgressId::new(42))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReviewServiceError::Storage(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn generate_produces_enriched_rounds() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;

        let items = service.generate_review_plans(progress_id).await.unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(items[0].review_round, 1);
        assert_eq!(items[0].scheduled_date, fixed_now() + Duration::days(1));
        let problem = items[0].problem.as_ref().unwrap();
        assert_eq!(problem.title, "Two Sum");
    }

    #[tokio::test]
    async fn regenerating_without_completions_is_idempotent() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;

        let first = service.generate_review_plans(progress_id).await.unwrap();
        let second = service.generate_review_plans(progress_id).await.unwrap();

        let key = |items: &[ReviewQueueItem]| {
            items
                .iter()
                .map(|i| (i.review_round, i.scheduled_date))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&first), key(&second));
        assert_eq!(
            second.iter().map(|i| i.review_round).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        // No accumulation: still exactly one pending set.
        assert_eq!(repo.total_count(progress_id).await.unwrap(), 5);
        assert_eq!(repo.completed_count(progress_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn complete_review_advances_mastery() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;
        service.generate_review_plans(progress_id).await.unwrap();

        let plans = repo.plans_for_progress(progress_id).await.unwrap();
        let done = service.complete_review(plans[0].id()).await.unwrap();

        assert!(done.review.completed);
        assert_eq!(done.review.completed_at, Some(fixed_now()));
        assert_eq!(done.progress.mastery_level(), 1);
        assert_eq!(done.progress.status(), ProgressStatus::NotStarted);

        let stored = repo.get_progress(progress_id).await.unwrap().unwrap();
        assert_eq!(stored.mastery_level(), 1);
    }

    #[tokio::test]
    async fn completing_final_round_masters_the_problem() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;
        service.generate_review_plans(progress_id).await.unwrap();

        let plans = repo.plans_for_progress(progress_id).await.unwrap();
        for (i, plan) in plans.iter().enumerate() {
            let done = service.complete_review(plan.id()).await.unwrap();
            assert_eq!(done.progress.mastery_level(), u8::try_from(i).unwrap() + 1);
        }

        let stored = repo.get_progress(progress_id).await.unwrap().unwrap();
        assert_eq!(stored.status(), ProgressStatus::Mastered);
        assert_eq!(stored.mastery_level(), 5);
    }

    #[tokio::test]
    async fn recompleting_a_round_does_not_double_count() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;
        service.generate_review_plans(progress_id).await.unwrap();

        let plans = repo.plans_for_progress(progress_id).await.unwrap();
        service.complete_review(plans[0].id()).await.unwrap();
        let again = service.complete_review(plans[0].id()).await.unwrap();

        assert_eq!(again.progress.mastery_level(), 1);
        assert_eq!(again.progress.status(), ProgressStatus::NotStarted);
    }

    #[tokio::test]
    async fn complete_unknown_review_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;
        service.generate_review_plans(progress_id).await.unwrap();

        let err = service
            .complete_review(ReviewId::new(999))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReviewServiceError::Storage(StorageError::NotFound)
        ));

        // Nothing changed.
        let plans = repo.plans_for_progress(progress_id).await.unwrap();
        assert!(plans.iter().all(ReviewPlan::is_pending));
    }

    #[tokio::test]
    async fn queue_buckets_split_on_day_boundaries() {
        let repo = InMemoryRepository::new();
        let progress_id = seeded_progress(&repo).await;

        let generated_at = fixed_now();
        let generator = service(&repo, Clock::fixed(generated_at));
        generator.generate_review_plans(progress_id).await.unwrap();

        // Query on day +4: rounds 1 (+1d) and 2 (+2d) are overdue, round 3
        // (+4d) is due today, round 4 (+7d) is upcoming.
        let queried_at = generated_at + Duration::days(4);
        let queue = service(&repo, Clock::fixed(queried_at))
            .today_reviews()
            .await
            .unwrap();

        assert_eq!(
            queue.overdue.iter().map(|i| i.review_round).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(
            queue.today.iter().map(|i| i.review_round).collect::<Vec<_>>(),
            vec![3]
        );
        assert_eq!(
            queue
                .upcoming
                .iter()
                .map(|i| i.review_round)
                .collect::<Vec<_>>(),
            vec![4]
        );
        // Round 5 (+15d) is beyond the seven-day horizon.
    }

    #[tokio::test]
    async fn completed_rounds_leave_the_queue() {
        let repo = InMemoryRepository::new();
        let progress_id = seeded_progress(&repo).await;

        let generated_at = fixed_now();
        let generator = service(&repo, Clock::fixed(generated_at));
        generator.generate_review_plans(progress_id).await.unwrap();

        let plans = repo.plans_for_progress(progress_id).await.unwrap();
        generator.complete_review(plans[0].id()).await.unwrap();

        let queue = service(&repo, Clock::fixed(generated_at + Duration::days(4)))
            .today_reviews()
            .await
            .unwrap();
        assert_eq!(
            queue.overdue.iter().map(|i| i.review_round).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[tokio::test]
    async fn list_reviews_filters_by_completion() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, fixed_clock());
        let progress_id = seeded_progress(&repo).await;
        service.generate_review_plans(progress_id).await.unwrap();

        let plans = repo.plans_for_progress(progress_id).await.unwrap();
        service.complete_review(plans[0].id()).await.unwrap();

        assert_eq!(service.list_reviews(None).await.unwrap().len(), 5);
        assert_eq!(service.list_reviews(Some(true)).await.unwrap().len(), 1);
        assert_eq!(service.list_reviews(Some(false)).await.unwrap().len(), 4);
    }
}
