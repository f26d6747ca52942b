use async_trait::async_trait;
use hot100_core::catalog::{CatalogEntry, leetcode_url};
use hot100_core::model::{
    Difficulty, PlannedRound, Problem, ProblemId, Progress, ProgressId, ReviewId, ReviewPlan,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a problem row before storage assigns its id.
#[derive(Debug, Clone)]
pub struct NewProblemRecord {
    pub leetcode_id: u32,
    pub title: String,
    pub title_cn: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub url: Option<String>,
}

impl NewProblemRecord {
    /// Builds an insertable record from a static catalogue entry,
    /// deriving the leetcode.cn link from the English title.
    #[must_use]
    pub fn from_catalog(entry: &CatalogEntry) -> Self {
        Self {
            leetcode_id: entry.leetcode_id,
            title: entry.title.to_string(),
            title_cn: entry.title_cn.to_string(),
            difficulty: entry.difficulty,
            category: entry.category.to_string(),
            url: Some(leetcode_url(entry.title)),
        }
    }
}

/// Repository contract for the read-only problem catalogue.
#[async_trait]
pub trait ProblemRepository: Send + Sync {
    /// Insert a catalogue problem, returning its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` on a duplicate leetcode id.
    async fn insert_problem(&self, problem: NewProblemRecord) -> Result<ProblemId, StorageError>;

    /// Fetch a problem by id; `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_problem(&self, id: ProblemId) -> Result<Option<Problem>, StorageError>;

    /// All problems in catalogue order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_problems(&self) -> Result<Vec<Problem>, StorageError>;

    /// Number of problems stored; the seeding step uses this to stay
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn count_problems(&self) -> Result<u64, StorageError>;
}

/// Repository contract for per-problem progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert a fresh `not_started` progress row for a problem.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the problem already has one.
    async fn insert_progress(&self, problem_id: ProblemId) -> Result<ProgressId, StorageError>;

    /// Fetch progress by its own id; `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_progress(&self, id: ProgressId) -> Result<Option<Progress>, StorageError>;

    /// Fetch the progress owned by a problem; `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_by_problem(&self, problem_id: ProblemId)
    -> Result<Option<Progress>, StorageError>;

    /// Persist an updated progress record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the row does not exist.
    async fn update_progress(&self, progress: &Progress) -> Result<(), StorageError>;
}

/// Repository contract for review plan rows.
#[async_trait]
pub trait ReviewPlanRepository: Send + Sync {
    /// Atomically delete every pending round for `progress_id` and insert
    /// `rounds` in their place. Completed rows are never touched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the transaction cannot commit; the prior
    /// state is left intact in that case.
    async fn replace_pending(
        &self,
        progress_id: ProgressId,
        rounds: &[PlannedRound],
    ) -> Result<(), StorageError>;

    /// Fetch one plan row by id; `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_plan(&self, id: ReviewId) -> Result<Option<ReviewPlan>, StorageError>;

    /// All plan rows for one progress, ordered by round then date.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn plans_for_progress(
        &self,
        progress_id: ProgressId,
    ) -> Result<Vec<ReviewPlan>, StorageError>;

    /// Count of completed rounds for one progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn completed_count(&self, progress_id: ProgressId) -> Result<u32, StorageError>;

    /// Count of all rounds (pending and completed) for one progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn total_count(&self, progress_id: ProgressId) -> Result<u32, StorageError>;

    /// Every plan row, optionally filtered by completion state, ascending
    /// by scheduled date.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_plans(&self, completed: Option<bool>) -> Result<Vec<ReviewPlan>, StorageError>;
}

/// Atomic commits that span a progress row and its plan rows.
///
/// Both operations persist everything or nothing, so readers never
/// observe a recorded attempt without its generated plan, or a completed
/// round without its mastery update.
#[async_trait]
pub trait ProgressPersistence: Send + Sync {
    /// Persist an updated progress row and, when `rounds` is non-empty,
    /// replace its pending plan rows in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the progress row is missing;
    /// nothing is written in that case.
    async fn apply_attempt(
        &self,
        progress: &Progress,
        rounds: &[PlannedRound],
    ) -> Result<(), StorageError>;

    /// Persist `plan` and `progress` in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the plan does not belong to the
    /// progress, `StorageError::NotFound` if either row is missing.
    async fn apply_completion(
        &self,
        plan: &ReviewPlan,
        progress: &Progress,
    ) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY REPOSITORY ──────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    problems: Arc<Mutex<Vec<Problem>>>,
    progress: Arc<Mutex<HashMap<ProgressId, Progress>>>,
    plans: Arc<Mutex<HashMap<ReviewId, ReviewPlan>>>,
    next_problem_id: Arc<AtomicU64>,
    next_progress_id: Arc<AtomicU64>,
    next_review_id: Arc<AtomicU64>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            problems: Arc::new(Mutex::new(Vec::new())),
            progress: Arc::new(Mutex::new(HashMap::new())),
            plans: Arc::new(Mutex::new(HashMap::new())),
            next_problem_id: Arc::new(AtomicU64::new(1)),
            next_progress_id: Arc::new(AtomicU64::new(1)),
            next_review_id: Arc::new(AtomicU64::new(1)),
        }
    }

    fn sorted_by_date(mut plans: Vec<ReviewPlan>) -> Vec<ReviewPlan> {
        plans.sort_by(|a, b| {
            a.scheduled_date()
                .cmp(&b.scheduled_date())
                .then(a.id().cmp(&b.id()))
        });
        plans
    }
}

fn lock<'a, T>(m: &'a Mutex<T>) -> Result<std::sync::MutexGuard<'a, T>, StorageError> {
    m.lock().map_err(|e| StorageError::Connection(e.to_string()))
}

#[async_trait]
impl ProblemRepository for InMemoryRepository {
    async fn insert_problem(&self, problem: NewProblemRecord) -> Result<ProblemId, StorageError> {
        let mut guard = lock(&self.problems)?;
        if guard.iter().any(|p| p.leetcode_id() == problem.leetcode_id) {
            return Err(StorageError::Conflict);
        }
        let id = ProblemId::new(self.next_problem_id.fetch_add(1, Ordering::SeqCst));
        let stored = Problem::new(
            id,
            problem.leetcode_id,
            problem.title,
            problem.title_cn,
            problem.difficulty,
            problem.category,
            problem.url,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.push(stored);
        Ok(id)
    }

    async fn get_problem(&self, id: ProblemId) -> Result<Option<Problem>, StorageError> {
        let guard = lock(&self.problems)?;
        Ok(guard.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_problems(&self) -> Result<Vec<Problem>, StorageError> {
        let guard = lock(&self.problems)?;
        Ok(guard.clone())
    }

    async fn count_problems(&self) -> Result<u64, StorageError> {
        let guard = lock(&self.problems)?;
        Ok(guard.len() as u64)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn insert_progress(&self, problem_id: ProblemId) -> Result<ProgressId, StorageError> {
        let mut guard = lock(&self.progress)?;
        if guard.values().any(|p| p.problem_id() == problem_id) {
            return Err(StorageError::Conflict);
        }
        let id = ProgressId::new(self.next_progress_id.fetch_add(1, Ordering::SeqCst));
        guard.insert(id, Progress::new(id, problem_id));
        Ok(id)
    }

    async fn get_progress(&self, id: ProgressId) -> Result<Option<Progress>, StorageError> {
        let guard = lock(&self.progress)?;
        Ok(guard.get(&id).cloned())
    }

    async fn get_by_problem(
        &self,
        problem_id: ProblemId,
    ) -> Result<Option<Progress>, StorageError> {
        let guard = lock(&self.progress)?;
        Ok(guard.values().find(|p| p.problem_id() == problem_id).cloned())
    }

    async fn update_progress(&self, progress: &Progress) -> Result<(), StorageError> {
        let mut guard = lock(&self.progress)?;
        match guard.get_mut(&progress.id()) {
            Some(slot) => {
                *slot = progress.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }
}

#[async_trait]
impl ReviewPlanRepository for InMemoryRepository {
    async fn replace_pending(
        &self,
        progress_id: ProgressId,
        rounds: &[PlannedRound],
    ) -> Result<(), StorageError> {
        let mut guard = lock(&self.plans)?;
        guard.retain(|_, plan| plan.progress_id() != progress_id || plan.completed());
        for round in rounds {
            let id = ReviewId::new(self.next_review_id.fetch_add(1, Ordering::SeqCst));
            let plan = ReviewPlan::from_persisted(
                id,
                progress_id,
                round.scheduled_date,
                round.review_round,
                false,
                None,
            )
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
            guard.insert(id, plan);
        }
        Ok(())
    }

    async fn get_plan(&self, id: ReviewId) -> Result<Option<ReviewPlan>, StorageError> {
        let guard = lock(&self.plans)?;
        Ok(guard.get(&id).cloned())
    }

    async fn plans_for_progress(
        &self,
        progress_id: ProgressId,
    ) -> Result<Vec<ReviewPlan>, StorageError> {
        let guard = lock(&self.plans)?;
        let mut plans: Vec<ReviewPlan> = guard
            .values()
            .filter(|p| p.progress_id() == progress_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| {
            a.review_round()
                .cmp(&b.review_round())
                .then(a.id().cmp(&b.id()))
        });
        Ok(plans)
    }

    async fn completed_count(&self, progress_id: ProgressId) -> Result<u32, StorageError> {
        let guard = lock(&self.plans)?;
        let count = guard
            .values()
            .filter(|p| p.progress_id() == progress_id && p.completed())
            .count();
        u32::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn total_count(&self, progress_id: ProgressId) -> Result<u32, StorageError> {
        let guard = lock(&self.plans)?;
        let count = guard
            .values()
            .filter(|p| p.progress_id() == progress_id)
            .count();
        u32::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn list_plans(&self, completed: Option<bool>) -> Result<Vec<ReviewPlan>, StorageError> {
        let guard = lock(&self.plans)?;
        let plans = guard
            .values()
            .filter(|p| completed.is_none_or(|want| p.completed() == want))
            .cloned()
            .collect();
        Ok(Self::sorted_by_date(plans))
    }
}

#[async_trait]
impl ProgressPersistence for InMemoryRepository {
    async fn apply_attempt(
        &self,
        progress: &Progress,
        rounds: &[PlannedRound],
    ) -> Result<(), StorageError> {
        let mut plans = lock(&self.plans)?;
        let mut progress_map = lock(&self.progress)?;

        let slot = progress_map
            .get_mut(&progress.id())
            .ok_or(StorageError::NotFound)?;
        *slot = progress.clone();

        if !rounds.is_empty() {
            plans.retain(|_, plan| plan.progress_id() != progress.id() || plan.completed());
            for round in rounds {
                let id = ReviewId::new(self.next_review_id.fetch_add(1, Ordering::SeqCst));
                let plan = ReviewPlan::from_persisted(
                    id,
                    progress.id(),
                    round.scheduled_date,
                    round.review_round,
                    false,
                    None,
                )
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
                plans.insert(id, plan);
            }
        }
        Ok(())
    }

    async fn apply_completion(
        &self,
        plan: &ReviewPlan,
        progress: &Progress,
    ) -> Result<(), StorageError> {
        if plan.progress_id() != progress.id() {
            return Err(StorageError::Conflict);
        }

        let mut plans = lock(&self.plans)?;
        let mut progress_map = lock(&self.progress)?;

        let plan_slot = plans.get_mut(&plan.id()).ok_or(StorageError::NotFound)?;
        let progress_slot = progress_map
            .get_mut(&progress.id())
            .ok_or(StorageError::NotFound)?;

        *plan_slot = plan.clone();
        *progress_slot = progress.clone();
        Ok(())
    }
}

//
// ─── STORAGE AGGREGATE ─────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub problems: Arc<dyn ProblemRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub reviews: Arc<dyn ReviewPlanRepository>,
    pub persistence: Arc<dyn ProgressPersistence>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_in_memory(repo)
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let problems: Arc<dyn ProblemRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let reviews: Arc<dyn ReviewPlanRepository> = Arc::new(repo.clone());
        let persistence: Arc<dyn ProgressPersistence> = Arc::new(repo);
        Self {
            problems,
            progress,
            reviews,
            persistence,
        }
    }
}
