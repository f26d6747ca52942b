//! One-time seeding of the Hot 100 catalogue.

use std::sync::Arc;

use hot100_core::catalog::HOT_100;
use hot100_core::model::Problem;
use storage::repository::{NewProblemRecord, ProblemRepository, ProgressRepository};

use crate::error::CatalogError;

/// What a seeding pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of problems inserted; 0 means the catalogue was already
    /// present and nothing was touched.
    pub inserted: usize,
}

/// Seeds and serves the fixed problem catalogue.
#[derive(Clone)]
pub struct CatalogService {
    problems: Arc<dyn ProblemRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self { problems, progress }
    }

    /// Inserts the catalogue and a `not_started` progress row per problem,
    /// unless problems already exist. Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` (wrapped) on adapter failures.
    pub async fn ensure_seeded(&self) -> Result<SeedReport, CatalogError> {
        if self.problems.count_problems().await? > 0 {
            return Ok(SeedReport { inserted: 0 });
        }

        for entry in HOT_100 {
            let problem_id = self
                .problems
                .insert_problem(NewProblemRecord::from_catalog(entry))
                .await?;
            self.progress.insert_progress(problem_id).await?;
        }

        Ok(SeedReport {
            inserted: HOT_100.len(),
        })
    }

    /// All problems in catalogue order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` (wrapped) on adapter failures.
    pub async fn list_problems(&self) -> Result<Vec<Problem>, CatalogError> {
        Ok(self.problems.list_problems().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> CatalogService {
        CatalogService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn seeds_one_hundred_problems_with_progress() {
        let repo = InMemoryRepository::new();
        let report = service(&repo).ensure_seeded().await.unwrap();

        assert_eq!(report.inserted, 100);
        let problems = repo.list_problems().await.unwrap();
        assert_eq!(problems.len(), 100);

        for problem in &problems {
            let progress = repo.get_by_problem(problem.id()).await.unwrap();
            assert!(progress.is_some());
        }
    }

    #[tokio::test]
    async fn reseeding_is_a_no_op() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        service.ensure_seeded().await.unwrap();
        let report = service.ensure_seeded().await.unwrap();

        assert_eq!(report.inserted, 0);
        assert_eq!(repo.count_problems().await.unwrap(), 100);
    }
}
