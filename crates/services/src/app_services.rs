//! Wiring of storage and services into one application handle.

use hot100_core::Clock;
use storage::repository::Storage;

use crate::catalog_service::CatalogService;
use crate::config::Config;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::review_service::ReviewService;

/// Everything the outer layers need, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService,
    pub progress: ProgressService,
    pub reviews: ReviewService,
}

impl AppServices {
    /// Wires services over an already-built storage backend. Seeding is
    /// the caller's concern here; `new_sqlite` does it automatically.
    #[must_use]
    pub fn with_storage(storage: &Storage, clock: Clock, config: &Config) -> Self {
        let catalog = CatalogService::new(storage.problems.clone(), storage.progress.clone());
        let progress = ProgressService::new(
            clock,
            config.intervals.clone(),
            storage.progress.clone(),
            storage.reviews.clone(),
            storage.persistence.clone(),
        );
        let reviews = ReviewService::new(
            clock,
            config.intervals.clone(),
            storage.problems.clone(),
            storage.progress.clone(),
            storage.reviews.clone(),
            storage.persistence.clone(),
        );
        Self {
            catalog,
            progress,
            reviews,
        }
    }

    /// Connects to SQLite, runs migrations, seeds the catalogue, and wires
    /// every service.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened,
    /// migrated, or seeded.
    pub async fn new_sqlite(config: &Config, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.database_url).await?;
        let services = Self::with_storage(&storage, clock, config);
        services.catalog.ensure_seeded().await?;
        Ok(services)
    }

    /// In-memory variant for tests and prototyping, seeded and ready.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if seeding fails.
    pub async fn new_in_memory(config: &Config, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::in_memory();
        let services = Self::with_storage(&storage, clock, config);
        services.catalog.ensure_seeded().await?;
        Ok(services)
    }
}
