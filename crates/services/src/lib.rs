#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod progress_service;
pub mod review_service;

pub use hot100_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogService, SeedReport};
pub use config::Config;
pub use error::{
    AppServicesError, CatalogError, ConfigError, ProgressServiceError, ReviewServiceError,
};
pub use progress_service::{ProgressService, ProgressUpdate, ProgressView};
pub use review_service::{
    CompletedReview, ProblemSummary, ReviewQueue, ReviewQueueItem, ReviewService,
};
