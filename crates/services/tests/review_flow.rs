//! End-to-end flow: seed, attempt, review, master.

use chrono::Duration;
use hot100_core::Clock;
use hot100_core::model::{ProgressStatus, ReviewId};
use hot100_core::time::fixed_now;
use services::config::Config;
use services::error::ReviewServiceError;
use services::progress_service::ProgressUpdate;
use services::AppServices;
use storage::repository::{ReviewPlanRepository, Storage, StorageError};

async fn seeded(clock: Clock) -> (AppServices, Storage) {
    let storage = Storage::in_memory();
    let services = AppServices::with_storage(&storage, clock, &Config::default());
    services.catalog.ensure_seeded().await.unwrap();
    (services, storage)
}

#[tokio::test]
async fn first_attempt_schedules_five_rounds() {
    let t0 = fixed_now();
    let (services, storage) = seeded(Clock::fixed(t0)).await;

    let problems = services.catalog.list_problems().await.unwrap();
    let two_sum = &problems[0];
    assert_eq!(two_sum.title(), "Two Sum");

    let view = services
        .progress
        .update_progress(
            two_sum.id(),
            ProgressUpdate {
                status: ProgressStatus::InProgress,
                mastery_level: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(view.progress.status(), ProgressStatus::InProgress);
    assert_eq!(view.progress.first_solved(), Some(t0));
    assert_eq!(view.total_reviews, 5);

    let plans = storage
        .reviews
        .plans_for_progress(view.progress.id())
        .await
        .unwrap();
    let offsets: Vec<i64> = plans
        .iter()
        .map(|p| (p.scheduled_date() - t0).num_days())
        .collect();
    assert_eq!(offsets, vec![1, 2, 4, 7, 15]);
    assert!(plans.iter().all(|p| p.is_pending()));
}

#[tokio::test]
async fn working_through_every_round_masters_the_problem() {
    let t0 = fixed_now();
    let (services, storage) = seeded(Clock::fixed(t0)).await;

    let problems = services.catalog.list_problems().await.unwrap();
    let view = services
        .progress
        .update_progress(
            problems[0].id(),
            ProgressUpdate {
                status: ProgressStatus::InProgress,
                mastery_level: None,
            },
        )
        .await
        .unwrap();
    let progress_id = view.progress.id();

    let plans = storage.reviews.plans_for_progress(progress_id).await.unwrap();
    for (i, plan) in plans.iter().enumerate() {
        let done = services.reviews.complete_review(plan.id()).await.unwrap();
        let expected_level = u8::try_from(i).unwrap() + 1;
        assert_eq!(done.progress.mastery_level(), expected_level);

        if expected_level < 5 {
            assert_eq!(done.progress.status(), ProgressStatus::InProgress);
        } else {
            assert_eq!(done.progress.status(), ProgressStatus::Mastered);
        }
    }

    let final_view = services.progress.get_progress(problems[0].id()).await.unwrap();
    assert_eq!(final_view.progress.status(), ProgressStatus::Mastered);
    assert_eq!(final_view.completed_reviews, 5);
    assert_eq!(final_view.total_reviews, 5);
}

#[tokio::test]
async fn queue_shows_round_one_the_next_day() {
    let t0 = fixed_now();
    let (services, storage) = seeded(Clock::fixed(t0)).await;

    let problems = services.catalog.list_problems().await.unwrap();
    services
        .progress
        .update_progress(
            problems[0].id(),
            ProgressUpdate {
                status: ProgressStatus::InProgress,
                mastery_level: None,
            },
        )
        .await
        .unwrap();

    let queue = services.reviews.today_reviews().await.unwrap();
    assert!(queue.today.is_empty());
    assert_eq!(queue.upcoming.len(), 4); // rounds at +1, +2, +4, +7 days

    // Same storage, one day later: round 1 is due today and nothing is
    // overdue yet.
    let services_at_t1 = AppServices::with_storage(
        &storage,
        Clock::fixed(t0 + Duration::days(1)),
        &Config::default(),
    );
    let queue = services_at_t1.reviews.today_reviews().await.unwrap();

    assert!(queue.overdue.is_empty());
    assert_eq!(queue.today.len(), 1);
    assert_eq!(queue.today[0].review_round, 1);
    let problem = queue.today[0].problem.as_ref().unwrap();
    assert_eq!(problem.title, "Two Sum");
}

#[tokio::test]
async fn completing_unknown_review_changes_nothing() {
    let t0 = fixed_now();
    let (services, storage) = seeded(Clock::fixed(t0)).await;

    let problems = services.catalog.list_problems().await.unwrap();
    let view = services
        .progress
        .update_progress(
            problems[0].id(),
            ProgressUpdate {
                status: ProgressStatus::InProgress,
                mastery_level: None,
            },
        )
        .await
        .unwrap();

    let err = services
        .reviews
        .complete_review(ReviewId::new(9999))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReviewServiceError::Storage(StorageError::NotFound)
    ));

    let plans = storage
        .reviews
        .plans_for_progress(view.progress.id())
        .await
        .unwrap();
    assert_eq!(plans.len(), 5);
    assert!(plans.iter().all(|p| p.is_pending()));

    let unchanged = services.progress.get_progress(problems[0].id()).await.unwrap();
    assert_eq!(unchanged.progress.mastery_level(), 0);
}
