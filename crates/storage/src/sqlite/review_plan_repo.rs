use hot100_core::model::{PlannedRound, Progress, ProgressId, ReviewId, ReviewPlan};
use sqlx::Row;
use sqlx::sqlite::Sqlite;

use super::{
    SqliteRepository,
    mapping::{id_i64, map_plan_row, ser},
};
use crate::repository::{ProgressPersistence, ReviewPlanRepository, StorageError};

const PLAN_COLUMNS: &str =
    "id, progress_id, scheduled_date, review_round, completed, completed_at";

async fn count_where(
    repo: &SqliteRepository,
    progress_id: ProgressId,
    completed_only: bool,
) -> Result<u32, StorageError> {
    let sql = if completed_only {
        "SELECT COUNT(*) AS n FROM review_plans WHERE progress_id = ?1 AND completed = 1"
    } else {
        "SELECT COUNT(*) AS n FROM review_plans WHERE progress_id = ?1"
    };

    let row = sqlx::query(sql)
        .bind(id_i64("progress_id", progress_id.value())?)
        .fetch_one(repo.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    let n: i64 = row.try_get("n").map_err(ser)?;
    u32::try_from(n).map_err(|_| StorageError::Serialization("negative count".into()))
}

async fn fetch_plans(
    repo: &SqliteRepository,
    sql: &str,
) -> Result<Vec<ReviewPlan>, StorageError> {
    let rows = sqlx::query(sql)
        .fetch_all(repo.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    let mut plans = Vec::with_capacity(rows.len());
    for row in rows {
        plans.push(map_plan_row(&row)?);
    }
    Ok(plans)
}

async fn replace_pending_rounds(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    progress_id: i64,
    rounds: &[PlannedRound],
) -> Result<(), StorageError> {
    sqlx::query("DELETE FROM review_plans WHERE progress_id = ?1 AND completed = 0")
        .bind(progress_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    for round in rounds {
        sqlx::query(
            r"
            INSERT INTO review_plans (progress_id, scheduled_date, review_round, completed)
            VALUES (?1, ?2, ?3, 0)
            ",
        )
        .bind(progress_id)
        .bind(round.scheduled_date)
        .bind(i64::from(round.review_round))
        .execute(&mut **tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl ReviewPlanRepository for SqliteRepository {
    async fn replace_pending(
        &self,
        progress_id: ProgressId,
        rounds: &[PlannedRound],
    ) -> Result<(), StorageError> {
        let progress = id_i64("progress_id", progress_id.value())?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        replace_pending_rounds(&mut tx, progress, rounds).await?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_plan(&self, id: ReviewId) -> Result<Option<ReviewPlan>, StorageError> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM review_plans WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_i64("review_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_plan_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn plans_for_progress(
        &self,
        progress_id: ProgressId,
    ) -> Result<Vec<ReviewPlan>, StorageError> {
        let sql = format!(
            r"
            SELECT {PLAN_COLUMNS}
            FROM review_plans
            WHERE progress_id = ?1
            ORDER BY review_round ASC, id ASC
            "
        );
        let rows = sqlx::query(&sql)
            .bind(id_i64("progress_id", progress_id.value())?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut plans = Vec::with_capacity(rows.len());
        for row in rows {
            plans.push(map_plan_row(&row)?);
        }
        Ok(plans)
    }

    async fn completed_count(&self, progress_id: ProgressId) -> Result<u32, StorageError> {
        count_where(self, progress_id, true).await
    }

    async fn total_count(&self, progress_id: ProgressId) -> Result<u32, StorageError> {
        count_where(self, progress_id, false).await
    }

    async fn list_plans(&self, completed: Option<bool>) -> Result<Vec<ReviewPlan>, StorageError> {
        let sql = match completed {
            Some(true) => format!(
                "SELECT {PLAN_COLUMNS} FROM review_plans WHERE completed = 1 ORDER BY scheduled_date ASC"
            ),
            Some(false) => format!(
                "SELECT {PLAN_COLUMNS} FROM review_plans WHERE completed = 0 ORDER BY scheduled_date ASC"
            ),
            None => {
                format!("SELECT {PLAN_COLUMNS} FROM review_plans ORDER BY scheduled_date ASC")
            }
        };

        fetch_plans(self, &sql).await
    }
}

#[async_trait::async_trait]
impl ProgressPersistence for SqliteRepository {
    async fn apply_attempt(
        &self,
        progress: &Progress,
        rounds: &[PlannedRound],
    ) -> Result<(), StorageError> {
        let progress_id = id_i64("progress_id", progress.id().value())?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let res = sqlx::query(
            r"
            UPDATE progress SET
                status = ?2,
                attempt_count = ?3,
                mastery_level = ?4,
                first_solved = ?5,
                last_attempt = ?6
            WHERE id = ?1
            ",
        )
        .bind(progress_id)
        .bind(progress.status().as_str())
        .bind(i64::from(progress.attempt_count()))
        .bind(i64::from(progress.mastery_level()))
        .bind(progress.first_solved())
        .bind(progress.last_attempt())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        if !rounds.is_empty() {
            replace_pending_rounds(&mut tx, progress_id, rounds).await?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

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

        let review_id = id_i64("review_id", plan.id().value())?;
        let progress_id = id_i64("progress_id", progress.id().value())?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let res = sqlx::query(
            r"
            UPDATE review_plans SET
                completed = ?2,
                completed_at = ?3
            WHERE id = ?1
            ",
        )
        .bind(review_id)
        .bind(i64::from(plan.completed()))
        .bind(plan.completed_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let res = sqlx::query(
            r"
            UPDATE progress SET
                status = ?2,
                attempt_count = ?3,
                mastery_level = ?4,
                first_solved = ?5,
                last_attempt = ?6
            WHERE id = ?1
            ",
        )
        .bind(progress_id)
        .bind(progress.status().as_str())
        .bind(i64::from(progress.attempt_count()))
        .bind(i64::from(progress.mastery_level()))
        .bind(progress.first_solved())
        .bind(progress.last_attempt())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
