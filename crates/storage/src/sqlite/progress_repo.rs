use hot100_core::model::{ProblemId, Progress, ProgressId, ProgressStatus};

use super::{
    SqliteRepository,
    mapping::{id_i64, map_progress_row, progress_id_from_i64},
};
use crate::repository::{ProgressRepository, StorageError};

const PROGRESS_COLUMNS: &str =
    "id, problem_id, status, attempt_count, mastery_level, first_solved, last_attempt";

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn insert_progress(&self, problem_id: ProblemId) -> Result<ProgressId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO progress (problem_id, status, attempt_count, mastery_level)
            VALUES (?1, ?2, 0, 0)
            ",
        )
        .bind(id_i64("problem_id", problem_id.value())?)
        .bind(ProgressStatus::NotStarted.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => StorageError::Connection(e.to_string()),
        })?;

        progress_id_from_i64(res.last_insert_rowid())
    }

    async fn get_progress(&self, id: ProgressId) -> Result<Option<Progress>, StorageError> {
        let sql = format!("SELECT {PROGRESS_COLUMNS} FROM progress WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_i64("progress_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_progress_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn get_by_problem(
        &self,
        problem_id: ProblemId,
    ) -> Result<Option<Progress>, StorageError> {
        let sql = format!("SELECT {PROGRESS_COLUMNS} FROM progress WHERE problem_id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_i64("problem_id", problem_id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_progress_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn update_progress(&self, progress: &Progress) -> Result<(), StorageError> {
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
        .bind(id_i64("progress_id", progress.id().value())?)
        .bind(progress.status().as_str())
        .bind(i64::from(progress.attempt_count()))
        .bind(i64::from(progress.mastery_level()))
        .bind(progress.first_solved())
        .bind(progress.last_attempt())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
