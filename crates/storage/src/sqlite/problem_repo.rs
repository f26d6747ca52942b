use hot100_core::model::{Problem, ProblemId};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{id_i64, map_problem_row, problem_id_from_i64, ser},
};
use crate::repository::{NewProblemRecord, ProblemRepository, StorageError};

#[async_trait::async_trait]
impl ProblemRepository for SqliteRepository {
    async fn insert_problem(&self, problem: NewProblemRecord) -> Result<ProblemId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO problems (leetcode_id, title, title_cn, difficulty, category, url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(i64::from(problem.leetcode_id))
        .bind(problem.title)
        .bind(problem.title_cn)
        .bind(problem.difficulty.as_str())
        .bind(problem.category)
        .bind(problem.url)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => StorageError::Connection(e.to_string()),
        })?;

        problem_id_from_i64(res.last_insert_rowid())
    }

    async fn get_problem(&self, id: ProblemId) -> Result<Option<Problem>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, leetcode_id, title, title_cn, difficulty, category, url
            FROM problems
            WHERE id = ?1
            ",
        )
        .bind(id_i64("problem_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_problem_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_problems(&self) -> Result<Vec<Problem>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, leetcode_id, title, title_cn, difficulty, category, url
            FROM problems
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut problems = Vec::with_capacity(rows.len());
        for row in rows {
            problems.push(map_problem_row(&row)?);
        }
        Ok(problems)
    }

    async fn count_problems(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM problems")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(|_| StorageError::Serialization("negative count".into()))
    }
}
