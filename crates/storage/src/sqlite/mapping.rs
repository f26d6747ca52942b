use hot100_core::model::{
    Difficulty, Problem, ProblemId, Progress, ProgressId, ProgressStatus, ReviewId, ReviewPlan,
};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn problem_id_from_i64(v: i64) -> Result<ProblemId, StorageError> {
    Ok(ProblemId::new(i64_to_u64("problem_id", v)?))
}

pub(crate) fn progress_id_from_i64(v: i64) -> Result<ProgressId, StorageError> {
    Ok(ProgressId::new(i64_to_u64("progress_id", v)?))
}

pub(crate) fn review_id_from_i64(v: i64) -> Result<ReviewId, StorageError> {
    Ok(ReviewId::new(i64_to_u64("review_id", v)?))
}

pub(crate) fn map_problem_row(row: &sqlx::sqlite::SqliteRow) -> Result<Problem, StorageError> {
    let leetcode_id_i64: i64 = row.try_get("leetcode_id").map_err(ser)?;
    let leetcode_id = u32::try_from(leetcode_id_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid leetcode_id: {leetcode_id_i64}")))?;

    let difficulty_str: String = row.try_get("difficulty").map_err(ser)?;
    let difficulty = Difficulty::parse(&difficulty_str).map_err(ser)?;

    Problem::new(
        problem_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        leetcode_id,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("title_cn").map_err(ser)?,
        difficulty,
        row.try_get::<String, _>("category").map_err(ser)?,
        row.try_get::<Option<String>, _>("url").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<Progress, StorageError> {
    let status_str: String = row.try_get("status").map_err(ser)?;
    let status = ProgressStatus::parse(&status_str).map_err(ser)?;

    let attempt_count_i64: i64 = row.try_get("attempt_count").map_err(ser)?;
    let attempt_count = u32::try_from(attempt_count_i64).map_err(|_| {
        StorageError::Serialization(format!("invalid attempt_count: {attempt_count_i64}"))
    })?;

    let mastery_i64: i64 = row.try_get("mastery_level").map_err(ser)?;
    let mastery_level = u8::try_from(mastery_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid mastery_level: {mastery_i64}")))?;

    Ok(Progress::from_persisted(
        progress_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        problem_id_from_i64(row.try_get::<i64, _>("problem_id").map_err(ser)?)?,
        status,
        attempt_count,
        mastery_level,
        row.try_get("first_solved").map_err(ser)?,
        row.try_get("last_attempt").map_err(ser)?,
    ))
}

pub(crate) fn map_plan_row(row: &sqlx::sqlite::SqliteRow) -> Result<ReviewPlan, StorageError> {
    let round_i64: i64 = row.try_get("review_round").map_err(ser)?;
    let review_round = u8::try_from(round_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid review_round: {round_i64}")))?;

    let completed: i64 = row.try_get("completed").map_err(ser)?;

    ReviewPlan::from_persisted(
        review_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        progress_id_from_i64(row.try_get::<i64, _>("progress_id").map_err(ser)?)?,
        row.try_get("scheduled_date").map_err(ser)?,
        review_round,
        completed != 0,
        row.try_get("completed_at").map_err(ser)?,
    )
    .map_err(ser)
}
