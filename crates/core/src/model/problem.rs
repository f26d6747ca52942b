use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ProblemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("invalid difficulty label: {0}")]
    InvalidDifficulty(String),

    #[error("problem title must not be empty")]
    EmptyTitle,
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// LeetCode difficulty rating for a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Storage and display label, matching the upstream catalogue strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parses a difficulty label.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::InvalidDifficulty` for anything other than
    /// `Easy`, `Medium`, or `Hard`.
    pub fn parse(label: &str) -> Result<Self, ProblemError> {
        match label {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(ProblemError::InvalidDifficulty(other.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// One entry of the fixed Hot 100 catalogue.
///
/// Problems are reference data: inserted once at startup and read-only
/// afterwards. Progress and review plans refer to them by `ProblemId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    id: ProblemId,
    leetcode_id: u32,
    title: String,
    title_cn: String,
    difficulty: Difficulty,
    category: String,
    url: Option<String>,
}

impl Problem {
    /// Builds a problem record.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::EmptyTitle` if either title is blank after
    /// trimming.
    pub fn new(
        id: ProblemId,
        leetcode_id: u32,
        title: impl Into<String>,
        title_cn: impl Into<String>,
        difficulty: Difficulty,
        category: impl Into<String>,
        url: Option<String>,
    ) -> Result<Self, ProblemError> {
        let title = title.into();
        let title_cn = title_cn.into();
        if title.trim().is_empty() || title_cn.trim().is_empty() {
            return Err(ProblemError::EmptyTitle);
        }
        Ok(Self {
            id,
            leetcode_id,
            title,
            title_cn,
            difficulty,
            category: category.into(),
            url,
        })
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        self.id
    }

    #[must_use]
    pub fn leetcode_id(&self) -> u32 {
        self.leetcode_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn title_cn(&self) -> &str {
        &self.title_cn
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_labels_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::parse(d.as_str()).unwrap(), d);
        }
    }

    #[test]
    fn difficulty_rejects_unknown_label() {
        let err = Difficulty::parse("Impossible").unwrap_err();
        assert!(matches!(err, ProblemError::InvalidDifficulty(_)));
    }

    #[test]
    fn problem_rejects_blank_title() {
        let err = Problem::new(
            ProblemId::new(1),
            1,
            "  ",
            "两数之和",
            Difficulty::Easy,
            "哈希",
            None,
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::EmptyTitle);
    }

    #[test]
    fn problem_exposes_fields() {
        let p = Problem::new(
            ProblemId::new(1),
            1,
            "Two Sum",
            "两数之和",
            Difficulty::Easy,
            "哈希",
            Some("https://leetcode.cn/problems/two-sum/".into()),
        )
        .unwrap();
        assert_eq!(p.leetcode_id(), 1);
        assert_eq!(p.title(), "Two Sum");
        assert_eq!(p.difficulty(), Difficulty::Easy);
        assert_eq!(p.url(), Some("https://leetcode.cn/problems/two-sum/"));
    }
}
