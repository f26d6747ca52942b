mod ids;
mod problem;
mod progress;
mod review;

pub use ids::{ParseIdError, ProblemId, ProgressId, ReviewId};
pub use problem::{Difficulty, Problem, ProblemError};
pub use progress::{AttemptOutcome, Progress, ProgressError, ProgressStatus};
pub use review::{PlannedRound, ReviewPlan, ReviewPlanError};
