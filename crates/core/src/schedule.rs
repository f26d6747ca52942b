use chrono::{DateTime, Duration, Utc};

//
// ─── DAY WINDOW ────────────────────────────────────────────────────────────────
//

/// How far ahead the upcoming bucket looks, in days.
pub const UPCOMING_HORIZON_DAYS: i64 = 7;

/// Inclusive bounds of one UTC calendar day.
///
/// Bucket comparisons are whole-day comparisons, not point-in-time ones: a
/// round scheduled anywhere inside the current day counts as due today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Window covering the UTC day that contains `now`.
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        let start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        // Mirror the end-of-day sentinel of the upstream data: one
        // microsecond short of midnight.
        let end = start + Duration::days(1) - Duration::microseconds(1);
        Self { start, end }
    }

    /// Latest `scheduled_date` the upcoming bucket still shows.
    #[must_use]
    pub fn upcoming_until(&self) -> DateTime<Utc> {
        self.end + Duration::days(UPCOMING_HORIZON_DAYS)
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

//
// ─── BUCKETS ───────────────────────────────────────────────────────────────────
//

/// Display bucket for a pending review round, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewBucket {
    /// Due strictly before the start of the current day.
    Overdue,
    /// Due within the current day, bounds inclusive.
    Today,
    /// Due after the current day, up to and including seven days out.
    Upcoming,
}

/// Classifies a pending round's due date against the day containing `now`.
///
/// Returns `None` for rounds more than seven days out; those are not yet
/// visible in any bucket.
#[must_use]
pub fn classify(scheduled_date: DateTime<Utc>, now: DateTime<Utc>) -> Option<ReviewBucket> {
    let window = DayWindow::containing(now);
    if scheduled_date < window.start {
        Some(ReviewBucket::Overdue)
    } else if scheduled_date <= window.end {
        Some(ReviewBucket::Today)
    } else if scheduled_date <= window.upcoming_until() {
        Some(ReviewBucket::Upcoming)
    } else {
        None
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
