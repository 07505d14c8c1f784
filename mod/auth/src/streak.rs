//! Login-streak computation.
//!
//! `record_login` is pure: it takes the stored login history plus "now" and
//! returns the new history and counters. The caller owns persistence, so a
//! same-day retry (or a lost racy write) degrades to a no-op on the next
//! read-recompute-write cycle instead of corrupting the counters.
//!
//! All truncation is to the UTC calendar day. The frontend may render in
//! local time, but two logins are "the same day" iff they share a UTC date.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreakError {
    #[error("invalid login date: {0}")]
    InvalidDate(String),
}

/// Result of recording a login event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    /// Canonical login history: deduplicated ascending calendar days.
    pub login_dates: Vec<NaiveDate>,
    /// Length of the consecutive-day run ending on the most recent login.
    pub current_streak: u32,
    /// Largest current_streak ever observed.
    pub max_streak: u32,
    /// False when today was already recorded — counters are returned
    /// exactly as passed in and nothing needs persisting.
    pub changed: bool,
}

/// Parse one stored login date: a plain `YYYY-MM-DD` day or an RFC 3339
/// timestamp (pre-canonical history), truncated to its UTC day.
fn parse_day(raw: &str) -> Result<NaiveDate, StreakError> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| StreakError::InvalidDate(raw.to_string()))
}

/// Record a login at `now` against the stored history.
///
/// The history is sorted and deduplicated by day unconditionally — callers
/// must not rely on stored order. At most one login counts per calendar
/// day: if today is already present, `changed` is false and the prior
/// counters come back untouched.
///
/// Otherwise today is added and the streak is recomputed by scanning the
/// ascending sequence backward from its last entry: a day-gap of exactly 1
/// extends the run, a larger gap ends it (the streak keeps whatever it
/// accumulated — it is not reset to zero). `max_streak` never decreases.
pub fn record_login(
    existing_dates: &[String],
    now: DateTime<Utc>,
    prior_current_streak: u32,
    prior_max_streak: u32,
) -> Result<StreakUpdate, StreakError> {
    let today = now.date_naive();

    let mut days = Vec::with_capacity(existing_dates.len() + 1);
    for raw in existing_dates {
        days.push(parse_day(raw)?);
    }
    days.sort_unstable();
    days.dedup();

    let pos = match days.binary_search(&today) {
        Ok(_) => {
            return Ok(StreakUpdate {
                login_dates: days,
                current_streak: prior_current_streak,
                max_streak: prior_max_streak,
                changed: false,
            });
        }
        Err(pos) => pos,
    };
    days.insert(pos, today);

    let mut streak = 1u32;
    for i in (1..days.len()).rev() {
        let gap = (days[i] - days[i - 1]).num_days();
        if gap == 1 {
            streak += 1;
        } else {
            // gap > 1 breaks the run; 0 cannot occur post-dedup
            break;
        }
    }

    Ok(StreakUpdate {
        login_dates: days,
        current_streak: streak,
        max_streak: prior_max_streak.max(streak),
        changed: true,
    })
}

/// Format a canonical day back to its stored `YYYY-MM-DD` form.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
