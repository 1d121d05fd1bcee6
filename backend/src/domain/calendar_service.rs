//! Calendar generation.
//!
//! Builds a year of consecutive days from a start date and a work-week
//! policy. Weekend flags are fixed here and never touched again by any
//! other operation.

use chrono::{Datelike, Duration, Local, NaiveDate};
use shared::{Calendar, Day};
use tracing::info;

/// Number of days in a generated calendar, regardless of leap years.
pub const GENERATED_SPAN_DAYS: i64 = 365;

/// Service that generates fresh calendars.
#[derive(Debug, Clone)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a calendar of 365 consecutive days starting at
    /// `start_date` (today when omitted). Always succeeds.
    ///
    /// Work-week policy: 5 makes Saturday and Sunday weekends, 6 makes
    /// only Sunday a weekend, any other value produces no weekends.
    pub fn generate(
        &self,
        start_date: Option<NaiveDate>,
        work_week: u8,
        leave_balance: i32,
    ) -> Calendar {
        let start = start_date.unwrap_or_else(|| Local::now().date_naive());
        info!(
            "Generating calendar: start={}, work_week={}, leave_balance={}",
            start, work_week, leave_balance
        );

        let days = (0..GENERATED_SPAN_DAYS)
            .map(|offset| {
                let date = start + Duration::days(offset);
                Day::new(date, is_weekend(date, work_week))
            })
            .collect();

        Calendar {
            leave_balance,
            days,
        }
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `date` is a weekend under the given work-week policy.
fn is_weekend(date: NaiveDate, work_week: u8) -> bool {
    // Monday = 0, ..., Saturday = 5, Sunday = 6.
    let weekday = date.weekday().num_days_from_monday();
    match work_week {
        5 => weekday >= 5,
        6 => weekday == 6,
        _ => false,
    }
}
