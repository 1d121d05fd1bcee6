use chrono::NaiveDate;

/// Reasons an operation can be rejected.
///
/// Every rejection is a full rollback: the calendar passed to the
/// operation is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    #[error("invalid range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error("insufficient leave balance: {requested} days requested, {available} available")]
    InsufficientBalance { requested: i32, available: i32 },
    #[error("unsupported holiday country: {0}")]
    UnsupportedCountry(String),
    #[error("no public holiday recorded on {0}")]
    NoHolidayOnDate(NaiveDate),
    #[error("date {0} is outside the calendar span")]
    DateNotFound(NaiveDate),
}
