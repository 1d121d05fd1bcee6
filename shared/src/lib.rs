use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single civil day in a leave calendar.
///
/// The date is the day's identity and never changes after generation.
/// Flag fields default to `false` / `""` so that clients may omit them
/// when posting a calendar back to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    /// Set once at generation time from the work-week policy; never
    /// mutated by holiday or leave operations.
    #[serde(default)]
    pub is_weekend: bool,
    #[serde(default)]
    pub is_public_holiday: bool,
    /// Non-empty exactly when `is_public_holiday` is true.
    #[serde(default)]
    pub public_holiday_name: String,
    #[serde(default)]
    pub is_planned_leave: bool,
    /// Cleared whenever `is_planned_leave` becomes false.
    #[serde(default)]
    pub leave_reason: String,
    #[serde(default)]
    pub is_preferred_leave_period: bool,
    #[serde(default)]
    pub is_unpreferred_leave_period: bool,
    /// Reserved for the leave-suggestion feature; no core operation
    /// mutates it.
    #[serde(default)]
    pub is_recommended_leave: bool,
}

impl Day {
    /// Create a blank day. Only the generator should call this.
    pub fn new(date: NaiveDate, is_weekend: bool) -> Self {
        Self {
            date,
            is_weekend,
            is_public_holiday: false,
            public_holiday_name: String::new(),
            is_planned_leave: false,
            leave_reason: String::new(),
            is_preferred_leave_period: false,
            is_unpreferred_leave_period: false,
            is_recommended_leave: false,
        }
    }

    /// A day is eligible for leave and preference operations when it is
    /// neither a weekend nor a public holiday.
    pub fn is_eligible(&self) -> bool {
        !self.is_weekend && !self.is_public_holiday
    }

    /// Record a public holiday on this day. Re-applying the same fact is
    /// a no-op beyond overwriting the name.
    pub fn set_public_holiday(&mut self, name: &str) {
        self.is_public_holiday = true;
        self.public_holiday_name = name.to_string();
    }

    /// Remove any public holiday from this day, keeping the name field
    /// in sync with the flag.
    pub fn clear_public_holiday(&mut self) {
        self.is_public_holiday = false;
        self.public_holiday_name.clear();
    }

    /// Mark this day as planned leave with the given reason.
    pub fn set_planned_leave(&mut self, reason: &str) {
        self.is_planned_leave = true;
        self.leave_reason = reason.to_string();
    }

    /// Clear planned leave, keeping the reason field in sync with the
    /// flag.
    pub fn clear_planned_leave(&mut self) {
        self.is_planned_leave = false;
        self.leave_reason.clear();
    }

    /// Resolve the single category that governs this day's presentation.
    ///
    /// Walks the fixed priority table top-to-bottom and returns the first
    /// category whose flag is true, or `None` for a plain workday.
    pub fn category(&self) -> Option<DayCategory> {
        DayCategory::DISPLAY_PRIORITY
            .into_iter()
            .find(|category| self.has_flag(*category))
    }

    fn has_flag(&self, category: DayCategory) -> bool {
        match category {
            DayCategory::Weekend => self.is_weekend,
            DayCategory::PublicHoliday => self.is_public_holiday,
            DayCategory::PlannedLeave => self.is_planned_leave,
            DayCategory::PreferredPeriod => self.is_preferred_leave_period,
            DayCategory::UnpreferredPeriod => self.is_unpreferred_leave_period,
            DayCategory::RecommendedLeave => self.is_recommended_leave,
        }
    }
}

/// Display category of a day, used by renderers to pick one color per
/// day and to print the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCategory {
    Weekend,
    PublicHoliday,
    PlannedLeave,
    PreferredPeriod,
    UnpreferredPeriod,
    RecommendedLeave,
}

impl DayCategory {
    /// Fixed precedence, highest first. When several flags are true on
    /// the same day, the first matching entry wins.
    pub const DISPLAY_PRIORITY: [DayCategory; 6] = [
        DayCategory::Weekend,
        DayCategory::PublicHoliday,
        DayCategory::PlannedLeave,
        DayCategory::PreferredPeriod,
        DayCategory::UnpreferredPeriod,
        DayCategory::RecommendedLeave,
    ];

    /// Human-readable legend label.
    pub fn label(&self) -> &'static str {
        match self {
            DayCategory::Weekend => "Weekend",
            DayCategory::PublicHoliday => "Public Holiday",
            DayCategory::PlannedLeave => "Planned Leave",
            DayCategory::PreferredPeriod => "Preferred Period",
            DayCategory::UnpreferredPeriod => "Unpreferred Period",
            DayCategory::RecommendedLeave => "Recommended Leave",
        }
    }
}

/// A year-long planning calendar: one `Day` per date, ascending, plus
/// the remaining leave balance.
///
/// The balance is debited and credited only by the range operations, so
/// it always equals the balance supplied at generation minus the number
/// of days currently planned as leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub leave_balance: i32,
    pub days: Vec<Day>,
}

impl Calendar {
    /// First and last date of the calendar, or `None` when it has no
    /// days.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.days.first(), self.days.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// Whether the given date falls inside the calendar.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.day(date).is_some()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut Day> {
        self.days.iter_mut().find(|day| day.date == date)
    }
}

/// One public-holiday fact supplied by a client. A missing or empty name
/// falls back to a placeholder when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHolidayEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub public_holiday_name: Option<String>,
}

/// Request to annotate a calendar with an explicit list of public
/// holidays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPublicHolidaysRequest {
    pub calendar: Calendar,
    pub holidays: Vec<PublicHolidayEntry>,
}

/// Request to annotate a calendar with the public holidays of a country,
/// identified by free-text name or code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryHolidaysRequest {
    pub calendar: Calendar,
    pub holiday_country: String,
}

/// Request to remove the public holiday recorded on a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePublicHolidayRequest {
    pub calendar: Calendar,
    pub holiday_date: NaiveDate,
}

/// Request to plan leave across an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedLeaveRequest {
    pub calendar: Calendar,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub leave_reason: Option<String>,
}

/// Request for the range operations that carry no reason: cancel leave,
/// mark preferred, mark unpreferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRangeRequest {
    pub calendar: Calendar,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}
