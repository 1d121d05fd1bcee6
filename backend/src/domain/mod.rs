//! Domain services for the leave planner.
//!
//! Each service consumes a caller-supplied [`shared::Calendar`] and
//! mutates it in place with all-or-nothing semantics: a rejected
//! operation returns an error and leaves the calendar untouched.

pub mod calendar_service;
pub mod error;
pub mod holiday_provider;
pub mod holiday_service;
pub mod leave_service;

pub use calendar_service::CalendarService;
pub use error::PlannerError;
pub use holiday_provider::{FixedDateHolidayProvider, HolidayFact, HolidayProvider};
pub use holiday_service::HolidayService;
pub use leave_service::LeaveService;
