//! Range mutation: planning and cancelling leave, marking preferred and
//! unpreferred periods.
//!
//! Every operation spans an inclusive date range and is all-or-nothing:
//! `plan_leave` counts what the whole range would cost before mutating
//! anything, so a rejected request leaves the calendar byte-for-byte
//! unchanged and the balance can never go negative.

use chrono::NaiveDate;
use shared::{Calendar, Day};
use tracing::info;

use crate::domain::error::PlannerError;

/// Service for leave and preference range operations.
#[derive(Debug, Clone)]
pub struct LeaveService;

impl LeaveService {
    pub fn new() -> Self {
        Self
    }

    /// Plan leave on every eligible day in `from..=to`.
    ///
    /// Weekends and public holidays in the range are skipped. Eligible
    /// days not already planned are "newly requested" and must fit in
    /// the balance; already-planned days are re-stamped with the new
    /// reason without being counted again. The newly-requested count is
    /// computed for the whole range before any mutation.
    ///
    /// Returns the number of days debited from the balance.
    pub fn plan_leave(
        &self,
        calendar: &mut Calendar,
        from: NaiveDate,
        to: NaiveDate,
        reason: Option<&str>,
    ) -> Result<i32, PlannerError> {
        check_range(from, to)?;

        // First pass: cost the request without touching anything.
        let newly_requested = calendar
            .days
            .iter()
            .filter(|day| in_range(day, from, to))
            .filter(|day| day.is_eligible() && !day.is_planned_leave)
            .count() as i32;

        if newly_requested > calendar.leave_balance {
            return Err(PlannerError::InsufficientBalance {
                requested: newly_requested,
                available: calendar.leave_balance,
            });
        }

        // Second pass: commit.
        let reason = reason.unwrap_or("");
        for day in calendar
            .days
            .iter_mut()
            .filter(|day| in_range(day, from, to))
        {
            if day.is_eligible() {
                day.set_planned_leave(reason);
            }
        }
        calendar.leave_balance -= newly_requested;

        info!(
            "Planned leave {}..={}: {} days debited, balance now {}",
            from, to, newly_requested, calendar.leave_balance
        );
        Ok(newly_requested)
    }

    /// Cancel planned leave on every day in `from..=to`.
    ///
    /// Days without planned leave are left alone, so cancelling an
    /// already-clear range is a no-op. Returns the number of days
    /// credited back to the balance.
    pub fn cancel_leave(
        &self,
        calendar: &mut Calendar,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i32, PlannerError> {
        check_range(from, to)?;

        let mut credited = 0;
        for day in calendar
            .days
            .iter_mut()
            .filter(|day| in_range(day, from, to))
        {
            if day.is_planned_leave {
                day.clear_planned_leave();
                credited += 1;
            }
        }
        calendar.leave_balance += credited;

        info!(
            "Cancelled leave {}..={}: {} days credited, balance now {}",
            from, to, credited, calendar.leave_balance
        );
        Ok(credited)
    }

    /// Mark every eligible day in `from..=to` as a preferred leave
    /// period. Idempotent, no balance effect. Returns the number of
    /// days carrying the flag.
    pub fn mark_preferred(
        &self,
        calendar: &mut Calendar,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<usize, PlannerError> {
        let marked = self.mark_period(calendar, from, to, |day| {
            day.is_preferred_leave_period = true;
        })?;
        info!("Marked {} days preferred in {}..={}", marked, from, to);
        Ok(marked)
    }

    /// Mark every eligible day in `from..=to` as an unpreferred leave
    /// period. Idempotent, no balance effect. Returns the number of
    /// days carrying the flag.
    pub fn mark_unpreferred(
        &self,
        calendar: &mut Calendar,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<usize, PlannerError> {
        let marked = self.mark_period(calendar, from, to, |day| {
            day.is_unpreferred_leave_period = true;
        })?;
        info!("Marked {} days unpreferred in {}..={}", marked, from, to);
        Ok(marked)
    }

    fn mark_period(
        &self,
        calendar: &mut Calendar,
        from: NaiveDate,
        to: NaiveDate,
        mark: impl Fn(&mut Day),
    ) -> Result<usize, PlannerError> {
        check_range(from, to)?;

        let mut marked = 0;
        for day in calendar
            .days
            .iter_mut()
            .filter(|day| in_range(day, from, to))
        {
            if day.is_eligible() {
                mark(day);
                marked += 1;
            }
        }
        Ok(marked)
    }
}

impl Default for LeaveService {
    fn default() -> Self {
        Self::new()
    }
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), PlannerError> {
    if from > to {
        return Err(PlannerError::InvalidRange { from, to });
    }
    Ok(())
}

fn in_range(day: &Day, from: NaiveDate, to: NaiveDate) -> bool {
    day.date >= from && day.date <= to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar_service::CalendarService;
    use crate::domain::holiday_service::HolidayService;
    use crate::domain::holiday_provider::FixedDateHolidayProvider;
    use shared::PublicHolidayEntry;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar_2024(balance: i32) -> Calendar {
        CalendarService::new().generate(Some(date(2024, 1, 1)), 5, balance)
    }

    fn add_christmas(calendar: &mut Calendar) {
        let service = HolidayService::new(Arc::new(FixedDateHolidayProvider::new()));
        service.add_holidays(
            calendar,
            &[PublicHolidayEntry {
                date: date(2024, 12, 25),
                public_holiday_name: Some("Christmas".to_string()),
            }],
        );
    }

    #[test]
    fn test_plan_leave_debits_only_eligible_days() {
        // Scenario A: 2024-11-25 .. 2024-12-08 is 14 calendar days with
        // four weekend days, so 10 days are requested.
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);

        let debited = service
            .plan_leave(
                &mut calendar,
                date(2024, 11, 25),
                date(2024, 12, 8),
                Some("Vacation"),
            )
            .unwrap();

        assert_eq!(debited, 10);
        assert_eq!(calendar.leave_balance, 8);

        let monday = calendar.day(date(2024, 11, 25)).unwrap();
        assert!(monday.is_planned_leave);
        assert_eq!(monday.leave_reason, "Vacation");

        let saturday = calendar.day(date(2024, 11, 30)).unwrap();
        assert!(!saturday.is_planned_leave);
        assert_eq!(saturday.leave_reason, "");
    }

    #[test]
    fn test_plan_leave_skips_public_holidays() {
        // Scenario B: Dec 25 is a holiday inside the requested range.
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);
        add_christmas(&mut calendar);

        let debited = service
            .plan_leave(
                &mut calendar,
                date(2024, 12, 20),
                date(2024, 12, 26),
                Some("Winter break"),
            )
            .unwrap();

        // Fri 20, Mon 23, Tue 24, Thu 26; Sat/Sun and Christmas skip.
        assert_eq!(debited, 4);
        assert_eq!(calendar.leave_balance, 14);

        let christmas = calendar.day(date(2024, 12, 25)).unwrap();
        assert!(!christmas.is_planned_leave);
        assert_eq!(christmas.leave_reason, "");
        assert!(christmas.is_public_holiday);
    }

    #[test]
    fn test_insufficient_balance_leaves_calendar_unchanged() {
        // Scenario C: five eligible days against a balance of two.
        let service = LeaveService::new();
        let mut calendar = calendar_2024(2);
        let before = calendar.clone();

        let result = service.plan_leave(
            &mut calendar,
            date(2024, 1, 1),
            date(2024, 1, 5),
            Some("Too long"),
        );

        assert_eq!(
            result,
            Err(PlannerError::InsufficientBalance {
                requested: 5,
                available: 2,
            })
        );
        assert_eq!(calendar, before);
    }

    #[test]
    fn test_replanning_overwrites_reason_without_double_debit() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);

        service
            .plan_leave(&mut calendar, date(2024, 3, 4), date(2024, 3, 6), Some("Trip"))
            .unwrap();
        assert_eq!(calendar.leave_balance, 15);

        // Re-plan a superset: only the two new days cost balance, but
        // the reason is re-stamped everywhere.
        let debited = service
            .plan_leave(
                &mut calendar,
                date(2024, 3, 4),
                date(2024, 3, 8),
                Some("Longer trip"),
            )
            .unwrap();

        assert_eq!(debited, 2);
        assert_eq!(calendar.leave_balance, 13);
        for d in [date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 6)] {
            assert_eq!(calendar.day(d).unwrap().leave_reason, "Longer trip");
        }
    }

    #[test]
    fn test_plan_with_no_reason_stamps_empty_reason() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);

        service
            .plan_leave(&mut calendar, date(2024, 3, 4), date(2024, 3, 4), None)
            .unwrap();

        let day = calendar.day(date(2024, 3, 4)).unwrap();
        assert!(day.is_planned_leave);
        assert_eq!(day.leave_reason, "");
    }

    #[test]
    fn test_invalid_range_is_rejected_before_any_scan() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);
        let before = calendar.clone();
        let err = PlannerError::InvalidRange {
            from: date(2024, 3, 8),
            to: date(2024, 3, 4),
        };

        assert_eq!(
            service.plan_leave(&mut calendar, date(2024, 3, 8), date(2024, 3, 4), None),
            Err(err.clone())
        );
        assert_eq!(
            service.cancel_leave(&mut calendar, date(2024, 3, 8), date(2024, 3, 4)),
            Err(err.clone())
        );
        assert_eq!(
            service.mark_preferred(&mut calendar, date(2024, 3, 8), date(2024, 3, 4)),
            Err(err.clone())
        );
        assert_eq!(
            service.mark_unpreferred(&mut calendar, date(2024, 3, 8), date(2024, 3, 4)),
            Err(err)
        );
        assert_eq!(calendar, before);
    }

    #[test]
    fn test_zero_cost_plan_succeeds_on_empty_balance() {
        // A range of nothing but weekends costs nothing, so it commits
        // even at balance zero.
        let service = LeaveService::new();
        let mut calendar = calendar_2024(0);

        let debited = service
            .plan_leave(&mut calendar, date(2024, 1, 6), date(2024, 1, 7), None)
            .unwrap();

        assert_eq!(debited, 0);
        assert_eq!(calendar.leave_balance, 0);
    }

    #[test]
    fn test_cancel_restores_balance_and_flags() {
        // Round trip: plan then cancel the same range.
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);
        let before = calendar.clone();

        service
            .plan_leave(
                &mut calendar,
                date(2024, 11, 25),
                date(2024, 12, 8),
                Some("Vacation"),
            )
            .unwrap();
        let credited = service
            .cancel_leave(&mut calendar, date(2024, 11, 25), date(2024, 12, 8))
            .unwrap();

        assert_eq!(credited, 10);
        assert_eq!(calendar, before);
    }

    #[test]
    fn test_cancel_on_unplanned_range_is_a_no_op() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);
        let before = calendar.clone();

        let credited = service
            .cancel_leave(&mut calendar, date(2024, 5, 6), date(2024, 5, 10))
            .unwrap();

        assert_eq!(credited, 0);
        assert_eq!(calendar, before);
    }

    #[test]
    fn test_cancel_credits_only_planned_days_in_range() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);
        service
            .plan_leave(&mut calendar, date(2024, 3, 4), date(2024, 3, 8), Some("Trip"))
            .unwrap();
        assert_eq!(calendar.leave_balance, 13);

        // Cancel only the middle of the planned block.
        let credited = service
            .cancel_leave(&mut calendar, date(2024, 3, 5), date(2024, 3, 6))
            .unwrap();

        assert_eq!(credited, 2);
        assert_eq!(calendar.leave_balance, 15);
        assert!(calendar.day(date(2024, 3, 4)).unwrap().is_planned_leave);
        assert!(!calendar.day(date(2024, 3, 5)).unwrap().is_planned_leave);
        assert!(calendar.day(date(2024, 3, 8)).unwrap().is_planned_leave);
    }

    #[test]
    fn test_mark_preferred_covers_only_eligible_days() {
        // Scenario D over January 2025 in a calendar started mid-2024.
        let service = LeaveService::new();
        let mut calendar =
            CalendarService::new().generate(Some(date(2024, 6, 1)), 5, 18);

        service
            .mark_preferred(&mut calendar, date(2025, 1, 1), date(2025, 1, 31))
            .unwrap();

        for day in calendar
            .days
            .iter()
            .filter(|day| day.date >= date(2025, 1, 1) && day.date <= date(2025, 1, 31))
        {
            assert_eq!(
                day.is_preferred_leave_period,
                day.is_eligible(),
                "wrong preference flag on {}",
                day.date
            );
        }
    }

    #[test]
    fn test_mark_preferred_is_idempotent() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);

        service
            .mark_preferred(&mut calendar, date(2024, 12, 1), date(2024, 12, 31))
            .unwrap();
        let once = calendar.clone();
        service
            .mark_preferred(&mut calendar, date(2024, 12, 1), date(2024, 12, 31))
            .unwrap();

        assert_eq!(calendar, once);
    }

    #[test]
    fn test_preference_marks_have_no_balance_effect() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);

        service
            .mark_preferred(&mut calendar, date(2024, 12, 1), date(2024, 12, 31))
            .unwrap();
        service
            .mark_unpreferred(&mut calendar, date(2024, 7, 1), date(2024, 7, 31))
            .unwrap();

        assert_eq!(calendar.leave_balance, 18);
    }

    #[test]
    fn test_preferred_and_unpreferred_are_independently_settable() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);

        service
            .mark_preferred(&mut calendar, date(2024, 12, 2), date(2024, 12, 2))
            .unwrap();
        service
            .mark_unpreferred(&mut calendar, date(2024, 12, 2), date(2024, 12, 2))
            .unwrap();

        let day = calendar.day(date(2024, 12, 2)).unwrap();
        assert!(day.is_preferred_leave_period);
        assert!(day.is_unpreferred_leave_period);
    }

    #[test]
    fn test_mark_preferred_skips_holidays() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(18);
        add_christmas(&mut calendar);

        service
            .mark_preferred(&mut calendar, date(2024, 12, 23), date(2024, 12, 27))
            .unwrap();

        assert!(!calendar
            .day(date(2024, 12, 25))
            .unwrap()
            .is_preferred_leave_period);
        assert!(calendar
            .day(date(2024, 12, 24))
            .unwrap()
            .is_preferred_leave_period);
    }

    #[test]
    fn test_range_clipped_to_calendar_span() {
        // A range reaching past the calendar end only touches days that
        // exist; nothing is debited for dates outside the span.
        let service = LeaveService::new();
        let mut calendar =
            CalendarService::new().generate(Some(date(2024, 1, 1)), 7, 18);

        let debited = service
            .plan_leave(&mut calendar, date(2024, 12, 28), date(2025, 1, 10), None)
            .unwrap();

        // 2024-12-28 .. 2024-12-30 are the only in-span days, and the
        // 7-day work week makes all of them eligible.
        assert_eq!(debited, 3);
        assert_eq!(calendar.leave_balance, 15);
    }

    #[test]
    fn test_balance_never_negative_across_sequence() {
        let service = LeaveService::new();
        let mut calendar = calendar_2024(6);

        // First request fits exactly.
        service
            .plan_leave(&mut calendar, date(2024, 2, 5), date(2024, 2, 9), None)
            .unwrap();
        assert_eq!(calendar.leave_balance, 1);

        // Second request would overdraw and must not commit partially.
        let before = calendar.clone();
        let result = service.plan_leave(&mut calendar, date(2024, 4, 1), date(2024, 4, 5), None);
        assert_eq!(
            result,
            Err(PlannerError::InsufficientBalance {
                requested: 5,
                available: 1,
            })
        );
        assert_eq!(calendar, before);

        // A smaller request still fits.
        service
            .plan_leave(&mut calendar, date(2024, 4, 1), date(2024, 4, 1), None)
            .unwrap();
        assert_eq!(calendar.leave_balance, 0);
    }
}
