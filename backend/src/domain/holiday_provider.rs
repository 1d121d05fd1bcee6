//! Public-holiday lookup.
//!
//! The planner only needs membership-by-date and name retrieval, so the
//! provider surface is a single query over an inclusive date span. The
//! built-in provider ships fixed-date national holidays for the
//! countries the service advertises; swapping in a richer source is a
//! matter of implementing [`HolidayProvider`].

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::error::PlannerError;

/// One holiday fact returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayFact {
    pub date: NaiveDate,
    pub name: String,
}

/// A source of public-holiday facts, keyed by normalized country code.
pub trait HolidayProvider: Send + Sync {
    /// All holiday facts known for `country_code` with dates inside the
    /// inclusive `from..=to` span. Fails with
    /// [`PlannerError::UnsupportedCountry`] for codes the provider does
    /// not know.
    fn holidays_in_span(
        &self,
        country_code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HolidayFact>, PlannerError>;
}

/// (month, day, name) rules applied to every year a span touches.
type HolidayRules = &'static [(u32, u32, &'static str)];

const INDIA: HolidayRules = &[
    (1, 1, "New Year's Day"),
    (1, 26, "Republic Day"),
    (5, 1, "May Day"),
    (8, 15, "Independence Day"),
    (10, 2, "Gandhi Jayanti"),
    (12, 25, "Christmas"),
];

const UNITED_STATES: HolidayRules = &[
    (1, 1, "New Year's Day"),
    (6, 19, "Juneteenth"),
    (7, 4, "Independence Day"),
    (11, 11, "Veterans Day"),
    (12, 25, "Christmas Day"),
];

const UNITED_KINGDOM: HolidayRules = &[
    (1, 1, "New Year's Day"),
    (12, 25, "Christmas Day"),
    (12, 26, "Boxing Day"),
];

const CANADA: HolidayRules = &[
    (1, 1, "New Year's Day"),
    (7, 1, "Canada Day"),
    (11, 11, "Remembrance Day"),
    (12, 25, "Christmas Day"),
    (12, 26, "Boxing Day"),
];

static HOLIDAY_TABLES: Lazy<HashMap<&'static str, HolidayRules>> = Lazy::new(|| {
    HashMap::from([
        ("IN", INDIA),
        ("US", UNITED_STATES),
        ("UK", UNITED_KINGDOM),
        ("CA", CANADA),
    ])
});

/// Built-in provider backed by the fixed-date tables above. Movable
/// observances (Easter-derived dates, weekday-anchored federal
/// holidays) are not modelled.
#[derive(Debug, Clone)]
pub struct FixedDateHolidayProvider;

impl FixedDateHolidayProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FixedDateHolidayProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayProvider for FixedDateHolidayProvider {
    fn holidays_in_span(
        &self,
        country_code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HolidayFact>, PlannerError> {
        let rules = HOLIDAY_TABLES
            .get(country_code)
            .ok_or_else(|| PlannerError::UnsupportedCountry(country_code.to_string()))?;

        let mut facts = Vec::new();
        for year in from.year()..=to.year() {
            for &(month, day, name) in *rules {
                // from_ymd_opt cannot fail for the table entries, but
                // stay total rather than unwrap.
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                if date >= from && date <= to {
                    facts.push(HolidayFact {
                        date,
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(facts)
    }
}
