//! Holiday annotation.
//!
//! Applies public-holiday facts onto an existing calendar, either from
//! an explicit list or by country lookup, and removes single holidays.
//! Only the holiday fields of a day are touched; weekend, leave and
//! preference flags are never modified here.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::error::PlannerError;
use crate::domain::holiday_provider::HolidayProvider;
use shared::{Calendar, PublicHolidayEntry};

/// Placeholder used when a client supplies a holiday without a name.
pub const UNNAMED_HOLIDAY: &str = "Unnamed Holiday";

/// Free-text country identifiers accepted in addition to bare codes.
static COUNTRY_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("INDIA", "IN"),
        ("IN", "IN"),
        ("UNITED STATES", "US"),
        ("USA", "US"),
        ("US", "US"),
        ("UNITED KINGDOM", "UK"),
        ("GREAT BRITAIN", "UK"),
        ("UK", "UK"),
        ("CANADA", "CA"),
        ("CA", "CA"),
    ])
});

/// Normalize a free-text country identifier to a provider code.
///
/// Case-insensitive; unknown identifiers pass through uppercased so the
/// provider makes the final support decision.
pub fn normalize_country(identifier: &str) -> String {
    let upper = identifier.trim().to_uppercase();
    match COUNTRY_ALIASES.get(upper.as_str()) {
        Some(code) => (*code).to_string(),
        None => upper,
    }
}

/// Service that annotates calendars with public holidays.
#[derive(Clone)]
pub struct HolidayService {
    provider: Arc<dyn HolidayProvider>,
}

impl HolidayService {
    pub fn new(provider: Arc<dyn HolidayProvider>) -> Self {
        Self { provider }
    }

    /// Apply an explicit list of holiday facts to the calendar.
    ///
    /// Dates outside the calendar span are ignored. A missing or empty
    /// name falls back to [`UNNAMED_HOLIDAY`]. Re-applying a fact is
    /// idempotent. Returns the number of days annotated.
    pub fn add_holidays(
        &self,
        calendar: &mut Calendar,
        holidays: &[PublicHolidayEntry],
    ) -> usize {
        let mut applied = 0;
        for entry in holidays {
            match calendar.day_mut(entry.date) {
                Some(day) => {
                    let name = entry
                        .public_holiday_name
                        .as_deref()
                        .filter(|name| !name.trim().is_empty())
                        .unwrap_or(UNNAMED_HOLIDAY);
                    day.set_public_holiday(name);
                    applied += 1;
                }
                None => {
                    debug!("Ignoring holiday on {}: outside calendar span", entry.date);
                }
            }
        }
        info!("Annotated {} of {} holiday entries", applied, holidays.len());
        applied
    }

    /// Annotate the calendar with the public holidays of a country.
    ///
    /// The identifier is normalized through the alias table before the
    /// provider is queried. Returns the number of days annotated.
    pub fn add_country_holidays(
        &self,
        calendar: &mut Calendar,
        country: &str,
    ) -> Result<usize, PlannerError> {
        let code = normalize_country(country);
        let Some((from, to)) = calendar.span() else {
            return Ok(0);
        };

        let facts = self.provider.holidays_in_span(&code, from, to)?;
        let mut applied = 0;
        for fact in &facts {
            if let Some(day) = calendar.day_mut(fact.date) {
                day.set_public_holiday(&fact.name);
                applied += 1;
            }
        }
        info!(
            "Annotated {} holidays for {} (normalized from {:?})",
            applied, code, country
        );
        Ok(applied)
    }

    /// Remove the public holiday recorded on a single date.
    pub fn delete_holiday(
        &self,
        calendar: &mut Calendar,
        date: NaiveDate,
    ) -> Result<(), PlannerError> {
        let day = calendar
            .day_mut(date)
            .ok_or(PlannerError::DateNotFound(date))?;
        if !day.is_public_holiday {
            return Err(PlannerError::NoHolidayOnDate(date));
        }
        day.clear_public_holiday();
        info!("Deleted public holiday on {}", date);
        Ok(())
    }
}
