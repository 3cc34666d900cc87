//! Pay period model.
//!
//! A [`PayPeriod`] identifies which period a saved payslip belongs to. Its
//! [`PeriodKind`] also scopes the sequential payslip numbering done by the
//! payslip store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The cadence of a pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// One calendar month.
    Monthly,
    /// Two weeks.
    Fortnightly,
    /// One week.
    Weekly,
}

/// Represents a pay period with its date range.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{PayPeriod, PeriodKind};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     kind: PeriodKind::Monthly,
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The cadence of the period.
    pub kind: PeriodKind,
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period, both ends inclusive.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true when the end date is not before the start date.
    pub fn is_well_formed(&self) -> bool {
        self.end_date >= self.start_date
    }
}
