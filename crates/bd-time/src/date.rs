//! `CalendarDate` — an exact (year, month, day) value.

use bd_core::errors::{Error, Result};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact calendar date with no time-of-day component.
///
/// Wraps a [`chrono::NaiveDate`] and therefore holds a real calendar date
/// (no Feb 30) for its whole lifetime. Arithmetic returns a new value; a
/// `CalendarDate` never mutates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    ///
    /// Returns an error if the triple does not form a real calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| {
                Error::Date(format!(
                    "{year:04}-{month:02}-{day:02} is not a real calendar date"
                ))
            })
    }

    /// Wrap an existing [`NaiveDate`].
    pub fn from_naive(date: NaiveDate) -> Self {
        CalendarDate(date)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The underlying [`NaiveDate`].
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month (1–12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The day of the month (1–31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Return `true` if the date falls on Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` calendar days (negative `n` moves backwards).
    pub fn add_days(self, n: i32) -> Result<Self> {
        let shifted = if n >= 0 {
            self.0.checked_add_days(Days::new(u64::from(n.unsigned_abs())))
        } else {
            self.0.checked_sub_days(Days::new(u64::from(n.unsigned_abs())))
        };
        shifted.map(CalendarDate).ok_or_else(|| {
            Error::Date(format!("{self} {n:+} days is out of the supported range"))
        })
    }

    /// Advance by `n` calendar months, clamping to the end of the target
    /// month when the day does not exist there (Jan 31 + 1 month → Feb 28).
    pub fn add_months(self, n: i32) -> Result<Self> {
        let shifted = if n >= 0 {
            self.0.checked_add_months(Months::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(n.unsigned_abs()))
        };
        shifted.map(CalendarDate).ok_or_else(|| {
            Error::Date(format!("{self} {n:+} months is out of the supported range"))
        })
    }

    /// Advance by `n` calendar years, expressed as `12 n` months so that the
    /// month-end clamp applies (Feb 29 + 1 year → Feb 28).
    pub fn add_years(self, n: i32) -> Result<Self> {
        self.add_months(n.saturating_mul(12))
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CalendarDate({})", self.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
