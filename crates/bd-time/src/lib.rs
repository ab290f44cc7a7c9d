//! # bd-time
//!
//! Date parsing and formatting, file-sourced holiday calendars, and
//! business-day arithmetic.
//!
//! The two building blocks are [`DateFormatEngine`], which converts between
//! accepted date strings and [`CalendarDate`] values and validates output
//! templates, and [`BusinessDayCalculator`], which tracks one date over a
//! holiday calendar and shifts it by calendar offsets or business days.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day calculator over a single tracked date.
pub mod business;

/// `CalendarDate` type.
pub mod date;

/// Date-string acceptance, parsing, and strftime-style rendering.
pub mod format;

/// Holiday sets and file-backed holiday calendars.
pub mod holiday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business::{BusinessDayCalculator, BusinessDayCalculatorBuilder};
pub use date::CalendarDate;
pub use format::{DateFormatEngine, DEFAULT_OUTPUT_FORMAT};
pub use holiday::{HolidayCalendar, HolidaySet};

pub use chrono::Weekday;
