//! Holiday sets and file-backed holiday calendars.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use bd_core::diag::{default_sink, DiagnosticSink};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::format::DateFormatEngine;

/// A set of holiday dates. Order-irrelevant; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HolidaySet {
    dates: HashSet<CalendarDate>,
}

impl HolidaySet {
    /// Build a set from any sequence of dates.
    pub fn from_dates(dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Return `true` if `date` is a member.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of distinct holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Return `true` if no holidays are defined.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate over the holidays in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<CalendarDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self::from_dates(iter)
    }
}

/// A weekends-plus-holidays calendar loaded best-effort from a file.
///
/// This is the lenient entry point: an unreadable or garbled holiday file
/// degrades to an empty or partial [`HolidaySet`] plus a diagnostic, never
/// an error. [`BusinessDayCalculator`](crate::BusinessDayCalculator) layers
/// the strict existence/non-emptiness checks on top for callers that cannot
/// tolerate a silently empty calendar.
#[derive(Clone)]
pub struct HolidayCalendar {
    holidays: HolidaySet,
}

impl HolidayCalendar {
    /// Build a calendar over an already-assembled holiday set.
    pub fn from_set(holidays: HolidaySet) -> Self {
        Self { holidays }
    }

    /// Load holidays from `path`.
    ///
    /// Each line is a CSV record whose first field is a date string in an
    /// accepted input format. Records that do not validate or parse are
    /// skipped with a diagnostic.
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::load_with_diagnostics(path, default_sink())
    }

    /// Like [`load`](Self::load), reporting through an injected sink.
    pub fn load_with_diagnostics(path: impl AsRef<Path>, sink: Arc<dyn DiagnosticSink>) -> Self {
        let path = path.as_ref();
        let engine = DateFormatEngine::with_diagnostics(Arc::clone(&sink));
        let mut dates = HashSet::new();
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(err) => {
                sink.diagnostic(&format!(
                    "holiday file {} is not readable ({err}); holidays will not be defined",
                    path.display()
                ));
                return Self {
                    holidays: HolidaySet::default(),
                };
            }
        };
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    sink.diagnostic(&format!(
                        "skipping malformed line in {}: {err}",
                        path.display()
                    ));
                    continue;
                }
            };
            let Some(field) = record.get(0) else {
                continue;
            };
            match engine.parse(field.trim()) {
                Ok(Some(date)) => {
                    dates.insert(date);
                }
                // parse already reported the failed interpretation
                Ok(None) => {}
                Err(err) => {
                    sink.diagnostic(&format!("skipping holiday entry \"{field}\": {err}"));
                }
            }
        }
        Self {
            holidays: HolidaySet { dates },
        }
    }

    /// Return `true` if `date` is neither a weekend day nor a holiday.
    pub fn is_business_day(&self, date: CalendarDate) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(date)
    }

    /// Return `true` if `date` is a member of the holiday set. Weekends do
    /// not count unless listed.
    pub fn is_holiday(&self, date: CalendarDate) -> bool {
        self.holidays.contains(date)
    }

    /// Return `true` if `date` falls on Saturday or Sunday.
    pub fn is_weekend(&self, date: CalendarDate) -> bool {
        date.is_weekend()
    }

    /// The loaded holidays.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
}

impl std::fmt::Debug for HolidayCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayCalendar")
            .field("holidays", &self.holidays)
            .finish()
    }
}
