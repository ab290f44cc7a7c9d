//! Holiday- and weekend-aware arithmetic over a single tracked date.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bd_core::diag::{default_sink, DiagnosticSink};
use bd_core::errors::{Error, Result};

use crate::date::CalendarDate;
use crate::format::{DateFormatEngine, DEFAULT_OUTPUT_FORMAT};
use crate::holiday::{HolidayCalendar, HolidaySet};

/// Business-day-aware date arithmetic over one tracked date.
///
/// Construction validates eagerly: the source-date string and the output
/// template must be well-formed, and the holiday file must exist and be
/// non-empty. The holiday *contents* still load best-effort: garbled lines
/// are skipped with a diagnostic rather than failing construction, so a
/// plausible-looking result over a garbled calendar is the caller's to
/// detect.
///
/// The tracked date is always a valid [`CalendarDate`]: every operation
/// computes its result first and commits only on success.
pub struct BusinessDayCalculator {
    sourcedate: CalendarDate,
    calendar: HolidayCalendar,
    output_format: String,
    engine: DateFormatEngine,
    rendered: Option<String>,
}

impl BusinessDayCalculator {
    /// Build with the default output template (`%Y/%m/%d`) and the default
    /// diagnostic sink.
    pub fn new(sourcedate: &str, holidays_file: impl AsRef<Path>) -> Result<Self> {
        Self::builder(sourcedate, holidays_file).build()
    }

    /// Start a builder for custom configuration.
    pub fn builder(
        sourcedate: &str,
        holidays_file: impl AsRef<Path>,
    ) -> BusinessDayCalculatorBuilder {
        BusinessDayCalculatorBuilder {
            sourcedate: sourcedate.to_string(),
            holidays_file: holidays_file.as_ref().to_path_buf(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            sink: None,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Return `true` unless the tracked date falls on a weekend or is a
    /// member of the holiday set.
    pub fn is_business_day(&self) -> bool {
        self.calendar.is_business_day(self.sourcedate)
    }

    /// The tracked date.
    pub fn date(&self) -> CalendarDate {
        self.sourcedate
    }

    /// The holidays in effect.
    pub fn holidays(&self) -> &HolidaySet {
        self.calendar.holidays()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Apply signed calendar offsets in the fixed order years, then months,
    /// then days.
    ///
    /// Each offset can push across month/year boundaries on its own;
    /// month-end clamping follows standard calendar arithmetic, so
    /// Feb 29 + 1 year lands on Feb 28 of the (non-leap) target year.
    pub fn shift_calendar(&mut self, years: i32, months: i32, days: i32) -> Result<&mut Self> {
        let shifted = self
            .sourcedate
            .add_years(years)?
            .add_months(months)?
            .add_days(days)?;
        self.set_date(shifted);
        Ok(self)
    }

    /// Move by `delta` business days.
    ///
    /// Applies exactly one calendar-day offset of magnitude `delta`, then
    /// advances one day at a time in the direction of `delta.signum()` until
    /// the tracked date is a business day.
    ///
    /// A zero `delta` asks for the date itself; if that date is not a
    /// business day there is no direction to resolve it in, and the call
    /// fails with [`Error::Arithmetic`] leaving the date untouched.
    pub fn move_by_business_days(&mut self, delta: i32) -> Result<&mut Self> {
        let mut date = self.sourcedate.add_days(delta)?;
        if delta == 0 {
            // The offset was a no-op, so this is the original date's status.
            if !self.calendar.is_business_day(date) {
                return Err(Error::Arithmetic(
                    "cannot resolve a non-business day with zero movement".into(),
                ));
            }
            self.set_date(date);
            return Ok(self);
        }
        let step = delta.signum();
        while !self.calendar.is_business_day(date) {
            date = date.add_days(step)?;
        }
        self.set_date(date);
        Ok(self)
    }

    /// Shift to the next business day. Equivalent to
    /// `move_by_business_days(1)`.
    pub fn next_business_day(&mut self) -> Result<&mut Self> {
        self.move_by_business_days(1)
    }

    /// Shift to the previous business day. Equivalent to
    /// `move_by_business_days(-1)`.
    pub fn previous_business_day(&mut self) -> Result<&mut Self> {
        self.move_by_business_days(-1)
    }

    /// Shift by `n` business days. Equivalent to
    /// `move_by_business_days(n)`.
    pub fn business_day_offset(&mut self, n: i32) -> Result<&mut Self> {
        self.move_by_business_days(n)
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the tracked date with the configured output template.
    ///
    /// The first call caches the rendered string; subsequent calls return
    /// the cache until an arithmetic operation moves the date again.
    pub fn render(&mut self) -> Result<String> {
        if let Some(rendered) = &self.rendered {
            return Ok(rendered.clone());
        }
        let rendered = self.engine.format(self.sourcedate, &self.output_format)?;
        self.rendered = Some(rendered.clone());
        Ok(rendered)
    }

    /// Render the tracked date with a one-off template, leaving the
    /// configured template, the tracked date, and the render cache
    /// untouched.
    pub fn render_with(&self, template: &str) -> Result<String> {
        self.engine.format(self.sourcedate, template)
    }

    fn set_date(&mut self, date: CalendarDate) {
        self.sourcedate = date;
        self.rendered = None;
    }
}

impl std::fmt::Debug for BusinessDayCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessDayCalculator")
            .field("sourcedate", &self.sourcedate)
            .field("output_format", &self.output_format)
            .field("holidays", &self.calendar.holidays().len())
            .finish()
    }
}

/// Builder for [`BusinessDayCalculator`].
pub struct BusinessDayCalculatorBuilder {
    sourcedate: String,
    holidays_file: PathBuf,
    output_format: String,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl BusinessDayCalculatorBuilder {
    /// Set the output template (defaults to `%Y/%m/%d`).
    pub fn with_output_format(mut self, template: &str) -> Self {
        self.output_format = template.to_string();
        self
    }

    /// Inject a diagnostic sink (defaults to the process-wide sink).
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the inputs and build the calculator.
    ///
    /// Fails with [`Error::Format`] on a malformed source date or output
    /// template, [`Error::Resource`] on a nonexistent or empty holiday
    /// file, and [`Error::Date`] when the source date matches the input
    /// shape but has no valid calendar interpretation.
    pub fn build(self) -> Result<BusinessDayCalculator> {
        let sink = self.sink.unwrap_or_else(default_sink);
        let engine = DateFormatEngine::with_diagnostics(Arc::clone(&sink));

        engine.validate_input_format(&self.sourcedate)?;
        engine.validate_output_format(&self.output_format)?;

        let metadata = fs::metadata(&self.holidays_file).map_err(|err| {
            Error::Resource(format!(
                "holiday file {} does not exist ({err})",
                self.holidays_file.display()
            ))
        })?;
        if metadata.len() == 0 {
            return Err(Error::Resource(format!(
                "holiday file {} is empty",
                self.holidays_file.display()
            )));
        }

        let sourcedate = engine.parse(&self.sourcedate)?.ok_or_else(|| {
            Error::Date(format!(
                "source date \"{}\" has no valid calendar interpretation",
                self.sourcedate
            ))
        })?;

        let calendar = HolidayCalendar::load_with_diagnostics(&self.holidays_file, sink);

        Ok(BusinessDayCalculator {
            sourcedate,
            calendar,
            output_format: self.output_format,
            engine,
            rendered: None,
        })
    }
}
