//! Date-string acceptance, parsing, and strftime-style rendering.

use std::sync::{Arc, LazyLock};

use bd_core::diag::{default_sink, DiagnosticSink};
use bd_core::errors::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use regex::Regex;

use crate::date::CalendarDate;

/// Output template applied when a calculator is built without one.
pub const DEFAULT_OUTPUT_FORMAT: &str = "%Y/%m/%d";

/// Accepted input shape: 2–4 digit year, zero-padded month 01–12, zero-padded
/// day 01–31, delimited by a character from `- / : . _ |`.
///
/// The two delimiter positions are captured separately and compared for
/// equality afterwards; this regex dialect has no backreferences.
static INPUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2,4})([-/:._|])(0[1-9]|1[0-2])([-/:._|])(3[01]|[12][0-9]|0[1-9])$")
        .expect("input pattern is a valid regex")
});

/// Accepted output shape: three strftime-style placeholders (`%` plus an
/// optional `-` flag plus one word character), each pair separated by one
/// literal character, inside arbitrary surrounding text.
static OUTPUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.*)(%-?\w)(.)(%-?\w)(.)(%-?\w)(.*)").expect("output pattern is a valid regex")
});

fn invalid_input(s: &str) -> Error {
    Error::Format(format!(
        "\"{s}\" is not a valid date; expected a 2-4 digit year, zero-padded month \
         and day, and one delimiter from \"-/:._|\""
    ))
}

/// Two-way conversion between accepted date strings and [`CalendarDate`],
/// plus output-template validation.
///
/// The engine is stateless apart from the diagnostic sink it reports failed
/// interpretation attempts to.
#[derive(Clone)]
pub struct DateFormatEngine {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for DateFormatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DateFormatEngine {
    /// Engine reporting to the process-wide default diagnostic sink.
    pub fn new() -> Self {
        Self {
            sink: default_sink(),
        }
    }

    /// Engine reporting to an injected diagnostic sink.
    pub fn with_diagnostics(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Check `s` against the accepted input shape.
    ///
    /// This is a purely syntactic gate: day-versus-month mismatches such as
    /// `02/30` pass here and are caught at date construction.
    pub fn validate_input_format(&self, s: &str) -> Result<()> {
        self.accept(s).map(|_| ())
    }

    /// Parse `s` into a [`CalendarDate`].
    ///
    /// The delimiters are stripped and the remaining digits are interpreted
    /// first as a 2-digit-year date (6 digits total), then as a 4-digit-year
    /// date (8 digits total). Two-digit years pivot the way `strptime`'s
    /// `%y` does: 00–68 land in 2000–2068, 69–99 in 1969–1999.
    ///
    /// Returns `Ok(None)` when `s` matches the input shape but neither
    /// interpretation forms a real calendar date: a 3-digit year (7 digits
    /// total), or a day the month does not have.
    pub fn parse(&self, s: &str) -> Result<Option<CalendarDate>> {
        let (year_digits, month, day) = self.accept(s)?;
        let year = match year_digits.len() {
            2 => {
                let yy: i32 = year_digits.parse().map_err(|_| invalid_input(s))?;
                if yy <= 68 {
                    2000 + yy
                } else {
                    1900 + yy
                }
            }
            4 => {
                let year: i32 = year_digits.parse().map_err(|_| invalid_input(s))?;
                // strptime has no year 0
                if year == 0 {
                    self.sink
                        .diagnostic(&format!("date {s} has year 0; returned none"));
                    return Ok(None);
                }
                year
            }
            _ => {
                self.sink.diagnostic(&format!(
                    "date {s} has no 6- or 8-digit interpretation; returned none"
                ));
                return Ok(None);
            }
        };
        match CalendarDate::from_ymd(year, month, day) {
            Ok(date) => Ok(Some(date)),
            Err(err) => {
                self.sink
                    .diagnostic(&format!("date {s} failed construction ({err}); returned none"));
                Ok(None)
            }
        }
    }

    /// Render `date` through a strftime-style template.
    ///
    /// Fails if the template does not validate, or if it contains a
    /// directive the renderer cannot produce.
    pub fn format(&self, date: CalendarDate, template: &str) -> Result<String> {
        self.validate_output_format(template)?;
        let items: Vec<Item<'_>> = StrftimeItems::new(template).collect();
        if items.contains(&Item::Error) {
            return Err(Error::Format(format!(
                "\"{template}\" contains an unsupported strftime directive"
            )));
        }
        Ok(date.naive().format_with_items(items.into_iter()).to_string())
    }

    /// Check `template` against the accepted output shape.
    ///
    /// Syntactic only: the three placeholders must look like strftime
    /// directives, but whether the renderer supports each one is decided at
    /// [`format`](Self::format) time.
    pub fn validate_output_format(&self, template: &str) -> Result<()> {
        if template.is_empty() {
            return Err(Error::Format("output format cannot be empty".into()));
        }
        if !OUTPUT_PATTERN.is_match(template) {
            return Err(Error::Format(format!(
                "\"{template}\" is not a valid date format; choose between \"%Y/%m/%d\", \
                 \"%Y-%m-%d\" or check strftime behavior"
            )));
        }
        Ok(())
    }

    /// Match `s` against the input pattern and split it into year digits,
    /// month, and day.
    fn accept(&self, s: &str) -> Result<(String, u32, u32)> {
        if s.is_empty() {
            return Err(Error::Format("date string cannot be empty".into()));
        }
        let captures = INPUT_PATTERN.captures(s).ok_or_else(|| invalid_input(s))?;
        if captures[2] != captures[4] {
            return Err(invalid_input(s));
        }
        let year = captures[1].to_string();
        let month = captures[3].parse().map_err(|_| invalid_input(s))?;
        let day = captures[5].parse().map_err(|_| invalid_input(s))?;
        Ok((year, month, day))
    }
}

impl std::fmt::Debug for DateFormatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateFormatEngine").finish_non_exhaustive()
    }
}
