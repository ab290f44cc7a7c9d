//! End-to-end calculator tests over real holiday files.

use std::io::Write;
use std::sync::{Arc, Mutex};

use bd_core::diag::DiagnosticSink;
use bd_core::errors::Error;
use bd_time::{BusinessDayCalculator, CalendarDate, HolidayCalendar};
use tempfile::NamedTempFile;

fn holiday_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create holiday file");
    for line in lines {
        writeln!(file, "{line}").expect("write holiday line");
    }
    file.flush().expect("flush holiday file");
    file
}

/// Christmas 2017 and New Year 2018, as the first CSV field per line.
fn standard_calendar() -> NamedTempFile {
    holiday_file(&["2017/12/25,Christmas Day", "2018/01/01,New Year's Day"])
}

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<String>>);

impl DiagnosticSink for RecordingSink {
    fn diagnostic(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

// ── Business-day shifting ─────────────────────────────────────────────────────

#[test]
fn next_business_day_skips_weekend_and_holiday() {
    let file = standard_calendar();
    // Friday before a Sat, Sun, and the New Year holiday.
    let mut calc = BusinessDayCalculator::new("2017/12/29", file.path()).unwrap();
    assert_eq!(calc.next_business_day().unwrap().render().unwrap(), "2018/01/02");
}

#[test]
fn previous_business_day_skips_back_over_the_same_gap() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::new("2018/01/02", file.path()).unwrap();
    assert_eq!(
        calc.previous_business_day().unwrap().render().unwrap(),
        "2017/12/29"
    );
}

#[test]
fn offset_applies_one_calendar_step_then_resolves_forward() {
    let file = standard_calendar();
    // Friday + 3 calendar days = the New Year holiday; resolves to Tuesday.
    let mut calc = BusinessDayCalculator::new("2017/12/29", file.path()).unwrap();
    assert_eq!(
        calc.business_day_offset(3).unwrap().render().unwrap(),
        "2018/01/02"
    );
}

#[test]
fn zero_offset_on_non_business_day_is_an_arithmetic_error() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::new("2018/01/01", file.path()).unwrap();
    let err = calc.move_by_business_days(0).unwrap_err();
    assert!(matches!(err, Error::Arithmetic(_)));
    // The tracked date is left untouched.
    assert_eq!(calc.date(), date(2018, 1, 1));
}

#[test]
fn zero_offset_on_business_day_stays_put() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::new("2017/12/28", file.path()).unwrap();
    assert_eq!(
        calc.move_by_business_days(0).unwrap().render().unwrap(),
        "2017/12/28"
    );
}

#[test]
fn weekend_only_skipping_without_holidays_in_the_way() {
    let file = standard_calendar();
    // Friday 2018-03-09: next business day is Monday the 12th.
    let mut calc = BusinessDayCalculator::new("2018/03/09", file.path()).unwrap();
    assert_eq!(calc.next_business_day().unwrap().render().unwrap(), "2018/03/12");
}

#[test]
fn is_business_day_matches_the_glossary() {
    let file = standard_calendar();
    let business = |s: &str| {
        BusinessDayCalculator::new(s, file.path())
            .unwrap()
            .is_business_day()
    };
    assert!(business("2017/12/29")); // Friday
    assert!(!business("2017/12/30")); // Saturday
    assert!(!business("2017/12/31")); // Sunday
    assert!(!business("2018/01/01")); // holiday
    assert!(business("2018/01/02")); // Tuesday
}

// ── Calendar offsets ──────────────────────────────────────────────────────────

#[test]
fn leap_day_plus_one_year_clamps_to_feb_28() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::new("2000/02/29", file.path()).unwrap();
    assert_eq!(
        calc.shift_calendar(1, 0, 0).unwrap().render().unwrap(),
        "2001/02/28"
    );
}

#[test]
fn shift_composes_years_then_months_then_days() {
    let file = standard_calendar();
    // 2019-01-31 → +1y = 2020-01-31 → +1m = 2020-02-29 (leap clamp) → +1d.
    let mut combined = BusinessDayCalculator::new("2019/01/31", file.path()).unwrap();
    combined.shift_calendar(1, 1, 1).unwrap();
    assert_eq!(combined.render().unwrap(), "2020/03/01");

    // Sequential application of the individual offsets agrees.
    let mut sequential = BusinessDayCalculator::new("2019/01/31", file.path()).unwrap();
    sequential
        .shift_calendar(1, 0, 0)
        .unwrap()
        .shift_calendar(0, 1, 0)
        .unwrap()
        .shift_calendar(0, 0, 1)
        .unwrap();
    assert_eq!(sequential.date(), combined.date());
}

#[test]
fn operations_chain() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::new("2017/12/22", file.path()).unwrap();
    // Friday + 3 calendar days lands on the Christmas holiday, which a
    // zero movement cannot resolve; one forward step can.
    let err = calc
        .shift_calendar(0, 0, 3)
        .unwrap()
        .move_by_business_days(0)
        .unwrap_err();
    assert!(matches!(err, Error::Arithmetic(_)));
    assert_eq!(
        calc.next_business_day().unwrap().render().unwrap(),
        "2017/12/26"
    );
}

// ── Construction contract ─────────────────────────────────────────────────────

#[test]
fn missing_holiday_file_is_a_resource_error() {
    let err = BusinessDayCalculator::new("2018/01/02", "/no/such/holidays.cal").unwrap_err();
    assert!(matches!(err, Error::Resource(_)));
}

#[test]
fn empty_holiday_file_is_a_resource_error() {
    let file = NamedTempFile::new().unwrap();
    let err = BusinessDayCalculator::new("2018/01/02", file.path()).unwrap_err();
    assert!(matches!(err, Error::Resource(_)));
}

#[test]
fn lenient_reader_tolerates_the_same_bad_files() {
    // The plain calendar reader gives no business-day guarantee and must
    // not fail where the calculator does.
    let missing = HolidayCalendar::load("/no/such/holidays.cal");
    assert!(missing.holidays().is_empty());

    let empty = NamedTempFile::new().unwrap();
    let empty_cal = HolidayCalendar::load(empty.path());
    assert!(empty_cal.holidays().is_empty());
}

#[test]
fn malformed_source_date_is_a_format_error() {
    let file = standard_calendar();
    let err = BusinessDayCalculator::new("2018-13-01", file.path()).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn uninterpretable_source_date_is_a_date_error() {
    let file = standard_calendar();
    // Passes the input pattern, but Feb 30 is not constructible.
    let err = BusinessDayCalculator::new("2018/02/30", file.path()).unwrap_err();
    assert!(matches!(err, Error::Date(_)));
}

#[test]
fn garbled_lines_degrade_to_a_partial_set_with_diagnostics() {
    let file = holiday_file(&[
        "2017/12/25,Christmas Day",
        "garbage line",
        "2018/02/30,impossible",
        "2018/01/01,New Year's Day",
    ]);
    let sink = Arc::new(RecordingSink::default());
    let calc = BusinessDayCalculator::builder("2018/01/02", file.path())
        .with_diagnostics(sink.clone())
        .build()
        .unwrap();
    assert_eq!(calc.holidays().len(), 2);
    assert!(calc.holidays().contains(date(2017, 12, 25)));
    assert!(calc.holidays().contains(date(2018, 1, 1)));
    assert!(!sink.0.lock().unwrap().is_empty());
}

#[test]
fn duplicate_holiday_lines_collapse() {
    let file = holiday_file(&["2018/01/01", "2018/01/01,again", "18/01/01,two-digit year"]);
    let calc = BusinessDayCalculator::new("2018/01/02", file.path()).unwrap();
    assert_eq!(calc.holidays().len(), 1);
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn render_is_idempotent_until_the_date_moves() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::new("2018/01/02", file.path()).unwrap();
    let first = calc.render().unwrap();
    assert_eq!(calc.render().unwrap(), first);
    calc.next_business_day().unwrap();
    assert_eq!(calc.render().unwrap(), "2018/01/03");
}

#[test]
fn render_with_leaves_state_alone() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::builder("2018/01/02", file.path())
        .with_output_format("%Y/%m/%d")
        .build()
        .unwrap();

    assert_eq!(calc.render_with("%d-%m-%Y").unwrap(), "02-01-2018");
    assert_eq!(calc.render_with("%Y.%m.%d.").unwrap(), "2018.01.02.");
    // The configured template and tracked date are untouched.
    assert_eq!(calc.date(), date(2018, 1, 2));
    assert_eq!(calc.render().unwrap(), "2018/01/02");

    let err = calc.render_with("YYYY-MM-DD").unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn configured_output_format_is_used_by_render() {
    let file = standard_calendar();
    let mut calc = BusinessDayCalculator::builder("2017/12/29", file.path())
        .with_output_format("%d-%m-%Y")
        .build()
        .unwrap();
    assert_eq!(calc.render().unwrap(), "29-12-2017");
}
