//! # bizdays
//!
//! Business-day-aware date arithmetic over file-sourced holiday calendars.
//!
//! This crate is a **façade** that re-exports the workspace member crates.
//! Application code should depend on this crate rather than the individual
//! `bd-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! bizdays = "0.1"
//! ```
//!
//! ```rust
//! use bizdays::time::DateFormatEngine;
//!
//! let engine = DateFormatEngine::new();
//! let date = engine.parse("2017/12/29").unwrap().unwrap();
//! assert_eq!((date.year(), date.month(), date.day()), (2017, 12, 29));
//! assert_eq!(engine.format(date, "%d-%m-%Y").unwrap(), "29-12-2017");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and the diagnostic-sink capability.
pub use bd_core as core;

/// Dates, the format engine, holiday calendars, and the business-day
/// calculator.
pub use bd_time as time;
