// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-junit library
//!
//! Runs `go test -json`, folds its event stream into per-package suites and
//! writes them out as JUnit XML. The stages are exported separately for use
//! in tests and by other tools:
//!
//! 1. [`runner`]: launch the test runner and capture its stdout
//! 2. [`gotest_events::parse_events`]: decode the captured stream
//! 3. [`report`]: aggregate events into suites
//! 4. [`correlate`]: attach output to failed tests
//! 5. [`junit`]: serialize the report
//!
//! # Example
//!
//! ```no_run
//! use gotest_junit::runner::GoTestRunner;
//!
//! let runner = GoTestRunner::new("go", ["./..."]);
//! let exit = gotest_junit::run(&runner, std::io::stdout()).unwrap();
//! std::process::exit(exit.code());
//! ```

use std::io;

use gotest_events::{EventsError, TestEvent, parse_events};
use thiserror::Error;
use tracing::info;

pub mod config;
pub mod correlate;
pub mod junit;
pub mod report;
pub mod runner;

use junit::ReportError;
use report::Report;
use runner::{ChildExit, GoTestRunner, RunnerError};

/// Errors that abort a run before a report is written
#[derive(Debug, Error)]
pub enum Error {
    /// Running `go test` failed
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// The captured output was not a valid event stream
    #[error("failed to parse test output")]
    Events(#[from] EventsError),

    /// The report could not be written
    #[error("failed to write report")]
    Report(#[from] ReportError),
}

/// Build a report from parsed events and write it to `out`
///
/// # Errors
///
/// Returns `ReportError` if writing fails.
pub fn write_events(events: &[TestEvent], out: impl io::Write) -> Result<(), ReportError> {
    let report = Report::from_events(events);
    info!(
        suites = report.len(),
        tests = report.total_tests(),
        failures = report.total_failures(),
        "Built test report"
    );
    junit::write_report(&report, out)
}

/// Run the tests and write their JUnit report to `out`
///
/// Nothing is written unless the tests ran and their output parsed. The
/// child's exit is returned so the caller can propagate it.
///
/// # Errors
///
/// Returns `Error` if the runner fails, its output is malformed, or `out`
/// cannot be written.
pub fn run(runner: &GoTestRunner, out: impl io::Write) -> Result<ChildExit, Error> {
    let capture = runner.run()?;
    let events = parse_events(&capture.output[..])?;
    write_events(&events, out)?;
    Ok(capture.exit)
}
