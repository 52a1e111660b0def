// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Attach console output to failed tests
//!
//! `go test -json` reports output as separate events, interleaved with other
//! tests of the same package. Once every failure is known, the whole event
//! sequence is scanned again and each output line whose test name matches a
//! failure is appended to that failure's body.

use gotest_events::{Action, TestEvent};
use tracing::debug;

use crate::report::Report;

/// Prefix of the line the runner prints when a test starts
pub const RUN_MARKER: &str = "=== RUN";

/// Marker in the line the runner prints when a test fails
pub const FAIL_MARKER: &str = "--- FAIL";

/// Whether an output line is the runner's own framing rather than test output
#[must_use]
pub fn is_framing_line(output: &str) -> bool {
    output.starts_with(RUN_MARKER) || output.contains(FAIL_MARKER)
}

/// Second pass: append output events to the failures they belong to
///
/// Suites without failures are skipped. Output is matched on test name
/// alone, against the full event sequence.
pub fn attach_failure_output(report: &mut Report, events: &[TestEvent]) {
    for suite in report.suites_mut() {
        if !suite.has_failures() {
            continue;
        }

        let mut attached = 0usize;
        for event in events {
            if event.action != Action::Output || is_framing_line(&event.output) {
                continue;
            }
            if let Some(failure) = suite.failure_mut(&event.test) {
                failure.body.push_str(&event.output);
                attached += 1;
            }
        }
        debug!(suite = %suite.name, lines = attached, "Attached failure output");
    }
}
