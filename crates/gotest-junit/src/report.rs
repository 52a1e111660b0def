// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Aggregated test report
//!
//! A [`Report`] holds one [`TestSuite`] per Go package, in the order each
//! package first appeared in the event stream. It is built in two passes
//! over the same events: [`Report::aggregate`] counts outcomes and records
//! test cases, then [`crate::correlate::attach_failure_output`] fills in the
//! output of failed tests.

use std::collections::HashMap;

use gotest_events::{Action, TestEvent};
use indexmap::IndexMap;
use tracing::debug;

use crate::correlate;

/// `type` attribute of every failure
pub const FAILURE_TYPE: &str = "go.error";

/// `message` attribute of every failure
pub const FAILURE_MESSAGE: &str = "error";

/// Diagnostic payload of a failed test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Failure type tag
    pub ty: String,
    /// Failure message tag
    pub message: String,
    /// Output the test printed, minus the runner's framing lines
    pub body: String,
}

impl Default for Failure {
    fn default() -> Self {
        Self {
            ty: FAILURE_TYPE.to_string(),
            message: FAILURE_MESSAGE.to_string(),
            body: String::new(),
        }
    }
}

/// Terminal outcome of one test
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Owning package
    pub classname: String,
    /// Test name
    pub name: String,
    /// Elapsed seconds
    pub time: f64,
    /// Set when the test failed
    pub failure: Option<Failure>,
}

/// All test cases of one package
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuite {
    /// Package import path
    pub name: String,
    /// Number of test cases
    pub tests: usize,
    /// Number of failed test cases
    pub failures: usize,
    /// Number of skipped test cases
    pub skipped: usize,
    /// Test cases in arrival order
    pub testcases: Vec<TestCase>,
    /// Test name -> index of its latest failing test case
    failed: HashMap<String, usize>,
}

impl TestSuite {
    /// Create an empty suite for `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: 0,
            failures: 0,
            skipped: 0,
            testcases: Vec::new(),
            failed: HashMap::new(),
        }
    }

    /// Errors are never reported separately from failures
    #[must_use]
    pub fn errors(&self) -> usize {
        0
    }

    /// Whether any test case in the suite failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Fold one event into the suite
    ///
    /// Only pass, fail and skip events for a named test have an effect.
    /// Every terminal event adds its own test case, so a test reported
    /// twice appears twice.
    pub fn record(&mut self, event: &TestEvent) {
        if event.is_package_level() {
            return;
        }

        let failure = match event.action {
            Action::Pass => None,
            Action::Fail => {
                self.failures += 1;
                self.failed.insert(event.test.clone(), self.testcases.len());
                Some(Failure::default())
            }
            Action::Skip => {
                self.skipped += 1;
                None
            }
            _ => return,
        };

        self.tests += 1;
        self.testcases.push(TestCase {
            classname: self.name.clone(),
            name: event.test.clone(),
            time: event.elapsed,
            failure,
        });
    }

    /// Failure registered for `test`, if it failed
    pub fn failure_mut(&mut self, test: &str) -> Option<&mut Failure> {
        let index = *self.failed.get(test)?;
        self.testcases[index].failure.as_mut()
    }

    /// Failure registered for `test`, if it failed
    #[must_use]
    pub fn failure(&self, test: &str) -> Option<&Failure> {
        let index = *self.failed.get(test)?;
        self.testcases[index].failure.as_ref()
    }
}

/// Test suites keyed by package, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    suites: IndexMap<String, TestSuite>,
}

impl Report {
    /// Build a complete report: aggregate, then correlate failure output
    #[must_use]
    pub fn from_events(events: &[TestEvent]) -> Self {
        let mut report = Self::aggregate(events);
        correlate::attach_failure_output(&mut report, events);
        report
    }

    /// First pass: group events into suites and count outcomes
    ///
    /// Failure bodies are left empty.
    #[must_use]
    pub fn aggregate(events: &[TestEvent]) -> Self {
        let mut report = Self::default();
        for event in events {
            if event.package.is_empty() {
                continue;
            }
            report
                .suites
                .entry(event.package.clone())
                .or_insert_with(|| {
                    debug!(package = %event.package, "New test suite");
                    TestSuite::new(event.package.clone())
                })
                .record(event);
        }
        report
    }

    /// Suites in arrival order
    pub fn suites(&self) -> impl Iterator<Item = &TestSuite> {
        self.suites.values()
    }

    /// Suites in arrival order, mutably
    pub fn suites_mut(&mut self) -> impl Iterator<Item = &mut TestSuite> {
        self.suites.values_mut()
    }

    /// Suite for `package`
    #[must_use]
    pub fn suite(&self, package: &str) -> Option<&TestSuite> {
        self.suites.get(package)
    }

    /// Number of suites
    #[must_use]
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Whether the report has no suites
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// Test cases across all suites
    #[must_use]
    pub fn total_tests(&self) -> usize {
        self.suites().map(|s| s.tests).sum()
    }

    /// Failed test cases across all suites
    #[must_use]
    pub fn total_failures(&self) -> usize {
        self.suites().map(|s| s.failures).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn pass(package: &str, test: &str) -> TestEvent {
        TestEvent::new(Action::Pass, package, test).with_elapsed(0.01)
    }

    fn fail(package: &str, test: &str) -> TestEvent {
        TestEvent::new(Action::Fail, package, test).with_elapsed(0.02)
    }

    fn skip(package: &str, test: &str) -> TestEvent {
        TestEvent::new(Action::Skip, package, test)
    }

    #[test]
    fn test_suites_in_first_seen_order() {
        let events = vec![
            pass("zeta", "TestA"),
            pass("alpha", "TestB"),
            pass("zeta", "TestC"),
            pass("mid", "TestD"),
        ];
        let report = Report::aggregate(&events);
        let names: Vec<&str> = report.suites().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_counts_per_outcome() {
        let events = vec![
            pass("p", "TestA"),
            fail("p", "TestB"),
            skip("p", "TestC"),
            pass("p", "TestD"),
        ];
        let report = Report::aggregate(&events);
        let suite = report.suite("p").expect("suite p");
        assert_eq!(suite.tests, 4);
        assert_eq!(suite.failures, 1);
        assert_eq!(suite.skipped, 1);
        assert_eq!(suite.errors(), 0);
        assert!(suite.has_failures());
    }

    #[test]
    fn test_fail_creates_failure_detail() {
        let report = Report::aggregate(&[fail("p", "TestB")]);
        let case = &report.suite("p").expect("suite").testcases[0];
        assert_eq!(case.classname, "p");
        assert_eq!(case.name, "TestB");
        assert_eq!(case.time, 0.02);
        assert_eq!(
            case.failure,
            Some(Failure {
                ty: "go.error".to_string(),
                message: "error".to_string(),
                body: String::new(),
            })
        );
    }

    #[test]
    fn test_pass_and_skip_have_no_failure() {
        let report = Report::aggregate(&[pass("p", "TestA"), skip("p", "TestS")]);
        let suite = report.suite("p").expect("suite");
        assert!(suite.testcases.iter().all(|c| c.failure.is_none()));
        assert!(!suite.has_failures());
    }

    #[test]
    fn test_package_level_events_create_suite_without_cases() {
        let events = vec![
            TestEvent::new(Action::Start, "p", ""),
            TestEvent::new(Action::Output, "p", "").with_output("ok  \tp\t0.001s\n"),
            TestEvent::new(Action::Pass, "p", "").with_elapsed(0.001),
        ];
        let report = Report::aggregate(&events);
        let suite = report.suite("p").expect("suite");
        assert_eq!(suite.tests, 0);
        assert!(suite.testcases.is_empty());
    }

    #[test]
    fn test_events_without_package_are_ignored() {
        let report = Report::aggregate(&[pass("", "TestA")]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_non_terminal_actions_ignored() {
        let events = vec![
            TestEvent::new(Action::Run, "p", "TestA"),
            TestEvent::new(Action::Pause, "p", "TestA"),
            TestEvent::new(Action::Cont, "p", "TestA"),
            TestEvent::new(Action::Output, "p", "TestA").with_output("hi\n"),
            TestEvent::new(Action::Other("frobnicate".to_string()), "p", "TestA"),
        ];
        let report = Report::aggregate(&events);
        assert_eq!(report.len(), 1);
        assert_eq!(report.total_tests(), 0);
    }

    #[test]
    fn test_duplicate_terminal_events_are_kept() {
        let events = vec![fail("p", "TestFlaky"), pass("p", "TestFlaky")];
        let report = Report::aggregate(&events);
        let suite = report.suite("p").expect("suite");
        assert_eq!(suite.tests, 2);
        assert_eq!(suite.failures, 1);
        assert_eq!(suite.testcases.len(), 2);
    }

    #[test]
    fn test_failure_lookup_points_at_latest_failure() {
        let events = vec![fail("p", "TestT"), fail("p", "TestT")];
        let mut report = Report::aggregate(&events);
        let suite = report.suites_mut().next().expect("suite");
        suite.failure_mut("TestT").expect("failure").body.push_str("x");

        assert_eq!(suite.testcases[0].failure.as_ref().map(|f| f.body.as_str()), Some(""));
        assert_eq!(suite.testcases[1].failure.as_ref().map(|f| f.body.as_str()), Some("x"));
    }

    #[test]
    fn test_totals_across_suites() {
        let events = vec![pass("a", "T1"), fail("b", "T2"), fail("a", "T3")];
        let report = Report::aggregate(&events);
        assert_eq!(report.total_tests(), 3);
        assert_eq!(report.total_failures(), 2);
        assert!(report.suite("b").expect("b").failure("T2").is_some());
        assert!(report.suite("a").expect("a").failure("T1").is_none());
    }
}
