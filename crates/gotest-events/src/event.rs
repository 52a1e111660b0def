// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test event types (from `go test -json`)
//!
//! Each line the Go test runner writes in JSON mode is one [`TestEvent`].
//! Field names follow the runner's own capitalised spelling; lower-case
//! spellings are accepted as well since Go's decoder ignores case.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a [`TestEvent`] reports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// The test binary is about to start
    Start,
    /// A test has started running
    Run,
    /// A parallel test was paused
    Pause,
    /// A paused test continues
    Cont,
    /// A test passed
    Pass,
    /// Benchmark log output
    Bench,
    /// A test or package failed
    Fail,
    /// Console output from a test or package
    Output,
    /// A test was skipped
    Skip,
    /// An action this crate does not know about
    Other(String),
}

impl Action {
    /// The action as it appears on the wire
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Run => "run",
            Self::Pause => "pause",
            Self::Cont => "cont",
            Self::Pass => "pass",
            Self::Bench => "bench",
            Self::Fail => "fail",
            Self::Output => "output",
            Self::Skip => "skip",
            Self::Other(other) => other,
        }
    }

    /// Whether this action ends a test (pass, fail or skip)
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Pass | Self::Fail | Self::Skip)
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        match value.as_str() {
            "start" => Self::Start,
            "run" => Self::Run,
            "pause" => Self::Pause,
            "cont" => Self::Cont,
            "pass" => Self::Pass,
            "bench" => Self::Bench,
            "fail" => Self::Fail,
            "output" => Self::Output,
            "skip" => Self::Skip,
            _ => Self::Other(value),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single event from `go test -json` output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestEvent {
    /// Test name; empty for package-level events
    #[serde(rename = "Test", alias = "test", skip_serializing_if = "String::is_empty")]
    pub test: String,
    /// Elapsed seconds, set on pass/fail/skip
    #[serde(rename = "Elapsed", alias = "elapsed")]
    pub elapsed: f64,
    /// Event kind
    #[serde(rename = "Action", alias = "action")]
    pub action: Action,
    /// Import path of the owning package
    #[serde(rename = "Package", alias = "package")]
    pub package: String,
    /// Raw console text, set on output events
    #[serde(rename = "Output", alias = "output", skip_serializing_if = "String::is_empty")]
    pub output: String,
}

impl TestEvent {
    /// Create an event for `test` in `package`
    #[must_use]
    pub fn new(action: Action, package: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            action,
            package: package.into(),
            test: test.into(),
            ..Self::default()
        }
    }

    /// Set the elapsed time
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Set the output text
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Whether the event concerns the package as a whole rather than a test
    #[must_use]
    pub fn is_package_level(&self) -> bool {
        self.test.is_empty()
    }
}
