// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for gotest-junit
//!
//! Every command-line argument belongs to `go test`, so nothing is parsed
//! as a flag of our own. The few settings this program has come from the
//! environment.

use std::ffi::{OsStr, OsString};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::runner::{DEFAULT_PROGRAM, GoTestRunner};

/// Environment variable naming the program to run instead of `go`
pub const PROGRAM_ENV: &str = "GOTEST_JUNIT_GO";

/// Environment variable holding log filter directives
pub const LOG_ENV: &str = "GOTEST_JUNIT_LOG";

/// Filter used when `GOTEST_JUNIT_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

const ARG_SEPARATOR: &str = "--";

/// Run `go test` and print its results as JUnit XML
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gotest-junit")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Config {
    /// Arguments passed through to `go test`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub go_args: Vec<OsString>,

    /// Program to run instead of `go`
    #[arg(skip)]
    pub program: Option<OsString>,

    /// Log filter directives
    #[arg(skip)]
    pub log: Option<String>,
}

impl Config {
    /// Parse the process arguments and read settings from the environment
    #[must_use]
    pub fn load() -> Self {
        Self::from_args(std::env::args_os()).with_env()
    }

    /// Parse `args`, the first of which is the program name
    ///
    /// clap swallows a `--` given as the first argument; it is put back so
    /// that `go test` sees exactly what was passed.
    #[must_use]
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut config = Self::parse_from(&args);
        if args.get(1).is_some_and(|arg| arg == ARG_SEPARATOR) {
            config.go_args.insert(0, OsString::from(ARG_SEPARATOR));
        }
        config
    }

    /// Fill unset settings from `GOTEST_JUNIT_GO` and `GOTEST_JUNIT_LOG`
    #[must_use]
    pub fn with_env(mut self) -> Self {
        if self.program.is_none() {
            self.program = std::env::var_os(PROGRAM_ENV).filter(|p| !p.is_empty());
        }
        if self.log.is_none() {
            self.log = std::env::var(LOG_ENV).ok().filter(|l| !l.is_empty());
        }
        self
    }

    /// Program to launch
    #[must_use]
    pub fn program(&self) -> &OsStr {
        self.program
            .as_deref()
            .unwrap_or_else(|| OsStr::new(DEFAULT_PROGRAM))
    }

    /// Runner for the configured program and arguments
    #[must_use]
    pub fn runner(&self) -> GoTestRunner {
        GoTestRunner::new(self.program(), self.go_args.iter().cloned())
    }

    /// Log filter, falling back to `warn`
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        self.log
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}
