// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-junit: run `go test` and print a JUnit XML report
//!
//! All arguments are forwarded to `go test`. The report goes to stdout and
//! the exit code is the one `go test` exited with.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::error;

use gotest_junit::config::Config;
use gotest_junit::runner::ChildExit;

fn main() -> ExitCode {
    let config = Config::load();

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(io::stderr)
        .init();

    match run(&config) {
        Ok(exit) => ExitCode::from(exit.process_exit_code()),
        Err(err) => {
            error!(error = %format!("{err:#}"), "No report produced");
            eprintln!("gotest-junit: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<ChildExit> {
    let mut out = io::BufWriter::new(io::stdout().lock());
    let exit = gotest_junit::run(&config.runner(), &mut out)
        .with_context(|| format!("running `{} test`", config.program().to_string_lossy()))?;
    out.flush().context("failed to write report")?;
    Ok(exit)
}
