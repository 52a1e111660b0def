// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running `go test -json`
//!
//! The child's stdout goes to a temporary file which is read back once the
//! child has exited. The file is owned by a [`tempfile::NamedTempFile`]
//! guard and removed when [`GoTestRunner::run`] returns, whatever the
//! outcome.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Program launched when none is configured
pub const DEFAULT_PROGRAM: &str = "go";

/// Subcommand passed to the program
pub const TEST_SUBCOMMAND: &str = "test";

/// Flag requesting the JSON event stream; always injected exactly once
pub const JSON_FLAG: &str = "-json";

/// Name prefix of the capture file
pub const CAPTURE_PREFIX: &str = "gotest-junit";

/// Errors that prevent a report from being produced
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The capture file could not be created
    #[error("failed to create capture file")]
    TempFile(#[source] io::Error),

    /// The test runner could not be started
    #[error("failed to start `{program}`")]
    Launch {
        /// Program that was launched
        program: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// The captured output could not be read back
    #[error("failed to read captured output")]
    Capture(#[source] io::Error),
}

/// How the child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    code: i32,
}

impl ChildExit {
    /// Wrap a raw exit code
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        Self { code }
    }

    fn from_status(status: ExitStatus) -> Self {
        // Killed by a signal: no code.
        Self::from_code(status.code().unwrap_or(-1))
    }

    /// Exit code, or -1 if the child was terminated by a signal
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Whether the child exited with status 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Code to exit this process with; out-of-range codes become 255
    #[must_use]
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.code).unwrap_or(u8::MAX)
    }
}

/// Result of one launch attempt
#[derive(Debug)]
pub enum Launch {
    /// The child ran to completion, whatever its exit code
    Exited(ChildExit),
    /// The child never ran
    FailedToStart(io::Error),
}

/// Everything the child wrote to stdout, and how it exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Raw stdout bytes
    pub output: Vec<u8>,
    /// Exit code of the child
    pub exit: ChildExit,
}

/// Launches `go test -json` with forwarded arguments
#[derive(Debug, Clone)]
pub struct GoTestRunner {
    program: OsString,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl GoTestRunner {
    /// Create a runner for `program`
    ///
    /// Any forwarded argument equal to `-json` is dropped; the flag is
    /// always added once, directly after the subcommand.
    pub fn new<I, S>(program: impl Into<OsString>, forwarded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = [OsString::from(TEST_SUBCOMMAND), OsString::from(JSON_FLAG)]
            .into_iter()
            .chain(
                forwarded
                    .into_iter()
                    .map(Into::into)
                    .filter(|arg: &OsString| arg.as_os_str() != OsStr::new(JSON_FLAG)),
            )
            .collect();

        Self {
            program: program.into(),
            args,
            current_dir: None,
        }
    }

    /// Run the child in `dir` instead of the current directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Directory the child runs in, if not the current one
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Program that will be launched
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Full argument list, starting with the subcommand
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    fn command(&self, stdout: File) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run the child to completion with stdout going to `stdout`
    pub fn launch(&self, stdout: File) -> Launch {
        let mut cmd = self.command(stdout);
        debug!(command = ?cmd, "Launching test runner");
        match cmd.status() {
            Ok(status) => Launch::Exited(ChildExit::from_status(status)),
            Err(e) => Launch::FailedToStart(e),
        }
    }

    /// Run the tests and return their captured output
    ///
    /// A non-zero exit code is not an error; it is returned in the
    /// [`Capture`].
    ///
    /// # Errors
    ///
    /// Returns `RunnerError` if the capture file cannot be created or read,
    /// or the program cannot be started.
    pub fn run(&self) -> Result<Capture, RunnerError> {
        let mut capture = tempfile::Builder::new()
            .prefix(CAPTURE_PREFIX)
            .tempfile()
            .map_err(RunnerError::TempFile)?;
        debug!(path = %capture.path().display(), "Created capture file");

        let stdout = capture
            .as_file()
            .try_clone()
            .map_err(RunnerError::TempFile)?;

        let exit = match self.launch(stdout) {
            Launch::Exited(exit) => exit,
            Launch::FailedToStart(source) => {
                return Err(RunnerError::Launch {
                    program: self.program.to_string_lossy().into_owned(),
                    source,
                });
            }
        };
        info!(code = exit.code(), "Test runner exited");

        let file = capture.as_file_mut();
        file.seek(SeekFrom::Start(0)).map_err(RunnerError::Capture)?;
        let mut output = Vec::new();
        file.read_to_end(&mut output).map_err(RunnerError::Capture)?;
        debug!(bytes = output.len(), "Read captured output");

        Ok(Capture { output, exit })
    }
}

impl Default for GoTestRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, Vec::<OsString>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn args_of(runner: &GoTestRunner) -> Vec<String> {
        runner
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_default_args() {
        let runner = GoTestRunner::default();
        assert_eq!(runner.program(), OsStr::new("go"));
        assert_eq!(args_of(&runner), vec!["test", "-json"]);
    }

    #[test]
    fn test_forwarded_args_keep_order() {
        let runner = GoTestRunner::new("go", ["-run", "TestFoo", "-count=1", "./..."]);
        assert_eq!(
            args_of(&runner),
            vec!["test", "-json", "-run", "TestFoo", "-count=1", "./..."]
        );
    }

    #[test]
    fn test_json_flag_filtered() {
        let runner = GoTestRunner::new("go", ["-json", "./...", "-json", "-v"]);
        assert_eq!(args_of(&runner), vec!["test", "-json", "./...", "-v"]);
    }

    #[test]
    fn test_only_exact_json_flag_filtered() {
        let runner = GoTestRunner::new("go", ["--json", "-json=true", "-jsonx"]);
        assert_eq!(
            args_of(&runner),
            vec!["test", "-json", "--json", "-json=true", "-jsonx"]
        );
    }

    #[test]
    fn test_process_exit_code() {
        assert_eq!(ChildExit::from_code(0).process_exit_code(), 0);
        assert_eq!(ChildExit::from_code(1).process_exit_code(), 1);
        assert_eq!(ChildExit::from_code(2).process_exit_code(), 2);
        assert_eq!(ChildExit::from_code(-1).process_exit_code(), 255);
        assert_eq!(ChildExit::from_code(300).process_exit_code(), 255);
        assert!(ChildExit::from_code(0).success());
        assert!(!ChildExit::from_code(1).success());
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let runner = GoTestRunner::new("gotest-junit-no-such-program-4b1d", Vec::<String>::new());
        let err = runner.run().expect_err("Should fail to start");
        assert!(matches!(err, RunnerError::Launch { .. }));
        assert!(err.to_string().contains("gotest-junit-no-such-program-4b1d"));
    }

    #[test]
    fn test_launch_reports_failed_to_start() {
        let runner = GoTestRunner::new("gotest-junit-no-such-program-4b1d", Vec::<String>::new());
        let file = tempfile::tempfile().expect("temp file");
        assert!(matches!(runner.launch(file), Launch::FailedToStart(_)));
    }
}
