// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gotest-events

use thiserror::Error;

/// Errors that can occur while reading a `go test -json` stream
#[derive(Debug, Error)]
pub enum EventsError {
    /// Error reading from the underlying stream
    #[error("failed to read test output")]
    Io(#[from] std::io::Error),

    /// A line was not a valid test event
    #[error("invalid test event on line {line}")]
    Decode {
        /// 1-based line number within the stream
        line: usize,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl EventsError {
    /// Line number of a decode error, if this is one
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Decode { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}
