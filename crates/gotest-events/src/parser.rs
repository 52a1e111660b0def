// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Parsing of `go test -json` output
//!
//! The output is newline-delimited JSON, one [`TestEvent`] per line.
//!
//! # Example
//!
//! ```
//! use gotest_events::parser::parse_events;
//!
//! let output = br#"{"Action":"run","Package":"pkg","Test":"TestA"}
//! {"Action":"pass","Package":"pkg","Test":"TestA","Elapsed":0.01}
//! "#;
//! let events = parse_events(&output[..]).unwrap();
//! assert_eq!(events.len(), 2);
//! ```

use std::io::BufRead;

use tracing::debug;

use crate::error::EventsError;
use crate::event::TestEvent;

/// Iterator over the events in a `go test -json` stream
///
/// Yields one item per non-blank line. After the first error the iterator
/// is exhausted.
pub struct EventReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> EventReader<R> {
    /// Create a reader over `reader`
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far, blank ones included
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<TestEvent, EventsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line += 1;

            let line = self.buf.trim_ascii();
            if line.is_empty() {
                continue;
            }

            let event = serde_json::from_slice(line).map_err(|source| EventsError::Decode {
                line: self.line,
                source,
            });
            if event.is_err() {
                self.done = true;
            }
            return Some(event);
        }
    }
}

/// Parse a complete `go test -json` stream
///
/// Events are returned in line order.
///
/// # Errors
///
/// Returns `EventsError::Decode` for the first line that is not a valid
/// event and `EventsError::Io` if reading fails. No events are returned in
/// either case.
pub fn parse_events<R: BufRead>(reader: R) -> Result<Vec<TestEvent>, EventsError> {
    let events = EventReader::new(reader).collect::<Result<Vec<_>, _>>()?;
    debug!(count = events.len(), "Parsed test events");
    Ok(events)
}

/// Parse a single event line
///
/// # Errors
///
/// Returns `EventsError::Decode` if the JSON is invalid.
pub fn parse_event(json: &str) -> Result<TestEvent, EventsError> {
    serde_json::from_str(json).map_err(|source| EventsError::Decode { line: 1, source })
}
