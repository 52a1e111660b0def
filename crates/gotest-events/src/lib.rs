// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-events: Event model for `go test -json`
//!
//! This library crate decodes the newline-delimited JSON stream that the Go
//! test runner writes in JSON mode into typed [`TestEvent`] records, in the
//! order they were emitted.
//!
//! # Example
//!
//! ```
//! use gotest_events::{parse_events, Action};
//!
//! let output = br#"{"Action":"pass","Package":"pkg","Test":"TestA","Elapsed":0.01}"#;
//! let events = parse_events(&output[..]).unwrap();
//! assert_eq!(events[0].action, Action::Pass);
//! ```

pub mod error;
pub mod event;
pub mod parser;

pub use error::EventsError;
pub use event::{Action, TestEvent};
pub use parser::{EventReader, parse_event, parse_events};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::EventsError;
    pub use crate::event::{Action, TestEvent};
    pub use crate::parser::parse_events;
}
