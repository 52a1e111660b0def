// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the event stream parser
//!
//! Arbitrary bytes are fed through `EventReader`; decoding may fail but
//! must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::EventReader;

fuzz_target!(|data: &[u8]| {
    for event in EventReader::new(data) {
        if event.is_err() {
            break;
        }
    }
});
