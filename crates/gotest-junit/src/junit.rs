// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Serialize a [`Report`] as JUnit XML.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};
use thiserror::Error;

use crate::report::{Failure, Report, TestCase, TestSuite};

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static FAILURE_TAG: &str = "failure";

/// Errors writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// XML writer error
    #[error("XML serialization failed")]
    Xml(#[from] quick_xml::Error),

    /// Output stream error
    #[error("failed to write XML")]
    Io(#[from] io::Error),
}

/// Write `report` as an indented JUnit document
///
/// # Errors
///
/// Returns `ReportError` if `writer` fails.
pub fn write_report(report: &Report, writer: impl io::Write) -> Result<(), ReportError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    writer.write_event(Event::Start(BytesStart::new(TESTSUITES_TAG)))?;
    for suite in report.suites() {
        serialize_testsuite(suite, &mut writer)?;
    }
    writer.write_event(Event::End(BytesEnd::new(TESTSUITES_TAG)))?;

    // Add a trailing newline.
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Render `report` to a string
///
/// # Errors
///
/// Returns `ReportError` if serialization fails.
pub fn to_string(report: &Report) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_report(report, &mut buf)?;
    // Every byte written came from a `&str`.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn serialize_testsuite(
    suite: &TestSuite,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut tag = BytesStart::new(TESTSUITE_TAG);
    tag.push_attribute(("name", suite.name.as_str()));
    tag.push_attribute(("tests", suite.tests.to_string().as_str()));
    tag.push_attribute(("errors", suite.errors().to_string().as_str()));
    tag.push_attribute(("failures", suite.failures.to_string().as_str()));
    tag.push_attribute(("skip", suite.skipped.to_string().as_str()));
    writer.write_event(Event::Start(tag))?;

    for testcase in &suite.testcases {
        serialize_testcase(testcase, writer)?;
    }

    writer.write_event(Event::End(BytesEnd::new(TESTSUITE_TAG)))
}

fn serialize_testcase(
    testcase: &TestCase,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let TestCase {
        classname,
        name,
        time,
        failure,
    } = testcase;

    let mut tag = BytesStart::new(TESTCASE_TAG);
    tag.push_attribute(("classname", classname.as_str()));
    tag.push_attribute(("name", name.as_str()));
    tag.push_attribute(("time", serialize_time(*time).as_str()));

    match failure {
        None => writer.write_event(Event::Empty(tag)),
        Some(failure) => {
            writer.write_event(Event::Start(tag))?;
            serialize_failure(failure, writer)?;
            writer.write_event(Event::End(BytesEnd::new(TESTCASE_TAG)))
        }
    }
}

fn serialize_failure(
    failure: &Failure,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut tag = BytesStart::new(FAILURE_TAG);
    tag.push_attribute(("type", failure.ty.as_str()));
    tag.push_attribute(("message", failure.message.as_str()));

    if failure.body.is_empty() {
        return writer.write_event(Event::Empty(tag));
    }

    writer.write_event(Event::Start(tag))?;
    for section in cdata_sections(&failure.body) {
        writer.write_event(Event::CData(BytesCData::new(section)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(FAILURE_TAG)))
}

/// Split `text` so that no section contains `]]>`
///
/// Each `]]>` is cut after `]]`; concatenating the sections gives back
/// `text`.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find("]]>") {
        sections.push(&rest[..idx + 2]);
        rest = &rest[idx + 2..];
    }
    sections.push(rest);
    sections
}

// Seconds in shortest round-trip form.
fn serialize_time(time: f64) -> String {
    format!("{time}")
}
