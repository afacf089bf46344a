//! Line codec for the postcard file format.
//!
//! One record per line:
//!
//! ```text
//! date:2009-12-24; from:Daisy; to:Donald;
//! ```
//!
//! Names may contain anything except `;`. The date is three digit groups
//! joined by `-` and must name a real calendar day.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::{
    error::{StoreError, StoreResult},
    postcard::{PostcardDraft, PostcardEntry},
    types::Position,
};

const LINE_PATTERN: &str = r"^date:([0-9]{1,4})-([0-9]{1,2})-([0-9]{1,2}); from:([^;]+); to:([^;]+);$";

fn line_regex() -> &'static Regex {
    static LINE: OnceLock<Regex> = OnceLock::new();
    LINE.get_or_init(|| Regex::new(LINE_PATTERN).expect("line pattern compiles"))
}

/// Removes at most one trailing `\n` or `\r\n`.
fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}

/// Extracts the record fields of `line` without assigning a position.
pub fn parse_draft(line: &str) -> StoreResult<PostcardDraft> {
    let body = strip_terminator(line);
    let caps = line_regex()
        .captures(body)
        .ok_or_else(|| StoreError::malformed(body, "unrecognized shape"))?;

    let date = match (caps[1].parse(), caps[2].parse(), caps[3].parse()) {
        (Ok(year), Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day),
        _ => None,
    }
    .ok_or_else(|| StoreError::malformed(body, "invalid calendar date"))?;

    Ok(PostcardDraft {
        sender: caps[4].to_string(),
        receiver: caps[5].to_string(),
        date,
    })
}

/// Parses one line into an entry stamped with `position`.
pub fn parse_line(line: &str, position: Position) -> StoreResult<PostcardEntry> {
    parse_draft(line).map(|draft| draft.into_entry(position))
}

/// Renders `entry` as its canonical line, terminator included.
pub fn format(entry: &PostcardEntry) -> String {
    format!(
        "date:{:04}-{:02}-{:02}; from:{}; to:{};\n",
        entry.date.year(),
        entry.date.month(),
        entry.date.day(),
        entry.sender,
        entry.receiver
    )
}
