// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value as JsonValue;

use crate::model::CellValue;

/// Columns rendered as long-form dates.
const DATE_COLUMNS: &[&str] = &["startDate"];
/// Columns rendered as clock times.
const TIME_COLUMNS: &[&str] = &["timeIn", "timeOut"];

/// Display form of one scorecard cell: `-` for absent, `Yes`/`No` for
/// booleans, and column-aware date/time rendering for the well-known fields.
pub fn format_cell(column: &str, value: &CellValue) -> String {
    match value {
        CellValue::Absent => "-".to_owned(),
        CellValue::Bool(flag) => yes_no(*flag),
        CellValue::Number(number) => number.to_string(),
        CellValue::Text(text) => format_text_cell(column, text),
    }
}

/// Display form of one raw-record cell in the table view.
pub fn format_json_cell(column: &str, value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "-".to_owned(),
        JsonValue::Bool(flag) => yes_no(*flag),
        JsonValue::Number(number) => number.to_string(),
        JsonValue::String(text) if text.is_empty() => "-".to_owned(),
        JsonValue::String(text) => format_text_cell(column, text),
        composite => composite.to_string(),
    }
}

fn format_text_cell(column: &str, text: &str) -> String {
    if DATE_COLUMNS.contains(&column) {
        return format_date(text);
    }
    if TIME_COLUMNS.contains(&column) {
        return format_time(text);
    }
    text.to_owned()
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_owned()
}

/// `2026-03-21` / `2026-03-21T09:00:00` to `Saturday, March 21, 2026`.
/// Unparseable input passes through unchanged.
pub fn format_date(raw: &str) -> String {
    let date = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|stamp| stamp.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => raw.to_owned(),
    }
}

/// `2026-03-21T09:00:00` / `09:00:00` to `09:00`. Unparseable input passes
/// through unchanged.
pub fn format_time(raw: &str) -> String {
    let time = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|stamp| stamp.time())
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"));
    match time {
        Ok(time) => time.format("%H:%M").to_string(),
        Err(_) => raw.to_owned(),
    }
}

/// camelCase field name to a spaced, capitalized header: `positionName`
/// becomes `Position Name`.
pub fn header_label(field: &str) -> String {
    static CAMEL_BOUNDARY: OnceLock<Regex> = OnceLock::new();
    let boundary = CAMEL_BOUNDARY
        .get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary pattern"));

    let spaced = boundary.replace_all(field, "$1 $2");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
