// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value as JsonValue};

use super::payload::{RawRecord, RawResponse};

/// A structured query reply with all three field shapes: parallel arrays,
/// a keyed object, and a broadcast scalar.
pub(crate) fn demo_query_payload() -> JsonValue {
    json!({
        "positionName": ["Usher", "Security Guard", "Bartender"],
        "startDate": ["2026-03-21", "2026-03-21", "2026-03-22"],
        "timeIn": ["2026-03-21T09:00:00", "2026-03-21T17:00:00", "2026-03-22T18:00:00"],
        "timeOut": ["2026-03-21T17:00:00", "2026-03-22T01:00:00", "2026-03-23T02:00:00"],
        "quantity": {"usher": 4, "guard": 2, "bartender": 3},
        "overNightShift": [false, true, true],
        "attire": "Black polo, black trousers",
    })
}

pub(crate) fn demo_response() -> RawResponse {
    RawResponse::from_json(&demo_query_payload()).expect("demo payload is an object")
}

pub(crate) fn demo_detail_payload() -> JsonValue {
    json!([
        {
            "positionId": "pos-101",
            "positionName": "Usher",
            "startDate": "2026-03-21",
            "timeIn": "2026-03-21T09:00:00",
            "timeOut": "2026-03-21T17:00:00",
            "location": "Riverside Convention Hall",
            "quantity": 4,
            "numberOfHours": 8,
            "overNightShift": false,
            "additionalComments": "Doors open at 08:30; meet at the staff entrance.",
            "attire": "Black polo, black trousers",
            "complexity": "low",
        },
        {
            "positionId": "pos-102",
            "positionName": "Security Guard",
            "startDate": "2026-03-21",
            "timeIn": "2026-03-21T17:00:00",
            "timeOut": "2026-03-22T01:00:00",
            "quantity": 2,
            "numberOfHours": 8,
            "overNightShift": true,
            "additionalComments": "",
            "complexity": "medium",
        },
        {
            "positionId": "pos-103",
            "positionName": "Bartender",
            "startDate": "2026-03-22",
            "timeIn": "2026-03-22T18:00:00",
            "timeOut": "2026-03-23T02:00:00",
            "location": "Riverside Convention Hall, Mezzanine",
            "quantity": 3,
            "numberOfHours": 8,
            "overNightShift": true,
            "attire": "White shirt, black vest",
            "complexity": "high",
        },
    ])
}

pub(crate) fn demo_records() -> Vec<RawRecord> {
    let JsonValue::Array(items) = demo_detail_payload() else {
        unreachable!("demo detail payload is an array");
    };
    items
        .iter()
        .filter_map(RawRecord::from_json)
        .collect()
}
