// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire types and reply interpretation for the staffing services.
//!
//! Replies are decoded as plain JSON first and interpreted afterwards; the
//! services make no shape guarantees worth a rigid deserialize target.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::model::{RawRecord, RawResponse};

#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Interpreted reply of the query endpoint: a structured response, a bare
/// prose answer, or neither.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryReply {
    message: Option<String>,
    response: Option<RawResponse>,
}

impl QueryReply {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    pub fn into_parts(self) -> (Option<String>, Option<RawResponse>) {
        (self.message, self.response)
    }
}

/// Interpreted reply of the voice endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoiceReply {
    transcription: String,
    response: Option<RawResponse>,
}

impl VoiceReply {
    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    pub fn into_parts(self) -> (String, Option<RawResponse>) {
        (self.transcription, self.response)
    }
}

pub(crate) fn parse_query_reply(body: &JsonValue) -> QueryReply {
    let data = body.get("data").unwrap_or(&JsonValue::Null);
    match RawResponse::from_json(data) {
        Some(response) => QueryReply { message: None, response: Some(response) },
        None => QueryReply {
            message: data.as_str().map(str::to_owned),
            response: None,
        },
    }
}

pub(crate) fn parse_detail_records(body: &JsonValue) -> Vec<RawRecord> {
    let Some(JsonValue::Array(items)) = body.get("data") else {
        return Vec::new();
    };
    items.iter().filter_map(RawRecord::from_json).collect()
}

pub(crate) fn parse_voice_reply(body: &JsonValue) -> VoiceReply {
    let transcription = body
        .get("transcription")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_owned();

    // The voice service wraps its structured reply in a `data` envelope some
    // of the time; accept both.
    let raw = body.get("response").unwrap_or(&JsonValue::Null);
    let unwrapped = match raw.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => raw,
    };

    VoiceReply {
        transcription,
        response: RawResponse::from_json(unwrapped),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{parse_detail_records, parse_query_reply, parse_voice_reply};

    #[test]
    fn query_reply_with_object_data_is_structured() {
        let reply = parse_query_reply(&json!({
            "data": {"positionName": ["Usher"], "quantity": 2}
        }));
        assert!(reply.message().is_none());
        let response = reply.response().expect("structured response");
        assert_eq!(response.len(), 2);
    }

    #[test]
    fn query_reply_with_string_data_is_a_message() {
        let reply = parse_query_reply(&json!({"data": "I found two usher shifts."}));
        assert_eq!(reply.message(), Some("I found two usher shifts."));
        assert!(reply.response().is_none());
    }

    #[test]
    fn query_reply_without_data_is_empty() {
        let reply = parse_query_reply(&json!({}));
        assert!(reply.message().is_none());
        assert!(reply.response().is_none());
    }

    #[test]
    fn detail_records_skip_non_object_items() {
        let records = parse_detail_records(&json!({
            "data": [{"positionName": "Usher"}, "noise", {"positionName": "Guard"}]
        }));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn voice_reply_accepts_bare_and_enveloped_responses() {
        let bare = parse_voice_reply(&json!({
            "transcription": "two ushers saturday",
            "response": {"positionName": ["Usher"]}
        }));
        assert_eq!(bare.transcription(), "two ushers saturday");
        assert!(bare.response().is_some());

        let enveloped = parse_voice_reply(&json!({
            "transcription": "two ushers saturday",
            "response": {"data": {"positionName": ["Usher"]}}
        }));
        assert!(enveloped.response().is_some());
    }

    #[test]
    fn voice_reply_tolerates_missing_fields() {
        let reply = parse_voice_reply(&json!({}));
        assert_eq!(reply.transcription(), "");
        assert!(reply.response().is_none());
    }
}
