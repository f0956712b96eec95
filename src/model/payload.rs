// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire-shaped payloads as the services return them.
//!
//! `RawResponse` is the shape-varying reply of the query service (input to the
//! reconciler); `RawRecord` is one verbatim record of the detail service,
//! displayed as-is in the table view.

use serde_json::Value as JsonValue;

use super::value::FieldValue;

/// The untyped field map returned by the query service.
///
/// Field order follows the document so that display order is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    fields: Vec<(String, FieldValue)>,
}

impl RawResponse {
    /// Interprets a JSON value as a response field map. Non-object payloads
    /// have no fields to reconcile and yield `None`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let JsonValue::Object(entries) = value else {
            return None;
        };
        Some(Self {
            fields: entries
                .iter()
                .map(|(name, field)| (name.clone(), FieldValue::from_json(field)))
                .collect(),
        })
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }
}

/// One un-reconciled record from the detail service, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    fields: Vec<(String, JsonValue)>,
}

impl RawRecord {
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let JsonValue::Object(entries) = value else {
            return None;
        };
        Some(Self {
            fields: entries
                .iter()
                .map(|(name, field)| (name.clone(), field.clone()))
                .collect(),
        })
    }

    pub fn fields(&self) -> &[(String, JsonValue)] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(JsonValue::as_str)
    }

    fn error_field(&self) -> Option<&str> {
        self.get_str("error")
    }
}

/// The detail service signals failure as a single-element array whose element
/// carries an `error` field. Returns the message when that shape matches.
pub fn service_error(records: &[RawRecord]) -> Option<&str> {
    match records {
        [only] => only.error_field(),
        _ => None,
    }
}
