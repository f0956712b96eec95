// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation-only projection of raw detail records into the cards shown by
//! the grid and list views. Fallback wording matches what the services leave
//! blank most often.

use serde_json::Value as JsonValue;

use crate::model::RawRecord;

const FALLBACK_LOCATION: &str = "Location not provided";
const FALLBACK_ATTIRE: &str = "Not specified";
const FALLBACK_DEFAULT_RATE: &str = "15.00";
const FALLBACK_CONTRACTOR_RATE: &str = "18.00";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCard {
    id: Option<String>,
    name: String,
    description: String,
    start_date: Option<String>,
    time_in: Option<String>,
    time_out: Option<String>,
    location: String,
    attire: String,
    quantity: Option<u64>,
    hours: Option<String>,
    complexity: Option<String>,
    default_rate: String,
    contractor_rate: String,
}

impl PositionCard {
    pub fn from_record(record: &RawRecord) -> Self {
        let name = text_field(record, "positionName").unwrap_or_else(|| "Unnamed position".to_owned());
        let hours = text_field(record, "numberOfHours");
        let description = match text_field(record, "additionalComments") {
            Some(comments) if !comments.is_empty() => comments,
            _ => match &hours {
                Some(hours) => format!("{name} position - {hours} hour shift."),
                None => format!("{name} position."),
            },
        };

        Self {
            id: text_field(record, "positionId"),
            name,
            description,
            start_date: text_field(record, "startDate"),
            time_in: text_field(record, "timeIn"),
            time_out: text_field(record, "timeOut"),
            location: text_field(record, "location")
                .filter(|location| !location.is_empty())
                .unwrap_or_else(|| FALLBACK_LOCATION.to_owned()),
            attire: text_field(record, "attire")
                .filter(|attire| !attire.is_empty())
                .unwrap_or_else(|| FALLBACK_ATTIRE.to_owned()),
            quantity: record.get("quantity").and_then(JsonValue::as_u64),
            hours,
            complexity: text_field(record, "complexity"),
            default_rate: FALLBACK_DEFAULT_RATE.to_owned(),
            contractor_rate: FALLBACK_CONTRACTOR_RATE.to_owned(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn time_in(&self) -> Option<&str> {
        self.time_in.as_deref()
    }

    pub fn time_out(&self) -> Option<&str> {
        self.time_out.as_deref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn attire(&self) -> &str {
        &self.attire
    }

    pub fn quantity(&self) -> Option<u64> {
        self.quantity
    }

    pub fn hours(&self) -> Option<&str> {
        self.hours.as_deref()
    }

    pub fn complexity(&self) -> Option<&str> {
        self.complexity.as_deref()
    }

    pub fn default_rate(&self) -> &str {
        &self.default_rate
    }

    pub fn contractor_rate(&self) -> &str {
        &self.contractor_rate
    }
}

/// Text form of a record field: strings verbatim, numbers via display form.
fn text_field(record: &RawRecord, name: &str) -> Option<String> {
    match record.get(name)? {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PositionCard;
    use crate::model::RawRecord;

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::from_json(&value).expect("record")
    }

    #[test]
    fn card_projects_fields_with_fallbacks() {
        let card = PositionCard::from_record(&record(json!({
            "positionId": "pos-7",
            "positionName": "Usher",
            "quantity": 4,
            "numberOfHours": 8,
        })));

        assert_eq!(card.id(), Some("pos-7"));
        assert_eq!(card.name(), "Usher");
        assert_eq!(card.location(), "Location not provided");
        assert_eq!(card.attire(), "Not specified");
        assert_eq!(card.quantity(), Some(4));
        assert_eq!(card.default_rate(), "15.00");
        assert_eq!(card.contractor_rate(), "18.00");
    }

    #[test]
    fn description_prefers_comments_over_synthesis() {
        let with_comments = PositionCard::from_record(&record(json!({
            "positionName": "Guard",
            "numberOfHours": 10,
            "additionalComments": "Night patrol, radios provided.",
        })));
        assert_eq!(with_comments.description(), "Night patrol, radios provided.");

        let synthesized = PositionCard::from_record(&record(json!({
            "positionName": "Guard",
            "numberOfHours": 10,
            "additionalComments": "",
        })));
        assert_eq!(synthesized.description(), "Guard position - 10 hour shift.");
    }

    #[test]
    fn missing_name_gets_a_placeholder() {
        let card = PositionCard::from_record(&record(json!({"quantity": 1})));
        assert_eq!(card.name(), "Unnamed position");
        assert_eq!(card.description(), "Unnamed position position.");
    }
}
