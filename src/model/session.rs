// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::payload::RawRecord;
use super::record::Scorecard;

/// How the result set is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Table,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::List => "List",
            Self::Table => "Table",
        }
    }
}

/// The single reconciled state the interactive session runs against.
///
/// A new query replaces the whole session through `Session::new`; nothing is
/// merged across queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    query: String,
    message: Option<String>,
    scorecard: Scorecard,
    raw_records: Vec<RawRecord>,
    selected_record: Option<usize>,
    view: ViewMode,
}

impl Session {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: None,
            scorecard: Scorecard::default(),
            raw_records: Vec::new(),
            selected_record: None,
            view: ViewMode::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The user-visible response text (conversational answer or error).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    pub fn scorecard_mut(&mut self) -> &mut Scorecard {
        &mut self.scorecard
    }

    pub fn set_scorecard(&mut self, scorecard: Scorecard) {
        self.scorecard = scorecard;
    }

    pub fn raw_records(&self) -> &[RawRecord] {
        &self.raw_records
    }

    pub fn set_raw_records(&mut self, raw_records: Vec<RawRecord>) {
        self.raw_records = raw_records;
        self.selected_record = match self.raw_records.is_empty() {
            true => None,
            false => Some(0),
        };
    }

    pub fn selected_record(&self) -> Option<usize> {
        self.selected_record
    }

    pub fn set_selected_record(&mut self, selected: Option<usize>) {
        self.selected_record = selected.filter(|&index| index < self.raw_records.len());
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Session, ViewMode};
    use crate::model::payload::RawRecord;

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::from_json(&value).expect("record")
    }

    #[test]
    fn new_session_is_fully_reset() {
        let session = Session::new("ushers for saturday");
        assert_eq!(session.query(), "ushers for saturday");
        assert_eq!(session.message(), None);
        assert!(session.scorecard().is_empty());
        assert!(session.raw_records().is_empty());
        assert_eq!(session.selected_record(), None);
        assert_eq!(session.view(), ViewMode::Grid);
    }

    #[test]
    fn setting_records_selects_the_first() {
        let mut session = Session::new("guards");
        session.set_raw_records(vec![
            record(json!({"positionName": "Guard"})),
            record(json!({"positionName": "Usher"})),
        ]);
        assert_eq!(session.selected_record(), Some(0));

        session.set_raw_records(Vec::new());
        assert_eq!(session.selected_record(), None);
    }

    #[test]
    fn selection_is_bounds_checked() {
        let mut session = Session::new("guards");
        session.set_raw_records(vec![record(json!({"positionName": "Guard"}))]);

        session.set_selected_record(Some(5));
        assert_eq!(session.selected_record(), None);

        session.set_selected_record(Some(0));
        assert_eq!(session.selected_record(), Some(0));
    }
}
