// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reconciled records: the column set and the editable rows behind the
//! scorecard view.

use std::collections::BTreeMap;

use super::value::CellValue;

/// Ordered, de-duplicated column names.
///
/// Order is presentation only; uniqueness is the invariant mutation ops rely
/// on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSet {
    names: Vec<String>,
}

impl ColumnSet {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Appends a column; returns `false` without changing anything when the
    /// name is already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|existing| existing == name)
    }
}

/// One reconciled, editable record.
///
/// A row always carries exactly the keys of the owning `ColumnSet`; absent
/// values are explicit `CellValue::Absent`, never missing keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn empty(columns: &ColumnSet) -> Self {
        Self {
            cells: columns
                .iter()
                .map(|name| (name.to_owned(), CellValue::Absent))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// The cell for `column`, treating unknown columns as absent.
    pub fn cell(&self, column: &str) -> &CellValue {
        static ABSENT: CellValue = CellValue::Absent;
        self.cells.get(column).unwrap_or(&ABSENT)
    }

    pub fn set(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn clear(&mut self, column: &str) -> bool {
        self.cells.remove(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The editable reconciled state: columns plus uniform rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scorecard {
    columns: ColumnSet,
    rows: Vec<Row>,
}

impl Scorecard {
    pub fn new(columns: ColumnSet, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnSet {
        &mut self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, ColumnSet, Row};

    #[test]
    fn column_set_rejects_duplicates_and_keeps_order() {
        let mut columns = ColumnSet::default();
        assert!(columns.insert("positionName"));
        assert!(columns.insert("quantity"));
        assert!(!columns.insert("positionName"));

        let names: Vec<&str> = columns.iter().collect();
        assert_eq!(names, vec!["positionName", "quantity"]);
    }

    #[test]
    fn column_set_remove_reports_membership() {
        let mut columns = ColumnSet::default();
        columns.insert("attire");
        assert!(columns.remove("attire"));
        assert!(!columns.remove("attire"));
        assert!(columns.is_empty());
    }

    #[test]
    fn empty_row_carries_every_column_as_absent() {
        let mut columns = ColumnSet::default();
        columns.insert("positionName");
        columns.insert("quantity");

        let row = Row::empty(&columns);
        assert_eq!(row.len(), 2);
        assert!(row.cell("positionName").is_absent());
        assert!(row.cell("quantity").is_absent());
    }

    #[test]
    fn unknown_column_reads_as_absent() {
        let row = Row::default();
        assert!(row.cell("nope").is_absent());
        assert_eq!(row.get("nope"), None);
        assert_eq!(row.cell("nope"), &CellValue::Absent);
    }
}
