// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for the reconciled scorecard.
//!
//! Ops validate before they touch anything: a failed op leaves the scorecard
//! exactly as it was, and the error doubles as the user-visible message.

use std::fmt;

use crate::model::{CellValue, Row, Scorecard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorecardOp {
    AddColumn { name: String },
    RemoveColumn { name: String },
    AddRow,
    EditCell { row: usize, column: String, value: CellValue },
}

/// What an applied op did, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutcome {
    ColumnAdded { name: String },
    ColumnRemoved { name: String },
    RowAdded { index: usize },
    CellEdited { row: usize, column: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    EmptyColumnName { raw: String },
    DuplicateColumn { name: String },
    UnknownColumn { name: String },
    RowOutOfRange { row: usize, rows: usize },
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyColumnName { raw } => {
                write!(f, "column name '{raw}' is empty after normalization")
            }
            Self::DuplicateColumn { name } => write!(f, "column '{name}' already exists"),
            Self::UnknownColumn { name } => write!(f, "no column named '{name}'"),
            Self::RowOutOfRange { row, rows } => {
                write!(f, "row {row} is out of range (rows={rows})")
            }
        }
    }
}

impl std::error::Error for OpError {}

/// Normalizes a user-entered column name to its identifier-safe form: every
/// non-alphanumeric character is stripped and the first remaining character
/// is lowercased, so `Name!!` becomes `name`.
pub fn normalize_column_name(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for ch in raw.chars().filter(|ch| ch.is_alphanumeric()) {
        if normalized.is_empty() {
            normalized.extend(ch.to_lowercase());
        } else {
            normalized.push(ch);
        }
    }
    normalized
}

pub fn apply(scorecard: &mut Scorecard, op: &ScorecardOp) -> Result<OpOutcome, OpError> {
    match op {
        ScorecardOp::AddColumn { name } => add_column(scorecard, name),
        ScorecardOp::RemoveColumn { name } => remove_column(scorecard, name),
        ScorecardOp::AddRow => Ok(add_row(scorecard)),
        ScorecardOp::EditCell { row, column, value } => {
            edit_cell(scorecard, *row, column, value.clone())
        }
    }
}

fn add_column(scorecard: &mut Scorecard, raw: &str) -> Result<OpOutcome, OpError> {
    let name = normalize_column_name(raw);
    if name.is_empty() {
        return Err(OpError::EmptyColumnName { raw: raw.to_owned() });
    }
    if !scorecard.columns_mut().insert(name.clone()) {
        return Err(OpError::DuplicateColumn { name });
    }
    for row in scorecard.rows_mut() {
        row.set(name.clone(), CellValue::Absent);
    }
    Ok(OpOutcome::ColumnAdded { name })
}

fn remove_column(scorecard: &mut Scorecard, name: &str) -> Result<OpOutcome, OpError> {
    if !scorecard.columns_mut().remove(name) {
        return Err(OpError::UnknownColumn { name: name.to_owned() });
    }
    for row in scorecard.rows_mut() {
        row.clear(name);
    }
    Ok(OpOutcome::ColumnRemoved { name: name.to_owned() })
}

fn add_row(scorecard: &mut Scorecard) -> OpOutcome {
    let row = Row::empty(scorecard.columns());
    scorecard.rows_mut().push(row);
    OpOutcome::RowAdded { index: scorecard.rows().len() - 1 }
}

fn edit_cell(
    scorecard: &mut Scorecard,
    row: usize,
    column: &str,
    value: CellValue,
) -> Result<OpOutcome, OpError> {
    let rows = scorecard.rows().len();
    if !scorecard.columns().contains(column) {
        return Err(OpError::UnknownColumn { name: column.to_owned() });
    }
    let Some(target) = scorecard.rows_mut().get_mut(row) else {
        return Err(OpError::RowOutOfRange { row, rows });
    };
    target.set(column.to_owned(), value);
    Ok(OpOutcome::CellEdited { row, column: column.to_owned() })
}

#[cfg(test)]
mod tests;
