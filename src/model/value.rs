// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde_json::Value as JsonValue;

/// A single editable cell of a reconciled row.
///
/// Cells are always scalar; composite JSON values that end up in a cell
/// position are carried as their compact text form so nothing is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Absent,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl CellValue {
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Absent,
            JsonValue::Bool(flag) => Self::Bool(*flag),
            JsonValue::Number(number) => Self::Number(number.clone()),
            JsonValue::String(text) => Self::Text(text.clone()),
            composite => Self::Text(composite.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Interprets user-typed input for a cell edit: empty clears the cell,
    /// `true`/`false` and numbers become typed values, everything else is
    /// kept as text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }
        match trimmed {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return Self::Number(serde_json::Number::from(number));
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            if let Some(number) = serde_json::Number::from_f64(number) {
                return Self::Number(number);
            }
        }
        Self::Text(trimmed.to_owned())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Absent
    }
}

/// Raw textual form, used when cells are joined back into a free-text query.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// The shape of one response field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Sequence,
    Keyed,
}

/// One field of a raw service response.
///
/// The backend does not guarantee a uniform shape across fields: a field may
/// be a lone scalar, a parallel array, or an object keyed by arbitrary names.
/// `Keyed` preserves document key order because row alignment is positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(CellValue),
    Sequence(Vec<CellValue>),
    Keyed(Vec<(String, CellValue)>),
}

impl FieldValue {
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Array(items) => {
                Self::Sequence(items.iter().map(CellValue::from_json).collect())
            }
            JsonValue::Object(entries) => Self::Keyed(
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), CellValue::from_json(item)))
                    .collect(),
            ),
            scalar => Self::Scalar(CellValue::from_json(scalar)),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar(_) => FieldKind::Scalar,
            Self::Sequence(_) => FieldKind::Sequence,
            Self::Keyed(_) => FieldKind::Keyed,
        }
    }

    /// Number of records this field contributes; `None` for broadcast scalars.
    pub fn cardinality(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::Sequence(items) => Some(items.len()),
            Self::Keyed(entries) => Some(entries.len()),
        }
    }

    /// The cell for record index `i`: positional for sequences, the i-th key
    /// in document order for keyed objects, the scalar itself otherwise.
    /// Out-of-range indexes yield the absent cell.
    pub fn value_at(&self, index: usize) -> CellValue {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Sequence(items) => items.get(index).cloned().unwrap_or_default(),
            Self::Keyed(entries) => entries
                .get(index)
                .map(|(_, value)| value.clone())
                .unwrap_or_default(),
        }
    }
}
