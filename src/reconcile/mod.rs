// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Schema reconciliation.
//!
//! Flattens a shape-varying response (scalar, sequence, or keyed fields) into
//! a uniform column set plus editable rows. Alignment across fields is
//! positional only: the i-th sequence element and the i-th keyed entry (in
//! document order) land in the same row, whatever their keys say.

use crate::model::{ColumnSet, RawResponse, Row, Scorecard};

/// Number of rows a response reconciles to: the maximum cardinality among
/// sequence- and keyed-valued fields, or 1 when every field is a scalar.
pub fn row_count(response: &RawResponse) -> usize {
    response
        .fields()
        .iter()
        .filter_map(|(_, value)| value.cardinality())
        .max()
        .unwrap_or(1)
}

/// Reconciles a raw response into `(ColumnSet, rows)`.
///
/// Every produced row carries exactly the discovered columns; scalar fields
/// broadcast into each row, short sequences pad with absent cells. When the
/// largest field is empty (`row_count` of 0) the rows are empty but the
/// column set still lists every response key.
pub fn reconcile(response: &RawResponse) -> Scorecard {
    let mut columns = ColumnSet::default();
    for (name, _) in response.fields() {
        columns.insert(name.clone());
    }

    if response.is_empty() {
        return Scorecard::default();
    }

    let count = row_count(response);
    let mut rows = Vec::with_capacity(count);
    for index in 0..count {
        let mut row = Row::empty(&columns);
        for (name, value) in response.fields() {
            row.set(name.clone(), value.value_at(index));
        }
        rows.push(row);
    }

    Scorecard::new(columns, rows)
}

#[cfg(test)]
mod tests;
