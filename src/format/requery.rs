// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use crate::model::Scorecard;

/// Serializes the edited scorecard into a row-tagged text blob that can be
/// resubmitted as a free-text query:
///
/// ```text
/// Row 1: positionName=Usher; quantity=2
/// Row 2: positionName=Guard; quantity=5
/// ```
///
/// Columns keep their display order; absent cells serialize as empty values.
pub fn serialize_for_requery(scorecard: &Scorecard) -> String {
    let mut blob = String::new();
    for (index, row) in scorecard.rows().iter().enumerate() {
        if index > 0 {
            blob.push('\n');
        }
        let _ = write!(blob, "Row {}:", index + 1);
        for (position, column) in scorecard.columns().iter().enumerate() {
            if position > 0 {
                blob.push(';');
            }
            let _ = write!(blob, " {column}={}", row.cell(column));
        }
    }
    blob
}
