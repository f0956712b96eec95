// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use serde_json::json;

use super::{apply, normalize_column_name, OpError, OpOutcome, ScorecardOp};
use crate::model::{CellValue, RawResponse, Scorecard};
use crate::reconcile::reconcile;

fn sample_scorecard() -> Scorecard {
    let response = RawResponse::from_json(&json!({
        "positionName": ["Usher", "Guard"],
        "quantity": {"a": 2, "b": 5},
    }))
    .expect("object payload");
    reconcile(&response)
}

#[rstest]
#[case("Name!!", "name")]
#[case("name", "name")]
#[case("Contractor Rate", "contractorRate")]
#[case("time-in", "timein")]
#[case("Überstunden", "überstunden")]
#[case("!!!", "")]
#[case("", "")]
fn normalization_strips_punctuation_and_lowercases_first(
    #[case] raw: &str,
    #[case] expected: &str,
) {
    assert_eq!(normalize_column_name(raw), expected);
}

#[test]
fn add_column_normalizes_and_extends_every_row() {
    let mut scorecard = sample_scorecard();
    let outcome = apply(&mut scorecard, &ScorecardOp::AddColumn { name: "Attire!!".to_owned() })
        .expect("add column");

    assert_eq!(outcome, OpOutcome::ColumnAdded { name: "attire".to_owned() });
    assert!(scorecard.columns().contains("attire"));
    for row in scorecard.rows() {
        assert!(row.cell("attire").is_absent());
        assert_eq!(row.len(), scorecard.columns().len());
    }
}

#[test]
fn add_column_rejects_duplicates_without_state_change() {
    let mut scorecard = sample_scorecard();
    apply(&mut scorecard, &ScorecardOp::AddColumn { name: "attire".to_owned() })
        .expect("first add");
    let before = scorecard.clone();

    let err = apply(&mut scorecard, &ScorecardOp::AddColumn { name: "attire".to_owned() })
        .unwrap_err();
    assert_eq!(err, OpError::DuplicateColumn { name: "attire".to_owned() });
    assert_eq!(scorecard, before);
}

#[test]
fn add_column_detects_duplicates_after_normalization() {
    let mut scorecard = sample_scorecard();
    let err = apply(&mut scorecard, &ScorecardOp::AddColumn { name: "Quantity!".to_owned() })
        .unwrap_err();
    assert_eq!(err, OpError::DuplicateColumn { name: "quantity".to_owned() });
}

#[test]
fn add_column_rejects_names_that_normalize_to_nothing() {
    let mut scorecard = sample_scorecard();
    let before = scorecard.clone();

    let err =
        apply(&mut scorecard, &ScorecardOp::AddColumn { name: "?!*".to_owned() }).unwrap_err();
    assert_eq!(err, OpError::EmptyColumnName { raw: "?!*".to_owned() });
    assert_eq!(scorecard, before);
}

#[test]
fn remove_column_purges_the_key_from_every_row() {
    let mut scorecard = sample_scorecard();
    let outcome =
        apply(&mut scorecard, &ScorecardOp::RemoveColumn { name: "quantity".to_owned() })
            .expect("remove column");

    assert_eq!(outcome, OpOutcome::ColumnRemoved { name: "quantity".to_owned() });
    assert!(!scorecard.columns().contains("quantity"));
    for row in scorecard.rows() {
        assert_eq!(row.get("quantity"), None);
        assert_eq!(row.len(), scorecard.columns().len());
    }
}

#[test]
fn remove_unknown_column_fails() {
    let mut scorecard = sample_scorecard();
    let err = apply(&mut scorecard, &ScorecardOp::RemoveColumn { name: "attire".to_owned() })
        .unwrap_err();
    assert_eq!(err, OpError::UnknownColumn { name: "attire".to_owned() });
}

#[test]
fn remove_then_add_restores_columns_but_resets_values() {
    let mut scorecard = sample_scorecard();
    let original_columns = scorecard.columns().clone();

    apply(&mut scorecard, &ScorecardOp::RemoveColumn { name: "quantity".to_owned() })
        .expect("remove");
    apply(&mut scorecard, &ScorecardOp::AddColumn { name: "quantity".to_owned() })
        .expect("re-add");

    let names: Vec<&str> = scorecard.columns().iter().collect();
    let mut expected: Vec<&str> = original_columns.iter().collect();
    // Re-adding appends at the end; membership matches, values do not survive.
    expected.sort_unstable();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, expected);
    for row in scorecard.rows() {
        assert!(row.cell("quantity").is_absent());
    }
}

#[test]
fn add_row_starts_empty_across_all_columns() {
    let mut scorecard = sample_scorecard();
    let outcome = apply(&mut scorecard, &ScorecardOp::AddRow).expect("add row");
    assert_eq!(outcome, OpOutcome::RowAdded { index: 2 });

    let row = &scorecard.rows()[2];
    assert_eq!(row.len(), scorecard.columns().len());
    assert!(row.cell("positionName").is_absent());
    assert!(row.cell("quantity").is_absent());
}

#[test]
fn edit_cell_updates_in_place() {
    let mut scorecard = sample_scorecard();
    apply(
        &mut scorecard,
        &ScorecardOp::EditCell {
            row: 1,
            column: "positionName".to_owned(),
            value: CellValue::text("Steward"),
        },
    )
    .expect("edit cell");

    assert_eq!(
        scorecard.rows()[1].cell("positionName"),
        &CellValue::text("Steward")
    );
}

#[test]
fn edit_cell_checks_row_and_column_presence() {
    let mut scorecard = sample_scorecard();

    let err = apply(
        &mut scorecard,
        &ScorecardOp::EditCell {
            row: 9,
            column: "positionName".to_owned(),
            value: CellValue::text("x"),
        },
    )
    .unwrap_err();
    assert_eq!(err, OpError::RowOutOfRange { row: 9, rows: 2 });

    let err = apply(
        &mut scorecard,
        &ScorecardOp::EditCell {
            row: 0,
            column: "attire".to_owned(),
            value: CellValue::text("x"),
        },
    )
    .unwrap_err();
    assert_eq!(err, OpError::UnknownColumn { name: "attire".to_owned() });
}

#[test]
fn op_errors_render_user_messages() {
    assert_eq!(
        OpError::DuplicateColumn { name: "attire".to_owned() }.to_string(),
        "column 'attire' already exists"
    );
    assert_eq!(
        OpError::EmptyColumnName { raw: "?!".to_owned() }.to_string(),
        "column name '?!' is empty after normalization"
    );
}
