// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use serde_json::json;

use super::{reconcile, row_count};
use crate::model::{CellValue, RawResponse};

fn response(value: serde_json::Value) -> RawResponse {
    RawResponse::from_json(&value).expect("object payload")
}

fn number(value: i64) -> CellValue {
    CellValue::Number(serde_json::Number::from(value))
}

#[rstest]
#[case(json!({"attire": "Black tie", "notes": "arrive early"}), 1)]
#[case(json!({"positionName": ["Usher", "Guard"]}), 2)]
#[case(json!({"quantity": {"a": 2, "b": 5, "c": 9}}), 3)]
#[case(json!({"positionName": ["Usher"], "quantity": {"a": 2, "b": 5}}), 2)]
#[case(json!({"positionName": [], "attire": "Black tie"}), 0)]
fn row_count_is_max_cardinality(#[case] payload: serde_json::Value, #[case] expected: usize) {
    assert_eq!(row_count(&response(payload)), expected);
}

#[test]
fn scalar_only_response_broadcasts_into_one_row() {
    let scorecard = reconcile(&response(json!({
        "positionName": "Usher",
        "quantity": 4,
        "overNightShift": false,
    })));

    assert_eq!(scorecard.rows().len(), 1);
    let columns: Vec<&str> = scorecard.columns().iter().collect();
    assert_eq!(columns, vec!["positionName", "quantity", "overNightShift"]);

    let row = &scorecard.rows()[0];
    assert_eq!(row.cell("positionName"), &CellValue::text("Usher"));
    assert_eq!(row.cell("quantity"), &number(4));
    assert_eq!(row.cell("overNightShift"), &CellValue::Bool(false));
}

#[test]
fn equal_length_sequences_align_positionally() {
    let scorecard = reconcile(&response(json!({
        "positionName": ["Usher", "Guard", "Bartender"],
        "numberOfHours": [8, 10, 6],
    })));

    assert_eq!(scorecard.rows().len(), 3);
    for (index, name) in ["Usher", "Guard", "Bartender"].iter().enumerate() {
        assert_eq!(
            scorecard.rows()[index].cell("positionName"),
            &CellValue::text(*name)
        );
    }
    assert_eq!(scorecard.rows()[1].cell("numberOfHours"), &number(10));
}

#[test]
fn mixed_sequence_and_keyed_fields_reconcile_by_position() {
    let scorecard = reconcile(&response(json!({
        "positionName": ["Usher", "Guard"],
        "quantity": {"a": 2, "b": 5},
    })));

    let columns: Vec<&str> = scorecard.columns().iter().collect();
    assert_eq!(columns, vec!["positionName", "quantity"]);

    assert_eq!(scorecard.rows().len(), 2);
    assert_eq!(
        scorecard.rows()[0].cell("positionName"),
        &CellValue::text("Usher")
    );
    assert_eq!(scorecard.rows()[0].cell("quantity"), &number(2));
    assert_eq!(
        scorecard.rows()[1].cell("positionName"),
        &CellValue::text("Guard")
    );
    assert_eq!(scorecard.rows()[1].cell("quantity"), &number(5));
}

#[test]
fn scalars_broadcast_to_every_row() {
    let scorecard = reconcile(&response(json!({
        "positionName": ["Usher", "Guard"],
        "attire": "Black tie",
    })));

    assert_eq!(scorecard.rows().len(), 2);
    for row in scorecard.rows() {
        assert_eq!(row.cell("attire"), &CellValue::text("Black tie"));
    }
}

#[test]
fn short_fields_pad_with_absent_cells() {
    let scorecard = reconcile(&response(json!({
        "positionName": ["Usher", "Guard", "Bartender"],
        "quantity": {"a": 2},
    })));

    assert_eq!(scorecard.rows().len(), 3);
    assert_eq!(scorecard.rows()[0].cell("quantity"), &number(2));
    assert!(scorecard.rows()[1].cell("quantity").is_absent());
    assert!(scorecard.rows()[2].cell("quantity").is_absent());
    // Padded rows still carry every column.
    assert_eq!(scorecard.rows()[2].len(), scorecard.columns().len());
}

#[test]
fn empty_sequence_yields_no_rows_but_full_columns() {
    let scorecard = reconcile(&response(json!({
        "positionName": [],
        "quantity": {},
    })));

    assert!(scorecard.rows().is_empty());
    let columns: Vec<&str> = scorecard.columns().iter().collect();
    assert_eq!(columns, vec!["positionName", "quantity"]);
}

#[test]
fn empty_response_reconciles_to_nothing() {
    let scorecard = reconcile(&response(json!({})));
    assert!(scorecard.columns().is_empty());
    assert!(scorecard.rows().is_empty());
}

#[test]
fn keyed_alignment_ignores_key_names_across_fields() {
    // Fields disagree on key names; alignment stays positional.
    let scorecard = reconcile(&response(json!({
        "quantity": {"x": 1, "y": 2},
        "numberOfHours": {"y": 8, "x": 10},
    })));

    assert_eq!(scorecard.rows()[0].cell("quantity"), &number(1));
    assert_eq!(scorecard.rows()[0].cell("numberOfHours"), &number(8));
    assert_eq!(scorecard.rows()[1].cell("quantity"), &number(2));
    assert_eq!(scorecard.rows()[1].cell("numberOfHours"), &number(10));
}

#[test]
fn nested_composites_survive_as_text_cells() {
    let scorecard = reconcile(&response(json!({
        "tags": [["vip", "night"], ["day"]],
    })));

    assert_eq!(
        scorecard.rows()[0].cell("tags"),
        &CellValue::text("[\"vip\",\"night\"]")
    );
}
