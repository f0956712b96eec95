// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end exercise of the reconcile → edit → requery pipeline through the
//! public API, the way an interactive session drives it.

use serde_json::json;

use callsheet::format::serialize_for_requery;
use callsheet::model::{service_error, CellValue, RawRecord, RawResponse, Session};
use callsheet::ops::{apply, OpError, ScorecardOp};
use callsheet::reconcile::reconcile;

#[test]
fn search_edit_requery_round_trip() {
    // A shape-varying reply: parallel arrays, a keyed object, and a scalar.
    let response = RawResponse::from_json(&json!({
        "positionName": ["Usher", "Security Guard"],
        "quantity": {"usher": 2, "guard": 1},
        "attire": "Black tie",
    }))
    .expect("object payload");

    let mut session = Session::new("ushers and a guard for saturday");
    session.set_scorecard(reconcile(&response));

    let scorecard = session.scorecard();
    assert_eq!(scorecard.rows().len(), 2);
    assert_eq!(
        scorecard.columns().names(),
        ["positionName", "quantity", "attire"]
    );
    assert_eq!(
        scorecard.rows()[1].cell("attire"),
        &CellValue::text("Black tie")
    );

    // The user tweaks the staffing before resubmitting.
    apply(
        session.scorecard_mut(),
        &ScorecardOp::EditCell {
            row: 1,
            column: "quantity".to_owned(),
            value: CellValue::parse("3"),
        },
    )
    .expect("edit quantity");
    apply(session.scorecard_mut(), &ScorecardOp::AddRow).expect("add row");
    apply(
        session.scorecard_mut(),
        &ScorecardOp::EditCell {
            row: 2,
            column: "positionName".to_owned(),
            value: CellValue::parse("Bartender"),
        },
    )
    .expect("name the new row");

    let blob = serialize_for_requery(session.scorecard());
    assert_eq!(
        blob,
        "Row 1: positionName=Usher; quantity=2; attire=Black tie\n\
         Row 2: positionName=Security Guard; quantity=3; attire=Black tie\n\
         Row 3: positionName=Bartender; quantity=; attire="
    );

    // Resubmission starts a fresh session; nothing merges across queries.
    let next = Session::new(blob.clone());
    assert_eq!(next.query(), blob);
    assert!(next.scorecard().is_empty());
}

#[test]
fn column_round_trip_loses_data_by_design() {
    let response = RawResponse::from_json(&json!({
        "positionName": ["Usher"],
        "quantity": [4],
    }))
    .expect("object payload");
    let mut scorecard = reconcile(&response);

    apply(&mut scorecard, &ScorecardOp::RemoveColumn { name: "quantity".to_owned() })
        .expect("remove");
    apply(&mut scorecard, &ScorecardOp::AddColumn { name: "quantity".to_owned() })
        .expect("re-add");

    assert!(scorecard.columns().contains("quantity"));
    assert!(scorecard.rows()[0].cell("quantity").is_absent());

    // And the duplicate guard still holds afterwards.
    let err = apply(&mut scorecard, &ScorecardOp::AddColumn { name: "Quantity?".to_owned() })
        .unwrap_err();
    assert_eq!(err, OpError::DuplicateColumn { name: "quantity".to_owned() });
}

#[test]
fn detail_error_sentinel_is_detected() {
    let records: Vec<RawRecord> = [json!({"error": "No match found"})]
        .iter()
        .filter_map(RawRecord::from_json)
        .collect();
    assert_eq!(service_error(&records), Some("No match found"));
}
