// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;

use callsheet::format::serialize_for_requery;
use callsheet::model::{CellValue, RawResponse, Scorecard};
use callsheet::ops::{apply, ScorecardOp};
use callsheet::reconcile::reconcile;

// Benchmark identity (keep stable):
// - Group name in this file: `ops.apply`
// - Case IDs (`edit_cells`, `column_churn`, `serialize`) must remain stable
//   across refactors so results stay comparable over time.
fn fixture_scorecard(rows: usize) -> Scorecard {
    let names: Vec<String> = (0..rows).map(|i| format!("Position {i}")).collect();
    let hours: Vec<u64> = (0..rows).map(|i| 4 + (i as u64 % 8)).collect();
    let payload = json!({
        "positionName": names,
        "numberOfHours": hours,
        "attire": "Black tie",
    });
    reconcile(&RawResponse::from_json(&payload).expect("payload"))
}

fn bench_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");

    group.bench_function("edit_cells", |b| {
        b.iter_batched(
            || fixture_scorecard(100),
            |mut scorecard| {
                for row in 0..100 {
                    apply(
                        &mut scorecard,
                        &ScorecardOp::EditCell {
                            row,
                            column: "numberOfHours".to_owned(),
                            value: CellValue::parse("12"),
                        },
                    )
                    .expect("edit");
                }
                scorecard
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("column_churn", |b| {
        b.iter_batched(
            || fixture_scorecard(100),
            |mut scorecard| {
                for index in 0..16 {
                    apply(
                        &mut scorecard,
                        &ScorecardOp::AddColumn { name: format!("extra{index}") },
                    )
                    .expect("add");
                }
                for index in 0..16 {
                    apply(
                        &mut scorecard,
                        &ScorecardOp::RemoveColumn { name: format!("extra{index}") },
                    )
                    .expect("remove");
                }
                scorecard
            },
            BatchSize::SmallInput,
        );
    });

    let serialized_fixture = fixture_scorecard(200);
    group.bench_function("serialize", |b| {
        b.iter(|| serialize_for_requery(black_box(&serialized_fixture)));
    });

    group.finish();
}

criterion_group!(benches, bench_ops);
criterion_main!(benches);
