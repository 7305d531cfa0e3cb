// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pvbflow::format::mermaid::extract_mermaid_block;
use pvbflow::share::{encode_pako_fragment, live_editor_url};

// Group names `share.encode`, `share.extract` and the case ids below stay stable so results
// remain comparable across refactors.

fn flowchart(nodes: usize, label: &str) -> String {
    let mut text = String::from("flowchart TD\n");
    for i in 0..nodes {
        text.push_str(&format!("    N{i}[\"{label} {i}\"] --> N{}\n", i + 1));
    }
    for i in (0..nodes).step_by(3) {
        text.push_str(&format!("    style N{i} fill:#4A90D9,stroke:#2E5F8A,color:#fff\n"));
    }
    text
}

fn cases() -> [(&'static str, String); 3] {
    [
        ("small", flowchart(8, "Step")),
        ("medium", flowchart(80, "Review the backlog item")),
        ("large_long_labels", flowchart(600, "Validate the customer order with the warehouse team")),
    ]
}

fn benches_share(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("share.encode");
        for (case_id, diagram) in cases() {
            group.throughput(Throughput::Bytes(diagram.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| encode_pako_fragment(black_box(&diagram)).expect("encode"))
            });
        }
        group.bench_function("url_small", |b| {
            let diagram = flowchart(8, "Step");
            b.iter(|| live_editor_url(black_box(&diagram)).expect("url"))
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("share.extract");
        for (case_id, diagram) in cases() {
            let reply = format!("Here is the process.\n\n```mermaid\n{diagram}```\n\nAnything else?");
            group.throughput(Throughput::Bytes(reply.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| extract_mermaid_block(black_box(&reply)).expect("block"))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_share);
criterion_main!(benches);
