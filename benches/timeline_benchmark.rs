use chrono::{Duration, Utc};
use civic_reports::models::{ReportPayload, TrackedReport};
use civic_reports::views::timeline;
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use std::hint::black_box;

/// A long-lived report with `events` timeline entries in shuffled order.
fn payload(events: usize) -> Value {
    let start = Utc::now() - Duration::days(90);
    let actions = ["updated_status", "comment_added", "assigned_to_user", "marked_resolved"];
    let timeline: Vec<Value> = (0..events)
        .map(|i| {
            let at = start + Duration::minutes(((i * 7919) % events) as i64 * 30);
            json!({
                "action": actions[i % actions.len()],
                "metadata": {
                    "previousStatus": "pending",
                    "newStatus": "in_progress",
                    "comment": "Equipe enviada ao local",
                    "assignedToUser": {"name": "Bruno", "organization": "Polícia Civil"}
                },
                "createdBy": {"name": "Ana", "organization": "SSP"},
                "createdAt": at.to_rfc3339()
            })
        })
        .collect();

    json!({
        "code": "AB12CD",
        "status": "in_progress",
        "title": "robbery",
        "description": "Celular levado na parada de ônibus",
        "latitude": -3.1019,
        "longitude": -60.025,
        "timeline": timeline,
        "createdAt": start.to_rfc3339(),
        "updatedAt": Utc::now().to_rfc3339()
    })
}

fn benchmark_timeline(c: &mut Criterion) {
    let raw = payload(500);
    let text = raw.to_string();
    let report = TrackedReport::from(
        serde_json::from_value::<ReportPayload>(raw).expect("Failed to decode fixture"),
    );

    let mut group = c.benchmark_group("report_timeline");

    group.bench_function("decode_payload", |b| {
        b.iter(|| serde_json::from_str::<ReportPayload>(black_box(&text)))
    });

    group.bench_function("render_newest_first", |b| {
        b.iter(|| timeline::render(black_box(&report.timeline), &Utc))
    });

    group.finish();
}

criterion_group!(benches, benchmark_timeline);
criterion_main!(benches);
