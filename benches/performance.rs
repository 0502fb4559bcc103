use criterion::{Criterion, black_box, criterion_group, criterion_main};

// We can't easily benchmark the GUI parts, but the load path is dominated by
// JSON parsing and the per-keystroke path by case-insensitive filtering, so
// benchmark those over a synthetic session of realistic shape

use serde_json::{Value, json};

fn synthetic_session(windows: usize, tabs_per_window: usize) -> String {
    let mut window_map = serde_json::Map::new();
    for w in 0..windows {
        let mut tab_map = serde_json::Map::new();
        for t in 0..tabs_per_window {
            let id = w * 10_000 + t;
            tab_map.insert(
                id.to_string(),
                json!({
                    "id": id,
                    "index": t,
                    "lastAccessed": 1729971922909.627,
                    "title": format!("Tab {} in window {} - discussion thread", t, w),
                    "url": format!("https://forums.example.com/t/topic-{}/{}", w, t),
                    "groupId": if t % 3 == 0 { Value::from(w * 100 + t % 7) } else { Value::Null },
                }),
            );
        }
        window_map.insert(w.to_string(), Value::Object(tab_map));
    }
    serde_json::to_string(&json!([{ "windows": window_map }])).unwrap()
}

fn benchmark_parse(c: &mut Criterion) {
    let payload = synthetic_session(10, 100);
    c.bench_function("parse_1000_tab_session", |b| {
        b.iter(|| {
            let value: Value = serde_json::from_str(black_box(&payload)).unwrap();
            black_box(value)
        })
    });
}

fn benchmark_filter(c: &mut Criterion) {
    let titles: Vec<String> = (0..1000)
        .map(|i| format!("Tab {} in window {} - discussion thread", i % 100, i / 100))
        .collect();
    c.bench_function("filter_1000_titles", |b| {
        b.iter(|| {
            let needle = "discussion";
            let hits = titles
                .iter()
                .filter(|title| title.to_lowercase().contains(needle))
                .count();
            black_box(hits)
        })
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let payload = synthetic_session(10, 100);
    let value: Value = serde_json::from_str(&payload).unwrap();
    c.bench_function("export_1000_tab_session", |b| {
        b.iter(|| black_box(serde_json::to_string_pretty(black_box(&value)).unwrap()))
    });
}

criterion_group!(benches, benchmark_parse, benchmark_filter, benchmark_serialize);
criterion_main!(benches);
