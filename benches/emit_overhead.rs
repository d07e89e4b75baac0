/// Emission overhead
///
/// Compares a filtered-out entry, a plain message, a chained error with
/// caller capture, and record construction alone. Output goes to the
/// discard sink so only the pipeline is measured.
use chainlog::config::{self, Output};
use chainlog::{LogEntry, Severity};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::io;
use std::time::Duration;

fn bench_emit(c: &mut Criterion) {
    config::set_output(Output::Discard);

    let mut group = c.benchmark_group("emit");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("filtered_out", |b| {
        config::set_level(Severity::Error);
        b.iter(|| black_box(LogEntry::from_message("noise").debug().log()));
        config::set_level(Severity::Debug);
    });

    group.bench_function("message_with_args", |b| {
        b.iter(|| {
            black_box(
                LogEntry::from_message("request served")
                    .with_args(json!({"id": 42, "path": "/health"}))
                    .log(),
            )
        });
    });

    group.bench_function("chain_depth_3_with_caller", |b| {
        b.iter(|| {
            let root = LogEntry::from_error(io::Error::other("EOF")).log();
            let mid = LogEntry::from_error(root).with_message("mid").log();
            black_box(LogEntry::from_error(mid).with_message("top").log())
        });
    });

    group.bench_function("to_record_only", |b| {
        let entry = LogEntry::from_error(io::Error::other("EOF")).with_args([1, 2, 3]);
        b.iter(|| black_box(entry.to_record("2025-06-25 01:26:02.408736".to_string(), None)));
    });

    group.finish();
}

criterion_group!(benches, bench_emit);

criterion_main!(benches);
