/// Trace reconstruction throughput
///
/// Measures parse time for log files of increasing size with a realistic mix
/// of standalone entries, correlated chains and truncated lines.
use chainlog::TraceParser;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

fn synthetic_log(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| match i % 10 {
            0 => format!(
                r#"{{"UUID":"chain-{}","Date":"2025-06-25 01:26:02.{:06}","Error":"EOF","Function":"app::conn::read","Line":276,"Level":3}}"#,
                i / 10,
                i % 1_000_000
            ),
            1..=3 => format!(
                r#"{{"UUID":"chain-{}","Date":"2025-06-25 01:26:03.{:06}","Args":[{}],"Msg":"wrapped","Function":"app::handler","Line":{},"Level":3}}"#,
                i / 10,
                i % 1_000_000,
                i,
                100 + i % 50
            ),
            9 => "{\"UUID\":\"chain-trunc".to_string(),
            _ => format!(
                r#"{{"Date":"2025-06-25 01:26:01.{:06}","Msg":"request served","Args":{{"id":{}}},"Level":1}}"#,
                i % 1_000_000,
                i
            ),
        })
        .collect()
}

fn bench_parse_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_sizes");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 10_000] {
        let lines = synthetic_log(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            let parser = TraceParser::new().add_lines(lines.iter().cloned());
            b.iter(|| black_box(parser.parse()));
        });
    }

    group.finish();
}

fn bench_parse_with_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_threshold");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(10_000));

    let parser = TraceParser::new()
        .add_lines(synthetic_log(10_000))
        .after_timestamp("2025-06-25 01:26:02.500000")
        .expect("valid threshold");

    group.bench_function("after_10000_lines", |b| {
        b.iter(|| black_box(parser.parse()));
    });

    group.finish();
}

criterion_group!(benches, bench_parse_sizes, bench_parse_with_threshold);

criterion_main!(benches);
