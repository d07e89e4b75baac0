//! Property-based tests for correlation and trace reconstruction
//!
//! Core properties:
//! 1. Independent chains never share an id
//! 2. Continuations always inherit the root id
//! 3. The parser never panics and never invents records
//! 4. Frames of a trace come out in chronological order

use chainlog::{LogEntry, OutputRecord, Severity, TraceParser};
use proptest::prelude::*;
use std::collections::HashSet;
use std::io;

fn record_line(id: &str, micros: u32, msg: &str) -> String {
    OutputRecord {
        correlation_id: id.to_string(),
        timestamp: format!("2025-06-25 01:00:00.{:06}", micros),
        message: msg.to_string(),
        severity: Severity::Info,
        ..OutputRecord::default()
    }
    .to_json_line()
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_independent_chains_have_distinct_ids(
        messages in prop::collection::vec(".{0,16}", 1..20),
    ) {
        let mut ids = HashSet::new();
        for (i, msg) in messages.iter().enumerate() {
            let entry = if i % 2 == 0 {
                LogEntry::from_message(msg.clone())
            } else {
                LogEntry::from_error(io::Error::other(msg.clone()))
            };
            prop_assert!(!entry.correlation_id().is_empty());
            prop_assert!(ids.insert(entry.correlation_id().to_string()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_continuations_inherit_root_id(depth in 1usize..12, text in "[a-z ]{1,20}") {
        let root = LogEntry::from_error(io::Error::other(text.clone()));
        let id = root.correlation_id().to_string();

        let mut current = root;
        for _ in 0..depth {
            current = LogEntry::from_error(current);
            prop_assert_eq!(current.correlation_id(), id.as_str());
        }
        prop_assert_eq!(current.to_string(), text);
        prop_assert!(current.has_cause::<io::Error>());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parser_never_panics(lines in prop::collection::vec(".*", 0..30)) {
        let parsed = TraceParser::new().add_lines(lines.clone()).parse();
        prop_assert!(parsed.entries.len() + parsed.frame_count() <= lines.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_frames_sorted_and_counted(
        frames in prop::collection::vec((0usize..4, 0u32..1_000_000), 1..40),
        noise in 0usize..10,
    ) {
        let ids = ["alpha", "beta", "gamma", "delta"];
        let mut lines: Vec<String> = frames
            .iter()
            .map(|(id, micros)| record_line(ids[*id], *micros, "f"))
            .collect();
        for i in 0..noise {
            lines.insert(i % (lines.len() + 1), format!("{{\"Msg\":\"noise {}\"}}", i));
        }

        let parsed = TraceParser::new().add_lines(lines).parse();
        prop_assert_eq!(parsed.entries.len(), noise);
        prop_assert_eq!(parsed.frame_count(), frames.len());

        for trace in &parsed.traces {
            let expected = frames
                .iter()
                .filter(|(id, _)| ids[*id] == trace.correlation_id)
                .count();
            prop_assert_eq!(trace.frames.len(), expected);

            let stamps: Vec<_> = trace.frames.iter().map(|f| f.parsed_timestamp()).collect();
            prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_threshold_keeps_only_later_frames(
        micros in prop::collection::vec(0u32..1000, 1..20),
        cutoff in 0u32..1000,
    ) {
        let lines: Vec<String> = micros.iter().map(|m| record_line("x", *m, "f")).collect();
        let threshold = chainlog::clock::parse_timestamp(
            &format!("2025-06-25 01:00:00.{:06}", cutoff),
        ).unwrap();

        let parsed = TraceParser::new().add_lines(lines).after(threshold).parse();
        let surviving = micros.iter().filter(|m| **m > cutoff).count();

        if surviving == 0 {
            prop_assert!(parsed.traces.is_empty());
        } else {
            prop_assert_eq!(parsed.traces.len(), 1);
            prop_assert_eq!(parsed.traces[0].frames.len(), surviving);
        }
    }
}
