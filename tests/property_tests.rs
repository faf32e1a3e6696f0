//! Property-based tests for scoped_logger using proptest

use proptest::prelude::*;
use scoped_logger::core::timestamp::fixed;
use scoped_logger::prelude::*;
use scoped_logger::{label_to_rank, rank_to_label, should_log};
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

/// A level spelled as rank, uppercase label or lowercase label
fn spelled(level: LogLevel, spelling: u8) -> Severity {
    match spelling % 3 {
        0 => Severity::from(level.rank()),
        1 => Severity::from(level.to_str()),
        _ => Severity::from(level.to_str().to_lowercase()),
    }
}

fn capture(min: Severity) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder("prop")
        .min_level(min)
        .timestamp(fixed("T"))
        .shared_sink(sink.clone())
        .build()
        .unwrap();
    (logger, sink)
}

// ============================================================================
// Level Registry
// ============================================================================

proptest! {
    /// Label to rank and back gives the canonical uppercase label
    #[test]
    fn test_label_rank_roundtrip(level in any_level(), lower in any::<bool>()) {
        let label = if lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };

        let rank = label_to_rank(&label).unwrap();
        prop_assert_eq!(rank_to_label(rank).unwrap(), label.to_uppercase());
    }

    /// Ranks order exactly like levels
    #[test]
    fn test_rank_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.rank() <= b.rank());
        prop_assert_eq!(a < b, a.rank() < b.rank());
    }

    /// Only the seven fixed ranks resolve
    #[test]
    fn test_unknown_ranks_rejected(rank in any::<u8>()) {
        let known = LogLevel::ALL.iter().any(|l| l.rank() == rank);
        prop_assert_eq!(rank_to_label(rank).is_ok(), known);
    }

    /// Arbitrary words that are not level names never resolve
    #[test]
    fn test_unknown_labels_rejected(label in "[a-z]{1,10}") {
        let known = LogLevel::ALL
            .iter()
            .any(|l| l.to_str().eq_ignore_ascii_case(&label));
        prop_assert_eq!(label_to_rank(&label).is_ok(), known);
    }
}

// ============================================================================
// Filtering
// ============================================================================

proptest! {
    /// should_log agrees with rank comparison for every spelling
    #[test]
    fn test_should_log_matches_ranks(
        level in any_level(),
        min in any_level(),
        s1 in any::<u8>(),
        s2 in any::<u8>(),
    ) {
        prop_assert_eq!(
            should_log(&spelled(level, s1), &spelled(min, s2)),
            level.rank() >= min.rank()
        );
    }

    /// A call reaches the sink iff its rank is at least the minimum
    #[test]
    fn test_logger_filter(level in any_level(), min in any_level(), spelling in any::<u8>()) {
        let (logger, sink) = capture(spelled(min, spelling));

        logger.log(level, "message", Metadata::new());

        prop_assert_eq!(sink.len(), usize::from(level >= min));
    }
}

// ============================================================================
// Records and routing
// ============================================================================

proptest! {
    /// Field order is fixed regardless of metadata keys
    #[test]
    fn test_record_field_order(
        message in ".*",
        keys in prop::collection::vec("[a-z]{3,8}_k", 0..6),
    ) {
        let (logger, sink) = capture(Severity::from("trace"));

        let mut meta = Metadata::new();
        for (i, key) in keys.iter().enumerate() {
            meta.insert(key.clone(), i as i64);
        }
        logger.info_with(message, meta);

        let line = &sink.stdout()[0];
        let record: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        let actual: Vec<String> = record.as_object().unwrap().keys().cloned().collect();

        let mut expected = vec![
            "severity".to_string(),
            "timestamp".to_string(),
            "namespace".to_string(),
            "msg".to_string(),
        ];
        for key in keys {
            if !expected.contains(&key) {
                expected.push(key);
            }
        }
        prop_assert_eq!(actual, expected);
    }

    /// Every record is exactly one newline-terminated line
    #[test]
    fn test_one_line_per_record(message in ".*", text in any::<bool>()) {
        let sink = Arc::new(MemorySink::new());
        let format = if text { OutputFormat::Text } else { OutputFormat::Json };
        let logger = Logger::builder("lines")
            .output_format(format)
            .shared_sink(sink.clone())
            .build()
            .unwrap();

        logger.warn(message);

        let line = &sink.lines()[0].content;
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
    }

    /// Error and above go to stderr, everything else to stdout
    #[test]
    fn test_stream_threshold(level in any_level()) {
        let (logger, sink) = capture(Severity::from("trace"));

        logger.log(level, "routed", Metadata::new());

        let expected = if level.rank() >= 50 {
            StreamTarget::Stderr
        } else {
            StreamTarget::Stdout
        };
        prop_assert_eq!(sink.lines()[0].target, expected);
    }
}
