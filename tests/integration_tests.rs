//! Integration tests for the logging core
//!
//! These tests verify:
//! - Record contents for chained contexts
//! - Lazy message production
//! - Copy-on-write contexts
//! - Handler composition and the stop sentinel
//! - Text and JSON output
//! - Level parsing

use chrono::{TimeZone, Utc};
use logg_core::prelude::*;
use logg_core::{parse_level, TimestampFormat};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn capture(min: LogLevel) -> (Logger, Arc<MemoryHandler>) {
    let memory = Arc::new(MemoryHandler::new());
    let logger = Logger::builder()
        .min_level(min)
        .handler(Arc::clone(&memory))
        .build()
        .expect("valid logger");
    (logger, memory)
}

fn field_pairs(entry: &LogEntry) -> Vec<(String, String)> {
    entry
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.value.to_string()))
        .collect()
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_context_records() {
    let (logger, memory) = capture(LogLevel::Info);

    let ctx = logger
        .with_level(LogLevel::Info)
        .with_field("user", "tj")
        .with_field("id", "123");
    ctx.log("hello");
    logger.with_level(LogLevel::Info).log("world");
    ctx.with_level(LogLevel::Error).log("boom");

    let entries = memory.entries();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].level, LogLevel::Info);
    assert_eq!(entries[0].message, "hello");
    assert_eq!(field_pairs(&entries[0]), pairs(&[("user", "tj"), ("id", "123")]));

    assert_eq!(entries[1].level, LogLevel::Info);
    assert_eq!(entries[1].message, "world");
    assert!(entries[1].fields.is_empty());

    assert_eq!(entries[2].level, LogLevel::Error);
    assert_eq!(entries[2].message, "boom");
    assert_eq!(field_pairs(&entries[2]), pairs(&[("user", "tj"), ("id", "123")]));
}

#[test]
fn test_lazy_message_not_called_when_disabled() {
    let (logger, memory) = capture(LogLevel::Warn);
    let calls = AtomicUsize::new(0);

    logger.with_level(LogLevel::Info).log(lazy(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        "never".to_string()
    }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    logger.with_level(LogLevel::Warn).log(lazy(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        "once".to_string()
    }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(memory.entries()[0].message, "once");
}

#[test]
fn test_logging_twice_is_idempotent() {
    let (logger, memory) = capture(LogLevel::Info);
    let ctx = logger
        .with_level(LogLevel::Info)
        .with_field("a", 1)
        .with_field("a", 2);

    ctx.log("same");
    ctx.log("same");

    let entries = memory.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].fields, entries[1].fields);
    assert_eq!(entries[0].fields, vec![Field::new("a", 2)]);
    // The context itself still holds both appends.
    assert_eq!(ctx.fields().len(), 2);
}

#[test]
fn test_branching_contexts() {
    let (logger, memory) = capture(LogLevel::Info);
    let base = logger.with_level(LogLevel::Info).with_field("service", "api");
    let a = base.with_field("route", "/a");
    let b = base.with_field("route", "/b");

    a.log("a");
    b.log("b");
    base.log("base");

    let entries = memory.entries();
    assert_eq!(entries[0].field("route").and_then(|v| v.as_str()), Some("/a"));
    assert_eq!(entries[1].field("route").and_then(|v| v.as_str()), Some("/b"));
    assert!(entries[2].field("route").is_none());
}

#[test]
fn test_dedup_keeps_last_value() {
    let (logger, memory) = capture(LogLevel::Info);
    logger
        .with_level(LogLevel::Info)
        .with_field("a", 1)
        .with_field("b", 2)
        .with_field("a", 3)
        .log("dup");

    let entries = memory.entries();
    assert_eq!(entries[0].fields, vec![Field::new("b", 2), Field::new("a", 3)]);
}

#[test]
fn test_disabled_repeated_fields_then_raised() {
    let (logger, memory) = capture(LogLevel::Error);
    let mut ctx = logger.with_level(LogLevel::Debug);
    for i in 0..9999 {
        ctx = ctx.with_field("same", i);
    }
    assert!(ctx.fields().len() <= logg_core::core::COMPACT_THRESHOLD + 1);

    let raised = ctx.with_level(LogLevel::Error).with_field("same", "final");
    raised.log("raised");

    let entries = memory.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].fields, vec![Field::new("same", "final")]);
}

#[test]
fn test_with_error_and_duration() {
    let (logger, memory) = capture(LogLevel::Info);
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");

    logger
        .with_level(LogLevel::Error)
        .with_duration(Duration::from_millis(1500))
        .with_error(Some(&err))
        .log("startup failed");

    let entry = &memory.entries()[0];
    assert_eq!(entry.field("duration").and_then(|v| v.as_i64()), Some(1500));
    assert_eq!(
        entry.field("error"),
        Some(&FieldValue::Error("config.toml missing".to_string()))
    );
}

#[test]
fn test_traced_error_adds_source() {
    let (logger, memory) = capture(LogLevel::Info);
    let err = logg_core::traced!(std::io::Error::other("refused"));

    logger.with_level(LogLevel::Error).with_error(Some(&err)).log("connect");

    let entry = &memory.entries()[0];
    let source = entry.field("source").and_then(|v| v.as_str()).unwrap_or_default();
    assert!(source.contains("integration_tests.rs"), "source was {}", source);
}

#[test]
fn test_level_handler_filters() {
    let all = Arc::new(MemoryHandler::new());
    let errors = Arc::new(MemoryHandler::new());
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .handler(Arc::clone(&all))
        .handler(LevelHandler::new(Arc::clone(&errors), LogLevel::Error))
        .build()
        .unwrap();

    logger.with_level(LogLevel::Debug).log("d");
    logger.with_level(LogLevel::Error).log("e");

    assert_eq!(all.len(), 2);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.entries()[0].message, "e");
}

#[test]
fn test_stop_sentinel_short_circuits_multi() {
    let after = Arc::new(MemoryHandler::new());
    let reported = Arc::new(std::sync::Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&reported);
    let handler = MultiHandler::new(vec![])
        .with(handler_fn(|entry: &mut LogEntry| {
            if entry.level < LogLevel::Warn {
                Err(LoggerError::StopPropagation)
            } else {
                Ok(())
            }
        }))
        .with(Arc::clone(&after));

    let logger = Logger::builder()
        .min_level(LogLevel::Trace)
        .handler(handler)
        .on_handler_error(Arc::new(move |err: &LoggerError| {
            sink.lock().unwrap().push(err.to_string());
        }))
        .build()
        .unwrap();

    logger.with_level(LogLevel::Info).log("dropped");
    logger.with_level(LogLevel::Warn).log("kept");

    assert_eq!(after.len(), 1);
    assert_eq!(logger.metrics().stopped(), 1);
    assert!(reported.lock().unwrap().is_empty());
}

#[test]
fn test_handler_may_rewrite_entry() {
    let memory = Arc::new(MemoryHandler::new());
    let sink = Arc::clone(&memory);
    let logger = Logger::builder()
        .handler(handler_fn(move |entry: &mut LogEntry| {
            entry.message = entry.message.to_uppercase();
            sink.handle(entry)
        }))
        .build()
        .unwrap();

    logger.with_level(LogLevel::Info).log("quiet");
    assert_eq!(memory.entries()[0].message, "QUIET");
}

#[test]
fn test_text_output() {
    let handler = Arc::new(TextHandler::new(Vec::new(), TextOptions::default()));
    let logger = Logger::builder().handler(Arc::clone(&handler)).build().unwrap();

    let ctx = logger.with_level(LogLevel::Info).with_field("user", "tj");
    ctx.log("hello");
    ctx.with_level(LogLevel::Warn).log("line one\nERROR fake");

    let out = handler.with_writer(|buf| String::from_utf8(buf.clone()).expect("utf-8"));
    assert_eq!(out, "INFO hello user=tj\nWARN line one\\nERROR fake user=tj\n");
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_text_output_with_timestamp() {
    let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().expect("valid datetime");
    let handler = Arc::new(TextHandler::new(
        Vec::new(),
        TextOptions {
            separator: " | ".to_string(),
            timestamp: Some(TimestampFormat::Iso8601),
            ..TextOptions::default()
        },
    ));
    let logger = Logger::builder()
        .handler(Arc::clone(&handler))
        .clock(FixedClock::new(at))
        .build()
        .unwrap();

    logger.with_level(LogLevel::Info).with_field("id", 1).log("ready");

    let out = handler.with_writer(|buf| String::from_utf8(buf.clone()).expect("utf-8"));
    assert_eq!(out, "2025-01-08T10:30:45.000Z | INFO | ready | id=1\n");
}

#[test]
fn test_duration_renders_the_same_in_text_and_json() {
    let text = Arc::new(TextHandler::new(Vec::new(), TextOptions::default()));
    let json = Arc::new(JsonHandler::new(Vec::new()));
    let logger = Logger::builder()
        .handler(Arc::clone(&text))
        .handler(Arc::clone(&json))
        .build()
        .unwrap();

    logger
        .with_level(LogLevel::Info)
        .with_field("d", Duration::from_millis(1500))
        .log("timed");

    let text_out = text.with_writer(|buf| String::from_utf8(buf.clone()).expect("utf-8"));
    let json_out = json.with_writer(|buf| String::from_utf8(buf.clone()).expect("utf-8"));
    let value: serde_json::Value = serde_json::from_str(json_out.trim()).expect("valid JSON");

    assert_eq!(text_out, "INFO timed d=1500\n");
    assert_eq!(value["fields"]["d"], 1500);
}

#[test]
fn test_json_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("app.jsonl");

    let logger = Logger::builder()
        .handler(JsonHandler::open(&path).expect("open json log"))
        .build()
        .unwrap();

    logger
        .with_level(LogLevel::Info)
        .with_field("user", "tj")
        .with_field("attempt", 2)
        .log("login");
    logger.with_level(LogLevel::Error).log("boom");
    logger.flush().expect("flush");

    let content = fs::read_to_string(&path).expect("read json log");
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid JSON line"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], "info");
    assert_eq!(lines[0]["message"], "login");
    assert_eq!(lines[0]["fields"]["user"], "tj");
    assert_eq!(lines[0]["fields"]["attempt"], 2);
    assert_eq!(lines[1]["level"], "error");
    assert!(lines[1]["fields"].as_object().map_or(false, |m| m.is_empty()));

    let first: LogEntry = serde_json::from_str(content.lines().next().unwrap_or_default())
        .expect("entry reads back");
    assert_eq!(first.message, "login");
    assert_eq!(
        first.fields,
        vec![Field::new("user", "tj"), Field::new("attempt", 2)]
    );
}

#[test]
fn test_parse_levels() {
    assert_eq!(parse_level("warning").unwrap(), parse_level("warn").unwrap());
    assert_eq!(parse_level("warn").unwrap(), LogLevel::Warn);
    assert!(matches!(
        parse_level("bogus"),
        Err(LoggerError::InvalidLevel(ref s)) if s == "bogus"
    ));
    assert_eq!("ERROR".parse::<LogLevel>().unwrap(), LogLevel::Error);
}

#[test]
fn test_flush_reaches_handler() {
    let flushed = Arc::new(AtomicUsize::new(0));

    struct Counting(Arc<AtomicUsize>);

    impl Handler for Counting {
        fn handle(&self, _entry: &mut LogEntry) -> Result<()> {
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    let logger = Logger::builder()
        .handler(Counting(Arc::clone(&flushed)))
        .handler(Counting(Arc::clone(&flushed)))
        .build()
        .unwrap();
    logger.flush().unwrap();
    assert_eq!(flushed.load(Ordering::SeqCst), 2);
}
