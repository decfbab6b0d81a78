//! Basic usage of logg_core
//!
//! Run with: cargo run --example basic_usage

use logg_core::prelude::*;
use logg_core::{info, TimestampFormat};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct UploadError {
    file: String,
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upload of {} rejected", self.file)
    }
}

impl std::error::Error for UploadError {}

impl LogError for UploadError {
    fn error_fields(&self) -> Option<Fields> {
        Some(Fields::new().with("file", self.file.as_str()))
    }
}

fn main() -> Result<()> {
    let text = TextHandler::new(
        std::io::stdout(),
        TextOptions {
            timestamp: Some(TimestampFormat::Iso8601),
            ..TextOptions::default()
        },
    );

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .handler(ConsoleHandler::new())
        .handler(LevelHandler::new(text, LogLevel::Warn))
        .build()?;

    let start = Instant::now();
    let ctx = logger.with_level(LogLevel::Info).with_field("user", "tj");

    ctx.with_field("file", "sloth.png").log("upload started");
    ctx.with_level(LogLevel::Debug)
        .log(lazy(|| format!("buffer stats: {:?}", [1, 2, 3])));
    info!(ctx, "{} chunks sent", 12);

    let err = logg_core::traced!(UploadError {
        file: "sloth.png".to_string(),
    });
    ctx.with_level(LogLevel::Error)
        .with_duration(start.elapsed().max(Duration::from_millis(1)))
        .with_error(Some(&err))
        .log("upload failed");

    // Not dispatched: trace is below the minimum.
    logger.with_level(LogLevel::Trace).log("never printed");

    logger.flush()?;
    println!(
        "dispatched={} handler_errors={}",
        logger.metrics().dispatched(),
        logger.metrics().handler_errors()
    );
    Ok(())
}
