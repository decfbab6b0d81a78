//! How text handlers print entry timestamps
//!
//! Entries always carry a `DateTime<Utc>`. JSON output serializes it as
//! RFC 3339 through serde; [`TextHandler`](crate::handlers::TextHandler)
//! picks one of these formats, or none.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Wall-clock time only, `10:30:45.123`. Handy for interactive tools.
    TimeOnly,

    /// Milliseconds since the Unix epoch.
    UnixMillis,

    /// Any strftime pattern.
    ///
    /// ```
    /// use logg_core::TimestampFormat;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    /// let format = TimestampFormat::Custom("%d/%b/%Y".to_string());
    /// assert_eq!(format.format(&at), "01/Mar/2024");
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, at: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => at.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Rfc3339 => at.to_rfc3339(),
            TimestampFormat::TimeOnly => at.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::UnixMillis => at.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => at.format(pattern).to_string(),
        }
    }
}
