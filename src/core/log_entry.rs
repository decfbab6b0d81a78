//! Log entry structure
//!
//! A [`LogEntry`] is the finalized record handed to handlers: level,
//! timestamp, message and the deduplicated fields of the context it was
//! built from.

use super::field::{Field, FieldValue, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Field buffers that grew past this many slots are shrunk on reset.
const MAX_RETAINED_FIELDS: usize = 64;
/// Message buffers that grew past this many bytes are shrunk on reset.
const MAX_RETAINED_MESSAGE: usize = 4 * 1024;

/// The finalized entry passed to handlers.
///
/// Entries given to [`Handler::handle`](super::Handler::handle) are pooled
/// and only valid for the duration of that call. A handler that keeps an
/// entry around must `clone()` it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Distinct by name, in record order.
    pub fields: Vec<Field>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            message: message.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    /// Value of the field called `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Copy of the fields as a [`Fields`] list.
    pub fn fields(&self) -> Fields {
        Fields::from(self.fields.clone())
    }

    /// Clear everything so the entry can be reused.
    pub(crate) fn reset(&mut self) {
        self.level = LogLevel::Invalid;
        self.timestamp = DateTime::<Utc>::default();
        self.message.clear();
        self.fields.clear();
        if self.fields.capacity() > MAX_RETAINED_FIELDS {
            self.fields.shrink_to(MAX_RETAINED_FIELDS);
        }
        if self.message.capacity() > MAX_RETAINED_MESSAGE {
            self.message.shrink_to(MAX_RETAINED_MESSAGE);
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            level: LogLevel::Invalid,
            timestamp: DateTime::<Utc>::default(),
            message: String::new(),
            fields: Vec::new(),
        }
    }
}

struct FieldMap<'a>(&'a [Field]);

impl Serialize for FieldMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in self.0 {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

/// `{"level", "timestamp", "message", "fields": {name: value, ...}}` with
/// fields in record order. The timestamp is RFC 3339.
impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LogEntry", 4)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("fields", &FieldMap(&self.fields))?;
        state.end()
    }
}

/// Fields object read back in document order.
struct FieldList(Vec<Field>);

impl<'de> Deserialize<'de> for FieldList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldListVisitor;

        impl<'de> Visitor<'de> for FieldListVisitor {
            type Value = FieldList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FieldList, A::Error> {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, FieldValue>()? {
                    fields.push(Field { name, value });
                }
                Ok(FieldList(fields))
            }
        }

        deserializer.deserialize_map(FieldListVisitor)
    }
}

#[derive(Deserialize)]
struct RawEntry {
    level: LogLevel,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    fields: Option<FieldList>,
}

/// Reads the shape written by `Serialize`. Field values follow the
/// [`FieldValue`] JSON mapping, so an entry read back may differ from the
/// original in variant (e.g. a duration becomes an integer).
impl<'de> Deserialize<'de> for LogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEntry::deserialize(deserializer)?;
        Ok(Self {
            level: raw.level,
            timestamp: raw.timestamp,
            message: raw.message,
            fields: raw.fields.map(|f| f.0).unwrap_or_default(),
        })
    }
}
