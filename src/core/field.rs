//! Named values attached to log entries
//!
//! A [`Field`] pairs a name with a [`FieldValue`]. Names are not validated;
//! keep them free of spaces and `=` so text handlers stay parseable.
//! Duplicated names are allowed here and resolved when the entry is
//! finalized (last value wins).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Rendered as whole milliseconds by every handler.
    Duration(Duration),
    /// Display text of an error
    Error(String),
    /// Anything else that can render itself
    Opaque(Arc<dyn fmt::Display + Send + Sync>),
    Null,
}

impl FieldValue {
    /// Wrap an arbitrary displayable value.
    pub fn opaque<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        FieldValue::Opaque(Arc::new(value))
    }

    /// Borrow the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Duration(d) => serde_json::Value::Number(duration_millis(d).into()),
            FieldValue::Opaque(v) => serde_json::Value::String(v.to_string()),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

fn duration_millis(d: &Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{}", duration_millis(d)),
            FieldValue::Opaque(v) => write!(f, "{}", v),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.debug_tuple("String").field(s).finish(),
            FieldValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            FieldValue::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            FieldValue::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            FieldValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            FieldValue::Duration(d) => f.debug_tuple("Duration").field(d).finish(),
            FieldValue::Error(s) => f.debug_tuple("Error").field(s).finish(),
            FieldValue::Opaque(v) => f.debug_tuple("Opaque").field(&v.to_string()).finish(),
            FieldValue::Null => f.write_str("Null"),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Uint(a), FieldValue::Uint(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Duration(a), FieldValue::Duration(b)) => a == b,
            (FieldValue::Error(a), FieldValue::Error(b)) => a == b,
            (FieldValue::Opaque(a), FieldValue::Opaque(b)) => {
                Arc::ptr_eq(a, b) || a.to_string() == b.to_string()
            }
            (FieldValue::Null, FieldValue::Null) => true,
            _ => false,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Uint(u) => serializer.serialize_u64(*u),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Duration(d) => serializer.serialize_u64(duration_millis(d)),
            FieldValue::Opaque(v) => serializer.collect_str(v),
            FieldValue::Null => serializer.serialize_unit(),
        }
    }
}

/// Reads back what `Serialize` writes. The mapping is by JSON shape:
/// durations come back as `Int` milliseconds, errors and opaque values as
/// `String`, and non-negative integers as `Int` unless they exceed `i64`.
impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(i64::try_from(v).map_or(FieldValue::Uint(v), FieldValue::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        Ok(FieldValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FieldValue, D::Error> {
        FieldValue::deserialize(deserializer)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<Cow<'_, str>> for FieldValue {
    fn from(s: Cow<'_, str>) -> Self {
        FieldValue::String(s.into_owned())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(u: $t) -> Self {
                FieldValue::Uint(u as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// A named value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Ordered list of fields. Insertion order matters: for a repeated name
/// the last one wins once the entry is finalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<Field>);

impl Fields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Builder-style append.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.push(Field::new(name, value));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.push(Field::new(name, value));
    }

    pub fn into_inner(self) -> Vec<Field> {
        self.0
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.0
            .iter()
            .map(Field::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Deref for Fields {
    type Target = [Field];

    fn deref(&self) -> &[Field] {
        &self.0
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Fields {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// Capability of producing fields.
///
/// Lets domain types (errors, request descriptors, ...) contribute fields
/// without the logger knowing their concrete type.
pub trait Fielder {
    fn fields(&self) -> Fields;

    /// Append this value's fields to `out`.
    fn extend_into(&self, out: &mut Vec<Field>) {
        out.extend(self.fields());
    }

    /// Number of fields, when cheaply known. Used to size buffers.
    fn size_hint(&self) -> usize {
        0
    }
}

impl Fielder for Fields {
    fn fields(&self) -> Fields {
        self.clone()
    }

    fn extend_into(&self, out: &mut Vec<Field>) {
        out.extend_from_slice(&self.0);
    }

    fn size_hint(&self) -> usize {
        self.0.len()
    }
}

impl Fielder for Field {
    fn fields(&self) -> Fields {
        Fields(vec![self.clone()])
    }

    fn extend_into(&self, out: &mut Vec<Field>) {
        out.push(self.clone());
    }

    fn size_hint(&self) -> usize {
        1
    }
}

impl Fielder for [Field] {
    fn fields(&self) -> Fields {
        Fields(self.to_vec())
    }

    fn extend_into(&self, out: &mut Vec<Field>) {
        out.extend_from_slice(self);
    }

    fn size_hint(&self) -> usize {
        self.len()
    }
}

impl Fielder for Vec<Field> {
    fn fields(&self) -> Fields {
        Fields(self.clone())
    }

    fn extend_into(&self, out: &mut Vec<Field>) {
        out.extend_from_slice(self);
    }

    fn size_hint(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> Fielder for [Field; N] {
    fn fields(&self) -> Fields {
        Fields(self.to_vec())
    }

    fn extend_into(&self, out: &mut Vec<Field>) {
        out.extend_from_slice(self);
    }

    fn size_hint(&self) -> usize {
        N
    }
}

impl<T: Fielder + ?Sized> Fielder for &T {
    fn fields(&self) -> Fields {
        (**self).fields()
    }

    fn extend_into(&self, out: &mut Vec<Field>) {
        (**self).extend_into(out)
    }

    fn size_hint(&self) -> usize {
        (**self).size_hint()
    }
}
