//! Validator/normalizer for loosely-typed JSON records.
//!
//! Every domain record is built from a `serde_json::Value` through
//! [`Normalize`]. Normalization is forgiving about shape and strict about
//! identity:
//!
//! - a missing required field (id, title, start date...) is a fatal [`LoadError`]
//! - an unknown enum value is replaced by the documented default, with a warning
//! - optional fields default to `None`, empty strings or empty lists
//!
//! Loading is all-or-nothing: [`load_collection`] stops at the first fatal
//! error so a view never renders half a collection.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{LoadError, Result};

/// Builds a well-typed record from one raw JSON value.
pub trait Normalize: Sized {
    /// Short record name used in errors and diagnostics ("member", "event"...).
    const KIND: &'static str;

    fn normalize(raw: &Value) -> Result<Self>;
}

/// Normalizes every record of a raw collection, failing on the first fatal error.
pub fn load_collection<T: Normalize>(raw: &[Value]) -> Result<Vec<T>> {
    raw.iter().map(T::normalize).collect()
}

/// Parses a JSON document holding an array of records and normalizes it.
pub fn load_json<T: Normalize>(text: &str) -> Result<Vec<T>> {
    let document: Value = serde_json::from_str(text)?;
    match document {
        Value::Array(items) => load_collection(&items),
        _ => Err(LoadError::NotAnArray { kind: T::KIND }),
    }
}

/// Parses the timestamp formats found in the site's data files.
///
/// RFC 3339 first, then a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` read as UTC,
/// then a bare `YYYY-MM-DD` at UTC midnight.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Read-only view over one raw JSON object with typed, defaulting getters.
pub(crate) struct RawRecord<'a> {
    kind: &'static str,
    id: Option<String>,
    map: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub(crate) fn new(kind: &'static str, raw: &'a Value) -> Result<Self> {
        let map = raw.as_object().ok_or(LoadError::NotAnObject { kind })?;
        let id = map.get("id").and_then(scalar_text);
        Ok(RawRecord { kind, id, map })
    }

    /// The record id; ids may be strings or numbers in the data files.
    pub(crate) fn id(&self) -> Result<String> {
        self.id.clone().ok_or(LoadError::MissingField {
            kind: self.kind,
            id: None,
            field: "id",
        })
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.map
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    fn missing(&self, field: &'static str) -> LoadError {
        LoadError::MissingField {
            kind: self.kind,
            id: self.id.clone(),
            field,
        }
    }

    pub(crate) fn required_string(&self, key: &'static str) -> Result<String> {
        self.text(key)
            .map(str::to_string)
            .ok_or_else(|| self.missing(key))
    }

    pub(crate) fn optional_string(&self, key: &str) -> Option<String> {
        self.text(key).map(str::to_string)
    }

    pub(crate) fn string_or_default(&self, key: &str) -> String {
        self.optional_string(key).unwrap_or_default()
    }

    /// String entries of an array field; anything else yields an empty list.
    pub(crate) fn string_list(&self, key: &str) -> Vec<String> {
        match self.map.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// JSON truthiness, so `"yes"` and `1` read as set and `0` or `""` as unset.
    pub(crate) fn flag(&self, key: &str) -> bool {
        match self.map.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }

    pub(crate) fn optional_count(&self, key: &str) -> Option<u32> {
        let value = self.map.get(key)?;
        match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(count) => Some(count),
            None if value.is_null() => None,
            None => {
                warn!(kind = self.kind, id = ?self.id, field = key, value = %value, "ignoring non-count value");
                None
            }
        }
    }

    pub(crate) fn optional_number(&self, key: &str) -> Option<f64> {
        let value = self.map.get(key)?;
        match value.as_f64() {
            Some(number) => Some(number),
            None if value.is_null() => None,
            None => {
                warn!(kind = self.kind, id = ?self.id, field = key, value = %value, "ignoring non-numeric value");
                None
            }
        }
    }

    pub(crate) fn required_timestamp(&self, key: &'static str) -> Result<DateTime<Utc>> {
        let text = self.text(key).ok_or_else(|| self.missing(key))?;
        parse_timestamp(text).ok_or_else(|| LoadError::InvalidTimestamp {
            kind: self.kind,
            id: self.id.clone().unwrap_or_default(),
            field: key,
            value: text.to_string(),
        })
    }

    /// An optional timestamp; an unreadable value is dropped with a warning.
    pub(crate) fn optional_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let text = self.text(key)?;
        let parsed = parse_timestamp(text);
        if parsed.is_none() {
            warn!(kind = self.kind, id = ?self.id, field = key, value = text, "dropping unreadable timestamp");
        }
        parsed
    }

    /// Reads a closed enum, substituting its default when the value is
    /// missing or unrecognized.
    pub(crate) fn coerce<E>(&self, key: &str) -> E
    where
        E: FromStr + Default + Display,
    {
        match self.text(key) {
            Some(text) => text.parse().unwrap_or_else(|_| {
                let fallback = E::default();
                warn!(kind = self.kind, id = ?self.id, field = key, value = text, default = %fallback, "unrecognized value, using default");
                fallback
            }),
            None => {
                let fallback = E::default();
                warn!(kind = self.kind, id = ?self.id, field = key, default = %fallback, "missing value, using default");
                fallback
            }
        }
    }

    /// A nested object, seen through the same getters.
    pub(crate) fn object(&self, key: &str) -> Option<RawRecord<'a>> {
        let map = self.map.get(key)?.as_object()?;
        Some(RawRecord {
            kind: self.kind,
            id: self.id.clone(),
            map,
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn timestamp_formats() {
        let rfc = parse_timestamp("2024-03-15T18:30:00+01:00").unwrap();
        assert_eq!(rfc.hour(), 17);

        let naive = parse_timestamp("2024-03-15T18:30:00").unwrap();
        assert_eq!((naive.hour(), naive.minute()), (18, 30));

        let fractional = parse_timestamp("2024-03-15T18:30:00.250").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 250);

        let short = parse_timestamp("2024-03-15T18:30").unwrap();
        assert_eq!(short.minute(), 30);

        let date = parse_timestamp("2024-03-15").unwrap();
        assert_eq!((date.day(), date.hour()), (15, 0));

        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn raw_record_getters() {
        let raw = json!({
            "id": 42,
            "title": "  ",
            "name": "Ada",
            "tags": ["a", 3, "", " b "],
            "flag": "yes",
            "zero": 0,
            "count": 12,
            "negative": -1,
            "price": 4.5,
            "nested": { "name": "Hall" }
        });
        let record = RawRecord::new("test", &raw).unwrap();

        assert_eq!(record.id().unwrap(), "42");
        assert!(record.optional_string("title").is_none());
        assert_eq!(record.string_or_default("name"), "Ada");
        assert_eq!(record.string_list("tags"), vec!["a", "b"]);
        assert!(record.string_list("name").is_empty());
        assert!(record.flag("flag"));
        assert!(!record.flag("zero"));
        assert!(!record.flag("absent"));
        assert_eq!(record.optional_count("count"), Some(12));
        assert_eq!(record.optional_count("negative"), None);
        assert_eq!(record.optional_number("price"), Some(4.5));
        assert_eq!(
            record.object("nested").and_then(|n| n.optional_string("name")),
            Some("Hall".to_string())
        );
        assert!(matches!(
            record.required_string("title"),
            Err(LoadError::MissingField { field: "title", .. })
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        let raw = json!("just a string");
        assert!(matches!(
            RawRecord::new("member", &raw),
            Err(LoadError::NotAnObject { kind: "member" })
        ));
    }

    #[test]
    fn unreadable_required_timestamp_is_fatal() {
        let raw = json!({ "id": "e1", "startDate": "soon" });
        let record = RawRecord::new("event", &raw).unwrap();
        match record.required_timestamp("startDate") {
            Err(LoadError::InvalidTimestamp { id, value, .. }) => {
                assert_eq!(id, "e1");
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
        assert!(record.optional_timestamp("startDate").is_none());
    }
}
