//! The benchmark record: one run, one model, one day.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

pub const DATE_FIELD: &str = "date";
pub const MODEL_ID_FIELD: &str = "model_id";
pub const SOURCE_FILE_FIELD: &str = "source_file";

pub const COMMIT_SHA_FIELD: &str = "commit_sha";
pub const BUILD_ID_FIELD: &str = "build_id";
pub const BUILD_URL_FIELD: &str = "build_url";

/// `strftime` pattern of the date stamped on records that carry none.
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d-%H%M%S";

/// One field of a record.
///
/// Results files may carry the `NaN`, `Infinity` and `-Infinity` literals,
/// which a [`Value`] cannot hold; those arrive as [`FieldValue::NonFinite`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Json(Value),
    NonFinite(f64),
}

impl FieldValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::NonFinite(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Json(Value::Null))
    }

    /// Numeric view used by change detection; strings are not parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Json(Value::Number(n)) => n.as_f64(),
            Self::Json(_) => None,
            Self::NonFinite(x) => Some(*x),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Json(Value::from(value))
        } else {
            Self::NonFinite(value)
        }
    }
}

/// JSON text, with non-finite floats spelled as their literals.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::NonFinite(x) => f.write_str(non_finite_literal(*x)),
        }
    }
}

/// `NaN`, `Infinity` or `-Infinity`. Finite input is not expected.
pub fn non_finite_literal(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

/// A field-name to value mapping, as read from one results file.
///
/// Field order is not significant; column order is decided when sheets are
/// built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Wrap a parsed JSON value; only objects are records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, FieldValue::Json(value)))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Insert `value` only when `field` is absent.
    pub fn insert_default(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields
            .entry(field.into())
            .or_insert_with(|| value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Sort key for recency. Missing or null dates compare as the empty string.
    pub fn date(&self) -> Cow<'_, str> {
        key_text(self.get(DATE_FIELD))
    }

    /// Grouping key. Missing or null model ids share the empty key.
    pub fn model_id(&self) -> Cow<'_, str> {
        key_text(self.get(MODEL_ID_FIELD))
    }

    /// Name of the file the record was read from, for log messages.
    pub fn source_file(&self) -> Cow<'_, str> {
        key_text(self.get(SOURCE_FILE_FIELD))
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Non-string scalars (e.g. a numeric date) compare by their JSON text.
fn key_text(value: Option<&FieldValue>) -> Cow<'_, str> {
    match value {
        None | Some(FieldValue::Json(Value::Null)) => Cow::Borrowed(""),
        Some(FieldValue::Json(Value::String(s))) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2, 3])).is_none());
        assert!(Record::from_value(json!("text")).is_none());
        assert!(Record::from_value(json!(null)).is_none());
        assert!(Record::from_value(json!({})).is_some());
    }

    #[test]
    fn test_keys_default_to_empty_string() {
        let record = Record::from_value(json!({ "model_id": null })).unwrap();
        assert_eq!(record.date(), "");
        assert_eq!(record.model_id(), "");
    }

    #[test]
    fn test_numeric_date_uses_json_text() {
        let record = Record::from_value(json!({ "date": 20260101 })).unwrap();
        assert_eq!(record.date(), "20260101");
    }

    #[test]
    fn test_insert_default_keeps_existing_value() {
        let mut record = Record::from_value(json!({ "date": "20260101" })).unwrap();
        record.insert_default(DATE_FIELD, "20990101-000000");
        assert_eq!(record.date(), "20260101");

        let mut empty = Record::default();
        empty.insert_default(DATE_FIELD, "20990101-000000");
        assert_eq!(empty.date(), "20990101-000000");
    }

    #[test]
    fn test_non_finite_fields() {
        let mut record = Record::default();
        record.insert("nan", f64::NAN);
        record.insert("inf", f64::NEG_INFINITY);
        record.insert("finite", 1.5);

        assert!(matches!(record.get("nan"), Some(FieldValue::NonFinite(x)) if x.is_nan()));
        assert_eq!(record.get("inf").map(|v| v.to_string()), Some("-Infinity".into()));
        assert_eq!(record.get("finite").and_then(FieldValue::as_f64), Some(1.5));
        assert_eq!(record.get("finite").and_then(FieldValue::as_json), Some(&json!(1.5)));
    }

    #[test]
    fn test_non_finite_literal_spelling() {
        assert_eq!(non_finite_literal(f64::NAN), "NaN");
        assert_eq!(non_finite_literal(f64::INFINITY), "Infinity");
        assert_eq!(non_finite_literal(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_source_file_key() {
        let record = Record::from_value(json!({ "source_file": "run.json" })).unwrap();
        assert_eq!(record.source_file(), "run.json");
    }
}
