use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ModelError;

/// One language's entry for a localization key. All fields are optional;
/// an absent `value` means "not yet translated". Nothing ties `updated_at`
/// or `updated_by` to actual `value` edits, the caller is trusted to keep
/// them consistent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, with = "opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Creation payload for a localization record. Storage assigns the id on
/// insert. `translations` is required but may be empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    pub key: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub translations: BTreeMap<String, TranslationValue>,
}

/// Update payload: the same shape plus the id of the record to replace.
/// Updates are whole-document; the stored `translations` map becomes
/// exactly the one given here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalizationUpdate {
    pub id: Uuid,
    pub key: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub translations: BTreeMap<String, TranslationValue>,
}

pub fn validate_key(key: &str) -> Result<(), ModelError> {
    if key.trim().is_empty() {
        return Err(ModelError::Validation("key must not be empty".into()));
    }
    Ok(())
}

pub fn validate_language_code(code: &str) -> Result<(), ModelError> {
    if code.trim().is_empty() {
        return Err(ModelError::Validation(
            "translations must be keyed by non-empty language codes".into(),
        ));
    }
    Ok(())
}

fn validate_shape(
    key: &str,
    translations: &BTreeMap<String, TranslationValue>,
) -> Result<(), ModelError> {
    validate_key(key)?;
    for code in translations.keys() {
        validate_language_code(code)?;
    }
    Ok(())
}

impl Localization {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_shape(&self.key, &self.translations)
    }

    /// Render the payload as a storage row. Timestamps become ISO-8601 text
    /// and nested structures are converted recursively; storage fills in
    /// the id.
    pub fn to_row(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|e| ModelError::Serialize(e.to_string()))
    }
}

impl LocalizationUpdate {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_shape(&self.key, &self.translations)
    }

    /// Render the payload as a storage row, id included as its canonical
    /// string form.
    pub fn to_row(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|e| ModelError::Serialize(e.to_string()))
    }
}

/// Serde adapter for optional edit timestamps. Accepts RFC 3339 text or a
/// naive `YYYY-MM-DDTHH:MM:SS[.f]` form (interpreted as UTC, which is what
/// existing clients send); always serializes back as RFC 3339.
mod opt_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(t) => s.serialize_str(&t.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(text) => parse(&text).map(Some).map_err(serde::de::Error::custom),
        }
    }

    fn parse(text: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(t) = DateTime::parse_from_rfc3339(text) {
            return Ok(t.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|n| n.and_utc())
            .map_err(|_| format!("malformed timestamp: {text}"))
    }
}
