//! Mapping between domain types and Firestore value documents.
//!
//! Firestore wraps every field in a typed envelope, e.g.
//! `{"stringValue": "..."}` or `{"timestampValue": "..."}`; these helpers
//! keep that encoding in one place. Document field names are camelCase;
//! changing them would orphan existing documents.

use chrono::{DateTime, SecondsFormat, Utc};
use cicero_core::{
    HistoryRecord, HistoryRecordBuilder, RequestKind, SearchResult, SearchResultBuilder,
    UserProfile, UserProfileBuilder,
};
use cicero_error::{StorageError, StorageErrorKind};
use serde_json::{json, Map, Value};

pub(crate) fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

pub(crate) fn integer_value(i: i64) -> Value {
    // Firestore encodes integers as strings.
    json!({ "integerValue": i.to_string() })
}

pub(crate) fn boolean_value(b: bool) -> Value {
    json!({ "booleanValue": b })
}

pub(crate) fn timestamp_value(ts: &DateTime<Utc>) -> Value {
    json!({ "timestampValue": ts.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

fn get_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

fn get_integer(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = fields.get(key)?.get("integerValue")?;
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn get_bool(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    fields.get(key)?.get("booleanValue")?.as_bool()
}

fn get_timestamp(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(key)?.get("timestampValue")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn kind_from_str(raw: &str) -> RequestKind {
    match raw {
        "code" => RequestKind::Code,
        "search" => RequestKind::Search,
        "image" => RequestKind::Image,
        _ => RequestKind::Text,
    }
}

/// Encode a history record as Firestore fields.
pub(crate) fn history_to_fields(record: &HistoryRecord) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("userId".into(), string_value(record.user_id()));
    fields.insert("prompt".into(), string_value(record.prompt()));
    fields.insert("response".into(), string_value(record.response()));
    fields.insert("type".into(), string_value(record.kind().as_str()));
    fields.insert("timestamp".into(), timestamp_value(record.timestamp()));
    fields.insert("success".into(), boolean_value(*record.success()));
    if let Some(ms) = record.processing_time_ms() {
        fields.insert("processingTime".into(), integer_value(*ms as i64));
    }
    if let Some(model) = record.model() {
        fields.insert("model".into(), string_value(model));
    }
    if let Some(error) = record.error() {
        fields.insert("error".into(), string_value(error));
    }
    if let Some(results) = record.search_results() {
        let values: Vec<Value> = results
            .iter()
            .map(|r| {
                json!({
                    "mapValue": {
                        "fields": {
                            "title": string_value(r.title()),
                            "link": string_value(r.link()),
                            "snippet": string_value(r.snippet()),
                        }
                    }
                })
            })
            .collect();
        fields.insert(
            "searchResults".into(),
            json!({ "arrayValue": { "values": values } }),
        );
    }
    fields
}

/// Decode Firestore fields into a history record.
pub(crate) fn history_from_fields(
    id: &str,
    fields: &Map<String, Value>,
) -> Result<HistoryRecord, StorageError> {
    let invalid =
        |what: &str| StorageError::new(StorageErrorKind::InvalidDocument(format!("{id}: {what}")));

    let search_results = fields
        .get("searchResults")
        .and_then(|v| v.get("arrayValue"))
        .and_then(|v| v.get("values"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|v| {
                    let f = v.get("mapValue")?.get("fields")?.as_object()?;
                    SearchResultBuilder::default()
                        .title(get_string(f, "title").unwrap_or_default())
                        .link(get_string(f, "link").unwrap_or_default())
                        .snippet(get_string(f, "snippet").unwrap_or_default())
                        .build()
                        .ok()
                })
                .collect::<Vec<SearchResult>>()
        });

    HistoryRecordBuilder::default()
        .id(id)
        .user_id(get_string(fields, "userId").ok_or_else(|| invalid("missing userId"))?)
        .prompt(get_string(fields, "prompt").unwrap_or_default())
        .response(get_string(fields, "response").unwrap_or_default())
        .kind(kind_from_str(
            get_string(fields, "type").unwrap_or_default().as_str(),
        ))
        .timestamp(get_timestamp(fields, "timestamp").ok_or_else(|| invalid("missing timestamp"))?)
        .processing_time_ms(get_integer(fields, "processingTime").map(|ms| ms as u64))
        .model(get_string(fields, "model"))
        .success(get_bool(fields, "success").unwrap_or(true))
        .error(get_string(fields, "error"))
        .search_results(search_results)
        .build()
        .map_err(|e| invalid(&e.to_string()))
}

/// Encode a user profile as Firestore fields.
pub(crate) fn profile_to_fields(profile: &UserProfile) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("uid".into(), string_value(profile.uid()));
    if let Some(email) = profile.email() {
        fields.insert("email".into(), string_value(email));
    }
    if let Some(name) = profile.display_name() {
        fields.insert("displayName".into(), string_value(name));
    }
    // Preferences are free-form; store as a JSON string rather than
    // mirroring arbitrary nesting into Firestore map values.
    fields.insert(
        "preferences".into(),
        string_value(&Value::Object(profile.preferences().clone()).to_string()),
    );
    fields.insert("createdAt".into(), timestamp_value(profile.created_at()));
    fields.insert("lastActive".into(), timestamp_value(profile.last_active()));
    fields
}

/// Decode Firestore fields into a user profile.
pub(crate) fn profile_from_fields(
    uid: &str,
    fields: &Map<String, Value>,
) -> Result<UserProfile, StorageError> {
    let invalid =
        |what: &str| StorageError::new(StorageErrorKind::InvalidDocument(format!("{uid}: {what}")));

    let preferences = get_string(fields, "preferences")
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default();

    UserProfileBuilder::default()
        .uid(uid)
        .email(get_string(fields, "email"))
        .display_name(get_string(fields, "displayName"))
        .preferences(preferences)
        .created_at(get_timestamp(fields, "createdAt").ok_or_else(|| invalid("missing createdAt"))?)
        .last_active(
            get_timestamp(fields, "lastActive").ok_or_else(|| invalid("missing lastActive"))?,
        )
        .build()
        .map_err(|e| invalid(&e.to_string()))
}
