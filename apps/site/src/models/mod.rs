use chrono::{SecondsFormat, Utc};
use serde_json::Value;

pub mod post;
pub mod profile;

/// Current UTC time as RFC 3339 with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Text form of a loosely typed JSON scalar: strings pass through, numbers and
/// booleans are stringified, anything else is empty.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
