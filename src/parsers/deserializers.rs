use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for timestamps that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// Record ids are opaque: the backend may send a number or a string.
pub fn deserialize_record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        _ => return Err(Error::custom("record id must be a number or string")),
    };

    if id.is_empty() {
        return Err(Error::custom("record id cannot be empty"));
    }

    Ok(id)
}

/// Ratings are shown verbatim; numbers keep their JSON spelling, null becomes empty.
pub fn deserialize_rating<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        _ => Err(Error::custom("rating must be a number or string")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use crate::models::ChatRecord;

    #[test]
    fn test_record_timestamp_integer() {
        let json = r#"{
            "id": 7,
            "prompt": "test prompt",
            "response": "test response",
            "created_at": 1762076480016
        }"#;

        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "7");

        // Nov 2, 2025 09:41:20 UTC
        let expected_ts = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(record.created_at, expected_ts);
    }

    #[test]
    fn test_record_timestamp_rfc3339() {
        let json = r#"{
            "id": "65f1c2",
            "prompt": "test prompt",
            "response": "test response",
            "created_at": "2025-11-02T09:41:20.016Z"
        }"#;

        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "65f1c2");
        assert_eq!(record.created_at.timestamp_millis(), 1762076480016);
    }

    #[test]
    fn test_record_rejects_bad_timestamp() {
        let json = r#"{"id": 1, "prompt": "p", "response": "r", "created_at": "yesterday"}"#;
        let err = serde_json::from_str::<ChatRecord>(json).unwrap_err();
        assert!(err.to_string().contains("invalid RFC3339 timestamp"));
    }

    #[test]
    fn test_record_rejects_empty_or_structured_id() {
        let json = r#"{"id": "", "prompt": "p", "response": "r", "created_at": 0}"#;
        let err = serde_json::from_str::<ChatRecord>(json).unwrap_err();
        assert!(err.to_string().contains("record id cannot be empty"));

        let json = r#"{"id": {"oid": 1}, "prompt": "p", "response": "r", "created_at": 0}"#;
        let err = serde_json::from_str::<ChatRecord>(json).unwrap_err();
        assert!(err.to_string().contains("record id must be a number or string"));
    }
}
