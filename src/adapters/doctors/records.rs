//! Records decoded from the doctors API
//!
//! Decoding happens one element at a time so that a single bad record can be
//! rejected without touching its neighbours.

use crate::domain::errors::{FetchError, MalformedRecord};
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deepest array/object nesting accepted in a response body
pub const MAX_PAYLOAD_DEPTH: usize = 16;

/// A doctor as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: i64,
    pub name: String,
}

/// A slot as listed by the API for one doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Decodes a response body into its top-level array of records
///
/// # Errors
///
/// Returns `FetchError::InvalidPayload` if the body is not JSON, is not an
/// array, or nests deeper than [`MAX_PAYLOAD_DEPTH`].
pub fn decode_payload(body: &str) -> Result<Vec<Value>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

    let depth = nesting_depth(&value);
    if depth > MAX_PAYLOAD_DEPTH {
        return Err(FetchError::InvalidPayload(format!(
            "Maximum nesting depth {MAX_PAYLOAD_DEPTH} exceeded (found {depth})"
        )));
    }

    match value {
        Value::Array(records) => Ok(records),
        other => Err(FetchError::InvalidPayload(format!(
            "Expected an array of records, got {}",
            kind_of(&other)
        ))),
    }
}

/// Decodes one doctor element
pub fn decode_doctor(value: Value) -> Result<DoctorRecord, MalformedRecord> {
    let (id, name) = match (present(&value, "id"), present(&value, "name")) {
        (Some(id), Some(name)) => (id, name),
        _ => {
            return Err(MalformedRecord::new(
                "Missing expected fields in doctor data",
                value,
            ))
        }
    };

    let Some(id) = id.as_i64() else {
        return Err(MalformedRecord::new("Doctor id is not an integer", value));
    };
    let Some(name) = name.as_str() else {
        return Err(MalformedRecord::new("Doctor name is not a string", value));
    };

    Ok(DoctorRecord {
        id,
        name: name.to_string(),
    })
}

/// Decodes one slot element
pub fn decode_slot(value: Value) -> Result<SlotRecord, MalformedRecord> {
    let (start, end) = match (present(&value, "start"), present(&value, "end")) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(MalformedRecord::new(
                "Missing expected fields in slot data",
                value,
            ))
        }
    };

    let parsed = parse_field(start).and_then(|start| parse_field(end).map(|end| (start, end)));

    match parsed {
        Ok((start, end)) => Ok(SlotRecord { start, end }),
        Err(e) => Err(MalformedRecord::new(
            format!("Error parsing slot dates: {e}"),
            value,
        )),
    }
}

/// Offset-less layouts, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an API timestamp into UTC
///
/// RFC 3339 with any offset is accepted, as are `YYYY-MM-DDTHH:MM:SS` and
/// `YYYY-MM-DD HH:MM:SS` (fractional seconds optional), which are read as
/// UTC. Precision stops at microseconds, the resolution the store keeps.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(rfc_err) => NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| format!("Failed to parse time string '{raw}': {rfc_err}"))?,
    };

    Ok(parsed.trunc_subsecs(6))
}

fn parse_field(value: &Value) -> Result<DateTime<Utc>, String> {
    match value.as_str() {
        Some(raw) => parse_timestamp(raw),
        None => Err(format!("Expected a date string, got {value}")),
    }
}

/// Returns the field when it exists and is not `null`
fn present<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    value.get(field).filter(|v| !v.is_null())
}

fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(fields) => 1 + fields.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_decode_payload_array() {
        let records = decode_payload(r#"[{"id":1,"name":"John Doe"}]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_decode_payload_invalid_json() {
        let err = decode_payload("{invalid json}").unwrap_err();
        assert!(matches!(err, FetchError::InvalidPayload(_)));
    }

    #[test]
    fn test_decode_payload_not_an_array() {
        let err = decode_payload(r#"{"id":1}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_decode_payload_too_deep() {
        let body = format!("{}{}", "[".repeat(17), "]".repeat(17));
        assert!(decode_payload(&body).is_err());

        let body = format!("{}{}", "[".repeat(16), "]".repeat(16));
        assert!(decode_payload(&body).is_ok());
    }

    #[test]
    fn test_decode_doctor() {
        let record = decode_doctor(json!({"id": 1, "name": "John Doe"})).unwrap();
        assert_eq!(
            record,
            DoctorRecord {
                id: 1,
                name: "John Doe".to_string()
            }
        );
    }

    #[test]
    fn test_decode_doctor_missing_name() {
        let err = decode_doctor(json!({"id": 1})).unwrap_err();
        assert_eq!(err.reason, "Missing expected fields in doctor data");
        assert_eq!(err.raw, json!({"id": 1}));
    }

    #[test]
    fn test_decode_doctor_null_counts_as_missing() {
        assert!(decode_doctor(json!({"id": null, "name": "John Doe"})).is_err());
    }

    #[test]
    fn test_decode_doctor_non_object() {
        assert!(decode_doctor(json!("John Doe")).is_err());
    }

    #[test]
    fn test_decode_slot() {
        let record = decode_slot(json!({
            "start": "2023-07-01T10:00:00+00:00",
            "end": "2023-07-01T11:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(
            record.start,
            Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(record.end, Utc.with_ymd_and_hms(2023, 7, 1, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_slot_missing_end() {
        let err = decode_slot(json!({"start": "2023-07-01T10:00:00+00:00"})).unwrap_err();
        assert_eq!(err.reason, "Missing expected fields in slot data");
    }

    #[test]
    fn test_decode_slot_invalid_date() {
        let err = decode_slot(json!({
            "start": "invalid-date",
            "end": "2023-07-03T11:00:00+00:00"
        }))
        .unwrap_err();
        assert!(err.reason.starts_with("Error parsing slot dates"));
    }

    #[test]
    fn test_parse_timestamp_converts_offset() {
        let parsed = parse_timestamp("2023-07-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap());
    }

    #[test_case("2023-07-01T10:00:00" ; "iso without offset")]
    #[test_case("2023-07-01 10:00:00.000" ; "space form with fraction")]
    #[test_case("2023-07-01T10:00:00.000000" ; "iso with fraction")]
    fn test_parse_timestamp_naive_forms_read_as_utc(raw: &str) {
        let parsed = parse_timestamp(raw).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_truncates_to_microseconds() {
        let parsed = parse_timestamp("2023-07-01T10:00:00.123456789Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_nanos(), 123_456_000);

        let naive = parse_timestamp("2023-07-01 10:00:00.9999999").unwrap();
        assert_eq!(naive.timestamp_subsec_nanos(), 999_999_000);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("invalid-date").unwrap_err();
        assert!(err.contains("invalid-date"));
    }

    #[test]
    fn test_parse_timestamp_plain_datetime() {
        let parsed = parse_timestamp("2023-07-01 10:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap());
    }
}
