//! Wait-time records as delivered by the upstream API.
//!
//! The upstream payload is trusted for nothing: [`parse_records`] checks that
//! it is an array and turns every element into a [`WaitTimeRecord`], failing
//! on the first element that does not fit.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One facility's current emergency-room wait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimeRecord {
    /// Facility identifier echoed back by the upstream.
    pub facility_code: String,

    /// Current wait in whole seconds.
    #[serde(deserialize_with = "deserialize_seconds")]
    pub wait_time_in_seconds: u64,
}

impl WaitTimeRecord {
    pub fn new(facility_code: impl Into<String>, wait_time_in_seconds: u64) -> Self {
        Self {
            facility_code: facility_code.into(),
            wait_time_in_seconds,
        }
    }

    /// Wait time in whole minutes, rounded down.
    pub fn minutes(&self) -> u64 {
        self.wait_time_in_seconds / 60
    }
}

/// Accept the wait time as a JSON integer or as a string holding one; some
/// upstream deployments quote the number.
fn deserialize_seconds<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            D::Error::custom(format!(
                "waitTimeInSeconds must be a non-negative integer, got {}",
                n
            ))
        }),
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| {
            D::Error::custom(format!(
                "waitTimeInSeconds must be a non-negative integer, got \"{}\"",
                s
            ))
        }),
        other => Err(D::Error::custom(format!(
            "waitTimeInSeconds must be a non-negative integer, got {}",
            describe(&other)
        ))),
    }
}

/// Validate an upstream payload into typed records, preserving order.
pub fn parse_records(payload: Value) -> Result<Vec<WaitTimeRecord>> {
    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(Error::UnexpectedShape {
                found: describe(&other).to_string(),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| Error::InvalidRecord {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
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
    use serde_json::json;

    #[test]
    fn minutes_round_down() {
        assert_eq!(WaitTimeRecord::new("A", 125).minutes(), 2);
        assert_eq!(WaitTimeRecord::new("A", 59).minutes(), 0);
        assert_eq!(WaitTimeRecord::new("A", 60).minutes(), 1);
        assert_eq!(WaitTimeRecord::new("A", 0).minutes(), 0);
    }

    #[test]
    fn parses_camel_case_fields() {
        let records = parse_records(json!([
            { "facilityCode": "ABC123", "waitTimeInSeconds": 185 }
        ]))
        .expect("valid payload");

        assert_eq!(records, vec![WaitTimeRecord::new("ABC123", 185)]);
    }

    #[test]
    fn accepts_quoted_wait_times() {
        let records = parse_records(json!([
            { "facilityCode": "X", "waitTimeInSeconds": "240" }
        ]))
        .expect("quoted integer accepted");

        assert_eq!(records[0].wait_time_in_seconds, 240);
    }

    #[test]
    fn ignores_unknown_fields() {
        let records = parse_records(json!([{
            "facilityCode": "X",
            "waitTimeInSeconds": 60,
            "dataCaptureDateTime": "2024-03-01T10:00:00Z"
        }]))
        .expect("extra fields are ignored");

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_records(json!([])).unwrap().is_empty());
    }

    #[test]
    fn object_payload_is_a_shape_error() {
        let err = parse_records(json!({ "error": "nope" })).unwrap_err();
        match err {
            Error::UnexpectedShape { found } => assert_eq!(found, "an object"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_field_names_the_index() {
        let err = parse_records(json!([
            { "facilityCode": "A", "waitTimeInSeconds": 1 },
            { "facilityCode": "B" }
        ]))
        .unwrap_err();

        match err {
            Error::InvalidRecord { index, message } => {
                assert_eq!(index, 1);
                assert!(message.contains("waitTimeInSeconds"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn negative_and_fractional_waits_are_rejected() {
        for bad in [json!(-5), json!(12.5), json!("soon"), json!(null)] {
            let err = parse_records(json!([
                { "facilityCode": "A", "waitTimeInSeconds": bad }
            ]))
            .unwrap_err();
            assert!(
                matches!(err, Error::InvalidRecord { index: 0, .. }),
                "expected invalid record for {:?}",
                err
            );
        }
    }
}
