use crate::error::FetchError;
use crate::record::Incident;
use serde_json::Value;

/// Turn a raw `/api/crimes` response into records or a [`FetchError`].
///
/// Precedence, first match wins:
/// 1. body is a JSON object with a truthy `"error"` field -> `Application`,
///    whatever the status and whatever else the body holds
/// 2. status is not 2xx -> `Status`
/// 3. body is not a JSON object with a `data` array -> `Decode`
///
/// Records inside `data` that do not decode (missing `OBJECTID`, wrong
/// types) are skipped with a warning; the others keep their order.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<Incident>, FetchError> {
    let parsed = serde_json::from_slice::<Value>(body);

    if let Ok(Value::Object(fields)) = &parsed {
        if let Some(message) = fields.get("error").and_then(error_message) {
            return Err(FetchError::Application { message });
        }
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status { status });
    }

    let raw = match parsed.map_err(|e| FetchError::Decode(e.to_string()))? {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(FetchError::Decode("response has no \"data\" array".into())),
        },
        _ => return Err(FetchError::Decode("response is not a JSON object".into())),
    };

    let total = raw.len();
    let records: Vec<Incident> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Incident>(value) {
            Ok(incident) => Some(incident),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed incident record");
                None
            }
        })
        .collect();

    tracing::debug!(total, kept = records.len(), "decoded incidents payload");
    Ok(records)
}

/// `null`, `false` and `""` do not count as an error.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OccurredAt;

    const SCENARIO_A: &str = r#"{"data":[{"OBJECTID":1,"Incident_Type":"Theft","Occurred_Datetime":"2024-01-01T10:00:00Z","Block_Address":"Block of Shattuck Ave","Case_Number":"24-0001"}]}"#;

    #[test]
    fn single_record() {
        let records = decode_response(200, SCENARIO_A.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, 1);
        assert_eq!(r.incident_type, "Theft");
        assert_eq!(r.occurred, OccurredAt::Text("2024-01-01T10:00:00Z".into()));
        assert_eq!(r.block_address, "Block of Shattuck Ave");
        assert_eq!(r.case_number, "24-0001");
        assert_eq!(r.description, None);
    }

    #[test]
    fn empty_data() {
        assert!(decode_response(200, br#"{"data":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let body = br#"{"data":[{"OBJECTID":30},{"OBJECTID":10},{"OBJECTID":20}]}"#;
        let ids: Vec<u64> = decode_response(200, body)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn error_field_wins_over_status() {
        let err = decode_response(500, br#"{"error":"db down"}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::Application {
                message: "db down".into()
            }
        );
        assert!(err.to_string().contains("db down"));
    }

    #[test]
    fn error_field_with_success_status_is_still_error() {
        let err = decode_response(200, br#"{"error":"quota","data":[]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Application { .. }));
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        let err = decode_response(200, br#"{"error":{"code":7}}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::Application {
                message: r#"{"code":7}"#.into()
            }
        );
    }

    #[test]
    fn error_field_wins_even_when_data_is_malformed() {
        let err = decode_response(500, br#"{"error":"db down","data":5}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::Application {
                message: "db down".into()
            }
        );

        let err = decode_response(200, br#"{"error":"quota","data":"nope"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Application { .. }));
    }

    #[test]
    fn data_of_wrong_type_is_decode_error() {
        let err = decode_response(200, br#"{"data":5}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        let err = decode_response(200, br#"{"data":null}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn odd_field_types_do_not_drop_records() {
        let body = br#"{"data":[
            {"OBJECTID":1,"Occurred_Datetime":1704103200000.0},
            {"OBJECTID":2,"Occurred_Datetime":true},
            {"OBJECTID":3,"Incident_Type":5}
        ]}"#;
        let records = decode_response(200, body).unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[0].occurred, OccurredAt::EpochMillis(1_704_103_200_000));
        assert_eq!(records[1].occurred, OccurredAt::Other("true".into()));
        assert_eq!(records[2].incident_type, "5");
    }

    #[test]
    fn null_error_is_ignored() {
        let records = decode_response(200, br#"{"error":null,"data":[{"OBJECTID":1}]}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn bad_status_without_error_field() {
        assert_eq!(
            decode_response(503, b"Service Unavailable").unwrap_err(),
            FetchError::Status { status: 503 }
        );
        assert_eq!(
            decode_response(404, br#"{"data":[]}"#).unwrap_err(),
            FetchError::Status { status: 404 }
        );
    }

    #[test]
    fn malformed_json() {
        let err = decode_response(200, b"{\"data\": [").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn missing_data_array() {
        let err = decode_response(200, br#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn top_level_array_is_not_an_envelope() {
        let err = decode_response(200, br#"[{"OBJECTID":1}]"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn bad_records_are_skipped() {
        let body = br#"{"data":[{"OBJECTID":1},{"Incident_Type":"no id"},"junk",{"OBJECTID":3}]}"#;
        let ids: Vec<u64> = decode_response(200, body)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
