use records_core::Record;
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is empty")]
    Empty,
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },
    #[error("record at index {index} is invalid: {message}")]
    InvalidRecord { index: usize, message: String },
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode a response body into records. The body must be a JSON array whose
/// items each carry at least `id` and `name`.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|err| DecodeError::Malformed {
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(DecodeError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Record>(item).map_err(|err| DecodeError::InvalidRecord {
                index,
                message: err.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
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
    use records_core::RecordId;

    #[test]
    fn decodes_records_and_keeps_unknown_fields() {
        let body = br#"[{"id":1,"name":"Leanne","email":"l@example.com"},{"id":"b2","name":"Ervin"}]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, RecordId::Number(1));
        assert_eq!(records[0].extra["email"], "l@example.com");
        assert_eq!(records[1].id, RecordId::Text("b2".to_string()));
    }

    #[test]
    fn tolerates_bom_and_empty_array() {
        let body = b"\xEF\xBB\xBF [] ";
        assert_eq!(decode_records(body).unwrap(), Vec::new());
    }

    #[test]
    fn rejects_non_array_bodies() {
        assert_eq!(
            decode_records(br#"{"id":1}"#),
            Err(DecodeError::NotAnArray { found: "an object" })
        );
        assert_eq!(decode_records(b"  \n"), Err(DecodeError::Empty));
    }

    #[test]
    fn reports_index_of_invalid_record() {
        let err = decode_records(br#"[{"id":1,"name":"A"},{"id":2}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn reports_position_of_malformed_json() {
        let err = decode_records(b"[{\"id\":1,").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { line: 1, .. }));
    }
}
