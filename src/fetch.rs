//! Data fetcher: one blocking GET, one-level flatten into a [`Frame`].
//!
//! The remote payload is a JSON object whose values are each an array of
//! flat records: `{"key": [{...}, {...}], ...}`. All arrays are
//! concatenated into a single table. The public entry point
//! [`fetch_table`] reports success as a boolean alongside the table;
//! callers branch on the flag, never on the table's contents.

use serde_json::Value;

use crate::frame::{Column, Frame, FrameError};

/// Fixed endpoint serving the caseload snapshot.
pub const DATA_URL: &str = "https://bitbucket.org/!api/2.0/snippets/patientroute/eaXpKj/2d820cd34758161cafb395e8550f1cba2bab4273/files/b_data.json";

/// Why a fetch failed. Internal detail behind the boolean contract of
/// [`fetch_table`]; surfaced through the log, not the return value.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    Shape(String),

    #[error("flattened records are inconsistent: {0}")]
    Frame(#[from] FrameError),
}

/// Fetch the endpoint and flatten its payload into a table.
///
/// A single attempt, no retry, no timeout configuration. On any failure
/// (network, JSON decode, payload shape) this prints the diagnostic the
/// job's console contract requires, logs the specific cause, and returns
/// `(empty frame, false)`.
pub fn fetch_table(url: &str) -> (Frame, bool) {
    match try_fetch(url) {
        Ok(frame) => {
            tracing::debug!(rows = frame.n_rows(), cols = frame.n_cols(), "fetched table");
            (frame, true)
        }
        Err(err) => {
            tracing::warn!(error = %err, "data fetch failed");
            println!("API fetch unsuccessful. Further execution of program terminated.");
            (Frame::new(), false)
        }
    }
}

fn try_fetch(url: &str) -> Result<Frame, FetchError> {
    let body = reqwest::blocking::get(url)?.text()?;
    let payload: Value = serde_json::from_str(&body)?;
    flatten_payload(&payload)
}

/// Flatten a `{key: [records...]}` payload into a [`Frame`].
///
/// The first record fixes the schema: JSON numbers become numeric columns,
/// JSON strings categorical ones. Every later record must carry exactly
/// the same fields with the same scalar kinds; anything else is a
/// [`FetchError::Shape`]. An object with no records at all flattens to an
/// empty frame.
pub fn flatten_payload(payload: &Value) -> Result<Frame, FetchError> {
    let object = payload
        .as_object()
        .ok_or_else(|| FetchError::Shape("top-level value is not an object".into()))?;

    let mut records: Vec<&serde_json::Map<String, Value>> = Vec::new();
    for (key, value) in object {
        let rows = value
            .as_array()
            .ok_or_else(|| FetchError::Shape(format!("value of `{key}` is not an array")))?;
        for (i, row) in rows.iter().enumerate() {
            records.push(row.as_object().ok_or_else(|| {
                FetchError::Shape(format!("entry {i} under `{key}` is not an object"))
            })?);
        }
    }

    let Some(first) = records.first() else {
        return Ok(Frame::new());
    };
    if let Some(bad) = records.iter().find(|r| r.len() != first.len()) {
        return Err(FetchError::Shape(format!(
            "records have differing field counts ({} vs {})",
            bad.len(),
            first.len()
        )));
    }

    let mut frame = Frame::new();
    for (name, prototype) in first.iter() {
        let column = match prototype {
            Value::Number(_) => {
                let mut values = Vec::with_capacity(records.len());
                for record in &records {
                    let value = field(record, name)?;
                    values.push(value.as_f64().ok_or_else(|| {
                        FetchError::Shape(format!("field `{name}` is not numeric in every record"))
                    })?);
                }
                Column::Numeric(values)
            }
            Value::String(_) => {
                let mut labels = Vec::with_capacity(records.len());
                for record in &records {
                    let value = field(record, name)?;
                    labels.push(
                        value
                            .as_str()
                            .ok_or_else(|| {
                                FetchError::Shape(format!(
                                    "field `{name}` is not a string in every record"
                                ))
                            })?
                            .to_owned(),
                    );
                }
                Column::Categorical(labels)
            }
            other => {
                return Err(FetchError::Shape(format!(
                    "field `{name}` has unsupported type `{}`",
                    type_name(other)
                )))
            }
        };
        frame.push_column(name.as_str(), column)?;
    }
    Ok(frame)
}

fn field<'a>(
    record: &'a serde_json::Map<String, Value>,
    name: &str,
) -> Result<&'a Value, FetchError> {
    record
        .get(name)
        .ok_or_else(|| FetchError::Shape(format!("record is missing field `{name}`")))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flatten_concatenates_all_keys() {
        let payload = json!({
            "ward_a": [
                {"service_id": "S1", "age_in_yrs": 54.0, "surgeries_this_month": 3.0},
                {"service_id": "S2", "age_in_yrs": 61.0, "surgeries_this_month": 1.0},
            ],
            "ward_b": [
                {"service_id": "S1", "age_in_yrs": 47.0, "surgeries_this_month": 2.0},
            ],
        });

        let frame = flatten_payload(&payload).unwrap();
        // Row count equals the sum of per-key list lengths.
        assert_eq!(frame.n_rows(), 3);
        assert_eq!(frame.n_cols(), 3);
        assert!(frame.column("service_id").unwrap().is_categorical());
        assert!(frame.column("age_in_yrs").unwrap().is_numeric());
    }

    #[test]
    fn flatten_of_empty_object_is_empty_frame() {
        let frame = flatten_payload(&json!({})).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.n_cols(), 0);
    }

    #[test]
    fn non_object_payload_is_shape_error() {
        let err = flatten_payload(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn missing_field_is_shape_error() {
        let payload = json!({
            "k": [
                {"a": 1.0, "b": "x"},
                {"a": 2.0},
            ],
        });
        assert!(matches!(
            flatten_payload(&payload).unwrap_err(),
            FetchError::Shape(_)
        ));
    }

    #[test]
    fn conflicting_field_type_is_shape_error() {
        let payload = json!({
            "k": [
                {"a": 1.0},
                {"a": "oops"},
            ],
        });
        assert!(matches!(
            flatten_payload(&payload).unwrap_err(),
            FetchError::Shape(_)
        ));
    }

    #[test]
    fn fetch_failure_yields_empty_frame_and_false() {
        // Nothing listens on this port; the request fails fast.
        let (frame, ok) = fetch_table("http://127.0.0.1:9/never");
        assert!(!ok);
        assert!(frame.is_empty());
    }
}
