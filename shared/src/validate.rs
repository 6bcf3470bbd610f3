use serde_json::{Map, Value};

use crate::error::ApiError;

/// Parse a raw request body into JSON.
///
/// Malformed JSON is reported as an internal error (500), not a validation
/// error. That matches what this API has always returned in production, so
/// clients depending on it keep working.
pub fn parse_body(raw: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(raw).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Required top-level identifier: present, a string, and non-empty.
pub fn required_string(body: &Value, field: &str) -> Result<String, ApiError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ApiError::Validation(format!(
            "Invalid request: \"{field}\" is required and must be a string."
        ))),
    }
}

/// Required details payload: present and an object.
pub fn required_object<'a>(body: &'a Value, field: &str) -> Result<&'a Map<String, Value>, ApiError> {
    match body.get(field) {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::Validation(format!(
            "Invalid request: \"{field}\" is required and must be an object."
        ))),
    }
}

/// Fixed sub-schema check: every named field must exist as a key, checked in
/// declared order so the first missing one names the error. Values are not
/// inspected any deeper.
pub fn required_keys(
    details: &Map<String, Value>,
    parent: &str,
    fields: &[&str],
) -> Result<(), ApiError> {
    for field in fields {
        if !details.contains_key(*field) {
            return Err(ApiError::Validation(format!(
                "Invalid request: \"{parent}.{field}\" is required."
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_failure_is_internal_not_validation() {
        let err = parse_body(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn required_string_rejects_missing_empty_and_mistyped() {
        let body = json!({ "empty": "", "number": 7, "ok": "abc" });

        assert_eq!(required_string(&body, "ok").unwrap(), "abc");
        for field in ["missing", "empty", "number"] {
            let err = required_string(&body, field).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid request: \"{field}\" is required and must be a string.")
            );
        }
    }

    #[test]
    fn required_object_rejects_non_objects() {
        let body = json!({ "details": { "a": 1 }, "list": [1, 2] });

        assert!(required_object(&body, "details").is_ok());
        let err = required_object(&body, "list").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid request: \"list\" is required and must be an object."
        );
    }

    #[test]
    fn required_keys_names_first_missing_field_in_declared_order() {
        let details = json!({ "b": 1, "d": null });
        let details = details.as_object().unwrap();

        let err = required_keys(details, "servicedetails", &["a", "b", "c"]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: \"servicedetails.a\" is required.");

        let err = required_keys(details, "servicedetails", &["b", "c", "a"]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: \"servicedetails.c\" is required.");
    }

    #[test]
    fn required_keys_accepts_any_value_type_including_null() {
        let details = json!({ "a": null, "b": [1], "c": "x" });
        let details = details.as_object().unwrap();
        assert!(required_keys(details, "d", &["a", "b", "c"]).is_ok());
    }
}
