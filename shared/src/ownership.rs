use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ApiError;
use crate::response::{self, methods, Cors};
use crate::store::RecordStore;
use crate::validate;

/// Outcome of the per-request ownership check on an estimate.
///
/// `Forbidden` and `NotFound` are distinct: callers must be able to tell
/// "exists but isn't yours" apart from "doesn't exist".
#[derive(Debug, PartialEq)]
pub enum Ownership {
    Owned(Value),
    Forbidden,
    NotFound,
}

/// Compare the claimed user against the owner embedded in the estimate's
/// `servicedetails.userID`. Pure classification, no I/O.
pub fn check_ownership(estimate: Option<Value>, claimed_user_id: &str) -> Ownership {
    match estimate {
        None => Ownership::NotFound,
        Some(estimate) => {
            let owner = estimate
                .pointer("/servicedetails/userID")
                .and_then(Value::as_str);
            if owner == Some(claimed_user_id) {
                Ownership::Owned(estimate)
            } else {
                Ownership::Forbidden
            }
        }
    }
}

/// POST /validate — body `{estimateId, userId}`. Re-fetches and re-compares
/// on every call; there is no session or token to cache.
pub async fn validate_user(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::VALIDATE);
    match try_validate_user(store, config, raw).await {
        Ok(estimate) => response::json(
            StatusCode::OK,
            &cors,
            &json!({ "message": "User authenticated successfully.", "estimate": estimate }),
        ),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_validate_user(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Value, ApiError> {
    let body = validate::parse_body(raw)?;
    let estimate_id = body
        .get("estimateId")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing estimateId.".to_string()))?
        .to_string();
    let user_id = body
        .get("userId")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing userId.".to_string()))?
        .to_string();

    let estimate = store
        .get(&config.estimates_table, "estimateId", &estimate_id)
        .await?;

    match check_ownership(estimate, &user_id) {
        Ownership::Owned(estimate) => Ok(estimate),
        Ownership::Forbidden => Err(ApiError::Forbidden(
            "UserID does not match the estimate.".to_string(),
        )),
        Ownership::NotFound => Err(ApiError::NotFound("Estimate not found.".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate_owned_by(user_id: &str) -> Value {
        json!({
            "estimateId": "e1",
            "servicedetails": { "userID": user_id, "typeofservice": "deep" }
        })
    }

    #[test]
    fn matching_owner_yields_the_full_estimate() {
        let estimate = estimate_owned_by("u1");
        match check_ownership(Some(estimate.clone()), "u1") {
            Ownership::Owned(returned) => assert_eq!(returned, estimate),
            other => panic!("expected Owned, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_owner_is_forbidden_not_not_found() {
        assert_eq!(
            check_ownership(Some(estimate_owned_by("u1")), "u2"),
            Ownership::Forbidden
        );
    }

    #[test]
    fn absent_estimate_is_not_found() {
        assert_eq!(check_ownership(None, "u1"), Ownership::NotFound);
    }

    #[test]
    fn estimate_without_owner_field_is_forbidden() {
        let estimate = json!({ "estimateId": "e1", "servicedetails": {} });
        assert_eq!(check_ownership(Some(estimate), "u1"), Ownership::Forbidden);
    }
}
