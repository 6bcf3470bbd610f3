use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ApiError;
use crate::response::{self, methods, Cors};
use crate::store::RecordStore;
use crate::types::{User, USER_DETAIL_FIELDS};
use crate::validate;

/// POST /users — validate and upsert one user record.
pub async fn create(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::USERS);
    match try_create(store, config, raw).await {
        Ok(item) => response::json(
            StatusCode::OK,
            &cors,
            &json!({ "message": "User created successfully!", "item": item }),
        ),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_create(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Value, ApiError> {
    let body = validate::parse_body(raw)?;
    let user_id = validate::required_string(&body, "userId")?;
    let details = validate::required_object(&body, "userDetails")?;
    validate::required_keys(details, "userDetails", USER_DETAIL_FIELDS)?;

    let user = User {
        user_id,
        user_details: Value::Object(details.clone()),
    };
    let item = serde_json::to_value(&user).map_err(|e| ApiError::Internal(e.to_string()))?;

    store.put(&config.users_table, "userId", item.clone()).await?;
    tracing::info!(user_id = %user.user_id, "user created");
    Ok(item)
}

/// GET /users/{id}
pub async fn get_one(
    store: &dyn RecordStore,
    config: &Config,
    user_id: &str,
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::USERS);
    match try_get_one(store, config, user_id).await {
        Ok(item) => response::json(StatusCode::OK, &cors, &json!({ "user": item })),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_get_one(
    store: &dyn RecordStore,
    config: &Config,
    user_id: &str,
) -> Result<Value, ApiError> {
    if user_id.is_empty() {
        return Err(ApiError::Validation(
            "Invalid request: \"userId\" is required and must be a string.".to_string(),
        ));
    }
    store
        .get(&config.users_table, "userId", user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))
}
