use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ApiError;
use crate::response::{self, methods, Cors};
use crate::store::RecordStore;
use crate::types::Location;
use crate::validate;

/// POST /locations — validate and upsert one location.
///
/// `locationdetails` is free-form, but when it carries a string `userId` we
/// lift it to a top-level attribute so the by-user index can serve
/// `get_by_user` with a query instead of a filtered scan.
pub async fn create(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::LOCATIONS);
    match try_create(store, config, raw).await {
        Ok(item) => response::json(
            StatusCode::CREATED,
            &cors,
            &json!({ "message": "Location created successfully!", "item": item }),
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
    let location_id = validate::required_string(&body, "locationId")?;
    let details = validate::required_object(&body, "locationdetails")?;

    let owner = details.get("userId").and_then(Value::as_str).map(String::from);
    let location = Location {
        location_id,
        locationdetails: Value::Object(details.clone()),
        user_id: owner,
    };
    let item = serde_json::to_value(&location).map_err(|e| ApiError::Internal(e.to_string()))?;

    store
        .put(&config.locations_table, "locationId", item.clone())
        .await?;
    tracing::info!(location_id = %location.location_id, "location created");
    Ok(item)
}

/// GET /locations/{id}
pub async fn get_one(
    store: &dyn RecordStore,
    config: &Config,
    location_id: &str,
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::LOCATIONS);
    match try_get_one(store, config, location_id).await {
        Ok(item) => response::json(StatusCode::OK, &cors, &json!({ "location": item })),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_get_one(
    store: &dyn RecordStore,
    config: &Config,
    location_id: &str,
) -> Result<Value, ApiError> {
    if location_id.is_empty() {
        return Err(ApiError::Validation(
            "Invalid request: \"locationId\" is required and must be a string.".to_string(),
        ));
    }
    store
        .get(&config.locations_table, "locationId", location_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Location not found.".to_string()))
}

/// GET /locations/user/{userId} — secondary-index lookup by owning user.
pub async fn get_by_user(
    store: &dyn RecordStore,
    config: &Config,
    user_id: &str,
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::LOCATIONS);
    match try_get_by_user(store, config, user_id).await {
        Ok(items) => response::json(StatusCode::OK, &cors, &json!({ "locations": items })),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_get_by_user(
    store: &dyn RecordStore,
    config: &Config,
    user_id: &str,
) -> Result<Vec<Value>, ApiError> {
    if user_id.is_empty() {
        return Err(ApiError::Validation(
            "Invalid request: \"userId\" is required and must be a string.".to_string(),
        ));
    }
    let items = store
        .query_by_attribute(
            &config.locations_table,
            &config.locations_user_index,
            "userId",
            user_id,
        )
        .await?;
    if items.is_empty() {
        return Err(ApiError::NotFound(
            "Location not found for the given userId.".to_string(),
        ));
    }
    Ok(items)
}
