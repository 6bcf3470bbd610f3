use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ApiError;
use crate::response::{self, methods, Cors};
use crate::store::RecordStore;
use crate::types::{Estimate, SERVICE_DETAIL_FIELDS};
use crate::validate;

/// POST /estimates — validate and upsert one estimate. No existence check;
/// a duplicate key silently overwrites (last writer wins).
pub async fn create(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::ESTIMATES);
    match try_create(store, config, raw).await {
        Ok(item) => response::json(
            StatusCode::OK,
            &cors,
            &json!({ "message": "Estimate created successfully!", "item": item }),
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
    let estimate_id = validate::required_string(&body, "estimateId")?;
    let details = validate::required_object(&body, "servicedetails")?;
    validate::required_keys(details, "servicedetails", SERVICE_DETAIL_FIELDS)?;

    let estimate = Estimate {
        estimate_id,
        servicedetails: Value::Object(details.clone()),
    };
    let item = serde_json::to_value(&estimate).map_err(|e| ApiError::Internal(e.to_string()))?;

    store
        .put(&config.estimates_table, "estimateId", item.clone())
        .await?;
    tracing::info!(estimate_id = %estimate.estimate_id, "estimate created");
    Ok(item)
}

/// GET /estimates/{id} — the bare stored item is the response body.
pub async fn get_one(
    store: &dyn RecordStore,
    config: &Config,
    estimate_id: &str,
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::ESTIMATES);
    match try_get_one(store, config, estimate_id).await {
        Ok(item) => response::json(StatusCode::OK, &cors, &item),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_get_one(
    store: &dyn RecordStore,
    config: &Config,
    estimate_id: &str,
) -> Result<Value, ApiError> {
    if estimate_id.is_empty() {
        return Err(ApiError::Validation("\"estimateId\" is required".to_string()));
    }
    store
        .get(&config.estimates_table, "estimateId", estimate_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Estimate not found".to_string()))
}

/// GET /estimates — unconditional full scan, no pagination or ordering.
pub async fn get_all(store: &dyn RecordStore, config: &Config) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::ESTIMATES);
    match store.scan(&config.estimates_table).await {
        Ok(items) => response::json(StatusCode::OK, &cors, &json!({ "estimates": items })),
        Err(err) => response::error(&ApiError::from(err), &cors),
    }
}

/// PUT /estimates — merge the servicedetails attribute by key. The response
/// carries the key plus only the updated attributes, never the full record.
pub async fn update(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::ESTIMATES);
    match try_update(store, config, raw).await {
        Ok(item) => response::json(
            StatusCode::OK,
            &cors,
            &json!({ "message": "Estimate updated successfully!", "item": item }),
        ),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_update(
    store: &dyn RecordStore,
    config: &Config,
    raw: &[u8],
) -> Result<Value, ApiError> {
    let body = validate::parse_body(raw)?;
    let estimate_id = validate::required_string(&body, "estimateId")?;
    let details = validate::required_object(&body, "servicedetails")?;

    let updated = store
        .update_attribute(
            &config.estimates_table,
            "estimateId",
            &estimate_id,
            "servicedetails",
            Value::Object(details.clone()),
        )
        .await?;

    let mut item = serde_json::Map::new();
    item.insert("estimateId".to_string(), Value::String(estimate_id));
    if let Value::Object(attrs) = updated {
        item.extend(attrs);
    }
    Ok(Value::Object(item))
}
