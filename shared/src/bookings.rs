use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::error::ApiError;
use crate::response::{self, methods, Cors};
use crate::store::RecordStore;
use crate::types::Booking;
use crate::validate;

/// The two accepted request shapes for booking creation. The route decides
/// which one applies; the body is never sniffed to guess.
///
/// `Flat` is the first-party client shape (`bookingId` + `bookingDetails`);
/// `Webhook` is the cal.com scheduling webhook with the booking nested under
/// `payload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingShape {
    Flat,
    Webhook,
}

/// POST /bookings (Flat) and POST /calcom-webhook (Webhook).
pub async fn create(
    store: &dyn RecordStore,
    config: &Config,
    shape: BookingShape,
    raw: &[u8],
) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, methods::BOOKINGS);
    match try_create(store, config, shape, raw).await {
        Ok(item) => response::json(
            StatusCode::OK,
            &cors,
            &json!({ "message": "Booking created successfully", "item": item }),
        ),
        Err(err) => response::error(&err, &cors),
    }
}

async fn try_create(
    store: &dyn RecordStore,
    config: &Config,
    shape: BookingShape,
    raw: &[u8],
) -> Result<Value, ApiError> {
    let body = validate::parse_body(raw)?;
    let booking = match shape {
        BookingShape::Flat => from_flat(&body)?,
        BookingShape::Webhook => from_webhook(&body)?,
    };

    let item = serde_json::to_value(&booking).map_err(|e| ApiError::Internal(e.to_string()))?;
    store
        .put(&config.bookings_table, "bookingId", item.clone())
        .await?;
    tracing::info!(booking_id = %booking.booking_id, "booking created");
    Ok(item)
}

fn from_flat(body: &Value) -> Result<Booking, ApiError> {
    let booking_id = validate::required_string(body, "bookingId")?;
    let details = validate::required_object(body, "bookingDetails")?;
    Ok(Booking {
        booking_id,
        booking_details: Value::Object(details.clone()),
    })
}

/// Normalize the cal.com webhook payload into the stored booking shape,
/// with the defaults the clients already expect for absent fields.
fn from_webhook(body: &Value) -> Result<Booking, ApiError> {
    let payload = validate::required_object(body, "payload")?;
    let payload = Value::Object(payload.clone());
    let booking_id = validate::required_string(&payload, "bookingId")?;

    let str_or = |ptr: &str, default: &str| -> Value {
        Value::String(
            payload
                .pointer(ptr)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string(),
        )
    };

    let mut details = Map::new();
    details.insert("email".to_string(), str_or("/attendee/email", "unknown"));
    details.insert("start".to_string(), str_or("/startTime", ""));
    details.insert("end".to_string(), str_or("/endTime", ""));
    details.insert(
        "duration".to_string(),
        payload.get("duration").cloned().unwrap_or(json!(0)),
    );
    details.insert("location".to_string(), str_or("/location", "unknown address"));
    details.insert("status".to_string(), str_or("/status", "pending"));
    details.insert("eventTitle".to_string(), str_or("/title", "N/A"));

    Ok(Booking {
        booking_id,
        booking_details: Value::Object(details),
    })
}
