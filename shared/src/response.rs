use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::Value;

use crate::error::ApiError;

/// Header set API Gateway forwards on proxied requests.
pub const ALLOWED_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

/// CORS scope for one resource: the configured origin plus the verbs the
/// resource actually answers.
#[derive(Debug, Clone, Copy)]
pub struct Cors<'a> {
    pub origin: &'a str,
    pub methods: &'static str,
}

impl<'a> Cors<'a> {
    pub fn new(origin: &'a str, methods: &'static str) -> Self {
        Self { origin, methods }
    }
}

pub mod methods {
    pub const ESTIMATES: &str = "GET,POST,PUT,OPTIONS";
    pub const USERS: &str = "GET,POST,OPTIONS";
    pub const LOCATIONS: &str = "GET,POST,OPTIONS";
    pub const BOOKINGS: &str = "POST,OPTIONS";
    pub const VALIDATE: &str = "POST,OPTIONS";
}

/// JSON response with the full envelope: status, content type, and the three
/// CORS headers every handler must carry.
pub fn json(status: StatusCode, cors: &Cors<'_>, body: &Value) -> Result<Response<Body>, Error> {
    let resp = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", cors.origin)
        .header("Access-Control-Allow-Methods", cors.methods)
        .header("Access-Control-Allow-Headers", ALLOWED_HEADERS)
        .body(body.to_string().into())
        .map_err(Box::new)?;
    Ok(resp)
}

/// Map a handler error onto the envelope. Same headers as success responses
/// so browsers can read the error body cross-origin.
pub fn error(err: &ApiError, cors: &Cors<'_>) -> Result<Response<Body>, Error> {
    json(err.status(), cors, &err.body())
}

/// Static preflight response. Never touches the store.
pub fn preflight(cors: &Cors<'_>) -> Result<Response<Body>, Error> {
    let resp = Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", cors.origin)
        .header("Access-Control-Allow-Methods", cors.methods)
        .header("Access-Control-Allow-Headers", ALLOWED_HEADERS)
        .body(Body::Empty)
        .map_err(Box::new)?;
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_response_carries_envelope_headers() {
        let cors = Cors::new("https://rapidclean.example", methods::USERS);
        let resp = json(StatusCode::OK, &cors, &json!({ "message": "ok" })).unwrap();

        assert_eq!(resp.status(), 200);
        let headers = resp.headers();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(
            headers["Access-Control-Allow-Origin"],
            "https://rapidclean.example"
        );
        assert_eq!(headers["Access-Control-Allow-Methods"], "GET,POST,OPTIONS");
        assert_eq!(headers["Access-Control-Allow-Headers"], ALLOWED_HEADERS);
    }

    #[test]
    fn error_response_maps_status_and_message() {
        let cors = Cors::new("*", methods::ESTIMATES);
        let err = ApiError::NotFound("Estimate not found".into());
        let resp = error(&err, &cors).unwrap();

        assert_eq!(resp.status(), 404);
        let body: serde_json::Value =
            serde_json::from_slice(&resp.body().to_vec()).unwrap();
        assert_eq!(body["message"], "Estimate not found");
    }

    #[test]
    fn preflight_is_200_with_cors_headers_and_empty_body() {
        let cors = Cors::new("*", methods::VALIDATE);
        let resp = preflight(&cors).unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers()["Access-Control-Allow-Methods"], "POST,OPTIONS");
        assert!(resp.headers().contains_key("Access-Control-Allow-Headers"));
        assert!(matches!(resp.body(), Body::Empty));
    }
}
