use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Error, Request, Response};
use rapidclean_shared::bookings::{self, BookingShape};
use rapidclean_shared::config::Config;
use rapidclean_shared::response::{self, methods, Cors};
use rapidclean_shared::store::RecordStore;
use rapidclean_shared::{estimates, locations, ownership, users, AppState};
use std::sync::Arc;

/// Main Lambda handler - dispatches each request to its resource handler by
/// method and path. Exactly one store call happens per invocation, inside
/// the selected handler.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let path = event.uri().path().to_string();
    let body = event.body();
    let store = state.store.as_ref();
    let config = &state.config;

    tracing::info!(%method, %path, "API Lambda invoked");

    // CORS preflight: static response scoped to the resource's verbs,
    // independent of resource state.
    if method == Method::OPTIONS {
        let cors = Cors::new(&config.allowed_origin, resource_methods(&path));
        return response::preflight(&cors);
    }

    match (&method, path.as_str()) {
        (&Method::POST, "/estimates") => estimates::create(store, config, body).await,
        (&Method::GET, "/estimates") => estimates::get_all(store, config).await,
        (&Method::PUT, "/estimates") => estimates::update(store, config, body).await,
        (&Method::POST, "/users") => users::create(store, config, body).await,
        (&Method::POST, "/locations") => locations::create(store, config, body).await,
        (&Method::POST, "/bookings") => {
            bookings::create(store, config, BookingShape::Flat, body).await
        }
        (&Method::POST, "/calcom-webhook") => {
            bookings::create(store, config, BookingShape::Webhook, body).await
        }
        (&Method::POST, "/validate") => ownership::validate_user(store, config, body).await,
        _ => route_by_id(&method, &path, store, config, body).await,
    }
}

/// Routes with a trailing path parameter.
async fn route_by_id(
    method: &Method,
    path: &str,
    store: &dyn RecordStore,
    config: &Config,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    if let Some(estimate_id) = path.strip_prefix("/estimates/") {
        return match method {
            &Method::GET => estimates::get_one(store, config, estimate_id).await,
            &Method::PUT => estimates::update(store, config, body).await,
            _ => method_not_allowed(config, methods::ESTIMATES),
        };
    }

    // Check the by-user route before the plain id route; both share the
    // /locations/ prefix.
    if let Some(user_id) = path.strip_prefix("/locations/user/") {
        return match method {
            &Method::GET => locations::get_by_user(store, config, user_id).await,
            _ => method_not_allowed(config, methods::LOCATIONS),
        };
    }

    if let Some(location_id) = path.strip_prefix("/locations/") {
        return match method {
            &Method::GET => locations::get_one(store, config, location_id).await,
            _ => method_not_allowed(config, methods::LOCATIONS),
        };
    }

    if let Some(user_id) = path.strip_prefix("/users/") {
        return match method {
            &Method::GET => users::get_one(store, config, user_id).await,
            _ => method_not_allowed(config, methods::USERS),
        };
    }

    if is_resource_root(path) {
        return method_not_allowed(config, resource_methods(path));
    }

    let cors = Cors::new(&config.allowed_origin, resource_methods(path));
    response::json(
        StatusCode::NOT_FOUND,
        &cors,
        &serde_json::json!({ "message": "Not found" }),
    )
}

fn is_resource_root(path: &str) -> bool {
    matches!(
        path,
        "/estimates" | "/users" | "/locations" | "/bookings" | "/calcom-webhook" | "/validate"
    )
}

fn resource_methods(path: &str) -> &'static str {
    if path.starts_with("/estimates") {
        methods::ESTIMATES
    } else if path.starts_with("/users") {
        methods::USERS
    } else if path.starts_with("/locations") {
        methods::LOCATIONS
    } else if path.starts_with("/bookings") || path.starts_with("/calcom-webhook") {
        methods::BOOKINGS
    } else if path.starts_with("/validate") {
        methods::VALIDATE
    } else {
        "GET,POST,OPTIONS"
    }
}

fn method_not_allowed(config: &Config, allowed: &'static str) -> Result<Response<Body>, Error> {
    let cors = Cors::new(&config.allowed_origin, allowed);
    response::json(
        StatusCode::METHOD_NOT_ALLOWED,
        &cors,
        &serde_json::json!({ "message": "Method not allowed" }),
    )
}
