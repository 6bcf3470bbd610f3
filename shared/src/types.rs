use serde::{Deserialize, Serialize};
use serde_json::Value;

// Sub-schemas are validated for key presence only, in declared order; the
// first missing field names the 400. Detail payloads stay as raw JSON.

pub const SERVICE_DETAIL_FIELDS: &[&str] = &[
    "userID",
    "typeofservice",
    "construct",
    "sqft",
    "numpeople",
    "numrooms",
    "numbaths",
    "numpets",
    "cleanfactor",
];

pub const USER_DETAIL_FIELDS: &[&str] = &["email", "firstname", "lastname", "phone"];

// ========== ESTIMATE ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Estimate {
    #[serde(rename = "estimateId")]
    pub estimate_id: String,
    pub servicedetails: Value,
}

// ========== USER ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userDetails")]
    pub user_details: Value,
}

// ========== LOCATION ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Location {
    #[serde(rename = "locationId")]
    pub location_id: String,
    pub locationdetails: Value,
    /// Owning user, lifted out of `locationdetails` at create time so the
    /// by-user secondary index can key on it.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

// ========== BOOKING ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Booking {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    #[serde(rename = "bookingDetails")]
    pub booking_details: Value,
}
