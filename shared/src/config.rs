use std::env;

/// Deployment configuration, read from the environment once at startup and
/// injected into every handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub estimates_table: String,
    pub users_table: String,
    pub locations_table: String,
    pub bookings_table: String,
    /// GSI on the locations table keyed by the owning userId.
    pub locations_user_index: String,
    pub allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            estimates_table: env::var("ESTIMATES_TABLE")
                .unwrap_or_else(|_| "rc-estimates".to_string()),
            users_table: env::var("USERS_TABLE").unwrap_or_else(|_| "rc-users".to_string()),
            locations_table: env::var("LOCATIONS_TABLE")
                .unwrap_or_else(|_| "rc-locations".to_string()),
            bookings_table: env::var("BOOKINGS_TABLE")
                .unwrap_or_else(|_| "rc-bookings".to_string()),
            locations_user_index: env::var("LOCATIONS_USER_INDEX")
                .unwrap_or_else(|_| "userId-index".to_string()),
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        }
    }
}
