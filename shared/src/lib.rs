pub mod bookings;
pub mod config;
pub mod error;
pub mod estimates;
pub mod locations;
pub mod ownership;
pub mod response;
pub mod store;
pub mod types;
pub mod users;
pub mod validate;

use crate::config::Config;
use crate::store::RecordStore;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}
