//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::UserClient;
use crate::error_mapping::ErrorMapping;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_client: Arc<UserClient>,
    pub error_mapping: ErrorMapping,
}

impl AppState {
    /// Create new app state.
    pub fn new(user_client: Arc<UserClient>, error_mapping: ErrorMapping) -> Self {
        Self {
            user_client,
            error_mapping,
        }
    }
}
