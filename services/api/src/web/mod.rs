pub mod chat;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use chat::chat_handler;
pub use rest::{
    classify_handler, emergency_contacts_handler, get_facility_handler, list_facilities_handler,
    nearest_facilities_handler,
};
use state::AppState;

/// Builds the API routes over the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/facilities", get(list_facilities_handler))
        .route("/facilities/nearest", get(nearest_facilities_handler))
        .route("/facilities/{id}", get(get_facility_handler))
        .route("/classify", post(classify_handler))
        .route("/emergency-contacts", get(emergency_contacts_handler))
        .route("/chat", get(chat_handler))
        .with_state(app_state)
}
