//! services/api/src/web/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use healthtrack_core::{
    Conversation, Coordinate, FacilityDataSource, GeoRanker, IntentClassifier, TriageAssistant,
};
use std::sync::Arc;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub facilities: Arc<dyn FacilityDataSource>,
    pub config: Arc<Config>,
    pub assistant: Arc<TriageAssistant>,
}

impl AppState {
    /// Builds the state, configuring the ranker from `config`.
    pub fn new(config: Arc<Config>, facilities: Arc<dyn FacilityDataSource>) -> Self {
        let ranker = GeoRanker::new(config.missing_coordinates);
        Self {
            facilities,
            config,
            assistant: Arc::new(TriageAssistant::new(IntentClassifier::default(), ranker)),
        }
    }
}

//=========================================================================================
// ChatSession (Specific to One WebSocket Connection)
//=========================================================================================

/// The state for a single chat connection. Dropped when the socket closes, so
/// nothing said in one session carries over to the next.
pub struct ChatSession {
    pub session_id: Uuid,
    pub conversation: Conversation,
    /// The most recent location fix reported by the client, if any.
    pub origin: Option<Coordinate>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            conversation: Conversation::new(),
            origin: None,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
