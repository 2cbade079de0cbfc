//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the chat widget and the API server.

use healthtrack_core::{ConversationMessage, LocationFailure};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Opens the chat. This must be the first message sent on the connection.
    /// A location fix the client already holds may ride along.
    Init {
        latitude: Option<f64>,
        longitude: Option<f64>,
    },

    /// Free text typed by the user.
    UserText { text: String },

    /// A fresh geolocation fix.
    LocationUpdate { latitude: f64, longitude: f64 },

    /// The client's geolocation attempt ended without a coordinate.
    LocationFailed { reason: LocationFailure },
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Confirms the chat is open.
    SessionInitialized { session_id: Uuid },

    /// A message appended to the conversation, user echoes included.
    Message { message: ConversationMessage },

    /// Reports a problem with the last client message. The session stays open.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_use_snake_case_tags() {
        let init: ClientMessage = serde_json::from_str(r#"{"type":"init"}"#).unwrap();
        assert_eq!(init, ClientMessage::Init { latitude: None, longitude: None });

        let failed: ClientMessage =
            serde_json::from_str(r#"{"type":"location_failed","reason":"permission_denied"}"#)
                .unwrap();
        assert_eq!(
            failed,
            ClientMessage::LocationFailed { reason: LocationFailure::PermissionDenied }
        );

        let text: ClientMessage =
            serde_json::from_str(r#"{"type":"user_text","text":"hello"}"#).unwrap();
        assert_eq!(text, ClientMessage::UserText { text: "hello".to_string() });
    }

    #[test]
    fn server_errors_serialize_with_tag() {
        let json = serde_json::to_value(ServerMessage::Error {
            message: "bad".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "bad");
    }
}
