//! services/api/src/web/chat.rs
//!
//! The chat widget's WebSocket endpoint. Each connection owns one
//! `ChatSession`; the session and its conversation end with the socket.

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    state::{AppState, ChatSession},
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use healthtrack_core::{Coordinate, CoreError, FacilityRecord, LocationFailure};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // --- 1. Initialization Phase ---
    let mut session = ChatSession::new();
    match receiver.next().await {
        Some(Ok(Message::Text(init_json))) => {
            match serde_json::from_str::<ClientMessage>(&init_json) {
                Ok(init @ ClientMessage::Init { .. }) => {
                    info!("Chat session {} opened", session.session_id);
                    let replies = handle_client_message(&app_state, &mut session, init).await;
                    if send_all(&mut sender, replies).await.is_err() {
                        error!("Failed to send session initialization.");
                        return;
                    }
                }
                _ => {
                    error!("First message was not a valid Init message.");
                    let _ = send_all(
                        &mut sender,
                        vec![ServerMessage::Error {
                            message: "The first message must be init.".to_string(),
                        }],
                    )
                    .await;
                    return;
                }
            }
        }
        _ => {
            error!("Client disconnected before sending Init message.");
            return;
        }
    }

    // --- 2. Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let replies = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        handle_client_message(&app_state, &mut session, client_msg).await
                    }
                    Err(e) => {
                        warn!("Failed to deserialize client message: {}", e);
                        vec![ServerMessage::Error {
                            message: "Unrecognised message.".to_string(),
                        }]
                    }
                };
                if send_all(&mut sender, replies).await.is_err() {
                    error!("Failed to send chat reply; closing session.");
                    break;
                }
            }
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- 3. Cleanup ---
    info!(
        "Chat session {} closed after {} messages",
        session.session_id,
        session.conversation.len()
    );
}

/// Applies one client message to the session and returns what to send back.
pub async fn handle_client_message(
    app_state: &AppState,
    session: &mut ChatSession,
    msg: ClientMessage,
) -> Vec<ServerMessage> {
    match msg {
        ClientMessage::Init {
            latitude,
            longitude,
        } => {
            if !session.conversation.is_empty() {
                warn!("Received subsequent Init message, which is ignored.");
                return Vec::new();
            }
            let mut replies = vec![ServerMessage::SessionInitialized {
                session_id: session.session_id,
            }];
            let welcome = app_state.assistant.welcome(&mut session.conversation).clone();
            replies.push(ServerMessage::Message { message: welcome });

            match (latitude, longitude) {
                (Some(lat), Some(lng)) => {
                    let fix = Coordinate::new(lat, lng);
                    replies.extend(apply_location(app_state, session, fix).await);
                }
                (None, None) => {}
                _ => {
                    warn!("Init for session {} carried half a location", session.session_id);
                    replies.push(ServerMessage::Error {
                        message: "A location needs both latitude and longitude.".to_string(),
                    });
                }
            }
            replies
        }
        ClientMessage::UserText { text } => {
            let facilities = match load_facilities(app_state).await {
                Ok(f) => f,
                Err(reply) => return vec![reply],
            };
            let before = session.conversation.len();
            let outcome = app_state
                .assistant
                .respond(&mut session.conversation, &text, session.origin, &facilities)
                .map(|_| ());
            match outcome {
                Ok(()) => session.conversation.messages()[before..]
                    .iter()
                    .cloned()
                    .map(|message| ServerMessage::Message { message })
                    .collect(),
                Err(e) => vec![core_error(e)],
            }
        }
        ClientMessage::LocationUpdate {
            latitude,
            longitude,
        } => apply_location(app_state, session, Coordinate::new(latitude, longitude)).await,
        ClientMessage::LocationFailed { reason } => {
            info!("Session {} has no location: {:?}", session.session_id, reason);
            location_outcome(app_state, session, Err(reason)).await
        }
    }
}

async fn apply_location(
    app_state: &AppState,
    session: &mut ChatSession,
    coordinate: Result<Coordinate, CoreError>,
) -> Vec<ServerMessage> {
    match coordinate {
        Ok(origin) => {
            session.origin = Some(origin);
            location_outcome(app_state, session, Ok(origin)).await
        }
        Err(e) => vec![core_error(e)],
    }
}

async fn location_outcome(
    app_state: &AppState,
    session: &mut ChatSession,
    outcome: Result<Coordinate, LocationFailure>,
) -> Vec<ServerMessage> {
    let facilities = match load_facilities(app_state).await {
        Ok(f) => f,
        Err(reply) => return vec![reply],
    };
    match app_state
        .assistant
        .location_update(&mut session.conversation, outcome, &facilities)
    {
        Ok(message) => vec![ServerMessage::Message {
            message: message.clone(),
        }],
        Err(e) => vec![core_error(e)],
    }
}

async fn load_facilities(app_state: &AppState) -> Result<Vec<FacilityRecord>, ServerMessage> {
    app_state.facilities.list_facilities().await.map_err(|e| {
        error!("Failed to load facilities: {:?}", e);
        ServerMessage::Error {
            message: "Hospital data is unavailable. Please call 108 for emergency services."
                .to_string(),
        }
    })
}

fn core_error(e: CoreError) -> ServerMessage {
    warn!("Rejected chat input: {}", e);
    ServerMessage::Error {
        message: e.to_string(),
    }
}

async fn send_all(
    sender: &mut SplitSink<WebSocket, Message>,
    messages: Vec<ServerMessage>,
) -> Result<(), axum::Error> {
    for msg in messages {
        match serde_json::to_string(&msg) {
            Ok(json) => sender.send(Message::Text(json.into())).await?,
            Err(e) => error!("Failed to serialize server message: {}", e),
        }
    }
    Ok(())
}
