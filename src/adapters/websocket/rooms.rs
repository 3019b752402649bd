//! WebSocket room management for session-based message routing.
//!
//! Rooms are keyed by session ID so processing events for one session
//! reach every client watching that session and nobody else. A client
//! that opens two tabs on the same session gets the stream in both.

use std::collections::HashMap;
use std::fmt;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::SessionId;

use super::messages::ServerMessage;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Creates a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Manages WebSocket connection rooms organized by session.
///
/// Broadcasts (reads) vastly outnumber joins and leaves (writes), so the
/// registry sits behind an `RwLock` and each room is a tokio broadcast
/// channel. Empty rooms are cleaned up when their last client leaves.
pub struct RoomManager {
    /// session_id → broadcast sender for that room.
    rooms: RwLock<HashMap<SessionId, broadcast::Sender<ServerMessage>>>,

    /// client_id → session_id, for cleanup on disconnect.
    client_sessions: RwLock<HashMap<ClientId, SessionId>>,

    /// Buffer size for each room's broadcast channel. Slow clients that
    /// fall more than this many messages behind miss the oldest ones.
    channel_capacity: usize,
}

impl RoomManager {
    /// Creates a room manager with the given per-room channel capacity.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_sessions: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Creates a manager with the default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Joins a client to a session room, creating the room on first join.
    ///
    /// Returns a receiver for every message broadcast to that session.
    pub async fn join(
        &self,
        session_id: &SessionId,
        client_id: ClientId,
    ) -> broadcast::Receiver<ServerMessage> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(*session_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.client_sessions
            .write()
            .await
            .insert(client_id, *session_id);

        sender.subscribe()
    }

    /// Removes a client from its session room, dropping the room when no
    /// registered clients remain.
    ///
    /// Occupancy comes from the client registry rather than the channel's
    /// receiver count: the departing connection may still hold its receiver
    /// while it tears down.
    pub async fn leave(&self, client_id: &ClientId) {
        let mut client_sessions = self.client_sessions.write().await;

        if let Some(session_id) = client_sessions.remove(client_id) {
            let occupied = client_sessions.values().any(|s| *s == session_id);
            if !occupied {
                self.rooms.write().await.remove(&session_id);
            }
        }
    }

    /// Broadcasts a message to every client in a session room.
    ///
    /// A no-op when the room does not exist or has no subscribers.
    pub async fn broadcast(&self, session_id: &SessionId, message: ServerMessage) {
        let rooms = self.rooms.read().await;

        if let Some(sender) = rooms.get(session_id) {
            // send only errs when there are no receivers, which is fine
            let _ = sender.send(message);
        }
    }

    /// Number of clients currently registered in a session room.
    pub async fn client_count(&self, session_id: &SessionId) -> usize {
        self.client_sessions
            .read()
            .await
            .values()
            .filter(|s| *s == session_id)
            .count()
    }

    /// Total clients connected across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.client_sessions.read().await.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
