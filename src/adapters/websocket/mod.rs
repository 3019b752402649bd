//! WebSocket adapter for real-time text processing.

pub mod handler;
pub mod messages;
pub mod rooms;

pub use handler::{ws_handler, WebSocketState};
pub use messages::{ClientMessage, ServerMessage};
pub use rooms::{ClientId, RoomManager};
