//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. Transports (HTTP, WebSocket) call these, never the adapters
//! directly.

pub mod board;
pub mod processing;
