//! HTTP adapters - routes, handlers, DTOs, and middleware.

pub mod auth;
pub mod board;
pub mod middleware;
pub mod processor;

pub use auth::{auth_routes, AuthHandlers};
pub use board::{board_routes, BoardHandlers};
pub use processor::{processor_routes, ProcessorHandlers};
