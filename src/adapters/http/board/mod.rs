//! Message board HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BoardHandlers;
pub use routes::board_routes;
