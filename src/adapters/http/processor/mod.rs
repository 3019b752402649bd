//! Text-processor HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ProcessorHandlers;
pub use routes::processor_routes;
