//! PostgreSQL adapters.

mod message_repository;

pub use message_repository::PostgresMessageRepository;
