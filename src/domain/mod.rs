//! Domain layer: entities, value objects, and services with no transport
//! or storage concerns.

pub mod board;
pub mod foundation;
pub mod processing;
