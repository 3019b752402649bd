//! Message board domain: user-posted messages with ownership rules.

mod errors;
mod message;

pub use errors::BoardError;
pub use message::{BoardMessage, NewMessage};
