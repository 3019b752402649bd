//! Text-processing command and query handlers.

mod clear_session;
mod get_session_state;
mod process_text;

pub use clear_session::{ClearSessionCommand, ClearSessionHandler, ClearSessionResult};
pub use get_session_state::{GetSessionStateHandler, GetSessionStateQuery};
pub use process_text::{ProcessTextCommand, ProcessTextHandler};
