//! Text-processing domain: the two-step plan/execute pipeline and the
//! session state it maintains.

mod errors;
mod plan;
mod service;
mod state;

pub use errors::ProcessingError;
pub use plan::{PlanStatus, ProcessingPlan};
pub use service::{
    ProcessingOutcome, ProcessingService, Turn, CALCULATOR_SYSTEM_PROMPT,
};
pub use state::{SessionState, MAX_HISTORY_LEN};
