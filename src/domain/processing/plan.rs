//! Processing plan - output of the intent-analysis step.

use serde::{Deserialize, Serialize};

/// Status of a processing plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan created, not yet executed.
    Planned,
    /// Plan executed against the AI provider.
    Completed,
}

/// A processing plan for a text input.
///
/// Step one of the two-step pipeline: a cheap, local analysis of the input
/// that produces a short title before anything is sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingPlan {
    /// Short title derived from the input text.
    pub title: String,
    /// Where the plan is in its lifecycle.
    pub status: PlanStatus,
}

/// Maximum number of words carried into the plan title.
const TITLE_WORDS: usize = 5;

impl ProcessingPlan {
    /// Creates a plan for the given input text.
    ///
    /// The title is the first five whitespace-separated words of the input,
    /// joined with single spaces and suffixed with `"..."`.
    pub fn for_text(text: &str) -> Self {
        let title: String = text
            .split_whitespace()
            .take(TITLE_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
            + "...";

        Self {
            title,
            status: PlanStatus::Planned,
        }
    }

    /// Marks the plan as executed.
    pub fn completed(mut self) -> Self {
        self.status = PlanStatus::Completed;
        self
    }
}
