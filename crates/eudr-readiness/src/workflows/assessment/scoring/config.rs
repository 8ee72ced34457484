use serde::{Deserialize, Serialize};

/// Presentation limits applied when assembling a result. Point weights are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub next_steps_limit: usize,
    pub recommended_actions_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            next_steps_limit: 5,
            recommended_actions_limit: 8,
        }
    }
}
