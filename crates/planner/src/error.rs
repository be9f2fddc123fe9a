use std::time::Duration;

use movement_core::{Coords, ErrorSeverity, MovementError};

/// Why a search ended without reaching its destination.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{0} cannot be reached")]
    Unreachable(Coords),

    #[error("gave up after expanding {expanded} candidates")]
    NodeBudgetExhausted { expanded: usize },

    #[error("gave up after {elapsed:?} and {expanded} candidates")]
    TimedOut { elapsed: Duration, expanded: usize },
}

impl MovementError for SearchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "SEARCH_UNREACHABLE",
            Self::NodeBudgetExhausted { .. } => "SEARCH_NODE_BUDGET_EXHAUSTED",
            Self::TimedOut { .. } => "SEARCH_TIMED_OUT",
        }
    }
}
