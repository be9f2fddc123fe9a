use std::time::Duration;

use crate::env::MoveEnv;
use crate::hex::Coords;
use crate::step::{Intent, StepKind};

use super::MovePath;

/// Limits handed to a [`Pathfinder`] for one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum number of candidate paths expanded.
    pub max_nodes: usize,
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub const DEFAULT_MAX_NODES: usize = 20_000;

    pub const fn new(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            time_limit: None,
        }
    }

    #[must_use]
    pub const fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_NODES)
    }
}

/// External search strategy used by [`MovePath::find_path_to`].
///
/// Returns the intents to append after `start`, or `None` when it gave up.
/// The result is compiled like any caller-supplied intent list, so nothing a
/// pathfinder returns is trusted to be legal.
pub trait Pathfinder {
    fn search(
        &self,
        start: &MovePath,
        destination: Coords,
        preferred: StepKind,
        budget: SearchBudget,
        env: &MoveEnv<'_>,
    ) -> Option<Vec<Intent>>;
}
