//! Best-first route search over compiled paths.
//!
//! Candidates are whole [`MovePath`]s, extended one intent at a time through
//! the step compiler and ordered by points spent plus hex distance left. Only
//! the cheapest candidate per (hex, facing) is kept.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use movement_core::{
    Coords, Facing, Intent, MoveEnv, MovePath, MovementError, Pathfinder, SearchBudget, StepKind,
};
use tracing::{debug, warn};

use crate::error::SearchError;

/// Entry in the open set.
#[derive(Debug)]
struct Candidate {
    priority: u32,
    mp: u32,
    /// Insertion order; ties go to the earlier candidate.
    seq: usize,
    path: MovePath,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.mp.cmp(&self.mp))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest-first search that moves with the preferred step and turns in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestFirstPathfinder;

impl BestFirstPathfinder {
    pub const fn new() -> Self {
        Self
    }

    /// Searches for the intents that take `start` to `destination`.
    ///
    /// `preferred` selects the moving step: [`StepKind::Backward`] reverses,
    /// [`StepKind::StartJump`] jumps first and then moves forward, anything
    /// else walks forward.
    pub fn find(
        &self,
        start: &MovePath,
        destination: Coords,
        preferred: StepKind,
        budget: SearchBudget,
        env: &MoveEnv<'_>,
    ) -> Result<Vec<Intent>, SearchError> {
        let started = Instant::now();
        let moving = match preferred {
            StepKind::Backward => StepKind::Backward,
            _ => StepKind::Forward,
        };

        let mut root = start.clone();
        if preferred == StepKind::StartJump && !root.is_jumping() {
            let legal = root
                .push(StepKind::StartJump, env)
                .is_ok_and(|step| step.is_legal());
            if !legal {
                return Err(SearchError::Unreachable(destination));
            }
        }

        let mut best: HashMap<(Coords, Facing), u32> = HashMap::new();
        best.insert((root.final_coords(), root.final_facing()), root.total_mp());

        let mut open = BinaryHeap::new();
        let mut seq = 0;
        open.push(Candidate {
            priority: root.total_mp() + root.final_coords().distance(destination),
            mp: root.total_mp(),
            seq,
            path: root,
        });

        let mut expanded = 0;
        while let Some(Candidate { path, .. }) = open.pop() {
            if path.final_coords() == destination && (path.len() == start.len() || path.is_valid())
            {
                debug!(%destination, expanded, mp = path.total_mp(), "route found");
                return Ok(path.steps()[start.len()..]
                    .iter()
                    .map(|step| step.intent.clone())
                    .collect());
            }

            if expanded >= budget.max_nodes {
                warn!(%destination, expanded, "search node budget exhausted");
                return Err(SearchError::NodeBudgetExhausted { expanded });
            }
            if let Some(limit) = budget.time_limit
                && started.elapsed() > limit
            {
                let elapsed = started.elapsed();
                warn!(%destination, expanded, ?elapsed, "search timed out");
                return Err(SearchError::TimedOut { elapsed, expanded });
            }
            expanded += 1;

            for kind in [moving, StepKind::TurnLeft, StepKind::TurnRight] {
                let mut next = path.clone();
                let legal = next.push(kind, env).is_ok_and(|step| step.is_legal());
                if !legal {
                    continue;
                }

                let key = (next.final_coords(), next.final_facing());
                let mp = next.total_mp();
                if best.get(&key).is_some_and(|&seen| seen <= mp) {
                    continue;
                }
                best.insert(key, mp);

                seq += 1;
                open.push(Candidate {
                    priority: mp + next.final_coords().distance(destination),
                    mp,
                    seq,
                    path: next,
                });
            }
        }

        debug!(%destination, expanded, "destination unreachable");
        Err(SearchError::Unreachable(destination))
    }
}

impl Pathfinder for BestFirstPathfinder {
    fn search(
        &self,
        start: &MovePath,
        destination: Coords,
        preferred: StepKind,
        budget: SearchBudget,
        env: &MoveEnv<'_>,
    ) -> Option<Vec<Intent>> {
        match self.find(start, destination, preferred, budget, env) {
            Ok(intents) => Some(intents),
            Err(err) => {
                debug!(code = err.error_code(), %err, "no route");
                None
            }
        }
    }
}
