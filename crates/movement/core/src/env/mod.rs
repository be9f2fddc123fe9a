//! Read-only collaborators consulted while compiling a path.
//!
//! The board, the unit snapshot, the match conditions and the rule toggles are
//! bundled into [`MoveEnv`] so handlers and rule functions can reach everything
//! they need without global state. Nothing in here is ever mutated by a path.
mod board;
mod conditions;
mod error;
mod occupancy;
mod unit;

pub use board::{BoardDimensions, BoardOracle, MapBoard};
pub use conditions::{Conditions, Fog, Light, Weather};
pub use error::OracleError;
pub use occupancy::{Occupant, OccupancyOracle, StaticOccupancy};
pub use unit::{
    BoosterSet, MovementMode, UnitClass, UnitSnapshot, UnitStatus, UnitTraits, run_from_walk,
};

use crate::config::RulesConfig;
use crate::hex::{Coords, Hex};

/// Aggregates the read-only snapshot a path is compiled against.
#[derive(Clone, Copy)]
pub struct MoveEnv<'a> {
    board: &'a dyn BoardOracle,
    unit: &'a UnitSnapshot,
    conditions: &'a Conditions,
    rules: &'a RulesConfig,
    occupancy: Option<&'a dyn OccupancyOracle>,
}

impl<'a> MoveEnv<'a> {
    pub fn new(
        board: &'a dyn BoardOracle,
        unit: &'a UnitSnapshot,
        conditions: &'a Conditions,
        rules: &'a RulesConfig,
    ) -> Self {
        Self {
            board,
            unit,
            conditions,
            rules,
            occupancy: None,
        }
    }

    #[must_use]
    pub fn with_occupancy(mut self, occupancy: &'a dyn OccupancyOracle) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    pub fn board(&self) -> &'a dyn BoardOracle {
        self.board
    }

    pub fn unit(&self) -> &'a UnitSnapshot {
        self.unit
    }

    pub fn conditions(&self) -> &'a Conditions {
        self.conditions
    }

    pub fn rules(&self) -> &'a RulesConfig {
        self.rules
    }

    /// Occupants of `coords`; empty when no occupancy oracle was supplied.
    pub fn occupants(&self, coords: Coords) -> Vec<Occupant> {
        self.occupancy
            .map(|oracle| oracle.occupants(coords))
            .unwrap_or_default()
    }

    pub fn hex_at(&self, coords: Coords) -> Option<&'a Hex> {
        self.board.hex_at(coords)
    }
}

impl std::fmt::Debug for MoveEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveEnv")
            .field("board", &self.board.id())
            .field("unit", &self.unit.id)
            .field("conditions", self.conditions)
            .field("rules", self.rules)
            .field("occupancy", &self.occupancy.is_some())
            .finish()
    }
}
