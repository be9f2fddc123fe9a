//! Deterministic movement compilation for hex-grid tactical units.
//!
//! `movement-core` turns an ordered list of movement intents (step forward,
//! turn, jump, brace, ...) into a fully resolved [`MovePath`]: every step
//! carries its position, facing, elevation, point cost, movement-type
//! classification and risk flags. Illegality is reported as data on the step,
//! never as an error; [`PathError`] is reserved for misuse of the API.
//!
//! All rule lookups go through the read-only collaborators bundled in
//! [`MoveEnv`], so the same intents against the same snapshot always compile
//! to the same path.
pub mod common;
pub mod config;
pub mod env;
pub mod error;
pub mod handler;
pub mod hex;
pub mod path;
pub mod rules;
pub mod step;

pub use common::{BoardId, EntityId};
pub use config::RulesConfig;
pub use env::{
    BoardDimensions, BoardOracle, BoosterSet, Conditions, Fog, Light, MapBoard, MoveEnv,
    MovementMode, Occupant, OccupancyOracle, OracleError, StaticOccupancy, UnitClass,
    UnitSnapshot, UnitStatus, UnitTraits, Weather,
};
pub use error::{ErrorSeverity, MovementError};
pub use handler::{Verdict, dispatch, resolve};
pub use hex::{BuildingClass, Coords, Facing, Hex, Terrain, TerrainKind};
pub use path::{MovePath, PathContext, PathError, Pathfinder, SearchBudget};
pub use rules::{CostBreakdown, MoveBudget};
pub use step::{
    AeroState, IllegalReason, Intent, KindCounts, ManeuverKind, MoveType, Step, StepFlags,
    StepKind, StepPayload, StepState, StepTarget,
};
