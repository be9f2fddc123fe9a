//! Data-driven boards, units, rules and scenarios.
//!
//! This crate reads the read-only snapshots a path is compiled against from
//! data files:
//! - Boards (RON): dimensions plus the hexes that differ from flat ground
//! - Units (RON): capability snapshots
//! - Rules (TOML): optional rule toggles
//! - Scenarios (RON): a board, a unit, conditions, occupants and intents
//!
//! All loaders deserialize into movement-core types through its `serde` feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BoardLoader, RulesLoader, Scenario, ScenarioLoader, UnitLoader};
