//! Unit snapshot loader.

use std::path::Path;

use movement_core::{
    BoosterSet, Coords, EntityId, Facing, MovementMode, UnitClass, UnitSnapshot, UnitStatus,
    UnitTraits,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Unit structure for RON files. Only class, mode, position and walk are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitRon {
    id: u32,
    class: UnitClass,
    mode: MovementMode,
    position: (i32, i32),
    #[serde(default)]
    facing: u8,
    walk: u32,
    /// Derived from walk when absent.
    #[serde(default)]
    run: Option<u32>,
    #[serde(default)]
    jump: u32,
    #[serde(default)]
    elevation: i32,
    #[serde(default)]
    altitude: i32,
    #[serde(default)]
    velocity: u32,
    #[serde(default)]
    boosters: BoosterSet,
    #[serde(default)]
    status: UnitStatus,
    #[serde(default)]
    traits: UnitTraits,
    #[serde(default)]
    tonnage: u32,
    #[serde(default)]
    heat: u32,
    #[serde(default)]
    fuel: Option<u32>,
}

impl From<UnitRon> for UnitSnapshot {
    fn from(data: UnitRon) -> Self {
        let mut unit = UnitSnapshot::new(EntityId(data.id), data.class, data.mode)
            .with_walk(data.walk)
            .with_jump(data.jump)
            .at(
                Coords::new(data.position.0, data.position.1),
                Facing::new(data.facing),
            )
            .with_elevation(data.elevation)
            .with_altitude(data.altitude)
            .with_velocity(data.velocity)
            .with_boosters(data.boosters)
            .with_status(data.status)
            .with_traits(data.traits)
            .with_tonnage(data.tonnage);
        if let Some(run) = data.run {
            unit = unit.with_run(run);
        }
        if let Some(fuel) = data.fuel {
            unit = unit.with_fuel(fuel);
        }
        unit.heat = data.heat;
        unit
    }
}

/// Loader for unit snapshots from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load a unit snapshot from a RON file.
    pub fn load(path: &Path) -> LoadResult<UnitSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<UnitSnapshot> {
        let data: UnitRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit RON: {}", e))?;
        Ok(data.into())
    }
}
