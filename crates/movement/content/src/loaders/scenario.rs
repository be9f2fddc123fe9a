//! Scenario loader.
//!
//! A scenario names a board file and a unit file (relative to the scenario
//! itself), optionally a rules file, and carries the match conditions, the
//! other units on the board and the intents to compile.

use std::path::{Path, PathBuf};

use anyhow::Context;
use movement_core::{
    Conditions, Coords, EntityId, Intent, MapBoard, MoveEnv, Occupant, RulesConfig,
    StaticOccupancy, UnitSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{BoardLoader, LoadResult, RulesLoader, UnitLoader, read_file};

/// Scenario structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    board: PathBuf,
    unit: PathBuf,
    #[serde(default)]
    rules: Option<PathBuf>,
    #[serde(default)]
    conditions: Conditions,
    #[serde(default)]
    occupants: Vec<OccupantRon>,
    #[serde(default)]
    intents: Vec<Intent>,
    #[serde(default)]
    careful: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OccupantRon {
    x: i32,
    y: i32,
    entity: u32,
    #[serde(default)]
    elevation: i32,
    #[serde(default)]
    hostile: bool,
    #[serde(default)]
    infantry: bool,
}

/// Everything needed to compile one unit's movement.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub board: MapBoard,
    pub unit: UnitSnapshot,
    pub conditions: Conditions,
    pub rules: RulesConfig,
    pub occupancy: StaticOccupancy,
    pub intents: Vec<Intent>,
    /// Overrides the rules' careful-movement default when present.
    pub careful: Option<bool>,
}

impl Scenario {
    /// Borrows the scenario as a compile environment.
    pub fn env(&self) -> MoveEnv<'_> {
        MoveEnv::new(&self.board, &self.unit, &self.conditions, &self.rules)
            .with_occupancy(&self.occupancy)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario and every file it references.
    ///
    /// `rules_override` replaces the rules file named by the scenario.
    pub fn load(path: &Path, rules_override: Option<&Path>) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let data: ScenarioRon = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let board = BoardLoader::load(&base.join(&data.board))
            .with_context(|| format!("loading board for scenario {}", path.display()))?;
        let unit = UnitLoader::load(&base.join(&data.unit))
            .with_context(|| format!("loading unit for scenario {}", path.display()))?;

        let rules_path = match rules_override {
            Some(path) => Some(path.to_path_buf()),
            None => data.rules.as_ref().map(|rules| base.join(rules)),
        };
        let rules = match rules_path {
            Some(rules_path) => RulesLoader::load(&rules_path)
                .with_context(|| format!("loading rules for scenario {}", path.display()))?,
            None => RulesConfig::default(),
        };

        let mut occupancy = StaticOccupancy::new();
        for entry in &data.occupants {
            let mut occupant = Occupant {
                entity: EntityId(entry.entity),
                elevation: entry.elevation,
                hostile: entry.hostile,
                infantry: false,
            };
            if entry.infantry {
                occupant = occupant.as_infantry();
            }
            occupancy.insert(Coords::new(entry.x, entry.y), occupant);
        }

        tracing::debug!(
            scenario = %path.display(),
            unit = %unit.id,
            intents = data.intents.len(),
            occupants = occupancy.len(),
            "loaded scenario"
        );

        Ok(Scenario {
            board,
            unit,
            conditions: data.conditions,
            rules,
            occupancy,
            intents: data.intents,
            careful: data.careful,
        })
    }
}
