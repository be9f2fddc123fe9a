//! Terrain access, elevation and hazard rules.

use crate::config::RulesConfig;
use crate::env::{UnitSnapshot, UnitStatus};
use crate::hex::{Hex, TerrainKind};
use crate::step::IllegalReason;

/// Largest level change a unit can make in one step without leaping.
pub fn max_level_change(unit: &UnitSnapshot) -> i32 {
    if unit.is_mek() {
        2
    } else if unit.is_protomek() {
        4
    } else if unit.is_infantry_like() && unit.is_mountaineer() {
        2
    } else {
        1
    }
}

/// Whether a Mek may leap down a drop too large to climb.
pub fn can_leap(unit: &UnitSnapshot, rules: &RulesConfig) -> bool {
    rules.leaping && unit.is_mek() && !unit.status.contains(UnitStatus::LEG_DAMAGED)
}

/// Whether the hex is closed to the unit moving along the ground (or water).
pub fn is_prohibited(unit: &UnitSnapshot, hex: &Hex) -> bool {
    if hex.contains(TerrainKind::Impassable) {
        return true;
    }
    let liquid_magma = hex.terrain_level(TerrainKind::Magma).is_some_and(|l| l >= 2);
    if liquid_magma {
        return true;
    }

    let open_water = hex.depth() > 0 && !hex.has_ice();
    let woods = hex.terrain_level(TerrainKind::Woods).unwrap_or(0);

    if unit.is_naval() || unit.is_submarine() {
        return hex.depth() == 0;
    }
    if unit.is_tank() {
        if unit.is_hover() {
            return hex.has_foliage();
        }
        if unit.is_tracked() {
            return woods >= 2 || hex.contains(TerrainKind::Jungle) || (open_water && !unit.is_amphibious());
        }
        if unit.is_wheeled() {
            return hex.has_foliage()
                || hex.contains(TerrainKind::Rough)
                || hex.contains(TerrainKind::Rubble)
                || hex.contains(TerrainKind::Swamp)
                || (open_water && !unit.is_amphibious());
        }
        return false;
    }
    if unit.is_infantry_like() {
        return open_water && !unit.is_amphibious();
    }
    false
}

/// Whether a jumping unit or a VTOL may set down in the hex.
pub fn is_landing_prohibited(unit: &UnitSnapshot, hex: &Hex) -> bool {
    if unit.is_vtol() {
        return hex.has_foliage()
            || (hex.depth() > 0 && !hex.has_ice())
            || hex.contains(TerrainKind::Impassable)
            || hex.contains(TerrainKind::Magma);
    }
    is_prohibited(unit, hex)
}

/// Where the unit's elevation lands after entering `dest`.
#[derive(Clone, Copy, Debug)]
pub struct ElevationInput<'a> {
    pub unit: &'a UnitSnapshot,
    pub rules: &'a RulesConfig,
    pub src: &'a Hex,
    pub dest: &'a Hex,
    pub elevation: i32,
    pub climbing: bool,
    pub jumping: bool,
    /// Swimming keeps the current depth instead of sinking to the bottom.
    pub swimming: bool,
}

pub fn next_elevation(input: &ElevationInput<'_>) -> Result<i32, IllegalReason> {
    let unit = input.unit;
    let dest = input.dest;

    if unit.is_airborne_aero() {
        return Ok(input.elevation);
    }
    if input.swimming {
        if -input.elevation > dest.depth() {
            return Err(IllegalReason::DepthExceeded);
        }
        return Ok(input.elevation);
    }
    if unit.is_vtol() && !input.jumping {
        if input.elevation <= 0 {
            return Err(IllegalReason::Grounded);
        }
        let absolute = input.src.level + input.elevation;
        let next = absolute - dest.level;
        if next <= dest.obstruction_height() {
            return Err(IllegalReason::Crash);
        }
        if next > input.rules.max_vtol_elevation {
            return Err(IllegalReason::MaxElevation);
        }
        return Ok(next);
    }
    if unit.is_wige() && input.elevation > 0 {
        return Ok(input.elevation);
    }
    if unit.is_submarine() {
        if -input.elevation > dest.depth() {
            return Err(IllegalReason::DepthExceeded);
        }
        return Ok(input.elevation.min(0));
    }
    if unit.is_hover() || unit.is_naval() || unit.is_wige() {
        return Ok(0);
    }

    let climbing = input.climbing || input.jumping;
    if dest.contains(TerrainKind::Building) {
        return Ok(if climbing { dest.building_height() } else { 0 });
    }
    if let Some(deck) = dest.bridge_elevation() {
        return Ok(if climbing { deck } else { 0 });
    }
    if dest.depth() > 0 && !dest.has_ice() && walks_underwater(unit) {
        return Ok(-dest.depth());
    }
    Ok(0)
}

fn walks_underwater(unit: &UnitSnapshot) -> bool {
    unit.is_mek() || unit.is_protomek() || unit.is_battle_armor()
}

/// Heat and risk picked up by entering a hex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hazards {
    pub heat: u32,
    pub danger: bool,
}

pub fn hazards(unit: &UnitSnapshot, hex: &Hex, elevation: i32) -> Hazards {
    let mut found = Hazards::default();
    let on_surface = elevation <= 0;

    if hex.contains(TerrainKind::Fire) && on_surface {
        if unit.is_mek() {
            found.heat += 2;
        } else if unit.is_infantry_like() {
            found.danger = true;
        }
    }
    match hex.terrain_level(TerrainKind::Magma) {
        Some(1) => found.danger = true,
        Some(level) if level >= 2 => {
            found.danger = true;
            if unit.is_mek() {
                found.heat += 4;
            }
        }
        _ => {}
    }
    if let Some(cf) = hex.building_cf()
        && cf < unit.tonnage
        && !unit.is_infantry_like()
    {
        found.danger = true;
    }
    if unit.is_mek() && hex.contains(TerrainKind::Rubble) {
        found.danger = true;
    }
    if (unit.is_mek() || unit.is_tank()) && hex.contains(TerrainKind::Swamp) && !unit.is_hover() {
        found.danger = true;
    }
    if unit.is_mek() && hex.depth() > 0 && !hex.has_ice() {
        found.danger = true;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EntityId;
    use crate::env::{MovementMode, UnitClass};

    fn unit(class: UnitClass, mode: MovementMode) -> UnitSnapshot {
        UnitSnapshot::new(EntityId(1), class, mode)
    }

    #[test]
    fn wheeled_vehicles_avoid_broken_ground() {
        let wheels = unit(UnitClass::Tank, MovementMode::Wheeled);
        assert!(is_prohibited(&wheels, &Hex::new(0).with(TerrainKind::Rough, 1)));
        assert!(!is_prohibited(&wheels, &Hex::new(0).with(TerrainKind::Road, 1)));

        let tracks = unit(UnitClass::Tank, MovementMode::Tracked);
        assert!(!is_prohibited(&tracks, &Hex::new(0).with(TerrainKind::Woods, 1)));
        assert!(is_prohibited(&tracks, &Hex::new(0).with(TerrainKind::Woods, 2)));
    }

    #[test]
    fn frozen_water_is_open_to_vehicles() {
        let tracks = unit(UnitClass::Tank, MovementMode::Tracked);
        let water = Hex::new(0).with(TerrainKind::Water, 2);
        assert!(is_prohibited(&tracks, &water));
        assert!(!is_prohibited(&tracks, &water.with(TerrainKind::Ice, 1)));
    }

    #[test]
    fn naval_units_need_water() {
        let boat = unit(UnitClass::Tank, MovementMode::Naval);
        assert!(is_prohibited(&boat, &Hex::new(0)));
        assert!(!is_prohibited(&boat, &Hex::new(0).with(TerrainKind::Water, 1)));
    }

    #[test]
    fn meks_walk_the_riverbed() {
        let mek = unit(UnitClass::Mek, MovementMode::Biped);
        let rules = RulesConfig::new();
        let src = Hex::new(0);
        let dest = Hex::new(0).with(TerrainKind::Water, 2);
        let input = ElevationInput {
            unit: &mek,
            rules: &rules,
            src: &src,
            dest: &dest,
            elevation: 0,
            climbing: false,
            jumping: false,
            swimming: false,
        };
        assert_eq!(next_elevation(&input), Ok(-2));
    }

    #[test]
    fn swimmers_hold_their_depth() {
        let mek = unit(UnitClass::Mek, MovementMode::Biped);
        let rules = RulesConfig::new();
        let src = Hex::new(0).with(TerrainKind::Water, 3);
        let deep = Hex::new(0).with(TerrainKind::Water, 3);
        let mut input = ElevationInput {
            unit: &mek,
            rules: &rules,
            src: &src,
            dest: &deep,
            elevation: -1,
            climbing: false,
            jumping: false,
            swimming: true,
        };
        assert_eq!(next_elevation(&input), Ok(-1));

        let shallow = Hex::new(0).with(TerrainKind::Water, 1);
        input.dest = &shallow;
        input.elevation = -2;
        assert_eq!(next_elevation(&input), Err(IllegalReason::DepthExceeded));
    }

    #[test]
    fn vtol_crashes_into_tall_obstructions() {
        let vtol = unit(UnitClass::Tank, MovementMode::Vtol);
        let rules = RulesConfig::new();
        let src = Hex::new(0);
        let tower = Hex::new(0)
            .with(TerrainKind::Building, 2)
            .with(TerrainKind::BuildingHeight, 3);
        let mut input = ElevationInput {
            unit: &vtol,
            rules: &rules,
            src: &src,
            dest: &tower,
            elevation: 3,
            climbing: false,
            jumping: false,
            swimming: false,
        };
        assert_eq!(next_elevation(&input), Err(IllegalReason::Crash));

        input.elevation = 4;
        assert_eq!(next_elevation(&input), Ok(4));

        input.elevation = 0;
        assert_eq!(next_elevation(&input), Err(IllegalReason::Grounded));
    }

    #[test]
    fn fire_heats_meks_and_endangers_infantry() {
        let burning = Hex::new(0).with(TerrainKind::Fire, 1);
        let mek = unit(UnitClass::Mek, MovementMode::Biped);
        assert_eq!(hazards(&mek, &burning, 0), Hazards { heat: 2, danger: false });

        let rifles = unit(UnitClass::Infantry, MovementMode::Leg);
        assert!(hazards(&rifles, &burning, 0).danger);
    }

    #[test]
    fn liquid_magma_adds_heat() {
        let magma = Hex::new(0).with(TerrainKind::Magma, 2);
        let mek = unit(UnitClass::Mek, MovementMode::Biped);
        assert_eq!(hazards(&mek, &magma, 0), Hazards { heat: 4, danger: true });
    }
}
