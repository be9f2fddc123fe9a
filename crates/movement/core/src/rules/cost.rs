//! Point cost of entering a hex.
//!
//! Modifiers are applied in a fixed order: visibility, destination terrain,
//! water depth, level change, structure entry, terrain discounts. Several rules
//! depend on the running total (the discount floor), so the order is part of
//! the contract.

use crate::config::RulesConfig;
use crate::env::{Conditions, UnitSnapshot, UnitTraits};
use crate::hex::{Hex, TerrainKind};

/// Flat cost of a leap down a drop too large to climb.
pub const LEAP_COST: u32 = 4;

/// Largest drop a Mek can take without leaping.
const LEAP_THRESHOLD: i32 = 2;

/// Everything the cost model reads for one hex entry.
#[derive(Clone, Copy, Debug)]
pub struct CostInput<'a> {
    pub unit: &'a UnitSnapshot,
    pub conditions: &'a Conditions,
    pub rules: &'a RulesConfig,
    pub src: &'a Hex,
    pub dest: &'a Hex,
    pub src_elevation: i32,
    pub dest_elevation: i32,
    /// The step follows a road or pavement from `src` into `dest`.
    pub paved: bool,
    pub careful: bool,
    pub searchlight: bool,
    /// VTOL or WiGE above the surface.
    pub flying: bool,
}

/// Cost of a hex entry, itemised by modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    pub base: u32,
    pub visibility: u32,
    pub terrain: u32,
    pub water: u32,
    pub elevation: u32,
    pub structure: u32,
    pub discount: u32,
    /// The entry is a leap down a large drop.
    pub leap: bool,
    /// The entry crosses ice without care and may skid.
    pub skid: bool,
}

impl CostBreakdown {
    pub fn total(&self) -> u32 {
        let gross = self.base
            + self.visibility
            + self.terrain
            + self.water
            + self.elevation
            + self.structure;
        if self.discount > 0 {
            gross.saturating_sub(self.discount).max(1)
        } else {
            gross
        }
    }
}

pub fn movement_cost(input: &CostInput<'_>) -> CostBreakdown {
    let mut cost = CostBreakdown {
        base: 1,
        ..CostBreakdown::default()
    };
    if input.flying {
        return cost;
    }

    cost.visibility = visibility(input);

    let (terrain, skid) = terrain(input);
    cost.terrain = terrain;
    cost.skid = skid;

    cost.water = water(input);

    let (elevation, leap) = elevation(input);
    cost.elevation = elevation;
    cost.leap = leap;

    cost.structure = structure(input);
    cost.discount = discount(input);
    cost
}

fn visibility(input: &CostInput<'_>) -> u32 {
    let traits = input.unit.traits;
    let conditions = input.conditions;
    let mut penalty = conditions.weather.movement_penalty();
    if !traits.contains(UnitTraits::FOG_SPECIALIST) {
        penalty += conditions.fog.movement_penalty();
    }
    if !traits.contains(UnitTraits::NIGHT_SPECIALIST) && !input.searchlight {
        penalty += conditions.light.movement_penalty();
    }
    penalty
}

fn terrain(input: &CostInput<'_>) -> (u32, bool) {
    let unit = input.unit;
    let dest = input.dest;
    let icy_pavement = input.conditions.black_ice && dest.is_paved();

    if input.paved && !icy_pavement {
        return (0, false);
    }
    if dest.has_ice() || icy_pavement {
        return if input.careful { (1, false) } else { (0, true) };
    }
    if input.paved {
        return (0, false);
    }

    let mut cost = 0;
    for terrain in dest.terrains() {
        let level = u32::from(terrain.level);
        cost += match terrain.kind {
            TerrainKind::Woods => level.clamp(1, 3),
            TerrainKind::Jungle => level.clamp(1, 3) + 1,
            TerrainKind::Rough | TerrainKind::Rubble => level.clamp(1, 2),
            TerrainKind::Mud | TerrainKind::Swamp if !unit.is_hover() => 1,
            TerrainKind::Snow if level >= 2 || unit.is_wheeled() => 1,
            TerrainKind::Sand | TerrainKind::Tundra if unit.is_wheeled() => 1,
            TerrainKind::Magma => level.clamp(1, 2),
            TerrainKind::Rapids if !unit.is_hover() => 1,
            _ => 0,
        };
    }
    (cost, false)
}

fn water(input: &CostInput<'_>) -> u32 {
    let unit = input.unit;
    let dest = input.dest;
    let exempt = unit.is_amphibious()
        || unit.is_hover()
        || unit.is_naval()
        || unit.is_submarine()
        || dest.has_ice();
    if exempt {
        return 0;
    }
    match dest.depth() {
        0 => 0,
        1 => 1,
        _ => 3,
    }
}

fn elevation(input: &CostInput<'_>) -> (u32, bool) {
    let unit = input.unit;
    if unit.is_naval() || unit.is_submarine() {
        return (0, false);
    }
    let src = input.src.level + input.src_elevation.max(0);
    let dest = input.dest.level + input.dest_elevation.max(0);
    let delta = dest - src;
    if delta == 0 {
        return (0, false);
    }

    if delta < -LEAP_THRESHOLD && unit.is_mek() && input.rules.leaping {
        return (LEAP_COST, true);
    }

    let mut surcharge = delta.unsigned_abs();
    // flying infantry never reaches this point
    if unit.is_ground_vehicle() || unit.is_infantry() {
        surcharge *= 2;
    }
    if unit.is_mountaineer() {
        surcharge = surcharge.saturating_sub(1);
    }
    (surcharge, false)
}

fn structure(input: &CostInput<'_>) -> u32 {
    let unit = input.unit;
    let dest = input.dest;
    let Some(class) = dest.building_class() else {
        return 0;
    };
    if input.dest_elevation >= dest.building_height() {
        return 0;
    }
    let surcharge = class.entry_surcharge();
    if unit.is_mechanized_infantry() || unit.is_battle_armor() {
        1
    } else if unit.is_infantry() {
        0
    } else if unit.is_protomek() {
        surcharge.div_ceil(2)
    } else {
        surcharge
    }
}

fn discount(input: &CostInput<'_>) -> u32 {
    if input.unit.is_infantry() && input.dest.has_foliage() {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EntityId;
    use crate::env::{Fog, Light, MovementMode, UnitClass};

    struct Fixture {
        unit: UnitSnapshot,
        conditions: Conditions,
        rules: RulesConfig,
        src: Hex,
        dest: Hex,
    }

    impl Fixture {
        fn new(class: UnitClass, mode: MovementMode) -> Self {
            Self {
                unit: UnitSnapshot::new(EntityId(1), class, mode).with_walk(5),
                conditions: Conditions::new(),
                rules: RulesConfig::new(),
                src: Hex::new(0),
                dest: Hex::new(0),
            }
        }

        fn cost(&self) -> CostBreakdown {
            movement_cost(&CostInput {
                unit: &self.unit,
                conditions: &self.conditions,
                rules: &self.rules,
                src: &self.src,
                dest: &self.dest,
                src_elevation: 0,
                dest_elevation: 0,
                paved: false,
                careful: true,
                searchlight: false,
                flying: false,
            })
        }
    }

    #[test]
    fn vehicle_into_deep_water_below_pays_water_then_doubled_drop() {
        let mut fx = Fixture::new(UnitClass::Tank, MovementMode::Tracked);
        fx.src = Hex::new(2);
        fx.dest = Hex::new(0).with(TerrainKind::Water, 2);

        let cost = fx.cost();
        assert_eq!(cost.water, 3);
        assert_eq!(cost.elevation, 4);
        assert_eq!(cost.total(), 8);
    }

    #[test]
    fn ground_infantry_pays_double_to_climb() {
        for mode in [MovementMode::Leg, MovementMode::Motorized, MovementMode::Mechanized] {
            let mut fx = Fixture::new(UnitClass::Infantry, mode);
            fx.dest = Hex::new(1);
            let cost = fx.cost();
            assert_eq!(cost.elevation, 2, "{mode} climbing one level");
            assert_eq!(cost.total(), 3, "{mode} climbing one level");
        }

        let mek = Fixture {
            dest: Hex::new(1),
            ..Fixture::new(UnitClass::Mek, MovementMode::Biped)
        };
        assert_eq!(mek.cost().total(), 2);
    }

    #[test]
    fn infantry_woods_discount_floors_at_one() {
        let mut fx = Fixture::new(UnitClass::Infantry, MovementMode::Leg);
        fx.dest = Hex::new(0).with(TerrainKind::Woods, 1);
        assert_eq!(fx.cost().total(), 1);

        fx.dest = Hex::new(0).with(TerrainKind::Woods, 2);
        assert_eq!(fx.cost().total(), 2);
    }

    #[test]
    fn specialists_ignore_their_conditions() {
        let mut fx = Fixture::new(UnitClass::Mek, MovementMode::Biped);
        fx.conditions.fog = Fog::Heavy;
        fx.conditions.light = Light::PitchBlack;
        assert_eq!(fx.cost().visibility, 3);

        fx.unit.traits = UnitTraits::FOG_SPECIALIST | UnitTraits::NIGHT_SPECIALIST;
        assert_eq!(fx.cost().visibility, 0);
    }

    #[test]
    fn leaping_replaces_level_surcharge() {
        let mut fx = Fixture::new(UnitClass::Mek, MovementMode::Biped);
        fx.src = Hex::new(4);
        assert_eq!(fx.cost().elevation, 4);
        assert!(!fx.cost().leap);

        fx.rules.leaping = true;
        let cost = fx.cost();
        assert!(cost.leap);
        assert_eq!(cost.elevation, LEAP_COST);
    }

    #[test]
    fn careless_ice_is_cheaper_but_skids() {
        let mut fx = Fixture::new(UnitClass::Mek, MovementMode::Biped);
        fx.dest = Hex::new(0).with(TerrainKind::Ice, 1);
        assert_eq!(fx.cost().terrain, 1);

        let careless = movement_cost(&CostInput {
            careful: false,
            ..CostInput {
                unit: &fx.unit,
                conditions: &fx.conditions,
                rules: &fx.rules,
                src: &fx.src,
                dest: &fx.dest,
                src_elevation: 0,
                dest_elevation: 0,
                paved: false,
                careful: true,
                searchlight: false,
                flying: false,
            }
        });
        assert_eq!(careless.terrain, 0);
        assert!(careless.skid);
    }

    #[test]
    fn structure_entry_depends_on_unit_class() {
        let heavy = Hex::new(0)
            .with(TerrainKind::Building, 3)
            .with(TerrainKind::BuildingHeight, 2);

        let mut mek = Fixture::new(UnitClass::Mek, MovementMode::Biped);
        mek.dest = heavy.clone();
        assert_eq!(mek.cost().structure, 3);

        let mut proto = Fixture::new(UnitClass::ProtoMek, MovementMode::Biped);
        proto.dest = heavy.clone();
        assert_eq!(proto.cost().structure, 2);

        let mut rifles = Fixture::new(UnitClass::Infantry, MovementMode::Leg);
        rifles.dest = heavy.clone();
        assert_eq!(rifles.cost().structure, 0);

        let mut mech = Fixture::new(UnitClass::Infantry, MovementMode::Mechanized);
        mech.dest = heavy;
        assert_eq!(mech.cost().structure, 1);
    }

    #[test]
    fn paved_step_skips_terrain() {
        let mut fx = Fixture::new(UnitClass::Tank, MovementMode::Wheeled);
        fx.dest = Hex::new(0)
            .with(TerrainKind::Road, 1)
            .with(TerrainKind::Rough, 1);
        let cost = movement_cost(&CostInput {
            unit: &fx.unit,
            conditions: &fx.conditions,
            rules: &fx.rules,
            src: &fx.src,
            dest: &fx.dest,
            src_elevation: 0,
            dest_elevation: 0,
            paved: true,
            careful: true,
            searchlight: false,
            flying: false,
        });
        assert_eq!(cost.total(), 1);
    }
}
