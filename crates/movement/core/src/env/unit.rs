use bitflags::bitflags;

use crate::common::EntityId;
use crate::hex::{Coords, Facing};

/// Broad unit class; decides which rule exceptions apply.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitClass {
    Mek,
    ProtoMek,
    Tank,
    Infantry,
    BattleArmor,
    Aerospace,
}

/// Propulsion the unit currently moves with.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementMode {
    Biped,
    Quad,
    Tripod,
    Tracked,
    Wheeled,
    Hover,
    Naval,
    Submarine,
    Vtol,
    Wige,
    Leg,
    Motorized,
    Mechanized,
    Jump,
    Aerodyne,
}

bitflags! {
    /// Run-extending boosters; each one carries a failure check when engaged.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BoosterSet: u8 {
        const MASC         = 1 << 0;
        const SUPERCHARGER = 1 << 1;
    }
}

bitflags! {
    /// Stance and damage state of the unit at the start of its movement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitStatus: u16 {
        const PRONE            = 1 << 0;
        const HULL_DOWN        = 1 << 1;
        const STUCK            = 1 << 2;
        const SHUTDOWN         = 1 << 3;
        const GYRO_DESTROYED   = 1 << 4;
        const LEG_DAMAGED      = 1 << 5;
        const THRUSTER_DAMAGED = 1 << 6;
    }
}

bitflags! {
    /// Equipment and crew abilities relevant to movement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitTraits: u16 {
        const AMPHIBIOUS       = 1 << 0;
        const MOUNTAINEER      = 1 << 1;
        const FOG_SPECIALIST   = 1 << 2;
        const NIGHT_SPECIALIST = 1 << 3;
        const FIELD_ARTILLERY  = 1 << 4;
        const MANEUVERING_ACE  = 1 << 5;
        const CONVERTIBLE      = 1 << 6;
        const TRANSPORT        = 1 << 7;
        const TOW_HITCH        = 1 << 8;
        const SEARCHLIGHT      = 1 << 9;
    }
}

/// Read-only capability snapshot of the unit a path is compiled for.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: EntityId,
    pub class: UnitClass,
    pub mode: MovementMode,
    pub position: Coords,
    pub facing: Facing,
    /// Height relative to the hex surface (negative underwater).
    pub elevation: i32,
    /// Altitude of airborne aerospace units.
    pub altitude: i32,
    pub walk_mp: u32,
    pub run_mp: u32,
    pub jump_mp: u32,
    pub boosters: BoosterSet,
    /// Boosters whose failure check was already rolled this turn.
    pub boosters_checked: BoosterSet,
    pub status: UnitStatus,
    pub traits: UnitTraits,
    pub tonnage: u32,
    pub heat: u32,
    /// Remaining thrust fuel, unlimited when absent.
    pub fuel: Option<u32>,
    /// Current velocity of aerospace units.
    pub velocity: u32,
}

impl UnitSnapshot {
    pub fn new(id: EntityId, class: UnitClass, mode: MovementMode) -> Self {
        Self {
            id,
            class,
            mode,
            position: Coords::ORIGIN,
            facing: Facing::NORTH,
            elevation: 0,
            altitude: 0,
            walk_mp: 0,
            run_mp: 0,
            jump_mp: 0,
            boosters: BoosterSet::empty(),
            boosters_checked: BoosterSet::empty(),
            status: UnitStatus::empty(),
            traits: UnitTraits::empty(),
            tonnage: 0,
            heat: 0,
            fuel: None,
            velocity: 0,
        }
    }

    /// Sets the walking budget and derives the running budget from it.
    #[must_use]
    pub fn with_walk(mut self, walk_mp: u32) -> Self {
        self.walk_mp = walk_mp;
        self.run_mp = run_from_walk(walk_mp);
        self
    }

    #[must_use]
    pub fn with_run(mut self, run_mp: u32) -> Self {
        self.run_mp = run_mp;
        self
    }

    #[must_use]
    pub fn with_jump(mut self, jump_mp: u32) -> Self {
        self.jump_mp = jump_mp;
        self
    }

    #[must_use]
    pub fn at(mut self, position: Coords, facing: Facing) -> Self {
        self.position = position;
        self.facing = facing;
        self
    }

    #[must_use]
    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    #[must_use]
    pub fn with_altitude(mut self, altitude: i32) -> Self {
        self.altitude = altitude;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: u32) -> Self {
        self.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_boosters(mut self, boosters: BoosterSet) -> Self {
        self.boosters = boosters;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_traits(mut self, traits: UnitTraits) -> Self {
        self.traits = traits;
        self
    }

    #[must_use]
    pub fn with_tonnage(mut self, tonnage: u32) -> Self {
        self.tonnage = tonnage;
        self
    }

    #[must_use]
    pub fn with_fuel(mut self, fuel: u32) -> Self {
        self.fuel = Some(fuel);
        self
    }

    pub fn is_mek(&self) -> bool {
        self.class == UnitClass::Mek
    }

    pub fn is_protomek(&self) -> bool {
        self.class == UnitClass::ProtoMek
    }

    pub fn is_tank(&self) -> bool {
        self.class == UnitClass::Tank
    }

    /// Conventional infantry (not battle armor).
    pub fn is_infantry(&self) -> bool {
        self.class == UnitClass::Infantry
    }

    pub fn is_battle_armor(&self) -> bool {
        self.class == UnitClass::BattleArmor
    }

    /// Conventional infantry or battle armor.
    pub fn is_infantry_like(&self) -> bool {
        self.is_infantry() || self.is_battle_armor()
    }

    pub fn is_mechanized_infantry(&self) -> bool {
        self.is_infantry() && self.mode == MovementMode::Mechanized
    }

    pub fn is_aero(&self) -> bool {
        self.class == UnitClass::Aerospace
    }

    pub fn is_airborne_aero(&self) -> bool {
        self.is_aero() && self.altitude > 0
    }

    pub fn is_vtol(&self) -> bool {
        self.mode == MovementMode::Vtol
    }

    pub fn is_wige(&self) -> bool {
        self.mode == MovementMode::Wige
    }

    pub fn is_hover(&self) -> bool {
        self.mode == MovementMode::Hover
    }

    pub fn is_naval(&self) -> bool {
        self.mode == MovementMode::Naval
    }

    pub fn is_submarine(&self) -> bool {
        self.mode == MovementMode::Submarine
    }

    pub fn is_tracked(&self) -> bool {
        self.mode == MovementMode::Tracked
    }

    pub fn is_wheeled(&self) -> bool {
        self.mode == MovementMode::Wheeled
    }

    pub fn is_quad(&self) -> bool {
        self.mode == MovementMode::Quad
    }

    /// Vehicles that roll over the ground (not flying, not floating).
    pub fn is_ground_vehicle(&self) -> bool {
        self.is_tank()
            && matches!(
                self.mode,
                MovementMode::Tracked
                    | MovementMode::Wheeled
                    | MovementMode::Hover
                    | MovementMode::Wige
            )
    }

    /// Units that earn the paved-surface budget bonus.
    pub fn benefits_from_pavement(&self) -> bool {
        self.is_tank()
            && matches!(
                self.mode,
                MovementMode::Tracked | MovementMode::Wheeled | MovementMode::Hover
            )
    }

    pub fn is_field_artillery(&self) -> bool {
        self.traits.contains(UnitTraits::FIELD_ARTILLERY)
    }

    pub fn is_amphibious(&self) -> bool {
        self.traits.contains(UnitTraits::AMPHIBIOUS)
    }

    pub fn is_mountaineer(&self) -> bool {
        self.traits.contains(UnitTraits::MOUNTAINEER)
    }

    /// Units that may shift sideways without turning first.
    pub fn can_shift_laterally(&self) -> bool {
        matches!(
            self.mode,
            MovementMode::Quad | MovementMode::Tripod | MovementMode::Vtol | MovementMode::Wige
                | MovementMode::Hover
        ) || self.is_infantry_like()
            || self.traits.contains(UnitTraits::MANEUVERING_ACE)
    }

    /// Units that pay nothing extra for a sideways shift.
    pub fn shifts_laterally_for_free(&self) -> bool {
        self.is_quad() || self.is_infantry_like()
    }

    /// Whether facing changes cost nothing for this unit.
    pub fn turns_for_free(&self) -> bool {
        self.is_infantry_like() && !self.is_field_artillery()
    }
}

/// Running budget derived from walking: one and a half times, rounded up.
pub const fn run_from_walk(walk_mp: u32) -> u32 {
    (walk_mp * 3).div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_rounds_up() {
        assert_eq!(run_from_walk(4), 6);
        assert_eq!(run_from_walk(5), 8);
        assert_eq!(run_from_walk(0), 0);
    }

    #[test]
    fn field_artillery_infantry_pays_for_turns() {
        let rifles = UnitSnapshot::new(EntityId(1), UnitClass::Infantry, MovementMode::Leg);
        assert!(rifles.turns_for_free());

        let guns = rifles.with_traits(UnitTraits::FIELD_ARTILLERY);
        assert!(!guns.turns_for_free());
    }

    #[test]
    fn hover_tanks_count_as_ground_vehicles() {
        let hover = UnitSnapshot::new(EntityId(2), UnitClass::Tank, MovementMode::Hover);
        assert!(hover.is_ground_vehicle());
        assert!(hover.can_shift_laterally());

        let vtol = UnitSnapshot::new(EntityId(3), UnitClass::Tank, MovementMode::Vtol);
        assert!(!vtol.is_ground_vehicle());
    }
}
