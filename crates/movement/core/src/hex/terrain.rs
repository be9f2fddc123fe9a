use arrayvec::ArrayVec;

use super::Facing;

const MAX_TERRAINS: usize = 8;

/// Terrain features that can be layered on a single hex.
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
pub enum TerrainKind {
    /// Level 1 light, 2 heavy, 3 ultra-heavy.
    Woods,
    /// Level 1 light, 2 heavy, 3 ultra-heavy.
    Jungle,
    /// Level 1 rough, 2 ultra-rough.
    Rough,
    /// Level 1 rubble, 2 ultra-rubble.
    Rubble,
    Mud,
    Swamp,
    /// Level 1 thin snow, 2 deep snow.
    Snow,
    Ice,
    Sand,
    Tundra,
    /// Level is the water depth.
    Water,
    Rapids,
    /// Level 1 crust, 2 liquid.
    Magma,
    Fire,
    Pavement,
    Road,
    /// Level is the bridge's construction class.
    Bridge,
    /// Level is the bridge deck height above the hex.
    BridgeElevation,
    /// Level is the [`BuildingClass`] of the structure.
    Building,
    /// Level is the number of floors.
    BuildingHeight,
    /// Level is the construction factor of the structure.
    BuildingCf,
    Impassable,
}

/// A terrain feature with its level (depth, density, class, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    pub kind: TerrainKind,
    pub level: u8,
}

impl Terrain {
    pub const fn new(kind: TerrainKind, level: u8) -> Self {
        Self { kind, level }
    }
}

/// Construction class of a building, cheapest to enter first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingClass {
    Light,
    Medium,
    Heavy,
    Hardened,
}

impl BuildingClass {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Light),
            2 => Some(Self::Medium),
            3 => Some(Self::Heavy),
            4 => Some(Self::Hardened),
            _ => None,
        }
    }

    /// Extra points a unit pays to enter a hex of this class.
    pub const fn entry_surcharge(self) -> u32 {
        match self {
            Self::Light => 1,
            Self::Medium => 2,
            Self::Heavy => 3,
            Self::Hardened => 4,
        }
    }
}

/// Immutable description of a single board hex.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    /// Ground level of the hex.
    pub level: i32,
    terrains: ArrayVec<Terrain, MAX_TERRAINS>,
    /// Hex-sides with a road exit, bit `n` for facing `n`.
    road_exits: u8,
}

impl Hex {
    pub const MAX_TERRAINS: usize = MAX_TERRAINS;

    pub fn new(level: i32) -> Self {
        Self {
            level,
            terrains: ArrayVec::new(),
            road_exits: 0,
        }
    }

    /// Adds (or replaces) a terrain feature. Features beyond capacity are ignored.
    #[must_use]
    pub fn with(mut self, kind: TerrainKind, level: u8) -> Self {
        self.set_terrain(Terrain::new(kind, level));
        self
    }

    /// Marks the given hex-sides as road exits.
    #[must_use]
    pub fn with_road_exits(mut self, exits: &[Facing]) -> Self {
        for exit in exits {
            self.road_exits |= 1 << exit.index();
        }
        self
    }

    pub fn set_terrain(&mut self, terrain: Terrain) {
        if let Some(existing) = self.terrains.iter_mut().find(|t| t.kind == terrain.kind) {
            existing.level = terrain.level;
        } else {
            let _ = self.terrains.try_push(terrain);
        }
    }

    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    pub fn road_exit_mask(&self) -> u8 {
        self.road_exits
    }

    pub fn set_road_exit_mask(&mut self, mask: u8) {
        self.road_exits = mask & 0b0011_1111;
    }

    pub fn contains(&self, kind: TerrainKind) -> bool {
        self.terrains.iter().any(|t| t.kind == kind)
    }

    pub fn terrain_level(&self, kind: TerrainKind) -> Option<u8> {
        self.terrains
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.level)
    }

    fn level_or_zero(&self, kind: TerrainKind) -> i32 {
        i32::from(self.terrain_level(kind).unwrap_or(0))
    }

    /// Water depth, `0` for dry hexes.
    pub fn depth(&self) -> i32 {
        self.level_or_zero(TerrainKind::Water)
    }

    /// Level of the bottom of the hex (below any water).
    pub fn floor(&self) -> i32 {
        self.level - self.depth()
    }

    pub fn has_ice(&self) -> bool {
        self.contains(TerrainKind::Ice)
    }

    pub fn building_class(&self) -> Option<BuildingClass> {
        self.terrain_level(TerrainKind::Building)
            .and_then(BuildingClass::from_level)
    }

    pub fn building_height(&self) -> i32 {
        if self.contains(TerrainKind::Building) {
            self.level_or_zero(TerrainKind::BuildingHeight).max(1)
        } else {
            0
        }
    }

    pub fn building_cf(&self) -> Option<u32> {
        self.terrain_level(TerrainKind::BuildingCf).map(u32::from)
    }

    pub fn bridge_elevation(&self) -> Option<i32> {
        if self.contains(TerrainKind::Bridge) {
            Some(self.level_or_zero(TerrainKind::BridgeElevation))
        } else {
            None
        }
    }

    /// Height of anything standing on the hex that a flyer must clear.
    pub fn obstruction_height(&self) -> i32 {
        let foliage = self
            .terrain_level(TerrainKind::Woods)
            .or_else(|| self.terrain_level(TerrainKind::Jungle))
            .map(|density| if density >= 3 { 3 } else { 2 })
            .unwrap_or(0);
        let bridge = self.bridge_elevation().unwrap_or(0);
        self.building_height().max(foliage).max(bridge)
    }

    /// Woods or jungle of any density.
    pub fn has_foliage(&self) -> bool {
        self.contains(TerrainKind::Woods) || self.contains(TerrainKind::Jungle)
    }

    pub fn is_paved(&self) -> bool {
        self.contains(TerrainKind::Pavement) || self.contains(TerrainKind::Road)
    }

    /// Whether a unit may leave or enter this hex along a paved surface through `side`.
    pub fn has_road_exit(&self, side: Facing) -> bool {
        if self.contains(TerrainKind::Pavement) {
            return true;
        }
        self.contains(TerrainKind::Road) && self.road_exits & (1 << side.index()) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_layers_replace_same_kind() {
        let hex = Hex::new(1)
            .with(TerrainKind::Woods, 1)
            .with(TerrainKind::Woods, 2);
        assert_eq!(hex.terrains().len(), 1);
        assert_eq!(hex.terrain_level(TerrainKind::Woods), Some(2));
    }

    #[test]
    fn water_floor_sits_below_surface() {
        let hex = Hex::new(2).with(TerrainKind::Water, 3);
        assert_eq!(hex.depth(), 3);
        assert_eq!(hex.floor(), -1);
    }

    #[test]
    fn roads_only_connect_through_exits() {
        let road = Hex::new(0)
            .with(TerrainKind::Road, 1)
            .with_road_exits(&[Facing::NORTH, Facing::SOUTH]);
        assert!(road.has_road_exit(Facing::NORTH));
        assert!(!road.has_road_exit(Facing::NORTH_EAST));

        let plaza = Hex::new(0).with(TerrainKind::Pavement, 1);
        assert!(Facing::ALL.iter().all(|&side| plaza.has_road_exit(side)));
    }

    #[test]
    fn obstruction_takes_tallest_feature() {
        let hex = Hex::new(0)
            .with(TerrainKind::Woods, 1)
            .with(TerrainKind::Building, 2)
            .with(TerrainKind::BuildingHeight, 4);
        assert_eq!(hex.obstruction_height(), 4);
        assert_eq!(hex.building_class(), Some(BuildingClass::Medium));
    }
}
