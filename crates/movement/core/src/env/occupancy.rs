use std::collections::BTreeMap;

use crate::common::EntityId;
use crate::hex::Coords;

/// A unit standing in a hex, as seen by the moving unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub entity: EntityId,
    pub elevation: i32,
    pub hostile: bool,
    /// Infantry never block stacking.
    pub infantry: bool,
}

impl Occupant {
    pub const fn friendly(entity: EntityId) -> Self {
        Self {
            entity,
            elevation: 0,
            hostile: false,
            infantry: false,
        }
    }

    pub const fn hostile(entity: EntityId) -> Self {
        Self {
            entity,
            elevation: 0,
            hostile: true,
            infantry: false,
        }
    }

    #[must_use]
    pub const fn at_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    #[must_use]
    pub const fn as_infantry(mut self) -> Self {
        self.infantry = true;
        self
    }
}

/// Read-only view of where other units stand.
pub trait OccupancyOracle: Send + Sync {
    fn occupants(&self, coords: Coords) -> Vec<Occupant>;

    fn is_occupied(&self, coords: Coords) -> bool {
        !self.occupants(coords).is_empty()
    }
}

/// Occupancy table fixed for the duration of a planning session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticOccupancy {
    cells: BTreeMap<Coords, Vec<Occupant>>,
}

impl StaticOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coords: Coords, occupant: Occupant) {
        self.cells.entry(coords).or_default().push(occupant);
    }

    #[must_use]
    pub fn with(mut self, coords: Coords, occupant: Occupant) -> Self {
        self.insert(coords, occupant);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl OccupancyOracle for StaticOccupancy {
    fn occupants(&self, coords: Coords) -> Vec<Occupant> {
        self.cells.get(&coords).cloned().unwrap_or_default()
    }
}
