//! Hex-grid geometry and per-hex terrain descriptions.
mod coords;
mod terrain;

pub use coords::{Coords, Facing};
pub use terrain::{BuildingClass, Hex, Terrain, TerrainKind};
