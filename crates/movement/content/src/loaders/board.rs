//! Board data loader.
//!
//! A board file lists its dimensions and only the hexes that differ from flat,
//! level-0 ground.

use std::path::Path;

use movement_core::{
    BoardDimensions, BoardId, Coords, Facing, Hex, MapBoard, TerrainKind,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Board structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardRon {
    id: u16,
    dimensions: (u32, u32),
    #[serde(default)]
    hexes: Vec<HexRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HexRon {
    x: i32,
    y: i32,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    terrains: Vec<(TerrainKind, u8)>,
    /// Hex sides (0 = north, clockwise) a road leaves through.
    #[serde(default)]
    road_exits: Vec<u8>,
}

impl HexRon {
    fn to_hex(&self) -> Hex {
        let exits: Vec<Facing> = self.road_exits.iter().copied().map(Facing::new).collect();
        self.terrains
            .iter()
            .fold(Hex::new(self.level), |hex, &(kind, level)| hex.with(kind, level))
            .with_road_exits(&exits)
    }
}

/// Loader for boards from RON files.
pub struct BoardLoader;

impl BoardLoader {
    /// Load a board from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapBoard> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MapBoard> {
        let data: BoardRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;

        let dimensions = BoardDimensions::new(data.dimensions.0, data.dimensions.1);
        let mut board = MapBoard::new(BoardId(data.id), dimensions);
        for entry in &data.hexes {
            let coords = Coords::new(entry.x, entry.y);
            board
                .set_hex(coords, entry.to_hex())
                .map_err(|e| anyhow::anyhow!("Invalid hex in board {}: {}", data.id, e))?;
        }

        tracing::debug!(
            board = data.id,
            width = dimensions.width,
            height = dimensions.height,
            custom_hexes = data.hexes.len(),
            "loaded board"
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use movement_core::BoardOracle;

    use super::*;

    #[test]
    fn unlisted_hexes_are_flat_ground() {
        let board = BoardLoader::parse(
            r#"(
                id: 3,
                dimensions: (6, 5),
                hexes: [
                    (x: 2, y: 1, level: 2, terrains: [(Woods, 2)]),
                    (x: 4, y: 4, terrains: [(Road, 1)], road_exits: [0, 3]),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(board.id(), BoardId(3));
        let wooded = board.hex_at(Coords::new(2, 1)).unwrap();
        assert_eq!(wooded.level, 2);
        assert_eq!(wooded.terrain_level(TerrainKind::Woods), Some(2));

        let road = board.hex_at(Coords::new(4, 4)).unwrap();
        assert!(road.has_road_exit(Facing::NORTH));
        assert!(road.has_road_exit(Facing::SOUTH));
        assert!(!road.has_road_exit(Facing::NORTH_EAST));

        let plain = board.hex_at(Coords::new(0, 0)).unwrap();
        assert_eq!(plain.level, 0);
        assert!(plain.terrains().is_empty());
    }

    #[test]
    fn hexes_outside_the_board_are_rejected() {
        let result = BoardLoader::parse("(id: 1, dimensions: (2, 2), hexes: [(x: 5, y: 0)])");
        assert!(result.is_err());
    }
}
