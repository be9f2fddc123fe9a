use crate::common::BoardId;
use crate::hex::{Coords, Hex};

use super::OracleError;

/// Static board oracle exposing immutable hex layout.
pub trait BoardOracle: Send + Sync {
    fn id(&self) -> BoardId;
    fn dimensions(&self) -> BoardDimensions;
    fn hex_at(&self, coords: Coords) -> Option<&Hex>;

    fn contains(&self, coords: Coords) -> bool {
        self.dimensions().contains(coords)
    }

    /// Whether the hex sits on the outermost ring of the board.
    fn is_edge(&self, coords: Coords) -> bool {
        let dims = self.dimensions();
        dims.contains(coords)
            && (coords.x == 0
                || coords.y == 0
                || coords.x == dims.width as i32 - 1
                || coords.y == dims.height as i32 - 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardDimensions {
    pub width: u32,
    pub height: u32,
}

impl BoardDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coords: Coords) -> bool {
        coords.x >= 0
            && coords.y >= 0
            && coords.x < self.width as i32
            && coords.y < self.height as i32
    }

    pub const fn area(&self) -> usize {
        (self.width * self.height) as usize
    }

    fn index(&self, coords: Coords) -> Option<usize> {
        self.contains(coords)
            .then(|| coords.y as usize * self.width as usize + coords.x as usize)
    }
}

/// In-memory board stored as a flat row-major array of hexes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBoard {
    id: BoardId,
    dimensions: BoardDimensions,
    hexes: Vec<Hex>,
}

impl MapBoard {
    /// Creates a flat, clear board at ground level 0.
    pub fn new(id: BoardId, dimensions: BoardDimensions) -> Self {
        Self {
            id,
            dimensions,
            hexes: vec![Hex::new(0); dimensions.area()],
        }
    }

    /// Builds a board from a row-major hex list.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::HexCountMismatch` if the list does not cover the board exactly.
    pub fn from_hexes(
        id: BoardId,
        dimensions: BoardDimensions,
        hexes: Vec<Hex>,
    ) -> Result<Self, OracleError> {
        if hexes.len() != dimensions.area() {
            return Err(OracleError::HexCountMismatch {
                expected: dimensions.area(),
                actual: hexes.len(),
            });
        }
        Ok(Self {
            id,
            dimensions,
            hexes,
        })
    }

    /// Replaces the hex at `coords`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CoordsOutOfBounds` if `coords` is off the board.
    pub fn set_hex(&mut self, coords: Coords, hex: Hex) -> Result<(), OracleError> {
        let index = self
            .dimensions
            .index(coords)
            .ok_or(OracleError::CoordsOutOfBounds(coords))?;
        self.hexes[index] = hex;
        Ok(())
    }

    /// Builder variant of [`Self::set_hex`]; off-board coordinates are ignored.
    #[must_use]
    pub fn with_hex(mut self, coords: Coords, hex: Hex) -> Self {
        let _ = self.set_hex(coords, hex);
        self
    }
}

impl BoardOracle for MapBoard {
    fn id(&self) -> BoardId {
        self.id
    }

    fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    fn hex_at(&self, coords: Coords) -> Option<&Hex> {
        self.dimensions
            .index(coords)
            .and_then(|index| self.hexes.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::TerrainKind;

    #[test]
    fn hexes_are_addressed_row_major() {
        let board = MapBoard::new(BoardId(1), BoardDimensions::new(4, 3))
            .with_hex(Coords::new(2, 1), Hex::new(3).with(TerrainKind::Rough, 1));

        assert_eq!(board.hex_at(Coords::new(2, 1)).map(|h| h.level), Some(3));
        assert_eq!(board.hex_at(Coords::new(1, 2)).map(|h| h.level), Some(0));
        assert!(board.hex_at(Coords::new(4, 0)).is_none());
        assert!(board.hex_at(Coords::new(-1, 0)).is_none());
    }

    #[test]
    fn set_hex_rejects_off_board() {
        let mut board = MapBoard::new(BoardId(1), BoardDimensions::new(2, 2));
        assert_eq!(
            board.set_hex(Coords::new(5, 5), Hex::new(1)),
            Err(OracleError::CoordsOutOfBounds(Coords::new(5, 5)))
        );
    }

    #[test]
    fn from_hexes_requires_full_cover() {
        let result = MapBoard::from_hexes(BoardId(0), BoardDimensions::new(2, 2), vec![Hex::new(0)]);
        assert!(matches!(
            result,
            Err(OracleError::HexCountMismatch {
                expected: 4,
                actual: 1
            })
        ));
    }

    #[test]
    fn edge_ring_is_detected() {
        let board = MapBoard::new(BoardId(0), BoardDimensions::new(5, 5));
        assert!(board.is_edge(Coords::new(0, 2)));
        assert!(board.is_edge(Coords::new(4, 4)));
        assert!(!board.is_edge(Coords::new(2, 2)));
        assert!(!board.is_edge(Coords::new(5, 2)));
    }
}
