use std::fmt;

/// Hex-side a unit faces or moves towards, `0` = north, counting clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing(u8);

impl Facing {
    pub const NORTH: Self = Self(0);
    pub const NORTH_EAST: Self = Self(1);
    pub const SOUTH_EAST: Self = Self(2);
    pub const SOUTH: Self = Self(3);
    pub const SOUTH_WEST: Self = Self(4);
    pub const NORTH_WEST: Self = Self(5);

    pub const ALL: [Facing; 6] = [
        Self::NORTH,
        Self::NORTH_EAST,
        Self::SOUTH_EAST,
        Self::SOUTH,
        Self::SOUTH_WEST,
        Self::NORTH_WEST,
    ];

    /// Wraps any hex-side index into `0..6`.
    pub const fn new(index: u8) -> Self {
        Self(index % 6)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Rotates clockwise by `sides` hex-sides.
    pub const fn offset(self, sides: u8) -> Self {
        Self::new(self.0 + sides % 6)
    }

    pub const fn rotate_right(self) -> Self {
        self.offset(1)
    }

    pub const fn rotate_left(self) -> Self {
        self.offset(5)
    }

    pub const fn opposite(self) -> Self {
        self.offset(3)
    }

    /// Number of hex-sides between two facings, the short way round.
    pub fn turns_to(self, other: Facing) -> u8 {
        let diff = (other.0 + 6 - self.0) % 6;
        diff.min(6 - diff)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "N",
            1 => "NE",
            2 => "SE",
            3 => "S",
            4 => "SW",
            _ => "NW",
        };
        f.write_str(name)
    }
}

/// Offset hex coordinates: columns are `x`, and odd columns sit half a hex lower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the adjacent hex across the given hex-side.
    pub fn translated(self, direction: Facing) -> Coords {
        let Coords { x, y } = self;
        let odd = x & 1;
        match direction.index() {
            0 => Coords::new(x, y - 1),
            1 => Coords::new(x + 1, y - (1 - odd)),
            2 => Coords::new(x + 1, y + odd),
            3 => Coords::new(x, y + 1),
            4 => Coords::new(x - 1, y + odd),
            _ => Coords::new(x - 1, y - (1 - odd)),
        }
    }

    /// Hex-side leading to `other`, if it is adjacent.
    pub fn direction_to(self, other: Coords) -> Option<Facing> {
        Facing::ALL
            .into_iter()
            .find(|&facing| self.translated(facing) == other)
    }

    /// Number of hexes between two coordinates.
    pub fn distance(self, other: Coords) -> u32 {
        let (q1, r1) = self.axial();
        let (q2, r2) = other.axial();
        let dq = q1 - q2;
        let dr = r1 - r2;
        let ds = -dq - dr;
        (dq.unsigned_abs() + dr.unsigned_abs() + ds.unsigned_abs()) / 2
    }

    pub fn is_adjacent(self, other: Coords) -> bool {
        self.distance(other) == 1
    }

    fn axial(self) -> (i32, i32) {
        let q = self.x;
        let r = self.y - (self.x - (self.x & 1)) / 2;
        (q, r)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_round_trips_through_opposite_side() {
        for coords in [Coords::new(4, 4), Coords::new(5, 4), Coords::new(-3, 2)] {
            for facing in Facing::ALL {
                let there = coords.translated(facing);
                assert_eq!(there.translated(facing.opposite()), coords);
                assert_eq!(coords.distance(there), 1);
            }
        }
    }

    #[test]
    fn odd_columns_sit_lower() {
        assert_eq!(Coords::new(4, 4).translated(Facing::NORTH_EAST), Coords::new(5, 3));
        assert_eq!(Coords::new(5, 3).translated(Facing::SOUTH_EAST), Coords::new(6, 4));
        assert_eq!(Coords::new(5, 3).translated(Facing::NORTH_EAST), Coords::new(6, 3));
    }

    #[test]
    fn distance_counts_straight_lines() {
        let start = Coords::new(2, 2);
        let mut here = start;
        for step in 1..=5 {
            here = here.translated(Facing::SOUTH_EAST);
            assert_eq!(start.distance(here), step);
        }
    }

    #[test]
    fn direction_to_finds_neighbours_only() {
        let here = Coords::new(3, 3);
        assert_eq!(
            here.direction_to(here.translated(Facing::SOUTH_WEST)),
            Some(Facing::SOUTH_WEST)
        );
        assert_eq!(here.direction_to(Coords::new(3, 5)), None);
    }

    #[test]
    fn facing_rotation_wraps() {
        assert_eq!(Facing::NORTH.rotate_left(), Facing::NORTH_WEST);
        assert_eq!(Facing::NORTH_WEST.rotate_right(), Facing::NORTH);
        assert_eq!(Facing::NORTH_EAST.turns_to(Facing::SOUTH_WEST), 3);
        assert_eq!(Facing::NORTH.turns_to(Facing::NORTH_WEST), 1);
    }
}
