//! Cardinal directions and toroidal neighbour enumeration
//!
//! Positions are `[row, col]` grid indices. Row 0 is the top of the grid, so
//! North points toward decreasing row indices.

use std::fmt;

/// Grid index pair in `[row, col]` order
pub type Position = [usize; 2];

/// One of the four cardinal directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Toward row - 1
    North,
    /// Toward row + 1
    South,
    /// Toward col + 1
    East,
    /// Toward col - 1
    West,
}

impl Direction {
    /// All directions in their canonical order
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Dense index of this direction, matching the order of [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// The direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

/// Four cardinal neighbours of `position` on a `width` x `height` torus
///
/// Each neighbour is paired with the direction of `position` *relative to
/// that neighbour*. The cell above `position` is returned with
/// [`Direction::South`], because `position` lies south of it. Querying the
/// adjacency rules of the neighbour's tile in that direction therefore yields
/// the tiles that are legal at `position`.
///
/// The order is fixed: above, below, left, right.
pub const fn neighbors_of(
    position: Position,
    width: usize,
    height: usize,
) -> [(Position, Direction); 4] {
    let [row, col] = position;
    let up = (row + height - 1) % height;
    let down = (row + 1) % height;
    let left = (col + width - 1) % width;
    let right = (col + 1) % width;

    [
        ([up, col], Direction::South),
        ([down, col], Direction::North),
        ([row, left], Direction::East),
        ([row, right], Direction::West),
    ]
}
