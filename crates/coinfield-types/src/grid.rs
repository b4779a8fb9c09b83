//! Grid geometry for the Coinfield world.
//!
//! The world is an implicit 63x63 grid: both axes run from [`WORLD_MIN`]
//! to [`WORLD_MAX`] inclusive. The grid itself is never stored -- only
//! the bounds constants exist, and the transition engine validates every
//! position against them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Smallest valid coordinate on either axis.
pub const WORLD_MIN: i32 = -31;

/// Largest valid coordinate on either axis.
pub const WORLD_MAX: i32 = 31;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four cardinal movement directions.
///
/// A move adjusts exactly one axis by exactly one unit. The y axis grows
/// downward (screen convention): `Up` decrements y, `Down` increments it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// Decrease y by one.
    Up,
    /// Increase y by one.
    Down,
    /// Decrease x by one.
    Left,
    /// Increase x by one.
    Right,
}

impl Direction {
    /// Return the (dx, dy) unit offset for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// GridPos
// ---------------------------------------------------------------------------

/// A position on the world grid.
///
/// `GridPos` is a structured composite key: coins are keyed by their
/// position directly, so coordinates are never round-tripped through
/// encoded strings. Validity (`in_bounds`) is a property checked by the
/// transition engine, not enforced by construction -- a `GridPos` outside
/// the world bounds is representable but never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridPos {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate (grows downward).
    pub y: i32,
}

impl GridPos {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return whether this position lies within the world bounds on both
    /// axes.
    pub const fn in_bounds(self) -> bool {
        self.x >= WORLD_MIN && self.x <= WORLD_MAX && self.y >= WORLD_MIN && self.y <= WORLD_MAX
    }

    /// Return the position one step in the given direction.
    ///
    /// Saturating at the i32 extremes; bounds validation is separate --
    /// the returned position may lie outside the world and the engine
    /// rejects it there.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl core::fmt::Display for GridPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_moves_exactly_one_axis() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn up_decrements_y() {
        let pos = GridPos::new(0, 0).step(Direction::Up);
        assert_eq!(pos, GridPos::new(0, -1));
    }

    #[test]
    fn down_increments_y() {
        let pos = GridPos::new(0, 0).step(Direction::Down);
        assert_eq!(pos, GridPos::new(0, 1));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(GridPos::new(WORLD_MIN, WORLD_MAX).in_bounds());
        assert!(GridPos::new(WORLD_MAX, WORLD_MIN).in_bounds());
        assert!(!GridPos::new(WORLD_MAX + 1, 0).in_bounds());
        assert!(!GridPos::new(0, WORLD_MIN - 1).in_bounds());
    }

    #[test]
    fn step_off_the_edge_is_representable_but_out_of_bounds() {
        let edge = GridPos::new(WORLD_MAX, 0);
        let stepped = edge.step(Direction::Right);
        assert_eq!(stepped, GridPos::new(32, 0));
        assert!(!stepped.in_bounds());
    }
}
