//! Deterministic coin placement.
//!
//! `generateCoins` asserts an active coin at every placement cell. The
//! placement itself is decided once, at engine construction: either the
//! fixed default pattern or a seeded pseudo-random sample. Both are
//! fully deterministic, so replaying the transition log reproduces the
//! exact same coins.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use coinfield_types::{GridPos, WORLD_MAX, WORLD_MIN};

/// The set of cells `generateCoins` places coins at.
///
/// Cells are stored sorted and deduplicated, and every cell is
/// guaranteed to lie within the world bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinPlacement {
    cells: Vec<GridPos>,
}

impl CoinPlacement {
    /// The fixed default placement.
    ///
    /// A diagonal run near the origin plus a ring at radius 16: enough
    /// coins that every freshly spawned player has one a few steps away,
    /// including the cell (1, 0) immediately right of the origin.
    pub fn fixed() -> Self {
        let mut cells = BTreeSet::new();

        // Diagonal through the origin's neighborhood, offset so the
        // origin cell itself stays empty.
        for i in 0_i32..8 {
            let j = i.saturating_add(1);
            cells.insert(GridPos::new(j, i));
            cells.insert(GridPos::new(j.saturating_neg(), i.saturating_neg()));
        }

        // Ring at radius 16, every fourth cell along each edge.
        let r = 16_i32;
        let mut t = -r;
        while t <= r {
            cells.insert(GridPos::new(t, -r));
            cells.insert(GridPos::new(t, r));
            cells.insert(GridPos::new(-r, t));
            cells.insert(GridPos::new(r, t));
            t = t.saturating_add(4);
        }

        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// A seeded pseudo-random placement of `count` distinct in-bounds
    /// cells.
    ///
    /// The same seed always yields the same cells. `count` is capped at
    /// the number of grid cells.
    pub fn seeded(seed: u64, count: usize) -> Self {
        let total_cells = 63_usize.saturating_mul(63);
        let target = count.min(total_cells);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut cells = BTreeSet::new();
        while cells.len() < target {
            let x = rng.random_range(WORLD_MIN..=WORLD_MAX);
            let y = rng.random_range(WORLD_MIN..=WORLD_MAX);
            cells.insert(GridPos::new(x, y));
        }

        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// The placement cells, sorted.
    pub fn cells(&self) -> &[GridPos] {
        &self.cells
    }

    /// Number of placement cells.
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the placement is empty.
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for CoinPlacement {
    fn default() -> Self {
        Self::fixed()
    }
}
