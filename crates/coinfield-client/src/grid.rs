//! Pixel/tile coordinate mapping.
//!
//! Screen coordinates are pixels; world coordinates are grid tiles.
//! Pixel to tile is flooring integer division by the tile size (each
//! axis independently), tile to pixel is the inverse multiplication.
//! The round trip is exact on tile-aligned pixel coordinates.

use coinfield_types::GridPos;

/// Convert one pixel coordinate to its tile coordinate.
///
/// Flooring division (`div_euclid`), so negative pixels map to the
/// tile whose pixel span contains them: pixel -1 at tile size 32 lies
/// in tile -1, not tile 0.
pub fn tile_from_pixel(pixel: i32, tile_size: u32) -> i32 {
    let size = i32::try_from(tile_size.max(1)).unwrap_or(i32::MAX);
    pixel.div_euclid(size)
}

/// Convert one tile coordinate to the pixel coordinate of its origin
/// corner. Saturates at the i32 extremes.
pub fn pixel_from_tile(tile: i32, tile_size: u32) -> i32 {
    let size = i32::try_from(tile_size.max(1)).unwrap_or(i32::MAX);
    tile.saturating_mul(size)
}

/// Convert a pixel point to the grid tile containing it.
pub fn tile_point_from_pixel(x: i32, y: i32, tile_size: u32) -> GridPos {
    GridPos::new(tile_from_pixel(x, tile_size), tile_from_pixel(y, tile_size))
}

/// Convert a grid tile to the pixel point of its origin corner.
pub fn pixel_point_from_tile(tile: GridPos, tile_size: u32) -> (i32, i32) {
    (
        pixel_from_tile(tile.x, tile_size),
        pixel_from_tile(tile.y, tile_size),
    )
}
