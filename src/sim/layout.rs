//! Deterministic brick layouts
//!
//! Four fixed patterns cycle forever, picked by `level % 4`. Every brick is
//! `BRICK_TILE_WIDTH` x `BRICK_TILE_HEIGHT` tiles. Patterns were drawn for a
//! 90 x 60 tile arena; on smaller grids bricks that would not fit inside the
//! one-tile wall border are dropped.

use super::grid::TileRegion;
use crate::consts::{BRICK_TILE_HEIGHT as BH, BRICK_TILE_WIDTH as BW};

/// Column offset applied to a brick slot, in tiles
#[derive(Clone, Copy)]
enum Shift {
    Right(usize),
    Left(usize),
}

/// Rectangular block of brick slots: `(slot rows, slot cols, col shift)`
type Block = ((usize, usize), (usize, usize), Shift);

/// Maze pattern, all rows offset one tile down
const MAZE_BLOCKS: [Block; 9] = [
    ((14, 15), (1, 9), Shift::Left(1)),
    ((14, 15), (10, 17), Shift::Left(1)),
    ((26, 27), (13, 17), Shift::Left(1)),
    ((16, 29), (12, 13), Shift::Left(1)),
    ((2, 13), (12, 13), Shift::Left(1)),
    ((4, 13), (15, 16), Shift::Left(1)),
    ((2, 13), (3, 4), Shift::Left(1)),
    ((16, 29), (3, 4), Shift::Left(1)),
    ((16, 29), (6, 7), Shift::Left(1)),
];

/// Vertical lanes, one pair of brick columns each
const LANES: [((usize, usize), Shift); 4] = [
    ((0, 2), Shift::Right(1)),
    ((16, 18), Shift::Left(1)),
    ((10, 12), Shift::Left(2)),
    ((7, 9), Shift::Right(0)),
];

/// Hit points of every brick on `level`
pub fn brick_hit_points(level: u32) -> u64 {
    u64::from(level) + 1
}

/// Brick regions for `level` on a `rows` x `cols` grid
pub fn brick_layout(level: u32, rows: usize, cols: usize) -> Vec<TileRegion> {
    let mut regions = Vec::new();
    // Slot rows that fit a full column of bricks (one tile below the top wall)
    let column_slots = rows.saturating_sub(1) / 2;

    match level % 4 {
        // Big middle block
        0 => {
            for i in 9..22 {
                for j in 4..14 {
                    regions.push(brick(i * BH, j * BW));
                }
            }
        }
        // Two rows of four towers
        1 => {
            for r in 0..2 {
                for c in 0..4 {
                    for i in 4..14 {
                        for j in 2..4 {
                            regions.push(brick((i + r * 14) * BH, (j + c * 4) * BW));
                        }
                    }
                }
            }
        }
        // Four lanes top to bottom
        2 => {
            for ((j_start, j_end), shift) in LANES {
                for i in 0..column_slots {
                    for j in j_start..j_end {
                        if let Some(col) = shifted(j * BW, shift) {
                            regions.push(brick(i * BH + 1, col));
                        }
                    }
                }
            }
        }
        // Maze
        _ => {
            for i in 0..column_slots {
                if let Some(col) = shifted(9 * BW, Shift::Left(1)) {
                    regions.push(brick(i * BH + 1, col));
                }
            }
            for ((i_start, i_end), (j_start, j_end), shift) in MAZE_BLOCKS {
                for i in i_start..i_end {
                    for j in j_start..j_end {
                        if let Some(col) = shifted(j * BW, shift) {
                            regions.push(brick(i * BH + 1, col));
                        }
                    }
                }
            }
        }
    }

    let total = regions.len();
    regions.retain(|r| fits_interior(r, rows, cols));
    if regions.len() < total {
        log::debug!(
            "Level {level}: dropped {} of {total} bricks outside {rows}x{cols} interior",
            total - regions.len()
        );
    }
    regions
}

fn brick(row: usize, col: usize) -> TileRegion {
    TileRegion::new(row, col, BW, BH)
}

fn shifted(col: usize, shift: Shift) -> Option<usize> {
    match shift {
        Shift::Right(n) => Some(col + n),
        Shift::Left(n) => col.checked_sub(n),
    }
}

/// Inside the grid and clear of the one-tile border
fn fits_interior(region: &TileRegion, rows: usize, cols: usize) -> bool {
    region.row >= 1
        && region.col >= 1
        && region.row_end() < rows
        && region.col_end() < cols
}
