//! Tile grid spatial index
//!
//! A fixed rows x cols array of cells. Each cell records at most one occupant:
//! a non-owning handle to the tiled collider that claimed it, together with
//! that collider's (immutable) world bounds so queries never need to reach
//! back into entity storage.

use serde::{Deserialize, Serialize};

use super::collider::Collider;

/// Stable entity identifier, allocated once per world
pub type EntityId = u32;

/// Closed set of entity kinds the simulation dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Wall(EntityId),
    Brick(EntityId),
    Ball(EntityId),
    Cursor,
}

/// What a cell knows about the collider occupying it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    pub entity: EntityRef,
    pub bounds: Collider,
}

/// Rectangular block of tiles: rows `[row, row + height)`, cols `[col, col + width)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRegion {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl TileRegion {
    pub const fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// Exclusive end row
    #[inline]
    pub fn row_end(&self) -> usize {
        self.row + self.height
    }

    /// Exclusive end column
    #[inline]
    pub fn col_end(&self) -> usize {
        self.col + self.width
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row..self.row_end()).contains(&row) && (self.col..self.col_end()).contains(&col)
    }

    /// All `(row, col)` pairs, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (row, row_end) = (self.row, self.row_end());
        let (col, col_end) = (self.col, self.col_end());
        (row..row_end).flat_map(move |r| (col..col_end).map(move |c| (r, c)))
    }
}

/// Fixed-size grid of optional occupants, stored row-major
#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tile_size: f32,
    cells: Vec<Option<Occupant>>,
}

impl TileGrid {
    pub fn new(rows: usize, cols: usize, tile_size: f32) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell ({rows}x{cols})");
        assert!(tile_size > 0.0, "tile size must be positive, got {tile_size}");
        Self {
            rows,
            cols,
            tile_size,
            cells: vec![None; rows * cols],
        }
    }

    /// Size the grid from world dimensions (partial tiles are dropped)
    pub fn for_world(width: f32, height: f32, tile_size: f32) -> Self {
        assert!(tile_size > 0.0, "tile size must be positive, got {tile_size}");
        let rows = (height / tile_size).floor() as usize;
        let cols = (width / tile_size).floor() as usize;
        Self::new(rows, cols, tile_size)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "tile ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn occupant(&self, row: usize, col: usize) -> Option<Occupant> {
        self.cells[self.index(row, col)]
    }

    /// Write `occupant` into every cell of `region`
    ///
    /// Panics if the region leaves the grid: callers own that contract.
    pub fn set_region(&mut self, region: TileRegion, occupant: Option<Occupant>) {
        assert!(
            region.row_end() <= self.rows && region.col_end() <= self.cols,
            "region {region:?} outside {}x{} grid",
            self.rows,
            self.cols
        );
        for row in region.row..region.row_end() {
            let start = row * self.cols;
            self.cells[start + region.col..start + region.col_end()].fill(occupant);
        }
    }

    pub fn clear_region(&mut self, region: TileRegion) {
        self.set_region(region, None);
    }

    /// Inclusive tile span covered by `[lo, hi]` along one axis, clamped to `len`
    fn span(&self, lo: f32, hi: f32, len: usize) -> Option<(usize, usize)> {
        let first = (lo / self.tile_size).floor().max(0.0);
        let last = (hi / self.tile_size).floor().min((len - 1) as f32);
        if last < first {
            return None;
        }
        Some((first as usize, last as usize))
    }

    /// First occupant (row-major) whose bounds strictly overlap `bounds`
    pub fn query(&self, bounds: &Collider) -> Option<Occupant> {
        let (first_row, last_row) = self.span(bounds.top(), bounds.bottom(), self.rows)?;
        let (first_col, last_col) = self.span(bounds.left(), bounds.right(), self.cols)?;

        for row in first_row..=last_row {
            let start = row * self.cols;
            for cell in &self.cells[start + first_col..=start + last_col] {
                if let Some(occupant) = cell {
                    if bounds.overlaps(&occupant.bounds) {
                        return Some(*occupant);
                    }
                }
            }
        }
        None
    }

    /// Number of cells with an occupant
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collider::TiledCollider;
    use glam::Vec2;
    use proptest::prelude::*;

    fn occupant(entity: EntityRef, region: TileRegion, tile: f32) -> Occupant {
        Occupant {
            entity,
            bounds: *TiledCollider::new(region, tile).collider(),
        }
    }

    #[test]
    fn test_for_world_dimensions() {
        let grid = TileGrid::for_world(1080.0, 720.0, 12.0);
        assert_eq!(grid.cols(), 90);
        assert_eq!(grid.rows(), 60);
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    #[should_panic]
    fn test_empty_grid_panics() {
        let _ = TileGrid::new(0, 10, 12.0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_region_panics() {
        let mut grid = TileGrid::new(4, 4, 10.0);
        grid.set_region(TileRegion::new(3, 3, 2, 1), None);
    }

    #[test]
    fn test_region_cells_row_major() {
        let cells: Vec<_> = TileRegion::new(1, 2, 2, 2).cells().collect();
        assert_eq!(cells, vec![(1, 2), (1, 3), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_query_finds_overlapping_occupant() {
        let mut grid = TileGrid::new(10, 10, 10.0);
        let region = TileRegion::new(4, 4, 2, 1);
        grid.set_region(region, Some(occupant(EntityRef::Brick(1), region, 10.0)));

        let probe = Collider::square(Vec2::new(45.0, 45.0), 4.0);
        let hit = grid.query(&probe).expect("probe sits on the brick");
        assert_eq!(hit.entity, EntityRef::Brick(1));

        let miss = Collider::square(Vec2::new(15.0, 15.0), 4.0);
        assert!(grid.query(&miss).is_none());
    }

    #[test]
    fn test_query_edge_touch_is_miss() {
        let mut grid = TileGrid::new(10, 10, 10.0);
        let region = TileRegion::new(0, 5, 1, 1);
        grid.set_region(region, Some(occupant(EntityRef::Wall(1), region, 10.0)));
        // Right edge at x = 50, the wall's left edge; the span includes tile 5
        let probe = Collider::square(Vec2::new(45.0, 5.0), 10.0);
        assert!(grid.query(&probe).is_none());
    }

    #[test]
    fn test_query_row_major_tie_break() {
        let mut grid = TileGrid::new(10, 10, 10.0);
        let upper_right = TileRegion::new(2, 3, 1, 1);
        let lower_left = TileRegion::new(3, 2, 1, 1);
        grid.set_region(lower_left, Some(occupant(EntityRef::Brick(2), lower_left, 10.0)));
        grid.set_region(upper_right, Some(occupant(EntityRef::Brick(1), upper_right, 10.0)));

        // Covers tiles (2..=3, 2..=3): row 2 is scanned before row 3
        let probe = Collider::square(Vec2::new(30.0, 30.0), 12.0);
        assert_eq!(grid.query(&probe).map(|o| o.entity), Some(EntityRef::Brick(1)));
    }

    #[test]
    fn test_query_outside_grid_is_clamped() {
        let mut grid = TileGrid::new(5, 5, 10.0);
        let corner = TileRegion::new(0, 0, 1, 1);
        grid.set_region(corner, Some(occupant(EntityRef::Wall(1), corner, 10.0)));

        let straddling = Collider::square(Vec2::new(0.0, 0.0), 6.0);
        assert!(grid.query(&straddling).is_some());

        let far_away = Collider::square(Vec2::new(-100.0, -100.0), 6.0);
        assert!(grid.query(&far_away).is_none());
        let past_end = Collider::square(Vec2::new(500.0, 500.0), 6.0);
        assert!(grid.query(&past_end).is_none());
    }

    fn arb_region(rows: usize, cols: usize) -> impl Strategy<Value = TileRegion> {
        (0..rows, 0..cols).prop_flat_map(move |(row, col)| {
            (1..=cols - col, 1..=rows - row)
                .prop_map(move |(width, height)| TileRegion::new(row, col, width, height))
        })
    }

    proptest! {
        #[test]
        fn prop_set_region_touches_only_region(
            first in arb_region(8, 12),
            second in arb_region(8, 12),
        ) {
            let mut grid = TileGrid::new(8, 12, 10.0);
            let background = occupant(EntityRef::Wall(1), first, 10.0);
            grid.set_region(first, Some(background));

            let written = occupant(EntityRef::Brick(2), second, 10.0);
            grid.set_region(second, Some(written));

            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let expected = if second.contains(row, col) {
                        Some(written)
                    } else if first.contains(row, col) {
                        Some(background)
                    } else {
                        None
                    };
                    prop_assert_eq!(grid.occupant(row, col), expected);
                }
            }
        }
    }
}
