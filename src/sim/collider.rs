//! Axis-aligned colliders
//!
//! Every collider is a rectangle in center + size form. Overlap uses strict
//! inequalities, so rectangles that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{EntityRef, Occupant, TileGrid, TileRegion};

/// Axis-aligned bounding box (center + full size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub center: Vec2,
    pub size: Vec2,
}

impl Collider {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        assert!(
            size.x >= 0.0 && size.y >= 0.0,
            "collider size must be non-negative, got {size}"
        );
        Self { center, size }
    }

    /// Square collider of the given edge length
    pub fn square(center: Vec2, edge: f32) -> Self {
        Self::new(center, Vec2::splat(edge))
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Strict rectangle overlap test
    #[inline]
    pub fn overlaps(&self, other: &Collider) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

/// A collider whose footprint is a whole-tile region of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiledCollider {
    collider: Collider,
    region: TileRegion,
}

impl TiledCollider {
    /// Derive world bounds from a tile region
    pub fn new(region: TileRegion, tile_size: f32) -> Self {
        let center = Vec2::new(
            (region.col as f32 + region.width as f32 / 2.0) * tile_size,
            (region.row as f32 + region.height as f32 / 2.0) * tile_size,
        );
        let size = Vec2::new(
            region.width as f32 * tile_size,
            region.height as f32 * tile_size,
        );
        Self {
            collider: Collider::new(center, size),
            region,
        }
    }

    #[inline]
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    #[inline]
    pub fn region(&self) -> TileRegion {
        self.region
    }

    /// Record `entity` as the occupant of every tile in the region
    pub fn claim(&self, grid: &mut TileGrid, entity: EntityRef) {
        let occupant = Occupant {
            entity,
            bounds: self.collider,
        };
        grid.set_region(self.region, Some(occupant));
    }

    /// Empty every tile in the region
    pub fn release(&self, grid: &mut TileGrid) {
        grid.clear_region(self.region);
    }
}
