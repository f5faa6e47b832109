//! Tiled entities (walls, bricks) and the pointer cursor

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{Collider, TiledCollider};
use super::grid::{EntityId, EntityRef, Occupant, TileGrid, TileRegion};
use super::ledger::EffectsLedger;
use super::lifecycle::{HasLifecycle, Lifecycle};
use crate::consts::CURSOR_SIZE;
use crate::renderer::Color;

/// Unbreakable boundary spanning one or more tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: EntityId,
    pub color: Color,
    body: TiledCollider,
}

impl Wall {
    /// Create a wall and claim its tiles
    pub fn new(id: EntityId, region: TileRegion, color: Color, grid: &mut TileGrid) -> Self {
        let body = TiledCollider::new(region, grid.tile_size());
        body.claim(grid, EntityRef::Wall(id));
        Self { id, color, body }
    }

    pub fn body(&self) -> &TiledCollider {
        &self.body
    }

    pub fn collider(&self) -> &Collider {
        self.body.collider()
    }
}

impl HasLifecycle for Wall {
    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Active
    }
}

/// Destructible brick holding a hit-point counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    /// Remaining hit points
    num: u64,
    lifecycle: Lifecycle,
    body: TiledCollider,
}

impl Brick {
    /// Create a brick and claim its tiles
    pub fn new(id: EntityId, region: TileRegion, num: u64, grid: &mut TileGrid) -> Self {
        assert!(num > 0, "brick {id} must start with hit points");
        let body = TiledCollider::new(region, grid.tile_size());
        body.claim(grid, EntityRef::Brick(id));
        Self {
            id,
            num,
            lifecycle: Lifecycle::Active,
            body,
        }
    }

    #[inline]
    pub fn hit_points(&self) -> u64 {
        self.num
    }

    pub fn body(&self) -> &TiledCollider {
        &self.body
    }

    pub fn collider(&self) -> &Collider {
        self.body.collider()
    }

    /// Apply `damage`, crediting the damage actually absorbed
    ///
    /// Reaching zero retires the brick and frees its tiles in the same call.
    /// A defunct brick absorbs nothing. Returns the applied damage.
    pub fn hit(&mut self, damage: u64, grid: &mut TileGrid, ledger: &mut EffectsLedger) -> u64 {
        if !self.lifecycle.is_active() {
            return 0;
        }

        let applied = self.num.min(damage);
        self.num -= applied;
        ledger.gain(self.id, applied);

        if self.num == 0 && self.lifecycle.retire() {
            self.body.release(grid);
            ledger.record_destroyed(self.id);
            log::debug!("Brick {} destroyed at {:?}", self.id, self.body.region());
        }
        applied
    }
}

impl HasLifecycle for Brick {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

/// Hit `id` in an id-sorted brick list; unknown ids are ignored
pub fn hit_brick(
    bricks: &mut [Brick],
    id: EntityId,
    damage: u64,
    grid: &mut TileGrid,
    ledger: &mut EffectsLedger,
) -> u64 {
    match bricks.binary_search_by_key(&id, |b| b.id) {
        Ok(index) => bricks[index].hit(damage, grid, ledger),
        Err(_) => {
            log::warn!("Grid referenced missing brick {id}");
            0
        }
    }
}

/// Pointer-driven collider used for direct clicks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursor {
    body: Collider,
    pub pressed: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            body: Collider::square(Vec2::ZERO, CURSOR_SIZE),
            pressed: false,
        }
    }
}

impl Cursor {
    pub fn position(&self) -> Vec2 {
        self.body.center
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.body.center = pos;
    }

    pub fn collider(&self) -> &Collider {
        &self.body
    }

    /// Occupant under the pointer, using the same query as balls
    pub fn target(&self, grid: &TileGrid) -> Option<Occupant> {
        grid.query(&self.body)
    }
}
