//! Ball movement and collision resolution
//!
//! A ball moves `speed` units per tick in unit-length sub-steps so a single
//! grid query can never skip over a thin collider. Each sub-step moves along
//! X then Y, and each axis is resolved on its own: hitting something reverts
//! that axis' step and flips that direction component, at most once per tick.
//! The tick ends early after the first sub-step that bounced.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::Collider;
use super::entities::{Brick, hit_brick};
use super::grid::{EntityId, EntityRef, Occupant, TileGrid};
use super::ledger::EffectsLedger;
use super::lifecycle::{HasLifecycle, Lifecycle};
use crate::renderer::Color;

/// What happened to a ball during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallStep {
    pub bounced_x: bool,
    pub bounced_y: bool,
    /// Brick hits that dealt damage this tick (one per sub-step axis at most)
    pub bricks_hit: u32,
}

impl BallStep {
    #[inline]
    pub fn bounced(&self) -> bool {
        self.bounced_x || self.bounced_y
    }
}

/// A free-moving ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    body: Collider,
    /// Unit direction of travel
    pub dir: Vec2,
    /// Distance per tick, also the number of sub-steps
    pub speed: u32,
    pub damage: u64,
    pub radius: f32,
    pub color: Color,
    lifecycle: Lifecycle,
}

impl Ball {
    /// Ball heading along `angle` (radians)
    pub fn new(id: EntityId, pos: Vec2, angle: f32, speed: u32, damage: u64, radius: f32) -> Self {
        Self::with_direction(id, pos, Vec2::from_angle(angle), speed, damage, radius)
    }

    pub fn with_direction(
        id: EntityId,
        pos: Vec2,
        dir: Vec2,
        speed: u32,
        damage: u64,
        radius: f32,
    ) -> Self {
        Self {
            id,
            body: Collider::square(pos, radius * 2.0),
            dir,
            speed,
            damage,
            radius,
            color: Color::YELLOW,
            lifecycle: Lifecycle::Active,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.center
    }

    pub fn collider(&self) -> &Collider {
        &self.body
    }

    /// Mark for removal (upgrade resets only; physics never retires a ball)
    pub fn retire(&mut self) -> bool {
        self.lifecycle.retire()
    }

    /// Advance one tick through the grid, damaging any bricks struck
    pub fn advance(
        &mut self,
        grid: &mut TileGrid,
        bricks: &mut [Brick],
        ledger: &mut EffectsLedger,
    ) -> BallStep {
        let mut result = BallStep::default();
        // Step length is fixed for the whole tick, even after a flip
        let step = self.dir;

        for _ in 0..self.speed {
            let prev_x = self.body.center.x;
            self.body.center.x += step.x;
            let found = grid.query(&self.body);
            if found.is_some() && !result.bounced_x {
                self.body.center.x = prev_x;
                self.dir.x = -self.dir.x;
                result.bounced_x = true;
            }
            self.strike(found, grid, bricks, ledger, &mut result);

            let prev_y = self.body.center.y;
            self.body.center.y += step.y;
            let found = grid.query(&self.body);
            if found.is_some() && !result.bounced_y {
                self.body.center.y = prev_y;
                self.dir.y = -self.dir.y;
                result.bounced_y = true;
            }
            self.strike(found, grid, bricks, ledger, &mut result);

            if result.bounced() {
                break;
            }
        }

        if result.bricks_hit > 0 {
            log::trace!("Ball {} hit {} brick(s)", self.id, result.bricks_hit);
        }
        result
    }

    /// Damage the occupant if it is a brick
    fn strike(
        &self,
        found: Option<Occupant>,
        grid: &mut TileGrid,
        bricks: &mut [Brick],
        ledger: &mut EffectsLedger,
        result: &mut BallStep,
    ) {
        let Some(occupant) = found else {
            return;
        };
        match occupant.entity {
            EntityRef::Brick(id) => {
                if hit_brick(bricks, id, self.damage, grid, ledger) > 0 {
                    result.bricks_hit += 1;
                }
            }
            EntityRef::Wall(_) | EntityRef::Ball(_) | EntityRef::Cursor => {}
        }
    }
}

impl HasLifecycle for Ball {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Wall;
    use crate::sim::grid::TileRegion;
    use proptest::prelude::*;

    /// 20x20 tiles of 10 units, walled on every side: interior is [10, 190]
    fn walled_arena() -> TileGrid {
        let mut grid = TileGrid::new(20, 20, 10.0);
        let walls = [
            TileRegion::new(0, 0, 1, 20),
            TileRegion::new(0, 19, 1, 20),
            TileRegion::new(0, 0, 20, 1),
            TileRegion::new(19, 0, 20, 1),
        ];
        for (i, region) in walls.into_iter().enumerate() {
            Wall::new(i as EntityId, region, Color::BLACK, &mut grid);
        }
        grid
    }

    #[test]
    fn test_free_flight_moves_full_speed() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        let mut ball = Ball::with_direction(1, Vec2::new(100.0, 100.0), Vec2::X, 7, 1, 5.0);

        let step = ball.advance(&mut grid, &mut [], &mut ledger);
        assert!(!step.bounced());
        assert_eq!(ball.position(), Vec2::new(107.0, 100.0));
    }

    #[test]
    fn test_bounce_off_wall_within_tick() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        // Right edge at 187, three units short of the wall at x = 190
        let start = Vec2::new(182.0, 100.0);
        let mut ball = Ball::with_direction(1, start, Vec2::X, 5, 1, 5.0);

        let step = ball.advance(&mut grid, &mut [], &mut ledger);
        assert!(step.bounced_x);
        assert!(!step.bounced_y);
        assert_eq!(ball.dir, Vec2::new(-1.0, 0.0));
        let moved = (ball.position() - start).length();
        assert!(moved <= 5.0);
        // Resting flush against the wall, not inside it
        assert_eq!(ball.collider().right(), 190.0);
        assert_eq!(step.bricks_hit, 0);
        assert_eq!(ledger.money, 0);
    }

    #[test]
    fn test_zero_speed_does_not_move() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        let mut ball = Ball::with_direction(1, Vec2::new(50.0, 50.0), Vec2::Y, 0, 1, 5.0);
        let step = ball.advance(&mut grid, &mut [], &mut ledger);
        assert_eq!(step, BallStep::default());
        assert_eq!(ball.position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_brick_hit_on_bounce() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        let mut bricks = vec![Brick::new(10, TileRegion::new(5, 10, 2, 1), 3, &mut grid)];
        // Brick spans y 50..60; ball top at 61 moving up
        let mut ball = Ball::with_direction(1, Vec2::new(105.0, 66.0), -Vec2::Y, 4, 2, 5.0);

        let step = ball.advance(&mut grid, &mut bricks, &mut ledger);
        assert!(step.bounced_y);
        assert_eq!(ball.dir, Vec2::Y);
        assert_eq!(step.bricks_hit, 1);
        assert_eq!(bricks[0].hit_points(), 1);
        assert_eq!(ledger.money, 2);
    }

    #[test]
    fn test_inner_corner_hits_both_bricks() {
        let mut grid = TileGrid::new(10, 10, 10.0);
        let mut ledger = EffectsLedger::new();
        let mut bricks = vec![
            // Right of the ball
            Brick::new(1, TileRegion::new(3, 4, 1, 1), 10, &mut grid),
            // Below the ball
            Brick::new(2, TileRegion::new(4, 3, 1, 1), 10, &mut grid),
        ];
        let start = Vec2::new(35.0, 35.0);
        let mut ball = Ball::with_direction(1, start, Vec2::new(0.6, 0.8), 5, 1, 5.0);

        let step = ball.advance(&mut grid, &mut bricks, &mut ledger);
        assert!(step.bounced_x && step.bounced_y);
        assert_eq!(step.bricks_hit, 2);
        assert_eq!(bricks[0].hit_points(), 9);
        assert_eq!(bricks[1].hit_points(), 9);
        assert_eq!(ball.position(), start);
        assert_eq!(ball.dir, Vec2::new(-0.6, -0.8));
    }

    #[test]
    fn test_embedded_ball_hits_same_brick_on_both_axes() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        // Brick spans x 100..150, y 100..120; the ball sits inside it
        let mut bricks = vec![Brick::new(10, TileRegion::new(10, 10, 5, 2), 10, &mut grid)];
        let start = Vec2::new(120.0, 110.0);
        let mut ball = Ball::with_direction(1, start, Vec2::new(0.6, 0.8), 5, 3, 5.0);

        let step = ball.advance(&mut grid, &mut bricks, &mut ledger);
        assert!(step.bounced_x && step.bounced_y);
        assert_eq!(step.bricks_hit, 2);
        assert_eq!(bricks[0].hit_points(), 10 - 2 * 3);
        assert_eq!(ledger.money, 6);
        assert_eq!(ball.position(), start);
    }

    #[test]
    fn test_unknown_brick_bounces_without_hit() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        // Claimed in the grid but absent from the brick list
        let orphan = Brick::new(10, TileRegion::new(5, 10, 2, 1), 3, &mut grid);
        let mut ball = Ball::with_direction(1, Vec2::new(105.0, 66.0), -Vec2::Y, 4, 1, 5.0);

        let step = ball.advance(&mut grid, &mut [], &mut ledger);
        assert!(step.bounced_y);
        assert_eq!(step.bricks_hit, 0);
        assert_eq!(orphan.hit_points(), 3);
        assert_eq!(ledger.money, 0);
    }

    #[test]
    fn test_destroyed_brick_stops_blocking() {
        let mut grid = walled_arena();
        let mut ledger = EffectsLedger::new();
        let mut bricks = vec![Brick::new(10, TileRegion::new(5, 10, 2, 1), 1, &mut grid)];
        let mut ball = Ball::with_direction(1, Vec2::new(105.0, 66.0), -Vec2::Y, 4, 1, 5.0);

        ball.advance(&mut grid, &mut bricks, &mut ledger);
        assert!(bricks[0].is_defunct());
        assert_eq!(ledger.bricks_broken, 1);

        // Heading back up through the freed tiles meets nothing
        ball.dir = -Vec2::Y;
        let step = ball.advance(&mut grid, &mut bricks, &mut ledger);
        assert!(!step.bounced());
        assert_eq!(ledger.bricks_broken, 1);
    }

    proptest! {
        #[test]
        fn prop_ball_never_leaves_arena(
            x in 15.0f32..185.0,
            y in 15.0f32..185.0,
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 1u32..=100,
        ) {
            let mut grid = walled_arena();
            let mut ledger = EffectsLedger::new();
            let mut ball = Ball::new(1, Vec2::new(x, y), angle, speed, 1, 5.0);

            for _ in 0..40 {
                let before = ball.position();
                ball.advance(&mut grid, &mut [], &mut ledger);
                let c = ball.collider();
                prop_assert!(c.left() >= 10.0 && c.right() <= 190.0, "x escaped: {:?}", c);
                prop_assert!(c.top() >= 10.0 && c.bottom() <= 190.0, "y escaped: {:?}", c);
                prop_assert!((ball.position() - before).length() <= speed as f32 + 1e-3);
            }
        }
    }
}
