//! World state: grid, entities, level and ledger
//!
//! The world owns every entity. Grid cells only hold handles into it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ball::Ball;
use super::entities::{Brick, Cursor, Wall, hit_brick};
use super::grid::{EntityId, EntityRef, TileGrid, TileRegion};
use super::layout::{brick_hit_points, brick_layout};
use super::ledger::{EffectsLedger, GameEvent};
use super::lifecycle::remove_defunct;
use crate::renderer::{Color, Draw, Surface};
use crate::settings::Settings;

/// Stats applied to newly spawned balls
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallStats {
    pub speed: u32,
    pub damage: u64,
    pub radius: f32,
}

/// Brick as seen by a HUD
#[derive(Debug, Clone, Serialize)]
pub struct BrickView {
    pub id: EntityId,
    pub region: TileRegion,
    pub hit_points: u64,
}

/// Ball as seen by a HUD
#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub id: EntityId,
    pub pos: Vec2,
    pub dir: Vec2,
}

/// Read-only summary for display
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub level: u32,
    pub time_ticks: u64,
    pub money: u64,
    pub bricks_broken: u64,
    pub bricks: Vec<BrickView>,
    pub balls: Vec<BallView>,
}

/// The complete simulation
pub struct World {
    settings: Settings,
    grid: TileGrid,
    walls: Vec<Wall>,
    /// Active bricks (sorted by id)
    bricks: Vec<Brick>,
    /// Balls (sorted by id)
    balls: Vec<Ball>,
    cursor: Cursor,
    level: u32,
    time_ticks: u64,
    ledger: EffectsLedger,
    ball_stats: BallStats,
    rng: Pcg32,
    next_id: EntityId,
    /// Set once a level's layout comes out empty; levels stop advancing
    layout_exhausted: bool,
}

impl World {
    /// Build walls, the level-0 bricks and the starting balls
    pub fn new(settings: Settings) -> Self {
        let grid = TileGrid::for_world(
            settings.world_width as f32,
            settings.world_height as f32,
            settings.tile_size,
        );
        let ball_stats = BallStats {
            speed: settings.ball_speed,
            damage: settings.ball_damage,
            radius: settings.ball_radius,
        };
        let mut world = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            grid,
            walls: Vec::new(),
            bricks: Vec::new(),
            balls: Vec::new(),
            cursor: Cursor::default(),
            level: 0,
            time_ticks: 0,
            ledger: EffectsLedger::new(),
            ball_stats,
            next_id: 1,
            layout_exhausted: false,
        };

        world.init_walls();
        world.init_bricks();
        for _ in 0..world.settings.starting_balls {
            world.spawn_ball();
        }

        log::info!(
            "World {}x{} tiles, {} bricks, {} balls (seed {})",
            world.grid.cols(),
            world.grid.rows(),
            world.bricks.len(),
            world.balls.len(),
            world.settings.seed
        );
        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// One-tile walls along all four edges
    fn init_walls(&mut self) {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let regions = [
            TileRegion::new(0, 0, 1, rows),
            TileRegion::new(0, cols - 1, 1, rows),
            TileRegion::new(0, 0, cols, 1),
            TileRegion::new(rows - 1, 0, cols, 1),
        ];
        for region in regions {
            let id = self.next_entity_id();
            self.walls
                .push(Wall::new(id, region, Color::BLACK, &mut self.grid));
        }
    }

    /// Lay out the bricks for the current level
    fn init_bricks(&mut self) {
        let num = brick_hit_points(self.level);
        for region in brick_layout(self.level, self.grid.rows(), self.grid.cols()) {
            let id = self.next_entity_id();
            self.bricks.push(Brick::new(id, region, num, &mut self.grid));
        }
        if self.bricks.is_empty() {
            self.layout_exhausted = true;
            log::warn!(
                "No bricks fit a {}x{} grid on level {}; level progression stopped",
                self.grid.cols(),
                self.grid.rows(),
                self.level
            );
        }
    }

    /// Spawn a ball at the spawn point in a random direction
    pub fn spawn_ball(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let (x, y) = self.settings.spawn;
        let stats = self.ball_stats;
        self.balls.push(Ball::new(
            id,
            Vec2::new(x, y),
            angle,
            stats.speed,
            stats.damage,
            stats.radius,
        ));
        id
    }

    /// Advance the simulation one tick
    pub fn update(&mut self) {
        self.time_ticks += 1;

        for ball in &mut self.balls {
            ball.advance(&mut self.grid, &mut self.bricks, &mut self.ledger);
        }

        self.balls = remove_defunct(std::mem::take(&mut self.balls));
        self.bricks = remove_defunct(std::mem::take(&mut self.bricks));

        if self.bricks.is_empty() && !self.layout_exhausted {
            self.ledger
                .push_event(GameEvent::LevelCleared { level: self.level });
            self.level += 1;
            self.init_bricks();
            log::info!(
                "Level {} cleared, laying out {} bricks for level {}",
                self.level - 1,
                self.bricks.len(),
                self.level
            );
        }
    }

    pub fn set_cursor(&mut self, pos: Vec2) {
        self.cursor.set_position(pos);
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.cursor.pressed = pressed;
    }

    /// Hit the brick under the cursor. Returns the damage applied, if a brick was there.
    pub fn click(&mut self, power: u64) -> Option<u64> {
        let occupant = self.cursor.target(&self.grid)?;
        match occupant.entity {
            EntityRef::Brick(id) => Some(hit_brick(
                &mut self.bricks,
                id,
                power,
                &mut self.grid,
                &mut self.ledger,
            )),
            EntityRef::Wall(_) | EntityRef::Ball(_) | EntityRef::Cursor => None,
        }
    }

    /// Retire every ball; they disappear on the next update
    pub fn retire_balls(&mut self) -> usize {
        let retired = self
            .balls
            .iter_mut()
            .map(|b| b.retire())
            .filter(|&changed| changed)
            .count();
        log::debug!("Retired {retired} balls");
        retired
    }

    /// Set damage on every ball and on future spawns
    pub fn set_ball_damage(&mut self, damage: u64) {
        self.ball_stats.damage = damage;
        for ball in &mut self.balls {
            ball.damage = damage;
        }
    }

    /// Raise speed on every ball and on future spawns
    pub fn add_ball_speed(&mut self, delta: u32) {
        self.ball_stats.speed += delta;
        for ball in &mut self.balls {
            ball.speed += delta;
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn ball_stats(&self) -> BallStats {
        self.ball_stats
    }

    pub fn ledger(&self) -> &EffectsLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut EffectsLedger {
        &mut self.ledger
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            level: self.level,
            time_ticks: self.time_ticks,
            money: self.ledger.money,
            bricks_broken: self.ledger.bricks_broken,
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickView {
                    id: b.id,
                    region: b.body().region(),
                    hit_points: b.hit_points(),
                })
                .collect(),
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    id: b.id,
                    pos: b.position(),
                    dir: b.dir,
                })
                .collect(),
        }
    }

    /// Render the whole scene onto `surface`
    pub fn draw(&self, surface: &mut dyn Surface) {
        let size = Vec2::new(
            self.settings.world_width as f32,
            self.settings.world_height as f32,
        );
        surface.fill_rect(size / 2.0, size, Color::GRAY, 0.0);

        for ball in &self.balls {
            ball.draw(surface);
        }
        for wall in &self.walls {
            wall.draw(surface);
        }
        for brick in &self.bricks {
            brick.draw(surface);
        }
        self.cursor.draw(surface);
    }
}
