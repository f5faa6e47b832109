//! Tile Breaker - a single-screen brick breaker on a tile grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, colliders, balls, bricks, levels)
//! - `renderer`: Draw hooks against an abstract surface
//! - `settings`: Data-driven world configuration
//! - `upgrades`: Purchase rules for the ball economy

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod upgrades;

pub use settings::Settings;
pub use sim::{TickInput, World, tick};
pub use upgrades::Shop;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate driven by the external scheduler
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Arena dimensions (pixels)
    pub const WORLD_WIDTH: u32 = 1080;
    pub const WORLD_HEIGHT: u32 = 720;
    /// Edge length of a square tile (pixels)
    pub const TILE_SIZE: f32 = 12.0;

    /// Brick footprint in tiles
    pub const BRICK_TILE_WIDTH: usize = 5;
    pub const BRICK_TILE_HEIGHT: usize = 2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: u32 = 5;
    pub const BALL_DAMAGE: u64 = 1;
    pub const STARTING_BALLS: u32 = 10;
    pub const BALL_SPAWN: (f32, f32) = (30.0, 30.0);

    /// Cursor hit-test footprint (pixels)
    pub const CURSOR_SIZE: f32 = 10.0;
    /// Damage dealt by a direct click
    pub const CLICK_POWER: u64 = 1;
}
