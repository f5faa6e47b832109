//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, driven from outside
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collider;
pub mod entities;
pub mod grid;
pub mod layout;
pub mod ledger;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallStep};
pub use collider::{Collider, TiledCollider};
pub use entities::{Brick, Cursor, Wall};
pub use grid::{EntityId, EntityRef, Occupant, TileGrid, TileRegion};
pub use layout::{brick_hit_points, brick_layout};
pub use ledger::{Currency, EffectsLedger, GameEvent};
pub use lifecycle::{HasLifecycle, Lifecycle, remove_defunct};
pub use state::{World, WorldSnapshot};
pub use tick::{TickInput, tick};
