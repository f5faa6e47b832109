//! Fixed tick entry point
//!
//! The host calls `tick` at a fixed rate. Nothing here reads clocks or
//! devices: the outcome depends only on the world state and the input.
//! Events raised during the tick are drained from the ledger and returned,
//! so nothing accumulates between ticks.

use glam::Vec2;

use super::ledger::GameEvent;
use super::state::World;
use crate::upgrades::Shop;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in world pixels
    pub cursor: Option<Vec2>,
    /// Pointer button held state
    pub pressed: Option<bool>,
    /// Click on whatever is under the cursor
    pub click: bool,
    /// Shop actions
    pub buy_ball: bool,
    pub upgrade_balls: bool,
    pub buy_special: bool,
    pub buy_speed: bool,
    pub reset_balls: bool,
}

/// Apply input, advance the world by one tick, and return the tick's events
pub fn tick(world: &mut World, shop: &mut Shop, input: &TickInput) -> Vec<GameEvent> {
    if let Some(pos) = input.cursor {
        world.set_cursor(pos);
    }
    if let Some(pressed) = input.pressed {
        world.set_pressed(pressed);
    }
    if input.click {
        let power = world.settings().click_power;
        if let Some(applied) = world.click(power) {
            log::trace!("Click dealt {applied}");
        }
    }

    if input.buy_ball {
        shop.buy_ball(world);
    }
    if input.upgrade_balls {
        shop.upgrade_balls(world);
    }
    if input.buy_special {
        shop.buy_special(world);
    }
    if input.buy_speed {
        shop.buy_speed(world);
    }
    if input.reset_balls {
        shop.reset_balls(world);
    }

    world.update();
    shop.refresh(world);
    world.ledger_mut().drain_events()
}
