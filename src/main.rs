//! Tile Breaker entry point
//!
//! Headless native driver: runs the simulation at a fixed tick count without
//! sleeping, feeding it scripted clicks and purchases, and logs a snapshot.
//!
//! Usage: `tile-breaker [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use glam::Vec2;
    use tile_breaker::consts::TICKS_PER_SECOND;
    use tile_breaker::renderer::RecordingSurface;
    use tile_breaker::sim::GameEvent;
    use tile_breaker::{Settings, Shop, TickInput, World, tick};

    const DEFAULT_SECONDS: u32 = 120;

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let settings_path = args.next().map(PathBuf::from);
        let seconds = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SECONDS);

        let settings = Settings::load(settings_path.as_deref());
        let mut world = World::new(settings);
        let mut shop = Shop::new(world.settings());
        let mut surface = RecordingSurface::default();

        log::info!("Tile Breaker (headless) running {seconds}s of simulation");

        let total_ticks = u64::from(seconds) * u64::from(TICKS_PER_SECOND);
        let mut destroyed = 0u64;
        let mut levels = 0u32;

        for t in 0..total_ticks {
            let input = scripted_input(&world, t);
            for event in tick(&mut world, &mut shop, &input) {
                match event {
                    GameEvent::BrickDestroyed { .. } => destroyed += 1,
                    GameEvent::LevelCleared { level } => {
                        levels += 1;
                        log::info!("Cleared level {level} at tick {t}");
                    }
                    GameEvent::BallPurchased { id } => log::info!("Bought ball {id} at tick {t}"),
                    GameEvent::BrickDamaged { .. } => {}
                }
            }

            surface.clear();
            world.draw(&mut surface);
        }

        log::info!(
            "Done: {destroyed} bricks destroyed, {levels} levels cleared, {} draw commands in last frame",
            surface.commands.len()
        );
        match serde_json::to_string(&world.snapshot()) {
            Ok(json) => log::debug!("Final snapshot: {json}"),
            Err(e) => log::warn!("Snapshot not serializable: {e}"),
        }
        println!(
            "level {} | money {} | bricks broken {} | balls {}",
            world.level(),
            world.ledger().money,
            world.ledger().bricks_broken,
            world.balls().len()
        );
    }

    /// Click the first brick once a second and buy whatever is affordable
    fn scripted_input(world: &World, t: u64) -> TickInput {
        let second = t % u64::from(TICKS_PER_SECOND) == 0;
        let target: Option<Vec2> = world.bricks().first().map(|b| b.collider().center);
        TickInput {
            cursor: target,
            click: second,
            buy_ball: second,
            upgrade_balls: second,
            buy_special: second,
            buy_speed: second,
            ..Default::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `tick` itself
}
