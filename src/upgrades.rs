//! Ball economy: purchase rules for the upgrade shop
//!
//! Only the rules live here. Buttons, tooltips and number formatting belong
//! to the host UI, which reads `progress`/`state` to render them.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Currency, EffectsLedger, EntityId, GameEvent, World};

/// Whether a gated upgrade can be bought right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PurchaseState {
    #[default]
    Disabled,
    Enabled,
    /// One-off upgrade already bought
    Purchased,
}

/// Money upgrade whose price grows by `cost_mult` after every purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBarUpgrade {
    pub cost: u64,
    pub cost_mult: f64,
}

impl CostBarUpgrade {
    pub fn new(cost: u64, cost_mult: f64) -> Self {
        Self { cost, cost_mult }
    }

    /// Fill fraction of the cost bar, 1.0 once affordable
    pub fn progress(&self, money: u64) -> f32 {
        if money >= self.cost || self.cost == 0 {
            1.0
        } else {
            money as f32 / self.cost as f32
        }
    }

    /// Pay with money and raise the price (rounded up)
    pub fn try_purchase(&mut self, ledger: &mut EffectsLedger) -> bool {
        if !ledger.try_spend(Currency::Money, self.cost) {
            return false;
        }
        self.cost = (self.cost as f64 * self.cost_mult).ceil() as u64;
        true
    }
}

/// Upgrade unlocked by level, paid in money or broken bricks
///
/// One-off upgrades end up `Purchased`; repeatable ones stay purchasable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedUpgrade {
    pub cost: u64,
    pub level_req: u32,
    pub currency: Currency,
    pub repeatable: bool,
    state: PurchaseState,
}

impl GatedUpgrade {
    pub fn one_off(cost: u64, level_req: u32, currency: Currency) -> Self {
        Self {
            cost,
            level_req,
            currency,
            repeatable: false,
            state: PurchaseState::Disabled,
        }
    }

    pub fn repeatable(cost: u64, level_req: u32, currency: Currency) -> Self {
        Self {
            repeatable: true,
            ..Self::one_off(cost, level_req, currency)
        }
    }

    pub fn state(&self) -> PurchaseState {
        self.state
    }

    /// Recompute Enabled/Disabled from the balance and current level
    pub fn refresh(&mut self, ledger: &EffectsLedger, level: u32) -> PurchaseState {
        if self.state != PurchaseState::Purchased {
            self.state = if level < self.level_req || ledger.balance(self.currency) < self.cost {
                PurchaseState::Disabled
            } else {
                PurchaseState::Enabled
            };
        }
        self.state
    }

    pub fn try_purchase(&mut self, ledger: &mut EffectsLedger, level: u32) -> bool {
        if self.state == PurchaseState::Purchased || level < self.level_req {
            return false;
        }
        if !ledger.try_spend(self.currency, self.cost) {
            return false;
        }
        if !self.repeatable {
            self.state = PurchaseState::Purchased;
        }
        true
    }
}

/// Ball tier: level, the upgrade that raises it, and the special it unlocks
///
/// The special is gated by the tier rather than the world level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallUpgradeRow {
    pub level: u32,
    pub upgrade: CostBarUpgrade,
    pub special: GatedUpgrade,
}

impl BallUpgradeRow {
    pub fn new(upgrade: CostBarUpgrade, special: GatedUpgrade) -> Self {
        Self {
            level: 1,
            upgrade,
            special,
        }
    }

    /// Named stats for display
    pub fn stats(&self, world: &World) -> Vec<(&'static str, u64)> {
        let stats = world.ball_stats();
        vec![
            ("count", world.balls().len() as u64),
            ("damage", stats.damage),
            ("speed", u64::from(stats.speed)),
        ]
    }
}

/// Everything the player can buy
#[derive(Debug, Clone)]
pub struct Shop {
    pub new_ball: CostBarUpgrade,
    pub ball_row: BallUpgradeRow,
    pub speed: GatedUpgrade,
    speed_amount: u32,
    base_damage: u64,
    /// Extra damage bought through the ball special
    bonus_damage: u64,
    bonus_amount: u64,
    base: (CostBarUpgrade, CostBarUpgrade),
}

impl Shop {
    pub fn new(settings: &Settings) -> Self {
        let new_ball = CostBarUpgrade::new(settings.ball_cost, settings.ball_cost_mult);
        let ball_level = CostBarUpgrade::new(settings.ball_level_cost, settings.ball_level_cost_mult);
        let special = GatedUpgrade::repeatable(
            settings.special_damage_cost,
            settings.special_damage_tier_req,
            Currency::Bricks,
        );
        Self {
            base: (new_ball.clone(), ball_level.clone()),
            new_ball,
            ball_row: BallUpgradeRow::new(ball_level, special),
            speed: GatedUpgrade::one_off(
                settings.speed_upgrade_cost,
                settings.speed_upgrade_level_req,
                Currency::Bricks,
            ),
            speed_amount: settings.speed_upgrade_amount,
            base_damage: settings.ball_damage,
            bonus_damage: 0,
            bonus_amount: settings.special_damage_amount,
        }
    }

    /// Buy one more ball
    pub fn buy_ball(&mut self, world: &mut World) -> Option<EntityId> {
        if !self.new_ball.try_purchase(world.ledger_mut()) {
            return None;
        }
        let id = world.spawn_ball();
        world.ledger_mut().push_event(GameEvent::BallPurchased { id });
        log::debug!("Bought ball {id}, next costs {}", self.new_ball.cost);
        Some(id)
    }

    /// Raise the ball tier; damage scales with the tier
    pub fn upgrade_balls(&mut self, world: &mut World) -> bool {
        if !self.ball_row.upgrade.try_purchase(world.ledger_mut()) {
            return false;
        }
        self.ball_row.level += 1;
        world.set_ball_damage(self.damage());
        log::debug!("Ball tier {}", self.ball_row.level);
        true
    }

    /// Repeatable damage special, unlocked by the ball tier and paid in bricks
    pub fn buy_special(&mut self, world: &mut World) -> bool {
        let tier = self.ball_row.level;
        if !self.ball_row.special.try_purchase(world.ledger_mut(), tier) {
            return false;
        }
        self.bonus_damage += self.bonus_amount;
        world.set_ball_damage(self.damage());
        log::debug!("Special bought, bonus damage {}", self.bonus_damage);
        true
    }

    /// Damage for the current tier and bonus
    fn damage(&self) -> u64 {
        self.base_damage * u64::from(self.ball_row.level) + self.bonus_damage
    }

    /// One-off speed boost, paid in broken bricks
    pub fn buy_speed(&mut self, world: &mut World) -> bool {
        let level = world.level();
        if !self.speed.try_purchase(world.ledger_mut(), level) {
            return false;
        }
        world.add_ball_speed(self.speed_amount);
        log::debug!("Speed upgrade bought (+{})", self.speed_amount);
        true
    }

    /// Upgrade reset: retire every ball and return the ball tier to its base
    pub fn reset_balls(&mut self, world: &mut World) {
        let retired = world.retire_balls();
        let (new_ball, ball_level) = self.base.clone();
        self.new_ball = new_ball;
        self.ball_row.level = 1;
        self.ball_row.upgrade = ball_level;
        self.bonus_damage = 0;
        world.set_ball_damage(self.damage());
        log::info!("Ball reset: {retired} balls retired");
    }

    /// Refresh gated upgrade states for display
    pub fn refresh(&mut self, world: &World) {
        self.speed.refresh(world.ledger(), world.level());
        self.ball_row
            .special
            .refresh(world.ledger(), self.ball_row.level);
    }
}
