//! Economic effects reported by the simulation
//!
//! Bricks credit money and destruction counts here; the driver owns the
//! ledger and the upgrade shop spends from it.

use serde::{Deserialize, Serialize};

use super::grid::EntityId;

/// Currencies the shop accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Money,
    Bricks,
}

/// Events emitted during a tick, drained by the driver (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDamaged { id: EntityId, amount: u64 },
    BrickDestroyed { id: EntityId },
    LevelCleared { level: u32 },
    BallPurchased { id: EntityId },
}

/// Money and broken-brick counters plus pending events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectsLedger {
    pub money: u64,
    pub bricks_broken: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl EffectsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger starting with the given balances and no pending events
    pub fn with_balances(money: u64, bricks_broken: u64) -> Self {
        Self {
            money,
            bricks_broken,
            events: Vec::new(),
        }
    }

    /// Credit damage dealt to a brick
    pub fn gain(&mut self, id: EntityId, amount: u64) {
        if amount == 0 {
            return;
        }
        self.money += amount;
        self.events.push(GameEvent::BrickDamaged { id, amount });
    }

    pub fn record_destroyed(&mut self, id: EntityId) {
        self.bricks_broken += 1;
        self.events.push(GameEvent::BrickDestroyed { id });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Money => self.money,
            Currency::Bricks => self.bricks_broken,
        }
    }

    /// Deduct `amount` if the balance covers it
    pub fn try_spend(&mut self, currency: Currency, amount: u64) -> bool {
        let balance = match currency {
            Currency::Money => &mut self.money,
            Currency::Bricks => &mut self.bricks_broken,
        };
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        true
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
