//! Entity lifecycle: Active until a domain event retires it
//!
//! Retirement is one-way. Defunct entities stay in their collection until the
//! once-per-tick filter removes them.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a simulation entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Part of the running simulation
    #[default]
    Active,
    /// Pending removal
    Defunct,
}

impl Lifecycle {
    /// Move to Defunct. Returns true only on the Active -> Defunct transition.
    pub fn retire(&mut self) -> bool {
        match self {
            Lifecycle::Active => {
                *self = Lifecycle::Defunct;
                true
            }
            Lifecycle::Defunct => false,
        }
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self == Lifecycle::Active
    }
}

/// Anything that carries a lifecycle tag
pub trait HasLifecycle {
    fn lifecycle(&self) -> Lifecycle;

    fn is_defunct(&self) -> bool {
        self.lifecycle() == Lifecycle::Defunct
    }
}

/// Keep only the Active entities, preserving their relative order
pub fn remove_defunct<T: HasLifecycle>(mut items: Vec<T>) -> Vec<T> {
    items.retain(|item| !item.is_defunct());
    items
}
