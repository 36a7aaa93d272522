//! Fixed-width inventory vector indexed by [`GoodId`].
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::QUANTITY_CAP;
use crate::goods::{GOOD_COUNT, GoodId};
use crate::puzzle::Goal;

/// Quantity held of every catalog good.
///
/// A plain `Copy` value: every search frontier state is an independent
/// snapshot. Every write is clamped to `[0, QUANTITY_CAP]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<GoodId, u32>", into = "BTreeMap<GoodId, u32>")]
pub struct Inventory {
    counts: [u8; GOOD_COUNT],
}

impl Inventory {
    /// An inventory holding nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            counts: [0; GOOD_COUNT],
        }
    }

    #[must_use]
    pub const fn get(&self, good: GoodId) -> u8 {
        self.counts[good.index()]
    }

    /// Set a quantity, clamping it to the cap.
    pub fn set(&mut self, good: GoodId, qty: u32) {
        let capped = qty.min(u32::from(QUANTITY_CAP));
        self.counts[good.index()] = u8::try_from(capped).unwrap_or(QUANTITY_CAP);
    }

    /// Add to a quantity, clamping the result to the cap.
    pub fn add(&mut self, good: GoodId, qty: u32) {
        let next = u32::from(self.get(good)).saturating_add(qty);
        self.set(good, next);
    }

    /// Remove `qty` units if they are held; returns `false` and leaves the
    /// inventory untouched otherwise.
    pub fn take(&mut self, good: GoodId, qty: u8) -> bool {
        let held = self.get(good);
        if held < qty {
            return false;
        }
        self.counts[good.index()] = held - qty;
        true
    }

    #[must_use]
    pub const fn holds(&self, good: GoodId, qty: u8) -> bool {
        self.get(good) >= qty
    }

    /// Whether the goal quantity is held.
    #[must_use]
    pub const fn satisfies(&self, goal: &Goal) -> bool {
        self.holds(goal.good, goal.qty)
    }

    /// Builder-style variant of [`Inventory::set`].
    #[must_use]
    pub fn with(mut self, good: GoodId, qty: u32) -> Self {
        self.set(good, qty);
        self
    }

    /// Non-zero entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (GoodId, u8)> + '_ {
        GoodId::ALL
            .iter()
            .copied()
            .map(|good| (good, self.get(good)))
            .filter(|(_, qty)| *qty > 0)
    }

    #[must_use]
    pub fn max_quantity(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|qty| *qty == 0)
    }
}

impl From<BTreeMap<GoodId, u32>> for Inventory {
    fn from(value: BTreeMap<GoodId, u32>) -> Self {
        let mut inventory = Self::empty();
        for (good, qty) in value {
            inventory.set(good, qty);
        }
        inventory
    }
}

impl From<Inventory> for BTreeMap<GoodId, u32> {
    fn from(value: Inventory) -> Self {
        value
            .iter()
            .map(|(good, qty)| (good, u32::from(qty)))
            .collect()
    }
}
