//! Trade records, trading windows, and canonical dedup keys.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

use crate::constants::QUANTITY_CAP;
use crate::goods::GoodId;
use crate::inventory::Inventory;

/// Give sides stored inline; a trade has a primary good plus at most a fee.
pub type GiveSides = SmallVec<[TradeSide; 2]>;

/// Two-phase trading window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// Open for the first `early_window_trades` trades.
    Early,
    /// Opens once the early window has closed.
    Late,
}

impl Window {
    /// The window active after `trades_made` trades.
    #[must_use]
    pub const fn for_step(trades_made: u8, early_window_trades: u8) -> Self {
        if trades_made < early_window_trades {
            Self::Early
        } else {
            Self::Late
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Late => "late",
        }
    }
}

/// One side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeSide {
    pub good: GoodId,
    pub qty: u8,
}

impl TradeSide {
    /// Build a side with the quantity clamped to `[1, QUANTITY_CAP]`.
    #[must_use]
    pub fn new(good: GoodId, qty: u8) -> Self {
        Self {
            good,
            qty: qty.clamp(1, QUANTITY_CAP),
        }
    }
}

/// A give/get exchange.
///
/// Applicable iff the inventory holds at least the required quantity of
/// every give-side good and the trade's window is the active one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub give: GiveSides,
    pub get: TradeSide,
    pub window: Window,
    pub stage: u8,
    #[serde(default)]
    pub is_variant: bool,
}

impl Trade {
    /// Single-good trade in the early window.
    #[must_use]
    pub fn simple(give: TradeSide, get: TradeSide, stage: u8) -> Self {
        let mut sides = GiveSides::new();
        sides.push(give);
        Self {
            give: sides,
            get,
            window: Window::Early,
            stage: stage.max(1),
            is_variant: false,
        }
    }

    /// The first give side; every trade has one.
    #[must_use]
    pub fn primary(&self) -> TradeSide {
        self.give.first().copied().unwrap_or(self.get)
    }

    /// Quantity of `good` required by the give sides.
    #[must_use]
    pub fn give_qty(&self, good: GoodId) -> u8 {
        self.give
            .iter()
            .filter(|side| side.good == good)
            .map(|side| side.qty)
            .fold(0_u8, u8::saturating_add)
    }

    /// Whether `good` appears on either side.
    #[must_use]
    pub fn uses(&self, good: GoodId) -> bool {
        self.get.good == good || self.give.iter().any(|side| side.good == good)
    }

    /// Add `qty` of `good` to the give sides, merging with an existing side.
    pub fn add_give(&mut self, good: GoodId, qty: u8) {
        if qty == 0 {
            return;
        }
        if let Some(side) = self.give.iter_mut().find(|side| side.good == good) {
            side.qty = side.qty.saturating_add(qty).min(QUANTITY_CAP);
        } else {
            self.give.push(TradeSide::new(good, qty));
        }
    }

    /// Whether every give side is covered by `inventory`.
    #[must_use]
    pub fn affordable(&self, inventory: &Inventory) -> bool {
        self.give
            .iter()
            .all(|side| inventory.holds(side.good, side.qty))
    }

    /// Apply the trade, returning the resulting clamped inventory, or `None`
    /// when it is not affordable.
    #[must_use]
    pub fn apply(&self, inventory: &Inventory) -> Option<Inventory> {
        let mut next = *inventory;
        for side in &self.give {
            if !next.take(side.good, side.qty) {
                return None;
            }
        }
        next.add(self.get.good, u32::from(self.get.qty));
        Some(next)
    }

    /// Canonical key: give sides sorted by catalog order, then the get side.
    #[must_use]
    pub fn key(&self) -> TradeKey {
        let mut give: SmallVec<[(GoodId, u8); 3]> = self
            .give
            .iter()
            .map(|side| (side.good, side.qty))
            .collect();
        give.sort_unstable();
        TradeKey {
            give,
            get: (self.get.good, self.get.qty),
        }
    }

    /// Largest quantity on either side.
    #[must_use]
    pub fn max_quantity(&self) -> u8 {
        self.give
            .iter()
            .map(|side| side.qty)
            .chain(std::iter::once(self.get.qty))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.key(), self.window.key())
    }
}

/// Sorted, stringifiable identity of a trade used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeKey {
    give: SmallVec<[(GoodId, u8); 3]>,
    get: (GoodId, u8),
}

impl fmt::Display for TradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (good, qty)) in self.give.iter().enumerate() {
            if index > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{qty} {good}")?;
        }
        write!(f, " -> {} {}", self.get.1, self.get.0)
    }
}

/// Ordered trade pool that rejects records whose key is already present.
#[derive(Debug, Clone, Default)]
pub struct TradePool {
    trades: Vec<Trade>,
    keys: HashSet<TradeKey>,
}

impl TradePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trade; returns `false` when its key is a duplicate.
    pub fn insert(&mut self, trade: Trade) -> bool {
        if !self.keys.insert(trade.key()) {
            return false;
        }
        self.trades.push(trade);
        true
    }

    #[must_use]
    pub fn contains(&self, key: &TradeKey) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    #[must_use]
    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheat_for_iron() -> Trade {
        Trade::simple(
            TradeSide::new(GoodId::Wheat, 4),
            TradeSide::new(GoodId::Iron, 1),
            1,
        )
    }

    #[test]
    fn window_closes_after_early_trades() {
        assert_eq!(Window::for_step(0, 3), Window::Early);
        assert_eq!(Window::for_step(2, 3), Window::Early);
        assert_eq!(Window::for_step(3, 3), Window::Late);
    }

    #[test]
    fn apply_moves_goods_and_refuses_shortfall() {
        let trade = wheat_for_iron();
        let rich = Inventory::empty().with(GoodId::Wheat, 5);
        let after = trade.apply(&rich).unwrap();
        assert_eq!(after.get(GoodId::Wheat), 1);
        assert_eq!(after.get(GoodId::Iron), 1);

        let poor = Inventory::empty().with(GoodId::Wheat, 3);
        assert!(!trade.affordable(&poor));
        assert!(trade.apply(&poor).is_none());
    }

    #[test]
    fn apply_clamps_the_get_side() {
        let trade = Trade::simple(
            TradeSide::new(GoodId::Clay, 1),
            TradeSide::new(GoodId::Wool, 40),
            1,
        );
        let start = Inventory::empty()
            .with(GoodId::Clay, 1)
            .with(GoodId::Wool, 190);
        let after = trade.apply(&start).unwrap();
        assert_eq!(after.get(GoodId::Wool), QUANTITY_CAP);
    }

    #[test]
    fn key_ignores_give_order_and_window() {
        let mut a = wheat_for_iron();
        a.add_give(GoodId::Clay, 2);
        let mut b = Trade::simple(
            TradeSide::new(GoodId::Clay, 2),
            TradeSide::new(GoodId::Iron, 1),
            3,
        );
        b.add_give(GoodId::Wheat, 4);
        b.window = Window::Late;
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().to_string(), "4 wheat + 2 clay -> 1 iron");
    }

    #[test]
    fn add_give_merges_existing_side() {
        let mut trade = wheat_for_iron();
        trade.add_give(GoodId::Wheat, 2);
        assert_eq!(trade.give.len(), 1);
        assert_eq!(trade.give_qty(GoodId::Wheat), 6);
    }

    #[test]
    fn pool_rejects_duplicate_keys() {
        let mut pool = TradePool::new();
        assert!(pool.insert(wheat_for_iron()));
        let mut late_copy = wheat_for_iron();
        late_copy.window = Window::Late;
        assert!(!pool.insert(late_copy));
        assert_eq!(pool.len(), 1);
    }
}
