//! The immutable daily puzzle and the rules for playing it.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::constants::QUANTITY_CAP;
use crate::goods::{Good, GoodId};
use crate::inventory::Inventory;
use crate::trade::{Trade, Window};

/// Target the player must hold to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Goal {
    pub good: GoodId,
    pub qty: u8,
}

impl Goal {
    #[must_use]
    pub const fn satisfied_by(&self, inventory: &Inventory) -> bool {
        inventory.satisfies(self)
    }
}

/// Errors raised while replaying a trade sequence against a puzzle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("sequence has {len} trades but the puzzle allows {max}")]
    TooManyTrades { len: usize, max: u8 },
    #[error("trade {step} is a {window} trade but the {active} window is open")]
    WindowClosed {
        step: usize,
        window: &'static str,
        active: &'static str,
    },
    #[error("trade {step} ({trade}) is not affordable")]
    Unaffordable { step: usize, trade: String },
    #[error("goal not reached: holding {have} of {want}")]
    GoalNotReached { have: u8, want: u8 },
}

/// A generated daily Barter puzzle.
///
/// Built once per date and never mutated by the engine; the presentation
/// layer copies `inventory` for session play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarterPuzzle {
    /// Seed of the candidate that produced this puzzle.
    pub seed: u64,
    /// Goods in play, in catalog order.
    pub goods: Vec<Good>,
    /// Starting inventory.
    pub inventory: Inventory,
    pub goal: Goal,
    /// Shuffled pool: solution, distractors and variants.
    pub trades: Vec<Trade>,
    /// Reference solution, in play order.
    pub solution: Vec<Trade>,
    pub par: u8,
    pub max_trades: u8,
    pub early_window_trades: u8,
}

impl BarterPuzzle {
    /// Window open after `trades_made` trades.
    #[must_use]
    pub const fn window_at(&self, trades_made: u8) -> Window {
        Window::for_step(trades_made, self.early_window_trades)
    }

    /// Whether `trade` may be offered after `trades_made` trades.
    #[must_use]
    pub fn is_trade_available(&self, trade: &Trade, trades_made: u8) -> bool {
        trades_made < self.max_trades && trade.window == self.window_at(trades_made)
    }

    #[must_use]
    pub const fn is_solved(&self, inventory: &Inventory) -> bool {
        self.goal.satisfied_by(inventory)
    }

    /// Pool trades that are open and affordable, with their pool index.
    pub fn available_trades<'a>(
        &'a self,
        inventory: &'a Inventory,
        trades_made: u8,
    ) -> impl Iterator<Item = (usize, &'a Trade)> + 'a {
        self.trades.iter().enumerate().filter(move |(_, trade)| {
            self.is_trade_available(trade, trades_made) && trade.affordable(inventory)
        })
    }

    /// Number of distinct affordable trades in the active window.
    #[must_use]
    pub fn choices_at(&self, inventory: &Inventory, trades_made: u8) -> usize {
        self.available_trades(inventory, trades_made).count()
    }

    /// Replay `trades` from the starting inventory under window gating.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] when the sequence is too long, uses a trade
    /// outside its window, or cannot afford a step.
    pub fn replay(&self, trades: &[Trade]) -> Result<Inventory, ReplayError> {
        if trades.len() > usize::from(self.max_trades) {
            return Err(ReplayError::TooManyTrades {
                len: trades.len(),
                max: self.max_trades,
            });
        }
        let mut inventory = self.inventory;
        for (step, trade) in trades.iter().enumerate() {
            let made = u8::try_from(step).unwrap_or(u8::MAX);
            let active = self.window_at(made);
            if trade.window != active {
                return Err(ReplayError::WindowClosed {
                    step,
                    window: trade.window.key(),
                    active: active.key(),
                });
            }
            inventory = trade
                .apply(&inventory)
                .ok_or_else(|| ReplayError::Unaffordable {
                    step,
                    trade: trade.to_string(),
                })?;
        }
        Ok(inventory)
    }

    /// Replay the reference solution and confirm it reaches the goal.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] when the solution is not a valid winning line.
    pub fn replay_solution(&self) -> Result<Inventory, ReplayError> {
        let end = self.replay(&self.solution)?;
        if !self.is_solved(&end) {
            return Err(ReplayError::GoalNotReached {
                have: end.get(self.goal.good),
                want: self.goal.qty,
            });
        }
        Ok(end)
    }

    /// Largest quantity anywhere in the puzzle definition.
    #[must_use]
    pub fn max_trade_quantity(&self) -> u8 {
        self.trades
            .iter()
            .chain(&self.solution)
            .map(Trade::max_quantity)
            .chain([self.goal.qty, self.inventory.max_quantity()])
            .max()
            .unwrap_or(0)
    }

    /// Every structural invariant this puzzle violates, as readable messages.
    ///
    /// Covers solvability, key uniqueness, window shape and quantity bounds.
    /// `par == solution.len()` is only promised for accepted puzzles, so it
    /// is not checked here.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if let Err(err) = self.replay_solution() {
            failures.push(format!("solution does not replay: {err}"));
        }
        let mut keys = HashSet::new();
        for trade in &self.trades {
            if !keys.insert(trade.key()) {
                failures.push(format!("duplicate trade {}", trade.key()));
            }
        }
        for trade in &self.solution {
            if !keys.contains(&trade.key()) {
                failures.push(format!("solution trade {} missing from pool", trade.key()));
            }
        }
        if self.early_window_trades >= self.max_trades {
            failures.push(format!(
                "early window {} is not below max trades {}",
                self.early_window_trades, self.max_trades
            ));
        }
        let quantities_ok = self
            .trades
            .iter()
            .flat_map(|trade| trade.give.iter().chain(std::iter::once(&trade.get)))
            .all(|side| (1..=QUANTITY_CAP).contains(&side.qty));
        if !quantities_ok || !(1..=QUANTITY_CAP).contains(&self.goal.qty) {
            failures.push("quantity outside [1, 200]".to_string());
        }
        if self.goal.good.tier() != crate::goods::Tier::Rare {
            failures.push(format!("goal {} is not a rare good", self.goal.good));
        }
        failures
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::goods::by_id;
    use crate::trade::TradeSide;

    fn trade(give: (GoodId, u8), get: (GoodId, u8), stage: u8, window: Window) -> Trade {
        let mut trade = Trade::simple(
            TradeSide::new(give.0, give.1),
            TradeSide::new(get.0, get.1),
            stage,
        );
        trade.window = window;
        trade
    }

    /// Hand-built three-step puzzle: wheat -> iron -> salt -> silk with a
    /// one-trade early window.
    pub(crate) fn tiny_puzzle() -> BarterPuzzle {
        let s1 = trade((GoodId::Wheat, 4), (GoodId::Iron, 2), 1, Window::Early);
        let mut s2 = trade((GoodId::Iron, 2), (GoodId::Salt, 2), 2, Window::Late);
        s2.add_give(GoodId::Clay, 1);
        let mut s3 = trade((GoodId::Salt, 2), (GoodId::Silk, 1), 3, Window::Late);
        s3.add_give(GoodId::Clay, 1);
        let decoy = trade((GoodId::Wheat, 2), (GoodId::Clay, 1), 1, Window::Early);
        let mut variant = s1.clone();
        variant.add_give(GoodId::Clay, 1);
        variant.is_variant = true;
        let solution = vec![s1, s2, s3];
        let mut trades = solution.clone();
        trades.push(decoy);
        trades.push(variant);
        BarterPuzzle {
            seed: 0,
            goods: [GoodId::Wheat, GoodId::Clay, GoodId::Iron, GoodId::Salt, GoodId::Silk]
                .iter()
                .map(|id| *by_id(*id))
                .collect(),
            inventory: Inventory::empty()
                .with(GoodId::Wheat, 4)
                .with(GoodId::Clay, 3),
            goal: Goal {
                good: GoodId::Silk,
                qty: 1,
            },
            trades,
            solution,
            par: 3,
            max_trades: 6,
            early_window_trades: 1,
        }
    }
}
