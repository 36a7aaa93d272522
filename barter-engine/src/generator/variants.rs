//! Branching guarantees along the reference solution.
//!
//! Along the first few solution steps the pool must offer at least
//! `min_choices` affordable trades. When it falls short, a costlier variant
//! of the solution trade is added: same get side, plus a surcharge paid in
//! the reserved good. The surcharge is pre-funded in the starting
//! inventory so the variant is always affordable on the solution line.

use crate::constants::{VARIANT_SURCHARGE_MAX, VARIANT_SURCHARGE_MIN};
use crate::goods::GoodId;
use crate::inventory::Inventory;
use crate::numbers::len_to_u8;
use crate::rng::SeededRng;
use crate::trade::{Trade, TradePool, TradeSide, Window};

/// Inputs for [`inject`].
#[derive(Debug, Clone, Copy)]
pub struct VariantPlan<'a> {
    pub solution: &'a [Trade],
    pub reserved: GoodId,
    pub early_window_trades: u8,
    pub choice_depth: u8,
    pub min_choices: u8,
}

/// What [`inject`] added to the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionReport {
    pub variants: u8,
    pub decoys: u8,
    pub early_variant: bool,
    pub late_variant: bool,
}

/// Top up choices along the solution and make sure each window carries a
/// costlier variant. `start` is updated with every surcharge added.
pub fn inject(
    rng: &mut SeededRng,
    pool: &mut TradePool,
    start: &mut Inventory,
    plan: &VariantPlan<'_>,
) -> InjectionReport {
    let mut report = InjectionReport::default();
    let depth = usize::from(plan.choice_depth).min(plan.solution.len());

    for step in 0..depth {
        let Some(base) = plan.solution.get(step) else {
            break;
        };
        let Some(state) = state_before(start, plan.solution, step) else {
            break;
        };
        let window = Window::for_step(len_to_u8(step), plan.early_window_trades);
        let choices = pool
            .trades()
            .iter()
            .filter(|trade| trade.window == window && trade.affordable(&state))
            .count();
        for _ in choices..usize::from(plan.min_choices) {
            if add_costlier(rng, pool, start, base, plan.reserved) {
                report.note_variant(window);
            } else if add_decoy(rng, pool, &state, base, plan.reserved) {
                report.decoys = report.decoys.saturating_add(1);
            }
        }
    }

    let early_index = usize::from(plan.early_window_trades);
    if !report.early_variant
        && early_index > 0
        && let Some(base) = plan.solution.first()
        && add_costlier(rng, pool, start, base, plan.reserved)
    {
        report.note_variant(Window::Early);
    }
    if !report.late_variant
        && let Some(base) = plan.solution.get(early_index)
        && add_costlier(rng, pool, start, base, plan.reserved)
    {
        report.note_variant(Window::Late);
    }
    report
}

impl InjectionReport {
    fn note_variant(&mut self, window: Window) {
        self.variants = self.variants.saturating_add(1);
        match window {
            Window::Early => self.early_variant = true,
            Window::Late => self.late_variant = true,
        }
    }
}

/// Inventory on the solution line just before `step`.
fn state_before(start: &Inventory, solution: &[Trade], step: usize) -> Option<Inventory> {
    solution
        .iter()
        .take(step)
        .try_fold(*start, |inventory, trade| trade.apply(&inventory))
}

/// Insert `base` plus a reserved-good surcharge, bumping the surcharge once
/// if the first key is taken. Funds the surcharge on success.
fn add_costlier(
    rng: &mut SeededRng,
    pool: &mut TradePool,
    start: &mut Inventory,
    base: &Trade,
    reserved: GoodId,
) -> bool {
    if base.primary().good == reserved || base.get.good == reserved {
        return false;
    }
    let surcharge = rng.int_between(VARIANT_SURCHARGE_MIN, VARIANT_SURCHARGE_MAX);
    for extra in [surcharge, surcharge.saturating_add(1)] {
        let mut variant = base.clone();
        variant.add_give(reserved, extra);
        variant.is_variant = true;
        if pool.insert(variant) {
            start.add(reserved, u32::from(extra));
            return true;
        }
    }
    false
}

/// Insert a trade that sells part of the current holding for the reserved
/// good in the same window as `base`.
fn add_decoy(
    rng: &mut SeededRng,
    pool: &mut TradePool,
    state: &Inventory,
    base: &Trade,
    reserved: GoodId,
) -> bool {
    let source = base.primary().good;
    if source == reserved {
        return false;
    }
    let held = state.get(source);
    if held == 0 {
        return false;
    }
    let give = rng.int_between(1, (held / 2).max(1));
    let mut decoy = Trade::simple(
        TradeSide::new(source, give),
        TradeSide::new(reserved, 1),
        base.stage,
    );
    decoy.window = base.window;
    pool.insert(decoy)
}
