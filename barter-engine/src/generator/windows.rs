//! Early/late window tagging and late-window fees.

use crate::constants::{DISTRACTOR_EARLY_BIAS, FEE_MAX, FEE_MIN};
use crate::goods::{GoodId, Tier};
use crate::inventory::Inventory;
use crate::numbers::len_to_u8;
use crate::rng::SeededRng;
use crate::trade::{Trade, Window};

/// Tag every trade with a window and charge a fee on late trades.
///
/// Solution trades follow their position: the first `early_window_trades`
/// are early, the rest late. Distractors lean early. Returns the fees the
/// solution itself pays, which the starting inventory must cover.
pub fn assign(
    rng: &mut SeededRng,
    solution: &mut [Trade],
    distractors: &mut [Trade],
    early_window_trades: u8,
    reserved: GoodId,
    in_play: &[GoodId],
) -> Inventory {
    let mut solution_fees = Inventory::empty();
    for (index, trade) in solution.iter_mut().enumerate() {
        trade.window = Window::for_step(len_to_u8(index), early_window_trades);
        if let Some((good, qty)) = charge_fee(rng, trade, reserved, in_play) {
            solution_fees.add(good, u32::from(qty));
        }
    }
    for trade in distractors.iter_mut() {
        trade.window = if rng.chance(DISTRACTOR_EARLY_BIAS) {
            Window::Early
        } else {
            Window::Late
        };
        charge_fee(rng, trade, reserved, in_play);
    }
    solution_fees
}

/// Add a fee side to a late trade; early trades are left untouched.
fn charge_fee(
    rng: &mut SeededRng,
    trade: &mut Trade,
    reserved: GoodId,
    in_play: &[GoodId],
) -> Option<(GoodId, u8)> {
    if trade.window != Window::Late {
        return None;
    }
    let good = fee_good(trade, reserved, in_play)?;
    let qty = rng.int_between(FEE_MIN, FEE_MAX);
    trade.add_give(good, qty);
    Some((good, qty))
}

/// The reserved good, or the first common good in play the trade does not
/// touch.
fn fee_good(trade: &Trade, reserved: GoodId, in_play: &[GoodId]) -> Option<GoodId> {
    if !trade.uses(reserved) {
        return Some(reserved);
    }
    in_play
        .iter()
        .copied()
        .find(|good| good.tier() == Tier::Common && !trade.uses(*good))
}
