//! Backward quantity synthesis for the solution chain.
//!
//! Quantities are computed from the goal back to the start so every trade
//! yields exactly what the next one consumes. All arithmetic runs in `u32`
//! and is only narrowed once the whole chain fits under the safe ceiling.

use log::debug;
use std::cmp::Ordering;

use crate::goods::{GOOD_COUNT, GoodId, Tier};
use crate::numbers::{ceil_div, clamp_to_u8, len_to_u8};
use crate::rng::SeededRng;
use crate::trade::{Trade, TradeSide};

/// Solution trades for a chain, plus the goal quantity they produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// One trade per chain edge, `stage = index + 1`, all in the early window.
    pub solution: Vec<Trade>,
    pub goal_qty: u8,
    /// Factor every quantity was divided by; `1` when no rescale fired.
    pub rescale_divisor: u32,
}

impl Synthesis {
    /// Quantity of the first chain good the player must start with.
    #[must_use]
    pub fn start_qty(&self) -> u8 {
        self.solution.first().map_or(0, |trade| trade.primary().qty)
    }
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    source: GoodId,
    target: GoodId,
    give: u32,
    get: u32,
}

/// Turn `chain` into exact trades ending in `goal_qty` of its last good.
///
/// Each edge yields the whole downstream need in one trade, so the chain
/// is walked once and the solution has exactly one trade per edge.
/// Repeated goods always carry strictly less at their earlier position, so
/// holding a good early never satisfies a later step. Oversized chains are
/// divided down until the largest quantity is at most `safe_quantity`.
pub fn synthesize(
    rng: &mut SeededRng,
    chain: &[GoodId],
    goal_qty: u8,
    safe_quantity: u8,
) -> Synthesis {
    let mut later_min: [Option<u32>; GOOD_COUNT] = [None; GOOD_COUNT];
    let mut edges = Vec::with_capacity(chain.len().saturating_sub(1));
    let mut need = u32::from(goal_qty.max(1));

    for pair in chain.windows(2).rev() {
        let &[source, target] = pair else {
            continue;
        };
        let get = need;
        let mut give = tier_cost(rng, source.tier(), target.tier(), get);
        let slot = &mut later_min[source.index()];
        if let Some(limit) = *slot
            && give >= limit
            && limit >= 2
        {
            give = limit - 1;
        }
        *slot = Some(slot.map_or(give, |seen| seen.min(give)));
        edges.push(Edge {
            source,
            target,
            give,
            get,
        });
        need = give;
    }
    edges.reverse();

    let mut goal = u32::from(goal_qty.max(1));
    let rescale_divisor = rescale(&mut edges, &mut goal, u32::from(safe_quantity.max(1)));

    let solution = edges
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            Trade::simple(
                TradeSide::new(edge.source, clamp_to_u8(edge.give)),
                TradeSide::new(edge.target, clamp_to_u8(edge.get)),
                len_to_u8(index + 1),
            )
        })
        .collect();

    Synthesis {
        solution,
        goal_qty: clamp_to_u8(goal),
        rescale_divisor,
    }
}

/// Give quantity for one edge given what it must yield.
///
/// Moving toward a scarcer tier multiplies by `2 * gap` plus up to two;
/// staying in a tier costs the same or one more; moving toward a more
/// common tier divides, rounding up.
fn tier_cost(rng: &mut SeededRng, source: Tier, target: Tier, get: u32) -> u32 {
    match target.rank().cmp(&source.rank()) {
        Ordering::Greater => {
            let gap = u32::from(target.rank() - source.rank());
            let factor = 2 * gap + rng.int_between(0_u32, 2);
            get.saturating_mul(factor)
        }
        Ordering::Equal => get.saturating_add(rng.int_between(0_u32, 1)),
        Ordering::Less => {
            let gap = u32::from(source.rank() - target.rank());
            let divisor = gap + 1 + rng.int_between(0_u32, 1);
            ceil_div(get, divisor).max(1)
        }
    }
}

/// Divide every quantity by a common factor when the largest exceeds
/// `safe`. Ceiling division keeps `get[i] == give[i + 1]` intact.
fn rescale(edges: &mut [Edge], goal: &mut u32, safe: u32) -> u32 {
    let largest = edges
        .iter()
        .flat_map(|edge| [edge.give, edge.get])
        .chain(std::iter::once(*goal))
        .max()
        .unwrap_or(0);
    if largest <= safe {
        return 1;
    }
    let divisor = ceil_div(largest, safe);
    debug!("rescaling chain quantities: largest {largest} > {safe}, dividing by {divisor}");
    for edge in edges.iter_mut() {
        edge.give = ceil_div(edge.give, divisor);
        edge.get = ceil_div(edge.get, divisor);
    }
    *goal = ceil_div(*goal, divisor);
    divisor
}
