//! Resource chain construction.
//!
//! The chain is intentionally permissive: it only guarantees its shape
//! (common start, goal at the end, requested length). Whether the puzzle
//! built on top of it has the desired difficulty is proven later by the
//! state-space search.

use crate::goods::{GoodId, Tier};
use crate::rng::SeededRng;

/// Build a chain of `par + 1` goods from a common good to `goal`.
///
/// `reserved` is kept out of the chain so later stages can use it as a fee
/// and decoy target. Intermediate goods are duplicated (never next to a
/// copy of themselves) until the requested length is met.
pub fn build_path(
    rng: &mut SeededRng,
    goods: &[GoodId],
    par: u8,
    goal: GoodId,
    reserved: Option<GoodId>,
) -> Vec<GoodId> {
    let eligible: Vec<GoodId> = goods
        .iter()
        .copied()
        .filter(|good| *good != goal && Some(*good) != reserved)
        .collect();
    let start = pick_start(rng, &eligible, goal, reserved);

    let body_len = usize::from(par.max(1));
    let mut rest: Vec<GoodId> = eligible
        .iter()
        .copied()
        .filter(|good| *good != start)
        .collect();
    rng.shuffle(&mut rest);

    let mut chain = Vec::with_capacity(body_len + 1);
    chain.push(start);
    chain.extend(rest.into_iter().take(body_len.saturating_sub(1)));
    while chain.len() < body_len {
        insert_duplicate(rng, &mut chain, goods, goal);
    }
    chain.push(goal);
    chain
}

fn pick_start(
    rng: &mut SeededRng,
    eligible: &[GoodId],
    goal: GoodId,
    reserved: Option<GoodId>,
) -> GoodId {
    let commons: Vec<GoodId> = eligible
        .iter()
        .copied()
        .filter(|good| good.tier() == Tier::Common)
        .collect();
    if let Some(start) = rng.pick(&commons) {
        return *start;
    }
    if let Some(start) = rng.pick(eligible) {
        return *start;
    }
    GoodId::ALL
        .iter()
        .copied()
        .find(|good| good.tier() == Tier::Common && *good != goal && Some(*good) != reserved)
        .unwrap_or(GoodId::Wheat)
}

/// Insert one more copy of an intermediate good at a non-adjacent position.
///
/// Falls back to any good other than the goal when no intermediate can be
/// placed, and as a last resort repeats the final good.
fn insert_duplicate(rng: &mut SeededRng, chain: &mut Vec<GoodId>, goods: &[GoodId], goal: GoodId) {
    let intermediates: Vec<GoodId> = chain.iter().skip(1).copied().collect();
    let mut placements = placements_for(chain, &intermediates);
    if placements.is_empty() {
        let fallback: Vec<GoodId> = goods
            .iter()
            .copied()
            .filter(|good| *good != goal)
            .collect();
        placements = placements_for(chain, &fallback);
    }
    match rng.pick(&placements) {
        Some(&(good, position)) => chain.insert(position, good),
        None => {
            let last = chain.last().copied().unwrap_or(GoodId::Wheat);
            chain.push(last);
        }
    }
}

/// Every `(good, insert_index)` that does not touch a copy of `good`.
/// Index 0 is excluded so the starting good stays first.
fn placements_for(chain: &[GoodId], candidates: &[GoodId]) -> Vec<(GoodId, usize)> {
    let mut distinct = candidates.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    let mut placements = Vec::new();
    for good in distinct {
        for position in 1..=chain.len() {
            let before = chain.get(position - 1).copied();
            let after = chain.get(position).copied();
            if before != Some(good) && after != Some(good) {
                placements.push((good, position));
            }
        }
    }
    placements
}
