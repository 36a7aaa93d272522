//! Plausible but unhelpful trades mixed into the pool.
//!
//! Two techniques are used: reversing a chain step at a poor return rate,
//! and converting a chain good into something already behind the player.
//! Both only ever move a player backwards along the chain.

use std::collections::HashSet;

use crate::constants::{
    DISTRACTOR_DRAW_LIMIT, NOISE_MIN_RATIO, REVERSAL_RETURN_MAX, REVERSAL_RETURN_MIN,
};
use crate::goods::{GOOD_COUNT, GoodId};
use crate::numbers::{len_to_u8, scale_down};
use crate::rng::SeededRng;
use crate::trade::{Trade, TradeKey, TradePool, TradeSide};

/// What the distractor generator knows about the solution.
#[derive(Debug, Clone, Copy)]
pub struct DistractorContext<'a> {
    /// Full chain, goal last.
    pub chain: &'a [GoodId],
    /// Solution trades; `solution[i]` moves `chain[i]` to `chain[i + 1]`.
    pub solution: &'a [Trade],
    /// Good kept off the chain, always a legal noise target.
    pub reserved: GoodId,
    pub goal: GoodId,
}

impl DistractorContext<'_> {
    /// Last chain position at which each good is traded away.
    fn last_positions(&self) -> [Option<usize>; GOOD_COUNT] {
        let mut last = [None; GOOD_COUNT];
        for (position, trade) in self.solution.iter().enumerate() {
            last[trade.primary().good.index()] = Some(position);
        }
        last
    }

    /// Quantity of `chain[position]` held when the player reaches it.
    fn held_at(&self, position: usize) -> u32 {
        self.solution
            .get(position)
            .map_or(0, |trade| u32::from(trade.primary().qty))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Technique {
    Reversal,
    Noise,
}

/// Draw up to `count` distractors whose keys collide neither with `taken`
/// nor with each other.
pub fn generate(
    rng: &mut SeededRng,
    ctx: &DistractorContext<'_>,
    count: u8,
    taken: &TradePool,
) -> Vec<Trade> {
    let last = ctx.last_positions();
    let reversals = reversal_positions(ctx, &last);
    let noise = noise_positions(ctx, &last);
    let mut out = Vec::new();
    let mut seen: HashSet<TradeKey> = HashSet::new();

    for _ in 0..DISTRACTOR_DRAW_LIMIT {
        if out.len() >= usize::from(count) || (reversals.is_empty() && noise.is_empty()) {
            break;
        }
        let technique = match (reversals.is_empty(), noise.is_empty()) {
            (false, true) => Technique::Reversal,
            (true, false) => Technique::Noise,
            _ if rng.chance(0.5) => Technique::Reversal,
            _ => Technique::Noise,
        };
        let candidate = match technique {
            Technique::Reversal => rng
                .pick(&reversals)
                .copied()
                .and_then(|position| reversal(rng, ctx, position)),
            Technique::Noise => rng
                .pick(&noise)
                .copied()
                .and_then(|position| noise_trade(rng, ctx, &last, position)),
        };
        let Some(trade) = candidate else {
            continue;
        };
        let key = trade.key();
        if taken.contains(&key) || !seen.insert(key) {
            continue;
        }
        out.push(trade);
    }
    out
}

/// Edges whose source good never reappears later, excluding the goal edge.
fn reversal_positions(ctx: &DistractorContext<'_>, last: &[Option<usize>; GOOD_COUNT]) -> Vec<usize> {
    let edges = ctx.solution.len();
    (0..edges.saturating_sub(1))
        .filter(|&position| {
            ctx.chain
                .get(position)
                .is_some_and(|good| last[good.index()] == Some(position))
        })
        .collect()
}

/// Positions holding at least two units of a good that is not needed later.
fn noise_positions(ctx: &DistractorContext<'_>, last: &[Option<usize>; GOOD_COUNT]) -> Vec<usize> {
    (0..ctx.solution.len())
        .filter(|&position| {
            ctx.held_at(position) >= u32::from(NOISE_MIN_RATIO)
                && ctx.chain.get(position).is_some_and(|good| {
                    *good != ctx.goal && last[good.index()] == Some(position)
                })
        })
        .collect()
}

/// `chain[p + 1] -> chain[p]` returning 40-70% of what the forward step cost.
fn reversal(rng: &mut SeededRng, ctx: &DistractorContext<'_>, position: usize) -> Option<Trade> {
    let forward = ctx.solution.get(position)?;
    let from = forward.get;
    let back_to = forward.primary();
    if from.good == back_to.good {
        return None;
    }
    let pct = rng.float_between(REVERSAL_RETURN_MIN, REVERSAL_RETURN_MAX);
    let returned = scale_down(u32::from(back_to.qty), pct, 1);
    Some(Trade::simple(
        from,
        TradeSide::new(back_to.good, u8::try_from(returned).unwrap_or(u8::MAX)),
        len_to_u8(position + 2),
    ))
}

/// `chain[p]` into the reserved good or a good the chain has already left
/// behind, at a ratio of at least two to one.
fn noise_trade(
    rng: &mut SeededRng,
    ctx: &DistractorContext<'_>,
    last: &[Option<usize>; GOOD_COUNT],
    position: usize,
) -> Option<Trade> {
    let source = *ctx.chain.get(position)?;
    let targets: Vec<GoodId> = GoodId::ALL
        .iter()
        .copied()
        .filter(|good| *good != source && *good != ctx.goal)
        .filter(|good| {
            *good == ctx.reserved || last[good.index()].is_some_and(|seen| seen < position)
        })
        .collect();
    let target = *rng.pick(&targets)?;
    let held = u8::try_from(ctx.held_at(position)).unwrap_or(u8::MAX);
    let give = rng.int_between(NOISE_MIN_RATIO, held);
    let ratio = rng.int_between(NOISE_MIN_RATIO, NOISE_MIN_RATIO + 1);
    let get = (give / ratio).max(1);
    Some(Trade::simple(
        TradeSide::new(source, give),
        TradeSide::new(target, get),
        len_to_u8(position + 1),
    ))
}
