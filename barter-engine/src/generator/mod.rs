//! Deterministic puzzle generation.
//!
//! Each attempt builds a candidate from a derived seed, then proves its
//! difficulty with the state-space search:
//!
//! 1. pick goods and a target chain length
//! 2. build the resource chain and synthesize exact quantities
//! 3. add distractors, tag windows and charge late fees
//! 4. inject costlier variants so early steps offer real choices
//! 5. assess with breadth-first search and accept, score, or retry
//!
//! The first accepted candidate wins. If none is accepted, the best scored
//! candidate is returned, and as a last resort the very first candidate.

pub mod distractors;
pub mod path;
pub mod search;
pub mod synth;
pub mod variants;
pub mod windows;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::constants::{
    ATTEMPT_SEED_STRIDE, GOAL_QTY_MAX, GOAL_QTY_MIN, SCORE_IN_RANGE_BONUS,
    SCORE_PAR_DISTANCE_PENALTY, SCORE_PAR_MATCH_BONUS, SCORE_PER_EARLY_PATH,
    SCORE_PER_OPENING_CHOICE, SCORE_PER_SOLUTION,
};
use crate::goods::{GoodId, Tier, by_id, by_tier, in_catalog_order};
use crate::inventory::Inventory;
use crate::numbers::{len_to_u8, len_to_u32};
use crate::puzzle::{BarterPuzzle, Goal};
use crate::rng::SeededRng;
use crate::trade::{TradePool, Window};

use distractors::DistractorContext;
use variants::VariantPlan;

/// Goods chosen for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    goal: GoodId,
    reserved: GoodId,
    /// Every good in play, goal and reserved included, in catalog order.
    goods: Vec<GoodId>,
}

/// An unvalidated puzzle plus the knobs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub puzzle: BarterPuzzle,
    /// Chain length the candidate was built for.
    pub configured_par: u8,
    pub goal_bump: u8,
}

/// Search-derived measurements of a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub shortest: Option<u8>,
    pub early_paths: u32,
    pub solution_paths: u32,
    pub opening_choices: u32,
    pub choices_ok: bool,
    pub early_variant: bool,
    pub late_variant: bool,
    pub late_goal_trade: bool,
    pub invariants_ok: bool,
}

/// How the returned puzzle was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Accepted { attempt: u16, goal_bump: u8 },
    Scored { score: i64 },
    Fallback,
}

impl GenerationOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted { .. } => "accepted",
            Self::Scored { .. } => "scored",
            Self::Fallback => "fallback",
        }
    }
}

/// The generated puzzle and how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub puzzle: BarterPuzzle,
    pub outcome: GenerationOutcome,
    pub candidates_examined: u32,
}

/// Seeds tried for `base`: attempt `n` uses `base + n * 1_000_003`.
pub fn attempt_seeds(base: u64, attempts: u16) -> impl Iterator<Item = (u16, u64)> {
    (0..attempts).map(move |attempt| {
        let offset = u64::from(attempt).wrapping_mul(ATTEMPT_SEED_STRIDE);
        (attempt, base.wrapping_add(offset))
    })
}

/// Generate a puzzle for `seed`.
///
/// Always returns a puzzle. Callers that need the validated guarantees
/// should check [`Generation::outcome`].
#[must_use]
pub fn generate(seed: u64, cfg: &GeneratorConfig) -> Generation {
    generate_with(seed, cfg, generate_candidate)
}

/// Bounded search over candidates produced by `build`.
fn generate_with<F>(seed: u64, cfg: &GeneratorConfig, build: F) -> Generation
where
    F: Fn(u64, u8, &GeneratorConfig) -> Candidate,
{
    let mut examined = 0_u32;
    let mut first: Option<Candidate> = None;
    let mut best: Option<(i64, Candidate)> = None;

    for (attempt, attempt_seed) in attempt_seeds(seed, cfg.attempts) {
        for goal_bump in 0..=cfg.goal_qty_bumps {
            let candidate = build(attempt_seed, goal_bump, cfg);
            let assessment = assess(&candidate.puzzle, cfg);
            examined += 1;
            debug!(
                "attempt {attempt} bump {goal_bump}: par {} shortest {:?} solutions {} opening {}",
                candidate.configured_par,
                assessment.shortest,
                assessment.solution_paths,
                assessment.opening_choices
            );

            if accepts(&candidate, &assessment, cfg) {
                let mut puzzle = candidate.puzzle;
                if let Some(shortest) = assessment.shortest {
                    puzzle.par = shortest;
                }
                info!(
                    "seed {seed}: accepted attempt {attempt} bump {goal_bump} (par {}, {} candidates)",
                    puzzle.par, examined
                );
                return Generation {
                    puzzle,
                    outcome: GenerationOutcome::Accepted { attempt, goal_bump },
                    candidates_examined: examined,
                };
            }

            if let Some(value) = score(&candidate, &assessment, cfg)
                && best.as_ref().is_none_or(|(top, _)| value > *top)
            {
                best = Some((value, candidate.clone()));
            }
            if first.is_none() {
                first = Some(candidate);
            }
        }
    }

    if let Some((value, candidate)) = best {
        let mut puzzle = candidate.puzzle;
        adopt_shortest_solution(&mut puzzle);
        info!(
            "seed {seed}: no candidate accepted, using best score {value} (par {}, {} candidates)",
            puzzle.par, examined
        );
        return Generation {
            puzzle,
            outcome: GenerationOutcome::Scored { score: value },
            candidates_examined: examined,
        };
    }

    warn!("seed {seed}: no candidate scored, falling back to the first candidate");
    let puzzle = match first {
        Some(candidate) => candidate.puzzle,
        None => build(seed, 0, cfg).puzzle,
    };
    info!("seed {seed}: fallback puzzle after {examined} candidates");
    Generation {
        puzzle,
        outcome: GenerationOutcome::Fallback,
        candidates_examined: examined,
    }
}

/// Replace the reference solution with a proven shortest one and set par.
fn adopt_shortest_solution(puzzle: &mut BarterPuzzle) {
    let Some(path) = search::shortest_path(puzzle) else {
        return;
    };
    let solution: Vec<_> = path
        .iter()
        .filter_map(|index| puzzle.trades.get(*index).cloned())
        .collect();
    if solution.len() == path.len() {
        puzzle.par = len_to_u8(solution.len());
        puzzle.solution = solution;
    }
}

/// Build one candidate from a seed and a goal quantity bump.
#[must_use]
pub fn generate_candidate(seed: u64, goal_bump: u8, cfg: &GeneratorConfig) -> Candidate {
    let mut rng = SeededRng::new(seed);
    let selection = select_goods(&mut rng);
    let par = rng.int_between(cfg.par_min, cfg.par_max);
    let early_window_trades = GeneratorConfig::early_window_for(par);

    let chain = path::build_path(
        &mut rng,
        &selection.goods,
        par,
        selection.goal,
        Some(selection.reserved),
    );
    let goal_qty = rng
        .int_between(GOAL_QTY_MIN, GOAL_QTY_MAX)
        .saturating_add(goal_bump);
    let synthesis = synth::synthesize(&mut rng, &chain, goal_qty, cfg.safe_trade_quantity);
    let start_qty = synthesis.start_qty();
    let mut solution = synthesis.solution;

    let mut taken = TradePool::new();
    for trade in &solution {
        taken.insert(trade.clone());
    }
    let mut extras = distractors::generate(
        &mut rng,
        &DistractorContext {
            chain: &chain,
            solution: &solution,
            reserved: selection.reserved,
            goal: selection.goal,
        },
        cfg.distractor_count,
        &taken,
    );

    let fees = windows::assign(
        &mut rng,
        &mut solution,
        &mut extras,
        early_window_trades,
        selection.reserved,
        &selection.goods,
    );
    let mut inventory = Inventory::empty();
    if let Some(start) = chain.first() {
        inventory.add(*start, u32::from(start_qty));
    }
    for (good, qty) in fees.iter() {
        inventory.add(good, u32::from(qty));
    }

    let mut pool = TradePool::new();
    for trade in &solution {
        pool.insert(trade.clone());
    }
    for trade in extras {
        pool.insert(trade);
    }
    let report = variants::inject(
        &mut rng,
        &mut pool,
        &mut inventory,
        &VariantPlan {
            solution: &solution,
            reserved: selection.reserved,
            early_window_trades,
            choice_depth: cfg.choice_depth,
            min_choices: cfg.min_choices_per_step,
        },
    );
    debug!(
        "seed {seed}: chain of {} goods, {} variants, {} decoys, divisor {}",
        chain.len(),
        report.variants,
        report.decoys,
        synthesis.rescale_divisor
    );

    let mut trades = pool.into_trades();
    rng.shuffle(&mut trades);

    Candidate {
        puzzle: BarterPuzzle {
            seed,
            goods: selection.goods.iter().map(|id| *by_id(*id)).collect(),
            inventory,
            goal: Goal {
                good: selection.goal,
                qty: synthesis.goal_qty,
            },
            trades,
            solution,
            par,
            max_trades: cfg.max_trades,
            early_window_trades,
        },
        configured_par: par,
        goal_bump,
    }
}

/// Goal is a rare good, reserved is a common good, and five to eight of the
/// remaining goods join them. At least one common good besides the reserved
/// one is always kept so the chain has a starting point.
fn select_goods(rng: &mut SeededRng) -> Selection {
    let rares = by_tier(Tier::Rare);
    let commons = by_tier(Tier::Common);
    let goal = rng.pick(&rares).copied().unwrap_or(GoodId::Amber);
    let reserved = rng.pick(&commons).copied().unwrap_or(GoodId::Clay);

    let mut others: Vec<GoodId> = GoodId::ALL
        .iter()
        .copied()
        .filter(|good| *good != goal && *good != reserved)
        .collect();
    rng.shuffle(&mut others);
    let keep = rng.int_between(5, others.len());
    let mut kept: Vec<GoodId> = others.iter().copied().take(keep).collect();
    if !kept.iter().any(|good| good.tier() == Tier::Common)
        && let Some(common) = others.iter().copied().find(|good| good.tier() == Tier::Common)
    {
        kept.push(common);
    }
    kept.push(goal);
    kept.push(reserved);

    Selection {
        goal,
        reserved,
        goods: in_catalog_order(&kept),
    }
}

/// Measure a candidate with the state-space search.
#[must_use]
pub fn assess(puzzle: &BarterPuzzle, cfg: &GeneratorConfig) -> Assessment {
    let shortest = search::shortest_path_length(puzzle);
    if shortest.is_none() {
        return Assessment::default();
    }
    let has_variant = |window: Window| {
        puzzle
            .trades
            .iter()
            .any(|trade| trade.is_variant && trade.window == window)
    };
    Assessment {
        shortest,
        early_paths: search::count_paths_to_stage(
            puzzle,
            puzzle.early_window_trades,
            cfg.early_path_cap,
        ),
        solution_paths: search::count_solutions(puzzle, cfg.solution_count_cap),
        opening_choices: len_to_u32(puzzle.choices_at(&puzzle.inventory, 0)),
        choices_ok: search::has_choices_on_solution(
            puzzle,
            cfg.choice_depth,
            cfg.min_choices_per_step,
        ),
        early_variant: has_variant(Window::Early),
        late_variant: has_variant(Window::Late),
        late_goal_trade: puzzle
            .trades
            .iter()
            .any(|trade| trade.window == Window::Late && trade.get.good == puzzle.goal.good),
        invariants_ok: puzzle.check_invariants().is_empty(),
    }
}

/// Whether a candidate meets every acceptance criterion.
#[must_use]
pub fn accepts(candidate: &Candidate, assessment: &Assessment, cfg: &GeneratorConfig) -> bool {
    let Some(shortest) = assessment.shortest else {
        return false;
    };
    cfg.par_in_range(shortest)
        && cfg.par_in_range(candidate.configured_par)
        && usize::from(shortest) == candidate.puzzle.solution.len()
        && assessment.early_paths >= 1
        && assessment.solution_paths >= 2
        && assessment.opening_choices >= 2
        && assessment.choices_ok
        && assessment.early_variant
        && assessment.late_variant
        && assessment.late_goal_trade
        && assessment.invariants_ok
}

/// Ranking used when no candidate is accepted. `None` for candidates that
/// are unsolvable or lack branching along the solution.
#[must_use]
pub fn score(candidate: &Candidate, assessment: &Assessment, cfg: &GeneratorConfig) -> Option<i64> {
    let shortest = assessment.shortest?;
    if !assessment.choices_ok {
        return None;
    }
    let mut total = 0_i64;
    if cfg.par_in_range(shortest) {
        total += SCORE_IN_RANGE_BONUS;
    }
    if usize::from(shortest) == candidate.puzzle.solution.len() {
        total += SCORE_PAR_MATCH_BONUS;
    }
    total += SCORE_PER_OPENING_CHOICE * i64::from(assessment.opening_choices);
    total += SCORE_PER_SOLUTION * i64::from(assessment.solution_paths.min(cfg.solution_count_cap));
    total += SCORE_PER_EARLY_PATH * i64::from(assessment.early_paths);
    let distance = i64::from(shortest.abs_diff(candidate.configured_par));
    total -= SCORE_PAR_DISTANCE_PENALTY * distance;
    Some(total)
}
