//! Breadth-first exploration of the puzzle's state space.
//!
//! A state is the inventory plus the number of trades made. Because the
//! windows are strictly two-phase, every early step is its own phase and
//! all late steps share one, so `(min(trades, early_window), inventory)`
//! identifies a state for memoization.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::inventory::Inventory;
use crate::numbers::{len_to_u32, len_to_u8};
use crate::puzzle::BarterPuzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    phase: u8,
    inventory: Inventory,
}

impl StateKey {
    fn new(puzzle: &BarterPuzzle, trades_made: u8, inventory: Inventory) -> Self {
        Self {
            phase: trades_made.min(puzzle.early_window_trades),
            inventory,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    inventory: Inventory,
    trades_made: u8,
    parent: Option<usize>,
    via: usize,
}

/// Pool indices and resulting inventories reachable in one trade.
fn successors<'a>(
    puzzle: &'a BarterPuzzle,
    inventory: &'a Inventory,
    trades_made: u8,
) -> impl Iterator<Item = (usize, Inventory)> + 'a {
    puzzle
        .available_trades(inventory, trades_made)
        .filter_map(move |(index, trade)| trade.apply(inventory).map(|next| (index, next)))
}

/// Pool indices of a shortest winning sequence, or `None` when the goal
/// cannot be reached within `max_trades`.
#[must_use]
pub fn shortest_path(puzzle: &BarterPuzzle) -> Option<Vec<usize>> {
    if puzzle.is_solved(&puzzle.inventory) {
        return Some(Vec::new());
    }
    let mut nodes = vec![Node {
        inventory: puzzle.inventory,
        trades_made: 0,
        parent: None,
        via: 0,
    }];
    let mut best: HashMap<StateKey, u8> = HashMap::new();
    best.insert(StateKey::new(puzzle, 0, puzzle.inventory), 0);
    let mut queue = VecDeque::from([0_usize]);

    while let Some(current) = queue.pop_front() {
        let Some(node) = nodes.get(current).copied() else {
            continue;
        };
        if node.trades_made >= puzzle.max_trades {
            continue;
        }
        let next_made = node.trades_made + 1;
        for (via, next) in successors(puzzle, &node.inventory, node.trades_made) {
            if puzzle.is_solved(&next) {
                return Some(trace(&nodes, current, via));
            }
            let key = StateKey::new(puzzle, next_made, next);
            if best.get(&key).is_some_and(|seen| *seen <= next_made) {
                continue;
            }
            best.insert(key, next_made);
            nodes.push(Node {
                inventory: next,
                trades_made: next_made,
                parent: Some(current),
                via,
            });
            queue.push_back(nodes.len() - 1);
        }
    }
    None
}

fn trace(nodes: &[Node], mut at: usize, last: usize) -> Vec<usize> {
    let mut path = vec![last];
    while let Some(node) = nodes.get(at) {
        let Some(parent) = node.parent else {
            break;
        };
        path.push(node.via);
        at = parent;
    }
    path.reverse();
    path
}

/// Length of the shortest winning sequence.
#[must_use]
pub fn shortest_path_length(puzzle: &BarterPuzzle) -> Option<u8> {
    shortest_path(puzzle).map(|path| len_to_u8(path.len()))
}

/// Distinct inventories reachable after exactly `stage` trades, capped.
#[must_use]
pub fn count_paths_to_stage(puzzle: &BarterPuzzle, stage: u8, cap: u32) -> u32 {
    let stage = stage.min(puzzle.max_trades);
    let mut frontier = vec![puzzle.inventory];
    for made in 0..stage {
        let mut seen = HashSet::new();
        let mut next_layer = Vec::new();
        for inventory in &frontier {
            for (_, next) in successors(puzzle, inventory, made) {
                if seen.insert(next) {
                    next_layer.push(next);
                }
            }
        }
        if next_layer.is_empty() {
            return 0;
        }
        frontier = next_layer;
    }
    len_to_u32(frontier.len()).min(cap)
}

/// Winning transitions found layer by layer, stopping at `cap`.
///
/// Each layer is deduplicated by inventory and goal states are not
/// expanded, so the count approximates distinct solutions.
#[must_use]
pub fn count_solutions(puzzle: &BarterPuzzle, cap: u32) -> u32 {
    if cap == 0 {
        return 0;
    }
    if puzzle.is_solved(&puzzle.inventory) {
        return 1;
    }
    let mut count = 0_u32;
    let mut frontier = vec![puzzle.inventory];
    for made in 0..puzzle.max_trades {
        let mut seen = HashSet::new();
        let mut next_layer = Vec::new();
        for inventory in &frontier {
            for (_, next) in successors(puzzle, inventory, made) {
                if puzzle.is_solved(&next) {
                    count += 1;
                    if count >= cap {
                        return cap;
                    }
                } else if seen.insert(next) {
                    next_layer.push(next);
                }
            }
        }
        if next_layer.is_empty() {
            break;
        }
        frontier = next_layer;
    }
    count
}

/// Whether the first `depth` steps of the reference solution each offer at
/// least `min_choices` affordable trades.
#[must_use]
pub fn has_choices_on_solution(puzzle: &BarterPuzzle, depth: u8, min_choices: u8) -> bool {
    let mut inventory = puzzle.inventory;
    for (step, trade) in puzzle.solution.iter().take(usize::from(depth)).enumerate() {
        let made = len_to_u8(step);
        if puzzle.choices_at(&inventory, made) < usize::from(min_choices) {
            return false;
        }
        if !puzzle.is_trade_available(trade, made) {
            return false;
        }
        match trade.apply(&inventory) {
            Some(next) => inventory = next,
            None => return false,
        }
    }
    true
}
