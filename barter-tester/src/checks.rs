use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Instant;

use barter_engine::{
    BarterEngine, BarterPuzzle, Generation, GenerationOutcome, count_paths_to_stage,
    count_solutions, has_choices_on_solution, shortest_path_length,
};

use crate::targets::PuzzleTarget;

/// Outcome of generating and checking one puzzle.
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleReport {
    pub label: String,
    pub seed: u64,
    pub outcome: &'static str,
    pub candidates_examined: u32,
    pub par: u8,
    pub shortest: Option<u8>,
    pub solutions: u32,
    pub early_paths: u32,
    pub opening_choices: usize,
    pub branching_ok: bool,
    pub trades: usize,
    pub max_quantity: u8,
    pub fingerprint: String,
    pub failures: Vec<String>,
    pub passed: bool,
    pub duration_ms: f64,
}

/// SHA-256 of the puzzle's JSON, hex encoded.
pub fn fingerprint(puzzle: &BarterPuzzle) -> String {
    let json = serde_json::to_vec(puzzle).unwrap_or_default();
    format!("{:x}", Sha256::digest(&json))
}

/// Generate the target's puzzle and re-check every daily guarantee.
pub fn check_target(engine: &BarterEngine, target: &PuzzleTarget, verbose: bool) -> PuzzleReport {
    let started = Instant::now();
    let generation = engine.generate_seed(target.seed);
    let replay = engine.generate_seed(target.seed);
    let mut report = measure(engine, target, &generation);
    if fingerprint(&replay.puzzle) != report.fingerprint {
        report
            .failures
            .push("regenerating the same seed produced a different puzzle".to_string());
    }
    report.passed = report.failures.is_empty();
    report.duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    if verbose {
        log::info!(
            "{}: {} par {} shortest {:?} solutions {} ({:.1} ms)",
            report.label,
            report.outcome,
            report.par,
            report.shortest,
            report.solutions,
            report.duration_ms
        );
    }
    report
}

fn measure(engine: &BarterEngine, target: &PuzzleTarget, generation: &Generation) -> PuzzleReport {
    let cfg = engine.config();
    let puzzle = &generation.puzzle;
    let shortest = shortest_path_length(puzzle);
    let solutions = count_solutions(puzzle, cfg.solution_count_cap);
    let early_paths =
        count_paths_to_stage(puzzle, puzzle.early_window_trades, cfg.early_path_cap);
    let branching_ok = has_choices_on_solution(puzzle, cfg.choice_depth, cfg.min_choices_per_step);

    let mut failures = Vec::new();
    if !matches!(generation.outcome, GenerationOutcome::Accepted { .. }) {
        failures.push(format!(
            "generation ended in the {} state",
            generation.outcome.label()
        ));
    }
    if !cfg.par_in_range(puzzle.par) {
        failures.push(format!(
            "par {} outside {}..={}",
            puzzle.par, cfg.par_min, cfg.par_max
        ));
    }
    if shortest != Some(puzzle.par) {
        failures.push(format!(
            "shortest path {shortest:?} does not match par {}",
            puzzle.par
        ));
    }
    if usize::from(puzzle.par) != puzzle.solution.len() {
        failures.push(format!(
            "solution has {} trades but par is {}",
            puzzle.solution.len(),
            puzzle.par
        ));
    }
    if solutions < 2 {
        failures.push(format!("only {solutions} solution path(s)"));
    }
    if early_paths < 1 {
        failures.push("no state reachable at the end of the early window".to_string());
    }
    if !branching_ok {
        failures.push("solution line lacks choices".to_string());
    }
    failures.extend(puzzle.check_invariants());

    PuzzleReport {
        label: target.label.clone(),
        seed: target.seed,
        outcome: generation.outcome.label(),
        candidates_examined: generation.candidates_examined,
        par: puzzle.par,
        shortest,
        solutions,
        early_paths,
        opening_choices: puzzle.choices_at(&puzzle.inventory, 0),
        branching_ok,
        trades: puzzle.trades.len(),
        max_quantity: puzzle.max_trade_quantity(),
        fingerprint: fingerprint(puzzle),
        passed: failures.is_empty(),
        failures,
        duration_ms: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let engine = BarterEngine::default();
        let puzzle = engine.generate_seed(20_240_315).puzzle;
        let print = fingerprint(&puzzle);
        assert_eq!(print.len(), 64);
        assert!(print.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(print, fingerprint(&puzzle.clone()));
    }

    #[test]
    fn fingerprint_matches_known_digest() {
        let digest = format!("{:x}", Sha256::digest(b"abc"));
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let puzzle = BarterEngine::default().generate_seed(7).puzzle;
        let json = serde_json::to_vec(&puzzle).unwrap();
        assert_eq!(fingerprint(&puzzle), format!("{:x}", Sha256::digest(&json)));
    }

    #[test]
    fn oracle_date_passes_every_check() {
        let engine = BarterEngine::default();
        let target = PuzzleTarget::for_seed(20_240_315);
        let report = check_target(&engine, &target, false);
        assert!(report.passed, "{:?}", report.failures);
        assert_eq!(report.shortest, Some(report.par));
        assert!(report.solutions >= 2);
        assert!(report.opening_choices >= 2);
    }
}
