use barter_engine::constants::QUANTITY_CAP;
use barter_engine::generator::{accepts, assess, generate_candidate, score};
use barter_engine::{GeneratorConfig, generate, shortest_path_length};

#[test]
fn large_goal_bumps_stay_under_the_safe_ceiling() {
    let cfg = GeneratorConfig {
        safe_trade_quantity: 12,
        ..GeneratorConfig::default()
    };
    for seed in [7_u64, 20_240_315, 31_337] {
        for bump in [0_u8, 4, 8] {
            let candidate = generate_candidate(seed, bump, &cfg);
            let puzzle = &candidate.puzzle;
            let solution_max = puzzle
                .solution
                .iter()
                .flat_map(|trade| std::iter::once(trade.primary().qty).chain([trade.get.qty]))
                .max()
                .expect("solution is never empty");
            assert!(solution_max <= 12, "seed {seed} bump {bump}: {solution_max}");
            assert!(
                puzzle.replay_solution().is_ok(),
                "seed {seed} bump {bump}: rescaled chain no longer exact"
            );
        }
    }
}

#[test]
fn every_quantity_respects_the_hard_cap() {
    let cfg = GeneratorConfig::default();
    for seed in 0..20_u64 {
        let candidate = generate_candidate(seed, 8, &cfg);
        let puzzle = &candidate.puzzle;
        assert!(puzzle.max_trade_quantity() <= QUANTITY_CAP);
        for trade in &puzzle.trades {
            for side in trade.give.iter().chain([&trade.get]) {
                assert!((1..=QUANTITY_CAP).contains(&side.qty), "{trade}");
            }
        }
    }
}

#[test]
fn rescaled_shortcuts_are_rejected_and_ranked_lower() {
    let cfg = GeneratorConfig {
        safe_trade_quantity: 12,
        ..GeneratorConfig::default()
    };
    let mut shortcuts = 0;
    for seed in 0..60_u64 {
        for bump in [0_u8, 4, 8] {
            let candidate = generate_candidate(seed, bump, &cfg);
            let assessment = assess(&candidate.puzzle, &cfg);
            let Some(shortest) = assessment.shortest else {
                continue;
            };
            let planned = candidate.puzzle.solution.len();
            assert!(usize::from(shortest) <= planned, "seed {seed} bump {bump}");
            if usize::from(shortest) == planned {
                continue;
            }
            shortcuts += 1;
            assert!(
                !accepts(&candidate, &assessment, &cfg),
                "seed {seed} bump {bump}: shortcut of {shortest} < {planned} accepted"
            );
            if let Some(value) = score(&candidate, &assessment, &cfg) {
                let mut matched = candidate.clone();
                matched.puzzle.solution.truncate(usize::from(shortest));
                let full = score(&matched, &assessment, &cfg).expect("same assessment scores");
                assert!(value < full, "seed {seed} bump {bump}: {value} vs {full}");
            }
        }
    }
    assert!(shortcuts > 0, "no rescaled candidate opened a shortcut");
}

#[test]
fn rescaled_generation_still_matches_par() {
    let cfg = GeneratorConfig {
        safe_trade_quantity: 12,
        ..GeneratorConfig::default()
    };
    for seed in [7_u64, 20_240_315, 31_337] {
        let generation = generate(seed, &cfg);
        let puzzle = &generation.puzzle;
        assert_eq!(shortest_path_length(puzzle), Some(puzzle.par), "seed {seed}");
        assert_eq!(usize::from(puzzle.par), puzzle.solution.len());
        assert!(puzzle.max_trade_quantity() <= QUANTITY_CAP);
    }
}
