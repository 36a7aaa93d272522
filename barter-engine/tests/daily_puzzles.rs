use barter_engine::{
    BarterPuzzle, GenerationOutcome, GeneratorConfig, Tier, Window, count_paths_to_stage,
    count_solutions, daily_barter, generate, has_choices_on_solution, seed_for_date,
    shortest_path, shortest_path_length,
};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn assert_daily_guarantees(puzzle: &BarterPuzzle) {
    let cfg = GeneratorConfig::default();
    assert!(cfg.par_in_range(puzzle.par), "par {} out of band", puzzle.par);
    assert_eq!(shortest_path_length(puzzle), Some(puzzle.par));
    assert_eq!(usize::from(puzzle.par), puzzle.solution.len());
    assert!(count_solutions(puzzle, 3) >= 2, "puzzle is a single forced line");
    assert!(count_paths_to_stage(puzzle, puzzle.early_window_trades, 8) >= 1);
    assert!(has_choices_on_solution(puzzle, 4, 2));
    assert_eq!(puzzle.goal.good.tier(), Tier::Rare);
    assert!(
        puzzle.check_invariants().is_empty(),
        "{:?}",
        puzzle.check_invariants()
    );
}

#[test]
fn march_fifteenth_meets_every_guarantee() {
    let puzzle = daily_barter(date(2024, 3, 15));
    assert_eq!(puzzle.seed, seed_for_date(date(2024, 3, 15)));
    assert_daily_guarantees(&puzzle);
}

#[test]
fn a_spread_of_dates_is_accepted() {
    let cfg = GeneratorConfig::default();
    for day in [date(2024, 1, 1), date(2024, 6, 30), date(2025, 2, 28), date(2025, 12, 31)] {
        let generation = generate(seed_for_date(day), &cfg);
        assert!(
            matches!(generation.outcome, GenerationOutcome::Accepted { .. }),
            "{day}: {:?}",
            generation.outcome
        );
        assert_daily_guarantees(&generation.puzzle);
    }
}

#[test]
fn starting_inventory_holds_only_the_first_good_and_fee_stock() {
    let puzzle = daily_barter(date(2024, 3, 15));
    let first = puzzle.solution[0].primary();
    let held: Vec<_> = puzzle.inventory.iter().collect();
    assert!(held.len() <= 2, "unexpected starting goods {held:?}");
    assert_eq!(puzzle.inventory.get(first.good), first.qty);
    assert!(!puzzle.is_solved(&puzzle.inventory));
}

#[test]
fn each_window_carries_a_costlier_variant() {
    let puzzle = daily_barter(date(2024, 3, 15));
    for window in [Window::Early, Window::Late] {
        assert!(
            puzzle
                .trades
                .iter()
                .any(|trade| trade.is_variant && trade.window == window),
            "no {window:?} variant"
        );
    }
    assert!(
        puzzle
            .trades
            .iter()
            .any(|trade| trade.window == Window::Late && trade.get.good == puzzle.goal.good)
    );
}

#[test]
fn shortest_path_is_a_legal_replay() {
    let puzzle = daily_barter(date(2024, 3, 15));
    let path = shortest_path(&puzzle).expect("solvable");
    let trades: Vec<_> = path.iter().map(|index| puzzle.trades[*index].clone()).collect();
    let end = puzzle.replay(&trades).expect("path replays");
    assert!(puzzle.is_solved(&end));
}

#[test]
fn goods_are_listed_in_catalog_order() {
    let puzzle = daily_barter(date(2024, 3, 15));
    let ids: Vec<_> = puzzle.goods.iter().map(|good| good.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    for trade in &puzzle.trades {
        assert!(ids.contains(&trade.get.good), "{trade} uses a good not in play");
    }
}
