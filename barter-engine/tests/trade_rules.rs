use barter_engine::{
    Inventory, ReplayError, Window, count_solutions, daily_barter, shortest_path_length,
};
use chrono::NaiveDate;

fn puzzle() -> barter_engine::BarterPuzzle {
    daily_barter(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"))
}

#[test]
fn late_trades_are_closed_at_the_start() {
    let puzzle = puzzle();
    for (_, trade) in puzzle.available_trades(&puzzle.inventory, 0) {
        assert_eq!(trade.window, Window::Early, "{trade} offered too soon");
    }
    let late = puzzle
        .solution
        .iter()
        .find(|trade| trade.window == Window::Late)
        .expect("solution has late steps");
    assert!(!puzzle.is_trade_available(late, 0));
    assert!(puzzle.is_trade_available(late, puzzle.early_window_trades));
}

#[test]
fn skipping_ahead_is_refused() {
    let puzzle = puzzle();
    let mut skipped = puzzle.solution.clone();
    skipped.remove(0);
    assert!(puzzle.replay(&skipped).is_err());
}

#[test]
fn early_trades_expire_with_their_window() {
    let puzzle = puzzle();
    let early_len = usize::from(puzzle.early_window_trades);
    let opener = puzzle.solution.first().expect("solution is never empty");
    assert!(!puzzle.is_trade_available(opener, puzzle.early_window_trades));

    let mut sequence: Vec<_> = puzzle.solution.iter().take(early_len).cloned().collect();
    sequence.push(opener.clone());
    let err = puzzle.replay(&sequence).unwrap_err();
    assert!(matches!(err, ReplayError::WindowClosed { step, .. } if step == early_len));
}

#[test]
fn no_trades_after_the_move_limit() {
    let puzzle = puzzle();
    for trade in &puzzle.trades {
        assert!(!puzzle.is_trade_available(trade, puzzle.max_trades));
    }
}

#[test]
fn opening_offers_a_real_choice() {
    let puzzle = puzzle();
    assert!(puzzle.choices_at(&puzzle.inventory, 0) >= 2);
}

#[test]
fn empty_pockets_cannot_win() {
    let mut puzzle = puzzle();
    puzzle.inventory = Inventory::empty();
    assert_eq!(shortest_path_length(&puzzle), None);
    assert_eq!(count_solutions(&puzzle, 3), 0);
}
