//! Centralized tuning constants for the Barter generator.
//!
//! These values define the deterministic shape of every daily puzzle.
//! Keeping them together ensures the daily output can only change through
//! reviewed code changes, never through external assets.

// Puzzle shape -------------------------------------------------------------
pub const MAX_TRADES: u8 = 12;
pub const PAR_MIN: u8 = 8;
pub const PAR_MAX: u8 = 11;
pub const EARLY_WINDOW_MIN: u8 = 2;
pub const EARLY_WINDOW_MAX: u8 = 3;

// Quantities ---------------------------------------------------------------
pub const QUANTITY_CAP: u8 = 200;
pub const SAFE_TRADE_QUANTITY: u8 = 48;
pub const GOAL_QTY_MIN: u8 = 1;
pub const GOAL_QTY_MAX: u8 = 2;
pub const GOAL_QTY_BUMPS: u8 = 8;
pub(crate) const FEE_MIN: u8 = 1;
pub(crate) const FEE_MAX: u8 = 3;
pub(crate) const VARIANT_SURCHARGE_MIN: u8 = 1;
pub(crate) const VARIANT_SURCHARGE_MAX: u8 = 2;

// Distractors --------------------------------------------------------------
pub const DISTRACTOR_COUNT: u8 = 5;
pub(crate) const REVERSAL_RETURN_MIN: f64 = 0.4;
pub(crate) const REVERSAL_RETURN_MAX: f64 = 0.7;
pub(crate) const NOISE_MIN_RATIO: u8 = 2;
pub(crate) const DISTRACTOR_EARLY_BIAS: f64 = 0.6;
pub(crate) const DISTRACTOR_DRAW_LIMIT: u8 = 24;

// Branching ----------------------------------------------------------------
pub const CHOICE_DEPTH: u8 = 4;
pub const MIN_CHOICES_PER_STEP: u8 = 2;

// Search budget ------------------------------------------------------------
pub const GENERATION_ATTEMPTS: u16 = 512;
pub const ATTEMPT_SEED_STRIDE: u64 = 1_000_003;
pub const SOLUTION_COUNT_CAP: u32 = 3;
pub const EARLY_PATH_CAP: u32 = 8;

// Scoring ------------------------------------------------------------------
pub(crate) const SCORE_IN_RANGE_BONUS: i64 = 1_000;
pub(crate) const SCORE_PAR_MATCH_BONUS: i64 = 250;
pub(crate) const SCORE_PER_OPENING_CHOICE: i64 = 25;
pub(crate) const SCORE_PER_SOLUTION: i64 = 40;
pub(crate) const SCORE_PER_EARLY_PATH: i64 = 10;
pub(crate) const SCORE_PAR_DISTANCE_PENALTY: i64 = 60;

// RNG ----------------------------------------------------------------------
pub(crate) const RNG_SEED_SALT: u64 = 0x9E37_79B9;
