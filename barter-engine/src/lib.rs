//! Barter Puzzle Engine
//!
//! Deterministic generator for the daily Barter trading puzzle. Every date
//! maps to a seed, and every seed maps to exactly one puzzle on every
//! platform. The crate has no UI or platform dependencies; it produces an
//! immutable [`BarterPuzzle`] that a presentation layer copies for play.

pub mod config;
pub mod constants;
pub mod generator;
pub mod goods;
pub mod inventory;
pub mod numbers;
pub mod puzzle;
pub mod rng;
pub mod trade;

use chrono::{Datelike, Local, NaiveDate};

// Re-export commonly used types
pub use config::{ConfigError, GeneratorConfig};
pub use generator::search::{
    count_paths_to_stage, count_solutions, has_choices_on_solution, shortest_path,
    shortest_path_length,
};
pub use generator::{Assessment, Generation, GenerationOutcome, generate};
pub use goods::{CATALOG, Good, GoodId, GoodParseError, Tier};
pub use inventory::Inventory;
pub use puzzle::{BarterPuzzle, Goal, ReplayError};
pub use trade::{Trade, TradeKey, TradeSide, Window};

/// Seed for a calendar date: `year * 10000 + month * 100 + day`.
#[must_use]
pub fn seed_for_date(date: NaiveDate) -> u64 {
    let packed = i64::from(date.year()) * 10_000
        + i64::from(date.month()) * 100
        + i64::from(date.day());
    packed.unsigned_abs()
}

/// The puzzle for `date` under the shipped configuration.
#[must_use]
pub fn daily_barter(date: NaiveDate) -> BarterPuzzle {
    BarterEngine::default().puzzle_for(date)
}

/// The puzzle for today's local date.
#[must_use]
pub fn daily_barter_today() -> BarterPuzzle {
    daily_barter(Local::now().date_naive())
}

/// Catalog lookup by id.
#[must_use]
pub fn good_by_id(id: GoodId) -> &'static Good {
    goods::by_id(id)
}

/// Generator bound to a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct BarterEngine {
    config: GeneratorConfig,
}

impl BarterEngine {
    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Full generation record for `date`.
    #[must_use]
    pub fn generate_for(&self, date: NaiveDate) -> Generation {
        generate(seed_for_date(date), &self.config)
    }

    /// Full generation record for an explicit seed.
    #[must_use]
    pub fn generate_seed(&self, seed: u64) -> Generation {
        generate(seed, &self.config)
    }

    #[must_use]
    pub fn puzzle_for(&self, date: NaiveDate) -> BarterPuzzle {
        self.generate_for(date).puzzle
    }
}
