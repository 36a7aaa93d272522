//! Generator tuning configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CHOICE_DEPTH, DISTRACTOR_COUNT, EARLY_PATH_CAP, GENERATION_ATTEMPTS, GOAL_QTY_BUMPS,
    MAX_TRADES, MIN_CHOICES_PER_STEP, PAR_MAX, PAR_MIN, QUANTITY_CAP, SAFE_TRADE_QUANTITY,
    SOLUTION_COUNT_CAP,
};

/// Errors raised when generator configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    OrderViolation {
        lower: &'static str,
        lower_value: u32,
        upper: &'static str,
        upper_value: u32,
    },
    #[error("invalid generator config JSON: {0}")]
    Parse(String),
}

/// Knobs of the daily generator. `Default` reproduces the shipped puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "GeneratorConfig::default_max_trades")]
    pub max_trades: u8,
    #[serde(default = "GeneratorConfig::default_par_min")]
    pub par_min: u8,
    #[serde(default = "GeneratorConfig::default_par_max")]
    pub par_max: u8,
    #[serde(default = "GeneratorConfig::default_attempts")]
    pub attempts: u16,
    #[serde(default = "GeneratorConfig::default_goal_qty_bumps")]
    pub goal_qty_bumps: u8,
    #[serde(default = "GeneratorConfig::default_choice_depth")]
    pub choice_depth: u8,
    #[serde(default = "GeneratorConfig::default_min_choices_per_step")]
    pub min_choices_per_step: u8,
    #[serde(default = "GeneratorConfig::default_distractor_count")]
    pub distractor_count: u8,
    #[serde(default = "GeneratorConfig::default_safe_trade_quantity")]
    pub safe_trade_quantity: u8,
    #[serde(default = "GeneratorConfig::default_solution_count_cap")]
    pub solution_count_cap: u32,
    #[serde(default = "GeneratorConfig::default_early_path_cap")]
    pub early_path_cap: u32,
}

impl GeneratorConfig {
    #[must_use]
    pub const fn default_max_trades() -> u8 {
        MAX_TRADES
    }

    #[must_use]
    pub const fn default_par_min() -> u8 {
        PAR_MIN
    }

    #[must_use]
    pub const fn default_par_max() -> u8 {
        PAR_MAX
    }

    #[must_use]
    pub const fn default_attempts() -> u16 {
        GENERATION_ATTEMPTS
    }

    #[must_use]
    pub const fn default_goal_qty_bumps() -> u8 {
        GOAL_QTY_BUMPS
    }

    #[must_use]
    pub const fn default_choice_depth() -> u8 {
        CHOICE_DEPTH
    }

    #[must_use]
    pub const fn default_min_choices_per_step() -> u8 {
        MIN_CHOICES_PER_STEP
    }

    #[must_use]
    pub const fn default_distractor_count() -> u8 {
        DISTRACTOR_COUNT
    }

    #[must_use]
    pub const fn default_safe_trade_quantity() -> u8 {
        SAFE_TRADE_QUANTITY
    }

    #[must_use]
    pub const fn default_solution_count_cap() -> u32 {
        SOLUTION_COUNT_CAP
    }

    #[must_use]
    pub const fn default_early_path_cap() -> u32 {
        EARLY_PATH_CAP
    }

    /// Parse a (possibly partial) JSON override and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`GeneratorConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        range("max_trades", u32::from(self.max_trades), 4, 24)?;
        range("par_min", u32::from(self.par_min), 3, 24)?;
        order("par_min", self.par_min.into(), "par_max", self.par_max.into())?;
        if self.par_max >= self.max_trades {
            return Err(ConfigError::OrderViolation {
                lower: "par_max",
                lower_value: self.par_max.into(),
                upper: "max_trades - 1",
                upper_value: u32::from(self.max_trades).saturating_sub(1),
            });
        }
        range("attempts", u32::from(self.attempts), 1, 4_096)?;
        range("goal_qty_bumps", u32::from(self.goal_qty_bumps), 0, 32)?;
        range("choice_depth", u32::from(self.choice_depth), 1, 8)?;
        range(
            "min_choices_per_step",
            u32::from(self.min_choices_per_step),
            1,
            4,
        )?;
        range("distractor_count", u32::from(self.distractor_count), 0, 16)?;
        range(
            "safe_trade_quantity",
            u32::from(self.safe_trade_quantity),
            4,
            u32::from(QUANTITY_CAP),
        )?;
        range("solution_count_cap", self.solution_count_cap, 2, 64)?;
        range("early_path_cap", self.early_path_cap, 1, 1_024)?;
        Ok(())
    }

    /// Early window length for a chain of `par` trades.
    #[must_use]
    pub fn early_window_for(par: u8) -> u8 {
        use crate::constants::{EARLY_WINDOW_MAX, EARLY_WINDOW_MIN};
        par.saturating_sub(1)
            .clamp(EARLY_WINDOW_MIN, EARLY_WINDOW_MAX)
    }

    /// Whether `len` lies in the desired solution-length band.
    #[must_use]
    pub fn par_in_range(&self, len: u8) -> bool {
        (self.par_min..=self.par_max).contains(&len)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_trades: Self::default_max_trades(),
            par_min: Self::default_par_min(),
            par_max: Self::default_par_max(),
            attempts: Self::default_attempts(),
            goal_qty_bumps: Self::default_goal_qty_bumps(),
            choice_depth: Self::default_choice_depth(),
            min_choices_per_step: Self::default_min_choices_per_step(),
            distractor_count: Self::default_distractor_count(),
            safe_trade_quantity: Self::default_safe_trade_quantity(),
            solution_count_cap: Self::default_solution_count_cap(),
            early_path_cap: Self::default_early_path_cap(),
        }
    }
}

fn range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::RangeViolation {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

const fn order(
    lower: &'static str,
    lower_value: u32,
    upper: &'static str,
    upper_value: u32,
) -> Result<(), ConfigError> {
    if lower_value > upper_value {
        return Err(ConfigError::OrderViolation {
            lower,
            lower_value,
            upper,
            upper_value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.max_trades, 12);
        assert_eq!(cfg.attempts, 512);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = GeneratorConfig::from_json(r#"{ "attempts": 16 }"#).unwrap();
        assert_eq!(cfg.attempts, 16);
        assert_eq!(cfg.par_min, PAR_MIN);
    }

    #[test]
    fn par_band_must_fit_under_max_trades() {
        let cfg = GeneratorConfig {
            par_max: 12,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OrderViolation { lower: "par_max", .. })
        ));
    }

    #[test]
    fn inverted_par_band_is_rejected() {
        let cfg = GeneratorConfig {
            par_min: 10,
            par_max: 9,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OrderViolation { lower: "par_min", .. })
        ));
    }

    #[test]
    fn zero_attempts_is_out_of_range() {
        let err = GeneratorConfig::from_json(r#"{ "attempts": 0 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RangeViolation {
                field: "attempts",
                min: 1,
                max: 4_096,
                value: 0,
            }
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GeneratorConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn early_window_is_clamped() {
        assert_eq!(GeneratorConfig::early_window_for(1), 2);
        assert_eq!(GeneratorConfig::early_window_for(3), 2);
        assert_eq!(GeneratorConfig::early_window_for(4), 3);
        assert_eq!(GeneratorConfig::early_window_for(11), 3);
    }
}
