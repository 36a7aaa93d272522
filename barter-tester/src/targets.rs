use chrono::{Days, Local, NaiveDate};
use thiserror::Error;

use barter_engine::seed_for_date;

/// Errors raised while turning CLI arguments into puzzle targets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD or 'today')")]
    InvalidDate(String),
    #[error("invalid seed '{0}'")]
    InvalidSeed(String),
    #[error("--days requires --start")]
    DaysWithoutStart,
    #[error("sweep of {days} days starting {start} runs past the calendar")]
    SweepOverflow { start: NaiveDate, days: u32 },
}

/// One puzzle to generate and check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleTarget {
    pub label: String,
    pub seed: u64,
    pub date: Option<NaiveDate>,
}

impl PuzzleTarget {
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            label: date.format("%Y-%m-%d").to_string(),
            seed: seed_for_date(date),
            date: Some(date),
        }
    }

    #[must_use]
    pub fn for_seed(seed: u64) -> Self {
        Self {
            label: format!("seed-{seed}"),
            seed,
            date: None,
        }
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

pub fn parse_date(token: &str) -> Result<NaiveDate, TargetError> {
    if token.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|_| TargetError::InvalidDate(token.to_string()))
}

/// Resolve CLI inputs into targets, in the order dates, sweep, seeds.
///
/// With no inputs at all, today's puzzle is the only target.
pub fn resolve_targets(
    dates: &str,
    start: Option<&str>,
    days: Option<u32>,
    seeds: &str,
) -> Result<Vec<PuzzleTarget>, TargetError> {
    let mut targets = Vec::new();

    for token in split_csv(dates) {
        targets.push(PuzzleTarget::for_date(parse_date(&token)?));
    }

    match (start, days) {
        (Some(start), days) => {
            let first = parse_date(start)?;
            let days = days.unwrap_or(1);
            for offset in 0..days {
                let date = first
                    .checked_add_days(Days::new(u64::from(offset)))
                    .ok_or(TargetError::SweepOverflow { start: first, days })?;
                targets.push(PuzzleTarget::for_date(date));
            }
        }
        (None, Some(_)) => return Err(TargetError::DaysWithoutStart),
        (None, None) => {}
    }

    for token in split_csv(seeds) {
        let seed = token
            .parse::<u64>()
            .map_err(|_| TargetError::InvalidSeed(token.clone()))?;
        targets.push(PuzzleTarget::for_seed(seed));
    }

    if targets.is_empty() {
        targets.push(PuzzleTarget::for_date(Local::now().date_naive()));
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn dates_map_to_packed_seeds() {
        let targets = resolve_targets("2024-03-15", None, None, "").unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].seed, 20_240_315);
        assert_eq!(targets[0].label, "2024-03-15");
    }

    #[test]
    fn sweep_walks_consecutive_days() {
        let targets = resolve_targets("", Some("2024-02-28"), Some(3), "").unwrap();
        let labels: Vec<_> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn seeds_follow_dates() {
        let targets = resolve_targets("2024-01-01", None, None, "5,9").unwrap();
        let seeds: Vec<_> = targets.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, [20_240_101, 5, 9]);
        assert_eq!(targets[2].date, None);
    }

    #[test]
    fn bad_inputs_are_reported() {
        assert_eq!(
            resolve_targets("2024-13-01", None, None, ""),
            Err(TargetError::InvalidDate("2024-13-01".to_string()))
        );
        assert_eq!(
            resolve_targets("", None, None, "abc"),
            Err(TargetError::InvalidSeed("abc".to_string()))
        );
        assert_eq!(
            resolve_targets("", None, Some(3), ""),
            Err(TargetError::DaysWithoutStart)
        );
    }

    #[test]
    fn empty_input_defaults_to_today() {
        let targets = resolve_targets("", None, None, "").unwrap();
        assert_eq!(targets.len(), 1);
        assert!(targets[0].date.is_some());
    }
}
