// Target-year feature frame.
//
// A cross-sectional snapshot for one season: for every player who pitched in
// the target year, how much they threw before it, over how many seasons, and
// how this year's volume compares to their established norm. Season-zero
// players (no prior record at all) are flagged with the neutral sentinel
// rather than an undefined ratio.

use std::collections::{HashMap, HashSet};

use crate::workload::records::RawRecord;
use crate::workload::series;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-player features for a fixed target year.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Outs pitched across all seasons before the target year.
    pub prior_outs: f64,
    /// Count of distinct seasons before the target year.
    pub prior_seasons: u32,
    /// `prior_outs / prior_seasons`; `None` for a season-zero player.
    pub mean_outs_per_season: Option<f64>,
    /// Outs pitched in the target year (summed over stints).
    pub target_year_outs: f64,
    /// Target-year outs over the prior-season mean; 1 for a season-zero
    /// player or a zero mean.
    pub normalized_target_outs: f64,
    /// Cohort label, applied after construction by `flag_injured`.
    pub injured: bool,
}

// ---------------------------------------------------------------------------
// Frame construction
// ---------------------------------------------------------------------------

/// Build the feature frame for `target_year` from the raw record table.
///
/// Players without a record in the target year are excluded entirely; rows
/// after the target year are ignored. Every record starts with
/// `injured == false`.
pub fn build_features(records: &[RawRecord], target_year: i32) -> HashMap<String, FeatureRecord> {
    let mut frame = HashMap::new();

    for (player_id, rows) in series::build_series(records) {
        if !rows.iter().any(|r| r.year == target_year) {
            continue;
        }

        let target_year_outs: f64 = rows
            .iter()
            .filter(|r| r.year == target_year)
            .map(|r| r.ip_outs as f64)
            .sum();

        let prior: Vec<_> = rows.iter().filter(|r| r.year < target_year).collect();
        let prior_outs: f64 = prior.iter().map(|r| r.ip_outs as f64).sum();
        let prior_years: HashSet<i32> = prior.iter().map(|r| r.year).collect();
        let prior_seasons = prior_years.len() as u32;

        let (mean_outs_per_season, normalized_target_outs) = if prior_seasons == 0 {
            // Rookie sentinel: no baseline to normalize against.
            (None, 1.0)
        } else {
            let mean = prior_outs / prior_seasons as f64;
            let normalized = if mean != 0.0 {
                target_year_outs / mean
            } else {
                1.0
            };
            (Some(mean), normalized)
        };

        frame.insert(
            player_id,
            FeatureRecord {
                prior_outs,
                prior_seasons,
                mean_outs_per_season,
                target_year_outs,
                normalized_target_outs,
                injured: false,
            },
        );
    }

    frame
}

/// Set the injured flag for every cohort id present in the frame.
///
/// Returns the cohort ids that matched no feature record (players without a
/// target-year appearance, or names that never reconciled).
pub fn flag_injured(frame: &mut HashMap<String, FeatureRecord>, cohort: &[String]) -> Vec<String> {
    let mut missing = Vec::new();
    for id in cohort {
        match frame.get_mut(id) {
            Some(record) => record.injured = true,
            None => missing.push(id.clone()),
        }
    }
    missing
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn rec(player_id: &str, year: i32, ip_outs: u32) -> RawRecord {
        RawRecord {
            player_id: player_id.to_string(),
            year,
            ip_outs,
        }
    }

    #[test]
    fn rookie_gets_sentinel() {
        let records = vec![rec("rook", 2016, 100)];
        let frame = build_features(&records, 2016);
        let f = &frame["rook"];
        assert!(approx_eq(f.prior_outs, 0.0));
        assert_eq!(f.prior_seasons, 0);
        assert!(f.mean_outs_per_season.is_none());
        assert!(approx_eq(f.target_year_outs, 100.0));
        assert!(approx_eq(f.normalized_target_outs, 1.0));
        assert!(!f.injured);
    }

    #[test]
    fn single_prior_season_is_its_own_mean() {
        let records = vec![rec("p", 2015, 300), rec("p", 2016, 150)];
        let frame = build_features(&records, 2016);
        let f = &frame["p"];
        assert_eq!(f.prior_seasons, 1);
        assert!(approx_eq(f.mean_outs_per_season.unwrap(), 300.0));
        assert!(approx_eq(f.normalized_target_outs, 0.5));
    }

    #[test]
    fn multiple_prior_seasons_average() {
        let records = vec![
            rec("p", 2013, 100),
            rec("p", 2014, 200),
            rec("p", 2015, 300),
            rec("p", 2016, 400),
        ];
        let frame = build_features(&records, 2016);
        let f = &frame["p"];
        assert!(approx_eq(f.prior_outs, 600.0));
        assert_eq!(f.prior_seasons, 3);
        assert!(approx_eq(f.mean_outs_per_season.unwrap(), 200.0));
        assert!(approx_eq(f.normalized_target_outs, 2.0));
    }

    #[test]
    fn prior_seasons_count_distinct_years() {
        // Two stints in 2015 are one prior season.
        let records = vec![
            rec("p", 2015, 100),
            rec("p", 2015, 50),
            rec("p", 2016, 300),
        ];
        let frame = build_features(&records, 2016);
        let f = &frame["p"];
        assert_eq!(f.prior_seasons, 1);
        assert!(approx_eq(f.prior_outs, 150.0));
        assert!(approx_eq(f.mean_outs_per_season.unwrap(), 150.0));
        assert!(approx_eq(f.normalized_target_outs, 2.0));
    }

    #[test]
    fn target_year_stints_summed() {
        let records = vec![rec("p", 2016, 100), rec("p", 2016, 47)];
        let frame = build_features(&records, 2016);
        assert!(approx_eq(frame["p"].target_year_outs, 147.0));
    }

    #[test]
    fn future_years_ignored() {
        let records = vec![
            rec("p", 2015, 100),
            rec("p", 2016, 200),
            rec("p", 2017, 999),
        ];
        let frame = build_features(&records, 2016);
        let f = &frame["p"];
        assert!(approx_eq(f.prior_outs, 100.0));
        assert!(approx_eq(f.target_year_outs, 200.0));
    }

    #[test]
    fn players_without_target_year_excluded() {
        let records = vec![rec("old", 2014, 500), rec("new", 2016, 100)];
        let frame = build_features(&records, 2016);
        assert!(!frame.contains_key("old"));
        assert!(frame.contains_key("new"));
    }

    #[test]
    fn zero_prior_mean_gets_sentinel() {
        // Pitched (for zero outs) in a prior year: a baseline exists but is
        // zero, so the ratio falls back to neutral.
        let records = vec![rec("p", 2015, 0), rec("p", 2016, 200)];
        let frame = build_features(&records, 2016);
        let f = &frame["p"];
        assert_eq!(f.prior_seasons, 1);
        assert!(approx_eq(f.mean_outs_per_season.unwrap(), 0.0));
        assert!(approx_eq(f.normalized_target_outs, 1.0));
    }

    #[test]
    fn empty_records_yield_empty_frame() {
        assert!(build_features(&[], 2016).is_empty());
    }

    #[test]
    fn flag_injured_marks_known_players() {
        let records = vec![rec("a", 2016, 100), rec("b", 2016, 200)];
        let mut frame = build_features(&records, 2016);
        let missing = flag_injured(
            &mut frame,
            &["a".to_string(), "ghost".to_string()],
        );
        assert!(frame["a"].injured);
        assert!(!frame["b"].injured);
        assert_eq!(missing, vec!["ghost"]);
    }
}
