// Ranking and quantile group reporting.
//
// Ranks every player by one season-row column in a chosen year, partitions
// the sorted values into equal-size contiguous groups, and measures how a
// named cohort concentrates across those groups. One interval rule applies
// throughout: each group is half-open [lower, upper) against the next
// group's first value, and the last group is closed on the right so the
// maximum belongs to exactly one group.

use std::collections::HashMap;

use thiserror::Error;

use crate::workload::cumulative::SeasonRow;

// ---------------------------------------------------------------------------
// Metric selection
// ---------------------------------------------------------------------------

/// The season-row column players are ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    OutsPitched,
    OutsStart,
    OutsEnd,
    MeanOutsToDate,
    LoadToDate,
    LoadCareer,
}

impl Metric {
    /// Parse the config-file spelling of a metric name.
    pub fn parse(raw: &str) -> Option<Metric> {
        match raw.trim().to_lowercase().as_str() {
            "outs_pitched" => Some(Metric::OutsPitched),
            "outs_start" => Some(Metric::OutsStart),
            "outs_end" => Some(Metric::OutsEnd),
            "mean_outs_to_date" => Some(Metric::MeanOutsToDate),
            "load_to_date" => Some(Metric::LoadToDate),
            "load_career" => Some(Metric::LoadCareer),
            _ => None,
        }
    }

    /// Human-readable label for axes and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::OutsPitched => "Outs Pitched",
            Metric::OutsStart => "Career Outs at Season Start",
            Metric::OutsEnd => "Career Outs at Season End",
            Metric::MeanOutsToDate => "Mean Outs per Season to Date",
            Metric::LoadToDate => "Season Load (to date)",
            Metric::LoadCareer => "Season Load (career)",
        }
    }

    fn value(&self, row: &SeasonRow) -> f64 {
        match self {
            Metric::OutsPitched => row.ip_outs as f64,
            Metric::OutsStart => row.outs_start,
            Metric::OutsEnd => row.outs_end,
            Metric::MeanOutsToDate => row.mean_outs_to_date,
            Metric::LoadToDate => row.load_to_date,
            Metric::LoadCareer => row.load_career,
        }
    }
}

/// What to do with the leftover rows when the population does not divide
/// evenly into `quantile_count` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemainderPolicy {
    /// The last group absorbs the remainder rows.
    #[default]
    LastGroupAbsorbs,
    /// The remainder rows above the last full group are left out of every
    /// group (and out of the cohort counts).
    Drop,
}

impl RemainderPolicy {
    pub fn parse(raw: &str) -> Option<RemainderPolicy> {
        match raw.trim().to_lowercase().as_str() {
            "last_group_absorbs" => Some(RemainderPolicy::LastGroupAbsorbs),
            "drop" => Some(RemainderPolicy::Drop),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("quantile count must be greater than zero")]
    ZeroQuantiles,

    #[error("population of {population} ranked players is smaller than {quantiles} groups")]
    TooFewPlayers {
        population: usize,
        quantiles: usize,
    },
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// The metric value for one player's season in `year`, if they have a row
/// for it.
pub fn metric_value(history: &[SeasonRow], metric: Metric, year: i32) -> Option<f64> {
    history
        .iter()
        .find(|row| row.year == year)
        .map(|row| metric.value(row))
}

/// Every player's metric value for `year`, sorted ascending. Players without
/// a row for that year are skipped.
pub fn rank(
    histories: &HashMap<String, Vec<SeasonRow>>,
    metric: Metric,
    year: i32,
) -> Vec<f64> {
    let mut values: Vec<f64> = histories
        .values()
        .filter_map(|history| metric_value(history, metric, year))
        .collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values
}

// ---------------------------------------------------------------------------
// Group report
// ---------------------------------------------------------------------------

/// One contiguous bucket of the ranked population.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBucket {
    /// 1-based group number, lowest values first.
    pub index: usize,
    /// Lowest ranked value in the group (inclusive).
    pub lower: f64,
    /// The next group's first value (exclusive bound); for the last group,
    /// the maximum ranked value (inclusive).
    pub upper: f64,
    /// Ranked rows in the group.
    pub size: usize,
    /// Cohort values falling in the group's interval.
    pub cohort_count: usize,
    /// Share of the whole population each group represents, in percent.
    pub population_share_pct: f64,
    /// Share of the cohort concentrated in this group, in percent.
    pub cohort_share_pct: f64,
}

/// The full quantile group report plus the data the chart view draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub metric: Metric,
    pub year: i32,
    pub quantile_count: usize,
    pub cohort_size: usize,
    pub buckets: Vec<GroupBucket>,
    /// All ranked metric values, ascending.
    pub ranked: Vec<f64>,
    /// Metric values of the cohort members that ranked.
    pub cohort_values: Vec<f64>,
    /// Cohort ids with no metric value for the target year.
    pub skipped: Vec<String>,
}

/// Rank the population and partition it into `quantile_count` groups,
/// counting how the cohort distributes across them.
///
/// Cohort ids without a target-year value are skipped and listed in the
/// report. With `RemainderPolicy::Drop`, remainder rows beyond the last full
/// group fall outside every group interval.
pub fn group_report(
    histories: &HashMap<String, Vec<SeasonRow>>,
    cohort: &[String],
    metric: Metric,
    quantile_count: usize,
    year: i32,
    policy: RemainderPolicy,
) -> Result<GroupReport, RankingError> {
    if quantile_count == 0 {
        return Err(RankingError::ZeroQuantiles);
    }
    let ranked = rank(histories, metric, year);
    let group_size = ranked.len() / quantile_count;
    if group_size == 0 {
        return Err(RankingError::TooFewPlayers {
            population: ranked.len(),
            quantiles: quantile_count,
        });
    }

    let mut cohort_values = Vec::new();
    let mut skipped = Vec::new();
    for id in cohort {
        match histories
            .get(id)
            .and_then(|history| metric_value(history, metric, year))
        {
            Some(value) => cohort_values.push(value),
            None => skipped.push(id.clone()),
        }
    }

    let total = match policy {
        RemainderPolicy::LastGroupAbsorbs => ranked.len(),
        RemainderPolicy::Drop => group_size * quantile_count,
    };

    let population_share_pct = 100.0 / quantile_count as f64;
    let mut buckets = Vec::with_capacity(quantile_count);
    for i in 0..quantile_count {
        let start = i * group_size;
        let end = if i == quantile_count - 1 {
            total
        } else {
            start + group_size
        };
        let is_last = i == quantile_count - 1;
        let lower = ranked[start];
        let upper = if is_last { ranked[end - 1] } else { ranked[end] };

        let cohort_count = cohort_values
            .iter()
            .filter(|v| {
                if is_last {
                    lower <= **v && **v <= upper
                } else {
                    lower <= **v && **v < upper
                }
            })
            .count();
        let cohort_share_pct = if cohort_values.is_empty() {
            0.0
        } else {
            100.0 * cohort_count as f64 / cohort_values.len() as f64
        };

        buckets.push(GroupBucket {
            index: i + 1,
            lower,
            upper,
            size: end - start,
            cohort_count,
            population_share_pct,
            cohort_share_pct,
        });
    }

    Ok(GroupReport {
        metric,
        year,
        quantile_count,
        cohort_size: cohort_values.len(),
        buckets,
        ranked,
        cohort_values,
        skipped,
    })
}

/// Rank position (first occurrence) and value for each cohort member, for
/// scatter marks on the chart.
pub fn cohort_positions(ranked: &[f64], cohort_values: &[f64]) -> Vec<(usize, f64)> {
    cohort_values
        .iter()
        .filter_map(|v| ranked.iter().position(|r| r == v).map(|i| (i, *v)))
        .collect()
}

/// The console lines of the report.
pub fn format_report(report: &GroupReport) -> Vec<String> {
    report
        .buckets
        .iter()
        .map(|b| {
            format!(
                "Group {}, {:.1}% of all players, represents {:.1}% of the group.",
                b.index, b.population_share_pct, b.cohort_share_pct
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
