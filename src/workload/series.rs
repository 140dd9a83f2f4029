// Per-player season series construction.
//
// Groups the flat record table into one (year, outs) sequence per player and
// consolidates duplicate-year rows (multi-stint seasons) by summation. Both
// steps preserve first-seen input order; callers needing numeric year order
// sort explicitly before gap filling.

use std::collections::HashMap;

use thiserror::Error;

use crate::workload::records::RawRecord;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One (year, workload) pair in a player's series, pre-cumulative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonTotal {
    pub year: i32,
    pub ip_outs: u32,
}

/// A series stage was handed input violating its entry invariant.
///
/// Each pipeline stage validates its precondition and fails fast rather than
/// producing silently wrong sums.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("season years out of order: {previous} followed by {current}")]
    OutOfOrder { previous: i32, current: i32 },

    #[error("duplicate season year {year}")]
    DuplicateYear { year: i32 },

    #[error("season years not contiguous: {previous} followed by {current}")]
    NonContiguous { previous: i32, current: i32 },
}

// ---------------------------------------------------------------------------
// Grouping and consolidation
// ---------------------------------------------------------------------------

/// Group raw records by player, preserving each player's first-seen row order.
///
/// Empty input yields an empty map.
pub fn build_series(records: &[RawRecord]) -> HashMap<String, Vec<SeasonTotal>> {
    let mut players: HashMap<String, Vec<SeasonTotal>> = HashMap::new();
    for rec in records {
        players
            .entry(rec.player_id.clone())
            .or_default()
            .push(SeasonTotal {
                year: rec.year,
                ip_outs: rec.ip_outs,
            });
    }
    players
}

/// Sum duplicate years into a single row per distinct year.
///
/// Output order is the first-seen order of the years in the input, not
/// numeric order.
pub fn consolidate(series: &[SeasonTotal]) -> Vec<SeasonTotal> {
    let mut order: Vec<i32> = Vec::new();
    let mut totals: HashMap<i32, u32> = HashMap::new();
    for row in series {
        if !totals.contains_key(&row.year) {
            order.push(row.year);
        }
        *totals.entry(row.year).or_insert(0) += row.ip_outs;
    }
    order
        .into_iter()
        .map(|year| SeasonTotal {
            year,
            ip_outs: totals[&year],
        })
        .collect()
}

/// Sort a series ascending by year, in place.
pub fn sort_by_year(series: &mut [SeasonTotal]) {
    series.sort_by_key(|row| row.year);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(player_id: &str, year: i32, ip_outs: u32) -> RawRecord {
        RawRecord {
            player_id: player_id.to_string(),
            year,
            ip_outs,
        }
    }

    #[test]
    fn build_series_groups_by_player() {
        let records = vec![
            rec("a", 2015, 100),
            rec("b", 2015, 200),
            rec("a", 2016, 150),
        ];
        let series = build_series(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(
            series["a"],
            vec![
                SeasonTotal {
                    year: 2015,
                    ip_outs: 100
                },
                SeasonTotal {
                    year: 2016,
                    ip_outs: 150
                },
            ]
        );
        assert_eq!(series["b"].len(), 1);
    }

    #[test]
    fn build_series_empty_input() {
        assert!(build_series(&[]).is_empty());
    }

    #[test]
    fn consolidate_sums_duplicate_years() {
        let series = vec![
            SeasonTotal {
                year: 2012,
                ip_outs: 100,
            },
            SeasonTotal {
                year: 2013,
                ip_outs: 150,
            },
            SeasonTotal {
                year: 2012,
                ip_outs: 50,
            },
        ];
        let consolidated = consolidate(&series);
        assert_eq!(
            consolidated,
            vec![
                SeasonTotal {
                    year: 2012,
                    ip_outs: 150
                },
                SeasonTotal {
                    year: 2013,
                    ip_outs: 150
                },
            ]
        );
    }

    #[test]
    fn consolidate_preserves_first_seen_order() {
        // Years arrive out of numeric order; output keeps the arrival order.
        let series = vec![
            SeasonTotal {
                year: 2016,
                ip_outs: 10,
            },
            SeasonTotal {
                year: 2014,
                ip_outs: 20,
            },
            SeasonTotal {
                year: 2016,
                ip_outs: 5,
            },
        ];
        let consolidated = consolidate(&series);
        assert_eq!(consolidated[0].year, 2016);
        assert_eq!(consolidated[0].ip_outs, 15);
        assert_eq!(consolidated[1].year, 2014);
    }

    #[test]
    fn consolidate_empty_input() {
        assert!(consolidate(&[]).is_empty());
    }

    #[test]
    fn sort_by_year_orders_ascending() {
        let mut series = vec![
            SeasonTotal {
                year: 2016,
                ip_outs: 1,
            },
            SeasonTotal {
                year: 2014,
                ip_outs: 2,
            },
        ];
        sort_by_year(&mut series);
        assert_eq!(series[0].year, 2014);
        assert_eq!(series[1].year, 2016);
    }
}
