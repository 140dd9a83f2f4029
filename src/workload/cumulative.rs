// Cumulative workload tallies and season load ratios.
//
// One forward pass turns a contiguous (year, outs) series into full season
// rows: career-to-date running totals at season start and end, the mean
// workload per prior season, and two normalized load ratios — against the
// to-date mean and against the full-career average. A zero baseline is not
// an error: the ratio falls back to 1, the neutral-load sentinel.

use crate::workload::series::{SeasonTotal, SeriesError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One player-year after consolidation, gap filling, and tallying.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRow {
    pub year: i32,
    pub ip_outs: u32,
    /// Career outs pitched entering this season.
    pub outs_start: f64,
    /// Career outs pitched leaving this season.
    pub outs_end: f64,
    /// Mean outs per season over the seasons before this one; for the first
    /// season, that season's own workload.
    pub mean_outs_to_date: f64,
    /// This season's outs over `mean_outs_to_date` (1 when the mean is zero).
    pub load_to_date: f64,
    /// This season's outs over the full-career per-season average (1 when the
    /// average is zero).
    pub load_career: f64,
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Compute cumulative totals and load ratios for a gap-filled series.
///
/// Precondition (validated, fails fast): years are contiguous and ascending —
/// run `fill_gaps` first. `outs_end` of each row equals `outs_start` of the
/// next; `outs_end` of the last row is the career total. A single-season
/// player gets both load ratios fixed at 1 and a mean equal to that season's
/// workload. Empty input yields empty output.
pub fn tally_and_load(series: &[SeasonTotal]) -> Result<Vec<SeasonRow>, SeriesError> {
    for pair in series.windows(2) {
        if pair[1].year != pair[0].year + 1 {
            return Err(SeriesError::NonContiguous {
                previous: pair[0].year,
                current: pair[1].year,
            });
        }
    }

    let mut rows: Vec<SeasonRow> = Vec::with_capacity(series.len());
    let mut running = 0.0;
    for (prior_seasons, season) in series.iter().enumerate() {
        let outs = season.ip_outs as f64;
        let outs_start = running;
        let outs_end = outs_start + outs;
        let mean_outs_to_date = if prior_seasons == 0 {
            outs
        } else {
            outs_start / prior_seasons as f64
        };
        let load_to_date = if mean_outs_to_date != 0.0 {
            outs / mean_outs_to_date
        } else {
            1.0
        };
        rows.push(SeasonRow {
            year: season.year,
            ip_outs: season.ip_outs,
            outs_start,
            outs_end,
            mean_outs_to_date,
            load_to_date,
            load_career: 1.0,
        });
        running = outs_end;
    }

    if let Some(last) = rows.last() {
        let career_avg = last.outs_end / rows.len() as f64;
        if career_avg != 0.0 {
            for row in &mut rows {
                row.load_career = row.ip_outs as f64 / career_avg;
            }
        }
    }

    Ok(rows)
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

    fn season(year: i32, ip_outs: u32) -> SeasonTotal {
        SeasonTotal { year, ip_outs }
    }

    #[test]
    fn running_totals_chain() {
        let rows = tally_and_load(&[season(2014, 100), season(2015, 200), season(2016, 50)])
            .unwrap();
        assert!(approx_eq(rows[0].outs_start, 0.0));
        assert!(approx_eq(rows[0].outs_end, 100.0));
        assert!(approx_eq(rows[1].outs_start, 100.0));
        assert!(approx_eq(rows[1].outs_end, 300.0));
        assert!(approx_eq(rows[2].outs_start, 300.0));
        assert!(approx_eq(rows[2].outs_end, 350.0));
    }

    #[test]
    fn last_outs_end_equals_workload_sum() {
        let series = vec![season(2012, 150), season(2013, 150), season(2014, 75)];
        let rows = tally_and_load(&series).unwrap();
        let total: u32 = series.iter().map(|s| s.ip_outs).sum();
        assert!(approx_eq(rows.last().unwrap().outs_end, total as f64));
    }

    #[test]
    fn consolidated_roundtrip_example() {
        // {2012: 150, 2013: 150} after consolidation of {2012:100, 2013:150,
        // 2012:50}: no gap, then tallies as below.
        let rows = tally_and_load(&[season(2012, 150), season(2013, 150)]).unwrap();
        assert!(approx_eq(rows[0].outs_start, 0.0));
        assert!(approx_eq(rows[1].outs_start, 150.0));
        assert!(approx_eq(rows[0].outs_end, 150.0));
        assert!(approx_eq(rows[1].outs_end, 300.0));
        assert!(approx_eq(rows[0].mean_outs_to_date, 150.0));
        assert!(approx_eq(rows[1].mean_outs_to_date, 150.0));
        assert!(approx_eq(rows[0].load_to_date, 1.0));
        assert!(approx_eq(rows[1].load_to_date, 1.0));
    }

    #[test]
    fn mean_to_date_divides_by_prior_season_count() {
        let rows = tally_and_load(&[season(2014, 100), season(2015, 200), season(2016, 300)])
            .unwrap();
        // Third season: 300 prior outs over 2 prior seasons.
        assert!(approx_eq(rows[2].mean_outs_to_date, 150.0));
        assert!(approx_eq(rows[2].load_to_date, 2.0));
    }

    #[test]
    fn career_load_uses_whole_career_average() {
        let rows = tally_and_load(&[season(2014, 100), season(2015, 200)]).unwrap();
        // Career average: 300 / 2 = 150.
        assert!(approx_eq(rows[0].load_career, 100.0 / 150.0));
        assert!(approx_eq(rows[1].load_career, 200.0 / 150.0));
    }

    #[test]
    fn single_season_is_all_neutral() {
        let rows = tally_and_load(&[season(2016, 447)]).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(approx_eq(rows[0].outs_start, 0.0));
        assert!(approx_eq(rows[0].outs_end, 447.0));
        assert!(approx_eq(rows[0].mean_outs_to_date, 447.0));
        assert!(approx_eq(rows[0].load_to_date, 1.0));
        assert!(approx_eq(rows[0].load_career, 1.0));
    }

    #[test]
    fn zero_workload_career_falls_back_to_neutral() {
        // All-zero seasons: every mean and average is zero, so every ratio
        // takes the sentinel.
        let rows = tally_and_load(&[season(2014, 0), season(2015, 0)]).unwrap();
        assert!(approx_eq(rows[0].load_to_date, 1.0));
        assert!(approx_eq(rows[1].load_to_date, 1.0));
        assert!(approx_eq(rows[0].load_career, 1.0));
        assert!(approx_eq(rows[1].load_career, 1.0));
    }

    #[test]
    fn zero_first_season_then_activity() {
        let rows = tally_and_load(&[season(2014, 0), season(2015, 300)]).unwrap();
        // Second season's to-date mean is 0 outs / 1 season = 0 -> sentinel.
        assert!(approx_eq(rows[1].mean_outs_to_date, 0.0));
        assert!(approx_eq(rows[1].load_to_date, 1.0));
        // Career average is 150, so career loads are real ratios.
        assert!(approx_eq(rows[0].load_career, 0.0));
        assert!(approx_eq(rows[1].load_career, 2.0));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(tally_and_load(&[]).unwrap().is_empty());
    }

    #[test]
    fn non_contiguous_input_rejected() {
        let err = tally_and_load(&[season(2014, 1), season(2016, 2)]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NonContiguous {
                previous: 2014,
                current: 2016
            }
        );
    }

    #[test]
    fn descending_input_rejected() {
        assert!(tally_and_load(&[season(2016, 1), season(2015, 2)]).is_err());
    }
}
