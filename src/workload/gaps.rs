// Gap filling: make a player's season series contiguous.
//
// A pitcher who misses a season entirely leaves no row behind in the source
// table. The cumulative tally downstream assumes one row per calendar year,
// so missing years are inserted here with zero outs pitched.

use crate::workload::series::{SeasonTotal, SeriesError};

/// Insert zero-workload rows for every year skipped between adjacent rows.
///
/// Precondition (validated, fails fast): input is sorted strictly ascending
/// by year with no duplicates — consolidate and sort first. Postcondition:
/// output years form a contiguous ascending run from the first to the last
/// input year inclusive. Empty and single-row inputs pass through unchanged,
/// and the operation is idempotent.
pub fn fill_gaps(series: &[SeasonTotal]) -> Result<Vec<SeasonTotal>, SeriesError> {
    let mut out: Vec<SeasonTotal> = Vec::with_capacity(series.len());
    for row in series {
        if let Some(last) = out.last().copied() {
            if row.year == last.year {
                return Err(SeriesError::DuplicateYear { year: row.year });
            }
            if row.year < last.year {
                return Err(SeriesError::OutOfOrder {
                    previous: last.year,
                    current: row.year,
                });
            }
            for year in last.year + 1..row.year {
                out.push(SeasonTotal { year, ip_outs: 0 });
            }
        }
        out.push(*row);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn season(year: i32, ip_outs: u32) -> SeasonTotal {
        SeasonTotal { year, ip_outs }
    }

    #[test]
    fn fills_single_missing_year() {
        let filled = fill_gaps(&[season(2014, 100), season(2016, 200)]).unwrap();
        assert_eq!(
            filled,
            vec![season(2014, 100), season(2015, 0), season(2016, 200)]
        );
    }

    #[test]
    fn fills_multi_year_gap() {
        let filled = fill_gaps(&[season(2010, 50), season(2014, 60)]).unwrap();
        let years: Vec<i32> = filled.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2010, 2011, 2012, 2013, 2014]);
        assert!(filled[1..4].iter().all(|r| r.ip_outs == 0));
    }

    #[test]
    fn contiguous_input_unchanged() {
        let input = vec![season(2015, 100), season(2016, 200)];
        assert_eq!(fill_gaps(&input).unwrap(), input);
    }

    #[test]
    fn consecutive_years_always_differ_by_one() {
        let filled = fill_gaps(&[
            season(2008, 10),
            season(2011, 20),
            season(2012, 30),
            season(2015, 40),
        ])
        .unwrap();
        for pair in filled.windows(2) {
            assert_eq!(pair[1].year - pair[0].year, 1);
        }
    }

    #[test]
    fn idempotent() {
        let once = fill_gaps(&[season(2010, 5), season(2013, 7)]).unwrap();
        let twice = fill_gaps(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn single_row_passes_through() {
        let input = vec![season(2016, 447)];
        assert_eq!(fill_gaps(&input).unwrap(), input);
    }

    #[test]
    fn empty_input_passes_through() {
        assert!(fill_gaps(&[]).unwrap().is_empty());
    }

    #[test]
    fn duplicate_year_rejected() {
        let err = fill_gaps(&[season(2015, 1), season(2015, 2)]).unwrap_err();
        assert_eq!(err, SeriesError::DuplicateYear { year: 2015 });
    }

    #[test]
    fn out_of_order_rejected() {
        let err = fill_gaps(&[season(2016, 1), season(2014, 2)]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::OutOfOrder {
                previous: 2016,
                current: 2014
            }
        );
    }
}
