// Workload pipeline: record loading, series building, gap filling,
// cumulative tallies, feature frame, ranking.

pub mod cumulative;
pub mod features;
pub mod gaps;
pub mod ranking;
pub mod records;
pub mod series;

use std::collections::HashMap;

use crate::workload::cumulative::SeasonRow;
use crate::workload::records::RawRecord;
use crate::workload::series::SeriesError;

/// Build complete per-player histories from the raw record table.
///
/// Runs each player's rows through the staged pipeline in invariant order:
/// group, consolidate, sort by year, fill gaps, tally cumulative loads. The
/// stage preconditions are satisfied by construction here; the stages still
/// validate them and any violation surfaces as a `SeriesError`.
pub fn build_histories(
    records: &[RawRecord],
) -> Result<HashMap<String, Vec<SeasonRow>>, SeriesError> {
    let mut histories = HashMap::new();
    for (player_id, rows) in series::build_series(records) {
        let mut consolidated = series::consolidate(&rows);
        series::sort_by_year(&mut consolidated);
        let filled = gaps::fill_gaps(&consolidated)?;
        let history = cumulative::tally_and_load(&filled)?;
        histories.insert(player_id, history);
    }
    Ok(histories)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
