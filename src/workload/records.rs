// Historical record and cohort list loading.
//
// Reads a Lahman-format pitching CSV: one row per player stint with playerID,
// yearID, and IPouts columns. A season can span several rows (mid-season
// trades); consolidation happens downstream in the series builder.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One row of the source table: a player's outs pitched in one year (or one
/// stint of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub player_id: String,
    pub year: i32,
    pub ip_outs: u32,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private) — Lahman format
// ---------------------------------------------------------------------------

/// Lahman pitching CSV row. IPouts is f64 to tolerate exported tables that
/// carry it as a decimal. The table's many other columns are absorbed via
/// `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawPitchingRow {
    playerID: String,
    yearID: i32,
    IPouts: f64,
    /// Absorb the rest of the Lahman columns (W, L, G, ERA, ...).
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawCohortRow {
    Name: String,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_records_from_reader<R: Read>(rdr: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut records = Vec::new();
    for result in reader.deserialize::<RawPitchingRow>() {
        match result {
            Ok(raw) => {
                let player_id = raw.playerID.trim().to_string();
                if player_id.is_empty() {
                    warn!("skipping pitching row with empty playerID");
                    continue;
                }
                if !raw.IPouts.is_finite() || raw.IPouts < 0.0 {
                    warn!(
                        "skipping pitching row for '{}': invalid IPouts value",
                        player_id
                    );
                    continue;
                }
                records.push(RawRecord {
                    player_id,
                    year: raw.yearID,
                    ip_outs: raw.IPouts.round() as u32,
                });
            }
            Err(e) => {
                warn!("skipping malformed pitching row: {}", e);
            }
        }
    }
    Ok(records)
}

fn load_cohort_from_reader<R: Read>(rdr: R) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut names = Vec::new();
    for result in reader.deserialize::<RawCohortRow>() {
        match result {
            Ok(raw) => {
                let name = raw.Name.trim().to_string();
                if name.is_empty() {
                    warn!("skipping empty cohort name row");
                    continue;
                }
                names.push(name);
            }
            Err(e) => {
                warn!("skipping malformed cohort row: {}", e);
            }
        }
    }
    Ok(names)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load the historical pitching table from a CSV file.
///
/// Rows that fail to parse are skipped with a warning; a file that yields
/// zero valid rows is a validation error.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, RecordError> {
    let file = std::fs::File::open(path).map_err(|e| RecordError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = load_records_from_reader(file).map_err(|e| RecordError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if records.is_empty() {
        return Err(RecordError::Validation(format!(
            "pitching CSV {} produced zero valid rows",
            path.display()
        )));
    }
    Ok(records)
}

/// Load the cohort name list from a CSV file with a `Name` column.
///
/// An empty cohort is allowed (the report then shows zero concentration in
/// every group).
pub fn load_cohort(path: &Path) -> Result<Vec<String>, RecordError> {
    let file = std::fs::File::open(path).map_err(|e| RecordError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_cohort_from_reader(file).map_err(|e| RecordError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
