// Pitcher workload analysis entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the historical pitching table and the cohort name list
// 4. Canonicalize + reconcile cohort names against dataset player ids
// 5. Build per-player histories and the target-year feature frame
// 6. Print the quantile group report
// 7. Render the chart view (if enabled)

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use pitchload::config;
use pitchload::names;
use pitchload::tui;
use pitchload::workload;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Workload analysis starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: target year {}, metric {}, {} groups",
        config.analysis.target_year,
        config.analysis.metric.label(),
        config.analysis.quantile_count
    );

    // 3. Load records and cohort
    let records = workload::records::load_records(Path::new(&config.data.records))
        .context("failed to load pitching records")?;
    info!("Loaded {} pitching rows", records.len());

    let cohort_names = workload::records::load_cohort(Path::new(&config.data.cohort))
        .context("failed to load cohort list")?;
    info!("Loaded {} cohort names", cohort_names.len());

    // 4. Canonicalize and reconcile cohort names against the dataset
    let candidates =
        names::canonicalize_all(&cohort_names).context("failed to canonicalize cohort names")?;
    let reference: HashSet<String> = records.iter().map(|r| r.player_id.clone()).collect();
    let reconciliation =
        names::reconcile(&candidates, &reference).context("cohort reconciliation failed")?;
    for name in &reconciliation.unresolved {
        warn!("cohort name not found in dataset: {name}");
    }

    // 5. Build histories and the feature frame
    let histories =
        workload::build_histories(&records).context("failed to build player histories")?;
    info!("Built histories for {} players", histories.len());

    let mut features =
        workload::features::build_features(&records, config.analysis.target_year);
    let unmatched =
        workload::features::flag_injured(&mut features, &reconciliation.resolved);
    for id in &unmatched {
        warn!(
            "cohort player {id} has no {} appearance",
            config.analysis.target_year
        );
    }
    let rookies = features
        .values()
        .filter(|f| f.prior_seasons == 0)
        .count();
    info!(
        "Feature frame: {} players in {}, {} season-zero, {} flagged injured",
        features.len(),
        config.analysis.target_year,
        rookies,
        features.values().filter(|f| f.injured).count()
    );

    // 6. Print the group report
    let report = workload::ranking::group_report(
        &histories,
        &reconciliation.resolved,
        config.analysis.metric,
        config.analysis.quantile_count,
        config.analysis.target_year,
        config.analysis.remainder_policy,
    )
    .context("failed to build group report")?;

    for id in &report.skipped {
        warn!(
            "cohort player {id} has no {} value for {}",
            config.analysis.metric.label(),
            config.analysis.target_year
        );
    }
    for line in workload::ranking::format_report(&report) {
        println!("{line}");
    }

    // 7. Chart view
    if config.chart.enabled {
        let chart_state = tui::ChartState::from_report(&report);
        tui::run(&chart_state).context("chart view failed")?;
    }

    info!("Workload analysis finished");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the chart view).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pitchload.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pitchload=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
