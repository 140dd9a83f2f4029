// Chart view: terminal rendering of the ranked metric curve.
//
// The view owns a `ChartState` snapshot built from an already-computed group
// report; nothing here recomputes analysis data. The event loop draws the
// chart and blocks until the user presses q, Esc, or Ctrl+C.

pub mod chart;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::Frame;

use crate::workload::ranking::{cohort_positions, GroupReport};

// ---------------------------------------------------------------------------
// ChartState
// ---------------------------------------------------------------------------

/// Everything the chart needs, precomputed into plot coordinates.
#[derive(Debug, Clone)]
pub struct ChartState {
    /// Axis label: the metric name.
    pub metric_label: String,
    /// The season the ranking covers.
    pub year: i32,
    /// Ranked value curve as (rank, value) points.
    pub curve: Vec<(f64, f64)>,
    /// One (label, value) horizontal boundary line per group.
    pub boundaries: Vec<(String, f64)>,
    /// Cohort members as (rank, value) marks.
    pub cohort: Vec<(f64, f64)>,
}

impl ChartState {
    /// Build the plot data from a finished group report.
    pub fn from_report(report: &GroupReport) -> ChartState {
        let curve = report
            .ranked
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let boundaries = report
            .buckets
            .iter()
            .map(|b| (format!("Group {}", b.index), b.lower))
            .collect();
        let cohort = cohort_positions(&report.ranked, &report.cohort_values)
            .into_iter()
            .map(|(i, v)| (i as f64, v))
            .collect();
        ChartState {
            metric_label: report.metric.label().to_string(),
            year: report.year,
            curve,
            boundaries,
            cohort,
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, state: &ChartState) {
    chart::render(frame, frame.area(), state);
}

// ---------------------------------------------------------------------------
// Main view loop
// ---------------------------------------------------------------------------

/// Run the chart view until the user quits.
///
/// Initializes the terminal, installs a panic hook to restore it on crash,
/// then draws and polls for input until q, Esc, or Ctrl+C.
pub fn run(state: &ChartState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    loop {
        terminal.draw(|frame| render_frame(frame, state))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
