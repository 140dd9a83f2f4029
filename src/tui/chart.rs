// Chart widget: ranked value curve, group boundary lines, cohort marks.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::tui::ChartState;

/// How many dots approximate each dashed boundary line.
const BOUNDARY_DOTS: usize = 40;

/// Render the ranking chart into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ChartState) {
    if state.curve.is_empty() {
        let paragraph = Paragraph::new("  No ranked data.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} in {}", state.metric_label, state.year)),
            );
        frame.render_widget(paragraph, area);
        return;
    }

    let x_max = (state.curve.len().saturating_sub(1)).max(1) as f64;
    let (y_min, y_max) = value_bounds(state);

    let boundary_lines: Vec<Vec<(f64, f64)>> = state
        .boundaries
        .iter()
        .map(|(_, y)| dashed_line(*y, x_max))
        .collect();

    let mut datasets = vec![Dataset::default()
        .name("Ranked players")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Blue))
        .data(&state.curve)];

    for ((label, _), points) in state.boundaries.iter().zip(boundary_lines.iter()) {
        datasets.push(
            Dataset::default()
                .name(label.clone())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::DarkGray))
                .data(points),
        );
    }

    if !state.cohort.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Cohort")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .data(&state.cohort),
        );
    }

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} in {}", state.metric_label, state.year)),
        )
        .x_axis(
            Axis::default()
                .title(format!(
                    "Player rank, lowest to highest {}",
                    state.metric_label
                ))
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(axis_labels(0.0, x_max)),
        )
        .y_axis(
            Axis::default()
                .title(state.metric_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(axis_labels(y_min, y_max)),
        );

    frame.render_widget(chart, area);
}

/// Min/max over the curve with a little headroom so the top of the curve and
/// the last boundary label stay visible.
fn value_bounds(state: &ChartState) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, v) in &state.curve {
        min = min.min(*v);
        max = max.max(*v);
    }
    if min > max {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(0.5);
    (min, max + pad)
}

/// Sample a horizontal line at `y` into scatter points.
fn dashed_line(y: f64, x_max: f64) -> Vec<(f64, f64)> {
    (0..=BOUNDARY_DOTS)
        .map(|i| (x_max * i as f64 / BOUNDARY_DOTS as f64, y))
        .collect()
}

fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    vec![
        Span::raw(format!("{min:.0}")),
        Span::raw(format!("{mid:.0}")),
        Span::raw(format!("{max:.0}")),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
