//! Output scope

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples past this are drawn as clipping.
const CLIP_LEVEL: f32 = 0.99;

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let len = samples.len().max(1) as f64;
    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 / len, s.clamp(-1.0, 1.0) as f64))
        .collect();

    let clipping = samples.iter().any(|s| s.abs() > CLIP_LEVEL);
    let (title, color) = if clipping {
        (" Scope (clipping) ", Color::Red)
    } else {
        (" Scope ", Color::Cyan)
    };

    let trace = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![trace])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(Axis::default().bounds([0.0, 1.0]))
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
