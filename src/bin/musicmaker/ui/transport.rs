//! Transport bar: tempo, play state, step and output level

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use musicmaker::sequencing::STEPS;

use super::App;

/// Peak and RMS over the scope window
struct Level {
    peak: f32,
    rms: f32,
}

impl Level {
    fn measure(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        let power = samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32;
        Self {
            peak,
            rms: power.sqrt(),
        }
    }
}

fn db(level: f32) -> f32 {
    20.0 * level.max(1e-6).log10()
}

pub fn render_transport(frame: &mut Frame, area: Rect, app: &App, samples: &[f32]) {
    let state = app.sequencer_state();
    let level = Level::measure(samples);

    let (symbol, label, color) = if state.playing {
        ("▶", "Playing", Color::Green)
    } else {
        ("■", "Stopped", Color::Yellow)
    };

    let step = match app.playhead() {
        Some(step) => format!("Step {:>2}/{STEPS}  ", step + 1),
        None => format!("Step --/{STEPS}  "),
    };

    let mut spans = vec![
        Span::styled(
            format!(" BPM: {}  ", state.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{symbol} {label}  "), Style::default().fg(color)),
        Span::styled(step, Style::default().fg(Color::White)),
        Span::styled(
            format!("Voices: {}  ", app.active_notes().count()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.1}dB  RMS: {:.1}dB", db(level.peak), db(level.rms)),
            Style::default().fg(if level.peak > 0.99 {
                Color::Red
            } else {
                Color::DarkGray
            }),
        ),
    ];

    if app.is_recording() {
        spans.push(Span::styled(
            "  ● REC",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default().title(" musicmaker ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
