//! Drum grid: five tracks by sixteen steps

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use musicmaker::{sequencing::STEPS, voices::DrumKind};

use super::{App, Cursor};

pub fn render_grid(frame: &mut Frame, area: Rect, app: &App, cursor: Cursor) {
    let playhead = app.playhead();
    let grid = app.grid();

    let mut lines = Vec::with_capacity(DrumKind::ALL.len() + 1);

    let mut header = vec![Span::raw("          ")];
    for step in 0..STEPS {
        let style = if playhead == Some(step) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if step % 4 == 0 {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header.push(Span::styled(format!("{:>3} ", step + 1), style));
    }
    lines.push(Line::from(header));

    for (row, kind) in DrumKind::ALL.iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!(" {:<9}", kind.name()),
            Style::default().fg(Color::Cyan),
        )];
        for step in 0..STEPS {
            let active = grid.is_active(*kind, step);
            let mut style = match (active, playhead == Some(step)) {
                (true, true) => Style::default().fg(Color::Black).bg(Color::Green),
                (true, false) => Style::default().fg(Color::Magenta),
                (false, true) => Style::default().fg(Color::Green),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            if cursor == (Cursor { row, col: step }) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let cell = if active { "[x] " } else { "[ ] " };
            spans.push(Span::styled(cell, style));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default().title(" Drums ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
