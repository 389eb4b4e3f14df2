//! Piano strip: one cell per mapped key, lit while its note sounds

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::keymap::{is_black, KEYS};

use super::App;

pub fn render_keyboard(frame: &mut Frame, area: Rect, app: &App) {
    let mut names = Vec::with_capacity(KEYS.len());
    let mut keys = Vec::with_capacity(KEYS.len());

    for (key, note) in KEYS {
        let base = if is_black(note) {
            Style::default().fg(Color::White).bg(Color::Black)
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        };
        let style = if app.is_note_active(note) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            base
        };
        names.push(Span::styled(format!("{note:^5}"), style));
        keys.push(Span::styled(
            format!("{:^5}", key.to_ascii_uppercase()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = format!(" Keys ({}) ", app.synth().waveform.name());
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(vec![Line::from(names), Line::from(keys)]).block(block),
        area,
    );
}
