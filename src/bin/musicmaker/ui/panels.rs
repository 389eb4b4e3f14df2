//! Synth/effect parameters and the recordings list

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::App;

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn render_params(frame: &mut Frame, area: Rect, app: &App) {
    let synth = app.synth();
    let effects = app.effects();

    let lines = vec![
        row("Waveform", synth.waveform.name().to_string()),
        row("Volume", format!("{:.0}%", synth.volume * 100.0)),
        row(
            "Envelope",
            format!("A {:.2}s  R {:.2}s", synth.attack, synth.release),
        ),
        row("Cutoff", format!("{:.0} Hz", effects.cutoff_hz)),
        row("Drive", format!("{:.0}", effects.drive)),
        row(
            "Reverb",
            format!(
                "{:.0}%  Delay {:.0}%",
                effects.reverb_wet * 100.0,
                effects.delay_wet * 100.0
            ),
        ),
    ];

    let block = Block::default().title(" Sound ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_recordings(frame: &mut Frame, area: Rect, app: &App) {
    let tracks = app.recordings();
    let items: Vec<ListItem> = if tracks.is_empty() {
        vec![ListItem::new(Span::styled(
            " Press R to record",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        tracks
            .iter()
            .rev()
            .map(|track| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" #{:<3}", track.id()), Style::default().fg(Color::Cyan)),
                    Span::raw(format!("{}  ", track.name())),
                    Span::styled(
                        format!("{:.1}s", track.duration()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    let title = format!(" Recordings ({}) ", tracks.len());
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}
