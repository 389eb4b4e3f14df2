mod common;

use common::{app, app_with, render, FakeMic};
use musicmaker::{app::MICROPHONE_NOTICE, dsp::mix::peak, io::wav, Settings, StateEvent};

#[test]
fn denied_microphone_posts_a_notice() {
    let mut app = app_with(Settings::default(), FakeMic::denied());
    assert!(!app.start_recording());
    assert!(!app.is_recording());

    let events: Vec<_> = app.drain_events().collect();
    assert!(events.contains(&StateEvent::Notice(MICROPHONE_NOTICE.to_string())));
    assert!(!events
        .iter()
        .any(|e| matches!(e, StateEvent::RecordingChanged { .. })));
}

#[test]
fn a_take_becomes_a_named_track() {
    let mut app = app();
    assert!(app.toggle_recording().unwrap());
    assert!(!app.toggle_recording().unwrap());

    let track = &app.recordings()[0];
    assert!(track.name().starts_with("Recording "));
    assert!((track.duration() - 0.1).abs() < 1e-9);

    let added = app
        .drain_events()
        .filter(|e| matches!(e, StateEvent::TrackAdded { .. }))
        .count();
    assert_eq!(added, 1);
}

#[test]
fn takes_play_back_at_their_recorded_level() {
    let mut app = app();
    app.start_recording();
    let id = app.stop_recording().unwrap().unwrap();
    let source = peak(app.recording(id).unwrap().clip().samples());

    assert!(app.play_recording(id));
    let audio = render(&mut app, 0.2);
    let played = peak(&audio[..4_800]);
    assert!((played - source).abs() < 1e-3, "{played} vs {source}");
    assert!(peak(&audio[5_000..]) < 1e-4, "one-shot");
    assert!(!app.play_recording(id + 1));
}

#[test]
fn delete_forgets_the_take() {
    let mut app = app();
    app.start_recording();
    let first = app.stop_recording().unwrap().unwrap();
    app.start_recording();
    let second = app.stop_recording().unwrap().unwrap();
    assert_ne!(first, second);

    assert!(app.delete_recording(first));
    assert!(!app.delete_recording(first));
    assert!(app.recording(first).is_none());
    assert_eq!(app.recordings().len(), 1);
    assert_eq!(app.recordings()[0].id(), second);
}

#[test]
fn deleting_a_playing_take_silences_it() {
    let mut app = app();
    app.start_recording();
    let id = app.stop_recording().unwrap().unwrap();

    app.play_recording(id);
    let head = render(&mut app, 0.02);
    assert!(peak(&head) > 0.1);

    assert!(app.delete_recording(id));
    assert_eq!(app.graph().unwrap().renderer().active_clips(), 0);
    let tail = render(&mut app, 0.05);
    assert!(peak(&tail) < 1e-4);
}

#[test]
fn export_writes_a_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.recorder.export_dir = dir.path().join("takes");
    let mut app = app_with(settings, FakeMic::working());

    app.start_recording();
    let id = app.stop_recording().unwrap().unwrap();
    let path = app.export_recording(id).unwrap().unwrap();

    assert!(path.starts_with(dir.path().join("takes")));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("wav"));
    assert!(!path.file_name().unwrap().to_string_lossy().contains(':'));

    let clip = wav::decode(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(clip.sample_rate(), 48_000);
    assert_eq!(clip.len(), 4_800);

    assert!(app.export_recording(id + 7).unwrap().is_none());
}

#[test]
fn stopping_while_idle_is_a_no_op() {
    let mut app = app();
    assert_eq!(app.stop_recording().unwrap(), None);
    assert!(app.recordings().is_empty());
    assert!(app.drain_events().next().is_none());
}
