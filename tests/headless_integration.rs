use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use tulipa_mouse::app::{Action, App};
use tulipa_mouse::config::Config;
use tulipa_mouse::runtime::{CellPos, FixedTicker, Runner, TestEventSource, TulipaEvent};
use tulipa_mouse::score::Tier;
use tulipa_mouse::summary::Severity;

fn key(c: char) -> TulipaEvent {
    TulipaEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn moved(column: u16, row: u16) -> TulipaEvent {
    TulipaEvent::Pointer(CellPos::new(column, row))
}

/// Drive the app through the runner until the channel drains, stamping each
/// event 16ms after the previous one.
fn drive(app: &mut App, events: Vec<TulipaEvent>) -> Action {
    let (tx, rx) = mpsc::channel();
    let expected = events.len();
    for ev in events {
        tx.send(ev).unwrap();
    }
    drop(tx);

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let mut t = 0.0;
    let mut handled = 0;
    while handled < expected {
        let ev = runner.step();
        if matches!(ev, TulipaEvent::Tick) {
            continue;
        }
        handled += 1;
        t += 16.0;
        if app.handle_event_at(ev, t) == Action::Quit {
            return Action::Quit;
        }
    }
    Action::Continue
}

fn canvas_app() -> App {
    let mut app = App::new(Config::default());
    app.set_canvas(Rect::new(1, 1, 100, 40));
    app
}

#[test]
fn headless_smooth_recording_produces_report() {
    let mut app = canvas_app();

    let mut events = vec![key(' ')];
    events.extend((0..60).map(|i| moved(2 + i, 10)));
    events.push(key(' '));

    assert_eq!(drive(&mut app, events), Action::Continue);

    let session = &app.session;
    assert!(!session.is_recording());
    assert_eq!(session.samples().len(), 60);
    assert_eq!(session.score().map(|s| s.value), Some(100));

    let report = session.report().expect("report after 60 samples");
    assert_eq!(report.severity, Severity::Good);
    assert_eq!(report.tremor, 0.0);
    // one cell (8px) every 16ms
    assert!((report.avg_speed - 500.0 * 59.0 / 60.0).abs() < 1e-6);
}

#[test]
fn headless_zigzag_recording_is_intense() {
    let mut app = canvas_app();

    // alternate right and down: a right-angle turn at every step
    let mut events = vec![key(' ')];
    let (mut col, mut row) = (2u16, 2u16);
    for i in 0..60 {
        if i % 2 == 0 {
            col += 1;
        } else {
            row += 1;
        }
        events.push(moved(col, row));
    }
    events.push(key(' '));

    drive(&mut app, events);

    let score = app.session.score().unwrap();
    assert_eq!(score.tier, Tier::Intense);
    let report = app.session.report().unwrap();
    assert_eq!(report.severity, Severity::Alert);
}

#[test]
fn headless_clear_then_quit() {
    let mut app = canvas_app();

    let mut events = vec![key(' ')];
    events.extend((0..15).map(|i| moved(5 + i, 5)));
    events.push(key('c'));
    events.push(key('q'));

    assert_eq!(drive(&mut app, events), Action::Quit);
    assert!(app.session.is_recording());
    assert!(app.session.samples().is_empty());
    assert!(app.session.speed_history().is_empty());
    assert_eq!(app.session.score(), None);
    assert_eq!(app.session.cursor(), None);
}

#[test]
fn headless_moves_before_recording_are_not_sampled() {
    let mut app = canvas_app();

    let mut events: Vec<TulipaEvent> = (0..10).map(|i| moved(3 + i, 3)).collect();
    events.push(TulipaEvent::Resize);

    drive(&mut app, events);
    assert!(app.session.samples().is_empty());
    assert_eq!(app.session.cursor(), Some((12.0 * 8.0 - 4.0, 40.0)));
}
