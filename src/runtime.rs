use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEventKind};

/// Pointer position in terminal cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPos {
    pub column: u16,
    pub row: u16,
}

impl CellPos {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// What the app reacts to: keys, pointer motion, resizes and idle ticks
#[derive(Clone, Debug)]
pub enum TulipaEvent {
    Key(KeyEvent),
    /// Pointer moved (with or without a button held)
    Pointer(CellPos),
    Resize,
    Tick,
}

/// Map a terminal event onto an app event. Clicks, scrolls, focus changes
/// and pastes carry no movement and are dropped.
pub fn translate(ev: CtEvent) -> Option<TulipaEvent> {
    match ev {
        CtEvent::Key(key) => Some(TulipaEvent::Key(key)),
        CtEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                Some(TulipaEvent::Pointer(CellPos::new(mouse.column, mouse.row)))
            }
            _ => None,
        },
        CtEvent::Resize(_, _) => Some(TulipaEvent::Resize),
        _ => None,
    }
}

pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TulipaEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread. Mouse capture must be
/// enabled on the terminal for pointer events to arrive.
pub struct CrosstermEventSource {
    rx: Receiver<TulipaEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            while let Ok(raw) = event::read() {
                let Some(ev) = translate(raw) else {
                    continue;
                };
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TulipaEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for driving the app without a terminal
pub struct TestEventSource {
    rx: Receiver<TulipaEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TulipaEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TulipaEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next event, or `Tick` once the interval passes quietly or the
    /// source has gone away
    pub fn step(&self) -> TulipaEvent {
        self.event_source
            .recv_timeout(self.ticker.interval())
            .unwrap_or(TulipaEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent};
    use std::sync::mpsc;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn runner(rx: Receiver<TulipaEvent>) -> Runner<TestEventSource, FixedTicker> {
        Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        )
    }

    #[test]
    fn test_translate_motion_to_pointer() {
        assert_matches!(
            translate(mouse(MouseEventKind::Moved, 12, 7)),
            Some(TulipaEvent::Pointer(CellPos { column: 12, row: 7 }))
        );
        assert_matches!(
            translate(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 4)),
            Some(TulipaEvent::Pointer(CellPos { column: 3, row: 4 }))
        );
    }

    #[test]
    fn test_translate_drops_clicks_and_scrolls() {
        assert!(translate(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)).is_none());
        assert!(translate(mouse(MouseEventKind::Up(MouseButton::Left), 5, 5)).is_none());
        assert!(translate(mouse(MouseEventKind::ScrollDown, 5, 5)).is_none());
        assert!(translate(CtEvent::FocusLost).is_none());
    }

    #[test]
    fn test_translate_keys_and_resize() {
        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_matches!(
            translate(CtEvent::Key(key)),
            Some(TulipaEvent::Key(k)) if k.code == KeyCode::Char(' ')
        );
        assert_matches!(
            translate(CtEvent::Resize(80, 24)),
            Some(TulipaEvent::Resize)
        );
    }

    #[test]
    fn test_step_ticks_when_idle() {
        let (_tx, rx) = mpsc::channel();
        assert!(matches!(runner(rx).step(), TulipaEvent::Tick));
    }

    #[test]
    fn test_step_passes_pointer_through() {
        let (tx, rx) = mpsc::channel();
        tx.send(TulipaEvent::Pointer(CellPos::new(12, 7))).unwrap();

        assert_matches!(
            runner(rx).step(),
            TulipaEvent::Pointer(pos) if pos == CellPos::new(12, 7)
        );
    }

    #[test]
    fn test_step_ticks_after_sender_dropped() {
        let (tx, rx) = mpsc::channel::<TulipaEvent>();
        drop(tx);
        assert!(matches!(runner(rx).step(), TulipaEvent::Tick));
    }
}
