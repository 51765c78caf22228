use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::app_dirs::AppDirs;
use crate::config::Config;
use crate::export::{self, TracePoint};
use crate::filter::{CaptureFilter, FilterSettings};
use crate::runtime::{CellPos, TulipaEvent};
use crate::sample::Sample;
use crate::session::Session;
use crate::summary::{self, Summary};

/// Approximate pixel size of one terminal cell
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    filter: CaptureFilter,
    config: Config,
    /// Drawing surface in terminal cells, set by the renderer
    canvas: Rect,
    notice: Option<String>,
    clock: Instant,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            session: Session::new(),
            filter: CaptureFilter::new(FilterSettings::from(&config)),
            config,
            canvas: Rect::default(),
            notice: None,
            clock: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn set_canvas(&mut self, area: Rect) {
        self.canvas = area;
    }

    /// Size of the drawing surface in local pixel units
    pub fn canvas_size_px(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.width) * CELL_WIDTH_PX,
            f64::from(self.canvas.height) * CELL_HEIGHT_PX,
        )
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status(&self) -> &'static str {
        if self.session.is_recording() {
            "Recording..."
        } else if self.session.samples().is_empty() {
            "Waiting to start"
        } else {
            "Recording paused"
        }
    }

    fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    pub fn handle_event(&mut self, ev: TulipaEvent) -> Action {
        let now = self.elapsed_ms();
        self.handle_event_at(ev, now)
    }

    /// Handle an event observed at `t` milliseconds on the app clock.
    pub fn handle_event_at(&mut self, ev: TulipaEvent, t: f64) -> Action {
        match ev {
            TulipaEvent::Key(key) => self.on_key(key),
            TulipaEvent::Pointer(pos) => {
                self.on_cell(pos, t);
                Action::Continue
            }
            TulipaEvent::Resize | TulipaEvent::Tick => Action::Continue,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        if key.kind == KeyEventKind::Release {
            return Action::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char(' ') | KeyCode::Char('r') => {
                self.toggle_recording();
                Action::Continue
            }
            KeyCode::Char('c') => {
                self.clear();
                Action::Continue
            }
            KeyCode::Char('e') => {
                self.export();
                Action::Continue
            }
            _ => Action::Continue,
        }
    }

    /// Map a pointer cell to canvas-local pixels (cell centre) and record it.
    /// Cells outside the canvas are ignored.
    pub fn on_cell(&mut self, pos: CellPos, t: f64) -> Option<Sample> {
        let area = self.canvas;
        let inside = pos.column >= area.x
            && pos.column < area.x + area.width
            && pos.row >= area.y
            && pos.row < area.y + area.height;
        if !inside {
            return None;
        }

        let x = (f64::from(pos.column - area.x) + 0.5) * CELL_WIDTH_PX;
        let y = (f64::from(pos.row - area.y) + 0.5) * CELL_HEIGHT_PX;
        self.on_pointer(x, y, t)
    }

    /// Feed a local position through the capture filter into the session.
    pub fn on_pointer(&mut self, x: f64, y: f64, t: f64) -> Option<Sample> {
        if !self.session.is_recording() {
            return self.session.on_pointer(x, y, t);
        }

        let (fx, fy) = self.filter.apply(x, y, t)?;
        self.session.on_pointer(fx, fy, t)
    }

    pub fn toggle_recording(&mut self) {
        match self.session.toggle_recording() {
            None => {
                self.filter.reset();
                self.notice = None;
            }
            Some(Summary::Insufficient { samples }) => {
                self.notice = Some(format!(
                    "{samples} samples recorded; {} needed for an analysis",
                    summary::MIN_SAMPLES
                ));
            }
            Some(Summary::Ready(_)) => {
                self.notice = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.session.clear();
        self.filter.reset();
        self.notice = None;
        info!("session cleared");
    }

    fn export_dir(&self) -> PathBuf {
        self.config
            .export_dir
            .clone()
            .unwrap_or_else(AppDirs::export_dir)
    }

    /// Save the recorded samples as CSV; outcome is reported via the notice.
    pub fn export(&mut self) -> Option<PathBuf> {
        match export::save_csv(self.session.samples(), &self.export_dir()) {
            Ok(Some(path)) => {
                self.notice = Some(format!("Exported to {}", path.display()));
                Some(path)
            }
            Ok(None) => {
                self.notice = Some("Nothing recorded yet".to_string());
                None
            }
            Err(err) => {
                warn!(%err, "export failed");
                self.notice = Some(format!("Export failed: {err}"));
                None
            }
        }
    }
}

/// Replay an exported trace through the capture filter into a fresh session
/// and summarize it.
pub fn analyze_trace(points: &[TracePoint], settings: FilterSettings) -> (Session, Summary) {
    let mut filter = CaptureFilter::new(settings);
    let mut session = Session::new();
    session.start();
    for p in points {
        if let Some((x, y)) = filter.apply(p.x, p.y, p.t) {
            session.on_pointer(x, y, p.t);
        }
    }
    let summary = session.stop();
    (session, summary)
}
