use tracing::{debug, info};

use crate::sample::{Sample, SampleBuffer};
use crate::score::{self, Score};
use crate::speed_history::SpeedHistoryWindow;
use crate::summary::{self, SessionReport, Severity, Summary};
use crate::tremor;

/// Per-sample readouts refreshed on every recorded position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveStats {
    /// Speed of the latest sample, px/s, rounded
    pub speed: f64,
    pub points: usize,
    pub tremor: Option<f64>,
    /// Cumulative distance, px, rounded
    pub distance: f64,
}

impl LiveStats {
    pub fn tremor_severity(&self) -> Option<Severity> {
        self.tremor.map(Severity::from_tremor)
    }
}

/// One recording session: captured samples and everything derived from them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    recording: bool,
    samples: SampleBuffer,
    speed_history: SpeedHistoryWindow,
    cursor: Option<(f64, f64)>,
    live: LiveStats,
    score: Option<Score>,
    report: Option<SessionReport>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn start(&mut self) {
        self.recording = true;
        info!(samples = self.samples.len(), "recording started");
    }

    /// Stop recording and summarize. A report replaces the previous one only
    /// when there was enough data.
    pub fn stop(&mut self) -> Summary {
        self.recording = false;
        let summary = summary::summarize(&self.samples);
        match &summary {
            Summary::Ready(report) => {
                info!(
                    samples = report.samples,
                    tremor = report.tremor,
                    avg_speed = report.avg_speed,
                    duration_secs = report.duration_secs,
                    "recording stopped"
                );
                self.report = Some(report.clone());
            }
            Summary::Insufficient { samples } => {
                info!(samples, "recording stopped without enough data to summarize");
            }
        }
        summary
    }

    /// Start or stop; returns the summary when this call stopped recording.
    pub fn toggle_recording(&mut self) -> Option<Summary> {
        if self.recording {
            Some(self.stop())
        } else {
            self.start();
            None
        }
    }

    /// Feed a pointer position in local coordinates with a millisecond
    /// timestamp. The cursor readout always follows; samples are only
    /// recorded while recording.
    pub fn on_pointer(&mut self, x: f64, y: f64, t: f64) -> Option<Sample> {
        self.cursor = Some((x, y));
        if !self.recording {
            return None;
        }

        let sample = self.samples.append(x, y, t);
        self.speed_history.push(sample.speed);

        let tremor = tremor::compute(&self.samples);
        self.score = score::score(tremor);
        self.live = LiveStats {
            speed: sample.speed.round(),
            points: self.samples.len(),
            tremor,
            distance: self.samples.distance().round(),
        };

        Some(sample)
    }

    /// Drop every sample and derived value. The recording flag is kept.
    pub fn clear(&mut self) {
        debug!(samples = self.samples.len(), "clearing session");
        self.samples.clear();
        self.speed_history.clear();
        self.cursor = None;
        self.live = LiveStats::default();
        self.score = None;
        self.report = None;
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn speed_history(&self) -> &SpeedHistoryWindow {
        &self.speed_history
    }

    pub fn tremor_index(&self) -> Option<f64> {
        self.live.tremor
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn live_stats(&self) -> &LiveStats {
        &self.live
    }

    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }
}
