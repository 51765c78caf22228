//! End-of-recording session analysis and its categorized verdict.
//!
//! The verdict thresholds sit on the tremor index itself (`< 2`, `< 5`),
//! not on the derived score tiers of [`crate::score`]. The two mappings are
//! intentionally different and must not be merged.

use std::fmt;

use crate::sample::SampleBuffer;
use crate::tremor;
use crate::util::round_tenths;

/// Minimum number of samples before a session can be summarized
pub const MIN_SAMPLES: usize = 50;

/// Severity tag shared by the verdict and the live tremor readout
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Good,
    Warn,
    Alert,
}

impl Severity {
    pub fn from_tremor(tremor: f64) -> Self {
        if tremor < 2.0 {
            Severity::Good
        } else if tremor < 5.0 {
            Severity::Warn
        } else {
            Severity::Alert
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Severity::Good => "Fluid movement",
            Severity::Warn => "Mild to moderate tremor",
            Severity::Alert => "Significant tremor detected",
        }
    }
}

/// Statistics and verdict for a finished recording
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub samples: usize,
    /// Mean instantaneous speed over every sample, px/s
    pub avg_speed: f64,
    pub tremor: f64,
    pub duration_secs: f64,
    pub severity: Severity,
}

impl SessionReport {
    pub fn title(&self) -> &'static str {
        self.severity.title()
    }

    pub fn message(&self) -> String {
        match self.severity {
            Severity::Good => format!(
                "Your movement pattern is remarkably smooth. Average speed of {:.0}px/s \
                 with a low direction-change index ({:.1}). Good motor control detected \
                 over {:.1}s of analysis.",
                self.avg_speed.round(),
                self.tremor,
                self.duration_secs
            ),
            Severity::Warn => format!(
                "Direction variations were detected that may indicate mild tremor. \
                 Index: {:.1} over {:.1}s at {:.0}px/s on average. Raising the smoothing \
                 filter can reduce these variations significantly.",
                self.tremor,
                self.duration_secs,
                self.avg_speed.round()
            ),
            Severity::Alert => format!(
                "High rate of direction changes ({:.1}) over {:.1}s at {:.0}px/s on average. \
                 Enable maximum smoothing and raise the dead zone to 15-20px.",
                self.tremor,
                self.duration_secs,
                self.avg_speed.round()
            ),
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title(), self.message())
    }
}

/// Outcome of summarizing a session
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Ready(SessionReport),
    /// Not enough samples; callers keep whatever they showed before.
    Insufficient { samples: usize },
}

pub fn summarize(buffer: &SampleBuffer) -> Summary {
    let samples = buffer.len();
    if samples < MIN_SAMPLES {
        return Summary::Insufficient { samples };
    }

    let all = buffer.as_slice();
    let avg_speed = all.iter().map(|s| s.speed).sum::<f64>() / samples as f64;
    let tremor = tremor::index(buffer.tail(tremor::WINDOW));
    let (first, last) = (&all[0], &all[samples - 1]);

    let duration_secs = round_tenths((last.t - first.t) / 1000.0);

    Summary::Ready(SessionReport {
        samples,
        avg_speed,
        tremor,
        duration_secs,
        severity: Severity::from_tremor(tremor),
    })
}
