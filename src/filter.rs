//! Capture-side filtering applied before positions reach the session.
//!
//! Exponential smoothing, a dead zone around the last emitted point and a
//! rest-speed threshold. With every parameter at zero the filter is a
//! passthrough.

use crate::config::Config;

/// Upper bound for smoothing; 100% would freeze the pointer
pub const MAX_SMOOTHING_PCT: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    pub smoothing_pct: u8,
    pub dead_zone_px: f64,
    pub velocity_threshold_px_s: f64,
}

impl From<&Config> for FilterSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            smoothing_pct: cfg.smoothing_pct,
            dead_zone_px: cfg.dead_zone_px,
            velocity_threshold_px_s: cfg.velocity_threshold_px_s,
        }
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug, Clone)]
pub struct CaptureFilter {
    alpha: f64,
    dead_zone_px: f64,
    velocity_threshold_px_s: f64,
    smoothed: Option<(f64, f64)>,
    emitted: Option<(f64, f64, f64)>,
}

impl CaptureFilter {
    pub fn new(settings: FilterSettings) -> Self {
        let pct = settings.smoothing_pct.min(MAX_SMOOTHING_PCT);
        Self {
            alpha: 1.0 - f64::from(pct) / 100.0,
            dead_zone_px: settings.dead_zone_px.max(0.0),
            velocity_threshold_px_s: settings.velocity_threshold_px_s.max(0.0),
            smoothed: None,
            emitted: None,
        }
    }

    /// Filter one raw position. Returns the position to record, or `None`
    /// if it should be dropped.
    pub fn apply(&mut self, x: f64, y: f64, t: f64) -> Option<(f64, f64)> {
        let (sx, sy) = match self.smoothed {
            None => (x, y),
            Some((px, py)) => (px + self.alpha * (x - px), py + self.alpha * (y - py)),
        };
        self.smoothed = Some((sx, sy));

        if let Some((ex, ey, et)) = self.emitted {
            let step = (sx - ex).hypot(sy - ey);
            if self.dead_zone_px > 0.0 && step < self.dead_zone_px {
                return None;
            }

            let dt = (t - et) / 1000.0;
            if self.velocity_threshold_px_s > 0.0
                && dt > 0.0
                && step / dt < self.velocity_threshold_px_s
            {
                return None;
            }
        }

        self.emitted = Some((sx, sy, t));
        Some((sx, sy))
    }

    pub fn reset(&mut self) {
        self.smoothed = None;
        self.emitted = None;
    }
}

impl Default for CaptureFilter {
    fn default() -> Self {
        Self::new(FilterSettings::default())
    }
}
