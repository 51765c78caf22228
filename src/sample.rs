/// One captured pointer observation with its instantaneous kinematics.
///
/// `t` is a monotonic millisecond reading. `vx`, `vy` and `speed` are in
/// px/s and are zero for the first sample of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
}

impl Sample {
    fn at_rest(x: f64, y: f64, t: f64) -> Self {
        Self {
            x,
            y,
            t,
            vx: 0.0,
            vy: 0.0,
            speed: 0.0,
        }
    }
}

/// Ordered samples of the active recording session plus the running
/// path length.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    distance: f64,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position and derive its velocity from the previous sample.
    ///
    /// A non-positive time step (duplicate or out-of-order timestamp) yields
    /// a sample at rest that adds nothing to the cumulative distance.
    pub fn append(&mut self, x: f64, y: f64, t: f64) -> Sample {
        let sample = match self.samples.last() {
            None => Sample::at_rest(x, y, t),
            Some(prev) => {
                let dt = (t - prev.t) / 1000.0;
                if dt > 0.0 {
                    let dx = x - prev.x;
                    let dy = y - prev.y;
                    let vx = dx / dt;
                    let vy = dy / dt;
                    self.distance += dx.hypot(dy);
                    Sample {
                        x,
                        y,
                        t,
                        vx,
                        vy,
                        speed: vx.hypot(vy),
                    }
                } else {
                    Sample::at_rest(x, y, t)
                }
            }
        };

        self.samples.push(sample);
        sample
    }

    /// The last `n` samples in temporal order, or all of them if fewer exist.
    pub fn tail(&self, n: usize) -> &[Sample] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples[start..]
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sum of the Euclidean steps between consecutive samples, in px.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.distance = 0.0;
    }
}

impl<'a> IntoIterator for &'a SampleBuffer {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
