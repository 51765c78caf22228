use std::collections::VecDeque;

/// Number of recent speeds kept for the velocity chart
pub const SPEED_HISTORY_CAPACITY: usize = 80;

/// Fixed-capacity FIFO of recent speed values, oldest first.
#[derive(Debug, Clone)]
pub struct SpeedHistoryWindow {
    values: VecDeque<f64>,
}

impl SpeedHistoryWindow {
    pub fn new() -> Self {
        Self {
            values: VecDeque::with_capacity(SPEED_HISTORY_CAPACITY + 1),
        }
    }

    pub fn push(&mut self, speed: f64) {
        self.values.push_back(speed);
        if self.values.len() > SPEED_HISTORY_CAPACITY {
            self.values.pop_front();
        }
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Largest value in the window, never below `floor`
    pub fn max_or(&self, floor: f64) -> f64 {
        self.values.iter().copied().fold(floor, f64::max)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl Default for SpeedHistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}
