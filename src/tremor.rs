//! Direction-change tremor heuristic over the most recent samples.

use itertools::Itertools;

use crate::sample::{Sample, SampleBuffer};

/// Below this many samples the index is not computable
pub const MIN_SAMPLES: usize = 10;

/// Number of trailing samples inspected
pub const WINDOW: usize = 30;

/// Turn angle (radians) above which a step counts as a direction change
pub const ANGLE_THRESHOLD: f64 = 0.3;

/// Tremor index of the buffer's tail, or `None` while fewer than
/// [`MIN_SAMPLES`] samples exist.
pub fn compute(buffer: &SampleBuffer) -> Option<f64> {
    if buffer.len() < MIN_SAMPLES {
        return None;
    }
    Some(index(buffer.tail(WINDOW)))
}

/// Direction changes per ten samples across `window`.
///
/// Counts the interior points where the path turns by more than
/// [`ANGLE_THRESHOLD`]. Stationary steps are skipped rather than counted.
/// An empty window scores 0.
pub fn index(window: &[Sample]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }

    let changes = window
        .iter()
        .tuple_windows()
        .filter_map(|(p0, p1, p2)| turn_angle(p0, p1, p2))
        .filter(|&angle| angle > ANGLE_THRESHOLD)
        .count();

    changes as f64 / window.len() as f64 * 10.0
}

/// Angle between the steps `p0 -> p1` and `p1 -> p2`, `None` if either
/// step has zero length.
fn turn_angle(p0: &Sample, p1: &Sample, p2: &Sample) -> Option<f64> {
    let (ax, ay) = (p1.x - p0.x, p1.y - p0.y);
    let (bx, by) = (p2.x - p1.x, p2.y - p1.y);
    let m1 = ax.hypot(ay);
    let m2 = bx.hypot(by);

    if m1 > 0.0 && m2 > 0.0 {
        let cos = (ax * bx + ay * by) / (m1 * m2);
        Some(cos.clamp(-1.0, 1.0).acos())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_from(points: &[(f64, f64)]) -> SampleBuffer {
        let mut buffer = SampleBuffer::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            buffer.append(x, y, 1000.0 + i as f64 * 16.0);
        }
        buffer
    }

    fn staircase(n: usize) -> Vec<(f64, f64)> {
        let mut points = vec![(0.0, 0.0)];
        for i in 1..n {
            let (x, y) = points[i - 1];
            if i % 2 == 1 {
                points.push((x + 5.0, y));
            } else {
                points.push((x, y + 5.0));
            }
        }
        points
    }

    #[test]
    fn test_insufficient_data() {
        for n in 0..MIN_SAMPLES {
            let points: Vec<_> = (0..n).map(|i| (i as f64, 0.0)).collect();
            assert_eq!(compute(&buffer_from(&points)), None);
        }
    }

    #[test]
    fn test_straight_line_has_no_changes() {
        let points: Vec<_> = (0..40).map(|i| (i as f64 * 3.0, i as f64 * 1.5)).collect();
        assert_eq!(compute(&buffer_from(&points)), Some(0.0));
    }

    #[test]
    fn test_stationary_samples_are_skipped() {
        let points = vec![(50.0, 50.0); 30];
        assert_eq!(compute(&buffer_from(&points)), Some(0.0));
    }

    #[test]
    fn test_right_angles_every_step() {
        let index = compute(&buffer_from(&staircase(60))).unwrap();

        // 28 interior turns over a 30-sample window
        assert!((index - 28.0 / 30.0 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_buffer_uses_all_samples() {
        let index = compute(&buffer_from(&staircase(10))).unwrap();

        assert!((index - 8.0 / 10.0 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_turns_below_threshold() {
        // ~0.2 rad turns alternating left and right
        let mut points = vec![(0.0, 0.0)];
        for i in 1..30 {
            let (x, y) = points[i - 1];
            let dy = if i % 2 == 0 { 1.0 } else { -1.0 };
            points.push((x + 10.0, y + dy));
        }

        assert_eq!(compute(&buffer_from(&points)), Some(0.0));
    }

    #[test]
    fn test_only_recent_window_counts() {
        let mut points = staircase(40);
        let (mut x, y) = *points.last().unwrap();
        for _ in 0..WINDOW {
            x += 4.0;
            points.push((x, y));
        }

        // The final turn into the straight run is already outside the window
        assert_eq!(compute(&buffer_from(&points)), Some(0.0));
    }

    #[test]
    fn test_turn_angle_reversal() {
        let mut buffer = SampleBuffer::new();
        let a = buffer.append(0.0, 0.0, 0.0);
        let b = buffer.append(10.0, 0.0, 10.0);
        let c = buffer.append(0.0, 0.0, 20.0);

        let angle = turn_angle(&a, &b, &c).unwrap();
        assert!((angle - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_index_matches_compute_on_tail() {
        let buffer = buffer_from(&staircase(45));
        assert_eq!(compute(&buffer), Some(index(buffer.tail(WINDOW))));
    }

    #[test]
    fn test_index_of_empty_window() {
        assert_eq!(index(&[]), 0.0);
    }
}
