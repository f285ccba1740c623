/// Sliding-window smoothing of raw gaze point estimates
///
/// The tracker delivers noisy per-frame point estimates; downstream zone
/// classification needs a stable position, so we keep the last
/// `capacity` samples and report their arithmetic mean.

use std::collections::VecDeque;

use crate::constants::gaze::BUFFER_SIZE;

/// One instantaneous estimate from the gaze tracker. Ephemeral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: u64,
}

impl GazeSample {
    /// Trackers occasionally emit NaN/infinite coordinates during blinks
    /// or face-model dropouts; those samples are dropped upstream.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Mean of the buffered samples, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPoint {
    pub x: f32,
    pub y: f32,
}

/// Fixed-capacity FIFO smoother over recent gaze samples.
pub struct GazeSmoother {
    xs: VecDeque<f32>,
    ys: VecDeque<f32>,
    capacity: usize,
}

impl GazeSmoother {
    pub fn new(capacity: usize) -> Self {
        GazeSmoother {
            xs: VecDeque::with_capacity(capacity),
            ys: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample and return the mean over the retained window.
    /// The oldest sample is evicted once the window holds `capacity` entries.
    pub fn ingest(&mut self, sample: GazeSample) -> SmoothedPoint {
        self.xs.push_back(sample.x);
        self.ys.push_back(sample.y);

        if self.xs.len() > self.capacity {
            self.xs.pop_front();
            self.ys.pop_front();
        }

        let n = self.xs.len() as f32;
        SmoothedPoint {
            x: self.xs.iter().sum::<f32>() / n,
            y: self.ys.iter().sum::<f32>() / n,
        }
    }

    /// Clear all buffered history. Called on session disable so the next
    /// trial does not inherit stale positions from the previous one.
    pub fn reset(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl Default for GazeSmoother {
    fn default() -> Self {
        GazeSmoother::new(BUFFER_SIZE)
    }
}
