//! Pressure history and trend
//!
//! Keeps the most recent pressure readings and a least-squares style slope
//! over them. The slope is recomputed on every insertion and is `None`
//! until at least two readings are held.

use heapless::Deque;

/// Number of readings kept
pub const HISTORY_LEN: usize = 6;

/// Bounded FIFO of pressure readings (hPa)
#[derive(Debug, Clone, Default)]
pub struct PressureHistory {
    readings: Deque<f32, HISTORY_LEN>,
    slope: Option<f32>,
}

impl PressureHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading, dropping the oldest beyond [`HISTORY_LEN`]
    pub fn push(&mut self, hpa: f32) {
        if self.readings.is_full() {
            self.readings.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.readings.push_back(hpa);
        self.slope = self.compute_slope();
    }

    /// Drop every reading but `seed` and clear the slope
    pub fn reset_to(&mut self, seed: f32) {
        self.readings.clear();
        let _ = self.readings.push_back(seed);
        self.slope = None;
    }

    /// Trend of the held readings; positive means rising pressure
    pub fn slope(&self) -> Option<f32> {
        self.slope
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<f32> {
        self.readings.back().copied()
    }

    /// Readings oldest first
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.readings.iter().copied()
    }

    fn compute_slope(&self) -> Option<f32> {
        let n = self.readings.len();
        if n < 2 {
            return None;
        }
        let mean = self.iter().sum::<f32>() / n as f32;
        let center = (n as f32 - 1.0) / 2.0;
        Some(
            self.iter()
                .enumerate()
                .map(|(i, v)| (i as f32 - center) * (v - mean))
                .sum(),
        )
    }
}
