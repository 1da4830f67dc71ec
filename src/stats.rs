use rolling_stats::Stats;
use serde::Serialize;

/// Summary statistics for one block of samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub rms: f64,
}

impl SignalSummary {
    /// Summarize `samples`, or `None` if the slice is empty
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut stats: Stats<f64> = Stats::new();
        let mut sum_squares = 0.0;
        for &sample in samples {
            stats.update(sample);
            sum_squares += sample * sample;
        }

        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
            rms: (sum_squares / samples.len() as f64).sqrt(),
        })
    }

    /// Peak-to-peak range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
