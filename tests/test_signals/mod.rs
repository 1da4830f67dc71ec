use std::f64::consts::PI;

/// `n` samples of a sine wave at `freq_hz` sampled at `sample_rate`
pub fn sine(freq_hz: f64, amplitude: f64, sample_rate: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}

/// Constant signal of `n` samples
pub fn constant(value: f64, n: usize) -> Vec<f64> {
    vec![value; n]
}

/// Peak absolute value after skipping the first `settle` samples
pub fn peak_after(samples: &[f64], settle: usize) -> f64 {
    samples
        .iter()
        .skip(settle)
        .fold(0.0_f64, |acc, &x| acc.max(x.abs()))
}
