use super::Filter;
use crate::config::LowPassConfig;
use crate::constants::PI;
use crate::error::{FilterError, Result};

/// Single-pole RC low-pass filter
///
/// Forward-Euler discretization of `dy/dt = (x - y) / RC`. Each call to
/// [`Filter::transform`] moves the stored output toward the new sample by the
/// smoothing factor
///
/// ```text
/// alpha = dt / (RC + dt)
/// y[n]  = y[n-1] + alpha * (x[n] - y[n-1])
/// ```
///
/// where `RC = 1 / (2π · cutoff)`. This is an exponential moving average
/// whose weight is derived from the cutoff frequency and the sample interval.
///
/// # Preconditions
///
/// The setters do not validate their arguments. A cutoff `<= 0` gives a zero
/// or negative time constant (division by zero or an unstable recurrence),
/// and a sample interval that is not positive, or does not match the rate at
/// which samples actually arrive, silently de-tunes the filter. Use
/// [`LowPassFilter::try_new`] or [`LowPassConfig::validate`] when the host
/// needs those checks.
///
/// # Example
/// ```
/// use rcfilter::signal_processing::{Filter, LowPassFilter};
///
/// let mut lpf = LowPassFilter::new();
/// lpf.set_sample_interval(1.0 / 48000.0);
/// lpf.set_cutoff_frequency(200.0);
///
/// let smoothed = lpf.transform(1.0);
/// assert!(smoothed > 0.0 && smoothed < 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LowPassFilter {
    sample_interval: f64,
    time_constant: f64,
    cutoff_hz: Option<f64>,
    last_output: f64,
}

impl LowPassFilter {
    /// Create an unconfigured filter with its output at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with the given cutoff (Hz) and sample interval (s)
    pub fn with_cutoff(cutoff_hz: f64, sample_interval: f64) -> Self {
        let mut filter = Self::new();
        filter.set_sample_interval(sample_interval);
        filter.set_cutoff_frequency(cutoff_hz);
        filter
    }

    /// Like [`with_cutoff`](Self::with_cutoff), but rejects non-positive or
    /// non-finite arguments
    pub fn try_new(cutoff_hz: f64, sample_interval: f64) -> Result<Self> {
        if !(cutoff_hz.is_finite() && cutoff_hz > 0.0) {
            log::warn!("Rejecting cutoff frequency {} Hz", cutoff_hz);
            return Err(FilterError::InvalidCutoff(cutoff_hz));
        }
        if !(sample_interval.is_finite() && sample_interval > 0.0) {
            log::warn!("Rejecting sample interval {} s", sample_interval);
            return Err(FilterError::InvalidSampleInterval(sample_interval));
        }
        Ok(Self::with_cutoff(cutoff_hz, sample_interval))
    }

    /// Build a filter from a configuration without validating it
    pub fn from_config(config: &LowPassConfig) -> Self {
        Self::with_cutoff(config.cutoff.as_hz(), config.sample_interval())
    }

    /// Set the cutoff frequency in Hz
    ///
    /// Recomputes the time constant immediately; the next call to
    /// `transform` uses it. `freq` must be positive (not checked).
    pub fn set_cutoff_frequency(&mut self, freq: f64) {
        self.time_constant = 1.0 / (freq * 2.0 * PI);
        self.cutoff_hz = Some(freq);
        log::debug!(
            "Low-pass cutoff set to {} Hz (RC = {} s)",
            freq,
            self.time_constant
        );
    }

    /// Set the time in seconds between successive `transform` calls
    ///
    /// Must be positive and match the real sample cadence (not checked).
    pub fn set_sample_interval(&mut self, dt: f64) {
        self.sample_interval = dt;
        log::debug!("Low-pass sample interval set to {} s", dt);
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    /// Time constant `RC` in seconds, `0.0` until a cutoff is set
    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// Most recently configured cutoff in Hz
    pub fn cutoff_frequency(&self) -> Option<f64> {
        self.cutoff_hz
    }

    pub fn is_configured(&self) -> bool {
        self.cutoff_hz.is_some()
    }

    /// Smoothing factor the next `transform` call will use
    pub fn alpha(&self) -> f64 {
        self.sample_interval / (self.time_constant + self.sample_interval)
    }

    /// Most recently produced output
    pub fn output(&self) -> f64 {
        self.last_output
    }

    /// Clear the stored output back to zero, keeping the configuration
    pub fn reset(&mut self) {
        self.reset_to(0.0);
    }

    /// Prime the stored output with `value`, keeping the configuration
    pub fn reset_to(&mut self, value: f64) {
        self.last_output = value;
    }
}

impl Filter for LowPassFilter {
    fn transform(&mut self, sample: f64) -> f64 {
        let alpha = self.alpha();
        self.last_output += alpha * (sample - self.last_output);
        self.last_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn unit_rc_filter() -> LowPassFilter {
        let mut lpf = LowPassFilter::new();
        lpf.set_sample_interval(1.0);
        lpf.set_cutoff_frequency(1.0 / (2.0 * PI));
        lpf
    }

    #[test]
    fn test_new_filter_starts_at_zero() {
        let lpf = LowPassFilter::new();
        assert_eq!(lpf.output(), 0.0);
        assert_eq!(lpf.time_constant(), 0.0);
        assert!(!lpf.is_configured());
        assert_eq!(lpf.cutoff_frequency(), None);
    }

    #[test]
    fn test_unit_time_constant_sequence() {
        let mut lpf = unit_rc_filter();
        assert_relative_eq!(lpf.time_constant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(lpf.alpha(), 0.5, epsilon = 1e-12);

        assert_relative_eq!(lpf.transform(10.0), 5.0, epsilon = 1e-12);
        assert_relative_eq!(lpf.transform(10.0), 7.5, epsilon = 1e-12);
        assert_relative_eq!(lpf.transform(10.0), 8.75, epsilon = 1e-12);
        assert_relative_eq!(lpf.output(), 8.75, epsilon = 1e-12);
    }

    #[test]
    fn test_time_constant_from_cutoff() {
        let mut lpf = LowPassFilter::new();
        lpf.set_cutoff_frequency(100.0);
        assert_relative_eq!(lpf.time_constant(), 1.0 / (200.0 * PI), epsilon = 1e-15);
        assert_eq!(lpf.cutoff_frequency(), Some(100.0));

        // Changing the cutoff replaces the time constant outright
        lpf.set_cutoff_frequency(50.0);
        assert_relative_eq!(lpf.time_constant(), 1.0 / (100.0 * PI), epsilon = 1e-15);
    }

    #[test]
    fn test_cutoff_change_applies_on_next_sample() {
        let mut lpf = unit_rc_filter();
        lpf.transform(10.0);

        // Very high cutoff: next sample passes through almost unchanged
        lpf.set_cutoff_frequency(1.0e9);
        assert_abs_diff_eq!(lpf.transform(-3.0), -3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sample_interval_read_on_every_call() {
        let mut lpf = unit_rc_filter();
        assert_relative_eq!(lpf.transform(10.0), 5.0, epsilon = 1e-12);

        // dt = 3 RC gives alpha = 0.75
        lpf.set_sample_interval(3.0);
        assert_relative_eq!(lpf.transform(10.0), 8.75, epsilon = 1e-12);
    }

    #[test]
    fn test_unconfigured_cutoff_passes_through() {
        let mut lpf = LowPassFilter::new();
        lpf.set_sample_interval(0.001);
        assert_eq!(lpf.transform(4.0), 4.0);
        assert_eq!(lpf.transform(-2.0), -2.0);
    }

    #[test]
    fn test_reset_keeps_configuration() {
        let mut lpf = unit_rc_filter();
        lpf.transform(10.0);
        lpf.transform(10.0);

        lpf.reset();
        assert_eq!(lpf.output(), 0.0);
        assert_relative_eq!(lpf.transform(10.0), 5.0, epsilon = 1e-12);

        lpf.reset_to(10.0);
        assert_relative_eq!(lpf.transform(10.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_try_new_rejects_bad_arguments() {
        assert!(matches!(
            LowPassFilter::try_new(0.0, 0.001),
            Err(FilterError::InvalidCutoff(_))
        ));
        assert!(matches!(
            LowPassFilter::try_new(-10.0, 0.001),
            Err(FilterError::InvalidCutoff(_))
        ));
        assert!(matches!(
            LowPassFilter::try_new(f64::NAN, 0.001),
            Err(FilterError::InvalidCutoff(_))
        ));
        assert!(matches!(
            LowPassFilter::try_new(100.0, 0.0),
            Err(FilterError::InvalidSampleInterval(_))
        ));
        assert!(LowPassFilter::try_new(100.0, 1.0 / 48000.0).is_ok());
    }

    #[test]
    fn test_negative_cutoff_is_not_rejected_by_setter() {
        let mut lpf = LowPassFilter::new();
        lpf.set_sample_interval(0.5);
        lpf.set_cutoff_frequency(-1.0 / (2.0 * PI));
        assert_relative_eq!(lpf.time_constant(), -1.0, epsilon = 1e-12);

        // alpha = -1: the error against a constant input doubles each step
        assert_relative_eq!(lpf.transform(1.0), -1.0, epsilon = 1e-9);
        assert_relative_eq!(lpf.transform(1.0), -3.0, epsilon = 1e-9);
        assert_relative_eq!(lpf.transform(1.0), -7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_process_buffer_matches_transform() {
        let input = [1.0, -2.0, 0.5, 3.0, 3.0];

        let mut a = LowPassFilter::with_cutoff(50.0, 1.0 / 1000.0);
        let expected: Vec<f64> = input.iter().map(|&x| a.transform(x)).collect();

        let mut b = LowPassFilter::with_cutoff(50.0, 1.0 / 1000.0);
        let mut buffer = input;
        b.process_buffer(&mut buffer);

        assert_eq!(buffer.to_vec(), expected);
    }
}
