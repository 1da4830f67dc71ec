//! Numeric constants shared by the filters.

/// π, taken from the standard library. Cutoff frequencies are ordinary
/// frequencies (Hz), not angular frequencies, so time constants use `2π`.
pub const PI: f64 = std::f64::consts::PI;

/// Default cutoff frequency in Hz when no configuration is supplied.
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;

/// Default sample rate in Hz when no configuration is supplied.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;
