//! Configuration for the low-pass filter.
//!
//! A configuration can be built in code, parsed from a TOML file, or taken
//! from [`LowPassConfig::default()`]:
//!
//! ```toml
//! cutoff = "200hz"     # or 200, "5ms", "500us"
//! sample_rate = 44100
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{DEFAULT_CUTOFF_HZ, DEFAULT_SAMPLE_RATE, PI};
use crate::error::{FilterError, Result};

/// Cutoff frequency specification
///
/// Can be specified as either a frequency in Hz or the period of that
/// frequency in milliseconds or microseconds.
///
/// # Parsing formats
/// - `200` - frequency in Hz (no suffix)
/// - `200hz` or `200Hz` - frequency in Hz (explicit)
/// - `5ms` - period in milliseconds
/// - `500us` or `500μs` - period in microseconds
///
/// # Example
/// ```
/// use rcfilter::config::CutoffFrequency;
///
/// // 5 ms period = 200 Hz
/// let cutoff: CutoffFrequency = "5ms".parse().unwrap();
/// assert!((cutoff.as_hz() - 200.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "CutoffRepr")]
pub struct CutoffFrequency(f64);

impl CutoffFrequency {
    /// Create from frequency in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    /// Create from period in seconds
    pub fn from_period_secs(secs: f64) -> Self {
        Self(1.0 / secs)
    }

    /// Get frequency in Hz
    pub fn as_hz(&self) -> f64 {
        self.0
    }

    /// RC time constant in seconds for this cutoff
    pub fn time_constant(&self) -> f64 {
        1.0 / (self.0 * 2.0 * PI)
    }
}

impl Default for CutoffFrequency {
    fn default() -> Self {
        Self::from_hz(DEFAULT_CUTOFF_HZ)
    }
}

impl fmt::Display for CutoffFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}hz", self.0)
    }
}

impl FromStr for CutoffFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        // Period suffixes (ms, us, μs)
        let period = s
            .strip_suffix("ms")
            .map(|num| (num, 1e-3))
            .or_else(|| s.strip_suffix("us").map(|num| (num, 1e-6)))
            .or_else(|| s.strip_suffix("μs").map(|num| (num, 1e-6)));
        if let Some((num, scale)) = period {
            let value: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid period: {}", s))?;
            if !(value.is_finite() && value > 0.0) {
                return Err("period must be positive".to_string());
            }
            return Ok(Self::from_period_secs(value * scale));
        }

        // Check for Hz suffix (case insensitive)
        let num = s
            .strip_suffix("hz")
            .or_else(|| s.strip_suffix("Hz"))
            .or_else(|| s.strip_suffix("HZ"))
            .unwrap_or(s);

        let hz: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        if !(hz.is_finite() && hz > 0.0) {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self::from_hz(hz))
    }
}

/// Accepts `cutoff = 200` as well as `cutoff = "200hz"` in config files
#[derive(Deserialize)]
#[serde(untagged)]
enum CutoffRepr {
    Hz(f64),
    Text(String),
}

impl TryFrom<CutoffRepr> for CutoffFrequency {
    type Error = String;

    fn try_from(repr: CutoffRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            CutoffRepr::Hz(hz) if hz.is_finite() && hz > 0.0 => Ok(Self::from_hz(hz)),
            CutoffRepr::Hz(hz) => Err(format!("frequency must be positive, got {}", hz)),
            CutoffRepr::Text(text) => text.parse(),
        }
    }
}

/// Low-pass filter configuration
///
/// Use `LowPassConfig::default()` for a 1 kHz cutoff at 48 kHz.
///
/// # Example
/// ```
/// use rcfilter::config::{CutoffFrequency, LowPassConfig};
///
/// let config = LowPassConfig {
///     cutoff: CutoffFrequency::from_hz(250.0),
///     sample_rate: 44100,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowPassConfig {
    /// Cutoff frequency
    pub cutoff: CutoffFrequency,
    /// Rate at which samples are fed to the filter, in Hz
    pub sample_rate: u32,
}

impl Default for LowPassConfig {
    fn default() -> Self {
        Self {
            cutoff: CutoffFrequency::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl LowPassConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loaded filter configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Seconds between samples
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }

    pub fn time_constant(&self) -> f64 {
        self.cutoff.time_constant()
    }

    /// Check the configuration for values the filter cannot run with
    ///
    /// A cutoff at or above Nyquist is accepted but logged, since the filter
    /// then does little more than pass samples through.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            log::warn!("Rejecting zero sample rate");
            return Err(FilterError::InvalidSampleInterval(self.sample_interval()));
        }
        let hz = self.cutoff.as_hz();
        if !(hz.is_finite() && hz > 0.0) {
            log::warn!("Rejecting cutoff frequency {} Hz", hz);
            return Err(FilterError::InvalidCutoff(hz));
        }
        let nyquist = self.sample_rate as f64 / 2.0;
        if hz >= nyquist {
            log::warn!(
                "Cutoff {} is at or above Nyquist ({} Hz); filter will barely smooth",
                self.cutoff,
                nyquist
            );
        }
        Ok(())
    }
}
