use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

use crate::error::{FilterError, Result};

/// De-interleaved audio with its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct WavSignal {
    pub sample_rate: u32,
    /// One vector of samples per channel, normalized to [-1, 1]
    pub channels: Vec<Vec<f64>>,
}

impl WavSignal {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f64>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Number of frames (samples per channel)
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seconds between consecutive samples of one channel
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }
}

/// Read a WAV file, normalizing integer formats to [-1, 1]
pub fn load_wav(path: impl AsRef<Path>) -> Result<WavSignal> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let num_channels = spec.channels as usize;
    if num_channels == 0 {
        return Err(FilterError::Config(format!(
            "{} has no audio channels",
            path.display()
        )));
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let mut channels = vec![Vec::with_capacity(interleaved.len() / num_channels); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    log::info!(
        "Read {} frames x {} channels at {} Hz from {}",
        channels[0].len(),
        num_channels,
        spec.sample_rate,
        path.display()
    );

    Ok(WavSignal::new(spec.sample_rate, channels))
}

/// Write a signal as interleaved 32-bit float WAV
pub fn save_wav(path: impl AsRef<Path>, signal: &WavSignal) -> Result<()> {
    let path = path.as_ref();
    let num_channels = u16::try_from(signal.channels.len())
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            FilterError::Config(format!(
                "cannot write {} channels to a WAV file",
                signal.channels.len()
            ))
        })?;

    let frames = signal.len();
    if signal.channels.iter().any(|c| c.len() != frames) {
        return Err(FilterError::Config(
            "all channels must have the same length".to_string(),
        ));
    }

    let spec = WavSpec {
        channels: num_channels,
        sample_rate: signal.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for i in 0..frames {
        for channel in &signal.channels {
            writer.write_sample(channel[i] as f32)?;
        }
    }

    writer.finalize()?;
    log::info!(
        "Wrote {} frames x {} channels to {}",
        frames,
        num_channels,
        path.display()
    );
    Ok(())
}
