use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Cutoff frequency must be positive, got {0} Hz")]
    InvalidCutoff(f64),

    #[error("Sample interval must be positive, got {0} s")]
    InvalidSampleInterval(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
