pub mod config;
pub mod constants;
pub mod error;
pub mod signal_processing;
pub mod stats;
pub mod wav;

pub use config::LowPassConfig;
pub use error::{FilterError, Result};
pub use signal_processing::{Filter, LowPassFilter};
pub use wav::{WavSignal, load_wav, save_wav};
