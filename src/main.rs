use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use rcfilter::config::{CutoffFrequency, LowPassConfig};
use rcfilter::signal_processing::{Filter, LowPassFilter};
use rcfilter::stats::SignalSummary;
use rcfilter::{WavSignal, load_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "rcfilter")]
#[command(about = "Smooth WAV files with a single-pole RC low-pass filter", long_about = None)]
struct Args {
    /// WAV file to filter
    input: PathBuf,

    /// Where to write the filtered WAV file
    output: PathBuf,

    /// Cutoff frequency (e.g., "200", "200hz", "5ms", "500us")
    #[arg(short = 'c', long)]
    cutoff: Option<CutoffFrequency>,

    /// TOML filter configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Summary format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct ChannelReport {
    channel: usize,
    input: Option<SignalSummary>,
    output: Option<SignalSummary>,
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    input: String,
    output: String,
    cutoff_hz: f64,
    sample_rate: u32,
    time_constant: f64,
    alpha: f64,
    channels: Vec<ChannelReport>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => LowPassConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LowPassConfig::default(),
    };
    if let Some(cutoff) = args.cutoff {
        config.cutoff = cutoff;
    }

    let input = load_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    // The file, not the config, decides the sample cadence
    if config.sample_rate != input.sample_rate {
        log::info!(
            "Using sample rate {} Hz from {} (config had {} Hz)",
            input.sample_rate,
            args.input.display(),
            config.sample_rate
        );
        config.sample_rate = input.sample_rate;
    }
    config.validate().context("Invalid filter configuration")?;

    let output = filter_signal(&input, &config);

    save_wav(&args.output, &output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let report = Report {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        cutoff_hz: config.cutoff.as_hz(),
        sample_rate: config.sample_rate,
        time_constant: config.time_constant(),
        alpha: LowPassFilter::from_config(&config).alpha(),
        channels: input
            .channels
            .iter()
            .zip(&output.channels)
            .enumerate()
            .map(|(channel, (raw, filtered))| ChannelReport {
                channel,
                input: SignalSummary::from_samples(raw),
                output: SignalSummary::from_samples(filtered),
            })
            .collect(),
    };

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

/// Filter every channel with its own filter instance
fn filter_signal(input: &WavSignal, config: &LowPassConfig) -> WavSignal {
    let channels = input
        .channels
        .iter()
        .map(|raw| {
            let mut filter: Box<dyn Filter> = Box::new(LowPassFilter::from_config(config));
            let mut samples = raw.clone();
            filter.process_buffer(&mut samples);
            samples
        })
        .collect();
    WavSignal::new(input.sample_rate, channels)
}

fn format_summary(summary: Option<&SignalSummary>) -> String {
    summary
        .map(|s| {
            format!(
                "mean {:+.4}  std {:.4}  rms {:.4}  range {:.4}",
                s.mean,
                s.std_dev,
                s.rms,
                s.range()
            )
        })
        .unwrap_or_else(|| "-".to_string())
}

fn print_text(report: &Report) {
    println!("=== rcfilter ===");
    println!("Input:  {}", report.input);
    println!("Output: {}", report.output);
    println!(
        "Cutoff: {:.3} Hz @ {} Hz (RC = {:.6} s, alpha = {:.6})",
        report.cutoff_hz, report.sample_rate, report.time_constant, report.alpha
    );
    println!();

    for channel in &report.channels {
        println!("Channel {}:", channel.channel);
        println!("  in:  {}", format_summary(channel.input.as_ref()));
        println!("  out: {}", format_summary(channel.output.as_ref()));
    }
}

fn print_json(report: &Report) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}
