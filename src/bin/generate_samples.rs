use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use filtfilt::SampleFormat;
use filtfilt::simulation::{SignalConfig, Tone, generate_test_signal, write_raw_samples};

#[derive(Parser, Debug)]
#[command(name = "generate_samples")]
#[command(about = "Generate synthetic raw multi-channel sample files for filter testing")]
struct Args {
    /// Output file
    output: PathBuf,

    /// Sample format
    #[arg(short, long, value_enum, default_value = "float32")]
    format: SampleFormat,

    /// Number of interleaved channels
    #[arg(short, long, default_value_t = 2)]
    channels: usize,

    /// Number of frames
    #[arg(short = 'n', long, default_value_t = 48000)]
    frames: usize,

    /// Gaussian noise standard deviation
    #[arg(long, default_value_t = 0.05)]
    noise: f64,

    /// Seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with [[tone]] tables (frequency in cycles per frame)
    #[arg(long)]
    tones: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ToneFile {
    tone: Vec<Tone>,
}

fn load_tones(path: &PathBuf) -> Result<Vec<Tone>> {
    let content = fs::read_to_string(path).context("Failed to read tone file")?;
    let file: ToneFile = toml::from_str(&content).context("Failed to parse tone file")?;
    Ok(file.tone)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.channels == 0 {
        anyhow::bail!("Channel count must be positive");
    }

    let mut config = SignalConfig {
        frames: args.frames,
        channel_count: args.channels,
        noise_std: args.noise,
        seed: args.seed,
        ..Default::default()
    };
    if let Some(ref path) = args.tones {
        config.tones = load_tones(path)?;
    }

    let samples = generate_test_signal(&config)?;
    match args.format {
        SampleFormat::Float32 => write_raw_samples::<f32>(&args.output, &samples)?,
        SampleFormat::Float64 => write_raw_samples::<f64>(&args.output, &samples)?,
    }

    log::info!(
        "Wrote {} frames x {} channels ({}) to {}",
        args.frames,
        args.channels,
        args.format,
        args.output.display()
    );
    Ok(())
}
