use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use filtfilt::{FilterConfig, ReportFormat, ZeroPhaseFilter};

#[derive(Parser, Debug)]
#[command(name = "filtfilt")]
#[command(
    about = "Zero-phase linear filtering of raw multi-channel sample files",
    long_about = "Processes the input signal using the linear filter\n\
        \ty[t] = b[0] x[t] + b[1] x[t-1] + ... - a[1] y[t-1] - a[2] y[t-2] - ...\n\
        twice, backward and forward, to eliminate phase shift."
)]
struct Args {
    /// Path to input file
    input: PathBuf,

    /// Path to output file, will be overwritten
    output: PathBuf,

    /// format channel_count [selected channels ...] a [AR coefficients ...] b [FIR coefficients ...]
    ///
    /// format is float32 or float64; selected channels are 1-based (leave
    /// empty to filter all channels); AR coefficients are a[1] a[2] ... with
    /// a[0] = 1.0; FIR coefficients are b[0] b[1] ...
    #[arg(
        value_name = "FILTER",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "config"
    )]
    filter: Vec<String>,

    /// TOML filter description instead of FILTER tokens
    #[arg(short, long, conflicts_with = "filter")]
    config: Option<PathBuf>,

    /// Summary printed after a successful run
    #[arg(short, long, value_enum, default_value = "none")]
    report: ReportFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
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

    let config = match args.config {
        Some(ref path) => FilterConfig::load(path)
            .with_context(|| format!("Failed to load filter file '{}'", path.display()))?,
        None => FilterConfig::from_tokens(args.filter.as_slice())?,
    };
    log::debug!("{:?}", config);

    let filter = ZeroPhaseFilter::new(&config)?;
    let report = filter.filter_files(&args.input, &args.output)?;
    log::info!("{}", report);

    if let Some(rendered) = report
        .render(args.report)
        .context("Failed to serialize report")?
    {
        println!("{}", rendered);
    }

    Ok(())
}
