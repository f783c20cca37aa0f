use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use ecgdsp::config::{ProcessingConfig, SamplingFrequency};
use ecgdsp::output::{OutputFormat, ProcessingOutput, create_formatter};
use ecgdsp::signal_processing::ButterworthBandpass;
use ecgdsp::{PanTompkins, WaveletKind, cwt_image, load_wav, request};

#[derive(Parser, Debug)]
#[command(name = "ecgdsp")]
#[command(about = "ECG bandpass filtering, Pan-Tompkins QRS features and wavelet images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// TOML configuration file overriding the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Butterworth bandpass filter
    Bandpass {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Pan-Tompkins QRS feature signal
    PanTompkins {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Continuous wavelet transform image
    Cwt {
        #[command(flatten)]
        input: InputArgs,

        /// Mother wavelet
        #[arg(short, long, value_enum)]
        wavelet: WaveletKind,

        /// Largest scale analysed
        #[arg(long)]
        maximum_width: Option<usize>,

        /// Output image size
        #[arg(long, num_args = 2, value_names = ["ROWS", "COLS"])]
        image_size: Option<Vec<usize>>,
    },
    /// Execute a JSON request file and print the JSON response
    Request {
        /// Request file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Signal file: mono WAV, or text with one sample per line
    input: PathBuf,

    /// Sampling frequency (e.g., "250", "360hz", "4ms"); overrides the WAV header
    #[arg(short = 'r', long)]
    sampling_frequency: Option<SamplingFrequency>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Bandpass lower cutoff in Hz
    #[arg(long)]
    low_cutoff: Option<f64>,

    /// Bandpass upper cutoff in Hz
    #[arg(long)]
    high_cutoff: Option<f64>,

    /// Butterworth filter order
    #[arg(long)]
    order: Option<usize>,
}

struct LoadedSignal {
    samples: Vec<f64>,
    sampling_frequency: SamplingFrequency,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match cli.config {
        Some(ref path) => ProcessingConfig::load(path)?,
        None => ProcessingConfig::default(),
    };

    let output = match cli.command {
        Command::Bandpass { input, filter } => {
            let signal = load_signal(&input)?;
            let bandpass = &mut config.bandpass;
            bandpass.low_cutoff = filter.low_cutoff.unwrap_or(bandpass.low_cutoff);
            bandpass.high_cutoff = filter.high_cutoff.unwrap_or(bandpass.high_cutoff);
            bandpass.filter_order = filter.order.unwrap_or(bandpass.filter_order);

            let fs = signal.sampling_frequency.as_hz();
            let filter = ButterworthBandpass::design(
                fs,
                bandpass.low_cutoff,
                bandpass.high_cutoff,
                bandpass.filter_order,
            )?;
            ProcessingOutput::signal("bandpass", fs, filter.apply(&signal.samples)?)
        }
        Command::PanTompkins { input, filter } => {
            let signal = load_signal(&input)?;
            let pt = &mut config.pan_tompkins;
            pt.low_cutoff = filter.low_cutoff.unwrap_or(pt.low_cutoff);
            pt.high_cutoff = filter.high_cutoff.unwrap_or(pt.high_cutoff);
            pt.filter_order = filter.order.unwrap_or(pt.filter_order);

            let fs = signal.sampling_frequency.as_hz();
            let pipeline = PanTompkins::new(fs, pt)?;
            log::info!(
                "Integration window {} samples ({:.1} ms)",
                pipeline.window_len(),
                pipeline.window_len() as f64 * 1_000.0 / fs
            );
            ProcessingOutput::signal("pan_tompkins", fs, pipeline.run(&signal.samples)?)
        }
        Command::Cwt {
            input,
            wavelet,
            maximum_width,
            image_size,
        } => {
            let signal = load_signal(&input)?;
            let mut request = config.wavelet(wavelet).request(wavelet);
            if let Some(width) = maximum_width {
                request = request.with_maximum_width(width);
            }
            if let Some(size) = image_size {
                request = request.with_image_size(size.try_into()?);
            }
            ProcessingOutput::image(wavelet.to_string(), cwt_image(&signal.samples, &request)?)
        }
        Command::Request { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let value: serde_json::Value =
                serde_json::from_str(&content).context("Failed to parse request")?;
            let response = request::execute(&value)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(());
        }
    };

    let formatter = create_formatter(cli.format, cli.verbose > 0);
    if let Some(header) = formatter.header(&output) {
        println!("{}", header);
    }
    println!("{}", formatter.format(&output));

    Ok(())
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

fn load_signal(args: &InputArgs) -> Result<LoadedSignal> {
    if is_wav(&args.input) {
        let wav = load_wav(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
        let sampling_frequency = args
            .sampling_frequency
            .unwrap_or_else(|| SamplingFrequency::from_hz(f64::from(wav.sample_rate)));
        return Ok(LoadedSignal {
            samples: wav.samples,
            sampling_frequency,
        });
    }

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let samples = parse_text_signal(&content)?;
    let sampling_frequency = args.sampling_frequency.unwrap_or_else(|| {
        let fs = SamplingFrequency::default();
        log::warn!("No sampling frequency given for text input, assuming {}", fs);
        fs
    });

    Ok(LoadedSignal {
        samples,
        sampling_frequency,
    })
}

/// One sample per line; blank lines and `#` comments are skipped
fn parse_text_signal(content: &str) -> Result<Vec<f64>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(i, line)| {
            line.parse::<f64>()
                .with_context(|| format!("Invalid sample on line {}: {:?}", i + 1, line))
        })
        .collect()
}
