use anyhow::{Context, Result};
use clap::Parser;
use ecgdsp::save_wav;
use ecgdsp::simulation::{NoiseConfig, apply_noise, synthetic_ecg};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_ecg")]
#[command(about = "Generate synthetic ECG WAV files with configurable noise")]
struct Args {
    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Heart rates in bpm: comma-separated (e.g., "60,75,90") or range (e.g., "40-180:20")
    #[arg(short = 'b', long, default_value = "60-120:20")]
    heart_rates: String,

    /// Number of trials per heart rate
    #[arg(short, long, default_value_t = 3)]
    trials: u32,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 250)]
    sample_rate: u32,

    /// Output filename prefix
    #[arg(long, default_value = "ecg")]
    prefix: String,

    /// Generate manifest.json with R peak positions
    #[arg(long)]
    manifest: bool,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f64>,

    /// Mains interference frequency in Hz (CLI override, amplitude 0.05)
    #[arg(long)]
    mains_hz: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    file: String,
    heart_rate_bpm: f64,
    trial: u32,
    seed: u64,
    r_peaks: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct Manifest {
    sample_rate: u32,
    duration: f64,
    files: Vec<ManifestEntry>,
}

fn parse_heart_rates(s: &str) -> Result<Vec<f64>> {
    let rates: Vec<f64> = if let Some((range, step)) = s.split_once(':') {
        let step: f64 = step.parse().context("Invalid step value")?;
        if step <= 0.0 {
            anyhow::bail!("Step must be positive");
        }
        let (start, end) = range
            .split_once('-')
            .context("Invalid range format. Use 'start-end:step'")?;
        let start: f64 = start.parse().context("Invalid start value")?;
        let end: f64 = end.parse().context("Invalid end value")?;

        let mut rates = Vec::new();
        let mut r = start;
        while r <= end {
            rates.push(r);
            r += step;
        }
        rates
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f64>().context("Invalid heart rate value"))
            .collect::<Result<_>>()?
    };

    if let Some(bad) = rates.iter().find(|&&r| r <= 0.0) {
        anyhow::bail!("Heart rate must be positive, got {}", bad);
    }
    Ok(rates)
}

fn load_noise_config(path: &PathBuf) -> Result<NoiseConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(base: &NoiseConfig, args: &Args, seed: u64) -> NoiseConfig {
    let mut config = base.clone().with_seed(seed);

    if let Some(snr) = args.snr {
        config = config.with_awgn(snr);
    }
    if let Some(mains_hz) = args.mains_hz {
        config = config.with_powerline(0.05, mains_hz);
    }

    config
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let base_config = match args.config {
        Some(ref path) => load_noise_config(path)?,
        None => NoiseConfig::default(),
    };

    let heart_rates = parse_heart_rates(&args.heart_rates)?;
    let base_seed = args.seed.unwrap_or(0);
    let fs_hz = f64::from(args.sample_rate);

    let mut manifest_entries = Vec::new();
    let total_files = heart_rates.len() * args.trials as usize;
    let mut file_count = 0;

    for &bpm in &heart_rates {
        for trial in 0..args.trials {
            let seed = base_seed + trial as u64 * 1000 + bpm as u64;
            let noise_config = build_noise_config(&base_config, &args, seed);

            let ecg = synthetic_ecg(args.duration, fs_hz, bpm);
            let signal = apply_noise(&ecg.samples, &noise_config, fs_hz);

            let filename = format!("{}_hr{:03}_t{:02}.wav", args.prefix, bpm as i32, trial);
            let filepath = args.output_dir.join(&filename);

            save_wav(&filepath, &signal, args.sample_rate).context("Failed to write WAV file")?;

            manifest_entries.push(ManifestEntry {
                file: filename,
                heart_rate_bpm: bpm,
                trial,
                seed,
                r_peaks: ecg.r_peaks,
            });

            file_count += 1;
            eprint!("\rGenerating: {}/{}", file_count, total_files);
        }
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            sample_rate: args.sample_rate,
            duration: args.duration,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        total_files,
        args.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heart_rates_comma_separated() {
        assert_eq!(parse_heart_rates("60, 75,90").unwrap(), vec![60.0, 75.0, 90.0]);
    }

    #[test]
    fn test_parse_heart_rates_range() {
        assert_eq!(
            parse_heart_rates("60-120:20").unwrap(),
            vec![60.0, 80.0, 100.0, 120.0]
        );
    }

    #[test]
    fn test_parse_heart_rates_invalid() {
        assert!(parse_heart_rates("60-120:0").is_err());
        assert!(parse_heart_rates("0,60").is_err());
        assert!(parse_heart_rates("fast").is_err());
    }

    #[test]
    fn test_noise_config_toml() {
        let config: NoiseConfig = toml::from_str(
            r#"
            [additive]
            snr_db = 20.0

            [powerline]
            amplitude = 0.05
            frequency_hz = 50.0
            "#,
        )
        .unwrap();
        assert_eq!(config.additive.unwrap().snr_db, 20.0);
        assert!(config.baseline_wander.is_none());
        assert_eq!(config.powerline.unwrap().frequency_hz, 50.0);
    }
}
