use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Noise sources added on top of a clean ECG trace
///
/// Each source is optional; `seed` makes the result reproducible.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub baseline_wander: Option<BaselineWanderConfig>,
    pub powerline: Option<PowerlineConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f64) -> Self {
        self.additive = Some(AdditiveNoiseConfig { snr_db });
        self
    }

    pub fn with_baseline_wander(mut self, amplitude: f64, frequency_hz: f64) -> Self {
        self.baseline_wander = Some(BaselineWanderConfig {
            amplitude,
            frequency_hz,
        });
        self
    }

    pub fn with_powerline(mut self, amplitude: f64, frequency_hz: f64) -> Self {
        self.powerline = Some(PowerlineConfig {
            amplitude,
            frequency_hz,
        });
        self
    }
}

/// White Gaussian noise at a signal-to-noise ratio
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f64,
}

/// Slow sinusoidal drift of the baseline (respiration, electrode motion)
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BaselineWanderConfig {
    pub amplitude: f64,
    pub frequency_hz: f64,
}

/// Mains interference
#[derive(Clone, Debug, serde::Deserialize)]
pub struct PowerlineConfig {
    pub amplitude: f64,
    pub frequency_hz: f64,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean square value
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

fn apply_additive_noise(signal: &mut [f64], config: &AdditiveNoiseConfig, rng: &mut ChaCha8Rng) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let snr_linear = 10.0_f64.powf(config.snr_db / 10.0);
    let noise_std = (sig_power / snr_linear).sqrt();

    let Ok(normal) = Normal::new(0.0, noise_std) else {
        log::warn!("Skipping additive noise with invalid deviation {}", noise_std);
        return;
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

fn apply_sinusoid(signal: &mut [f64], amplitude: f64, frequency_hz: f64, sample_rate: f64, phase: f64) {
    for (i, sample) in signal.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        *sample += amplitude * (2.0 * PI * frequency_hz * t + phase).sin();
    }
}

/// Return a noisy copy of `clean_signal`
pub fn apply_noise(clean_signal: &[f64], config: &NoiseConfig, sample_rate: f64) -> Vec<f64> {
    let mut signal = clean_signal.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref wander) = config.baseline_wander {
        let phase = rng.random::<f64>() * 2.0 * PI;
        apply_sinusoid(&mut signal, wander.amplitude, wander.frequency_hz, sample_rate, phase);
    }

    if let Some(ref powerline) = config.powerline {
        let phase = rng.random::<f64>() * 2.0 * PI;
        apply_sinusoid(
            &mut signal,
            powerline.amplitude,
            powerline.frequency_hz,
            sample_rate,
            phase,
        );
    }

    if let Some(ref additive_config) = config.additive {
        apply_additive_noise(&mut signal, additive_config, &mut rng);
    }

    signal
}
