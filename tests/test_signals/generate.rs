use ecgdsp::simulation::{NoiseConfig, SyntheticEcg, apply_noise, synthetic_ecg};

/// Square wave of `len` samples switching sign every `period / 2` samples
pub fn square_wave(len: usize, period: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if (i / (period / 2)) % 2 == 0 { 1.0 } else { -1.0 })
        .collect()
}

/// Synthetic ECG with baseline wander, 50 Hz mains and 20 dB AWGN
///
/// The R peak positions of the clean trace are kept.
pub fn noisy_ecg(duration_secs: f64, sample_rate: f64, heart_rate_bpm: f64, seed: u64) -> SyntheticEcg {
    let clean = synthetic_ecg(duration_secs, sample_rate, heart_rate_bpm);
    let noise = NoiseConfig::default()
        .with_seed(seed)
        .with_baseline_wander(0.3, 0.3)
        .with_powerline(0.05, 50.0)
        .with_awgn(20.0);

    SyntheticEcg {
        samples: apply_noise(&clean.samples, &noise, sample_rate),
        r_peaks: clean.r_peaks,
    }
}
