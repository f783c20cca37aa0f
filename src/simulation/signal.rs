use std::f64::consts::PI;

/// Gaussian component of a synthetic heartbeat: (offset from R peak in s, width in s, amplitude)
const BEAT_WAVES: [(f64, f64, f64); 5] = [
    (-0.20, 0.025, 0.15),  // P
    (-0.025, 0.010, -0.12), // Q
    (0.0, 0.012, 1.0),      // R
    (0.025, 0.010, -0.25),  // S
    (0.25, 0.040, 0.30),    // T
];

/// Synthetic ECG trace with known beat locations
#[derive(Debug, Clone)]
pub struct SyntheticEcg {
    /// Samples in millivolt-like units (R peak ~1.0)
    pub samples: Vec<f64>,
    /// Sample index of every R peak
    pub r_peaks: Vec<usize>,
}

/// Square wave alternating between +1 and -1
pub fn square_wave(duration_secs: f64, sample_rate: f64, frequency_hz: f64) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate) as usize;
    (0..num_samples)
        .map(|i| {
            let phase = (i as f64 * frequency_hz / sample_rate).fract();
            if phase < 0.5 { 1.0 } else { -1.0 }
        })
        .collect()
}

/// Unit-amplitude sine wave
pub fn sine_wave(duration_secs: f64, sample_rate: f64, frequency_hz: f64) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate) as usize;
    (0..num_samples)
        .map(|i| (2.0 * PI * frequency_hz * i as f64 / sample_rate).sin())
        .collect()
}

/// Generate a noise-free ECG-like trace at a constant heart rate
///
/// Each beat is a sum of Gaussian bumps for the P, Q, R, S and T waves. The
/// first R peak is placed 0.4 s into the trace so its P wave is complete.
pub fn synthetic_ecg(duration_secs: f64, sample_rate: f64, heart_rate_bpm: f64) -> SyntheticEcg {
    let num_samples = (duration_secs * sample_rate) as usize;
    let beat_interval = 60.0 / heart_rate_bpm;

    let mut r_times = Vec::new();
    let mut t = 0.4;
    while t < duration_secs {
        r_times.push(t);
        t += beat_interval;
    }

    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            r_times
                .iter()
                .filter(|&&r| (t - r).abs() < 0.5)
                .map(|&r| beat_value(t - r))
                .sum()
        })
        .collect();

    let r_peaks = r_times
        .iter()
        .map(|r| (r * sample_rate).round() as usize)
        .filter(|&i| i < num_samples)
        .collect();

    SyntheticEcg { samples, r_peaks }
}

fn beat_value(dt: f64) -> f64 {
    BEAT_WAVES
        .iter()
        .map(|&(offset, width, amplitude)| {
            let x = (dt - offset) / width;
            amplitude * (-0.5 * x * x).exp()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave() {
        let wave = square_wave(1.0, 8.0, 2.0);
        assert_eq!(wave, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_sine_wave_length() {
        let wave = sine_wave(2.0, 250.0, 5.0);
        assert_eq!(wave.len(), 500);
        assert!(wave.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_synthetic_ecg_beats() {
        let ecg = synthetic_ecg(10.0, 250.0, 60.0);
        assert_eq!(ecg.samples.len(), 2500);
        assert_eq!(ecg.r_peaks.len(), 10);
        assert_eq!(ecg.r_peaks[0], 100);

        // R peaks dominate the trace
        for &peak in &ecg.r_peaks {
            assert!(ecg.samples[peak] > 0.9);
        }
    }
}
