/// Index of the maximum inside every run of samples above
/// `fraction * max(signal)`
pub fn find_peaks(signal: &[f64], fraction: f64) -> Vec<usize> {
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let threshold = fraction * max;

    let mut peaks = Vec::new();
    let mut current: Option<usize> = None;

    for (i, &v) in signal.iter().enumerate() {
        if v > threshold {
            match current {
                Some(best) if signal[best] >= v => {}
                _ => current = Some(i),
            }
        } else if let Some(best) = current.take() {
            peaks.push(best);
        }
    }
    if let Some(best) = current {
        peaks.push(best);
    }

    peaks
}
