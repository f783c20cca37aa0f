use super::image::Image;
use super::mother::WaveletKind;
use num_complex::Complex64;

/// Continuous wavelet transform over the integer scales `1..=maximum_width`
///
/// Returns the time-scale surface (one row per scale, one column per
/// sample). Complex wavelets are reduced to their magnitude; real wavelets
/// keep their signed response.
pub(crate) fn time_scale_surface(signal: &[f64], kind: WaveletKind, maximum_width: usize) -> Image {
    let integrated = kind.integrate();
    let mut surface = Image::zeros(maximum_width, signal.len());

    for (row, scale) in (1..=maximum_width).enumerate() {
        let kernel = integrated.kernel(scale as f64);
        log::trace!("{} scale {}: kernel of {} taps", kind, scale, kernel.len());

        let coefficients = scale_response(signal, &kernel, scale as f64);
        for (dst, c) in surface.row_mut(row).iter_mut().zip(coefficients) {
            *dst = if kind.is_complex() { c.norm() } else { c.re };
        }
    }

    surface
}

/// Response at a single scale: `-sqrt(scale) * d/dt (signal * kernel)`, centred
fn scale_response(signal: &[f64], kernel: &[Complex64], scale: f64) -> Vec<Complex64> {
    let n = signal.len();
    // The differenced full convolution is n + kernel.len() - 2 long; keep the
    // middle n samples, dropping the extra one from the front when odd.
    let offset = kernel.len().saturating_sub(2) / 2;
    let gain = -scale.sqrt();

    let mut previous = convolve_at(signal, kernel, offset);
    (0..n)
        .map(|i| {
            let current = convolve_at(signal, kernel, offset + i + 1);
            let value = (current - previous) * gain;
            previous = current;
            value
        })
        .collect()
}

/// One sample of the full convolution `signal * kernel`
fn convolve_at(signal: &[f64], kernel: &[Complex64], index: usize) -> Complex64 {
    let start = (index + 1).saturating_sub(signal.len());
    let end = kernel.len().min(index + 1);
    (start..end)
        .map(|k| kernel[k] * signal[index - k])
        .sum()
}
