use num_complex::Complex64;
use std::f64::consts::PI;

/// Number of points (as a power of two) used to sample the mother wavelet.
const PRECISION: u32 = 10;

/// Effective support of both mother wavelets.
const LOWER_BOUND: f64 = -8.0;
const UPPER_BOUND: f64 = 8.0;

/// Complex Morlet bandwidth (B) and centre frequency (C), i.e. `cmor1.5-1`.
const MORLET_BANDWIDTH: f64 = 1.5;
const MORLET_CENTER_FREQUENCY: f64 = 1.0;

/// Mother wavelet used for the continuous wavelet transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveletKind {
    /// Complex Morlet (`cmor1.5-1`); images hold the response magnitude
    ComplexMorlet,
    /// Mexican hat / Ricker; images hold the signed real response
    MexicanHat,
}

impl WaveletKind {
    /// Tuned maximum scale width for this wavelet
    pub fn default_maximum_width(self) -> usize {
        match self {
            WaveletKind::ComplexMorlet => 128,
            WaveletKind::MexicanHat => 32,
        }
    }

    /// Whether the transform produces a complex surface
    pub fn is_complex(self) -> bool {
        matches!(self, WaveletKind::ComplexMorlet)
    }

    /// Short wavelet name in the usual `family+parameters` notation
    pub fn name(self) -> &'static str {
        match self {
            WaveletKind::ComplexMorlet => "cmor1.5-1",
            WaveletKind::MexicanHat => "mexh",
        }
    }

    /// Evaluate the mother wavelet at `x`
    pub fn psi(self, x: f64) -> Complex64 {
        match self {
            WaveletKind::ComplexMorlet => {
                let envelope = (-x * x / MORLET_BANDWIDTH).exp() / (PI * MORLET_BANDWIDTH).sqrt();
                Complex64::from_polar(envelope, 2.0 * PI * MORLET_CENTER_FREQUENCY * x)
            }
            WaveletKind::MexicanHat => {
                let norm = 2.0 / (3.0_f64.sqrt() * PI.powf(0.25));
                Complex64::new(norm * (1.0 - x * x) * (-x * x / 2.0).exp(), 0.0)
            }
        }
    }

    /// Running integral of the mother wavelet over its support
    pub(crate) fn integrate(self) -> IntegratedWavelet {
        let n = 1usize << PRECISION;
        let step = (UPPER_BOUND - LOWER_BOUND) / (n - 1) as f64;

        let mut acc = Complex64::new(0.0, 0.0);
        let values = (0..n)
            .map(|i| {
                acc += self.psi(LOWER_BOUND + i as f64 * step);
                acc * step
            })
            .collect();

        IntegratedWavelet {
            values,
            step,
            span: UPPER_BOUND - LOWER_BOUND,
        }
    }
}

impl std::fmt::Display for WaveletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cumulative integral of a mother wavelet sampled on a uniform grid
#[derive(Debug, Clone)]
pub(crate) struct IntegratedWavelet {
    pub values: Vec<Complex64>,
    pub step: f64,
    pub span: f64,
}

impl IntegratedWavelet {
    /// Integral resampled for `scale` and reversed, ready for convolution
    pub fn kernel(&self, scale: f64) -> Vec<Complex64> {
        let len = (scale * self.span + 1.0).ceil() as usize;
        let mut kernel: Vec<Complex64> = (0..len)
            .map(|k| (k as f64 / (scale * self.step)) as usize)
            .take_while(|&j| j < self.values.len())
            .map(|j| self.values[j].conj())
            .collect();
        kernel.reverse();
        kernel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_widths() {
        assert_eq!(WaveletKind::ComplexMorlet.default_maximum_width(), 128);
        assert_eq!(WaveletKind::MexicanHat.default_maximum_width(), 32);
    }

    #[test]
    fn test_mexican_hat_shape() {
        let peak = WaveletKind::MexicanHat.psi(0.0);
        assert!((peak.re - 0.867_325_070_584_078).abs() < 1e-12);
        assert_eq!(peak.im, 0.0);
        // Zero crossings at +-1
        assert!(WaveletKind::MexicanHat.psi(1.0).re.abs() < 1e-15);
        assert!(WaveletKind::MexicanHat.psi(2.0).re < 0.0);
    }

    #[test]
    fn test_morlet_envelope() {
        let peak = WaveletKind::ComplexMorlet.psi(0.0);
        assert!((peak.norm() - 1.0 / (PI * 1.5).sqrt()).abs() < 1e-12);
        // Unit centre frequency: a full cycle per unit of x
        let one = WaveletKind::ComplexMorlet.psi(1.0);
        assert!(one.im.abs() < 1e-12);
        assert!(one.re > 0.0);
    }

    #[test]
    fn test_integrals_vanish_over_support() {
        for kind in [WaveletKind::ComplexMorlet, WaveletKind::MexicanHat] {
            let integrated = kind.integrate();
            assert_eq!(integrated.values.len(), 1024);
            let total = integrated.values.last().unwrap();
            assert!(total.norm() < 1e-3, "{} integral {}", kind, total);
        }
    }

    #[test]
    fn test_kernel_length_grows_with_scale() {
        let integrated = WaveletKind::MexicanHat.integrate();
        assert_eq!(integrated.kernel(1.0).len(), 17);
        assert_eq!(integrated.kernel(4.0).len(), 65);
    }
}
