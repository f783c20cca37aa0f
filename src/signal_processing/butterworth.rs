use crate::error::{DspError, Result};
use crate::signal_processing::filter::{DirectFormFilter, Filter};
use crate::signal_processing::math::{poly_eval, poly_from_roots};
use crate::validation;
use iir_filters::filter_design::{FilterType, butter};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Highest filter order accepted by the designer.
///
/// Expanding a Butterworth bandpass into a single numerator/denominator pair
/// loses precision quickly; beyond this order the coefficients are rarely
/// usable even for wide bands.
pub const MAX_FILTER_ORDER: usize = 12;

/// Allowed deviation from unit gain at the band centre after design.
const CENTER_GAIN_TOLERANCE: f64 = 1e-3;

/// Numerator/denominator coefficients of a digital filter, descending powers of z⁻¹.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub numerator: Vec<f64>,
    pub denominator: Vec<f64>,
}

impl TransferFunction {
    /// Frequency response at a normalised angular frequency (radians per sample)
    pub fn response(&self, omega: f64) -> Complex64 {
        // H(z) = B(z)/A(z); with equal-length vectors evaluate both in z = e^{jω}
        let z = Complex64::from_polar(1.0, omega);
        let len = self.numerator.len().max(self.denominator.len());
        let pad = |c: &[f64]| {
            let mut v = c.to_vec();
            v.resize(len, 0.0);
            v
        };
        poly_eval(&pad(&self.numerator), z) / poly_eval(&pad(&self.denominator), z)
    }

    fn is_finite(&self) -> bool {
        self.numerator
            .iter()
            .chain(self.denominator.iter())
            .all(|c| c.is_finite())
    }
}

/// Butterworth IIR bandpass filter for QRS band isolation
///
/// Designed from the analog Butterworth prototype via a lowpass-to-bandpass
/// transform and the bilinear transform, then expanded to a single
/// numerator/denominator pair. A filter of order N has 2N poles.
///
/// Filtering is a single forward pass (not zero-phase), so the output lags
/// the input by the filter's group delay.
#[derive(Debug, Clone)]
pub struct ButterworthBandpass {
    coefficients: TransferFunction,
    sampling_frequency: f64,
}

impl ButterworthBandpass {
    /// Design a new Butterworth bandpass filter
    ///
    /// # Arguments
    /// * `sampling_frequency` - Sample rate of the signal in Hz
    /// * `low_hz` - Lower cutoff frequency in Hz
    /// * `high_hz` - Upper cutoff frequency in Hz
    /// * `order` - Filter order (1 for the Pan-Tompkins defaults)
    ///
    /// # Errors
    /// Returns `DspError::InvalidParameter` if the cutoffs are not
    /// `0 < low < high < Nyquist` or the order is out of range, and
    /// `DspError::FilterDesign` if the resulting coefficients are unstable.
    pub fn design(sampling_frequency: f64, low_hz: f64, high_hz: f64, order: usize) -> Result<Self> {
        validation::check_positive("filter_order", order)?;
        if order > MAX_FILTER_ORDER {
            return Err(DspError::invalid(
                "filter_order",
                format!("must be at most {}, got {}", MAX_FILTER_ORDER, order),
            ));
        }
        let (low, high) = validation::normalized_cutoffs(sampling_frequency, low_hz, high_hz)?;

        let designed = butter(
            order as u32,
            FilterType::BandPass(low_hz, high_hz),
            sampling_frequency,
        )
        .map_err(|e| DspError::FilterDesign(format!("{:?}", e)))?;
        let zpk = Zpk {
            zeros: designed.z,
            poles: designed.p,
            gain: designed.k,
        };
        let coefficients = zpk.to_transfer_function();
        check_stability(&zpk, &coefficients, geometric_center(low, high))?;

        log::debug!(
            "Butterworth bandpass {}-{} Hz @ {} Hz, order {}: b={:?} a={:?}",
            low_hz,
            high_hz,
            sampling_frequency,
            order,
            coefficients.numerator,
            coefficients.denominator
        );

        Ok(Self {
            coefficients,
            sampling_frequency,
        })
    }

    /// Designed numerator/denominator coefficients
    pub fn coefficients(&self) -> &TransferFunction {
        &self.coefficients
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Minimum signal length accepted by [`apply`](Self::apply)
    pub fn min_signal_len(&self) -> usize {
        self.coefficients.denominator.len()
    }

    /// Create a fresh stateful filter running these coefficients
    pub fn filter(&self) -> Result<DirectFormFilter> {
        DirectFormFilter::new(&self.coefficients.numerator, &self.coefficients.denominator)
    }

    /// Filter a whole signal in one forward pass
    ///
    /// The input is left untouched; output length equals input length.
    pub fn apply(&self, signal: &[f64]) -> Result<Vec<f64>> {
        validation::check_signal(signal, self.min_signal_len())?;
        if signal.len() < 3 * self.min_signal_len() {
            log::warn!(
                "Signal of {} samples is short for a {}-tap filter; output is mostly transient",
                signal.len(),
                self.min_signal_len()
            );
        }

        let output = self.filter()?.process_signal(signal);
        validation::check_output("bandpass", &output)?;
        Ok(output)
    }
}

/// Design and apply a Butterworth bandpass filter in one call.
///
/// Output length equals input length.
pub fn bandpass(
    signal: &[f64],
    sampling_frequency: f64,
    low_cutoff: f64,
    high_cutoff: f64,
    filter_order: usize,
) -> Result<Vec<f64>> {
    ButterworthBandpass::design(sampling_frequency, low_cutoff, high_cutoff, filter_order)?
        .apply(signal)
}

/// Zeros, poles and gain of a digital filter
#[derive(Debug, Clone)]
struct Zpk {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl Zpk {
    fn to_transfer_function(&self) -> TransferFunction {
        let numerator = poly_from_roots(&self.zeros)
            .iter()
            .map(|c| c.re * self.gain)
            .collect();
        let denominator = poly_from_roots(&self.poles).iter().map(|c| c.re).collect();
        TransferFunction {
            numerator,
            denominator,
        }
    }
}

fn check_stability(zpk: &Zpk, tf: &TransferFunction, center: f64) -> Result<()> {
    if !zpk.gain.is_finite() || !tf.is_finite() {
        return Err(DspError::FilterDesign(
            "non-finite filter coefficients".to_string(),
        ));
    }

    if let Some(pole) = zpk.poles.iter().find(|p| !(p.norm() < 1.0)) {
        return Err(DspError::FilterDesign(format!(
            "pole {} lies outside the unit circle",
            pole
        )));
    }

    // A Butterworth bandpass has unit gain at the geometric centre of its
    // band. Losing it means the polynomial expansion destroyed the design.
    let gain = tf.response(center).norm();
    if (gain - 1.0).abs() > CENTER_GAIN_TOLERANCE {
        return Err(DspError::FilterDesign(format!(
            "numerically unstable coefficients: centre gain {:.6} instead of 1",
            gain
        )));
    }

    Ok(())
}

/// Digital angular frequency of the band centre for cutoffs normalised to Nyquist
///
/// The bilinear transform pre-warps both edges, so the centre is the
/// geometric mean of the warped edges mapped back to the unit circle.
fn geometric_center(low: f64, high: f64) -> f64 {
    let warp = |w: f64| (PI * w / 2.0).tan();
    2.0 * (warp(low) * warp(high)).sqrt().atan()
}
