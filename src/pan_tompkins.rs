//! Pan-Tompkins QRS feature extraction.
//!
//! Four strictly sequential stages turn a raw ECG trace into a signal whose
//! local maxima mark candidate QRS complexes:
//!
//! 1. Butterworth bandpass (forward only, so the output carries phase delay)
//! 2. First difference, emphasising steep QRS slopes
//! 3. Squaring, making everything non-negative
//! 4. Moving-window integration with a boxcar spanning 60 ms
//!
//! The sampling frequency is an explicit argument because both the filter and
//! the integration window depend on it.

use crate::config::PanTompkinsConfig;
use crate::error::{DspError, Result};
use crate::signal_processing::{ButterworthBandpass, convolve_full, differentiate, square};
use crate::validation;

/// Integration window length in samples for a sampling frequency in Hz
///
/// `round(15 * fs / 250)`: 15 samples at 250 Hz, scaled to keep the same
/// duration at other rates.
pub fn integration_window_len(sampling_frequency: f64) -> Result<usize> {
    validation::check_frequency("sampling_frequency", sampling_frequency)?;
    let len = (15.0 * sampling_frequency / 250.0).round();
    if len < 1.0 {
        return Err(DspError::invalid(
            "sampling_frequency",
            format!(
                "{} Hz gives an empty integration window",
                sampling_frequency
            ),
        ));
    }
    Ok(len as usize)
}

/// Convolve with a boxcar of `window_len` ones
///
/// Output has the full convolution length `signal.len() + window_len - 1`.
pub fn integrate(signal: &[f64], window_len: usize) -> Vec<f64> {
    convolve_full(signal, &vec![1.0; window_len])
}

/// Output of every pipeline stage
#[derive(Debug, Clone)]
pub struct PanTompkinsStages {
    /// Bandpass output, same length as the input
    pub filtered: Vec<f64>,
    /// First difference, one sample shorter
    pub differentiated: Vec<f64>,
    /// Squared first difference
    pub squared: Vec<f64>,
    /// Moving-window integration of the squared signal
    pub integrated: Vec<f64>,
}

/// Pan-Tompkins pipeline bound to a sampling frequency
#[derive(Debug, Clone)]
pub struct PanTompkins {
    bandpass: ButterworthBandpass,
    window_len: usize,
}

impl PanTompkins {
    /// Design the pipeline for signals sampled at `sampling_frequency` Hz
    ///
    /// # Errors
    /// Fails if the bandpass cannot be designed or the sampling frequency is
    /// too low for a non-empty integration window.
    pub fn new(sampling_frequency: f64, config: &PanTompkinsConfig) -> Result<Self> {
        let window_len = integration_window_len(sampling_frequency)?;
        let bandpass = ButterworthBandpass::design(
            sampling_frequency,
            config.low_cutoff,
            config.high_cutoff,
            config.filter_order,
        )?;

        log::debug!(
            "Pan-Tompkins @ {} Hz: bandpass {}-{} Hz order {}, integration window {} samples",
            sampling_frequency,
            config.low_cutoff,
            config.high_cutoff,
            config.filter_order,
            window_len
        );

        Ok(Self {
            bandpass,
            window_len,
        })
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.bandpass.sampling_frequency()
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Minimum input length: enough for the filter and for one difference
    pub fn min_signal_len(&self) -> usize {
        self.bandpass.min_signal_len().max(2)
    }

    /// Expected output length for an input of `input_len` samples
    ///
    /// `(input_len - 1) + window_len - 1`, saturating at zero for inputs the
    /// pipeline would reject anyway.
    pub fn output_len(&self, input_len: usize) -> usize {
        (input_len + self.window_len).saturating_sub(2)
    }

    /// Run all four stages and return only the integrated signal
    pub fn run(&self, signal: &[f64]) -> Result<Vec<f64>> {
        Ok(self.run_stages(signal)?.integrated)
    }

    /// Run all four stages, keeping every intermediate result
    pub fn run_stages(&self, signal: &[f64]) -> Result<PanTompkinsStages> {
        validation::check_signal(signal, self.min_signal_len())?;

        let filtered = self.bandpass.apply(signal)?;

        let differentiated = differentiate(&filtered);
        validation::check_output("differentiation", &differentiated)?;

        let squared = square(&differentiated);
        validation::check_output("squaring", &squared)?;

        let integrated = integrate(&squared, self.window_len);
        validation::check_output("integration", &integrated)?;

        log::debug!(
            "Pan-Tompkins stages: {} -> {} -> {} -> {} samples",
            filtered.len(),
            differentiated.len(),
            squared.len(),
            integrated.len()
        );

        Ok(PanTompkinsStages {
            filtered,
            differentiated,
            squared,
            integrated,
        })
    }
}

/// Run the Pan-Tompkins pipeline on a signal sampled at `sampling_frequency` Hz.
pub fn pan_tompkins(
    signal: &[f64],
    sampling_frequency: f64,
    config: &PanTompkinsConfig,
) -> Result<Vec<f64>> {
    PanTompkins::new(sampling_frequency, config)?.run(signal)
}
