//! Configuration for the ECG processing pipelines.
//!
//! Every parameter has a default matching the classic Pan-Tompkins setup and
//! the tuned wavelet image sizes. A TOML file can override any subset:
//!
//! ```toml
//! [pan_tompkins]
//! high_cutoff = 20.0
//!
//! [mexican_hat]
//! maximum_width = 48
//! image_size = [64, 256]
//! ```

use crate::error::{DspError, Result};
use crate::wavelet::{ImageSize, WaveletKind, WaveletRequest};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Sampling frequency of a signal
///
/// Can be specified as either a frequency in Hz or a sample period.
///
/// # Parsing formats
/// - `250` - frequency in Hz (no suffix)
/// - `250hz` or `250Hz` - frequency in Hz (explicit)
/// - `4ms` - sample period in milliseconds
/// - `4000us` or `4000μs` - sample period in microseconds
///
/// # Example
/// ```
/// use ecgdsp::config::SamplingFrequency;
///
/// let fs: SamplingFrequency = "4ms".parse().unwrap();
/// assert!((fs.as_hz() - 250.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingFrequency(f64);

impl SamplingFrequency {
    /// Create from frequency in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    /// Create from sample period in milliseconds
    pub fn from_period_ms(ms: f64) -> Self {
        Self(1_000.0 / ms)
    }

    /// Get frequency in Hz
    pub fn as_hz(&self) -> f64 {
        self.0
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f64 {
        self.0 / 2.0
    }
}

impl Default for SamplingFrequency {
    fn default() -> Self {
        Self::from_hz(250.0)
    }
}

impl fmt::Display for SamplingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hz", self.0)
    }
}

impl FromStr for SamplingFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        let parse_positive = |num: &str, what: &str| -> std::result::Result<f64, String> {
            let value: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid {}: {}", what, s))?;
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be positive", what));
            }
            Ok(value)
        };

        if let Some(num) = s.strip_suffix("ms") {
            return Ok(Self::from_period_ms(parse_positive(num, "period")?));
        }

        if let Some(num) = s.strip_suffix("us").or_else(|| s.strip_suffix("μs")) {
            return Ok(Self::from_period_ms(parse_positive(num, "period")? / 1_000.0));
        }

        let num = s
            .strip_suffix("hz")
            .or_else(|| s.strip_suffix("Hz"))
            .or_else(|| s.strip_suffix("HZ"))
            .unwrap_or(s);
        Ok(Self::from_hz(parse_positive(num, "frequency")?))
    }
}

/// Butterworth bandpass parameters
///
/// Also parameterises the bandpass stage of the Pan-Tompkins pipeline, see
/// [`PanTompkinsConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BandpassConfig {
    /// Lower cutoff in Hz
    pub low_cutoff: f64,
    /// Upper cutoff in Hz
    pub high_cutoff: f64,
    /// Filter order
    pub filter_order: usize,
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self {
            low_cutoff: 0.1,
            high_cutoff: 15.0,
            filter_order: 1,
        }
    }
}

/// Pan-Tompkins parameters
///
/// The pipeline is configured entirely by its bandpass stage; the cutoffs
/// isolate the QRS band while rejecting baseline wander and high-frequency
/// noise. The integration window follows from the sampling frequency.
pub type PanTompkinsConfig = BandpassConfig;

/// Wavelet image parameters for one mother wavelet
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WaveletConfig {
    /// Largest scale analysed (scales run 1..=maximum_width); the wavelet's
    /// tuned width when unset
    #[serde(default)]
    pub maximum_width: Option<usize>,
    /// Output image size as `[rows, cols]`
    #[serde(default)]
    pub image_size: ImageSize,
}

impl WaveletConfig {
    /// Configured maximum width, or the tuned default for `kind`
    pub fn maximum_width(&self, kind: WaveletKind) -> usize {
        self.maximum_width
            .unwrap_or_else(|| kind.default_maximum_width())
    }

    /// Request for computing an image with these parameters
    pub fn request(&self, kind: WaveletKind) -> WaveletRequest {
        WaveletRequest::with_defaults(kind)
            .with_maximum_width(self.maximum_width(kind))
            .with_image_size(self.image_size)
    }
}

/// Complete processing configuration
///
/// # Example
/// ```
/// use ecgdsp::WaveletKind;
/// use ecgdsp::config::ProcessingConfig;
///
/// let config = ProcessingConfig::from_toml_str("[mexican_hat]\nmaximum_width = 16\n").unwrap();
/// assert_eq!(config.mexican_hat.maximum_width(WaveletKind::MexicanHat), 16);
/// assert_eq!(config.complex_morlet.maximum_width(WaveletKind::ComplexMorlet), 128);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Standalone bandpass filter
    pub bandpass: BandpassConfig,
    /// QRS feature pipeline
    pub pan_tompkins: PanTompkinsConfig,
    /// Complex Morlet images
    pub complex_morlet: WaveletConfig,
    /// Mexican hat images
    pub mexican_hat: WaveletConfig,
}

impl ProcessingConfig {
    /// Parse a configuration from TOML text; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DspError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DspError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Wavelet parameters for `kind`
    pub fn wavelet(&self, kind: WaveletKind) -> &WaveletConfig {
        match kind {
            WaveletKind::ComplexMorlet => &self.complex_morlet,
            WaveletKind::MexicanHat => &self.mexican_hat,
        }
    }
}
