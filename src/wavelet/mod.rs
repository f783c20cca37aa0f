//! Continuous wavelet transform images.
//!
//! A signal is analysed at the integer scales `1..=maximum_width` with either
//! a complex Morlet or a Mexican hat mother wavelet and the resulting
//! time-scale surface is resized to a fixed image size.
//!
//! The complex Morlet surface is reduced to its magnitude (phase is dropped);
//! the Mexican hat surface is real and keeps its sign.

mod cwt;
mod image;
mod mother;
mod resize;

use crate::error::{DspError, Result};
use crate::validation;

pub use image::Image;
pub use mother::WaveletKind;
pub use resize::resize;

/// Default output image size (rows, cols)
pub const DEFAULT_IMAGE_SIZE: ImageSize = ImageSize {
    rows: 128,
    cols: 128,
};

/// Target size of a wavelet image
///
/// Deserialises from a two-element `[rows, cols]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "Vec<usize>")]
pub struct ImageSize {
    pub rows: usize,
    pub cols: usize,
}

impl ImageSize {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::try_from(&[rows, cols][..])
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        DEFAULT_IMAGE_SIZE
    }
}

impl TryFrom<&[usize]> for ImageSize {
    type Error = DspError;

    fn try_from(size: &[usize]) -> Result<Self> {
        let (rows, cols) = validation::check_image_size(size)?;
        Ok(Self { rows, cols })
    }
}

impl TryFrom<Vec<usize>> for ImageSize {
    type Error = DspError;

    fn try_from(size: Vec<usize>) -> Result<Self> {
        Self::try_from(size.as_slice())
    }
}

/// Parameters of a single wavelet image computation
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletRequest {
    pub kind: WaveletKind,
    pub maximum_width: usize,
    pub image_size: ImageSize,
}

impl WaveletRequest {
    /// Build a request, validating width and image size
    pub fn new(kind: WaveletKind, maximum_width: usize, image_size: &[usize]) -> Result<Self> {
        validation::check_positive("maximum_width", maximum_width)?;
        Ok(Self {
            kind,
            maximum_width,
            image_size: ImageSize::try_from(image_size)?,
        })
    }

    /// Tuned defaults for `kind`
    pub fn with_defaults(kind: WaveletKind) -> Self {
        Self {
            kind,
            maximum_width: kind.default_maximum_width(),
            image_size: DEFAULT_IMAGE_SIZE,
        }
    }

    /// Complex Morlet, maximum width 128, 128x128 image
    pub fn complex_morlet() -> Self {
        Self::with_defaults(WaveletKind::ComplexMorlet)
    }

    /// Mexican hat, maximum width 32, 128x128 image
    pub fn mexican_hat() -> Self {
        Self::with_defaults(WaveletKind::MexicanHat)
    }

    pub fn with_maximum_width(mut self, maximum_width: usize) -> Self {
        self.maximum_width = maximum_width;
        self
    }

    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = image_size;
        self
    }
}

/// Transform `signal` into a fixed-size wavelet image
///
/// Deterministic: identical inputs always give identical images.
pub fn cwt_image(signal: &[f64], request: &WaveletRequest) -> Result<Image> {
    validation::check_signal(signal, 1)?;
    validation::check_positive("maximum_width", request.maximum_width)?;
    let ImageSize { rows, cols } = request.image_size;
    validation::check_image_size(&[rows, cols])?;

    log::debug!(
        "{} transform of {} samples over scales 1..={} into {}x{}",
        request.kind,
        signal.len(),
        request.maximum_width,
        rows,
        cols
    );

    if signal.len() < request.maximum_width {
        log::warn!(
            "Largest scale {} exceeds signal length {}",
            request.maximum_width,
            signal.len()
        );
    }

    let surface = cwt::time_scale_surface(signal, request.kind, request.maximum_width);
    let image = resize(&surface, rows, cols);
    validation::check_output("wavelet", image.as_slice())?;
    Ok(image)
}

/// Complex Morlet magnitude image (non-negative values)
pub fn complex_morlet_image(signal: &[f64], maximum_width: usize, image_size: &[usize]) -> Result<Image> {
    let request = WaveletRequest::new(WaveletKind::ComplexMorlet, maximum_width, image_size)?;
    cwt_image(signal, &request)
}

/// Mexican hat (Ricker) image (signed values)
pub fn mexican_hat_image(signal: &[f64], maximum_width: usize, image_size: &[usize]) -> Result<Image> {
    let request = WaveletRequest::new(WaveletKind::MexicanHat, maximum_width, image_size)?;
    cwt_image(signal, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * i as f64 / 20.0).sin())
            .collect()
    }

    #[test]
    fn test_defaults() {
        let morlet = WaveletRequest::complex_morlet();
        assert_eq!(morlet.maximum_width, 128);
        assert_eq!(morlet.image_size, ImageSize { rows: 128, cols: 128 });

        let hat = WaveletRequest::mexican_hat();
        assert_eq!(hat.maximum_width, 32);
        assert_eq!(hat.with_maximum_width(8).maximum_width, 8);
    }

    #[test]
    fn test_image_size_must_have_two_elements() {
        let signal = sine(64);
        let sizes: [&[usize]; 3] = [&[], &[32], &[32, 32, 3]];
        for size in sizes {
            assert!(matches!(
                complex_morlet_image(&signal, 4, size),
                Err(DspError::LengthMismatch { expected: 2, .. })
            ));
            assert!(matches!(
                mexican_hat_image(&signal, 4, size),
                Err(DspError::LengthMismatch { expected: 2, .. })
            ));
        }
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(
            mexican_hat_image(&sine(64), 0, &[8, 8]),
            Err(DspError::InvalidParameter { name: "maximum_width", .. })
        ));
    }

    #[test]
    fn test_empty_signal_rejected() {
        assert!(matches!(
            complex_morlet_image(&[], 4, &[8, 8]),
            Err(DspError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_requested_shape() {
        let signal = sine(90);
        let image = complex_morlet_image(&signal, 6, &[16, 40]).unwrap();
        assert_eq!(image.shape(), (16, 40));
        let image = mexican_hat_image(&signal, 6, &[5, 200]).unwrap();
        assert_eq!(image.shape(), (5, 200));
    }

    #[test]
    fn test_magnitude_vs_signed() {
        let signal = sine(120);
        let morlet = complex_morlet_image(&signal, 8, &[16, 16]).unwrap();
        assert!(morlet.as_slice().iter().all(|&v| v >= 0.0));

        let hat = mexican_hat_image(&signal, 8, &[16, 16]).unwrap();
        assert!(hat.min() < 0.0);
    }
}
