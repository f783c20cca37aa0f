//! Input contracts shared by the filter, wavelet and Pan-Tompkins stages.
//!
//! Every public entry point runs these checks before touching the data, so a
//! malformed argument surfaces as a [`DspError`] instead of NaN coefficients
//! or a silently degenerate result.

use crate::error::{DspError, Result};

/// Number of elements an image size must have (rows, columns).
pub const IMAGE_SIZE_LEN: usize = 2;

/// Check that a signal holds at least `needed` samples and that all of them are finite.
pub fn check_signal(signal: &[f64], needed: usize) -> Result<()> {
    if signal.len() < needed {
        return Err(DspError::InsufficientData {
            needed,
            available: signal.len(),
        });
    }

    if let Some(index) = signal.iter().position(|s| !s.is_finite()) {
        return Err(DspError::invalid(
            "signal",
            format!("sample {} is not finite ({})", index, signal[index]),
        ));
    }

    Ok(())
}

/// Check that a frequency in Hz is finite and strictly positive.
pub fn check_frequency(name: &'static str, hz: f64) -> Result<()> {
    if !hz.is_finite() {
        return Err(DspError::TypeMismatch {
            name,
            expected: "finite number",
        });
    }
    if hz <= 0.0 {
        return Err(DspError::invalid(name, format!("must be positive, got {}", hz)));
    }
    Ok(())
}

/// Check that a count-like parameter (order, width, image dimension) is non-zero.
pub fn check_positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(DspError::invalid(name, "must be a positive integer"));
    }
    Ok(())
}

/// Normalise bandpass cutoffs to the Nyquist frequency.
///
/// Returns `(low, high)` with `0 < low < high < 1`.
pub fn normalized_cutoffs(sampling_frequency: f64, low_hz: f64, high_hz: f64) -> Result<(f64, f64)> {
    check_frequency("sampling_frequency", sampling_frequency)?;
    check_frequency("low_cutoff", low_hz)?;
    check_frequency("high_cutoff", high_hz)?;

    let nyquist = sampling_frequency / 2.0;
    if low_hz >= high_hz {
        return Err(DspError::invalid(
            "low_cutoff",
            format!("must be below high cutoff ({} >= {})", low_hz, high_hz),
        ));
    }
    if high_hz >= nyquist {
        return Err(DspError::invalid(
            "high_cutoff",
            format!("must be below Nyquist frequency ({} >= {})", high_hz, nyquist),
        ));
    }

    Ok((low_hz / nyquist, high_hz / nyquist))
}

/// Check that an image size has exactly two non-zero dimensions.
pub fn check_image_size(size: &[usize]) -> Result<(usize, usize)> {
    if size.len() != IMAGE_SIZE_LEN {
        return Err(DspError::LengthMismatch {
            name: "image_size",
            expected: IMAGE_SIZE_LEN,
            actual: size.len(),
        });
    }
    check_positive("image_size", size[0])?;
    check_positive("image_size", size[1])?;
    Ok((size[0], size[1]))
}

/// Reject stage output containing NaN or infinity.
pub fn check_output(stage: &'static str, samples: &[f64]) -> Result<()> {
    if samples.iter().all(|s| s.is_finite()) {
        Ok(())
    } else {
        Err(DspError::NonFiniteOutput { stage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_too_short() {
        let err = check_signal(&[1.0], 2).unwrap_err();
        assert_eq!(
            err,
            DspError::InsufficientData {
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_signal_with_nan_rejected() {
        let err = check_signal(&[0.0, f64::NAN, 1.0], 1).unwrap_err();
        assert!(matches!(err, DspError::InvalidParameter { name: "signal", .. }));
    }

    #[test]
    fn test_normalized_cutoffs() {
        let (low, high) = normalized_cutoffs(250.0, 0.1, 15.0).unwrap();
        assert!((low - 0.0008).abs() < 1e-12);
        assert!((high - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_cutoffs_out_of_order() {
        assert!(normalized_cutoffs(250.0, 15.0, 0.1).is_err());
        assert!(normalized_cutoffs(250.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_cutoff_above_nyquist() {
        assert!(normalized_cutoffs(250.0, 1.0, 125.0).is_err());
        assert!(normalized_cutoffs(250.0, 1.0, 200.0).is_err());
    }

    #[test]
    fn test_non_finite_frequency_is_type_error() {
        let err = check_frequency("sampling_frequency", f64::NAN).unwrap_err();
        assert!(matches!(err, DspError::TypeMismatch { .. }));
    }

    #[test]
    fn test_image_size_length() {
        assert_eq!(check_image_size(&[64, 32]).unwrap(), (64, 32));

        let err = check_image_size(&[64]).unwrap_err();
        assert_eq!(
            err,
            DspError::LengthMismatch {
                name: "image_size",
                expected: 2,
                actual: 1
            }
        );
        assert!(matches!(
            check_image_size(&[1, 2, 3]),
            Err(DspError::LengthMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn test_image_size_zero_dimension() {
        assert!(matches!(
            check_image_size(&[0, 8]),
            Err(DspError::InvalidParameter { .. })
        ));
    }
}
